/// Host object resolution for `ObjectReference` variants

use super::variant::ObjectHandle;
use std::collections::HashMap;

/// Maps opaque handles back to host objects.
///
/// Resolvers are passed explicitly to the operations that need them; there
/// is no global registry.
pub trait ObjectResolver {
    type Object;

    /// Returns the object behind `handle`, or `None` if it no longer exists
    fn resolve(&self, handle: ObjectHandle) -> Option<Self::Object>;
}

/// In-memory resolver backed by a hash map
#[derive(Clone, Debug)]
pub struct MapResolver<O> {
    objects: HashMap<ObjectHandle, O>,
}

impl<O> Default for MapResolver<O> {
    fn default() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }
}

impl<O> MapResolver<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object, returning the one previously held by the handle
    pub fn insert(&mut self, handle: ObjectHandle, object: O) -> Option<O> {
        self.objects.insert(handle, object)
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<O> {
        self.objects.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<O: Clone> ObjectResolver for MapResolver<O> {
    type Object = O;

    fn resolve(&self, handle: ObjectHandle) -> Option<O> {
        self.objects.get(&handle).cloned()
    }
}
