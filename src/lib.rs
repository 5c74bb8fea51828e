// CubeX Core - host-agnostic utility core for CubeXPlatform
//
// This library provides the in-memory building blocks shared by the game
// tooling: a binary-heap priority queue and a tagged-union variant value.

pub mod collections;
pub mod types;

pub use collections::{HeapOrder, PriorityQueue, QueueError, QueueOptions};
pub use types::{ObjectHandle, ObjectResolver, Variant, VariantError, VariantKind};
