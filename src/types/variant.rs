use super::error::{Result, VariantError};
use super::resolver::ObjectResolver;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Tag identifying which payload a [`Variant`] holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    Integer,
    Float,
    Boolean,
    String,
    Vector2,
    Vector3,
    Color,
    Enum,
    ObjectReference,
    Null,
}

impl VariantKind {
    /// Every kind, in tag order
    pub const ALL: [VariantKind; 10] = [
        VariantKind::Integer,
        VariantKind::Float,
        VariantKind::Boolean,
        VariantKind::String,
        VariantKind::Vector2,
        VariantKind::Vector3,
        VariantKind::Color,
        VariantKind::Enum,
        VariantKind::ObjectReference,
        VariantKind::Null,
    ];

    /// Returns the case-sensitive name used by the text encoding
    pub fn name(&self) -> &'static str {
        match self {
            VariantKind::Integer => "Integer",
            VariantKind::Float => "Float",
            VariantKind::Boolean => "Boolean",
            VariantKind::String => "String",
            VariantKind::Vector2 => "Vector2",
            VariantKind::Vector3 => "Vector3",
            VariantKind::Color => "Color",
            VariantKind::Enum => "Enum",
            VariantKind::ObjectReference => "ObjectReference",
            VariantKind::Null => "Null",
        }
    }

    /// Exact-match lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Tag byte used by the binary encoding
    pub fn tag(&self) -> u8 {
        match self {
            VariantKind::Integer => 0,
            VariantKind::Float => 1,
            VariantKind::Boolean => 2,
            VariantKind::String => 3,
            VariantKind::Vector2 => 4,
            VariantKind::Vector3 => 5,
            VariantKind::Color => 6,
            VariantKind::Enum => 7,
            VariantKind::ObjectReference => 8,
            VariantKind::Null => 9,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, VariantKind::Integer | VariantKind::Float)
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// RGBA color with linear float channels
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Enum member captured by its type name and underlying integer value
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    pub type_name: String,
    pub value: i64,
}

impl PartialOrd for EnumValue {
    /// Members of different enum types are unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.type_name != other.type_name {
            return None;
        }
        Some(self.value.cmp(&other.value))
    }
}

/// Opaque handle to a host-side object.
///
/// The handle carries no meaning by itself; an [`ObjectResolver`] maps it
/// back to whatever the host uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(pub u64);

/// Tagged union holding exactly one value of a fixed set of kinds.
///
/// Equality holds only between variants of the same kind, so
/// `Integer(1) != Float(1.0)`; use [`Variant::numeric_equals`] for a
/// cross-kind numeric comparison. Ordering is likewise partial: comparing
/// two different kinds yields `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Vector2(Vector2),
    Vector3(Vector3),
    Color(Color),
    Enum(EnumValue),
    ObjectReference(ObjectHandle),
    #[default]
    Null,
}

impl Variant {
    pub fn from_integer(value: i64) -> Self {
        Variant::Integer(value)
    }

    pub fn from_float(value: f64) -> Self {
        Variant::Float(value)
    }

    pub fn from_boolean(value: bool) -> Self {
        Variant::Boolean(value)
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Variant::String(value.into())
    }

    pub fn from_vector2(x: f32, y: f32) -> Self {
        Variant::Vector2(Vector2 { x, y })
    }

    pub fn from_vector3(x: f32, y: f32, z: f32) -> Self {
        Variant::Vector3(Vector3 { x, y, z })
    }

    pub fn from_color(r: f32, g: f32, b: f32, a: f32) -> Self {
        Variant::Color(Color { r, g, b, a })
    }

    pub fn from_enum(type_name: impl Into<String>, value: i64) -> Self {
        Variant::Enum(EnumValue {
            type_name: type_name.into(),
            value,
        })
    }

    pub fn from_object(handle: ObjectHandle) -> Self {
        Variant::ObjectReference(handle)
    }

    pub fn null() -> Self {
        Variant::Null
    }

    /// Returns the active kind tag
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Integer(_) => VariantKind::Integer,
            Variant::Float(_) => VariantKind::Float,
            Variant::Boolean(_) => VariantKind::Boolean,
            Variant::String(_) => VariantKind::String,
            Variant::Vector2(_) => VariantKind::Vector2,
            Variant::Vector3(_) => VariantKind::Vector3,
            Variant::Color(_) => VariantKind::Color,
            Variant::Enum(_) => VariantKind::Enum,
            Variant::ObjectReference(_) => VariantKind::ObjectReference,
            Variant::Null => VariantKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    /// Replaces the held value, returning the previous one
    pub fn set(&mut self, value: Variant) -> Variant {
        std::mem::replace(self, value)
    }

    fn wrong_kind(&self, expected: VariantKind) -> VariantError {
        VariantError::WrongKind {
            expected,
            actual: self.kind(),
        }
    }

    // ====== Strict accessors ======

    pub fn as_integer(&self) -> Result<i64> {
        self.try_as_integer().ok_or_else(|| self.wrong_kind(VariantKind::Integer))
    }

    pub fn as_float(&self) -> Result<f64> {
        self.try_as_float().ok_or_else(|| self.wrong_kind(VariantKind::Float))
    }

    pub fn as_boolean(&self) -> Result<bool> {
        self.try_as_boolean().ok_or_else(|| self.wrong_kind(VariantKind::Boolean))
    }

    pub fn as_str(&self) -> Result<&str> {
        self.try_as_str().ok_or_else(|| self.wrong_kind(VariantKind::String))
    }

    pub fn as_vector2(&self) -> Result<Vector2> {
        self.try_as_vector2().ok_or_else(|| self.wrong_kind(VariantKind::Vector2))
    }

    pub fn as_vector3(&self) -> Result<Vector3> {
        self.try_as_vector3().ok_or_else(|| self.wrong_kind(VariantKind::Vector3))
    }

    pub fn as_color(&self) -> Result<Color> {
        self.try_as_color().ok_or_else(|| self.wrong_kind(VariantKind::Color))
    }

    pub fn as_enum(&self) -> Result<&EnumValue> {
        self.try_as_enum().ok_or_else(|| self.wrong_kind(VariantKind::Enum))
    }

    pub fn as_object(&self) -> Result<ObjectHandle> {
        self.try_as_object().ok_or_else(|| self.wrong_kind(VariantKind::ObjectReference))
    }

    // ====== Non-failing accessors ======

    pub fn try_as_integer(&self) -> Option<i64> {
        match self {
            Variant::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_as_float(&self) -> Option<f64> {
        match self {
            Variant::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_as_boolean(&self) -> Option<bool> {
        match self {
            Variant::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_as_str(&self) -> Option<&str> {
        match self {
            Variant::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn try_as_vector2(&self) -> Option<Vector2> {
        match self {
            Variant::Vector2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_as_vector3(&self) -> Option<Vector3> {
        match self {
            Variant::Vector3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_as_color(&self) -> Option<Color> {
        match self {
            Variant::Color(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_as_enum(&self) -> Option<&EnumValue> {
        match self {
            Variant::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn try_as_object(&self) -> Option<ObjectHandle> {
        match self {
            Variant::ObjectReference(h) => Some(*h),
            _ => None,
        }
    }

    /// Compares Integer and Float values by numeric value.
    ///
    /// Fails with [`VariantError::WrongKind`] if either side is not numeric.
    pub fn numeric_equals(&self, other: &Variant) -> Result<bool> {
        match (self, other) {
            (Variant::Integer(a), Variant::Integer(b)) => Ok(a == b),
            (Variant::Float(a), Variant::Float(b)) => Ok(a == b),
            (Variant::Integer(i), Variant::Float(f)) | (Variant::Float(f), Variant::Integer(i)) => {
                Ok(integer_equals_float(*i, *f))
            }
            (lhs, rhs) if lhs.kind().is_numeric() => Err(rhs.wrong_kind(lhs.kind())),
            (lhs, _) => Err(lhs.wrong_kind(VariantKind::Integer)),
        }
    }

    /// Hands an object reference to the host resolver
    pub fn resolve<R: ObjectResolver>(&self, resolver: &R) -> Result<Option<R::Object>> {
        let handle = self.as_object()?;
        Ok(resolver.resolve(handle))
    }
}

/// Exact comparison without rounding large integers through f64
fn integer_equals_float(i: i64, f: f64) -> bool {
    // 2^63 is exactly representable; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Variant::Integer(a), Variant::Integer(b)) => a.partial_cmp(b),
            (Variant::Float(a), Variant::Float(b)) => a.partial_cmp(b),
            (Variant::Boolean(a), Variant::Boolean(b)) => a.partial_cmp(b),
            (Variant::String(a), Variant::String(b)) => a.partial_cmp(b),
            (Variant::Vector2(a), Variant::Vector2(b)) => a.partial_cmp(b),
            (Variant::Vector3(a), Variant::Vector3(b)) => a.partial_cmp(b),
            (Variant::Color(a), Variant::Color(b)) => a.partial_cmp(b),
            (Variant::Enum(a), Variant::Enum(b)) => a.partial_cmp(b),
            (Variant::ObjectReference(a), Variant::ObjectReference(b)) => a.partial_cmp(b),
            (Variant::Null, Variant::Null) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Variant::Integer(value)
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Variant::Integer(value.into())
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Float(value)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Boolean(value)
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl From<Vector2> for Variant {
    fn from(value: Vector2) -> Self {
        Variant::Vector2(value)
    }
}

impl From<Vector3> for Variant {
    fn from(value: Vector3) -> Self {
        Variant::Vector3(value)
    }
}

impl From<Color> for Variant {
    fn from(value: Color) -> Self {
        Variant::Color(value)
    }
}

impl From<EnumValue> for Variant {
    fn from(value: EnumValue) -> Self {
        Variant::Enum(value)
    }
}

impl From<ObjectHandle> for Variant {
    fn from(value: ObjectHandle) -> Self {
        Variant::ObjectReference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MapResolver;

    #[test]
    fn test_kind_integrity() {
        let value = Variant::from_integer(42);

        assert_eq!(value.kind(), VariantKind::Integer);
        assert_eq!(value.as_integer(), Ok(42));
        assert_eq!(
            value.as_float(),
            Err(VariantError::WrongKind {
                expected: VariantKind::Float,
                actual: VariantKind::Integer,
            })
        );
        assert_eq!(value.try_as_float(), None);
        assert_eq!(value.try_as_integer(), Some(42));
    }

    #[test]
    fn test_every_kind_reports_its_tag() {
        let samples = [
            Variant::from_integer(1),
            Variant::from_float(1.5),
            Variant::from_boolean(false),
            Variant::from_string("s"),
            Variant::from_vector2(1.0, 2.0),
            Variant::from_vector3(1.0, 2.0, 3.0),
            Variant::from_color(0.1, 0.2, 0.3, 1.0),
            Variant::from_enum("Direction", 2),
            Variant::from_object(ObjectHandle(7)),
            Variant::null(),
        ];

        for (sample, kind) in samples.iter().zip(VariantKind::ALL) {
            assert_eq!(sample.kind(), kind);
            assert_eq!(VariantKind::from_name(kind.name()), Some(kind));
            assert_eq!(VariantKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(VariantKind::from_name("integer"), None);
        assert_eq!(VariantKind::from_tag(10), None);
    }

    #[test]
    fn test_cross_kind_equality() {
        let int = Variant::from_integer(1);
        let float = Variant::from_float(1.0);

        assert_ne!(int, float);
        assert_eq!(int.numeric_equals(&float), Ok(true));
        assert_eq!(float.numeric_equals(&int), Ok(true));
        assert_eq!(int.numeric_equals(&Variant::from_float(1.5)), Ok(false));
        assert_eq!(int.partial_cmp(&float), None);
    }

    #[test]
    fn test_numeric_equals_is_exact() {
        // i64::MAX rounds up to 2^63 as f64; the two must not compare equal
        let max = Variant::from_integer(i64::MAX);
        assert_eq!(max.numeric_equals(&Variant::from_float(i64::MAX as f64)), Ok(false));

        let big = Variant::from_integer(1 << 53);
        assert_eq!(big.numeric_equals(&Variant::from_float((1u64 << 53) as f64)), Ok(true));
        assert_eq!(big.numeric_equals(&Variant::from_float(f64::NAN)), Ok(false));
    }

    #[test]
    fn test_numeric_equals_rejects_non_numeric() {
        let int = Variant::from_integer(1);
        let text = Variant::from_string("1");

        assert_eq!(
            int.numeric_equals(&text),
            Err(VariantError::WrongKind {
                expected: VariantKind::Integer,
                actual: VariantKind::String,
            })
        );
        assert!(matches!(
            text.numeric_equals(&int),
            Err(VariantError::WrongKind { actual: VariantKind::String, .. })
        ));
    }

    #[test]
    fn test_ordering_within_kind() {
        assert!(Variant::from_integer(1) < Variant::from_integer(2));
        assert!(Variant::from_string("a") < Variant::from_string("b"));
        assert!(Variant::from_vector2(1.0, 5.0) < Variant::from_vector2(2.0, 0.0));
        assert!(Variant::from_enum("Dir", 1) < Variant::from_enum("Dir", 3));
        assert_eq!(
            Variant::from_enum("Dir", 1).partial_cmp(&Variant::from_enum("Axis", 3)),
            None
        );
        assert_eq!(Variant::null().partial_cmp(&Variant::null()), Some(Ordering::Equal));
        assert_eq!(Variant::null().partial_cmp(&Variant::from_boolean(true)), None);
    }

    #[test]
    fn test_null_checks() {
        assert!(Variant::null().is_null());
        assert!(Variant::default().is_null());
        assert!(!Variant::from_integer(0).is_null());
        assert!(!Variant::from_string("").is_null());
    }

    #[test]
    fn test_set_discards_previous_payload() {
        let mut value = Variant::from_string("old");
        let previous = value.set(Variant::from_boolean(true));

        assert_eq!(previous, Variant::from_string("old"));
        assert_eq!(value.kind(), VariantKind::Boolean);
        assert!(value.try_as_str().is_none());
    }

    #[test]
    fn test_resolve_object_reference() {
        let mut resolver = MapResolver::new();
        resolver.insert(ObjectHandle(3), "Player");

        let reference = Variant::from_object(ObjectHandle(3));
        assert_eq!(reference.resolve(&resolver), Ok(Some("Player")));
        assert_eq!(Variant::from_object(ObjectHandle(4)).resolve(&resolver), Ok(None));
        assert!(matches!(
            Variant::from_integer(3).resolve(&resolver),
            Err(VariantError::WrongKind { expected: VariantKind::ObjectReference, .. })
        ));
    }
}
