/// Canonical text encoding: `<KindName>:<payload>`

use super::error::{Result, VariantError};
use super::variant::{Color, ObjectHandle, Variant, VariantKind, Vector2, Vector3};
use std::fmt;
use std::str::FromStr;

impl Variant {
    /// Renders the canonical `<KindName>:<payload>` form
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Parses the canonical form produced by [`Variant::to_text`]
    pub fn from_text(text: &str) -> Result<Variant> {
        let Some((name, payload)) = text.split_once(':') else {
            return Err(VariantError::parse(text, "<KindName>:<payload>"));
        };
        let Some(kind) = VariantKind::from_name(name) else {
            return Err(VariantError::parse(text, "a known kind name"));
        };

        match kind {
            VariantKind::Integer => reject_plus_sign(payload)
                .and_then(|p| p.parse::<i64>().ok())
                .map(Variant::Integer)
                .ok_or_else(|| VariantError::parse(text, "decimal integer")),
            VariantKind::Float => parse_float::<f64>(payload)
                .map(Variant::Float)
                .ok_or_else(|| VariantError::parse(text, "decimal float")),
            VariantKind::Boolean => payload
                .parse()
                .map(Variant::Boolean)
                .map_err(|_| VariantError::parse(text, "true or false")),
            VariantKind::String => Ok(Variant::String(payload.to_string())),
            VariantKind::Vector2 => parse_components::<2>(payload)
                .map(|[x, y]| Variant::Vector2(Vector2 { x, y }))
                .ok_or_else(|| VariantError::parse(text, "(x,y)")),
            VariantKind::Vector3 => parse_components::<3>(payload)
                .map(|[x, y, z]| Variant::Vector3(Vector3 { x, y, z }))
                .ok_or_else(|| VariantError::parse(text, "(x,y,z)")),
            VariantKind::Color => parse_components::<4>(payload)
                .map(|[r, g, b, a]| Variant::Color(Color { r, g, b, a }))
                .ok_or_else(|| VariantError::parse(text, "(r,g,b,a)")),
            VariantKind::Enum => parse_enum(payload)
                .ok_or_else(|| VariantError::parse(text, "<TypeName>=<integer>")),
            VariantKind::ObjectReference => reject_plus_sign(payload)
                .and_then(|p| p.parse::<u64>().ok())
                .map(|id| Variant::ObjectReference(ObjectHandle(id)))
                .ok_or_else(|| VariantError::parse(text, "unsigned object handle")),
            VariantKind::Null if payload.is_empty() => Ok(Variant::Null),
            VariantKind::Null => Err(VariantError::parse(text, "empty payload")),
        }
    }
}

/// Parses `(c1,c2,...)` with exactly `N` float components
fn parse_components<const N: usize>(payload: &str) -> Option<[f32; N]> {
    let inner = payload.strip_prefix('(')?.strip_suffix(')')?;
    let mut components = [0.0f32; N];
    let mut parts = inner.split(',');
    for slot in components.iter_mut() {
        *slot = parse_float(parts.next()?.trim())?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(components)
}

/// Rejects an explicit `+` sign, which the rendering never produces
fn reject_plus_sign(payload: &str) -> Option<&str> {
    if payload.starts_with('+') {
        return None;
    }
    Some(payload)
}

/// Decimal float, or exactly one of the `inf`, `-inf`, `NaN` renderings
fn parse_float<F: FromStr>(payload: &str) -> Option<F> {
    let payload = reject_plus_sign(payload)?;
    let non_finite = matches!(payload, "inf" | "-inf" | "NaN");
    let has_letters = payload
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E');
    if has_letters && !non_finite {
        return None;
    }
    payload.parse().ok()
}

/// The type name may be empty; the value is everything after the last `=`
fn parse_enum(payload: &str) -> Option<Variant> {
    let (type_name, value) = payload.rsplit_once('=')?;
    let value = reject_plus_sign(value)?.parse::<i64>().ok()?;
    Some(Variant::from_enum(type_name, value))
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.kind())?;
        match self {
            Variant::Integer(v) => write!(f, "{}", v),
            Variant::Float(v) => write!(f, "{}", v),
            Variant::Boolean(v) => write!(f, "{}", v),
            Variant::String(v) => write!(f, "{}", v),
            Variant::Vector2(v) => write!(f, "({},{})", v.x, v.y),
            Variant::Vector3(v) => write!(f, "({},{},{})", v.x, v.y, v.z),
            Variant::Color(c) => write!(f, "({},{},{},{})", c.r, c.g, c.b, c.a),
            Variant::Enum(e) => write!(f, "{}={}", e.type_name, e.value),
            Variant::ObjectReference(h) => write!(f, "{}", h.0),
            Variant::Null => Ok(()),
        }
    }
}

impl FromStr for Variant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self> {
        Variant::from_text(s)
    }
}
