pub mod binary;
pub mod error;
pub mod resolver;
pub mod text;
pub mod variant;

pub use error::{Result, VariantError};
pub use resolver::{MapResolver, ObjectResolver};
pub use variant::{Color, EnumValue, ObjectHandle, Variant, VariantKind, Vector2, Vector3};
