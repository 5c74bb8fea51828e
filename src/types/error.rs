/// Variant error types

use super::variant::VariantKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VariantError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VariantError {
    #[error("Wrong kind: expected {expected}, got {actual}")]
    WrongKind {
        expected: VariantKind,
        actual: VariantKind,
    },

    #[error("Parse error: {input:?} does not match {expected}")]
    Parse { input: String, expected: String },

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl VariantError {
    pub(crate) fn parse(input: &str, expected: impl Into<String>) -> Self {
        let err = VariantError::Parse {
            input: input.to_string(),
            expected: expected.into(),
        };
        tracing::debug!("{}", err);
        err
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        let err = VariantError::Decode(message.into());
        tracing::debug!("{}", err);
        err
    }
}
