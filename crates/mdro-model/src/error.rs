use thiserror::Error;

/// Failure to read a domain value from text.
#[derive(Debug, Error)]
pub enum MdroError {
    #[error("invalid {field}: '{value}'")]
    InvalidValue { field: String, value: String },
}

impl MdroError {
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MdroError>;
