use thiserror::Error;

/// Error type for all cascade and ensemble operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CascadeError {
    /// A caller-supplied value violates a precondition.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CascadeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CascadeError::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CascadeError>;

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CascadeError::invalid(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}
