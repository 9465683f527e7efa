//! The internal compiler error type.

/// An internal compiler error: an invariant the pipeline relies on was
/// violated.
#[derive(Debug, thiserror::Error)]
#[error("internal compiler error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("layer bucket missing");
        assert_eq!(
            format!("{err}"),
            "internal compiler error: layer bucket missing"
        );
    }
}
