use ort::Error as OrtError;

/// Errors produced while building or running the sentiment classifier.
///
/// Script rejection and an unmapped prediction index are not errors; they
/// are ordinary [`Prediction`](super::Prediction) values.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Loading or running the tokenizer failed
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    /// Loading or running the ONNX model failed
    #[error("Model error: {0}")]
    Model(String),
    /// Classifier construction failed
    #[error("Build error: {0}")]
    Build(String),
    /// Invalid input parameters or configuration
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::Model(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = ClassifierError::Validation("threshold out of range".into());
        assert_eq!(err.to_string(), "Validation error: threshold out of range");

        let err = ClassifierError::Build("no model set".into());
        assert!(err.to_string().starts_with("Build error"));
    }
}
