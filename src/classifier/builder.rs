use std::sync::Arc;

use log::{error, info};
use ort::session::Session;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use super::classifier::SentimentClassifier;
use super::encoding::SequenceEncoder;
use super::error::ClassifierError;
use super::labels::LabelMap;
use super::script::DEFAULT_SCRIPT_THRESHOLD;
use crate::runtime::{create_session_builder, RuntimeConfig};
use crate::{BuiltinModel, ModelManager};

/// Default fixed sequence length, matching the reference fine-tune.
pub const DEFAULT_MAX_LENGTH: usize = 128;

/// A builder for constructing a [`SentimentClassifier`] with a fluent interface.
///
/// The model and tokenizer are loaded exactly once, here; the finished
/// classifier is immutable. Startup failures (missing files, bad model
/// structure, head/label-map mismatch) surface as [`ClassifierError::Build`]
/// and are fatal by design.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    tokenizer_path: Option<String>,
    tokenizer: Option<Tokenizer>,
    session: Option<Session>,
    label_map: Option<LabelMap>,
    max_length: Option<usize>,
    script_threshold: Option<f32>,
    runtime_config: RuntimeConfig,
}

impl SequenceEncoder for ClassifierBuilder {
    fn tokenizer(&self) -> Option<&Tokenizer> {
        self.tokenizer.as_ref()
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn max_sequence_length(&self) -> Option<usize> {
        Some(self.max_length.unwrap_or(DEFAULT_MAX_LENGTH))
    }
}

impl ClassifierBuilder {
    /// Creates a new empty builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration for ONNX model execution
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the model using a built-in registry entry.
    ///
    /// The model must already be present in the local cache; download it
    /// first with [`ModelManager::download_model`].
    ///
    /// # Errors
    /// Fails if the paths are already set, the model is not downloaded, or
    /// the model or tokenizer fails to load or has the wrong structure.
    pub fn with_model(mut self, model: BuiltinModel) -> Result<Self, ClassifierError> {
        if self.model_path.is_some() || self.tokenizer_path.is_some() {
            return Err(ClassifierError::Build(
                "Model and tokenizer paths already set".to_string(),
            ));
        }

        let manager = ModelManager::new_default()
            .map_err(|e| ClassifierError::Build(format!("Failed to create model manager: {}", e)))?;

        let model_info = model.get_model_info();
        if !manager.is_model_downloaded(&model_info.name) {
            return Err(ClassifierError::Build(format!(
                "Model '{}' is not downloaded. Please download it first using ModelManager::download_model()",
                model_info.name
            )));
        }

        let model_path = manager.get_model_path(&model_info.name);
        let tokenizer_path = manager.get_tokenizer_path(&model_info.name);

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            error!("Failed to load tokenizer: {}", e);
            ClassifierError::Build(format!("Failed to load tokenizer: {}", e))
        })?;
        info!("Tokenizer loaded successfully");

        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)
            .map_err(|e| ClassifierError::Build(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e| ClassifierError::Build(e.to_string()))?;

        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        if self.max_length.is_none() {
            self.max_length = Some(model.characteristics().max_sequence_length);
        }

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.tokenizer_path = Some(tokenizer_path.to_string_lossy().to_string());
        self.tokenizer = Some(tokenizer);
        self.session = Some(session);
        Ok(self)
    }

    /// Sets a custom fine-tuned model and tokenizer from local paths.
    ///
    /// This is the route for a locally produced fine-tuned artifact: the
    /// ONNX export carries the classification-head weights, so no separate
    /// weights file is needed.
    ///
    /// # Errors
    /// Fails if the paths are empty or already set, the files don't exist,
    /// or the model or tokenizer fails to load or has the wrong structure.
    pub fn with_custom_model(
        mut self,
        model_path: &str,
        tokenizer_path: &str,
        max_sequence_length: Option<usize>,
    ) -> Result<Self, ClassifierError> {
        if model_path.is_empty() || tokenizer_path.is_empty() {
            return Err(ClassifierError::Build(
                "Model and tokenizer paths cannot be empty".to_string(),
            ));
        }
        if self.model_path.is_some() || self.tokenizer_path.is_some() {
            return Err(ClassifierError::Build(
                "Model and tokenizer paths already set".to_string(),
            ));
        }
        if !std::path::Path::new(model_path).exists() {
            return Err(ClassifierError::Build(format!(
                "Model file not found: {}",
                model_path
            )));
        }
        if !std::path::Path::new(tokenizer_path).exists() {
            return Err(ClassifierError::Build(format!(
                "Tokenizer file not found: {}",
                tokenizer_path
            )));
        }

        let tokenizer = Tokenizer::from_file(tokenizer_path).map_err(|e| {
            error!("Failed to load tokenizer: {}", e);
            ClassifierError::Build(format!("Failed to load tokenizer: {}", e))
        })?;
        info!("Tokenizer loaded successfully");

        let session = create_session_builder(&self.runtime_config)
            .map_err(|e| ClassifierError::Build(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| ClassifierError::Build(e.to_string()))?;

        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        if let Some(max_length) = max_sequence_length {
            if max_length == 0 {
                return Err(ClassifierError::Validation(
                    "Max sequence length must be greater than zero".into(),
                ));
            }
            self.max_length = Some(max_length);
        }

        self.model_path = Some(model_path.to_string());
        self.tokenizer_path = Some(tokenizer_path.to_string());
        self.tokenizer = Some(tokenizer);
        self.session = Some(session);
        Ok(self)
    }

    /// Sets the label-to-index map. Defaults to
    /// `{"negative": 0, "positive": 1}` when not supplied.
    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.label_map = Some(labels);
        self
    }

    /// Sets the fixed sequence length inputs are truncated/padded to.
    pub fn with_max_length(mut self, max_length: usize) -> Result<Self, ClassifierError> {
        if max_length == 0 {
            return Err(ClassifierError::Validation(
                "Max sequence length must be greater than zero".into(),
            ));
        }
        self.max_length = Some(max_length);
        Ok(self)
    }

    /// Sets the minimum Malayalam character ratio for accepting input.
    pub fn with_script_threshold(mut self, threshold: f32) -> Result<Self, ClassifierError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ClassifierError::Validation(format!(
                "Script threshold must be in (0, 1], got {}",
                threshold
            )));
        }
        self.script_threshold = Some(threshold);
        Ok(self)
    }

    /// Builds the final [`SentimentClassifier`].
    ///
    /// Runs a probe forward pass to verify that the model's classification
    /// head emits exactly one logit per configured label, which keeps the
    /// unknown-label branch unreachable in practice.
    pub fn build(mut self) -> Result<SentimentClassifier, ClassifierError> {
        if self.model_path.is_none() || self.tokenizer_path.is_none() {
            return Err(ClassifierError::Build(
                "Model and tokenizer paths must be set".to_string(),
            ));
        }

        let label_map = self.label_map.take().unwrap_or_default();
        let max_length = self.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        let script_threshold = self.script_threshold.unwrap_or(DEFAULT_SCRIPT_THRESHOLD);

        // Let the tokenizer own truncation and padding for the fixed window,
        // so the closing boundary token survives truncation of long input.
        let mut tokenizer = self
            .tokenizer
            .take()
            .ok_or_else(|| ClassifierError::Build("No tokenizer loaded".into()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| ClassifierError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(max_length),
            ..Default::default()
        }));
        self.tokenizer = Some(tokenizer);

        // Probe the classification head before committing to this label map
        let (ids, mask) = self.encode("സിനിമ")?;
        let logits = self.logits(&ids, &mask)?;
        if logits.len() != label_map.len() {
            return Err(ClassifierError::Build(format!(
                "Model head emits {} logits but label map has {} labels",
                logits.len(),
                label_map.len()
            )));
        }
        info!(
            "Classification head verified: {} logits for {} labels",
            logits.len(),
            label_map.len()
        );

        let tokenizer = Arc::new(
            self.tokenizer
                .take()
                .ok_or_else(|| ClassifierError::Build("No tokenizer loaded".into()))?,
        );
        let session = Arc::new(
            self.session
                .take()
                .ok_or_else(|| ClassifierError::Build("No ONNX model loaded".into()))?,
        );

        Ok(SentimentClassifier {
            model_path: self.model_path.take().unwrap(),
            tokenizer_path: self.tokenizer_path.take().unwrap(),
            tokenizer,
            session,
            label_map: Arc::new(label_map),
            max_length,
            script_threshold,
        })
    }

    /// Validates that the model has the expected input/output structure
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        let inputs = &session.inputs;
        if inputs.len() < 2 {
            return Err(ClassifierError::Model(format!(
                "Model must have at least 2 inputs (input_ids and attention_mask), found {}",
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ClassifierError::Model(
                "Model must have at least 1 output for logits".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_model_fails() {
        let result = ClassifierBuilder::new().build();
        assert!(matches!(result, Err(ClassifierError::Build(_))));
    }

    #[test]
    fn test_custom_model_missing_files() {
        let result = ClassifierBuilder::new().with_custom_model(
            "/nonexistent/model.onnx",
            "/nonexistent/tokenizer.json",
            None,
        );
        assert!(matches!(result, Err(ClassifierError::Build(_))));
    }

    #[test]
    fn test_custom_model_empty_paths() {
        let result = ClassifierBuilder::new().with_custom_model("", "", None);
        assert!(matches!(result, Err(ClassifierError::Build(_))));
    }

    #[test]
    fn test_script_threshold_range() {
        assert!(ClassifierBuilder::new().with_script_threshold(0.0).is_err());
        assert!(ClassifierBuilder::new().with_script_threshold(-0.5).is_err());
        assert!(ClassifierBuilder::new().with_script_threshold(1.5).is_err());
        assert!(ClassifierBuilder::new().with_script_threshold(0.6).is_ok());
        assert!(ClassifierBuilder::new().with_script_threshold(1.0).is_ok());
    }

    #[test]
    fn test_zero_max_length_rejected() {
        assert!(ClassifierBuilder::new().with_max_length(0).is_err());
        assert!(ClassifierBuilder::new().with_max_length(128).is_ok());
    }
}
