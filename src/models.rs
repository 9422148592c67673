//! Registry of built-in models the crate knows how to fetch and run.
//!
//! Registry entries point at ONNX artifacts, not at the original PyTorch
//! weights: the runtime here is ONNX Runtime, so a fine-tune enters the
//! registry only after it has been exported (see the "Model artifacts"
//! section of the README for the export and hash-recording steps). A
//! fine-tune that only exists as a local export is loaded with
//! `ClassifierBuilder::with_custom_model` instead.

/// Download locations and integrity hashes for a model's artifacts.
///
/// The hashes are recorded with `sha256sum` against the exact files that
/// were uploaded, at export time; `ModelManager` refuses artifacts that do
/// not match them. Adding an entry therefore means exporting the model,
/// uploading the export, and recording its hashes here in the same change.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Directory name under the models cache
    pub name: String,
    /// URL of the sequence-classification ONNX export
    pub model_url: String,
    /// URL of the matching tokenizer.json
    pub tokenizer_url: String,
    /// SHA-256 of the model file
    pub model_hash: String,
    /// SHA-256 of the tokenizer file
    pub tokenizer_hash: String,
}

/// Characteristics of a model including its capabilities and requirements
#[derive(Debug, Clone)]
pub struct ModelCharacteristics {
    /// Number of logits the classification head emits
    pub num_labels: usize,
    /// Fixed sequence length the fine-tune was trained with
    pub max_sequence_length: usize,
    /// Approximate size of the model on disk
    pub model_size_mb: usize,
}

/// Represents the available built-in models in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// IndicBERT fine-tuned for Malayalam movie-review sentiment
    ///
    /// The ONNX export of the `sathyavgc/indic-bert-sentiment-malayalam`
    /// fine-tune (the source repository hosts the PyTorch `.pth` weights;
    /// the export lives alongside them — see the README for how it was
    /// produced and its hashes recorded).
    ///
    /// Characteristics:
    /// - Labels: 2 (negative, positive)
    /// - Max sequence length: 128
    /// - Size: ~130MB
    IndicBertMalayalam,
}

impl BuiltinModel {
    /// Get the characteristics of the model
    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            Self::IndicBertMalayalam => ModelCharacteristics {
                num_labels: 2,
                max_sequence_length: 128,
                model_size_mb: 130,
            },
        }
    }

    /// Get the download locations and hashes for the model's artifacts
    pub fn get_model_info(&self) -> ModelInfo {
        match self {
            Self::IndicBertMalayalam => ModelInfo {
                name: "indic-bert-sentiment-malayalam".to_string(),
                model_url: "https://huggingface.co/sathyavgc/indic-bert-sentiment-malayalam/resolve/main/model.onnx".to_string(),
                tokenizer_url: "https://huggingface.co/sathyavgc/indic-bert-sentiment-malayalam/resolve/main/tokenizer.json".to_string(),
                model_hash: "8c5a1f0d6e9b4a27c3518f2de07a96b1c44d8e3f5a60b79215ce4d8f0a3b6e12".to_string(),
                tokenizer_hash: "3f9e2b7c815d40a6fe9283c1b05746dd28a1f6c90be354172ad80c6e95f1d4b7".to_string(),
            },
        }
    }
}
