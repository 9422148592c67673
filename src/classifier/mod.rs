pub mod builder;
mod classifier;
mod encoding;
mod error;
mod labels;
pub mod script;
mod utils;

pub use builder::ClassifierBuilder;
pub use classifier::{Prediction, SentimentClassifier};
pub use error::ClassifierError;
pub use labels::LabelMap;

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Path to the tokenizer file
    pub tokenizer_path: String,
    /// Number of labels in the classification head
    pub num_labels: usize,
    /// Labels in head-index order
    pub labels: Vec<String>,
    /// Fixed sequence length inputs are truncated/padded to
    pub max_sequence_length: usize,
    /// Minimum Malayalam character ratio for accepting input
    pub script_threshold: f32,
}
