use std::sync::Arc;

use log::debug;
use ort::session::Session;
use tokenizers::Tokenizer;

use super::encoding::SequenceEncoder;
use super::error::ClassifierError;
use super::labels::LabelMap;
use super::script;
use super::utils::{argmax, softmax};

/// Outcome of a classification call.
///
/// Script rejection and an unmapped prediction index are modeled as variants
/// rather than as magic label strings, so callers branch on the type instead
/// of comparing sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    /// A sentiment label drawn from the configured [`LabelMap`]
    Label(String),
    /// Input was not predominantly Malayalam; no inference was performed
    NotMalayalam,
    /// The predicted index had no entry in the label map. The builder
    /// validates head size against the label map, so this is a defensive
    /// branch only.
    UnknownLabel,
}

impl Prediction {
    /// True if this is a real sentiment label rather than a rejection.
    pub fn is_label(&self) -> bool {
        matches!(self, Prediction::Label(_))
    }

    /// The label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Prediction::Label(label) => Some(label),
            _ => None,
        }
    }
}

/// A sentiment classifier for Malayalam movie reviews.
///
/// Wraps a fine-tuned sequence-classification ONNX export and its tokenizer,
/// gated by a Malayalam-script pre-filter. Loaded once at startup and shared
/// read-only for the life of the process.
///
/// # Thread Safety
///
/// This type is `Send + Sync`: the tokenizer, session, and label map are
/// behind `Arc`, and ONNX Runtime inference sessions may be shared across
/// threads. Clone the `Arc` per worker rather than rebuilding.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use nirupana::{SentimentClassifier, BuiltinModel, Prediction};
///
/// let classifier = SentimentClassifier::builder()
///     .with_model(BuiltinModel::IndicBertMalayalam)?
///     .build()?;
///
/// match classifier.predict("ഈ സിനിമ വളരെ മനോഹരമായിരുന്നു")? {
///     Prediction::Label(label) => println!("sentiment: {}", label),
///     Prediction::NotMalayalam => println!("please write the review in Malayalam"),
///     Prediction::UnknownLabel => println!("model head does not match label map"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SentimentClassifier {
    pub model_path: String,
    pub tokenizer_path: String,
    pub(crate) tokenizer: Arc<Tokenizer>,
    pub(crate) session: Arc<Session>,
    pub(crate) label_map: Arc<LabelMap>,
    pub(crate) max_length: usize,
    pub(crate) script_threshold: f32,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<SentimentClassifier>();
    }
};

impl SequenceEncoder for SentimentClassifier {
    fn tokenizer(&self) -> Option<&Tokenizer> {
        Some(&self.tokenizer)
    }

    fn session(&self) -> Option<&Session> {
        Some(&self.session)
    }

    fn max_sequence_length(&self) -> Option<usize> {
        Some(self.max_length)
    }
}

impl SentimentClassifier {
    /// Creates a new builder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current configuration
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            tokenizer_path: self.tokenizer_path.clone(),
            num_labels: self.label_map.len(),
            labels: self.label_map.labels().map(str::to_owned).collect(),
            max_sequence_length: self.max_length,
            script_threshold: self.script_threshold,
        }
    }

    /// The configured label map.
    pub fn label_map(&self) -> &LabelMap {
        &self.label_map
    }

    /// Classifies the sentiment of a Malayalam review.
    ///
    /// Input that is empty, whitespace-only, or below the script-ratio
    /// threshold returns [`Prediction::NotMalayalam`] without touching the
    /// model. Oversized input is silently truncated to the configured
    /// maximum sequence length.
    ///
    /// Inference is deterministic: the same loaded model and input text
    /// always produce the same label.
    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        self.predict_with_scores(text).map(|(prediction, _)| prediction)
    }

    /// Like [`predict`](Self::predict), but also returns per-label scores in
    /// head-index order: softmax probabilities over the model's logits. The
    /// score vector is empty when input is rejected by the script gate.
    ///
    /// The label is still selected by argmax over the raw logits; softmax is
    /// monotonic, so both orderings agree.
    pub fn predict_with_scores(
        &self,
        text: &str,
    ) -> Result<(Prediction, Vec<f32>), ClassifierError> {
        if !script::is_malayalam_with_threshold(text, self.script_threshold) {
            debug!(
                "Rejecting input below script threshold {} (ratio {:.2})",
                self.script_threshold,
                script::malayalam_ratio(text)
            );
            return Ok((Prediction::NotMalayalam, Vec::new()));
        }

        let (ids, mask) = self.encode(text.trim())?;
        let logits = self.logits(&ids, &mask)?;

        let predicted_index = argmax(&logits)
            .ok_or_else(|| ClassifierError::Model("Model returned no logits".into()))?;

        let prediction = match self.label_map.label_for(predicted_index) {
            Some(label) => Prediction::Label(label.to_owned()),
            None => Prediction::UnknownLabel,
        };
        Ok((prediction, softmax(&logits)))
    }

    /// Counts tokens the model would see for `text`, after truncation.
    pub fn count_tokens(&self, text: &str) -> Result<usize, ClassifierError> {
        SequenceEncoder::count_tokens(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_accessors() {
        let positive = Prediction::Label("positive".to_string());
        assert!(positive.is_label());
        assert_eq!(positive.label(), Some("positive"));

        assert!(!Prediction::NotMalayalam.is_label());
        assert_eq!(Prediction::NotMalayalam.label(), None);
        assert!(!Prediction::UnknownLabel.is_label());
        assert_eq!(Prediction::UnknownLabel.label(), None);
    }

    #[test]
    fn test_prediction_equality() {
        assert_eq!(
            Prediction::Label("negative".into()),
            Prediction::Label("negative".into())
        );
        assert_ne!(Prediction::Label("negative".into()), Prediction::NotMalayalam);
        assert_ne!(Prediction::NotMalayalam, Prediction::UnknownLabel);
    }
}
