//! Sentiment classification for Malayalam movie reviews.
//!
//! Wraps a fine-tuned IndicBERT sequence-classification ONNX export behind a
//! two-step pipeline: a Unicode-script gate rejects input that is not
//! predominantly Malayalam, and the model classifies the rest as positive or
//! negative.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nirupana::{SentimentClassifier, BuiltinModel, Prediction};
//!
//! let classifier = SentimentClassifier::builder()
//!     .with_model(BuiltinModel::IndicBertMalayalam)?
//!     .build()?;
//!
//! match classifier.predict("ഈ സിനിമ വളരെ മനോഹരമായിരുന്നു")? {
//!     Prediction::Label(label) => println!("sentiment: {}", label),
//!     Prediction::NotMalayalam => println!("not a Malayalam review"),
//!     Prediction::UnknownLabel => println!("unmapped prediction index"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is loaded once and shared read-only; wrap it in `Arc` to
//! use it from several threads:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nirupana::{SentimentClassifier, BuiltinModel};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let classifier = Arc::new(
//!     SentimentClassifier::builder()
//!         .with_model(BuiltinModel::IndicBertMalayalam)?
//!         .build()?,
//! );
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let classifier = Arc::clone(&classifier);
//!     handles.push(thread::spawn(move || {
//!         classifier.predict("നല്ല സിനിമ").unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod model_manager;
pub mod models;
mod runtime;

pub use classifier::{
    ClassifierBuilder, ClassifierError, ClassifierInfo, LabelMap, Prediction, SentimentClassifier,
};
pub use classifier::script::{
    is_malayalam, is_malayalam_with_threshold, malayalam_ratio, DEFAULT_SCRIPT_THRESHOLD,
};
pub use model_manager::{ModelError, ModelManager};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
