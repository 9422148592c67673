use std::collections::HashMap;

use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use super::error::ClassifierError;

/// Tokenize/forward-pass plumbing shared by the builder and the classifier.
///
/// The ONNX model is expected to be a sequence-classification export:
/// - inputs: `input_ids` and `attention_mask`, shape [batch_size, sequence_length]
/// - output: logits, shape [batch_size, num_labels]
///
/// Encoding adds the tokenizer's special boundary tokens, truncates to the
/// fixed maximum sequence length, and right-pads up to it, so every forward
/// pass sees id and mask sequences of identical fixed length.
pub(crate) trait SequenceEncoder {
    /// Returns the initialized tokenizer if available
    fn tokenizer(&self) -> Option<&Tokenizer>;

    /// Returns the initialized ONNX session if available
    fn session(&self) -> Option<&Session>;

    /// Returns the fixed sequence length inputs are truncated/padded to
    fn max_sequence_length(&self) -> Option<usize>;

    /// Counts the non-padding tokens the model would see for `text`,
    /// without running the model.
    fn count_tokens(&self, text: &str) -> Result<usize, ClassifierError> {
        let tokenizer = self
            .tokenizer()
            .ok_or_else(|| ClassifierError::Tokenizer("Tokenizer not initialized".into()))?;

        tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Tokenizer(e.to_string()))
            .map(|encoding| {
                encoding
                    .get_attention_mask()
                    .iter()
                    .map(|&m| m as usize)
                    .sum()
            })
    }

    /// Encodes `text` into fixed-length token ids and attention mask.
    ///
    /// Oversized input is silently truncated; short input is right-padded
    /// with the zero id and a zero mask. Never fails on input length.
    /// Truncation and padding are performed by the tokenizer itself (the
    /// builder configures them for the fixed window), so the closing
    /// boundary token survives truncation; the clamp below only enforces
    /// the fixed-length invariant the forward pass relies on.
    fn encode(&self, text: &str) -> Result<(Vec<i64>, Vec<i64>), ClassifierError> {
        let tokenizer = self
            .tokenizer()
            .ok_or_else(|| ClassifierError::Tokenizer("Tokenizer not initialized".into()))?;
        let max_length = self
            .max_sequence_length()
            .ok_or_else(|| ClassifierError::Tokenizer("Max sequence length not set".into()))?;

        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Tokenizer(e.to_string()))?;

        let mut ids: Vec<i64> = encoding
            .get_ids()
            .iter()
            .take(max_length)
            .map(|&id| id as i64)
            .collect();
        let mut mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .take(max_length)
            .map(|&m| m as i64)
            .collect();

        ids.resize(max_length, 0);
        mask.resize(max_length, 0);

        Ok((ids, mask))
    }

    /// Runs one forward pass and extracts the logit row for the single input.
    fn logits(&self, ids: &[i64], mask: &[i64]) -> Result<Vec<f32>, ClassifierError> {
        let session = self
            .session()
            .ok_or_else(|| ClassifierError::Model("Session not initialized".into()))?;

        let input_array = Array2::from_shape_vec((1, ids.len()), ids.to_vec())
            .map_err(|e| ClassifierError::Model(format!("Failed to create input array: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let input_ids = input_dyn.as_standard_layout();

        let mask_array = Array2::from_shape_vec((1, mask.len()), mask.to_vec())
            .map_err(|e| ClassifierError::Model(format!("Failed to create mask array: {}", e)))?;
        let mask_dyn = mask_array.into_dyn();
        let attention_mask = mask_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            "input_ids",
            Tensor::from_array(&input_ids)
                .map_err(|e| ClassifierError::Model(format!("Failed to create input tensor: {}", e)))?,
        );
        input_tensors.insert(
            "attention_mask",
            Tensor::from_array(&attention_mask)
                .map_err(|e| ClassifierError::Model(format!("Failed to create mask tensor: {}", e)))?,
        );

        let outputs = session
            .run(input_tensors)
            .map_err(|e| ClassifierError::Model(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Model(format!("Failed to extract logits: {}", e)))?;

        if output_tensor.ndim() != 2 {
            return Err(ClassifierError::Model(format!(
                "Expected logits of shape [1, num_labels], got {} dimensions",
                output_tensor.ndim()
            )));
        }

        Ok(output_tensor
            .slice(ndarray::s![0, ..])
            .iter()
            .cloned()
            .collect())
    }
}
