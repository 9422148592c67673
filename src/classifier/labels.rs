use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ClassifierError;

/// Mapping from sentiment label to classification-head output index.
///
/// Indices must be unique and contiguous starting at 0, since they size the
/// model's classification head. The map is validated on construction, so a
/// `LabelMap` in hand is always well formed.
///
/// # Example
/// ```
/// use nirupana::LabelMap;
///
/// let labels = LabelMap::default();
/// assert_eq!(labels.index_of("negative"), Some(0));
/// assert_eq!(labels.label_for(1), Some("positive"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, usize>", into = "HashMap<String, usize>")]
pub struct LabelMap {
    entries: HashMap<String, usize>,
}

impl LabelMap {
    /// Creates a label map, validating that indices are unique and
    /// contiguous from 0.
    pub fn new(entries: HashMap<String, usize>) -> Result<Self, ClassifierError> {
        if entries.is_empty() {
            return Err(ClassifierError::Validation(
                "Label map cannot be empty".into(),
            ));
        }
        let mut seen = vec![false; entries.len()];
        for (label, &index) in &entries {
            let slot = seen.get_mut(index).ok_or_else(|| {
                ClassifierError::Validation(format!(
                    "Label '{}' has index {} outside 0..{}",
                    label,
                    index,
                    entries.len()
                ))
            })?;
            if *slot {
                return Err(ClassifierError::Validation(format!(
                    "Duplicate index {} in label map",
                    index
                )));
            }
            *slot = true;
        }
        Ok(Self { entries })
    }

    /// Builds a label map from `(label, index)` pairs.
    pub fn from_pairs<L: Into<String>>(
        pairs: impl IntoIterator<Item = (L, usize)>,
    ) -> Result<Self, ClassifierError> {
        let mut entries = HashMap::new();
        for (label, index) in pairs {
            let label = label.into();
            if entries.insert(label.clone(), index).is_some() {
                return Err(ClassifierError::Validation(format!(
                    "Duplicate label '{}' in label map",
                    label
                )));
            }
        }
        Self::new(entries)
    }

    /// Number of labels, which is also the expected logit count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reverse lookup: the label assigned to a predicted index.
    pub fn label_for(&self, index: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, &i)| i == index)
            .map(|(label, _)| label.as_str())
    }

    /// The head index assigned to a label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.entries.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Iterates over labels in head-index order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        (0..self.len()).filter_map(|i| self.label_for(i))
    }
}

/// The reference deployment's two-class map: negative is 0, positive is 1.
impl Default for LabelMap {
    fn default() -> Self {
        Self::from_pairs([("negative", 0), ("positive", 1)])
            .expect("default label map is well formed")
    }
}

impl TryFrom<HashMap<String, usize>> for LabelMap {
    type Error = ClassifierError;

    fn try_from(entries: HashMap<String, usize>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<LabelMap> for HashMap<String, usize> {
    fn from(map: LabelMap) -> Self {
        map.entries
    }
}
