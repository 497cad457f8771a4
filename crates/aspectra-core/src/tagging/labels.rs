//! # Label Dictionary
//!
//! Maps the extraction model's output ids to label strings. The dictionary
//! file holds one label per line; the id of a label is its position among
//! the non-blank lines.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use candle_core::{D, Tensor};
use tracing::debug;

use crate::error::{AspectraError, Result};

/// Bidirectional label <-> id dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<String>,
    ids: HashMap<String, usize>,
}

impl LabelMap {
    /// Build a dictionary from labels in id order.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(AspectraError::EmptyLabelMap);
        }

        let ids = labels
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();

        Ok(Self { labels, ids })
    }

    /// Load a dictionary file with one label per line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let map = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.as_ref().display(), num_labels = map.len(), "label dict loaded");
        Ok(map)
    }

    /// Read a dictionary from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let label = line.trim();
            if label.is_empty() {
                continue;
            }
            labels.push(label.to_string());
        }
        Self::new(labels)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// A dictionary is never empty once built.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for an id.
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Id for a label.
    pub fn id(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    /// All labels in id order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Translate model output ids into labels.
    pub fn decode_ids(&self, ids: &[usize]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| {
                self.label(id)
                    .map(str::to_string)
                    .ok_or(AspectraError::UnknownLabelId {
                        id,
                        num_labels: self.len(),
                    })
            })
            .collect()
    }

    /// Take the argmax over the label dimension of a logits tensor and
    /// translate it into labels.
    ///
    /// Accepts `[seq_len, num_labels]` or `[1, seq_len, num_labels]`. With
    /// `strip_special`, the first and last positions (the `[CLS]` and `[SEP]`
    /// tokens added by the tokenizer) are dropped.
    pub fn decode_logits(&self, logits: &Tensor, strip_special: bool) -> Result<Vec<String>> {
        let logits = match logits.rank() {
            2 => logits.clone(),
            3 if logits.dim(0)? == 1 => logits.squeeze(0)?,
            _ => {
                return Err(AspectraError::Tensor(format!(
                    "expected logits of shape [seq_len, num_labels] or [1, seq_len, num_labels], got {:?}",
                    logits.dims()
                )));
            }
        };

        let num_labels = logits.dim(D::Minus1)?;
        if num_labels != self.len() {
            return Err(AspectraError::Tensor(format!(
                "logits have {num_labels} labels, dictionary has {}",
                self.len()
            )));
        }

        let predictions: Vec<u32> = logits.argmax(D::Minus1)?.to_vec1()?;
        let mut ids: Vec<usize> = predictions.into_iter().map(|id| id as usize).collect();

        if strip_special {
            if ids.len() < 2 {
                ids.clear();
            } else {
                ids.pop();
                ids.remove(0);
            }
        }

        self.decode_ids(&ids)
    }
}

#[cfg(test)]
mod tests {
    use candle_core::Device;

    use super::*;

    fn absa_labels() -> LabelMap {
        LabelMap::new(["O", "B-Aspect", "I-Aspect", "B-Opinion", "I-Opinion"]).unwrap()
    }

    #[test]
    fn test_label_id_lookup() {
        let map = absa_labels();
        assert_eq!(map.len(), 5);
        assert_eq!(map.label(1), Some("B-Aspect"));
        assert_eq!(map.id("I-Opinion"), Some(4));
        assert_eq!(map.label(5), None);
    }

    #[test]
    fn test_empty_map_rejected() {
        let labels: Vec<String> = Vec::new();
        assert!(matches!(
            LabelMap::new(labels),
            Err(AspectraError::EmptyLabelMap)
        ));
    }

    #[test]
    fn test_from_reader_skips_blank_lines() {
        let data = "O\n\nB-Aspect\n  I-Aspect  \n";
        let map = LabelMap::from_reader(data.as_bytes()).unwrap();
        assert_eq!(map.labels(), ["O", "B-Aspect", "I-Aspect"]);
    }

    #[test]
    fn test_decode_ids() {
        let map = absa_labels();
        let tags = map.decode_ids(&[1, 2, 0, 3]).unwrap();
        assert_eq!(tags, ["B-Aspect", "I-Aspect", "O", "B-Opinion"]);
    }

    #[test]
    fn test_decode_unknown_id() {
        let map = absa_labels();
        let err = map.decode_ids(&[0, 7]).unwrap_err();
        assert!(matches!(
            err,
            AspectraError::UnknownLabelId {
                id: 7,
                num_labels: 5
            }
        ));
    }

    #[test]
    fn test_decode_logits_strips_special_tokens() {
        let map = absa_labels();
        // [CLS], 屏, 幕, 好, [SEP]
        let logits = Tensor::new(
            &[
                [9.0f32, 0.0, 0.0, 0.0, 0.0],
                [0.0, 9.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 9.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 9.0, 0.0],
                [9.0, 0.0, 0.0, 0.0, 0.0],
            ],
            &Device::Cpu,
        )
        .unwrap();

        let tags = map.decode_logits(&logits, true).unwrap();
        assert_eq!(tags, ["B-Aspect", "I-Aspect", "B-Opinion"]);

        let batched = logits.unsqueeze(0).unwrap();
        let tags = map.decode_logits(&batched, false).unwrap();
        assert_eq!(tags.len(), 5);
        assert_eq!(tags[0], "O");
    }

    #[test]
    fn test_decode_logits_label_mismatch() {
        let map = absa_labels();
        let logits = Tensor::zeros((3, 4), candle_core::DType::F32, &Device::Cpu).unwrap();
        assert!(matches!(
            map.decode_logits(&logits, false),
            Err(AspectraError::Tensor(_))
        ));
    }
}
