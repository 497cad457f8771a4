//! # Span Decoder
//!
//! Turns a text and its per-character tags into aspect groups:
//! the text is split into clauses, spans are extracted per clause, and the
//! spans are folded into [`AspectGroup`]s.

pub mod aggregate;
pub mod segmenter;

use tracing::debug;

use crate::error::{AspectraError, Result};
use crate::tagging::{LabelMap, extract_entities};
use crate::types::AspectGroup;

pub use aggregate::{SegmentEntities, aggregate};
pub use segmenter::{DEFAULT_PUNCTUATION, Segment, segment};

/// Configuration for the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Characters that end a clause
    pub punctuation: Vec<char>,
    /// Strip surrounding whitespace and drop spaces before decoding
    pub normalize_input: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
            normalize_input: false,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clause-ending punctuation.
    pub fn with_punctuation(mut self, punctuation: impl IntoIterator<Item = char>) -> Self {
        self.punctuation = punctuation.into_iter().collect();
        self
    }

    /// Enable or disable input normalization.
    pub fn with_normalize_input(mut self, enabled: bool) -> Self {
        self.normalize_input = enabled;
        self
    }
}

/// Remove surrounding whitespace and every ASCII space.
///
/// The extraction model is fed one character per position with spaces
/// removed, so tags produced for such input line up with the normalized
/// text, not the raw one.
pub fn normalize_input(text: &str) -> String {
    text.trim().replace(' ', "")
}

/// Decoder from tag sequences to aspect groups.
#[derive(Debug, Clone, Default)]
pub struct SpanDecoder {
    config: DecoderConfig,
}

impl SpanDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decode aspect groups from a text and its per-character tags.
    ///
    /// # Arguments
    /// * `text` - The analysed text
    /// * `tags` - One label per character of `text`
    ///
    /// # Returns
    /// Aspect groups in text order. Fails with
    /// [`AspectraError::LengthMismatch`] when the lengths differ.
    ///
    /// # Examples
    /// ```
    /// use aspectra_core::decoder::SpanDecoder;
    ///
    /// let decoder = SpanDecoder::default();
    /// let tags = ["B-Aspect", "I-Aspect", "O", "B-Opinion", "O", "B-Aspect", "I-Aspect", "B-Opinion", "I-Opinion"];
    /// let groups = decoder.decode("屏幕很好,电池一般", &tags).unwrap();
    ///
    /// assert_eq!(groups[0].to_vec(), ["屏幕", "好"]);
    /// assert_eq!(groups[1].to_vec(), ["电池", "一般"]);
    /// ```
    pub fn decode<S: AsRef<str>>(&self, text: &str, tags: &[S]) -> Result<Vec<AspectGroup>> {
        let text = if self.config.normalize_input {
            normalize_input(text)
        } else {
            text.to_string()
        };
        let chars: Vec<char> = text.chars().collect();

        if chars.len() != tags.len() {
            return Err(AspectraError::LengthMismatch {
                text_len: chars.len(),
                tag_len: tags.len(),
            });
        }

        let segments = segment(&chars, tags, &self.config.punctuation)?;
        debug!(chars = chars.len(), segments = segments.len(), "segmented input");

        let groups = aggregate(segments.into_iter().map(|seg| SegmentEntities {
            chars: seg.chars,
            entities: extract_entities(seg.tags),
        }));
        debug!(groups = groups.len(), "decoded aspect groups");

        Ok(groups)
    }

    /// Decode from model output ids using a label dictionary.
    pub fn decode_ids(
        &self,
        text: &str,
        ids: &[usize],
        labels: &LabelMap,
    ) -> Result<Vec<AspectGroup>> {
        let tags = labels.decode_ids(ids)?;
        self.decode(text, &tags)
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

/// Convenience function to decode with default settings.
pub fn decode<S: AsRef<str>>(text: &str, tags: &[S]) -> Result<Vec<AspectGroup>> {
    SpanDecoder::default().decode(text, tags)
}

/// Split a text and its tags into clauses with the default punctuation,
/// returning each clause's text and tags.
pub fn segment_text<S: AsRef<str>>(text: &str, tags: &[S]) -> Result<Vec<(String, Vec<String>)>> {
    let chars: Vec<char> = text.chars().collect();
    let segments = segment(&chars, tags, DEFAULT_PUNCTUATION)?;
    Ok(segments
        .iter()
        .map(|seg| {
            let tags = seg.tags.iter().map(|t| t.as_ref().to_string()).collect();
            (seg.text(), tags)
        })
        .collect())
}
