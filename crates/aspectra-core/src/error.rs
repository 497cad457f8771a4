use thiserror::Error;

/// Errors that can occur during Aspectra core operations.
#[derive(Debug, Error)]
pub enum AspectraError {
    /// The text and its tag sequence have different lengths.
    #[error("text len: {text_len}, tag_seq len: {tag_len}")]
    LengthMismatch {
        /// Number of characters in the text.
        text_len: usize,
        /// Number of labels in the tag sequence.
        tag_len: usize,
    },

    /// A model output id has no entry in the label dictionary.
    #[error("label id {id} out of range for dictionary of {num_labels} labels")]
    UnknownLabelId {
        /// The offending id.
        id: usize,
        /// Number of labels in the dictionary.
        num_labels: usize,
    },

    /// The label dictionary contains no labels.
    #[error("label dictionary is empty")]
    EmptyLabelMap,

    /// Reading a label dictionary failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Candle tensor error while reading logits.
    #[error("tensor error: {0}")]
    Tensor(String),

    /// The downstream polarity classifier failed.
    #[error("classifier error: {0}")]
    Classifier(String),
}

impl From<candle_core::Error> for AspectraError {
    fn from(err: candle_core::Error) -> Self {
        AspectraError::Tensor(err.to_string())
    }
}

/// Result type alias for Aspectra operations.
pub type Result<T> = std::result::Result<T, AspectraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_reports_both_lengths() {
        let err = AspectraError::LengthMismatch {
            text_len: 5,
            tag_len: 6,
        };
        assert_eq!(err.to_string(), "text len: 5, tag_seq len: 6");
    }

    #[test]
    fn error_display_messages() {
        let err = AspectraError::EmptyLabelMap;
        assert_eq!(err.to_string(), "label dictionary is empty");

        let err = AspectraError::UnknownLabelId {
            id: 9,
            num_labels: 5,
        };
        assert!(err.to_string().contains('9'));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AspectraError>();
    }
}
