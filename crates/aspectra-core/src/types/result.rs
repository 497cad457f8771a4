use serde::{Deserialize, Serialize};

use super::group::AspectGroup;
use crate::sentiment::dedup_opinions;

/// One line of analysis output: an aspect, its distinct opinions, and the
/// polarity assigned by the downstream classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Aspect surface text, or `"None"` for orphaned opinions.
    pub aspect: String,

    /// Distinct opinion texts. Order carries no meaning.
    pub opinions: Vec<String>,

    /// Polarity label, `None` until a classifier has run.
    pub sentiment_polarity: Option<String>,
}

impl SentimentResult {
    /// Builds an unclassified result from a decoded group.
    #[must_use]
    pub fn from_group(group: &AspectGroup) -> Self {
        Self {
            aspect: group.aspect.clone(),
            opinions: dedup_opinions(&group.opinions),
            sentiment_polarity: None,
        }
    }

    /// Sets the polarity label.
    #[must_use]
    pub fn with_polarity(mut self, polarity: impl Into<String>) -> Self {
        self.sentiment_polarity = Some(polarity.into());
        self
    }
}

impl From<AspectGroup> for SentimentResult {
    fn from(group: AspectGroup) -> Self {
        Self::from_group(&group)
    }
}

impl std::fmt::Display for SentimentResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "aspect: {}, opinions: {:?}, sentiment_polarity: {}",
            self.aspect,
            self.opinions,
            self.sentiment_polarity.as_deref().unwrap_or("None")
        )
    }
}
