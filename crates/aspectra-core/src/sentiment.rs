//! # Sentiment Pairing
//!
//! Prepares decoded aspect groups for the polarity classifier and collects
//! its answers. The classifier itself is external; it is reached through
//! [`PolarityClassifier`].

use std::collections::HashSet;

use tracing::debug;

use crate::decoder::{SpanDecoder, normalize_input};
use crate::error::Result;
use crate::types::{AspectGroup, SentimentResult};

/// Separator placed between aspect/opinion pairs in the classifier prompt.
const PAIR_SEPARATOR: &str = "，";

/// Assigns a polarity label to an aspect given the full text.
pub trait PolarityClassifier {
    /// Classify `aspect_text` (see [`aspect_text`]) in the context of `text`.
    fn classify(&self, aspect_text: &str, text: &str) -> Result<String>;
}

impl<F> PolarityClassifier for F
where
    F: Fn(&str, &str) -> Result<String>,
{
    fn classify(&self, aspect_text: &str, text: &str) -> Result<String> {
        self(aspect_text, text)
    }
}

/// Remove repeated opinions, keeping the first occurrence of each.
pub fn dedup_opinions(opinions: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    opinions
        .iter()
        .filter(|opinion| seen.insert(opinion.as_str()))
        .cloned()
        .collect()
}

/// Check if `aspect` occurs in `text` no later than `opinion`.
///
/// A term missing from the text counts as occurring before the start.
pub fn is_aspect_first(text: &str, aspect: &str, opinion: &str) -> bool {
    let position = |needle: &str| text.find(needle).map_or(-1, |idx| idx as isize);
    position(aspect) <= position(opinion)
}

/// Build the classifier prompt for an aspect: each opinion is joined to the
/// aspect in the order they appear in the text, and the pairs are joined
/// with a full-width comma.
///
/// # Examples
/// ```
/// use aspectra_core::sentiment::aspect_text;
///
/// let opinions = vec!["好".to_string(), "漂亮".to_string()];
/// assert_eq!(aspect_text("屏幕好,漂亮的屏幕", "屏幕", &opinions), "屏幕好，屏幕漂亮");
/// assert_eq!(aspect_text("很好的屏幕", "屏幕", &["好".to_string()]), "好屏幕");
/// ```
pub fn aspect_text(text: &str, aspect: &str, opinions: &[String]) -> String {
    opinions
        .iter()
        .map(|opinion| {
            if is_aspect_first(text, aspect, opinion) {
                format!("{aspect}{opinion}")
            } else {
                format!("{opinion}{aspect}")
            }
        })
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

/// Unclassified results for decoded groups.
pub fn results_from_groups(groups: &[AspectGroup]) -> Vec<SentimentResult> {
    groups.iter().map(SentimentResult::from_group).collect()
}

/// Decodes aspect groups and classifies each of them.
pub struct SentimentAnalyzer<C> {
    decoder: SpanDecoder,
    classifier: C,
}

impl<C: PolarityClassifier> SentimentAnalyzer<C> {
    /// Create an analyzer from a decoder and a classifier.
    pub fn new(decoder: SpanDecoder, classifier: C) -> Self {
        Self {
            decoder,
            classifier,
        }
    }

    /// Decode groups without classifying them.
    pub fn extract<S: AsRef<str>>(&self, text: &str, tags: &[S]) -> Result<Vec<SentimentResult>> {
        let groups = self.decoder.decode(text, tags)?;
        Ok(results_from_groups(&groups))
    }

    /// Decode groups and attach a polarity to each.
    pub fn analyze<S: AsRef<str>>(&self, text: &str, tags: &[S]) -> Result<Vec<SentimentResult>> {
        let text = if self.decoder.config().normalize_input {
            normalize_input(text)
        } else {
            text.to_string()
        };

        let groups = self.decoder.decode(&text, tags)?;
        let mut results = Vec::with_capacity(groups.len());
        for group in &groups {
            let result = SentimentResult::from_group(group);
            let prompt = aspect_text(&text, &result.aspect, &result.opinions);
            let polarity = self.classifier.classify(&prompt, &text)?;
            debug!(aspect = %result.aspect, %prompt, %polarity, "classified aspect");
            results.push(result.with_polarity(polarity));
        }

        Ok(results)
    }

    /// Get the decoder.
    pub fn decoder(&self) -> &SpanDecoder {
        &self.decoder
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::AspectraError;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let opinions: Vec<String> = ["好", "清晰", "好", "清晰", "亮"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(dedup_opinions(&opinions), ["好", "清晰", "亮"]);
    }

    #[test]
    fn test_is_aspect_first() {
        assert!(is_aspect_first("屏幕很好", "屏幕", "好"));
        assert!(!is_aspect_first("很好的屏幕", "屏幕", "好"));
        // The orphan sentinel never occurs in the text.
        assert!(is_aspect_first("很好", "None", "好"));
        assert!(!is_aspect_first("屏幕", "屏幕", "好"));
    }

    #[test]
    fn test_aspect_text_without_opinions() {
        assert_eq!(aspect_text("屏幕", "屏幕", &[]), "");
    }

    #[test]
    fn test_analyze_with_classifier() {
        let prompts = RefCell::new(Vec::new());
        let classifier = |prompt: &str, _text: &str| -> Result<String> {
            prompts.borrow_mut().push(prompt.to_string());
            Ok(if prompt.contains("一般") {
                "负向".to_string()
            } else {
                "正向".to_string()
            })
        };
        let analyzer = SentimentAnalyzer::new(SpanDecoder::default(), classifier);

        let tags = [
            "B-Aspect", "I-Aspect", "O", "B-Opinion", "O", "B-Aspect", "I-Aspect", "B-Opinion",
            "I-Opinion",
        ];
        let results = analyzer.analyze("屏幕很好,电池一般", &tags).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].aspect, "屏幕");
        assert_eq!(results[0].sentiment_polarity.as_deref(), Some("正向"));
        assert_eq!(results[1].aspect, "电池");
        assert_eq!(results[1].sentiment_polarity.as_deref(), Some("负向"));
        assert_eq!(*prompts.borrow(), ["屏幕好", "电池一般"]);
    }

    #[test]
    fn test_extract_leaves_polarity_empty() {
        let analyzer = SentimentAnalyzer::new(
            SpanDecoder::default(),
            |_: &str, _: &str| -> Result<String> { Ok("正向".to_string()) },
        );
        let tags = ["B-Aspect", "I-Aspect", "B-Opinion", "B-Opinion"];
        let results = analyzer.extract("屏幕好好", &tags).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].opinions, ["好"]);
        assert!(results[0].sentiment_polarity.is_none());
    }

    #[test]
    fn test_classifier_error_propagates() {
        let analyzer = SentimentAnalyzer::new(
            SpanDecoder::default(),
            |_: &str, _: &str| -> Result<String> {
                Err(AspectraError::Classifier("model unavailable".into()))
            },
        );
        let tags = ["B-Aspect", "I-Aspect"];
        let err = analyzer.analyze("屏幕", &tags).unwrap_err();
        assert!(matches!(err, AspectraError::Classifier(_)));
    }
}
