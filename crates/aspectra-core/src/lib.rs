//! # Aspectra Core
//!
//! Decodes the output of an aspect/opinion extraction model into structured
//! aspect groups for aspect-based sentiment analysis. The model tags every
//! character of the input with a BIO label; this crate turns those tags into
//! aspects with their opinion terms and prepares them for a polarity
//! classifier.
//!
//! ## Quick Start
//!
//! ```rust
//! use aspectra_core::decoder::decode;
//!
//! let tags = ["O", "B-Opinion", "O", "B-Aspect", "I-Aspect"];
//! let groups = decode("很好，屏幕", &tags).unwrap();
//!
//! assert_eq!(groups[0].aspect, "屏幕");
//! assert_eq!(groups[0].opinions, ["好"]);
//! ```
pub mod decoder;
pub mod error;
pub mod sentiment;
pub mod tagging;
pub mod types;

// Re-export primary API
pub use decoder::{DecoderConfig, SpanDecoder, decode, normalize_input, segment_text};
pub use error::{AspectraError, Result};
pub use sentiment::{PolarityClassifier, SentimentAnalyzer, aspect_text, is_aspect_first};
pub use tagging::{Entity, EntityKind, LabelMap, Tag, TagPrefix, extract_entities};
pub use types::{AspectGroup, ORPHAN_ASPECT, SentimentResult};
