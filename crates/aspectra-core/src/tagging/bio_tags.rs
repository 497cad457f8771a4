//! # BIO Tags for Aspect/Opinion Extraction
//!
//! Parses the label strings emitted by the extraction model. Labels follow
//! the BIO (Begin-Inside-Outside) scheme, and the IOBES prefixes `E-` and
//! `S-` are understood as well so that models trained on either scheme can
//! be decoded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type name used by the extraction model for aspect spans.
pub const ASPECT_TYPE: &str = "Aspect";

/// Type name used by the extraction model for opinion spans.
pub const OPINION_TYPE: &str = "Opinion";

/// Type assigned to labels that carry no type, such as `O`.
const NO_TYPE: &str = "_";

/// Prefix of a tag label (the part before the `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagPrefix {
    /// `B-`: first character of a span.
    Begin,
    /// `I-`: continuation of a span.
    Inside,
    /// `E-`: last character of a span (IOBES).
    End,
    /// `S-`: single-character span (IOBES).
    Single,
    /// `O`: outside any span.
    Outside,
    /// Any other leading character.
    Other(char),
}

impl TagPrefix {
    fn from_char(c: char) -> Self {
        match c {
            'B' => TagPrefix::Begin,
            'I' => TagPrefix::Inside,
            'E' => TagPrefix::End,
            'S' => TagPrefix::Single,
            'O' => TagPrefix::Outside,
            other => TagPrefix::Other(other),
        }
    }

    /// Check if this prefix marks a position outside every span.
    ///
    /// `.` is accepted as an outside marker alongside `O`.
    pub fn is_outside(&self) -> bool {
        matches!(self, TagPrefix::Outside | TagPrefix::Other('.'))
    }

    /// Check if this prefix opens a span.
    pub fn is_begin(&self) -> bool {
        matches!(self, TagPrefix::Begin | TagPrefix::Single)
    }

    /// Check if this prefix continues a span.
    pub fn is_inside(&self) -> bool {
        matches!(self, TagPrefix::Inside | TagPrefix::End)
    }
}

impl fmt::Display for TagPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagPrefix::Begin => write!(f, "B"),
            TagPrefix::Inside => write!(f, "I"),
            TagPrefix::End => write!(f, "E"),
            TagPrefix::Single => write!(f, "S"),
            TagPrefix::Outside => write!(f, "O"),
            TagPrefix::Other(c) => write!(f, "{c}"),
        }
    }
}

/// A tag label split into its prefix and entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub prefix: TagPrefix,
    pub entity_type: &'a str,
}

impl<'a> Tag<'a> {
    /// Parse a label such as `B-Aspect`, `I-Opinion` or `O`.
    ///
    /// The first character is the prefix; the type is whatever follows the
    /// first `-` of the remainder. Labels without a type get `_`.
    ///
    /// # Examples
    /// ```
    /// use aspectra_core::tagging::{Tag, TagPrefix};
    ///
    /// let tag = Tag::parse("B-Aspect");
    /// assert_eq!(tag.prefix, TagPrefix::Begin);
    /// assert_eq!(tag.entity_type, "Aspect");
    /// ```
    pub fn parse(label: &'a str) -> Self {
        let mut chars = label.chars();
        let Some(first) = chars.next() else {
            return Self {
                prefix: TagPrefix::Outside,
                entity_type: NO_TYPE,
            };
        };

        let rest = chars.as_str();
        let entity_type = match rest.split_once('-') {
            Some((_, after)) => after,
            None => rest,
        };

        Self {
            prefix: TagPrefix::from_char(first),
            entity_type: if entity_type.is_empty() {
                NO_TYPE
            } else {
                entity_type
            },
        }
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_outside() {
            write!(f, "{}", self.prefix)
        } else {
            write!(f, "{}-{}", self.prefix, self.entity_type)
        }
    }
}

/// Entity kinds the decoder groups on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Aspect,
    Opinion,
}

impl EntityKind {
    /// Map an entity type name to a kind.
    ///
    /// Only `Aspect` maps to [`EntityKind::Aspect`]; every other type is
    /// treated as an opinion.
    pub fn from_type(entity_type: &str) -> Self {
        if entity_type == ASPECT_TYPE {
            EntityKind::Aspect
        } else {
            EntityKind::Opinion
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Aspect => write!(f, "{ASPECT_TYPE}"),
            EntityKind::Opinion => write!(f, "{OPINION_TYPE}"),
        }
    }
}

/// An extracted span with character offsets relative to the tag slice it
/// was extracted from. `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl Entity {
    /// Number of characters covered by the span.
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Spans always cover at least one character.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Surface text of the span within `chars`.
    ///
    /// Offsets past the end of `chars` are clamped.
    pub fn surface(&self, chars: &[char]) -> String {
        let end = (self.end + 1).min(chars.len());
        let start = self.start.min(end);
        chars[start..end].iter().collect()
    }
}
