//! # Punctuation Segmenter
//!
//! Splits a character sequence and its aligned tags into clauses at
//! punctuation marks. Opinions only attach to aspects inside the same
//! clause, so the segment boundaries decide which aspect an opinion
//! belongs to.

use crate::error::{AspectraError, Result};

/// Clause-ending punctuation, ASCII and full-width.
pub const DEFAULT_PUNCTUATION: &[char] = &[',', '.', '?', ';', '!', '，', '。', '？', '；', '！'];

/// A contiguous slice of the input and its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a, S> {
    /// Character offset of the segment in the full input.
    pub start: usize,
    /// Characters of the segment.
    pub chars: &'a [char],
    /// Tags aligned with `chars`.
    pub tags: &'a [S],
}

impl<S> Segment<'_, S> {
    /// Segment text as a string.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Number of characters in the segment.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the segment has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Split `chars` and `tags` at every punctuation character.
///
/// A punctuation mark is the first character of the segment that follows
/// it, not the last character of the one before. The segment count is
/// always the number of punctuation marks plus one, so segments may be
/// empty (for instance when the text starts with punctuation).
///
/// # Examples
/// ```
/// use aspectra_core::decoder::segmenter::{segment, DEFAULT_PUNCTUATION};
///
/// let chars: Vec<char> = "好,差".chars().collect();
/// let tags = ["B-Opinion", "O", "B-Opinion"];
/// let segments = segment(&chars, &tags, DEFAULT_PUNCTUATION).unwrap();
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].text(), "好");
/// assert_eq!(segments[1].text(), ",差");
/// ```
pub fn segment<'a, S>(
    chars: &'a [char],
    tags: &'a [S],
    punctuation: &[char],
) -> Result<Vec<Segment<'a, S>>> {
    if chars.len() != tags.len() {
        return Err(AspectraError::LengthMismatch {
            text_len: chars.len(),
            tag_len: tags.len(),
        });
    }

    let splits = chars
        .iter()
        .enumerate()
        .filter(|&(_, c)| punctuation.contains(c))
        .map(|(idx, _)| idx);

    let mut segments = Vec::new();
    let mut prev = 0;
    for split in splits {
        segments.push(Segment {
            start: prev,
            chars: &chars[prev..split],
            tags: &tags[prev..split],
        });
        prev = split;
    }
    segments.push(Segment {
        start: prev,
        chars: &chars[prev..],
        tags: &tags[prev..],
    });

    Ok(segments)
}
