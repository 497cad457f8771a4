//! # Span Extraction
//!
//! Turns a tag sequence into labeled spans. Chunk boundaries follow the
//! conventional chunker used to score sequence-labeling models, so spans
//! decoded here line up with the ones the model was evaluated on:
//! a stray `I-` after `O` still opens a span, and a change of type always
//! closes the running span.

use std::iter;

use tracing::trace;

use crate::tagging::bio_tags::{Entity, EntityKind, Tag, TagPrefix};

/// Extract all spans from a tag sequence.
///
/// Spans are returned in the order in which they end. Offsets are indices
/// into `tags`, and `end` is inclusive.
///
/// # Examples
/// ```
/// use aspectra_core::tagging::{extract_entities, EntityKind};
///
/// let tags = ["B-Aspect", "I-Aspect", "O", "B-Opinion"];
/// let entities = extract_entities(&tags);
///
/// assert_eq!(entities.len(), 2);
/// assert_eq!(entities[0].kind, EntityKind::Aspect);
/// assert_eq!((entities[0].start, entities[0].end), (0, 1));
/// assert_eq!((entities[1].start, entities[1].end), (3, 3));
/// ```
pub fn extract_entities<S: AsRef<str>>(tags: &[S]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut prev = Tag {
        prefix: TagPrefix::Outside,
        entity_type: "",
    };
    let mut begin = 0;

    // A trailing `O` closes a span that runs to the end of the sequence.
    let parsed = tags
        .iter()
        .map(|t| Tag::parse(t.as_ref()))
        .chain(iter::once(Tag::parse("O")));

    for (i, tag) in parsed.enumerate() {
        if end_of_chunk(&prev, &tag) {
            let entity = Entity {
                kind: EntityKind::from_type(prev.entity_type),
                label: prev.entity_type.to_string(),
                start: begin,
                end: i - 1,
            };
            trace!(label = %entity.label, start = entity.start, end = entity.end, "span");
            entities.push(entity);
        }
        if start_of_chunk(&prev, &tag) {
            begin = i;
        }
        prev = tag;
    }

    entities
}

/// Check if a span ended between `prev` and `tag`.
fn end_of_chunk(prev: &Tag<'_>, tag: &Tag<'_>) -> bool {
    use TagPrefix::*;

    match (prev.prefix, tag.prefix) {
        (End, _) | (Single, _) => return true,
        (Begin | Inside, Begin | Single | Outside) => return true,
        _ => {}
    }

    !prev.prefix.is_outside() && prev.entity_type != tag.entity_type
}

/// Check if a span started at `tag`.
fn start_of_chunk(prev: &Tag<'_>, tag: &Tag<'_>) -> bool {
    use TagPrefix::*;

    match (prev.prefix, tag.prefix) {
        (_, Begin) | (_, Single) => return true,
        (End | Single | Outside, End | Inside) => return true,
        _ => {}
    }

    !tag.prefix.is_outside() && prev.entity_type != tag.entity_type
}
