pub mod bio_tags;
pub mod extract;
pub mod labels;

pub use bio_tags::{ASPECT_TYPE, Entity, EntityKind, OPINION_TYPE, Tag, TagPrefix};
pub use extract::extract_entities;
pub use labels::LabelMap;
