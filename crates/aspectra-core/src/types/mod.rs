pub mod group;
pub mod result;

pub use group::{AspectGroup, ORPHAN_ASPECT};
pub use result::SentimentResult;
