use std::fmt;

use serde::{Deserialize, Serialize};

/// Aspect slot of the group holding opinions that never found an aspect.
pub const ORPHAN_ASPECT: &str = "None";

/// An aspect term together with the opinion terms attached to it.
///
/// Opinions keep the order in which they were attached and may contain
/// duplicates; deduplication happens when a group becomes a
/// [`SentimentResult`](super::SentimentResult).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AspectGroup {
    /// Aspect surface text, or [`ORPHAN_ASPECT`].
    pub aspect: String,

    /// Opinion surface texts attached to the aspect.
    pub opinions: Vec<String>,
}

impl AspectGroup {
    /// Creates a group with no opinions.
    #[must_use]
    pub fn new(aspect: impl Into<String>) -> Self {
        Self {
            aspect: aspect.into(),
            opinions: Vec::new(),
        }
    }

    /// Creates the group for opinions that have no aspect.
    #[must_use]
    pub fn orphan(opinions: Vec<String>) -> Self {
        Self {
            aspect: ORPHAN_ASPECT.to_string(),
            opinions,
        }
    }

    /// Returns `true` if this group collects opinions without an aspect.
    #[must_use]
    pub fn is_orphan(&self) -> bool {
        self.aspect == ORPHAN_ASPECT
    }

    /// Flat form: the aspect followed by its opinions.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        let mut flat = Vec::with_capacity(self.opinions.len() + 1);
        flat.push(self.aspect.clone());
        flat.extend(self.opinions.iter().cloned());
        flat
    }
}

impl fmt::Display for AspectGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aspect)?;
        for opinion in &self.opinions {
            write!(f, " | {opinion}")?;
        }
        Ok(())
    }
}
