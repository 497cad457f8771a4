//! # Aspect/Opinion Aggregation
//!
//! Folds the spans of each clause into [`AspectGroup`]s. Inside a clause an
//! opinion attaches to the closest preceding aspect, or to the next aspect
//! when none precedes it. Opinions in a clause without any aspect attach to
//! the last aspect seen so far, or wait for the next clause that has one.
//! Opinions still waiting at the end form a group led by
//! [`ORPHAN_ASPECT`](crate::types::ORPHAN_ASPECT).

use tracing::trace;

use crate::tagging::{Entity, EntityKind};
use crate::types::AspectGroup;

/// The characters of one clause and the spans extracted from its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentEntities<'a> {
    pub chars: &'a [char],
    pub entities: Vec<Entity>,
}

/// Running state threaded through the clauses.
#[derive(Debug, Default)]
struct Accumulator {
    groups: Vec<AspectGroup>,
    /// Opinions seen before any aspect.
    pending: Vec<String>,
}

impl Accumulator {
    fn absorb(mut self, segment: SegmentEntities<'_>) -> Self {
        let mut sub_groups: Vec<AspectGroup> = Vec::new();
        let mut sub_pending: Vec<String> = Vec::new();

        for entity in &segment.entities {
            let surface = entity.surface(segment.chars);
            match entity.kind {
                EntityKind::Aspect => {
                    let mut group = AspectGroup::new(surface);
                    group.opinions.append(&mut sub_pending);
                    sub_groups.push(group);
                }
                EntityKind::Opinion => match sub_groups.last_mut() {
                    Some(group) => group.opinions.push(surface),
                    None => sub_pending.push(surface),
                },
            }
        }

        if !sub_groups.is_empty() {
            self.groups.extend(sub_groups);
            if let Some(last) = self.groups.last_mut() {
                last.opinions.append(&mut self.pending);
            }
        } else if !sub_pending.is_empty() {
            match self.groups.last_mut() {
                Some(last) => last.opinions.extend(sub_pending),
                None => {
                    trace!(count = sub_pending.len(), "deferring opinions without aspect");
                    self.pending.extend(sub_pending);
                }
            }
        }

        self
    }

    fn finish(mut self) -> Vec<AspectGroup> {
        if !self.pending.is_empty() {
            self.groups.push(AspectGroup::orphan(self.pending));
        }
        self.groups
    }
}

/// Group the spans of consecutive clauses into aspects with their opinions.
///
/// Clauses must be given in text order.
pub fn aggregate<'a, I>(segments: I) -> Vec<AspectGroup>
where
    I: IntoIterator<Item = SegmentEntities<'a>>,
{
    segments
        .into_iter()
        .fold(Accumulator::default(), Accumulator::absorb)
        .finish()
}
