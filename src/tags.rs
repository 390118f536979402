//! Normalized event tags for cross-card feed detection.

use crate::vocab::{EventKind, Resource, Scope, Step};

/// A coarse, hashable event summary: what happened, to which resource, on
/// whose side, optionally pinned to a turn step.
///
/// Tags live in unordered sets; set intersection answers "does one card's
/// result feed another card's trigger". Two tags are equal iff all fields
/// are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventTag {
    pub kind: EventKind,
    pub resource: Resource,
    pub scope: Scope,
    pub step: Option<Step>,
}

impl EventTag {
    pub fn new(kind: EventKind, resource: Resource, scope: Scope) -> Self {
        Self {
            kind,
            resource,
            scope,
            step: None,
        }
    }

    #[must_use]
    pub fn at_step(mut self, step: Step) -> Self {
        self.step = Some(step);
        self
    }

    /// Compact `KIND:RESOURCE:SCOPE:STEP` form for reports, `-` standing
    /// in for a missing step.
    pub fn short(&self) -> String {
        let step = self.step.map(Step::name).unwrap_or("-");
        format!(
            "{}:{}:{}:{}",
            self.kind.name(),
            self.resource.name(),
            self.scope.name(),
            step
        )
    }
}
