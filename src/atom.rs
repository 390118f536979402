//! Concrete event atoms and their wildcard pattern counterparts.
//!
//! An [`Atom`] is the smallest description of "what changed": an object
//! moved between zones, a named resource went up or down, the turn advanced
//! a step, or a permanent's status flags were set or cleared. Every variant
//! has an [`AtomPattern`] counterpart whose fields are all optional; a
//! `None` field matches any value. Patterns never fail — a pattern of one
//! variant tested against an atom of another is simply no match.

use std::collections::BTreeSet;

use crate::vocab::{Cause, ObjKind, Source, StatusFlags, Step, Zone};

/// An object moved between zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMove {
    pub from_zone: Zone,
    pub to_zone: Zone,
    pub obj: ObjKind,
    pub obj_types: BTreeSet<String>,
    pub controller: Option<String>,
    pub cause: Cause,
    pub source: Source,
}

impl ZoneMove {
    pub fn new(from_zone: Zone, to_zone: Zone, obj: ObjKind) -> Self {
        Self {
            from_zone,
            to_zone,
            obj,
            obj_types: BTreeSet::new(),
            controller: None,
            cause: Cause::Other,
            source: Source::Any,
        }
    }

    #[must_use]
    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = cause;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_obj_type(mut self, type_name: impl Into<String>) -> Self {
        self.obj_types.insert(type_name.into());
        self
    }

    /// Returns true if the moved object carries the given type.
    pub fn has_type(&self, type_name: &str) -> bool {
        self.obj_types.contains(type_name)
    }

    /// Battlefield-to-graveyard movement of a permanent or token, optionally
    /// restricted to a carried type.
    pub fn is_dies(&self, require_type: Option<&str>) -> bool {
        if self.from_zone != Zone::Battlefield || self.to_zone != Zone::Graveyard {
            return false;
        }
        if !matches!(self.obj, ObjKind::Permanent | ObjKind::Token) {
            return false;
        }
        match require_type {
            Some(type_name) => self.has_type(type_name),
            None => true,
        }
    }
}

/// A signed change to a named resource (life, mana, counters, damage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDelta {
    pub resource: String,
    pub delta: i32,
    pub target: Option<String>,
    pub subtype: Option<String>,
    pub cause: Cause,
    pub source: Source,
}

impl ResourceDelta {
    pub fn new(resource: impl Into<String>, delta: i32) -> Self {
        Self {
            resource: resource.into(),
            delta,
            target: None,
            subtype: None,
            cause: Cause::Other,
            source: Source::Any,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = cause;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }
}

/// A turn-structure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepChange {
    pub step: Step,
    pub source: Source,
}

impl StepChange {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            source: Source::Rules,
        }
    }
}

/// Permanent status flags being set and/or cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDelta {
    pub target: Option<String>,
    pub set_mask: StatusFlags,
    pub clear_mask: StatusFlags,
    pub cause: Cause,
    pub source: Source,
}

impl StateDelta {
    /// A tap: sets TAPPED on the target. Defaults to a cost paid by the
    /// card itself, matching the most common `{T}` reading.
    pub fn tap(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            set_mask: StatusFlags::TAPPED,
            clear_mask: StatusFlags::NONE,
            cause: Cause::Cost,
            source: Source::Card,
        }
    }

    /// An untap: clears TAPPED on the target.
    pub fn untap(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            set_mask: StatusFlags::NONE,
            clear_mask: StatusFlags::TAPPED,
            cause: Cause::Effect,
            source: Source::Card,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = cause;
        self
    }
}

/// The unit of "what changed", as a tagged union over the four shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    ZoneMove(ZoneMove),
    ResourceDelta(ResourceDelta),
    StepChange(StepChange),
    StateDelta(StateDelta),
}

impl From<ZoneMove> for Atom {
    fn from(value: ZoneMove) -> Self {
        Atom::ZoneMove(value)
    }
}

impl From<ResourceDelta> for Atom {
    fn from(value: ResourceDelta) -> Self {
        Atom::ResourceDelta(value)
    }
}

impl From<StepChange> for Atom {
    fn from(value: StepChange) -> Self {
        Atom::StepChange(value)
    }
}

impl From<StateDelta> for Atom {
    fn from(value: StateDelta) -> Self {
        Atom::StateDelta(value)
    }
}

/// Wildcard counterpart of [`ZoneMove`]. `None` fields match anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneMovePattern {
    pub from_zone: Option<Zone>,
    pub to_zone: Option<Zone>,
    pub obj: Option<ObjKind>,
    pub controller: Option<String>,
    pub cause: Option<Cause>,
    pub source: Option<Source>,
    /// A type the moved object must carry, e.g. `"Creature"`.
    pub require_type: Option<String>,
    /// A type the moved object must not carry.
    pub forbid_type: Option<String>,
}

/// Wildcard counterpart of [`ResourceDelta`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceDeltaPattern {
    pub resource: Option<String>,
    pub delta: Option<i32>,
    pub target: Option<String>,
    pub subtype: Option<String>,
    pub cause: Option<Cause>,
    pub source: Option<Source>,
}

/// Wildcard counterpart of [`StepChange`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepChangePattern {
    pub step: Option<Step>,
    pub source: Option<Source>,
}

/// Wildcard counterpart of [`StateDelta`]. Masks use subset semantics: a
/// specified mask matches any atom whose mask contains it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateDeltaPattern {
    pub target: Option<String>,
    pub set_mask: Option<StatusFlags>,
    pub clear_mask: Option<StatusFlags>,
    pub cause: Option<Cause>,
    pub source: Option<Source>,
}

/// A pattern over atoms, one variant per atom shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomPattern {
    ZoneMove(ZoneMovePattern),
    ResourceDelta(ResourceDeltaPattern),
    StepChange(StepChangePattern),
    StateDelta(StateDeltaPattern),
}

fn field_matches<T: PartialEq>(pattern: &Option<T>, value: &T) -> bool {
    match pattern {
        Some(expected) => expected == value,
        None => true,
    }
}

impl AtomPattern {
    /// Tests this pattern against a concrete atom.
    ///
    /// All specified fields must agree; wildcard fields vacuously agree.
    /// [`StateDelta`] masks use subset testing instead of equality, so a
    /// pattern requiring TAPPED matches an atom that sets TAPPED plus more.
    /// Mismatched variants return false, never an error.
    pub fn matches(&self, atom: &Atom) -> bool {
        match (self, atom) {
            (AtomPattern::ZoneMove(pattern), Atom::ZoneMove(atom)) => {
                if let Some(required) = &pattern.require_type
                    && !atom.has_type(required)
                {
                    return false;
                }
                if let Some(forbidden) = &pattern.forbid_type
                    && atom.has_type(forbidden)
                {
                    return false;
                }
                field_matches(&pattern.from_zone, &atom.from_zone)
                    && field_matches(&pattern.to_zone, &atom.to_zone)
                    && field_matches(&pattern.obj, &atom.obj)
                    && (pattern.controller.is_none() || pattern.controller == atom.controller)
                    && field_matches(&pattern.cause, &atom.cause)
                    && field_matches(&pattern.source, &atom.source)
            }
            (AtomPattern::ResourceDelta(pattern), Atom::ResourceDelta(atom)) => {
                field_matches(&pattern.resource, &atom.resource)
                    && field_matches(&pattern.delta, &atom.delta)
                    && (pattern.target.is_none() || pattern.target == atom.target)
                    && (pattern.subtype.is_none() || pattern.subtype == atom.subtype)
                    && field_matches(&pattern.cause, &atom.cause)
                    && field_matches(&pattern.source, &atom.source)
            }
            (AtomPattern::StepChange(pattern), Atom::StepChange(atom)) => {
                field_matches(&pattern.step, &atom.step)
                    && field_matches(&pattern.source, &atom.source)
            }
            (AtomPattern::StateDelta(pattern), Atom::StateDelta(atom)) => {
                (pattern.target.is_none() || pattern.target == atom.target)
                    && pattern
                        .set_mask
                        .is_none_or(|mask| atom.set_mask.contains_all(mask))
                    && pattern
                        .clear_mask
                        .is_none_or(|mask| atom.clear_mask.contains_all(mask))
                    && field_matches(&pattern.cause, &atom.cause)
                    && field_matches(&pattern.source, &atom.source)
            }
            _ => false,
        }
    }
}
