//! Shared vocabulary for the extraction pipeline.
//!
//! Fixed, closed enumerations consumed by every layer above. No parsing
//! logic lives here; the only behavior is name rendering for report
//! short-forms and the status-flag bitset operations.

/// Where an event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Any,
    Card,
    Rules,
}

/// Turn-structure steps, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Untap,
    Upkeep,
    DrawStep,
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,
    Main1,
    Main2,
    EndStep,
    Cleanup,
}

impl Step {
    /// Upper-case name used in tag short-forms.
    pub fn name(self) -> &'static str {
        match self {
            Step::Untap => "UNTAP",
            Step::Upkeep => "UPKEEP",
            Step::DrawStep => "DRAW_STEP",
            Step::BeginCombat => "BEGIN_COMBAT",
            Step::DeclareAttackers => "DECLARE_ATTACKERS",
            Step::DeclareBlockers => "DECLARE_BLOCKERS",
            Step::CombatDamage => "COMBAT_DAMAGE",
            Step::EndCombat => "END_COMBAT",
            Step::Main1 => "MAIN1",
            Step::Main2 => "MAIN2",
            Step::EndStep => "END_STEP",
            Step::Cleanup => "CLEANUP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Hand,
    Stack,
    Battlefield,
    Graveyard,
    Exile,
    Library,
    Command,
}

/// Why a state transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cause {
    Sacrifice,
    Destroy,
    Damage,
    Cost,
    Effect,
    Rules,
    Sba,
    Cast,
    Activation,
    Trigger,
    Other,
}

/// The kind of object that moved or changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjKind {
    Card,
    Token,
    Permanent,
    Creature,
    Artifact,
    Enchantment,
    Land,
    Planeswalker,
    Spell,
    Ability,
}

/// Permanent status flags as a bitset for efficient subset tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusFlags(u8);

impl StatusFlags {
    pub const NONE: Self = Self(0);
    pub const TAPPED: Self = Self(1 << 0);
    pub const PHASED_OUT: Self = Self(1 << 1);
    pub const FACE_DOWN: Self = Self(1 << 2);
    pub const TRANSFORMED: Self = Self(1 << 3);
    pub const FLIPPED: Self = Self(1 << 4);

    /// Creates an empty flag set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns true if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is also set in `self`.
    pub const fn contains_all(self, other: StatusFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    pub const fn union(self, other: StatusFlags) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of two flag sets.
    pub const fn intersection(self, other: StatusFlags) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the number of flags set.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Coarse event kinds used in [`EventTag`](crate::tags::EventTag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Cast,
    Draw,
    Create,
    Gain,
    Lose,
    Add,
    Deal,
    Sacrifice,
    Enters,
    Dies,
    Destroy,
    Exile,
    Bounce,
    Counter,
    Tutor,
    Reanimate,
    Step,
    State,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Cast => "CAST",
            EventKind::Draw => "DRAW",
            EventKind::Create => "CREATE",
            EventKind::Gain => "GAIN",
            EventKind::Lose => "LOSE",
            EventKind::Add => "ADD",
            EventKind::Deal => "DEAL",
            EventKind::Sacrifice => "SACRIFICE",
            EventKind::Enters => "ENTERS",
            EventKind::Dies => "DIES",
            EventKind::Destroy => "DESTROY",
            EventKind::Exile => "EXILE",
            EventKind::Bounce => "BOUNCE",
            EventKind::Counter => "COUNTER",
            EventKind::Tutor => "TUTOR",
            EventKind::Reanimate => "REANIMATE",
            EventKind::Step => "STEP",
            EventKind::State => "STATE",
        }
    }
}

/// What an event produces or consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    None,
    Card,
    Token,
    Life,
    Mana,
    Counter,
    Damage,
    Permanent,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::None => "NONE",
            Resource::Card => "CARD",
            Resource::Token => "TOKEN",
            Resource::Life => "LIFE",
            Resource::Mana => "MANA",
            Resource::Counter => "COUNTER",
            Resource::Damage => "DAMAGE",
            Resource::Permanent => "PERMANENT",
        }
    }
}

/// Whose side of the table an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    You,
    Opponent,
    AnyPlayer,
    YourPermanent,
    AnyPermanent,
}

impl Scope {
    pub fn name(self) -> &'static str {
        match self {
            Scope::You => "YOU",
            Scope::Opponent => "OPPONENT",
            Scope::AnyPlayer => "ANY_PLAYER",
            Scope::YourPermanent => "YOUR_PERMANENT",
            Scope::AnyPermanent => "ANY_PERMANENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flags_empty() {
        let flags = StatusFlags::new();
        assert!(flags.is_empty());
        assert_eq!(flags.count(), 0);
    }

    #[test]
    fn test_status_flags_union_contains() {
        let flags = StatusFlags::TAPPED.union(StatusFlags::FACE_DOWN);
        assert_eq!(flags.count(), 2);
        assert!(flags.contains_all(StatusFlags::TAPPED));
        assert!(flags.contains_all(StatusFlags::FACE_DOWN));
        assert!(!flags.contains_all(StatusFlags::PHASED_OUT));
    }

    #[test]
    fn test_status_flags_subset_direction() {
        let single = StatusFlags::TAPPED;
        let pair = StatusFlags::TAPPED.union(StatusFlags::FLIPPED);
        assert!(pair.contains_all(single));
        assert!(!single.contains_all(pair));
    }

    #[test]
    fn test_short_form_names() {
        assert_eq!(EventKind::Draw.name(), "DRAW");
        assert_eq!(Resource::Card.name(), "CARD");
        assert_eq!(Scope::YourPermanent.name(), "YOUR_PERMANENT");
        assert_eq!(Step::Upkeep.name(), "UPKEEP");
    }
}
