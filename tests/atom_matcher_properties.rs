//! Property tests for the atom pattern matcher: wildcards always match,
//! exact copies always match, and any single disagreeing field breaks the
//! match.

use proptest::prelude::*;

use cardsift::vocab::{Cause, ObjKind, Source, StatusFlags, Zone};
use cardsift::{
    Atom, AtomPattern, ResourceDelta, ResourceDeltaPattern, StateDelta, StateDeltaPattern,
    ZoneMove, ZoneMovePattern,
};

fn zone_strategy() -> impl Strategy<Value = Zone> {
    prop::sample::select(vec![
        Zone::Hand,
        Zone::Stack,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::Exile,
        Zone::Library,
        Zone::Command,
    ])
}

fn obj_kind_strategy() -> impl Strategy<Value = ObjKind> {
    prop::sample::select(vec![
        ObjKind::Card,
        ObjKind::Token,
        ObjKind::Permanent,
        ObjKind::Creature,
        ObjKind::Spell,
    ])
}

fn cause_strategy() -> impl Strategy<Value = Cause> {
    prop::sample::select(vec![
        Cause::Sacrifice,
        Cause::Destroy,
        Cause::Cost,
        Cause::Effect,
        Cause::Cast,
        Cause::Other,
    ])
}

fn source_strategy() -> impl Strategy<Value = Source> {
    prop::sample::select(vec![Source::Any, Source::Card, Source::Rules])
}

fn zone_move_strategy() -> impl Strategy<Value = ZoneMove> {
    (
        zone_strategy(),
        zone_strategy(),
        obj_kind_strategy(),
        cause_strategy(),
        source_strategy(),
        prop::option::of(prop::sample::select(vec!["YOU", "OPPONENT"])),
    )
        .prop_map(|(from_zone, to_zone, obj, cause, source, controller)| {
            let mut zone_move = ZoneMove::new(from_zone, to_zone, obj)
                .with_cause(cause)
                .with_source(source);
            if let Some(controller) = controller {
                zone_move = zone_move.with_controller(controller);
            }
            zone_move
        })
}

fn resource_delta_strategy() -> impl Strategy<Value = ResourceDelta> {
    (
        prop::sample::select(vec!["mana", "life", "counter", "damage"]),
        -5i32..=5,
        cause_strategy(),
        source_strategy(),
    )
        .prop_map(|(resource, delta, cause, source)| {
            ResourceDelta::new(resource, delta)
                .with_cause(cause)
                .with_source(source)
        })
}

fn exact_zone_move_pattern(atom: &ZoneMove) -> ZoneMovePattern {
    ZoneMovePattern {
        from_zone: Some(atom.from_zone),
        to_zone: Some(atom.to_zone),
        obj: Some(atom.obj),
        controller: atom.controller.clone(),
        cause: Some(atom.cause),
        source: Some(atom.source),
        require_type: None,
        forbid_type: None,
    }
}

proptest! {
    #[test]
    fn wildcard_zone_move_pattern_matches_all(atom in zone_move_strategy()) {
        let pattern = AtomPattern::ZoneMove(ZoneMovePattern::default());
        prop_assert!(pattern.matches(&Atom::ZoneMove(atom)));
    }

    #[test]
    fn exact_zone_move_pattern_matches_itself(atom in zone_move_strategy()) {
        let pattern = AtomPattern::ZoneMove(exact_zone_move_pattern(&atom));
        prop_assert!(pattern.matches(&Atom::ZoneMove(atom)));
    }

    #[test]
    fn single_wildcarded_field_still_matches(atom in zone_move_strategy()) {
        // Wildcarding any one field of an exact pattern keeps the match.
        for wildcard_field in 0..6 {
            let mut pattern = exact_zone_move_pattern(&atom);
            match wildcard_field {
                0 => pattern.from_zone = None,
                1 => pattern.to_zone = None,
                2 => pattern.obj = None,
                3 => pattern.controller = None,
                4 => pattern.cause = None,
                _ => pattern.source = None,
            }
            prop_assert!(AtomPattern::ZoneMove(pattern).matches(&Atom::ZoneMove(atom.clone())));
        }
    }

    #[test]
    fn disagreeing_zone_breaks_the_match(atom in zone_move_strategy(), other in zone_strategy()) {
        prop_assume!(other != atom.to_zone);
        let mut pattern = exact_zone_move_pattern(&atom);
        pattern.to_zone = Some(other);
        prop_assert!(!AtomPattern::ZoneMove(pattern).matches(&Atom::ZoneMove(atom)));
    }

    #[test]
    fn cross_variant_never_matches(atom in resource_delta_strategy()) {
        let pattern = AtomPattern::ZoneMove(ZoneMovePattern::default());
        prop_assert!(!pattern.matches(&Atom::ResourceDelta(atom)));
    }

    #[test]
    fn resource_delta_exact_and_flipped(atom in resource_delta_strategy()) {
        let exact = AtomPattern::ResourceDelta(ResourceDeltaPattern {
            resource: Some(atom.resource.clone()),
            delta: Some(atom.delta),
            target: atom.target.clone(),
            subtype: atom.subtype.clone(),
            cause: Some(atom.cause),
            source: Some(atom.source),
        });
        prop_assert!(exact.matches(&Atom::ResourceDelta(atom.clone())));

        let flipped = AtomPattern::ResourceDelta(ResourceDeltaPattern {
            delta: Some(atom.delta + 1),
            ..ResourceDeltaPattern::default()
        });
        prop_assert!(!flipped.matches(&Atom::ResourceDelta(atom)));
    }
}

#[test]
fn state_delta_subset_matches_superset_atom() {
    let atom = Atom::StateDelta(StateDelta {
        target: None,
        set_mask: StatusFlags::TAPPED.union(StatusFlags::FACE_DOWN),
        clear_mask: StatusFlags::NONE,
        cause: Cause::Cost,
        source: Source::Card,
    });

    let tapped_only = AtomPattern::StateDelta(StateDeltaPattern {
        set_mask: Some(StatusFlags::TAPPED),
        ..Default::default()
    });
    assert!(tapped_only.matches(&atom));
}

#[test]
fn state_delta_superset_pattern_rejects_subset_atom() {
    let atom = Atom::StateDelta(StateDelta::tap("SELF"));
    let pattern = AtomPattern::StateDelta(StateDeltaPattern {
        set_mask: Some(StatusFlags::TAPPED.union(StatusFlags::FACE_DOWN)),
        ..Default::default()
    });
    assert!(!pattern.matches(&atom));
}
