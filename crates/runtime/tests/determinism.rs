use std::sync::Arc;

use combat_core::{
    CombatConfig, EntityId, EquipmentBonus, ItemId, Loadout, PcgRng, Side, Skill, SkillBook,
    SkillState, StatusEffect, StatusEffectKind,
};
use combat_runtime::{
    Action, ActionOutcome, CombatSession, EquipmentOracleImpl, Event, EventBus,
    InMemoryStateRepo, Topic,
};

/// Routes session logs to the test harness; set `RUST_LOG=debug` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const SWORD: ItemId = ItemId(1);
const DAGGER: ItemId = ItemId(2);

fn armory() -> Arc<EquipmentOracleImpl> {
    let mut oracle = EquipmentOracleImpl::new();
    oracle.add(SWORD, EquipmentBonus::new(5, 9));
    oracle.add(
        DAGGER,
        EquipmentBonus::new(0, 5).with_skill_modifier(Skill::Agility, 2),
    );
    Arc::new(oracle)
}

fn roster() -> Vec<(EntityId, Side, SkillBook, Loadout)> {
    let knight = SkillBook::new()
        .with_skill(Skill::Vitality, SkillState::at_level(6))
        .with_skill(Skill::Melee, SkillState::at_level(8))
        .with_skill(Skill::Evasion, SkillState::at_level(3));
    let rogue = SkillBook::new()
        .with_skill(Skill::Vitality, SkillState::at_level(3))
        .with_skill(Skill::Agility, SkillState::at_level(7))
        .with_skill(Skill::Melee, SkillState::at_level(5))
        .with_skill(Skill::Evasion, SkillState::at_level(6));
    let brute = SkillBook::new()
        .with_skill(Skill::Vitality, SkillState::at_level(8))
        .with_skill(Skill::Melee, SkillState::at_level(6));
    vec![
        (EntityId(1), Side::Initiator, knight, Loadout::new([SWORD])),
        (EntityId(2), Side::Initiator, rogue, Loadout::new([DAGGER])),
        (EntityId(10), Side::Responder, brute.clone(), Loadout::new([SWORD])),
        (EntityId(11), Side::Responder, brute, Loadout::default()),
    ]
}

fn opponents(side: Side) -> Side {
    match side {
        Side::Initiator => Side::Responder,
        Side::Responder => Side::Initiator,
    }
}

fn session(seed: u64, bus: EventBus) -> CombatSession<PcgRng> {
    let mut session =
        CombatSession::seeded(CombatConfig::default(), armory(), seed).with_event_bus(bus);
    for (entity, side, skills, loadout) in roster() {
        session.join(entity, side, skills, loadout).unwrap();
    }
    session
}

/// Plays up to `turns` turns; every actor hits the first living opponent,
/// and entity 2 opens each call with a poisoned blade.
fn play(session: &mut CombatSession<PcgRng>, turns: usize) -> Vec<(EntityId, ActionOutcome)> {
    let mut outcomes = Vec::new();
    for _ in 0..turns {
        let Some(actor) = session.next_turn().unwrap() else {
            break;
        };
        let side = session.scheduler().side_of(actor).unwrap();
        let opened = outcomes.iter().any(|(id, _)| *id == actor);
        let action = match session.living(opponents(side)).first() {
            Some(&target) if actor == EntityId(2) && !opened => Action::Cast {
                target,
                effect: StatusEffect::new(StatusEffectKind::Poisoned, 2, 3, "rogue"),
            },
            Some(&target) => Action::Attack { target },
            None => Action::Wait,
        };
        outcomes.push((actor, session.resolve(actor, action).unwrap()));
        if session.living(Side::Initiator).is_empty() || session.living(Side::Responder).is_empty()
        {
            break;
        }
    }
    outcomes
}

#[test]
fn same_seed_replays_the_same_fight() {
    init_tracing();
    let run = |seed| {
        let bus = EventBus::with_capacity(65_536);
        let mut receivers = bus.subscribe_multiple(&Topic::ALL);
        let mut session = session(seed, bus);
        let outcomes = play(&mut session, 200);
        let events: Vec<Vec<Event>> = receivers
            .iter_mut()
            .map(|(_, rx)| std::iter::from_fn(|| rx.try_recv().ok()).collect())
            .collect();
        (outcomes, events)
    };

    let (first_outcomes, first_events) = run(77);
    let (second_outcomes, second_events) = run(77);
    assert!(!first_outcomes.is_empty());
    assert_eq!(first_outcomes, second_outcomes);
    assert_eq!(first_events, second_events);
    assert!(first_events.iter().all(|topic| !topic.is_empty()));
}

#[test]
fn different_seeds_diverge() {
    let outcomes = |seed| play(&mut session(seed, EventBus::new()), 40);
    let runs: Vec<_> = (1..=4).map(outcomes).collect();
    assert!(runs.windows(2).any(|pair| pair[0] != pair[1]));
}

#[test]
fn saved_fight_resumes_identically() {
    init_tracing();
    let mut original = session(2024, EventBus::new());
    play(&mut original, 6);

    let repo = InMemoryStateRepo::new();
    original.save(&repo).unwrap();

    let mut resumed = CombatSession::new(CombatConfig::default(), armory(), *original.rng());
    for (entity, side, _, loadout) in roster() {
        resumed
            .join_from_repository(&repo, entity, side, loadout)
            .unwrap();
    }

    let expected = play(&mut original, 200);
    let actual = play(&mut resumed, 200);
    assert_eq!(actual, expected);
    for (entity, _, _, _) in roster() {
        assert_eq!(resumed.combatant(entity), original.combatant(entity));
        assert_eq!(resumed.skills(entity), original.skills(entity));
    }
}

#[test]
fn saving_mid_turn_is_rejected() {
    let mut session = session(5, EventBus::new());
    let actor = session.next_turn().unwrap().unwrap();
    let repo = InMemoryStateRepo::new();

    assert!(session.save(&repo).is_err());
    session.resolve(actor, Action::Wait).unwrap();
    session.save(&repo).unwrap();
}
