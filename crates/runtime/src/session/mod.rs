//! Turn-by-turn combat orchestration.
//!
//! [`CombatSession`] owns every participant's state and drives the loop
//!
//! ```text
//! next_turn()  → advance clock, tick the actor's status effects, dequeue
//! resolve()    → check, apply damage/heal/status, record progression,
//!                re-schedule the actor by action cost
//! ```
//!
//! Exactly one action is resolved at a time. Events are published after the
//! state change they describe is complete, and saving is only allowed between
//! turns.

mod action;

use std::collections::BTreeMap;
use std::sync::Arc;

use combat_core::stats::{category_cost, speed_level};
use combat_core::{
    ActionCategory, CombatConfig, CombatantError, CombatantState, EntityId, EquipmentBonus,
    EquipmentOracle, Hazard, HazardOutcome, Loadout, PcgRng, ProgressionEvent,
    ProgressionTracker, RandomSource, Side, Skill, SkillBook, SkillCheckResult, StatusApplication,
    StatusEffect, StatusEffectKind, Tick, TurnScheduler, max_hp, resolve_attack,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus, SkillProgressed, StatusEvent, TurnEvent};
use crate::repository::{EntityRecord, EventRepository, StateRepository};

pub use action::{Action, ActionOutcome};

/// One combatant's state as tracked by a session.
#[derive(Debug, Clone)]
struct Participant {
    side: Side,
    combatant: CombatantState,
    skills: SkillBook,
    loadout: Loadout,
}

/// A single encounter between two sides.
pub struct CombatSession<R: RandomSource> {
    config: CombatConfig,
    tracker: ProgressionTracker,
    scheduler: TurnScheduler,
    participants: BTreeMap<EntityId, Participant>,
    equipment: Arc<dyn EquipmentOracle>,
    rng: R,
    bus: EventBus,
    log: Option<Box<dyn EventRepository>>,
    current: Option<EntityId>,
}

impl CombatSession<PcgRng> {
    /// Creates a session whose randomness is fully determined by `seed`.
    pub fn seeded(config: CombatConfig, equipment: Arc<dyn EquipmentOracle>, seed: u64) -> Self {
        tracing::debug!(seed, "creating seeded combat session");
        Self::new(config, equipment, PcgRng::new(seed))
    }

    /// Creates a session seeded from OS entropy.
    pub fn from_entropy(config: CombatConfig, equipment: Arc<dyn EquipmentOracle>) -> Self {
        Self::seeded(config, equipment, rand::random())
    }
}

impl<R: RandomSource> CombatSession<R> {
    pub fn new(config: CombatConfig, equipment: Arc<dyn EquipmentOracle>, rng: R) -> Self {
        Self {
            tracker: ProgressionTracker::from_config(&config),
            config,
            scheduler: TurnScheduler::new(),
            participants: BTreeMap::new(),
            equipment,
            rng,
            bus: EventBus::new(),
            log: None,
            current: None,
        }
    }

    /// Publishes on `bus` instead of a private bus (builder pattern).
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    /// Appends every published event to `log` (builder pattern).
    #[must_use]
    pub fn with_event_log(mut self, log: Box<dyn EventRepository>) -> Self {
        self.log = Some(log);
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn clock(&self) -> Tick {
        self.scheduler.clock()
    }

    /// Entity whose turn is in progress, if any.
    pub fn current_actor(&self) -> Option<EntityId> {
        self.current
    }

    pub fn combatant(&self, entity: EntityId) -> Option<&CombatantState> {
        self.participants.get(&entity).map(|p| &p.combatant)
    }

    pub fn skills(&self, entity: EntityId) -> Option<&SkillBook> {
        self.participants.get(&entity).map(|p| &p.skills)
    }

    pub fn loadout(&self, entity: EntityId) -> Option<&Loadout> {
        self.participants.get(&entity).map(|p| &p.loadout)
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Living combatants on `side`, in id order.
    pub fn living(&self, side: Side) -> Vec<EntityId> {
        self.participants
            .iter()
            .filter(|(_, p)| p.side == side && p.combatant.is_alive())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Flushes the attached event log, if any.
    pub fn flush_events(&mut self) -> Result<()> {
        if let Some(log) = self.log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Adds a combatant built from its skills and gear, ready at the current clock.
    pub fn join(
        &mut self,
        entity: EntityId,
        side: Side,
        skills: SkillBook,
        loadout: Loadout,
    ) -> Result<()> {
        self.ensure_absent(entity)?;
        let gear = loadout.total(self.equipment.as_ref());
        let combatant =
            CombatantState::from_skills(&skills, gear.hp).advance_timer(0, self.clock())?;

        tracing::debug!(%entity, %side, max_hp = combatant.max_hp(), "combatant joined");
        self.admit(entity, side, combatant, skills, loadout)
    }

    /// Adds a combatant from a stored record, keeping its HP, effects and timer.
    pub fn join_from_repository(
        &mut self,
        repo: &(impl StateRepository + ?Sized),
        entity: EntityId,
        side: Side,
        loadout: Loadout,
    ) -> Result<()> {
        self.ensure_absent(entity)?;
        let record = repo
            .load(entity)?
            .ok_or(RuntimeError::RecordNotFound(entity))?;

        tracing::debug!(%entity, %side, hp = record.combatant.current_hp(), "combatant restored");
        self.admit(entity, side, record.combatant, record.skills, loadout)
    }

    /// Swaps a combatant's gear and re-derives its max HP.
    pub fn set_loadout(&mut self, entity: EntityId, loadout: Loadout) -> Result<()> {
        let clock = self.clock();
        self.participant_mut(entity)?.loadout = loadout;
        let mut events = Vec::new();
        self.refresh_max_hp(entity, clock, &mut events)?;
        self.emit_all(events)
    }

    fn admit(
        &mut self,
        entity: EntityId,
        side: Side,
        combatant: CombatantState,
        skills: SkillBook,
        loadout: Loadout,
    ) -> Result<()> {
        let ready_at = combatant.action_timer_end().max(self.clock());
        let alive = combatant.is_alive();
        self.participants.insert(
            entity,
            Participant {
                side,
                combatant,
                skills,
                loadout,
            },
        );
        if alive {
            self.scheduler.insert(entity, side, ready_at);
            self.emit_all(vec![TurnEvent::Scheduled { entity, ready_at }.into()])?;
        }
        Ok(())
    }

    // ========================================================================
    // Turn loop
    // ========================================================================

    /// Starts the next turn and returns whose it is.
    ///
    /// The clock moves to the earliest ready tick and the actor's status
    /// effects tick once. An actor killed by its own damage-over-time effects
    /// loses the turn and the next one is tried. Returns `None` when nobody is
    /// scheduled.
    pub fn next_turn(&mut self) -> Result<Option<EntityId>> {
        if let Some(entity) = self.current {
            return Err(RuntimeError::TurnInProgress(entity));
        }

        loop {
            let Some(clock) = self.scheduler.advance_to_next() else {
                return Ok(None);
            };
            let Some(turn) = self.scheduler.dequeue() else {
                return Ok(None);
            };

            let mut events = Vec::new();
            let alive = self.tick_statuses(turn.entity, clock, &mut events)?;
            if alive {
                events.push(
                    TurnEvent::Started {
                        entity: turn.entity,
                        clock,
                    }
                    .into(),
                );
                self.current = Some(turn.entity);
            }
            self.emit_all(events)?;

            if alive {
                tracing::debug!(entity = %turn.entity, %clock, "turn started");
                return Ok(Some(turn.entity));
            }
        }
    }

    /// Resolves the current actor's action and ends its turn.
    ///
    /// Contract violations (wrong actor, unknown or defeated target, zero
    /// duration effect) are rejected before any state changes, and the turn
    /// stays open.
    pub fn resolve(&mut self, actor: EntityId, action: Action) -> Result<ActionOutcome> {
        let expected = self.current.ok_or(RuntimeError::NoCurrentTurn)?;
        if actor != expected {
            return Err(RuntimeError::InvalidActionActor {
                expected,
                provided: actor,
            });
        }
        if let Some(target) = action.target() {
            self.ensure_targetable(target)?;
        }
        if let Action::Cast { effect, .. } = &action
            && effect.duration == 0
        {
            return Err(CombatantError::ZeroDuration(effect.kind).into());
        }

        let performed = if action != Action::Wait
            && self
                .participant(actor)?
                .combatant
                .has_status_effect(StatusEffectKind::Stunned)
        {
            tracing::debug!(%actor, "stunned actor forfeits its action");
            Action::Wait
        } else {
            action
        };

        let clock = self.clock();
        let mut events = Vec::new();
        let mut check = None;
        let mut status = None;
        let mut removed = None;

        match &performed {
            Action::Attack { target } => {
                check = Some(self.attack(actor, *target, clock, &mut events)?);
            }
            Action::Cast { target, effect } => {
                status = Some(self.cast(actor, *target, effect.clone(), clock, &mut events)?);
            }
            Action::Cleanse { target, kind } => {
                removed = Some(self.cleanse(actor, *target, *kind, clock, &mut events)?);
            }
            Action::Heal { target, amount } => {
                self.heal(*target, *amount, clock, &mut events)?;
            }
            Action::Wait => {}
        }

        // An actor that killed itself has already left the turn order.
        let (cost, ready_at) = if self.is_alive(actor) {
            let (cost, ready_at) =
                self.reschedule(actor, performed.category(), clock, &mut events)?;
            (cost, Some(ready_at))
        } else {
            (0, None)
        };
        self.current = None;
        self.emit_all(events)?;

        Ok(ActionOutcome {
            performed,
            check,
            status,
            removed,
            cost,
            ready_at,
        })
    }

    /// Springs a hazard on `entity` outside the turn order.
    ///
    /// Avoidance uses the configured hazard composite (Perception and
    /// Disarming by default). A hazard that already fired returns
    /// [`HazardOutcome::AlreadyTriggered`] and changes nothing. A hazard that
    /// kills the current actor ends its turn.
    pub fn spring_hazard(
        &mut self,
        entity: EntityId,
        hazard: Hazard,
    ) -> Result<(Hazard, HazardOutcome)> {
        self.ensure_targetable(entity)?;
        let clock = self.clock();

        let modifier = {
            let participant = self.participant(entity)?;
            let gear = self.gear(participant);
            self.config
                .hazard_avoidance
                .modifier(&participant.skills, &gear)
        };
        let (hazard, outcome) = hazard.spring(modifier, &mut self.rng, &self.config.checks);
        let HazardOutcome::Resolved(result) = outcome else {
            return Ok((hazard, outcome));
        };

        let mut events = vec![
            CombatEvent::HazardSprung {
                entity,
                result,
                clock,
            }
            .into(),
        ];
        if result.damage > 0 {
            self.damage(entity, result.damage, clock, &mut events)?;
        }
        if self.is_alive(entity) {
            let skills: Vec<String> = self
                .config
                .hazard_avoidance
                .skills()
                .map(str::to_owned)
                .collect();
            for skill in &skills {
                self.progress(entity, skill, result.success, clock, &mut events)?;
            }
        }
        self.emit_all(events)?;
        Ok((hazard, outcome))
    }

    /// Records a skill use outside of combat (gathering, crafting, social).
    pub fn record_skill_use(
        &mut self,
        entity: EntityId,
        skill: impl AsRef<str>,
        succeeded: bool,
    ) -> Result<Vec<ProgressionEvent>> {
        let clock = self.clock();
        let mut events = Vec::new();
        let progression = self.progress(entity, skill.as_ref(), succeeded, clock, &mut events)?;
        self.emit_all(events)?;
        Ok(progression)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Writes every participant's record. Only allowed between turns.
    pub fn save(&self, repo: &(impl StateRepository + ?Sized)) -> Result<()> {
        if let Some(entity) = self.current {
            return Err(RuntimeError::TurnInProgress(entity));
        }
        for (entity, participant) in &self.participants {
            let record =
                EntityRecord::new(participant.combatant.clone(), participant.skills.clone());
            repo.save(*entity, &record)?;
        }
        tracing::debug!(count = self.participants.len(), clock = %self.clock(), "session saved");
        Ok(())
    }

    /// Replaces a joined combatant's state with its stored record.
    ///
    /// Returns `false` when the repository has no record for `entity`.
    pub fn restore(
        &mut self,
        repo: &(impl StateRepository + ?Sized),
        entity: EntityId,
    ) -> Result<bool> {
        if let Some(current) = self.current {
            return Err(RuntimeError::TurnInProgress(current));
        }
        let clock = self.clock();
        let side = self.participant(entity)?.side;
        let Some(record) = repo.load(entity)? else {
            return Ok(false);
        };

        let ready_at = record.combatant.action_timer_end().max(clock);
        let alive = record.combatant.is_alive();
        let participant = self.participant_mut(entity)?;
        participant.combatant = record.combatant;
        participant.skills = record.skills;

        if alive {
            self.scheduler.insert(entity, side, ready_at);
            self.emit_all(vec![TurnEvent::Scheduled { entity, ready_at }.into()])?;
        } else {
            self.scheduler.remove(entity);
        }
        tracing::debug!(%entity, alive, "combatant state restored");
        Ok(true)
    }

    // ========================================================================
    // Resolution steps
    // ========================================================================

    fn attack(
        &mut self,
        attacker: EntityId,
        target: EntityId,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<SkillCheckResult> {
        let (attack_modifier, weapon_damage) = {
            let participant = self.participant(attacker)?;
            let gear = self.gear(participant);
            let combatant = &participant.combatant;
            let weapon = gear
                .weapon_damage
                .saturating_add(combatant.status_effect_magnitude(StatusEffectKind::Empowered))
                .saturating_sub(combatant.status_effect_magnitude(StatusEffectKind::Weakened));
            (self.config.attack.modifier(&participant.skills, &gear), weapon)
        };
        let defense_modifier = {
            let participant = self.participant(target)?;
            let gear = self.gear(participant);
            self.config
                .defense
                .modifier(&participant.skills, &gear)
                .saturating_add(
                    participant
                        .combatant
                        .status_effect_magnitude(StatusEffectKind::Fortified),
                )
        };

        let result = resolve_attack(
            attack_modifier,
            defense_modifier,
            weapon_damage,
            &mut self.rng,
            &self.config.checks,
        );
        tracing::debug!(
            %attacker,
            %target,
            success = result.success,
            margin = result.margin,
            damage = result.damage,
            "attack resolved"
        );
        events.push(
            CombatEvent::AttackResolved {
                attacker,
                target,
                result,
                clock,
            }
            .into(),
        );

        if result.damage > 0 {
            self.damage(target, result.damage, clock, events)?;
        }

        if self.is_alive(attacker) {
            let attack_skills: Vec<String> =
                self.config.attack.skills().map(str::to_owned).collect();
            for skill in &attack_skills {
                self.progress(attacker, skill, result.success, clock, events)?;
            }
        }
        if self.is_alive(target) {
            let defense_skills: Vec<String> =
                self.config.defense.skills().map(str::to_owned).collect();
            for skill in &defense_skills {
                self.progress(target, skill, !result.success, clock, events)?;
            }
        }
        Ok(result)
    }

    fn cast(
        &mut self,
        caster: EntityId,
        target: EntityId,
        effect: StatusEffect,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<StatusApplication> {
        let participant = self.participant_mut(target)?;
        let (combatant, outcome) = participant.combatant.clone().apply_status(effect.clone())?;
        participant.combatant = combatant;

        tracing::debug!(%caster, %target, kind = %effect.kind, ?outcome, "status applied");
        events.push(
            StatusEvent::Applied {
                entity: target,
                effect,
                outcome: outcome.clone(),
                clock,
            }
            .into(),
        );

        self.progress(caster, Skill::Spellcraft.as_ref(), outcome.took_effect(), clock, events)?;
        Ok(outcome)
    }

    fn cleanse(
        &mut self,
        caster: EntityId,
        target: EntityId,
        kind: StatusEffectKind,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<usize> {
        let participant = self.participant_mut(target)?;
        let (combatant, count) = participant.combatant.clone().remove_status(kind);
        participant.combatant = combatant;

        tracing::debug!(%caster, %target, %kind, count, "status cleansed");
        if count > 0 {
            events.push(
                StatusEvent::Removed {
                    entity: target,
                    kind,
                    count,
                    clock,
                }
                .into(),
            );
        }

        self.progress(caster, Skill::Spellcraft.as_ref(), count > 0, clock, events)?;
        Ok(count)
    }

    fn heal(
        &mut self,
        target: EntityId,
        amount: u32,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<()> {
        let participant = self.participant_mut(target)?;
        let hp_before = participant.combatant.current_hp();
        participant.combatant = participant.combatant.clone().heal(amount);
        events.push(
            CombatEvent::Healed {
                entity: target,
                amount,
                hp_before,
                hp_after: participant.combatant.current_hp(),
                clock,
            }
            .into(),
        );
        Ok(())
    }

    fn damage(
        &mut self,
        entity: EntityId,
        amount: u32,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<()> {
        let participant = self.participant_mut(entity)?;
        let hp_before = participant.combatant.current_hp();
        participant.combatant = participant.combatant.clone().apply_damage(amount);
        let hp_after = participant.combatant.current_hp();
        let dead = participant.combatant.is_dead();

        events.push(
            CombatEvent::Damaged {
                entity,
                amount,
                hp_before,
                hp_after,
                clock,
            }
            .into(),
        );
        if dead {
            self.mark_dead(entity, clock, events);
        }
        Ok(())
    }

    fn tick_statuses(
        &mut self,
        entity: EntityId,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<bool> {
        let participant = self.participant_mut(entity)?;
        let (combatant, report) = participant.combatant.clone().tick_effects(clock);
        participant.combatant = combatant;
        let alive = participant.combatant.is_alive();

        for application in report.applications {
            events.push(
                StatusEvent::Ticked {
                    entity,
                    application,
                }
                .into(),
            );
        }
        for effect in report.expired {
            events.push(
                StatusEvent::Expired {
                    entity,
                    effect,
                    clock,
                }
                .into(),
            );
        }
        if !alive {
            self.mark_dead(entity, clock, events);
        }
        Ok(alive)
    }

    /// Takes a dead combatant out of the turn order, ending its turn if open.
    fn mark_dead(&mut self, entity: EntityId, clock: Tick, events: &mut Vec<Event>) {
        tracing::info!(%entity, %clock, "combatant died");
        self.scheduler.remove(entity);
        if self.current == Some(entity) {
            self.current = None;
        }
        events.push(CombatEvent::Died { entity, clock }.into());
        events.push(TurnEvent::Descheduled { entity, clock }.into());
    }

    fn progress(
        &mut self,
        entity: EntityId,
        skill: &str,
        succeeded: bool,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<Vec<ProgressionEvent>> {
        let participant = self
            .participants
            .get_mut(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))?;
        let skills = std::mem::take(&mut participant.skills);
        let (skills, progression) = self.tracker.record_in_book(
            skills,
            skill,
            succeeded,
            self.config.attempt_xp,
            &mut self.rng,
        );
        participant.skills = skills;

        for event in &progression {
            match event {
                ProgressionEvent::LevelUp { skill, to, .. }
                | ProgressionEvent::LuckyLevelUp { skill, to, .. } => {
                    tracing::info!(%entity, skill = %skill, level = to, "skill level up");
                }
                ProgressionEvent::PerkMilestoneReached { skill, level } => {
                    tracing::info!(%entity, skill = %skill, level, "perk milestone reached");
                }
                ProgressionEvent::Unlocked { .. } | ProgressionEvent::XpGained { .. } => {}
            }
            events.push(
                SkillProgressed {
                    entity,
                    event: event.clone(),
                    clock,
                }
                .into(),
            );
        }

        self.refresh_max_hp(entity, clock, events)?;
        Ok(progression)
    }

    /// Re-derives max HP from skills and gear; dead combatants are left alone.
    fn refresh_max_hp(
        &mut self,
        entity: EntityId,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<()> {
        let participant = self
            .participants
            .get_mut(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))?;
        let gear = participant.loadout.total(self.equipment.as_ref());
        let max_after = max_hp(&participant.skills, gear.hp);
        let max_before = participant.combatant.max_hp();
        if max_after == max_before || participant.combatant.is_dead() {
            return Ok(());
        }

        participant.combatant = participant.combatant.clone().update_max_hp(max_after)?;
        events.push(
            CombatEvent::MaxHpChanged {
                entity,
                max_before,
                max_after,
                hp_after: participant.combatant.current_hp(),
                clock,
            }
            .into(),
        );
        Ok(())
    }

    fn reschedule(
        &mut self,
        actor: EntityId,
        category: ActionCategory,
        clock: Tick,
        events: &mut Vec<Event>,
    ) -> Result<(u64, Tick)> {
        let costs = self.config.action_costs;
        let minimum = self.config.min_action_cost;
        let participant = self.participant_mut(actor)?;
        let speed = speed_level(&participant.skills, participant.combatant.status_effects());
        let cost = category_cost(&costs, category, speed, minimum);

        participant.combatant = participant
            .combatant
            .clone()
            .advance_timer(i64::try_from(cost).unwrap_or(i64::MAX), clock)?;
        let ready_at = participant.combatant.action_timer_end();

        self.scheduler.reschedule(actor, ready_at)?;
        events.push(
            TurnEvent::Scheduled {
                entity: actor,
                ready_at,
            }
            .into(),
        );
        Ok((cost, ready_at))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Logs then publishes every event. The bus always receives the whole
    /// batch; the first log failure is returned afterwards.
    fn emit_all(&mut self, events: Vec<Event>) -> Result<()> {
        let mut failure = None;
        for event in events {
            if failure.is_none()
                && let Some(log) = self.log.as_mut()
                && let Err(err) = log.append(&event)
            {
                tracing::warn!(error = %err, "event log append failed");
                failure = Some(err);
            }
            self.bus.publish(event);
        }
        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn gear(&self, participant: &Participant) -> EquipmentBonus {
        participant.loadout.total(self.equipment.as_ref())
    }

    fn participant(&self, entity: EntityId) -> Result<&Participant> {
        self.participants
            .get(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))
    }

    fn participant_mut(&mut self, entity: EntityId) -> Result<&mut Participant> {
        self.participants
            .get_mut(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))
    }

    fn is_alive(&self, entity: EntityId) -> bool {
        self.combatant(entity).is_some_and(CombatantState::is_alive)
    }

    fn ensure_absent(&self, entity: EntityId) -> Result<()> {
        if self.participants.contains_key(&entity) {
            return Err(RuntimeError::DuplicateEntity(entity));
        }
        Ok(())
    }

    fn ensure_targetable(&self, entity: EntityId) -> Result<()> {
        if self.participant(entity)?.combatant.is_dead() {
            return Err(RuntimeError::TargetDefeated(entity));
        }
        Ok(())
    }
}
