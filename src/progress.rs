//! Per-character mission progress: the principal (story) and secondary
//! (side) state machines.
//!
//! Both share the same probabilistic discovery mechanism as loot, but they
//! advance differently on purpose: principal *progress* is probabilistic per
//! step, while secondary progress is deterministic and only its *discovery*
//! is probabilistic.

use crate::character::Character;
use crate::combat::{self, CombatCheck, CombatOutcome};
use crate::config::GameBalanceConfig;
use crate::enemy::{Enemy, EnemyId};
use crate::error::EngineError;
use crate::missions::{
    LocationId, MissionContext, MissionId, MissionReward, PrincipalMission, SecondaryMission,
    StepId,
};
use crate::rng::RandomSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Progress on a character's principal mission. Owned by exactly one
/// character; terminal once the boss is defeated (or the mission permanently
/// failed), after which any further advancement attempt is a protocol error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalProgress {
    pub mission_id: MissionId,
    pub completed_steps: HashSet<StepId>,
    pub boss_encountered: bool,
    pub boss_defeated: bool,
    pub failed: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalState {
    InProgress,
    AllStepsComplete,
    BossEncountered,
    Completed,
    Failed,
}

impl PrincipalProgress {
    pub fn start(mission_id: MissionId, now: DateTime<Utc>) -> Self {
        Self {
            mission_id,
            completed_steps: HashSet::new(),
            boss_encountered: false,
            boss_defeated: false,
            failed: false,
            started_at: now,
            completed_at: None,
        }
    }

    pub fn state(&self, mission: &PrincipalMission) -> PrincipalState {
        if self.boss_defeated {
            PrincipalState::Completed
        } else if self.failed {
            PrincipalState::Failed
        } else if self.boss_encountered {
            PrincipalState::BossEncountered
        } else if self.all_steps_complete(mission) {
            PrincipalState::AllStepsComplete
        } else {
            PrincipalState::InProgress
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.boss_defeated || self.failed
    }

    fn all_steps_complete(&self, mission: &PrincipalMission) -> bool {
        mission
            .steps
            .iter()
            .all(|step| self.completed_steps.contains(&step.id))
    }
}

/// What a single qualifying action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    StepDiscovered { step: StepId },
    BossEncountered { enemy: EnemyId },
}

/// Advances principal progress for one qualifying player action.
///
/// Every incomplete step whose location requirement matches rolls its own
/// independent discovery chance; already-completed steps are skipped. Once
/// all steps were complete before this action, the boss encounter chance is
/// rolled instead — but only when the boss requirements pre-check passes, so
/// an unmet pre-check consumes no roll.
pub fn record_action(
    progress: &mut PrincipalProgress,
    mission: &PrincipalMission,
    character: &Character,
    location: Option<LocationId>,
    config: &GameBalanceConfig,
    rng: &mut impl RandomSource,
) -> Result<Vec<ProgressEvent>, EngineError> {
    check_principal_pair(progress, mission)?;
    if progress.is_terminal() {
        return Err(EngineError::InvariantViolation(format!(
            "principal mission {} is terminal and cannot advance",
            mission.id
        )));
    }

    let mut events = Vec::new();
    let ready_for_boss = progress.all_steps_complete(mission);

    if !ready_for_boss {
        for step in &mission.steps {
            if progress.completed_steps.contains(&step.id) {
                continue;
            }
            let qualifies = step
                .required_location
                .map_or(true, |required| location == Some(required));
            if !qualifies {
                continue;
            }
            if rng.next_unit() < config.missions.step_discovery_chance {
                progress.completed_steps.insert(step.id);
                debug!(mission = mission.id, step = step.id, "step discovered");
                events.push(ProgressEvent::StepDiscovered { step: step.id });
            }
        }
    } else if !progress.boss_encountered && mission.boss.requirements.met_by(character) {
        if rng.next_unit() < config.missions.boss_encounter_chance {
            progress.boss_encountered = true;
            debug!(mission = mission.id, "boss encountered");
            events.push(ProgressEvent::BossEncountered {
                enemy: mission.boss.enemy_id,
            });
        }
    }

    Ok(events)
}

/// Outcome of a principal boss battle. Reward and lore are released exactly
/// once, at the completing resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossResolution {
    pub outcome: CombatOutcome,
    pub reward: Option<MissionReward>,
    pub lore: Option<String>,
}

/// Resolves the boss battle of a mission currently in `BossEncountered`.
///
/// A win completes the mission terminally. A loss (death or flee) returns it
/// to `AllStepsComplete` when the boss config allows retries, otherwise the
/// mission is permanently failed.
pub fn resolve_boss<F>(
    progress: &mut PrincipalProgress,
    mission: &PrincipalMission,
    character: &Character,
    enemy: &Enemy,
    formula: F,
    config: &GameBalanceConfig,
    rng: &mut impl RandomSource,
    now: DateTime<Utc>,
) -> Result<BossResolution, EngineError>
where
    F: Fn(&Character, &Enemy) -> CombatCheck,
{
    check_principal_pair(progress, mission)?;
    if progress.state(mission) != PrincipalState::BossEncountered {
        return Err(EngineError::InvariantViolation(format!(
            "principal mission {} has no boss encounter to resolve",
            mission.id
        )));
    }

    let outcome = combat::resolve(character, enemy, formula, config, rng);
    match outcome {
        CombatOutcome::Win { .. } => {
            progress.boss_defeated = true;
            progress.completed_at = Some(now);
            debug!(mission = mission.id, "boss defeated, mission complete");
            Ok(BossResolution {
                outcome,
                reward: Some(mission.reward),
                lore: Some(mission.lore.clone()),
            })
        }
        CombatOutcome::Death { .. } | CombatOutcome::Flee => {
            if mission.boss.can_retry {
                progress.boss_encountered = false;
            } else {
                progress.failed = true;
            }
            Ok(BossResolution {
                outcome,
                reward: None,
                lore: None,
            })
        }
    }
}

fn check_principal_pair(
    progress: &PrincipalProgress,
    mission: &PrincipalMission,
) -> Result<(), EngineError> {
    if progress.mission_id != mission.id {
        return Err(EngineError::InvariantViolation(format!(
            "progress belongs to mission {}, not {}",
            progress.mission_id, mission.id
        )));
    }
    if let Some(&unknown) = progress
        .completed_steps
        .iter()
        .find(|&&step| mission.step(step).is_none())
    {
        return Err(EngineError::InvariantViolation(format!(
            "step {unknown} does not belong to mission {}",
            mission.id
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryStatus {
    Ongoing,
    Completed,
    Abandoned,
}

/// Progress on one secondary mission. A character may hold many of these
/// concurrently, each advancing independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryProgress {
    pub mission_id: MissionId,
    pub status: SecondaryStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SecondaryProgress {
    pub fn start(mission_id: MissionId, now: DateTime<Utc>) -> Self {
        Self {
            mission_id,
            status: SecondaryStatus::Ongoing,
            started_at: now,
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != SecondaryStatus::Ongoing
    }
}

/// Rolls discovery of a *new* secondary mission for one qualifying action.
///
/// Eligible missions are those the character has never started or has since
/// abandoned; ongoing and completed ones are excluded. An empty eligible
/// pool consumes no roll. On success one eligible mission is picked
/// uniformly and started as `Ongoing`.
pub fn discover_secondary(
    existing: &[SecondaryProgress],
    pool: &[SecondaryMission],
    config: &GameBalanceConfig,
    rng: &mut impl RandomSource,
    now: DateTime<Utc>,
) -> Option<SecondaryProgress> {
    let blocked: HashSet<MissionId> = existing
        .iter()
        .filter(|record| record.status != SecondaryStatus::Abandoned)
        .map(|record| record.mission_id)
        .collect();
    let eligible: Vec<&SecondaryMission> = pool
        .iter()
        .filter(|mission| !blocked.contains(&mission.id))
        .collect();
    if eligible.is_empty() {
        return None;
    }

    if rng.next_unit() >= config.missions.mission_discovery_chance {
        return None;
    }
    let pick = rng.next_in(0, eligible.len() as u32 - 1) as usize;
    let mission = eligible[pick];
    debug!(mission = mission.id, "secondary mission discovered");
    Some(SecondaryProgress::start(mission.id, now))
}

/// Released when a secondary mission completes. Equipment grants are two
/// independent Bernoulli trials, not mutually exclusive tiers; the driver
/// turns the flags into concrete items via the loot generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryCompletion {
    pub reward: MissionReward,
    pub grant_equipment: bool,
    pub grant_rare_equipment: bool,
}

/// Evaluates an ongoing secondary mission against the current context.
///
/// Completion is a deterministic function of the context — the moment the
/// win condition holds, the very next evaluation completes the mission with
/// no further discovery roll. Only the reward equipment flags are random.
pub fn evaluate_secondary(
    progress: &mut SecondaryProgress,
    mission: &SecondaryMission,
    context: &MissionContext,
    config: &GameBalanceConfig,
    rng: &mut impl RandomSource,
    now: DateTime<Utc>,
) -> Result<Option<SecondaryCompletion>, EngineError> {
    if progress.mission_id != mission.id {
        return Err(EngineError::InvariantViolation(format!(
            "progress belongs to mission {}, not {}",
            progress.mission_id, mission.id
        )));
    }
    if progress.is_terminal() {
        return Err(EngineError::InvariantViolation(format!(
            "secondary mission {} is already terminal",
            mission.id
        )));
    }

    if !mission.win_condition.is_met(context) {
        return Ok(None);
    }

    progress.status = SecondaryStatus::Completed;
    progress.completed_at = Some(now);
    let grant_equipment = rng.next_unit() < config.missions.equipment_reward_chance;
    let grant_rare_equipment = rng.next_unit() < config.missions.rare_equipment_reward_chance;
    debug!(
        mission = mission.id,
        grant_equipment, grant_rare_equipment, "secondary mission completed"
    );
    Ok(Some(SecondaryCompletion {
        reward: mission.reward,
        grant_equipment,
        grant_rare_equipment,
    }))
}

/// Marks an ongoing secondary mission abandoned (externally triggered).
pub fn abandon_secondary(progress: &mut SecondaryProgress) -> Result<(), EngineError> {
    if progress.is_terminal() {
        return Err(EngineError::InvariantViolation(format!(
            "secondary mission {} is already terminal",
            progress.mission_id
        )));
    }
    progress.status = SecondaryStatus::Abandoned;
    Ok(())
}
