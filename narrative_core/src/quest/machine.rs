//! Quest state machine.
//!
//! ```text
//! not_started --accept--> active --complete--> completed
//!      ^                    |
//!      +------abandon-------+
//! ```
//!
//! Every transition takes its inputs by reference and returns new values.
//! A transition that is not allowed from the current status returns its
//! inputs unchanged.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use game_rules::{Command, GameState, ObjectiveId, QuestStatus};

use super::definition::Quest;
use super::events::{ObjectiveUpdate, QuestEvent};
use super::progress::QuestProgress;
use super::rewards::RewardBundle;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;

/// True when every requirement holds. A quest without requirements is always available.
pub fn check_requirements(quest: &Quest, state: &GameState) -> bool {
    quest.requirements.iter().all(|requirement| requirement.is_met(state))
}

/// An accepted quest and its progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuest {
    pub quest: Quest,
    pub progress: QuestProgress,
}

impl ActiveQuest {
    /// Pair a quest with its progress record.
    pub fn new(quest: Quest, progress: QuestProgress) -> Self {
        Self { quest, progress }
    }
}

/// Result of [`QuestStateMachine::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub quest: Quest,
    pub progress: Option<QuestProgress>,
    /// `None` when the quest could not be completed.
    pub rewards: Option<RewardBundle>,
}

impl Completion {
    /// True when the quest actually moved to completed.
    pub fn is_completed(&self) -> bool {
        self.rewards.is_some()
    }

    /// Reward commands for the host store; empty when completion was rejected.
    pub fn commands(&self) -> Vec<Command> {
        self.rewards
            .as_ref()
            .map(RewardBundle::to_commands)
            .unwrap_or_default()
    }
}

/// Result of [`QuestStateMachine::process_event`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The active quests after the event, in input order.
    pub quests: Vec<ActiveQuest>,
    /// Objectives whose progress changed.
    pub updates: Vec<ObjectiveUpdate>,
}

impl EventOutcome {
    /// True when no objective moved.
    pub fn is_unchanged(&self) -> bool {
        self.updates.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct QuestStateMachine {
    clock: Arc<dyn Clock>,
    default_event_amount: u32,
}

impl Default for QuestStateMachine {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl QuestStateMachine {
    /// Machine with default settings.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(clock, &EngineConfig::default())
    }

    /// Machine using the event settings from `config`.
    pub fn with_config(clock: Arc<dyn Clock>, config: &EngineConfig) -> Self {
        Self {
            clock,
            default_event_amount: config.default_event_amount,
        }
    }

    /// Every requirement holds; none means always acceptable.
    pub fn check_requirements(&self, quest: &Quest, state: &GameState) -> bool {
        check_requirements(quest, state)
    }

    /// Start a quest. Requirements are the caller's responsibility and are not re-checked.
    ///
    /// Returns the unchanged quest and no progress unless the quest is `not_started`.
    pub fn accept(&self, quest: &Quest) -> (Quest, Option<QuestProgress>) {
        if quest.status != QuestStatus::NotStarted {
            debug!(quest = %quest.id, status = quest.status.as_str(), "accept ignored");
            return (quest.clone(), None);
        }

        let accepted = quest.reset_objectives().with_status(QuestStatus::Active);
        info!(quest = %quest.id, "quest accepted");
        (accepted, Some(QuestProgress::new(self.clock.now())))
    }

    /// Drop an active quest back to `not_started`. Progress is not kept;
    /// the caller discards its `QuestProgress`.
    pub fn abandon(&self, quest: &Quest) -> Quest {
        if quest.status != QuestStatus::Active {
            debug!(quest = %quest.id, status = quest.status.as_str(), "abandon ignored");
            return quest.clone();
        }

        info!(quest = %quest.id, "quest abandoned");
        quest.reset_objectives().with_status(QuestStatus::NotStarted)
    }

    /// Add `amount` to an objective, clamped to its `required` count.
    ///
    /// Progress never decreases. If nothing changes (unknown objective,
    /// inactive quest, objective already at `required`, zero amount) the
    /// inputs are returned unchanged.
    pub fn update_progress(
        &self,
        quest: &Quest,
        progress: &QuestProgress,
        objective_id: &str,
        amount: u32,
    ) -> (Quest, QuestProgress) {
        if quest.status != QuestStatus::Active {
            debug!(quest = %quest.id, "progress ignored for inactive quest");
            return (quest.clone(), progress.clone());
        }

        let Some(index) = quest
            .objectives
            .iter()
            .position(|o| o.id.as_str() == objective_id)
        else {
            debug!(quest = %quest.id, objective = objective_id, "unknown objective");
            return (quest.clone(), progress.clone());
        };

        let objective = &quest.objectives[index];
        let current = objective.progress().max(progress.get(objective_id));
        let next = current.saturating_add(amount).min(objective.required());
        if next == current {
            return (quest.clone(), progress.clone());
        }

        let mut updated = quest.clone();
        updated.objectives[index] = objective.with_progress(next);
        let progress = progress.with_objective(objective.id.clone(), next);
        (updated, progress)
    }

    /// Active, tracked, and every objective's stored progress has reached `required`.
    pub fn can_complete(&self, quest: &Quest, progress: Option<&QuestProgress>) -> bool {
        if quest.status != QuestStatus::Active {
            return false;
        }
        let Some(progress) = progress else {
            return false;
        };
        quest
            .objectives
            .iter()
            .all(|o| progress.get(o.id.as_str()) >= o.required())
    }

    /// Complete the quest and aggregate its rewards, or change nothing at all.
    pub fn complete(&self, quest: &Quest, progress: Option<&QuestProgress>) -> Completion {
        if !self.can_complete(quest, progress) {
            debug!(quest = %quest.id, "completion rejected");
            return Completion {
                quest: quest.clone(),
                progress: progress.cloned(),
                rewards: None,
            };
        }

        let finalized = progress.map(|p| QuestProgress {
            completed_at: Some(self.clock.now()),
            ..p.clone()
        });
        let rewards = RewardBundle::aggregate(&quest.rewards);
        info!(quest = %quest.id, experience = rewards.experience, gold = rewards.gold, "quest completed");

        Completion {
            quest: quest.with_status(QuestStatus::Completed),
            progress: finalized,
            rewards: Some(rewards),
        }
    }

    /// Advance every matching incomplete objective of the active quests.
    ///
    /// Matches are collected against the quests as passed in, then applied
    /// together, so an event never observes its own effects.
    pub fn process_event(&self, active_quests: &[ActiveQuest], event: &QuestEvent) -> EventOutcome {
        let amount = event.amount().unwrap_or(self.default_event_amount);
        let expected = event.objective_type();
        let target = event.target();

        let matches: Vec<(usize, ObjectiveId)> = active_quests
            .iter()
            .enumerate()
            .filter(|(_, active)| active.quest.status == QuestStatus::Active)
            .flat_map(|(index, active)| {
                active
                    .quest
                    .objectives
                    .iter()
                    .filter(|o| !o.is_completed() && o.objective_type == expected && o.target == target)
                    .map(move |o| (index, o.id.clone()))
            })
            .collect();

        let mut quests = active_quests.to_vec();
        let mut changed: Vec<(usize, ObjectiveUpdate)> = Vec::new();

        for (index, objective_id) in matches {
            let entry = &quests[index];
            let previous = entry
                .quest
                .objective(objective_id.as_str())
                .map(|o| o.progress())
                .unwrap_or(0);
            let (quest, progress) =
                self.update_progress(&entry.quest, &entry.progress, objective_id.as_str(), amount);

            if let Some(objective) = quest.objective(objective_id.as_str()) {
                if objective.progress() != previous {
                    changed.push((
                        index,
                        ObjectiveUpdate {
                            quest_id: quest.id.clone(),
                            objective_id: objective_id.clone(),
                            previous,
                            progress: objective.progress(),
                            required: objective.required(),
                            objective_completed: objective.is_completed(),
                            quest_ready: false,
                        },
                    ));
                }
            }
            quests[index] = ActiveQuest::new(quest, progress);
        }

        let updates = changed
            .into_iter()
            .map(|(index, mut update)| {
                let active = &quests[index];
                update.quest_ready = self.can_complete(&active.quest, Some(&active.progress));
                update
            })
            .collect::<Vec<_>>();

        debug!(
            event = event.event_type(),
            target = target,
            updates = updates.len(),
            "quest event processed"
        );

        EventOutcome { quests, updates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::quest::definition::{ObjectiveType, QuestObjective, Requirement, Reward};
    use chrono::{TimeZone, Utc};
    use game_rules::Scalar;

    fn machine() -> QuestStateMachine {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        QuestStateMachine::new(Arc::new(FixedClock::new(at)))
    }

    fn wolf_hunt() -> Quest {
        Quest::new("wolf_hunt", "Wolf Hunt")
            .with_objective(QuestObjective::new("wolves", ObjectiveType::Kill, "wolf", 3))
            .with_reward(Reward::Experience(50))
            .with_reward(Reward::Gold(10))
    }

    fn herbs_and_wolves() -> Quest {
        Quest::new("errands", "Errands")
            .with_objective(QuestObjective::new("herbs", ObjectiveType::Collect, "herb", 2))
            .with_objective(QuestObjective::new("wolves", ObjectiveType::Kill, "wolf", 1))
    }

    fn accepted(machine: &QuestStateMachine, quest: Quest) -> ActiveQuest {
        let (quest, progress) = machine.accept(&quest);
        ActiveQuest::new(quest, progress.unwrap())
    }

    fn assert_objective_invariants(quest: &Quest) {
        for objective in &quest.objectives {
            assert!(objective.progress() <= objective.required());
            assert_eq!(objective.is_completed(), objective.progress() >= objective.required());
        }
    }

    #[test]
    fn test_find_herbs_requirements_block_acceptance() {
        let quest = Quest::new("find_herbs", "Find Herbs").with_requirement(Requirement::Item {
            item: "herb".into(),
            quantity: 1,
        });
        let state = GameState::new();

        assert!(!machine().check_requirements(&quest, &state));
        assert!(machine().check_requirements(&quest, &state.with_item("herb", 1)));
    }

    #[test]
    fn test_empty_requirements_always_met() {
        assert!(check_requirements(&wolf_hunt(), &GameState::new()));
    }

    #[test]
    fn test_accept_creates_fresh_progress() {
        let machine = machine();
        let (quest, progress) = machine.accept(&wolf_hunt());

        assert_eq!(quest.status, QuestStatus::Active);
        let progress = progress.unwrap();
        assert!(progress.objective_progress.is_empty());
        assert_eq!(progress.started_at, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        assert!(progress.completed_at.is_none());
    }

    #[test]
    fn test_accept_from_wrong_status_is_noop() {
        let machine = machine();
        for status in [QuestStatus::Active, QuestStatus::Completed, QuestStatus::Failed] {
            let quest = wolf_hunt().with_status(status);
            let (after, progress) = machine.accept(&quest);
            assert_eq!(after, quest);
            assert!(progress.is_none());
        }
    }

    #[test]
    fn test_abandon_discards_progress() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());
        let (quest, _) = machine.update_progress(&active.quest, &active.progress, "wolves", 2);

        let abandoned = machine.abandon(&quest);
        assert_eq!(abandoned.status, QuestStatus::NotStarted);
        assert_eq!(abandoned.objective("wolves").unwrap().progress(), 0);

        let (resumed, progress) = machine.accept(&abandoned);
        assert_eq!(resumed.status, QuestStatus::Active);
        assert_eq!(progress.unwrap().get("wolves"), 0);
    }

    #[test]
    fn test_abandon_requires_active() {
        let quest = wolf_hunt();
        assert_eq!(machine().abandon(&quest), quest);

        let completed = wolf_hunt().with_status(QuestStatus::Completed);
        assert_eq!(machine().abandon(&completed), completed);
    }

    #[test]
    fn test_update_progress_clamps_and_completes() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());

        let (quest, progress) = machine.update_progress(&active.quest, &active.progress, "wolves", 2);
        assert_eq!(quest.objective("wolves").unwrap().progress(), 2);
        assert_eq!(progress.get("wolves"), 2);
        assert!(!quest.objective("wolves").unwrap().is_completed());

        let (quest, progress) = machine.update_progress(&quest, &progress, "wolves", 5);
        assert_eq!(quest.objective("wolves").unwrap().progress(), 3);
        assert_eq!(progress.get("wolves"), 3);
        assert!(quest.objective("wolves").unwrap().is_completed());
        assert_objective_invariants(&quest);
    }

    #[test]
    fn test_update_progress_idempotent_when_maxed() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());
        let (quest, progress) = machine.update_progress(&active.quest, &active.progress, "wolves", 3);

        let (again, again_progress) = machine.update_progress(&quest, &progress, "wolves", 1);
        assert_eq!(again, quest);
        assert_eq!(again_progress, progress);
    }

    #[test]
    fn test_update_progress_unknown_objective_or_inactive() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());

        let (quest, progress) = machine.update_progress(&active.quest, &active.progress, "bears", 1);
        assert_eq!(quest, active.quest);
        assert_eq!(progress, active.progress);

        let inactive = wolf_hunt();
        let (quest, _) = machine.update_progress(&inactive, &active.progress, "wolves", 1);
        assert_eq!(quest, inactive);
    }

    #[test]
    fn test_can_complete() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());

        assert!(!machine.can_complete(&active.quest, Some(&active.progress)));
        assert!(!machine.can_complete(&active.quest, None));

        let (quest, progress) = machine.update_progress(&active.quest, &active.progress, "wolves", 3);
        assert!(machine.can_complete(&quest, Some(&progress)));
        assert!(!machine.can_complete(&quest.with_status(QuestStatus::Failed), Some(&progress)));
    }

    #[test]
    fn test_complete_rejected_changes_nothing() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());

        let completion = machine.complete(&active.quest, Some(&active.progress));
        assert!(!completion.is_completed());
        assert!(completion.rewards.is_none());
        assert_eq!(completion.quest, active.quest);
        assert_eq!(completion.progress, Some(active.progress));
        assert!(completion.commands().is_empty());
    }

    #[test]
    fn test_complete_stamps_and_rewards() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());
        let (quest, progress) = machine.update_progress(&active.quest, &active.progress, "wolves", 3);

        let completion = machine.complete(&quest, Some(&progress));
        assert!(completion.is_completed());
        assert_eq!(completion.quest.status, QuestStatus::Completed);
        assert!(completion.progress.as_ref().unwrap().completed_at.is_some());

        let rewards = completion.rewards.clone().unwrap();
        assert_eq!(rewards.experience, 50);
        assert_eq!(rewards.gold, 10);
        assert_eq!(
            completion.commands(),
            vec![Command::AddExperience { amount: 50 }, Command::AddGold { amount: 10 }]
        );
    }

    #[test]
    fn test_complete_aggregates_affinity_into_other() {
        let machine = machine();
        let quest = Quest::new("tea", "Tea with Elara")
            .with_objective(QuestObjective::new("visit", ObjectiveType::Visit, "cottage", 1))
            .with_reward(Reward::Experience(10))
            .with_reward(Reward::Other {
                kind: "relationship".to_string(),
                value: Some(Scalar::from("elara")),
            });
        let active = accepted(&machine, quest);
        let (quest, progress) = machine.update_progress(&active.quest, &active.progress, "visit", 1);

        let rewards = machine.complete(&quest, Some(&progress)).rewards.unwrap();
        assert_eq!(rewards.experience, 10);
        assert_eq!(rewards.other.len(), 1);
    }

    #[test]
    fn test_wolf_kills_drive_progress() {
        let machine = machine();
        let mut quests = vec![accepted(&machine, wolf_hunt())];
        let event = QuestEvent::enemy_defeated("wolf");

        for expected in 1..=3 {
            let outcome = machine.process_event(&quests, &event);
            assert_eq!(outcome.updates.len(), 1);
            assert_eq!(outcome.updates[0].progress, expected);
            quests = outcome.quests;
        }

        let objective = quests[0].quest.objective("wolves").unwrap();
        assert_eq!(objective.progress(), 3);
        assert!(objective.is_completed());

        let outcome = machine.process_event(&quests, &event);
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.quests, quests);
    }

    #[test]
    fn test_event_reports_completion_flags() {
        let machine = machine();
        let quests = vec![accepted(&machine, herbs_and_wolves())];

        let outcome = machine.process_event(&quests, &QuestEvent::item_collected("herb", 2));
        assert_eq!(outcome.updates.len(), 1);
        assert!(outcome.updates[0].objective_completed);
        assert!(!outcome.updates[0].quest_ready);

        let outcome = machine.process_event(&outcome.quests, &QuestEvent::enemy_defeated("wolf"));
        assert!(outcome.updates[0].quest_ready);
    }

    #[test]
    fn test_event_updates_every_matching_quest() {
        let machine = machine();
        let quests = vec![
            accepted(&machine, wolf_hunt()),
            accepted(&machine, herbs_and_wolves()),
            accepted(&machine, Quest::new("other", "Other").with_objective(
                QuestObjective::new("bears", ObjectiveType::Kill, "bear", 1),
            )),
        ];

        let outcome = machine.process_event(&quests, &QuestEvent::enemy_defeated("wolf"));
        assert_eq!(outcome.updates.len(), 2);
        assert_eq!(outcome.quests[0].progress.get("wolves"), 1);
        assert_eq!(outcome.quests[1].progress.get("wolves"), 1);
        assert_eq!(outcome.quests[2], quests[2]);
    }

    #[test]
    fn test_event_amount_is_clamped() {
        let machine = machine();
        let quests = vec![accepted(&machine, herbs_and_wolves())];

        let outcome = machine.process_event(&quests, &QuestEvent::item_collected("herb", 10));
        assert_eq!(outcome.quests[0].progress.get("herbs"), 2);
        assert_objective_invariants(&outcome.quests[0].quest);
    }

    #[test]
    fn test_event_ignores_inactive_quests() {
        let machine = machine();
        let active = accepted(&machine, wolf_hunt());
        let failed = ActiveQuest::new(active.quest.with_status(QuestStatus::Failed), active.progress);

        let outcome = machine.process_event(&[failed.clone()], &QuestEvent::enemy_defeated("wolf"));
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.quests, vec![failed]);
    }

    #[test]
    fn test_unmatched_events_are_idempotent() {
        let machine = machine();
        let quests = vec![accepted(&machine, wolf_hunt()), accepted(&machine, herbs_and_wolves())];
        let events = [
            QuestEvent::enemy_defeated("dragon"),
            QuestEvent::location_visited("mill"),
            QuestEvent::interaction("well"),
        ];

        let run = |start: &[ActiveQuest]| {
            events
                .iter()
                .fold(start.to_vec(), |acc, event| machine.process_event(&acc, event).quests)
        };

        let once = run(&quests);
        let twice = run(&once);
        assert_eq!(once, quests);
        assert_eq!(twice, quests);
    }

    #[test]
    fn test_default_event_amount_from_config() {
        let config = EngineConfig {
            default_event_amount: 2,
            ..EngineConfig::default()
        };
        let machine = QuestStateMachine::with_config(Arc::new(SystemClock), &config);
        let quests = vec![accepted(&machine, wolf_hunt())];

        let outcome = machine.process_event(&quests, &QuestEvent::enemy_defeated("wolf"));
        assert_eq!(outcome.quests[0].progress.get("wolves"), 2);
    }

    #[test]
    fn test_status_and_progress_round_trip() {
        let machine = machine();
        let active = accepted(&machine, herbs_and_wolves());
        let outcome = machine.process_event(&[active], &QuestEvent::item_collected("herb", 2));
        let saved = &outcome.quests[0];

        let json = serde_json::to_string(saved).unwrap();
        let loaded: ActiveQuest = serde_json::from_str(&json).unwrap();
        assert_eq!(&loaded, saved);

        let definition = herbs_and_wolves();
        let restored = definition.restore(loaded.quest.status, &loaded.progress);
        assert_eq!(restored, saved.quest);
        for (original, reloaded) in saved.quest.objectives.iter().zip(&restored.objectives) {
            assert_eq!(original.is_completed(), reloaded.is_completed());
        }
    }
}
