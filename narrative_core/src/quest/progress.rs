//! Quest progress tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use game_rules::ObjectiveId;

/// Progress record created when a quest is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestProgress {
    /// Objective id -> progress. Objectives without an entry have made no progress.
    #[serde(default)]
    pub objective_progress: BTreeMap<ObjectiveId, u32>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuestProgress {
    /// Empty progress started at `started_at`.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            objective_progress: BTreeMap::new(),
            started_at,
            completed_at: None,
        }
    }

    /// Progress on one objective, 0 if absent.
    pub fn get(&self, objective_id: &str) -> u32 {
        self.objective_progress
            .get(objective_id)
            .copied()
            .unwrap_or(0)
    }

    /// Copy with one objective's progress replaced.
    pub fn with_objective(&self, objective_id: ObjectiveId, progress: u32) -> Self {
        let mut next = self.clone();
        next.objective_progress.insert(objective_id, progress);
        next
    }

    /// True once completion was stamped.
    pub fn is_finalized(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Seconds between start and completion, or until `now` while running.
    pub fn duration_secs(&self, now: DateTime<Utc>) -> i64 {
        let end = self.completed_at.unwrap_or(now);
        (end - self.started_at).num_seconds()
    }
}
