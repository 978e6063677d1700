//! Outbound commands - the only way the engine asks the host store to change state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conditions::Scalar;
use crate::entities::{FactionId, ItemId, LocationId, NpcId, ObjectiveId, QuestId, SkillId};

/// Why a dialogue history record was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryCategory {
    /// The player picked an option.
    Choice,
    /// The conversation moved to another node.
    Transition,
}

/// Dialogue history record as consumed by the host store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub npc_id: NpcId,
    pub dialogue_branch: String,
    pub timestamp: DateTime<Utc>,
    pub category: HistoryCategory,
}

/// A single state change request for the host store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    InventoryAddItem {
        item_id: ItemId,
        quantity: u32,
    },
    InventoryRemoveItem {
        item_id: ItemId,
        quantity: u32,
    },
    UpdateReputation {
        faction: FactionId,
        amount: i64,
    },
    UpdateNpcRelationship {
        npc_id: NpcId,
        amount: i64,
    },
    AddNpcStoryFlag {
        flag: String,
        npc_id: Option<NpcId>,
    },
    UnlockNpc {
        npc_id: NpcId,
    },
    UnlockLocation {
        location_id: LocationId,
    },
    AddExperience {
        amount: u64,
    },
    StartQuest {
        quest_id: QuestId,
    },
    UpdateQuestProgress {
        quest_id: QuestId,
        objective_id: ObjectiveId,
        amount: u32,
    },
    AddGold {
        amount: u64,
    },
    AddSkillPoints {
        skill_id: SkillId,
        points: u32,
    },
    /// Reward of a kind the engine does not interpret itself.
    GrantReward {
        kind: String,
        value: Option<Scalar>,
    },
    AddDialogueHistory(HistoryRecord),
}

impl Command {
    /// Wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::InventoryAddItem { .. } => "INVENTORY_ADD_ITEM",
            Command::InventoryRemoveItem { .. } => "INVENTORY_REMOVE_ITEM",
            Command::UpdateReputation { .. } => "UPDATE_REPUTATION",
            Command::UpdateNpcRelationship { .. } => "UPDATE_NPC_RELATIONSHIP",
            Command::AddNpcStoryFlag { .. } => "ADD_NPC_STORY_FLAG",
            Command::UnlockNpc { .. } => "UNLOCK_NPC",
            Command::UnlockLocation { .. } => "UNLOCK_LOCATION",
            Command::AddExperience { .. } => "ADD_EXPERIENCE",
            Command::StartQuest { .. } => "START_QUEST",
            Command::UpdateQuestProgress { .. } => "UPDATE_QUEST_PROGRESS",
            Command::AddGold { .. } => "ADD_GOLD",
            Command::AddSkillPoints { .. } => "ADD_SKILL_POINTS",
            Command::GrantReward { .. } => "GRANT_REWARD",
            Command::AddDialogueHistory(_) => "ADD_DIALOGUE_HISTORY",
        }
    }
}
