//! Action dispatch - authored effects translated into outbound [`Command`]s.
//!
//! Every known action kind maps to exactly one command. Kinds this build does
//! not know deserialize as [`Action::Unknown`] and are skipped.

mod command;

pub use command::*;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{FactionId, ItemId, LocationId, NpcId, ObjectiveId, QuestId};

fn one() -> u32 {
    1
}

/// A declarative effect attached to dialogue nodes, options or quests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Action {
    StartQuest {
        quest_id: QuestId,
    },
    UpdateQuest {
        quest_id: QuestId,
        objective_id: ObjectiveId,
        #[serde(default = "one")]
        amount: u32,
    },
    GiveItem {
        item_id: ItemId,
        #[serde(default = "one")]
        quantity: u32,
    },
    TakeItem {
        item_id: ItemId,
        #[serde(default = "one")]
        quantity: u32,
    },
    ModifyReputation {
        faction: FactionId,
        amount: i64,
    },
    /// Without an explicit NPC the conversation partner is used.
    ModifyRelationship {
        #[serde(default)]
        npc_id: Option<NpcId>,
        amount: i64,
    },
    SetFlag {
        flag: String,
        #[serde(default)]
        npc_id: Option<NpcId>,
    },
    UnlockNpc {
        npc_id: NpcId,
    },
    UnlockLocation {
        location_id: LocationId,
    },
    RewardExperience {
        amount: u64,
    },
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Content-facing `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::StartQuest { .. } => "start_quest",
            Action::UpdateQuest { .. } => "update_quest",
            Action::GiveItem { .. } => "give_item",
            Action::TakeItem { .. } => "take_item",
            Action::ModifyReputation { .. } => "modify_reputation",
            Action::ModifyRelationship { .. } => "modify_relationship",
            Action::SetFlag { .. } => "set_flag",
            Action::UnlockNpc { .. } => "unlock_npc",
            Action::UnlockLocation { .. } => "unlock_location",
            Action::RewardExperience { .. } => "reward_experience",
            Action::Unknown => "unknown",
        }
    }

    /// True for action types this build does not know.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Action::Unknown)
    }
}

/// Where actions are being executed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    /// NPC the player is talking to, if any.
    pub npc_id: Option<NpcId>,
}

impl ActionContext {
    /// Context with no conversation partner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a conversation with `npc_id`.
    pub fn with_npc(npc_id: impl Into<NpcId>) -> Self {
        Self {
            npc_id: Some(npc_id.into()),
        }
    }
}

/// Translates actions into commands through a fixed dispatch table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionExecutor;

impl ActionExecutor {
    /// The stateless executor.
    pub fn new() -> Self {
        Self
    }

    /// Execute actions in list order, skipping any that produce no command.
    pub fn execute(&self, actions: &[Action], context: &ActionContext) -> Vec<Command> {
        actions
            .iter()
            .filter_map(|action| self.dispatch(action, context))
            .collect()
    }

    /// Command for a single action.
    pub fn dispatch(&self, action: &Action, context: &ActionContext) -> Option<Command> {
        let command = match action {
            Action::StartQuest { quest_id } => Command::StartQuest {
                quest_id: quest_id.clone(),
            },
            Action::UpdateQuest {
                quest_id,
                objective_id,
                amount,
            } => Command::UpdateQuestProgress {
                quest_id: quest_id.clone(),
                objective_id: objective_id.clone(),
                amount: *amount,
            },
            Action::GiveItem { item_id, quantity } => Command::InventoryAddItem {
                item_id: item_id.clone(),
                quantity: *quantity,
            },
            Action::TakeItem { item_id, quantity } => Command::InventoryRemoveItem {
                item_id: item_id.clone(),
                quantity: *quantity,
            },
            Action::ModifyReputation { faction, amount } => Command::UpdateReputation {
                faction: faction.clone(),
                amount: *amount,
            },
            Action::ModifyRelationship { npc_id, amount } => {
                let Some(npc_id) = npc_id.as_ref().or(context.npc_id.as_ref()) else {
                    debug!("modify_relationship without an npc skipped");
                    return None;
                };
                Command::UpdateNpcRelationship {
                    npc_id: npc_id.clone(),
                    amount: *amount,
                }
            }
            Action::SetFlag { flag, npc_id } => Command::AddNpcStoryFlag {
                flag: flag.clone(),
                npc_id: npc_id.clone().or_else(|| context.npc_id.clone()),
            },
            Action::UnlockNpc { npc_id } => Command::UnlockNpc {
                npc_id: npc_id.clone(),
            },
            Action::UnlockLocation { location_id } => Command::UnlockLocation {
                location_id: location_id.clone(),
            },
            Action::RewardExperience { amount } => Command::AddExperience { amount: *amount },
            Action::Unknown => {
                debug!("unknown action kind skipped");
                return None;
            }
        };
        Some(command)
    }
}
