//! Game events that advance quest objectives.

use serde::{Deserialize, Serialize};

use game_rules::{ItemId, LocationId, ObjectiveId, QuestId};

use super::definition::ObjectiveType;

/// A typed game event. `amount` defaults to the configured event amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum QuestEvent {
    EnemyDefeated {
        enemy_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<u32>,
    },
    ItemCollected {
        item_id: ItemId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<u32>,
    },
    Interaction {
        target_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<u32>,
    },
    LocationVisited {
        location_id: LocationId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<u32>,
    },
}

impl QuestEvent {
    /// One enemy of `enemy_type` defeated.
    pub fn enemy_defeated(enemy_type: impl Into<String>) -> Self {
        QuestEvent::EnemyDefeated {
            enemy_type: enemy_type.into(),
            amount: None,
        }
    }

    /// `amount` of an item picked up.
    pub fn item_collected(item_id: impl Into<ItemId>, amount: u32) -> Self {
        QuestEvent::ItemCollected {
            item_id: item_id.into(),
            amount: Some(amount),
        }
    }

    /// Player interacted with `target_id`.
    pub fn interaction(target_id: impl Into<String>) -> Self {
        QuestEvent::Interaction {
            target_id: target_id.into(),
            amount: None,
        }
    }

    /// Player entered a location.
    pub fn location_visited(location_id: impl Into<LocationId>) -> Self {
        QuestEvent::LocationVisited {
            location_id: location_id.into(),
            amount: None,
        }
    }

    /// The only objective type this event advances.
    pub fn objective_type(&self) -> ObjectiveType {
        match self {
            QuestEvent::EnemyDefeated { .. } => ObjectiveType::Kill,
            QuestEvent::ItemCollected { .. } => ObjectiveType::Collect,
            QuestEvent::Interaction { .. } => ObjectiveType::Interact,
            QuestEvent::LocationVisited { .. } => ObjectiveType::Visit,
        }
    }

    /// Value matched against an objective's `target`.
    pub fn target(&self) -> &str {
        match self {
            QuestEvent::EnemyDefeated { enemy_type, .. } => enemy_type,
            QuestEvent::ItemCollected { item_id, .. } => item_id.as_str(),
            QuestEvent::Interaction { target_id, .. } => target_id,
            QuestEvent::LocationVisited { location_id, .. } => location_id.as_str(),
        }
    }

    /// Explicit amount, if the event carried one.
    pub fn amount(&self) -> Option<u32> {
        match self {
            QuestEvent::EnemyDefeated { amount, .. }
            | QuestEvent::ItemCollected { amount, .. }
            | QuestEvent::Interaction { amount, .. }
            | QuestEvent::LocationVisited { amount, .. } => *amount,
        }
    }

    /// Event type as it appears on the wire (for logging).
    pub fn event_type(&self) -> &'static str {
        match self {
            QuestEvent::EnemyDefeated { .. } => "enemy_defeated",
            QuestEvent::ItemCollected { .. } => "item_collected",
            QuestEvent::Interaction { .. } => "interaction",
            QuestEvent::LocationVisited { .. } => "location_visited",
        }
    }
}

/// One objective that changed while processing an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveUpdate {
    pub quest_id: QuestId,
    pub objective_id: ObjectiveId,
    pub previous: u32,
    pub progress: u32,
    pub required: u32,
    /// The objective reached `required` with this event.
    pub objective_completed: bool,
    /// Every objective of the quest is now complete.
    pub quest_ready: bool,
}
