//! Game state snapshot - the read-only view of the world that rules are evaluated against.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::entities::{
    FactionId, InventoryComponent, ItemId, NpcId, QuestId, SkillId, SkillsComponent,
    StatsComponent,
};
use crate::mechanics::RelationshipTier;

/// Lifecycle status of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    #[default]
    NotStarted,
    Active,
    Completed,
    Failed,
}

impl QuestStatus {
    /// Status name as written in content.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::NotStarted => "not_started",
            QuestStatus::Active => "active",
            QuestStatus::Completed => "completed",
            QuestStatus::Failed => "failed",
        }
    }

    /// Parse a content status name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(QuestStatus::NotStarted),
            "active" => Some(QuestStatus::Active),
            "completed" => Some(QuestStatus::Completed),
            "failed" => Some(QuestStatus::Failed),
            _ => None,
        }
    }
}

/// Coarse period of the day used by dialogue and quest conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Period containing the given hour (0-23).
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Band name as written in content.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    /// Parse a content band name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "morning" => Some(TimeOfDay::Morning),
            "afternoon" => Some(TimeOfDay::Afternoon),
            "evening" => Some(TimeOfDay::Evening),
            "night" => Some(TimeOfDay::Night),
            _ => None,
        }
    }
}

/// In-game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldTime {
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
}

impl Default for WorldTime {
    fn default() -> Self {
        Self {
            day: 1,
            hour: 8,
            minute: 0,
        }
    }
}

impl WorldTime {
    /// Day, hour and minute of the world clock.
    pub fn new(day: u32, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Band the hour falls into.
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_hour(self.hour)
    }
}

/// Snapshot of everything conditions and requirements can observe.
///
/// The engine only ever reads a `GameState`; changes are requested through
/// emitted commands and applied by the host store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameState {
    #[serde(default)]
    pub stats: StatsComponent,

    #[serde(default)]
    pub inventory: InventoryComponent,

    #[serde(default)]
    pub skills: SkillsComponent,

    /// Quest status by quest id. Absent quests are not started.
    #[serde(default)]
    pub quests: HashMap<QuestId, QuestStatus>,

    /// NPC id -> relationship score.
    #[serde(default)]
    pub relationships: HashMap<NpcId, i64>,

    /// Faction id -> reputation score.
    #[serde(default)]
    pub reputations: HashMap<FactionId, i64>,

    /// Story flags that have been raised.
    #[serde(default)]
    pub flags: HashSet<String>,

    #[serde(default)]
    pub time: WorldTime,
}

impl GameState {
    /// Empty snapshot: level 1, nothing held, nothing started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Player level.
    pub fn level(&self) -> u32 {
        self.stats.level
    }

    /// Status of a quest, `not_started` if never seen.
    pub fn quest_status(&self, quest: &str) -> QuestStatus {
        self.quests.get(quest).copied().unwrap_or_default()
    }

    /// Quantity held, 0 if absent.
    pub fn item_quantity(&self, item: &str) -> u32 {
        self.inventory.quantity(item)
    }

    /// Named stat; `level` resolves to the player level.
    pub fn stat(&self, name: &str) -> i64 {
        self.stats.get(name)
    }

    /// Trained skill level, 0 if untrained.
    pub fn skill_level(&self, skill: &str) -> u32 {
        self.skills.level(skill)
    }

    /// Relationship score with an NPC, 0 if absent.
    pub fn relationship(&self, npc: &str) -> i64 {
        self.relationships.get(npc).copied().unwrap_or(0)
    }

    /// Faction reputation, 0 if absent.
    pub fn reputation(&self, faction: &str) -> i64 {
        self.reputations.get(faction).copied().unwrap_or(0)
    }

    /// True when the flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Current time band.
    pub fn time_of_day(&self) -> TimeOfDay {
        self.time.time_of_day()
    }

    /// Standing tier with an NPC derived from the relationship score.
    pub fn relationship_tier(&self, npc: &str) -> RelationshipTier {
        RelationshipTier::from_score(self.relationship(npc))
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.stats.level = level;
        self
    }

    pub fn with_stat(mut self, name: impl Into<String>, value: i64) -> Self {
        self.stats.values.insert(name.into(), value);
        self
    }

    pub fn with_item(mut self, item: impl Into<ItemId>, quantity: u32) -> Self {
        self.inventory.items.insert(item.into(), quantity);
        self
    }

    pub fn with_skill(mut self, skill: impl Into<SkillId>, level: u32) -> Self {
        self.skills.levels.insert(skill.into(), level);
        self
    }

    pub fn with_quest(mut self, quest: impl Into<QuestId>, status: QuestStatus) -> Self {
        self.quests.insert(quest.into(), status);
        self
    }

    pub fn with_relationship(mut self, npc: impl Into<NpcId>, score: i64) -> Self {
        self.relationships.insert(npc.into(), score);
        self
    }

    pub fn with_reputation(mut self, faction: impl Into<FactionId>, score: i64) -> Self {
        self.reputations.insert(faction.into(), score);
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn with_time(mut self, time: WorldTime) -> Self {
        self.time = time;
        self
    }
}
