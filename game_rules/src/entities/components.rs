//! Player components read by conditions and quest requirements.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ItemId, SkillId};

/// Stat name that resolves to the player's level.
pub const LEVEL_STAT: &str = "level";

/// Level and named numeric stats of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsComponent {
    pub level: u32,
    #[serde(default)]
    pub values: HashMap<String, i64>,
}

impl Default for StatsComponent {
    fn default() -> Self {
        Self {
            level: 1,
            values: HashMap::new(),
        }
    }
}

impl StatsComponent {
    /// Value of a named stat, 0 when absent. `"level"` falls back to the
    /// player level unless a stat of that name was recorded explicitly.
    pub fn get(&self, name: &str) -> i64 {
        match self.values.get(name) {
            Some(value) => *value,
            None if name == LEVEL_STAT => i64::from(self.level),
            None => 0,
        }
    }

    /// Builder: set one named stat.
    pub fn with_stat(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.insert(name.into(), value);
        self
    }
}

/// Items held by the player keyed by item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InventoryComponent {
    #[serde(default)]
    pub items: HashMap<ItemId, u32>,
}

impl InventoryComponent {
    /// Held quantity, 0 when the item is absent.
    pub fn quantity(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// True when at least one is held.
    pub fn has(&self, item: &str) -> bool {
        self.quantity(item) > 0
    }

    /// Builder: set an item quantity.
    pub fn with_item(mut self, item: impl Into<ItemId>, quantity: u32) -> Self {
        self.items.insert(item.into(), quantity);
        self
    }
}

/// Trained skill levels keyed by skill id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SkillsComponent {
    #[serde(default)]
    pub levels: HashMap<SkillId, u32>,
}

impl SkillsComponent {
    /// Trained level, 0 when untrained.
    pub fn level(&self, skill: &str) -> u32 {
        self.levels.get(skill).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_defaults_to_zero() {
        let stats = StatsComponent::default().with_stat("strength", 14);

        assert_eq!(stats.get("strength"), 14);
        assert_eq!(stats.get("wisdom"), 0);
    }

    #[test]
    fn test_level_stat_falls_back_to_level() {
        let mut stats = StatsComponent::default();
        stats.level = 7;
        assert_eq!(stats.get(LEVEL_STAT), 7);

        let stats = stats.with_stat(LEVEL_STAT, 3);
        assert_eq!(stats.get(LEVEL_STAT), 3);
    }

    #[test]
    fn test_inventory_quantity() {
        let inventory = InventoryComponent::default().with_item("herb", 2);

        assert_eq!(inventory.quantity("herb"), 2);
        assert!(inventory.has("herb"));
        assert_eq!(inventory.quantity("sword"), 0);
        assert!(!inventory.has("sword"));
    }
}
