//! Reward aggregation.

use serde::{Deserialize, Serialize};

use game_rules::{Command, ItemId, SkillId};

use super::definition::Reward;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrant {
    pub id: ItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGrant {
    pub id: SkillId,
    pub points: u32,
}

/// All rewards of a quest reduced into one value, keyed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardBundle {
    pub experience: u64,
    pub gold: u64,
    pub items: Vec<ItemGrant>,
    pub skills: Vec<SkillGrant>,
    pub other: Vec<Reward>,
}

impl RewardBundle {
    /// Experience and gold are summed; items, skills and unrecognised rewards
    /// are appended in declaration order so repeated kinds are all kept.
    pub fn aggregate(rewards: &[Reward]) -> Self {
        rewards.iter().fold(Self::default(), |mut bundle, reward| {
            match reward {
                Reward::Experience(amount) => {
                    bundle.experience = bundle.experience.saturating_add(*amount)
                }
                Reward::Gold(amount) => bundle.gold = bundle.gold.saturating_add(*amount),
                Reward::Item { item, quantity } => bundle.items.push(ItemGrant {
                    id: item.clone(),
                    quantity: *quantity,
                }),
                Reward::Skill { skill, points } => bundle.skills.push(SkillGrant {
                    id: skill.clone(),
                    points: *points,
                }),
                Reward::Other { .. } => bundle.other.push(reward.clone()),
            }
            bundle
        })
    }

    /// True when nothing would be granted.
    pub fn is_empty(&self) -> bool {
        self.experience == 0
            && self.gold == 0
            && self.items.is_empty()
            && self.skills.is_empty()
            && self.other.is_empty()
    }

    /// Commands granting the bundle. Zero experience or gold emits nothing.
    pub fn to_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();

        if self.experience > 0 {
            commands.push(Command::AddExperience {
                amount: self.experience,
            });
        }
        if self.gold > 0 {
            commands.push(Command::AddGold { amount: self.gold });
        }
        commands.extend(self.items.iter().map(|grant| Command::InventoryAddItem {
            item_id: grant.id.clone(),
            quantity: grant.quantity,
        }));
        commands.extend(self.skills.iter().map(|grant| Command::AddSkillPoints {
            skill_id: grant.id.clone(),
            points: grant.points,
        }));
        commands.extend(self.other.iter().filter_map(|reward| match reward {
            Reward::Other { kind, value } => Some(Command::GrantReward {
                kind: kind.clone(),
                value: value.clone(),
            }),
            _ => None,
        }));

        commands
    }
}
