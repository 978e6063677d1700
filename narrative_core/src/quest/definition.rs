//! Quest content structures: objectives, requirements and rewards.

use serde::{Deserialize, Serialize};

use game_rules::{
    Comparison, Condition, GameState, ItemCheck, ItemId, NpcId, ObjectiveId, QuestId,
    QuestStatus, Scalar, SkillId, LEVEL_STAT,
};

use super::progress::QuestProgress;

fn one() -> u32 {
    1
}

/// How an objective is advanced. Each type listens to one game event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectiveType {
    /// Advanced by `enemy_defeated`.
    Kill,
    /// Advanced by `item_collected`.
    Collect,
    /// Advanced by `interaction`.
    Interact,
    /// Advanced by `location_visited`.
    Visit,
    /// Not driven by events; only explicit `update_quest` actions advance it.
    Other(String),
}

impl ObjectiveType {
    /// Type name as written in content.
    pub fn as_str(&self) -> &str {
        match self {
            ObjectiveType::Kill => "kill",
            ObjectiveType::Collect => "collect",
            ObjectiveType::Interact => "interact",
            ObjectiveType::Visit => "visit",
            ObjectiveType::Other(s) => s,
        }
    }
}

impl From<String> for ObjectiveType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "kill" => ObjectiveType::Kill,
            "collect" => ObjectiveType::Collect,
            "interact" => ObjectiveType::Interact,
            "visit" => ObjectiveType::Visit,
            _ => ObjectiveType::Other(value),
        }
    }
}

impl From<ObjectiveType> for String {
    fn from(value: ObjectiveType) -> Self {
        value.as_str().to_string()
    }
}

/// One measurable sub-goal of a quest.
///
/// `progress` never exceeds `required`, and `completed` is true exactly when
/// `progress` has reached `required`. Both are kept private so every
/// construction path goes through the clamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ObjectiveRecord", into = "ObjectiveRecord")]
pub struct QuestObjective {
    pub id: ObjectiveId,
    pub objective_type: ObjectiveType,
    pub target: String,
    pub description: String,
    required: u32,
    progress: u32,
    completed: bool,
}

impl QuestObjective {
    /// Objective with no progress. `required == 0` starts completed.
    pub fn new(
        id: impl Into<ObjectiveId>,
        objective_type: ObjectiveType,
        target: impl Into<String>,
        required: u32,
    ) -> Self {
        Self {
            id: id.into(),
            objective_type,
            target: target.into(),
            description: String::new(),
            required,
            progress: 0,
            completed: required == 0,
        }
    }

    /// Amount needed to complete.
    pub fn required(&self) -> u32 {
        self.required
    }

    /// Current progress, never above `required`.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// True once progress reaches `required`.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Copy with progress clamped into `[0, required]` and `completed` recomputed.
    pub fn with_progress(&self, progress: u32) -> Self {
        let progress = progress.min(self.required);
        Self {
            progress,
            completed: progress >= self.required,
            ..self.clone()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectiveRecord {
    id: ObjectiveId,
    #[serde(rename = "type")]
    objective_type: ObjectiveType,
    target: String,
    #[serde(default = "one")]
    required: u32,
    #[serde(default)]
    progress: u32,
    #[serde(default)]
    completed: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
}

impl From<ObjectiveRecord> for QuestObjective {
    fn from(record: ObjectiveRecord) -> Self {
        // The stored `completed` flag is derived, so it is recomputed rather than trusted.
        QuestObjective::new(record.id, record.objective_type, record.target, record.required)
            .with_description(record.description)
            .with_progress(record.progress)
    }
}

impl From<QuestObjective> for ObjectiveRecord {
    fn from(objective: QuestObjective) -> Self {
        Self {
            id: objective.id,
            objective_type: objective.objective_type,
            target: objective.target,
            required: objective.required,
            progress: objective.progress,
            completed: objective.completed,
            description: objective.description,
        }
    }
}

/// A precondition for accepting a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RequirementRecord", into = "RequirementRecord")]
pub enum Requirement {
    /// Player level at least `min`.
    Level { min: u32 },
    /// Another quest already completed.
    Quest { quest: QuestId },
    /// At least `quantity` of an item held.
    Item { item: ItemId, quantity: u32 },
    /// Skill trained to at least `level`.
    Skill { skill: SkillId, level: u32 },
    /// Requirement kind this build does not know. Never satisfied.
    Unknown { kind: String },
}

impl Requirement {
    /// Equivalent condition, for the kinds the condition vocabulary covers.
    pub fn to_condition(&self) -> Option<Condition> {
        match self {
            Requirement::Level { min } => Some(Condition::stat(
                LEVEL_STAT,
                Comparison::GreaterOrEqual,
                i64::from(*min),
            )),
            Requirement::Quest { quest } => {
                Some(Condition::quest(quest.clone(), QuestStatus::Completed))
            }
            Requirement::Item { item, quantity } => Some(Condition::item(
                item.clone(),
                ItemCheck::AtLeast(i64::from(*quantity)),
            )),
            Requirement::Skill { .. } | Requirement::Unknown { .. } => None,
        }
    }

    /// True when the snapshot satisfies this requirement.
    pub fn is_met(&self, state: &GameState) -> bool {
        match self {
            Requirement::Skill { skill, level } => state.skill_level(skill.as_str()) >= *level,
            Requirement::Unknown { .. } => false,
            _ => self
                .to_condition()
                .map(|condition| condition.is_met(state))
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RequirementRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Scalar>,
}

/// `default` when `value` is absent; `None` when present but not a count.
fn count(value: Option<&Scalar>, default: u32) -> Option<u32> {
    match value {
        None => Some(default),
        Some(value) => value.as_i64().and_then(|n| u32::try_from(n).ok()),
    }
}

impl RequirementRecord {
    fn resolve(&self) -> Option<Requirement> {
        let value = self.value.as_ref();
        let requirement = match self.kind.as_str() {
            "level" => Requirement::Level {
                min: count(value, 1)?,
            },
            "quest" => Requirement::Quest {
                quest: QuestId::new(self.target.clone()),
            },
            "item" => Requirement::Item {
                item: ItemId::new(self.target.clone()),
                quantity: count(value, 1)?,
            },
            "skill" => Requirement::Skill {
                skill: SkillId::new(self.target.clone()),
                level: count(value, 1)?,
            },
            _ => return None,
        };
        Some(requirement)
    }
}

impl From<RequirementRecord> for Requirement {
    fn from(record: RequirementRecord) -> Self {
        record
            .resolve()
            .unwrap_or(Requirement::Unknown { kind: record.kind })
    }
}

impl From<Requirement> for RequirementRecord {
    fn from(requirement: Requirement) -> Self {
        let number = |n: u32| Some(Scalar::Number(i64::from(n)));
        let (kind, target, value) = match requirement {
            Requirement::Level { min } => ("level".to_string(), String::new(), number(min)),
            Requirement::Quest { quest } => ("quest".to_string(), quest.to_string(), None),
            Requirement::Item { item, quantity } => {
                ("item".to_string(), item.to_string(), number(quantity))
            }
            Requirement::Skill { skill, level } => {
                ("skill".to_string(), skill.to_string(), number(level))
            }
            Requirement::Unknown { kind } => (kind, String::new(), None),
        };
        Self {
            kind,
            target,
            value,
        }
    }
}

/// An outcome granted when a quest completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RewardRecord", into = "RewardRecord")]
pub enum Reward {
    Experience(u64),
    Gold(u64),
    Item { item: ItemId, quantity: u32 },
    Skill { skill: SkillId, points: u32 },
    /// Anything the engine does not interpret, passed through to the host.
    Other { kind: String, value: Option<Scalar> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RewardRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantity: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    points: Option<Scalar>,
}

impl RewardRecord {
    fn amount(&self) -> Option<u64> {
        self.value
            .as_ref()
            .and_then(Scalar::as_i64)
            .and_then(|n| u64::try_from(n).ok())
    }

    fn id(&self) -> Option<String> {
        self.value.as_ref().and_then(Scalar::as_id)
    }

    fn resolve(&self) -> Option<Reward> {
        let reward = match self.kind.as_str() {
            "experience" => Reward::Experience(self.amount()?),
            "gold" => Reward::Gold(self.amount()?),
            "item" | "items" => Reward::Item {
                item: ItemId::new(self.id()?),
                quantity: count(self.quantity.as_ref(), 1)?,
            },
            "skill" | "skills" => Reward::Skill {
                skill: SkillId::new(self.id()?),
                points: count(self.points.as_ref(), 1)?,
            },
            _ => return None,
        };
        Some(reward)
    }
}

impl From<RewardRecord> for Reward {
    fn from(record: RewardRecord) -> Self {
        record.resolve().unwrap_or(Reward::Other {
            kind: record.kind,
            value: record.value,
        })
    }
}

impl From<Reward> for RewardRecord {
    fn from(reward: Reward) -> Self {
        let number = |n: u64| Scalar::Number(i64::try_from(n).unwrap_or(i64::MAX));
        match reward {
            Reward::Experience(amount) => Self {
                kind: "experience".to_string(),
                value: Some(number(amount)),
                quantity: None,
                points: None,
            },
            Reward::Gold(amount) => Self {
                kind: "gold".to_string(),
                value: Some(number(amount)),
                quantity: None,
                points: None,
            },
            Reward::Item { item, quantity } => Self {
                kind: "item".to_string(),
                value: Some(Scalar::Text(item.to_string())),
                quantity: Some(Scalar::Number(i64::from(quantity))),
                points: None,
            },
            Reward::Skill { skill, points } => Self {
                kind: "skill".to_string(),
                value: Some(Scalar::Text(skill.to_string())),
                quantity: None,
                points: Some(Scalar::Number(i64::from(points))),
            },
            Reward::Other { kind, value } => Self {
                kind,
                value,
                quantity: None,
                points: None,
            },
        }
    }
}

/// A quest definition together with its current status and objective progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// NPC offering the quest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giver: Option<NpcId>,
    #[serde(default)]
    pub status: QuestStatus,
    #[serde(default)]
    pub objectives: Vec<QuestObjective>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl Quest {
    /// Not-started quest with no objectives.
    pub fn new(id: impl Into<QuestId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            giver: None,
            status: QuestStatus::NotStarted,
            objectives: Vec::new(),
            requirements: Vec::new(),
            rewards: Vec::new(),
        }
    }

    pub fn with_giver(mut self, npc: impl Into<NpcId>) -> Self {
        self.giver = Some(npc.into());
        self
    }

    pub fn with_objective(mut self, objective: QuestObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.rewards.push(reward);
        self
    }

    /// Copy with a different status. Used by collaborators that own the
    /// transitions the engine does not perform, such as failing a quest.
    pub fn with_status(&self, status: QuestStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Objective by id.
    pub fn objective(&self, id: &str) -> Option<&QuestObjective> {
        self.objectives.iter().find(|o| o.id.as_str() == id)
    }

    /// True when every objective is complete; vacuously true with none.
    pub fn all_objectives_completed(&self) -> bool {
        self.objectives.iter().all(QuestObjective::is_completed)
    }

    /// Copy with every objective's progress reset to zero.
    pub fn reset_objectives(&self) -> Self {
        Self {
            objectives: self.objectives.iter().map(|o| o.with_progress(0)).collect(),
            ..self.clone()
        }
    }

    /// Rebuild objective state from saved progress, e.g. after loading a save.
    pub fn restore(&self, status: QuestStatus, progress: &QuestProgress) -> Self {
        Self {
            status,
            objectives: self
                .objectives
                .iter()
                .map(|o| o.with_progress(progress.get(o.id.as_str())))
                .collect(),
            ..self.clone()
        }
    }
}
