//! Condition evaluation - declarative predicates over a [`GameState`].
//!
//! Conditions are authored as flat records:
//!
//! ```text
//! { type = "relationship", target = "elara", operator = ">=", value = 50 }
//! ```
//!
//! and parsed into a [`ConditionKind`] per predicate family. Records that do
//! not describe a known predicate parse into [`ConditionKind::Unknown`], which
//! never holds. Content written for newer builds therefore degrades to
//! "condition not met" instead of failing to load.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{FactionId, ItemId, NpcId, QuestId};
use crate::world_state::{GameState, QuestStatus, TimeOfDay};

/// A value as written in content files.
///
/// Integers and strings are the shapes rules understand. Anything else is
/// kept as-is in [`Scalar::Other`] so a stray value never fails a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(i64),
    Text(String),
    Bool(bool),
    /// Floats, out-of-range integers, arrays and tables.
    Other(serde_json::Value),
}

impl Scalar {
    /// Integer value; numeric strings are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) | Scalar::Other(_) => None,
        }
    }

    /// String value, if the content wrote one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text or integer rendered as an identifier.
    pub fn as_id(&self) -> Option<String> {
        match self {
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Text(s) => Some(s.clone()),
            Scalar::Bool(_) | Scalar::Other(_) => None,
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Equal,
}

impl Comparison {
    /// Parse a content operator such as `">="`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ">" => Some(Comparison::Greater),
            ">=" => Some(Comparison::GreaterOrEqual),
            "<" => Some(Comparison::Less),
            "<=" => Some(Comparison::LessOrEqual),
            "==" => Some(Comparison::Equal),
            _ => None,
        }
    }

    /// Operator as written in content.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "==",
        }
    }

    /// Apply the operator as `actual <op> expected`.
    pub fn compare(&self, actual: i64, expected: i64) -> bool {
        match self {
            Comparison::Greater => actual > expected,
            Comparison::GreaterOrEqual => actual >= expected,
            Comparison::Less => actual < expected,
            Comparison::LessOrEqual => actual <= expected,
            Comparison::Equal => actual == expected,
        }
    }
}

/// Inventory test for item conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCheck {
    /// At least one held.
    Has,
    AtLeast(i64),
    Exactly(i64),
}

/// The predicate families a condition can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionKind {
    Quest {
        quest: QuestId,
        status: QuestStatus,
    },
    Item {
        item: ItemId,
        check: ItemCheck,
    },
    Stat {
        stat: String,
        comparison: Comparison,
        value: i64,
    },
    Reputation {
        faction: FactionId,
        comparison: Comparison,
        value: i64,
    },
    Relationship {
        npc: NpcId,
        comparison: Comparison,
        value: i64,
    },
    Flag {
        flag: String,
    },
    TimeOfDay {
        time: TimeOfDay,
    },
    /// A record this build does not understand. Always false.
    Unknown {
        kind: String,
        target: String,
        operator: Option<String>,
        value: Option<Scalar>,
    },
}

impl ConditionKind {
    /// Content-facing name of the predicate family.
    pub fn type_name(&self) -> &str {
        match self {
            ConditionKind::Quest { .. } => "quest",
            ConditionKind::Item { .. } => "item",
            ConditionKind::Stat { .. } => "stat",
            ConditionKind::Reputation { .. } => "reputation",
            ConditionKind::Relationship { .. } => "relationship",
            ConditionKind::Flag { .. } => "flag",
            ConditionKind::TimeOfDay { .. } => "timeOfDay",
            ConditionKind::Unknown { kind, .. } => kind,
        }
    }

    /// True for records this build could not interpret.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ConditionKind::Unknown { .. })
    }
}

/// A single authored condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCondition", into = "RawCondition")]
pub struct Condition {
    pub kind: ConditionKind,
    /// Inverts the result after evaluation.
    pub negate: bool,
}

impl Condition {
    /// Non-negated condition of the given kind.
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            negate: false,
        }
    }

    /// Quest is in exactly `status`.
    pub fn quest(quest: impl Into<QuestId>, status: QuestStatus) -> Self {
        Self::new(ConditionKind::Quest {
            quest: quest.into(),
            status,
        })
    }

    /// Inventory check on `item`.
    pub fn item(item: impl Into<ItemId>, check: ItemCheck) -> Self {
        Self::new(ConditionKind::Item {
            item: item.into(),
            check,
        })
    }

    /// Named stat compared against `value`.
    pub fn stat(stat: impl Into<String>, comparison: Comparison, value: i64) -> Self {
        Self::new(ConditionKind::Stat {
            stat: stat.into(),
            comparison,
            value,
        })
    }

    /// Faction standing compared against `value`.
    pub fn reputation(faction: impl Into<FactionId>, comparison: Comparison, value: i64) -> Self {
        Self::new(ConditionKind::Reputation {
            faction: faction.into(),
            comparison,
            value,
        })
    }

    /// NPC relationship compared against `value`.
    pub fn relationship(npc: impl Into<NpcId>, comparison: Comparison, value: i64) -> Self {
        Self::new(ConditionKind::Relationship {
            npc: npc.into(),
            comparison,
            value,
        })
    }

    /// World flag is set.
    pub fn flag(flag: impl Into<String>) -> Self {
        Self::new(ConditionKind::Flag { flag: flag.into() })
    }

    /// Current time band matches.
    pub fn time_of_day(time: TimeOfDay) -> Self {
        Self::new(ConditionKind::TimeOfDay { time })
    }

    /// Flip `negate`.
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Evaluate against a snapshot.
    pub fn is_met(&self, state: &GameState) -> bool {
        evaluate(self, state)
    }
}

/// Evaluate one condition. Unknown conditions are false before `negate` applies.
pub fn evaluate(condition: &Condition, state: &GameState) -> bool {
    let result = match &condition.kind {
        ConditionKind::Quest { quest, status } => state.quest_status(quest.as_str()) == *status,
        ConditionKind::Item { item, check } => {
            let held = i64::from(state.item_quantity(item.as_str()));
            match check {
                ItemCheck::Has => held > 0,
                ItemCheck::AtLeast(n) => held >= *n,
                ItemCheck::Exactly(n) => held == *n,
            }
        }
        ConditionKind::Stat {
            stat,
            comparison,
            value,
        } => comparison.compare(state.stat(stat), *value),
        ConditionKind::Reputation {
            faction,
            comparison,
            value,
        } => comparison.compare(state.reputation(faction.as_str()), *value),
        ConditionKind::Relationship {
            npc,
            comparison,
            value,
        } => comparison.compare(state.relationship(npc.as_str()), *value),
        ConditionKind::Flag { flag } => state.has_flag(flag),
        ConditionKind::TimeOfDay { time } => state.time_of_day() == *time,
        ConditionKind::Unknown { kind, target, .. } => {
            debug!(kind = %kind, target = %target, "unknown condition evaluates to false");
            false
        }
    };

    result != condition.negate
}

/// True when every condition holds; an empty list always holds.
pub fn evaluate_all(conditions: &[Condition], state: &GameState) -> bool {
    conditions.iter().all(|condition| evaluate(condition, state))
}

/// Flat wire form of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCondition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negate: bool,
}

impl RawCondition {
    fn numeric_value(&self) -> Option<i64> {
        self.value.as_ref().and_then(Scalar::as_i64)
    }

    fn comparison(&self) -> Option<Comparison> {
        self.operator.as_deref().and_then(Comparison::parse)
    }

    fn resolve(&self) -> Option<ConditionKind> {
        let kind = match self.kind.as_str() {
            "quest" => ConditionKind::Quest {
                quest: QuestId::new(self.target.clone()),
                status: QuestStatus::parse(self.operator.as_deref()?)?,
            },
            "item" => {
                let check = match self.operator.as_deref().unwrap_or("has") {
                    "has" => ItemCheck::Has,
                    ">=" => ItemCheck::AtLeast(self.numeric_value()?),
                    "==" => ItemCheck::Exactly(self.numeric_value()?),
                    _ => return None,
                };
                ConditionKind::Item {
                    item: ItemId::new(self.target.clone()),
                    check,
                }
            }
            "stat" => ConditionKind::Stat {
                stat: self.target.clone(),
                comparison: self.comparison()?,
                value: self.numeric_value()?,
            },
            "reputation" => ConditionKind::Reputation {
                faction: FactionId::new(self.target.clone()),
                comparison: self.comparison()?,
                value: self.numeric_value()?,
            },
            "relationship" => ConditionKind::Relationship {
                npc: NpcId::new(self.target.clone()),
                comparison: self.comparison()?,
                value: self.numeric_value()?,
            },
            "flag" => ConditionKind::Flag {
                flag: self.target.clone(),
            },
            "timeOfDay" | "time_of_day" => ConditionKind::TimeOfDay {
                time: TimeOfDay::parse(self.value.as_ref()?.as_text()?)?,
            },
            _ => return None,
        };
        Some(kind)
    }
}

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        let kind = raw.resolve().unwrap_or_else(|| ConditionKind::Unknown {
            kind: raw.kind.clone(),
            target: raw.target.clone(),
            operator: raw.operator.clone(),
            value: raw.value.clone(),
        });
        Condition {
            kind,
            negate: raw.negate,
        }
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        let negate = condition.negate;
        let (kind, target, operator, value) = match condition.kind {
            ConditionKind::Quest { quest, status } => (
                "quest".to_string(),
                quest.to_string(),
                Some(status.as_str().to_string()),
                None,
            ),
            ConditionKind::Item { item, check } => {
                let (operator, value) = match check {
                    ItemCheck::Has => ("has", None),
                    ItemCheck::AtLeast(n) => (">=", Some(Scalar::Number(n))),
                    ItemCheck::Exactly(n) => ("==", Some(Scalar::Number(n))),
                };
                ("item".to_string(), item.to_string(), Some(operator.to_string()), value)
            }
            ConditionKind::Stat {
                stat,
                comparison,
                value,
            } => (
                "stat".to_string(),
                stat,
                Some(comparison.as_str().to_string()),
                Some(Scalar::Number(value)),
            ),
            ConditionKind::Reputation {
                faction,
                comparison,
                value,
            } => (
                "reputation".to_string(),
                faction.to_string(),
                Some(comparison.as_str().to_string()),
                Some(Scalar::Number(value)),
            ),
            ConditionKind::Relationship {
                npc,
                comparison,
                value,
            } => (
                "relationship".to_string(),
                npc.to_string(),
                Some(comparison.as_str().to_string()),
                Some(Scalar::Number(value)),
            ),
            ConditionKind::Flag { flag } => ("flag".to_string(), flag, None, None),
            ConditionKind::TimeOfDay { time } => (
                "timeOfDay".to_string(),
                String::new(),
                None,
                Some(Scalar::Text(time.as_str().to_string())),
            ),
            ConditionKind::Unknown {
                kind,
                target,
                operator,
                value,
            } => (kind, target, operator, value),
        };

        RawCondition {
            kind,
            target,
            operator,
            value,
            negate,
        }
    }
}
