//! Identifier types and player-side components referenced by authored content.

mod components;

pub use components::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Defines a string-backed identifier. Content authors refer to quests, items,
/// NPCs and dialogue nodes by stable names, so ids wrap the authored string.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an authored id.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a quest definition.
    QuestId
);
define_id!(
    /// Identifier of an objective, unique within its quest.
    ObjectiveId
);
define_id!(ItemId);
define_id!(
    /// Identifier of an NPC; also keys dialogue graphs.
    NpcId
);
define_id!(FactionId);
define_id!(LocationId);
define_id!(SkillId);
define_id!(
    /// Identifier of a dialogue node.
    DialogueId
);
define_id!(OptionId);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_id_display_and_conversion() {
        let id = QuestId::from("find_herbs");
        assert_eq!(id.to_string(), "find_herbs");
        assert_eq!(id.as_str(), "find_herbs");
        assert_eq!(id, QuestId::new(String::from("find_herbs")));
    }

    #[test]
    fn test_id_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(NpcId::from("elara"), 20);

        assert_eq!(map.get("elara"), Some(&20));
        assert_eq!(map.get("unknown"), None);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ItemId::from("herb");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"herb\"");

        let parsed: ItemId = serde_json::from_str("\"herb\"").unwrap();
        assert_eq!(parsed, id);
    }
}
