//! Dialogue content: nodes and the options that connect them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use game_rules::{evaluate_all, Action, Condition, DialogueId, GameState, NpcId, OptionId};

/// A player reply. Picking it runs its actions and optionally moves to `next_dialogue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueOption {
    pub id: OptionId,
    pub text: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Node to continue with, looked up in the same NPC's graph. `None` ends the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_dialogue: Option<DialogueId>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// NPC id -> relationship delta.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationship_changes: BTreeMap<NpcId, i64>,
}

impl DialogueOption {
    /// Option with no conditions that ends the conversation.
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            conditions: Vec::new(),
            next_dialogue: None,
            actions: Vec::new(),
            relationship_changes: BTreeMap::new(),
        }
    }

    /// Builder: follow-up node.
    pub fn leading_to(mut self, next: impl Into<DialogueId>) -> Self {
        self.next_dialogue = Some(next.into());
        self
    }

    /// Builder: add a visibility condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Builder: add an action run on selection.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Builder: relationship delta applied on selection.
    pub fn with_relationship_change(mut self, npc: impl Into<NpcId>, delta: i64) -> Self {
        self.relationship_changes.insert(npc.into(), delta);
        self
    }

    /// True when every condition holds.
    pub fn is_available(&self, state: &GameState) -> bool {
        evaluate_all(&self.conditions, state)
    }
}

/// One line of an NPC conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueNode {
    pub id: DialogueId,
    pub text: String,
    /// Gate for entering this node as a conversation root.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub options: Vec<DialogueOption>,
    /// Run every time the node is entered.
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub is_root: bool,
}

impl DialogueNode {
    /// Non-root node with no options.
    pub fn new(id: impl Into<DialogueId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            conditions: Vec::new(),
            options: Vec::new(),
            actions: Vec::new(),
            is_root: false,
        }
    }

    /// Builder: mark as a conversation entry point.
    pub fn root(mut self) -> Self {
        self.is_root = true;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_option(mut self, option: DialogueOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Option by id.
    pub fn option(&self, id: &str) -> Option<&DialogueOption> {
        self.options.iter().find(|o| o.id.as_str() == id)
    }

    /// True when every condition holds.
    pub fn is_available(&self, state: &GameState) -> bool {
        evaluate_all(&self.conditions, state)
    }

    /// True when no option leads anywhere.
    pub fn is_leaf(&self) -> bool {
        self.options.iter().all(|o| o.next_dialogue.is_none())
    }
}

/// Options whose conditions hold, in declaration order.
pub fn available_options<'a>(node: &'a DialogueNode, state: &GameState) -> Vec<&'a DialogueOption> {
    node.options
        .iter()
        .filter(|option| option.is_available(state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::Comparison;

    fn greeting() -> DialogueNode {
        DialogueNode::new("greeting", "Welcome, traveller.")
            .root()
            .with_option(DialogueOption::new("a", "Hello.").leading_to("small_talk"))
            .with_option(
                DialogueOption::new("b", "Tell me a secret.")
                    .with_condition(Condition::relationship("elara", Comparison::GreaterOrEqual, 50))
                    .leading_to("secret"),
            )
            .with_option(DialogueOption::new("c", "Goodbye."))
    }

    #[test]
    fn test_relationship_gates_option() {
        let node = greeting();
        let state = GameState::new().with_relationship("elara", 20);

        let ids: Vec<_> = available_options(&node, &state)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);

        let state = state.with_relationship("elara", 50);
        assert_eq!(available_options(&node, &state).len(), 3);
    }

    #[test]
    fn test_available_options_subset_in_order() {
        let node = greeting();
        let state = GameState::new();
        let available = available_options(&node, &state);

        let mut cursor = node.options.iter();
        for option in available {
            assert!(option.conditions.iter().all(|c| c.is_met(&state)));
            assert!(cursor.any(|o| o.id == option.id));
        }
    }

    #[test]
    fn test_node_wire_format() {
        let node: DialogueNode = serde_json::from_str(
            r#"{
                "id": "greeting",
                "text": "Welcome.",
                "isRoot": true,
                "actions": [{"type": "set_flag", "flag": "met_elara"}],
                "options": [
                    {
                        "id": "ask",
                        "text": "Need help?",
                        "nextDialogue": "quest_offer",
                        "relationshipChanges": {"elara": 5},
                        "conditions": [{"type": "flag", "target": "met_elara"}]
                    },
                    {"id": "bye", "text": "Bye."}
                ]
            }"#,
        )
        .unwrap();

        assert!(node.is_root);
        assert_eq!(node.actions.len(), 1);
        let ask = node.option("ask").unwrap();
        assert_eq!(ask.next_dialogue, Some(DialogueId::from("quest_offer")));
        assert_eq!(ask.relationship_changes.get("elara"), Some(&5));
        assert!(node.option("bye").unwrap().next_dialogue.is_none());
        assert!(!node.is_leaf());
    }

    #[test]
    fn test_node_conditions() {
        let node = DialogueNode::new("night_talk", "...").with_condition(Condition::flag("met_elara"));
        assert!(!node.is_available(&GameState::new()));
        assert!(node.is_available(&GameState::new().with_flag("met_elara")));
    }
}
