//! Conversation traversal.
//!
//! A [`DialogueWalker`] holds one conversation cursor for one NPC. Selecting
//! an option never touches game state directly: every side effect comes back
//! as a [`Command`] in the returned [`Selection`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use game_rules::{
    Action, ActionContext, ActionExecutor, Command, DialogueId, GameState, HistoryCategory,
    HistoryRecord, NpcId, OptionId,
};

use super::node::{available_options, DialogueNode, DialogueOption};
use crate::clock::Clock;
use crate::registry::ContentRegistry;

/// Identifies one conversation from `start` until it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The node currently shown to the player, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationCursor {
    #[default]
    Inactive,
    Active(DialogueNode),
}

impl ConversationCursor {
    /// Current node, if a conversation is running.
    pub fn node(&self) -> Option<&DialogueNode> {
        match self {
            ConversationCursor::Active(node) => Some(node),
            ConversationCursor::Inactive => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ConversationCursor::Active(_))
    }
}

/// Where the conversation went after a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueOutcome {
    /// Moved to this node.
    Continue(DialogueNode),
    /// The option had no follow-up node.
    EndConversation,
    /// The option pointed at a node that does not exist. The conversation ends.
    DanglingReference(DialogueId),
}

impl DialogueOutcome {
    /// Target node when the walk continues.
    pub fn node(&self) -> Option<&DialogueNode> {
        match self {
            DialogueOutcome::Continue(node) => Some(node),
            _ => None,
        }
    }

    /// True when the conversation is over.
    pub fn is_end(&self) -> bool {
        !matches!(self, DialogueOutcome::Continue(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum DialogueHistoryEntry {
    Choice {
        dialogue_id: DialogueId,
        option_id: OptionId,
        timestamp: DateTime<Utc>,
    },
    Transition {
        from: DialogueId,
        to: DialogueId,
        timestamp: DateTime<Utc>,
    },
}

impl DialogueHistoryEntry {
    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            DialogueHistoryEntry::Choice { timestamp, .. }
            | DialogueHistoryEntry::Transition { timestamp, .. } => *timestamp,
        }
    }

    /// Host-store form. Choices are written as `node:option`, transitions as `from->to`.
    pub fn to_record(&self, npc_id: &NpcId) -> HistoryRecord {
        let (dialogue_branch, category) = match self {
            DialogueHistoryEntry::Choice {
                dialogue_id,
                option_id,
                ..
            } => (format!("{dialogue_id}:{option_id}"), HistoryCategory::Choice),
            DialogueHistoryEntry::Transition { from, to, .. } => {
                (format!("{from}->{to}"), HistoryCategory::Transition)
            }
        };
        HistoryRecord {
            npc_id: npc_id.clone(),
            dialogue_branch,
            timestamp: self.timestamp(),
            category,
        }
    }
}

/// Everything one step of a conversation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub outcome: DialogueOutcome,
    /// Commands in execution order, history records included.
    pub commands: Vec<Command>,
    pub history: Vec<DialogueHistoryEntry>,
}

impl Selection {
    fn ended() -> Self {
        Self {
            outcome: DialogueOutcome::EndConversation,
            commands: Vec::new(),
            history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogueWalker {
    registry: Arc<ContentRegistry>,
    executor: ActionExecutor,
    clock: Arc<dyn Clock>,
    history_limit: usize,
    npc_id: NpcId,
    conversation_id: ConversationId,
    cursor: ConversationCursor,
    history: Vec<DialogueHistoryEntry>,
}

impl DialogueWalker {
    /// Inactive walker for conversations with `npc_id`.
    pub fn new(registry: Arc<ContentRegistry>, clock: Arc<dyn Clock>, npc_id: impl Into<NpcId>) -> Self {
        Self {
            registry,
            executor: ActionExecutor::new(),
            clock,
            history_limit: 0,
            npc_id: npc_id.into(),
            conversation_id: ConversationId::new(),
            cursor: ConversationCursor::Inactive,
            history: Vec::new(),
        }
    }

    /// Keep at most `limit` history entries, dropping the oldest. Zero keeps everything.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// NPC this walker talks to.
    pub fn npc_id(&self) -> &NpcId {
        &self.npc_id
    }

    /// Id of the current conversation.
    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Where the conversation stands.
    pub fn cursor(&self) -> &ConversationCursor {
        &self.cursor
    }

    /// Current node, if active.
    pub fn current(&self) -> Option<&DialogueNode> {
        self.cursor.node()
    }

    pub fn is_active(&self) -> bool {
        self.cursor.is_active()
    }

    /// Recorded choices and transitions, oldest first.
    pub fn history(&self) -> &[DialogueHistoryEntry] {
        &self.history
    }

    /// Enter the first root node of this NPC whose conditions hold and run its actions.
    pub fn start(&mut self, state: &GameState) -> Selection {
        let Some(root) = self
            .registry
            .root_nodes(self.npc_id.as_str())
            .find(|node| node.is_available(state))
            .cloned()
        else {
            debug!(npc = %self.npc_id, "no root dialogue available");
            self.cursor = ConversationCursor::Inactive;
            return Selection::ended();
        };

        self.conversation_id = ConversationId::new();
        let commands = self.executor.execute(&root.actions, &self.context());
        debug!(
            npc = %self.npc_id,
            conversation = %self.conversation_id,
            node = %root.id,
            "conversation started"
        );
        self.cursor = ConversationCursor::Active(root.clone());

        Selection {
            outcome: DialogueOutcome::Continue(root),
            commands,
            history: Vec::new(),
        }
    }

    /// Options of the current node the player may pick. Empty when inactive.
    pub fn available_options(&self, state: &GameState) -> Vec<&DialogueOption> {
        self.cursor
            .node()
            .map(|node| available_options(node, state))
            .unwrap_or_default()
    }

    /// Pick an option of the current node by id.
    ///
    /// Returns `None` without side effects when the conversation is inactive
    /// or the option is unknown or not available in `state`.
    pub fn choose(&mut self, option_id: &str, state: &GameState) -> Option<Selection> {
        let node = self.cursor.node()?.clone();
        let Some(option) = node.option(option_id).filter(|o| o.is_available(state)) else {
            debug!(npc = %self.npc_id, node = %node.id, option = option_id, "option not available");
            return None;
        };
        let option = option.clone();
        Some(self.select_option(&option, &node))
    }

    /// Apply `option` as chosen from `current`.
    ///
    /// Commands come back in this order: the choice history record, the
    /// option's actions, its relationship changes, then (when the next node
    /// resolves) that node's actions and the transition history record.
    pub fn select_option(&mut self, option: &DialogueOption, current: &DialogueNode) -> Selection {
        let context = self.context();
        let mut commands = Vec::new();
        let mut history = Vec::new();

        let choice = DialogueHistoryEntry::Choice {
            dialogue_id: current.id.clone(),
            option_id: option.id.clone(),
            timestamp: self.clock.now(),
        };
        commands.push(Command::AddDialogueHistory(choice.to_record(&self.npc_id)));
        history.push(choice);

        commands.extend(self.executor.execute(&option.actions, &context));

        let relationship_changes: Vec<Action> = option
            .relationship_changes
            .iter()
            .map(|(npc_id, amount)| Action::ModifyRelationship {
                npc_id: Some(npc_id.clone()),
                amount: *amount,
            })
            .collect();
        commands.extend(self.executor.execute(&relationship_changes, &context));

        let outcome = match &option.next_dialogue {
            None => DialogueOutcome::EndConversation,
            Some(next_id) => match self.registry.dialogue_node(self.npc_id.as_str(), next_id.as_str()) {
                Some(next) => {
                    commands.extend(self.executor.execute(&next.actions, &context));
                    let transition = DialogueHistoryEntry::Transition {
                        from: current.id.clone(),
                        to: next.id.clone(),
                        timestamp: self.clock.now(),
                    };
                    commands.push(Command::AddDialogueHistory(transition.to_record(&self.npc_id)));
                    history.push(transition);
                    DialogueOutcome::Continue(next.clone())
                }
                None => {
                    warn!(
                        npc = %self.npc_id,
                        node = %current.id,
                        option = %option.id,
                        next = %next_id,
                        "dialogue option points at a missing node"
                    );
                    DialogueOutcome::DanglingReference(next_id.clone())
                }
            },
        };

        self.cursor = match outcome.node() {
            Some(node) => ConversationCursor::Active(node.clone()),
            None => {
                debug!(npc = %self.npc_id, conversation = %self.conversation_id, "conversation ended");
                ConversationCursor::Inactive
            }
        };
        self.record(&history);

        Selection {
            outcome,
            commands,
            history,
        }
    }

    /// Leave the conversation without choosing anything.
    pub fn end(&mut self) {
        if self.cursor.is_active() {
            debug!(npc = %self.npc_id, conversation = %self.conversation_id, "conversation closed");
        }
        self.cursor = ConversationCursor::Inactive;
    }

    fn context(&self) -> ActionContext {
        ActionContext::with_npc(self.npc_id.clone())
    }

    fn record(&mut self, entries: &[DialogueHistoryEntry]) {
        self.history.extend_from_slice(entries);
        if self.history_limit > 0 && self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
        }
    }
}
