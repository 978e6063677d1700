//! Engine facade tying content, configuration and clock together.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use game_rules::{GameState, QuestStatus};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::dialogue::DialogueWalker;
use crate::error::ContentResult;
use crate::quest::{ActiveQuest, Quest, QuestProgress, QuestStateMachine};
use crate::registry::ContentRegistry;

/// One game session's view of the content. Cheap to clone; content is shared.
#[derive(Debug, Clone)]
pub struct NarrativeEngine {
    registry: Arc<ContentRegistry>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    quests: QuestStateMachine,
}

impl NarrativeEngine {
    /// Validate `config`, lint the content and build the engine.
    pub fn new(registry: ContentRegistry, config: EngineConfig) -> ContentResult<Self> {
        config.validate()?;
        registry.check(&config)?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Ok(Self {
            quests: QuestStateMachine::with_config(Arc::clone(&clock), &config),
            registry: Arc::new(registry),
            config,
            clock,
        })
    }

    /// Load content from `content_dir` and build the engine.
    pub fn load(content_dir: &Path, config: EngineConfig) -> ContentResult<Self> {
        let engine = Self::new(ContentRegistry::load_dir(content_dir)?, config)?;
        info!(
            quests = engine.registry.quest_count(),
            npcs = engine.registry.npcs().count(),
            "narrative engine ready"
        );
        Ok(engine)
    }

    /// Builder: replace the clock used for timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.quests = QuestStateMachine::with_config(Arc::clone(&clock), &self.config);
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &Arc<ContentRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Quest state machine sharing the engine's clock.
    pub fn quests(&self) -> &QuestStateMachine {
        &self.quests
    }

    /// Quest definition by id.
    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.registry.quest(id)
    }

    /// Quests `npc` can offer right now: not yet taken and requirements met.
    pub fn available_quests(&self, npc: &str, state: &GameState) -> Vec<&Quest> {
        self.registry
            .quests_for_npc(npc)
            .into_iter()
            .filter(|quest| state.quest_status(quest.id.as_str()) == QuestStatus::NotStarted)
            .filter(|quest| self.quests.check_requirements(quest, state))
            .collect()
    }

    /// Accept a quest by id if the player has not taken it and meets its requirements.
    pub fn try_accept(&self, quest_id: &str, state: &GameState) -> Option<ActiveQuest> {
        let quest = self.registry.quest(quest_id)?;

        if state.quest_status(quest_id) != QuestStatus::NotStarted {
            debug!(quest = quest_id, "quest already taken");
            return None;
        }
        if !self.quests.check_requirements(quest, state) {
            debug!(quest = quest_id, "quest requirements not met");
            return None;
        }

        let (quest, progress) = self.quests.accept(quest);
        progress.map(|progress| ActiveQuest::new(quest, progress))
    }

    /// Rebuild an active quest from saved status and progress.
    pub fn resume(&self, quest_id: &str, status: QuestStatus, progress: QuestProgress) -> Option<ActiveQuest> {
        let quest = self.registry.quest(quest_id)?.restore(status, &progress);
        Some(ActiveQuest::new(quest, progress))
    }

    /// A fresh conversation walker for `npc`.
    pub fn dialogue(&self, npc: &str) -> DialogueWalker {
        DialogueWalker::new(Arc::clone(&self.registry), Arc::clone(&self.clock), npc)
            .with_history_limit(self.config.history_limit)
    }
}
