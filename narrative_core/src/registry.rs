//! Content registry
//!
//! Read-only store of quest definitions and per-NPC dialogue graphs, loaded
//! from TOML or JSON. Content files look like:
//!
//! ```toml
//! [[quests]]
//! id = "find_herbs"
//! name = "Find Herbs"
//! giver = "elara"
//!
//! [[quests.objectives]]
//! id = "gather"
//! type = "collect"
//! target = "herb"
//! required = 3
//!
//! [[dialogues.elara]]
//! id = "greeting"
//! text = "Welcome, traveller."
//! isRoot = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use game_rules::{Action, Condition, ConditionKind, DialogueId, NpcId, ObjectiveId, QuestId};

use crate::config::EngineConfig;
use crate::dialogue::DialogueNode;
use crate::error::{ContentError, ContentResult};
use crate::quest::{Quest, Requirement};

/// One content file: any number of quests and dialogue graphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub quests: Vec<Quest>,
    /// NPC id -> dialogue nodes in declaration order.
    #[serde(default)]
    pub dialogues: BTreeMap<NpcId, Vec<DialogueNode>>,
}

/// A problem found by [`ContentRegistry::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentIssue {
    #[error("{npc}/{node} option '{option}' leads to missing dialogue '{target}'")]
    DanglingDialogue {
        npc: NpcId,
        node: DialogueId,
        option: String,
        target: DialogueId,
    },

    #[error("{location} references unknown quest '{quest}'")]
    UnknownQuest { location: String, quest: QuestId },

    #[error("{location} uses unknown condition type '{kind}'")]
    UnknownCondition { location: String, kind: String },

    #[error("{location} uses an unknown action type")]
    UnknownAction { location: String },

    #[error("quest '{quest}' has unknown requirement type '{kind}'")]
    UnknownRequirement { quest: QuestId, kind: String },

    #[error("quest '{quest}' objective '{objective}' requires nothing")]
    ZeroRequiredObjective { quest: QuestId, objective: ObjectiveId },
}

impl ContentIssue {
    /// Broken id references. Unknown kinds are tolerated for forward compatibility.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ContentIssue::DanglingDialogue { .. } | ContentIssue::UnknownQuest { .. }
        )
    }
}

/// Read-only quest and dialogue content, shared behind an `Arc` once loaded.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    quests: BTreeMap<QuestId, Quest>,
    dialogues: BTreeMap<NpcId, Vec<DialogueNode>>,
}

impl ContentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from one parsed file.
    pub fn from_file(file: ContentFile) -> ContentResult<Self> {
        let mut registry = Self::new();
        registry.extend(file)?;
        Ok(registry)
    }

    /// Parse TOML content.
    pub fn from_toml_str(source: &str) -> ContentResult<Self> {
        Self::from_file(parse_toml(source, "inline TOML")?)
    }

    /// Parse JSON content.
    pub fn from_json_str(source: &str) -> ContentResult<Self> {
        Self::from_file(parse_json(source, "inline JSON")?)
    }

    /// Load every `.toml` and `.json` file under `dir`, recursively, in path order.
    pub fn load_dir(dir: &Path) -> ContentResult<Self> {
        info!("Loading content from {:?}", dir);

        let mut paths = Vec::new();
        collect_content_files(dir, &mut paths)?;
        paths.sort();

        let mut registry = Self::new();
        for path in &paths {
            registry.load_file(path)?;
        }

        info!(
            "Loaded {} quests and {} dialogue nodes from {} files",
            registry.quests.len(),
            registry.node_count(),
            paths.len()
        );
        Ok(registry)
    }

    /// Parse one file by extension and merge it in.
    pub fn load_file(&mut self, path: &Path) -> ContentResult<()> {
        let source = std::fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let origin = path.display().to_string();

        let file = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => parse_toml(&source, &origin)?,
            Some("json") => parse_json(&source, &origin)?,
            _ => return Err(ContentError::UnsupportedFormat(path.to_path_buf())),
        };

        info!(
            "Loaded {:?}: {} quests, {} dialogue graphs",
            path,
            file.quests.len(),
            file.dialogues.len()
        );
        self.extend(file)
    }

    /// Merge a whole file. Nothing is added if any id collides.
    pub fn extend(&mut self, file: ContentFile) -> ContentResult<()> {
        let mut batch: HashSet<&QuestId> = HashSet::new();
        for quest in &file.quests {
            if self.quests.contains_key(&quest.id) || !batch.insert(&quest.id) {
                return Err(ContentError::DuplicateQuest(quest.id.clone()));
            }
        }
        for (npc, nodes) in &file.dialogues {
            self.check_new_nodes(npc, nodes)?;
        }

        for quest in file.quests {
            self.quests.insert(quest.id.clone(), quest);
        }
        for (npc, nodes) in file.dialogues {
            self.dialogues.entry(npc).or_default().extend(nodes);
        }
        Ok(())
    }

    /// Add one quest; its id must be new.
    pub fn add_quest(&mut self, quest: Quest) -> ContentResult<()> {
        if self.quests.contains_key(&quest.id) {
            return Err(ContentError::DuplicateQuest(quest.id));
        }
        self.quests.insert(quest.id.clone(), quest);
        Ok(())
    }

    /// Append nodes to an NPC's graph. Node ids must be unique per NPC, and
    /// the graph is left untouched when any of them is not.
    pub fn add_dialogue(
        &mut self,
        npc: impl Into<NpcId>,
        nodes: impl IntoIterator<Item = DialogueNode>,
    ) -> ContentResult<()> {
        let npc = npc.into();
        let nodes: Vec<DialogueNode> = nodes.into_iter().collect();
        self.check_new_nodes(&npc, &nodes)?;

        self.dialogues.entry(npc).or_default().extend(nodes);
        Ok(())
    }

    fn check_new_nodes(&self, npc: &NpcId, nodes: &[DialogueNode]) -> ContentResult<()> {
        let mut seen: HashSet<&DialogueId> = self
            .dialogues
            .get(npc)
            .into_iter()
            .flatten()
            .map(|node| &node.id)
            .collect();

        for node in nodes {
            if !seen.insert(&node.id) {
                return Err(ContentError::DuplicateDialogue {
                    npc: npc.clone(),
                    node: node.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Quest definition by id.
    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.get(id)
    }

    /// All quests, ordered by id.
    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.values()
    }

    /// Quests offered by `npc`, ordered by id.
    pub fn quests_for_npc(&self, npc: &str) -> Vec<&Quest> {
        self.quests
            .values()
            .filter(|quest| quest.giver.as_ref().is_some_and(|giver| giver.as_str() == npc))
            .collect()
    }

    /// An NPC's whole graph in declaration order.
    pub fn dialogue(&self, npc: &str) -> Option<&[DialogueNode]> {
        self.dialogues.get(npc).map(Vec::as_slice)
    }

    /// One node of an NPC's graph.
    pub fn dialogue_node(&self, npc: &str, id: &str) -> Option<&DialogueNode> {
        self.dialogues
            .get(npc)?
            .iter()
            .find(|node| node.id.as_str() == id)
    }

    /// Root nodes of an NPC's graph in declaration order.
    pub fn root_nodes<'a>(&'a self, npc: &str) -> impl Iterator<Item = &'a DialogueNode> + 'a {
        self.dialogues
            .get(npc)
            .into_iter()
            .flatten()
            .filter(|node| node.is_root)
    }

    /// NPCs with at least one dialogue entry.
    pub fn npcs(&self) -> impl Iterator<Item = &NpcId> {
        self.dialogues.keys()
    }

    /// Number of quests.
    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }

    /// Dialogue nodes across all NPCs.
    pub fn node_count(&self) -> usize {
        self.dialogues.values().map(Vec::len).sum()
    }

    /// True with no quests and no nodes.
    pub fn is_empty(&self) -> bool {
        self.quests.is_empty() && self.node_count() == 0
    }

    /// Lint the loaded content. Runtime lookups never fail on these issues;
    /// they degrade to no-ops instead.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        for quest in self.quests.values() {
            for objective in &quest.objectives {
                if objective.required() == 0 {
                    issues.push(ContentIssue::ZeroRequiredObjective {
                        quest: quest.id.clone(),
                        objective: objective.id.clone(),
                    });
                }
            }
            for requirement in &quest.requirements {
                match requirement {
                    Requirement::Quest { quest: required } if !self.quests.contains_key(required) => {
                        issues.push(ContentIssue::UnknownQuest {
                            location: format!("quest '{}' requirement", quest.id),
                            quest: required.clone(),
                        });
                    }
                    Requirement::Unknown { kind } => {
                        issues.push(ContentIssue::UnknownRequirement {
                            quest: quest.id.clone(),
                            kind: kind.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }

        for (npc, nodes) in &self.dialogues {
            for node in nodes {
                let location = format!("dialogue {npc}/{}", node.id);
                self.check_conditions(&location, &node.conditions, &mut issues);
                self.check_actions(&location, &node.actions, &mut issues);

                for option in &node.options {
                    let location = format!("{location} option '{}'", option.id);
                    self.check_conditions(&location, &option.conditions, &mut issues);
                    self.check_actions(&location, &option.actions, &mut issues);

                    if let Some(target) = &option.next_dialogue {
                        if self.dialogue_node(npc.as_str(), target.as_str()).is_none() {
                            issues.push(ContentIssue::DanglingDialogue {
                                npc: npc.clone(),
                                node: node.id.clone(),
                                option: option.id.to_string(),
                                target: target.clone(),
                            });
                        }
                    }
                }
            }
        }

        issues
    }

    /// Report validation issues. In strict mode broken references fail the load,
    /// otherwise everything is only logged.
    pub fn check(&self, config: &EngineConfig) -> ContentResult<()> {
        let issues = self.validate();
        for issue in &issues {
            warn!("Content issue: {}", issue);
        }

        if config.strict_references && issues.iter().any(ContentIssue::is_reference) {
            let references = issues.into_iter().filter(ContentIssue::is_reference).collect();
            return Err(ContentError::InvalidReferences(references));
        }
        Ok(())
    }

    fn check_conditions(&self, location: &str, conditions: &[Condition], issues: &mut Vec<ContentIssue>) {
        for condition in conditions {
            match &condition.kind {
                ConditionKind::Unknown { kind, .. } => issues.push(ContentIssue::UnknownCondition {
                    location: location.to_string(),
                    kind: kind.clone(),
                }),
                ConditionKind::Quest { quest, .. } if !self.quests.contains_key(quest) => {
                    issues.push(ContentIssue::UnknownQuest {
                        location: location.to_string(),
                        quest: quest.clone(),
                    })
                }
                _ => {}
            }
        }
    }

    fn check_actions(&self, location: &str, actions: &[Action], issues: &mut Vec<ContentIssue>) {
        for action in actions {
            match action {
                Action::Unknown => issues.push(ContentIssue::UnknownAction {
                    location: location.to_string(),
                }),
                Action::StartQuest { quest_id } | Action::UpdateQuest { quest_id, .. }
                    if !self.quests.contains_key(quest_id) =>
                {
                    issues.push(ContentIssue::UnknownQuest {
                        location: location.to_string(),
                        quest: quest_id.clone(),
                    })
                }
                _ => {}
            }
        }
    }
}

fn parse_toml(source: &str, origin: &str) -> ContentResult<ContentFile> {
    toml::from_str(source).map_err(|e| ContentError::toml(origin, e))
}

fn parse_json(source: &str, origin: &str) -> ContentResult<ContentFile> {
    serde_json::from_str(source).map_err(|e| ContentError::json(origin, e))
}

fn collect_content_files(dir: &Path, paths: &mut Vec<PathBuf>) -> ContentResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| ContentError::io(dir, e))?;

    for entry in entries {
        let path = entry.map_err(|e| ContentError::io(dir, e))?.path();

        if path.is_dir() {
            collect_content_files(&path, paths)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            paths.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::{GameState, QuestStatus};

    const ELARA_TOML: &str = r#"
[[quests]]
id = "find_herbs"
name = "Find Herbs"
giver = "elara"

[[quests.objectives]]
id = "gather"
type = "collect"
target = "herb"
required = 3

[[quests.requirements]]
type = "level"
value = 2

[[quests.rewards]]
type = "experience"
value = 50

[[dialogues.elara]]
id = "greeting"
text = "Welcome, traveller."
isRoot = true

[[dialogues.elara.options]]
id = "help"
text = "Need any help?"
nextDialogue = "quest_offer"

[[dialogues.elara.options]]
id = "bye"
text = "Goodbye."

[[dialogues.elara]]
id = "quest_offer"
text = "Bring me three herbs."

[[dialogues.elara.actions]]
type = "start_quest"
questId = "find_herbs"
"#;

    const BORIN_JSON: &str = r#"{
        "quests": [{
            "id": "wolf_hunt",
            "name": "Wolf Hunt",
            "giver": "borin",
            "objectives": [{"id": "wolves", "type": "kill", "target": "wolf", "required": 3}],
            "requirements": [{"type": "quest", "target": "find_herbs"}]
        }],
        "dialogues": {
            "borin": [{"id": "hello", "text": "Hm.", "isRoot": true, "options": [{"id": "bye", "text": "Bye."}]}]
        }
    }"#;

    #[test]
    fn test_toml_content() {
        let registry = ContentRegistry::from_toml_str(ELARA_TOML).unwrap();

        let quest = registry.quest("find_herbs").unwrap();
        assert_eq!(quest.status, QuestStatus::NotStarted);
        assert_eq!(quest.objectives[0].required(), 3);
        assert_eq!(quest.requirements, vec![Requirement::Level { min: 2 }]);

        let greeting = registry.dialogue_node("elara", "greeting").unwrap();
        assert_eq!(greeting.options.len(), 2);
        let offer = registry.dialogue_node("elara", "quest_offer").unwrap();
        assert_eq!(offer.actions.len(), 1);

        let roots: Vec<_> = registry.root_nodes("elara").map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["greeting"]);
        assert!(registry.validate().is_empty());
    }

    #[test]
    fn test_json_content() {
        let registry = ContentRegistry::from_json_str(BORIN_JSON).unwrap();
        assert_eq!(registry.quest_count(), 1);
        assert_eq!(registry.node_count(), 1);
        assert_eq!(registry.quests_for_npc("borin").len(), 1);
        assert!(registry.quests_for_npc("elara").is_empty());
    }

    #[test]
    fn test_lookups_for_unknown_npc() {
        let registry = ContentRegistry::from_toml_str(ELARA_TOML).unwrap();
        assert!(registry.dialogue("nobody").is_none());
        assert!(registry.dialogue_node("nobody", "greeting").is_none());
        assert!(registry.dialogue_node("elara", "missing").is_none());
        assert_eq!(registry.root_nodes("nobody").count(), 0);
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut registry = ContentRegistry::from_toml_str(ELARA_TOML).unwrap();

        let result = registry.add_quest(Quest::new("find_herbs", "Again"));
        assert!(matches!(result, Err(ContentError::DuplicateQuest(_))));

        let result = registry.add_dialogue("elara", vec![DialogueNode::new("greeting", "Hi.")]);
        assert!(matches!(result, Err(ContentError::DuplicateDialogue { .. })));

        registry
            .add_dialogue("elara", vec![DialogueNode::new("farewell", "Safe travels.")])
            .unwrap();
        assert_eq!(registry.dialogue("elara").unwrap().len(), 3);
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut registry = ContentRegistry::from_toml_str(ELARA_TOML).unwrap();

        let file = ContentFile {
            quests: vec![Quest::new("wolf_hunt", "Wolf Hunt"), Quest::new("find_herbs", "Again")],
            dialogues: BTreeMap::new(),
        };
        assert!(matches!(registry.extend(file), Err(ContentError::DuplicateQuest(_))));
        assert!(registry.quest("wolf_hunt").is_none());

        let mut dialogues = BTreeMap::new();
        dialogues.insert(NpcId::new("borin"), vec![DialogueNode::new("hello", "Hm.")]);
        dialogues.insert(
            NpcId::new("elara"),
            vec![DialogueNode::new("farewell", "Bye."), DialogueNode::new("greeting", "Hi.")],
        );
        let file = ContentFile {
            quests: vec![Quest::new("wolf_hunt", "Wolf Hunt")],
            dialogues,
        };
        assert!(matches!(registry.extend(file), Err(ContentError::DuplicateDialogue { .. })));
        assert!(registry.quest("wolf_hunt").is_none());
        assert!(registry.dialogue("borin").is_none());
        assert_eq!(registry.quest_count(), 1);
        assert_eq!(registry.node_count(), 2);
    }

    #[test]
    fn test_add_dialogue_is_all_or_nothing() {
        let mut registry = ContentRegistry::from_toml_str(ELARA_TOML).unwrap();

        let result = registry.add_dialogue(
            "elara",
            vec![DialogueNode::new("farewell", "Bye."), DialogueNode::new("greeting", "Hi.")],
        );
        assert!(matches!(result, Err(ContentError::DuplicateDialogue { .. })));
        assert!(registry.dialogue_node("elara", "farewell").is_none());

        let result = registry.add_dialogue(
            "borin",
            vec![DialogueNode::new("hello", "Hm."), DialogueNode::new("hello", "Hm!")],
        );
        assert!(matches!(result, Err(ContentError::DuplicateDialogue { .. })));
        assert!(registry.dialogue("borin").is_none());
    }

    #[test]
    fn test_odd_values_do_not_fail_load() {
        let content = r#"
[[quests]]
id = "odd"
name = "Odd Values"

[[quests.requirements]]
type = "level"
value = "high"

[[quests.rewards]]
type = "title"
value = true

[[quests.rewards]]
type = "item"
value = "potion"
quantity = -1

[[dialogues.elara]]
id = "greeting"
text = "Hello."
isRoot = true

[[dialogues.elara.conditions]]
type = "flag"
target = "met_elara"
value = true

[[dialogues.elara.conditions]]
type = "stat"
target = "strength"
operator = ">="
value = 2.5
"#;
        let registry = ContentRegistry::from_toml_str(content).unwrap();

        let quest = registry.quest("odd").unwrap();
        assert_eq!(quest.requirements, vec![Requirement::Unknown { kind: "level".into() }]);
        assert_eq!(
            quest.rewards[0],
            crate::quest::Reward::Other {
                kind: "title".to_string(),
                value: Some(game_rules::Scalar::Bool(true)),
            }
        );
        assert!(matches!(quest.rewards[1], crate::quest::Reward::Other { .. }));

        let greeting = registry.dialogue_node("elara", "greeting").unwrap();
        assert_eq!(greeting.conditions[0], Condition::flag("met_elara"));
        assert!(greeting.conditions[1].kind.is_unknown());
    }

    #[test]
    fn test_malformed_content() {
        let result = ContentRegistry::from_toml_str("[[quests]]\nname = 3");
        assert!(matches!(result, Err(ContentError::Toml { .. })));

        let result = ContentRegistry::from_json_str("{\"quests\": 5}");
        assert!(matches!(result, Err(ContentError::Json { .. })));
    }

    #[test]
    fn test_validate_reports_issues() {
        let content = r#"
[[quests]]
id = "escort"
name = "Escort"

[[quests.objectives]]
id = "walk"
type = "visit"
target = "gate"
required = 0

[[quests.requirements]]
type = "karma"

[[quests.requirements]]
type = "quest"
target = "prologue"

[[dialogues.elara]]
id = "greeting"
text = "Hello."
isRoot = true

[[dialogues.elara.conditions]]
type = "weather"
target = "rain"

[[dialogues.elara.actions]]
type = "teleport"

[[dialogues.elara.options]]
id = "mill"
text = "The mill?"
nextDialogue = "mill_story"

[[dialogues.elara.options.actions]]
type = "start_quest"
questId = "haunted_mill"
"#;
        let registry = ContentRegistry::from_toml_str(content).unwrap();
        let issues = registry.validate();

        assert_eq!(issues.len(), 7);
        assert!(issues.contains(&ContentIssue::ZeroRequiredObjective {
            quest: "escort".into(),
            objective: "walk".into(),
        }));
        assert!(issues.contains(&ContentIssue::UnknownRequirement {
            quest: "escort".into(),
            kind: "karma".to_string(),
        }));
        assert!(issues.contains(&ContentIssue::DanglingDialogue {
            npc: "elara".into(),
            node: "greeting".into(),
            option: "mill".to_string(),
            target: "mill_story".into(),
        }));
        assert_eq!(issues.iter().filter(|i| i.is_reference()).count(), 3);
    }

    #[test]
    fn test_check_strict_mode() {
        let mut registry = ContentRegistry::new();
        registry
            .add_dialogue(
                "elara",
                vec![DialogueNode::new("greeting", "Hello.").root().with_option(
                    crate::dialogue::DialogueOption::new("mill", "The mill?").leading_to("mill_story"),
                )],
            )
            .unwrap();

        assert!(registry.check(&EngineConfig::default()).is_ok());

        let strict = EngineConfig {
            strict_references: true,
            ..EngineConfig::default()
        };
        let result = registry.check(&strict);
        assert!(matches!(&result, Err(ContentError::InvalidReferences(issues)) if issues.len() == 1));
    }

    #[test]
    fn test_strict_mode_tolerates_unknown_kinds() {
        let mut registry = ContentRegistry::new();
        registry
            .add_dialogue(
                "elara",
                vec![DialogueNode::new("greeting", "Hello.").with_action(Action::Unknown)],
            )
            .unwrap();

        let strict = EngineConfig {
            strict_references: true,
            ..EngineConfig::default()
        };
        assert_eq!(registry.validate().len(), 1);
        assert!(registry.check(&strict).is_ok());
    }

    #[test]
    fn test_load_dir_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("elara.toml"), ELARA_TOML).unwrap();
        std::fs::create_dir(dir.path().join("north")).unwrap();
        std::fs::write(dir.path().join("north").join("borin.json"), BORIN_JSON).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let registry = ContentRegistry::load_dir(dir.path()).unwrap();
        assert_eq!(registry.quest_count(), 2);
        assert_eq!(registry.npcs().count(), 2);
        assert!(registry.validate().is_empty());

        let state = GameState::new().with_quest("find_herbs", QuestStatus::Completed);
        let wolf_hunt = registry.quest("wolf_hunt").unwrap();
        assert!(crate::quest::check_requirements(wolf_hunt, &state));
    }

    #[test]
    fn test_load_dir_duplicate_across_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), ELARA_TOML).unwrap();
        std::fs::write(dir.path().join("b.toml"), ELARA_TOML).unwrap();

        let result = ContentRegistry::load_dir(dir.path());
        assert!(matches!(result, Err(ContentError::DuplicateQuest(_))));
    }

    #[test]
    fn test_load_file_unsupported_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.yaml");
        std::fs::write(&path, "quests: []").unwrap();

        let mut registry = ContentRegistry::new();
        assert!(matches!(
            registry.load_file(&path),
            Err(ContentError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ContentRegistry::load_dir(&dir.path().join("missing")),
            Err(ContentError::Io { .. })
        ));
    }
}
