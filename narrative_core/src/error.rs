//! Errors raised while loading content and configuration.
//!
//! Runtime operations never fail: unknown references and illegal transitions
//! are no-ops. Only the loading boundary returns errors.

use std::path::PathBuf;

use game_rules::{DialogueId, NpcId, QuestId};
use thiserror::Error;

use crate::registry::ContentIssue;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML from {origin}: {source}")]
    Toml {
        origin: String,
        source: toml::de::Error,
    },

    #[error("Failed to parse JSON from {origin}: {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },

    #[error("Unsupported content file: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("Duplicate quest id: {0}")]
    DuplicateQuest(QuestId),

    #[error("Duplicate dialogue node '{node}' for npc '{npc}'")]
    DuplicateDialogue { npc: NpcId, node: DialogueId },

    #[error("Content has {} invalid reference(s)", .0.len())]
    InvalidReferences(Vec<ContentIssue>),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),
}

impl ContentError {
    /// I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContentError::Io {
            path: path.into(),
            source,
        }
    }

    /// TOML parse failure in `origin`.
    pub fn toml(origin: impl Into<String>, source: toml::de::Error) -> Self {
        ContentError::Toml {
            origin: origin.into(),
            source,
        }
    }

    /// JSON parse failure in `origin`.
    pub fn json(origin: impl Into<String>, source: serde_json::Error) -> Self {
        ContentError::Json {
            origin: origin.into(),
            source,
        }
    }
}

pub type ContentResult<T> = Result<T, ContentError>;
