//! # Narrative Core
//!
//! Quest and dialogue engine built on the `game_rules` vocabulary. Content
//! (quests and per-NPC dialogue graphs) is loaded once into a read-only
//! [`ContentRegistry`]; everything that happens afterwards is a pure
//! transition over a [`game_rules::GameState`] snapshot that returns new
//! values and [`game_rules::Command`]s for the host store.
//!
//! ## Core Components
//!
//! - **quest**: Quest definitions, progress records and the quest state machine
//! - **dialogue**: Dialogue graphs and the conversation walker
//! - **registry**: Content loading and validation
//! - **engine**: Facade bundling registry, configuration and clock
//!
//! ## Design Philosophy
//!
//! - **Resilient**: Unknown content and illegal transitions are no-ops, never errors
//! - **Deterministic**: Timestamps come from an injectable [`Clock`]
//! - **Host-Driven**: The engine never mutates game state; the host applies commands

pub mod clock;
pub mod config;
pub mod dialogue;
pub mod engine;
pub mod error;
pub mod quest;
pub mod registry;

pub use clock::*;
pub use config::*;
pub use dialogue::*;
pub use engine::*;
pub use error::*;
pub use quest::*;
pub use registry::*;
