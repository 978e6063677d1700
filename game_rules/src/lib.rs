//! # Game Rules
//!
//! The shared rule vocabulary for quests and dialogue: the game state snapshot
//! that content is evaluated against, the closed set of conditions and actions,
//! and the commands emitted back to the host store.
//!
//! Nothing in this crate mutates game state. Conditions read a [`GameState`],
//! actions become [`Command`]s for the host to apply.

pub mod actions;
pub mod conditions;
pub mod entities;
pub mod mechanics;
pub mod world_state;

pub use actions::*;
pub use conditions::*;
pub use entities::*;
pub use mechanics::*;
pub use world_state::*;
