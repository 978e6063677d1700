//! Quests - definitions, progress tracking and the state machine that moves
//! them from `not_started` to `completed`.

mod definition;
mod events;
mod machine;
mod progress;
mod rewards;

pub use definition::*;
pub use events::*;
pub use machine::*;
pub use progress::*;
pub use rewards::*;
