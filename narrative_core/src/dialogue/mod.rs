//! Dialogue graphs and the walker that moves a conversation through them.

mod node;
mod walker;

pub use node::*;
pub use walker::*;
