//! The flappy state machine.
//!
//! The bird falls under constant gravity and jumps on input while pillars
//! scroll in from the right. Passing a pillar scores a point, touching one
//! ends the run, and confirm starts over.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
