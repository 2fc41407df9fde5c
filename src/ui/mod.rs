//! Terminal presentation layer.

pub mod game_scene;

pub use game_scene::{render_game, PlayfieldWidget, Viewport};
