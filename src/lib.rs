//! Flappy - a terminal arcade game with a static file sidecar.
//!
//! This module exposes the game logic for testing and for the binary.

pub mod assets;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod ui;
pub mod web;

pub use config::{AppConfig, Command, ConfigError};
pub use game::{advance, GameConfig, GameState, Phase, Pillar, TickInput, TickReport};
