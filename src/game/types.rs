//! Flappy game data structures.
//!
//! All coordinates are logical canvas pixels: x grows to the right, y grows
//! downward, and the origin is the top-left corner of the canvas.

use crate::config::ConfigError;
use crate::constants::*;
use rand::Rng;
use std::collections::VecDeque;

/// Geometry and physics of a game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Side of the bird's square collision slot, anchored at x = 0.
    pub bird_size: i32,
    /// Column the bird sprite is drawn at. Collision ignores it.
    pub bird_draw_x: i32,
    pub pillar_width: i32,
    /// Height of the gap band between the two halves of a pillar.
    pub pillar_gap: i32,
    /// Pixels a pillar moves left per tick.
    pub pillar_speed: i32,
    /// Velocity added every playing tick.
    pub gravity: f64,
    /// Velocity set (not added) when the bird jumps.
    pub jump_impulse: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            bird_size: BIRD_SIZE,
            bird_draw_x: BIRD_DRAW_X,
            pillar_width: PILLAR_WIDTH,
            pillar_gap: PILLAR_GAP,
            pillar_speed: PILLAR_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
        }
    }
}

impl GameConfig {
    /// Check that the geometry can drive a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("bird_size", self.bird_size),
            ("pillar_width", self.pillar_width),
            ("pillar_gap", self.pillar_gap),
            ("pillar_speed", self.pillar_speed),
        ];
        for (name, value) in dimensions {
            if value <= 0 {
                return Err(ConfigError::NonPositive {
                    name,
                    value: value.to_string(),
                });
            }
        }
        if self.spawn_cadence() == 0 {
            return Err(ConfigError::ZeroSpawnCadence {
                screen_width: self.screen_width,
                pillar_speed: self.pillar_speed,
            });
        }
        if !self.gravity.is_finite() || !self.jump_impulse.is_finite() {
            return Err(ConfigError::NonFinitePhysics);
        }
        Ok(())
    }

    /// Logical canvas size, independent of the host window.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.screen_width, self.screen_height)
    }

    /// Ticks between two pillar spawns.
    pub fn spawn_cadence(&self) -> u64 {
        if self.pillar_speed <= 0 {
            return 0;
        }
        (self.screen_width / self.pillar_speed).max(0) as u64
    }

    /// Exclusive upper bound of the random gap offset.
    ///
    /// Includes `pillar_width` as well as the gap, so with the default canvas
    /// the gap never starts below row 230.
    pub fn gap_offset_span(&self) -> i32 {
        self.screen_height - self.pillar_gap - self.pillar_width
    }

    /// Initial bird height.
    pub fn bird_start_y(&self) -> f64 {
        f64::from(self.screen_height / 2)
    }
}

/// Phase of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started. Physics paused until the first jump.
    Waiting,
    Playing,
    /// Crashed. Frozen until confirm resets.
    Over,
}

/// The player sprite. Horizontal position is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Vertical position in pixels.
    pub y: f64,
    /// Vertical velocity in pixels/tick (positive = downward).
    pub velocity: f64,
}

/// A pair of obstacles with a gap band between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pillar {
    /// Left edge.
    pub x: i32,
    /// First row of the gap band.
    pub gap_top: i32,
}

impl Pillar {
    /// True when the pillar's columns overlap the bird's slot.
    pub fn in_bird_column(&self, config: &GameConfig) -> bool {
        self.x < config.bird_size && self.x > -config.pillar_width
    }

    /// True when `y` lies outside the gap band `[gap_top, gap_top + gap]`.
    pub fn blocks(&self, y: f64, config: &GameConfig) -> bool {
        y < f64::from(self.gap_top) || y > f64::from(self.gap_top + config.pillar_gap)
    }

    /// True once the pillar has scrolled fully past the left edge.
    pub fn is_offscreen(&self, config: &GameConfig) -> bool {
        self.x < -config.pillar_width
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: Phase,
    pub bird: Bird,
    /// Active pillars in spawn order, which is also decreasing x.
    pub pillars: VecDeque<Pillar>,
    /// Playing ticks since the last reset.
    pub frame_count: u64,
    /// Pillars that scrolled fully past the left edge.
    pub score: u32,
}

impl GameState {
    /// Create a waiting game.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::Waiting,
            bird: Bird {
                y: config.bird_start_y(),
                velocity: 0.0,
            },
            pillars: VecDeque::new(),
            frame_count: 0,
            score: 0,
        }
    }

    /// Restore every field to its initial value, keeping the config.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::Waiting
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Draw a gap offset for a new pillar.
    ///
    /// Negative offsets clamp to 0 instead of being redrawn, which piles every
    /// such draw onto the top edge.
    pub fn random_gap_top<R: Rng>(&self, rng: &mut R) -> i32 {
        let span = self.config.gap_offset_span();
        let drawn = if span > 0 { rng.gen_range(0..span) } else { span };
        drawn.max(0)
    }

    /// Spawn a pillar at the right edge with a random gap.
    pub fn spawn_pillar<R: Rng>(&mut self, rng: &mut R) -> Pillar {
        let pillar = Pillar {
            x: self.config.screen_width,
            gap_top: self.random_gap_top(rng),
        };
        self.pillars.push_back(pillar);
        pillar
    }
}
