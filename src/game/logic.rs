//! Game logic for the flappy state machine.

use super::types::{GameState, Phase, Pillar};
use rand::Rng;

/// Input signals sampled for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (Space or Up).
    pub jump: bool,
    /// Confirm restart (Enter). Only meaningful after a crash.
    pub confirm: bool,
}

impl TickInput {
    pub const NONE: Self = Self {
        jump: false,
        confirm: false,
    };
    pub const JUMP: Self = Self {
        jump: true,
        confirm: false,
    };
    pub const CONFIRM: Self = Self {
        jump: false,
        confirm: true,
    };
}

/// What happened during one tick.
///
/// The host maps these to log lines; the game logic never touches the
/// presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The game left `Waiting` this tick.
    pub started: bool,
    /// Pillar spawned at the right edge this tick.
    pub spawned: Option<Pillar>,
    /// Pillars that scrolled off and scored this tick.
    pub scored: u32,
    /// The bird hit a pillar this tick.
    pub crashed: bool,
    /// The game was reset to `Waiting` this tick.
    pub reset: bool,
}

/// Advance the game by one tick.
///
/// A jump while waiting starts the game and the same tick is simulated as a
/// playing tick. Confirm is checked last, so a crash and a held confirm in the
/// same tick reset immediately.
pub fn advance<R: Rng>(game: &mut GameState, input: TickInput, rng: &mut R) -> TickReport {
    let mut report = TickReport::default();

    if game.phase == Phase::Waiting && input.jump {
        game.phase = Phase::Playing;
        report.started = true;
    }

    if game.phase == Phase::Playing {
        step_playing(game, input, rng, &mut report);
    }

    if game.phase == Phase::Over && input.confirm {
        game.reset();
        report.reset = true;
    }

    report
}

/// One playing tick: physics, spawning, scrolling, collision.
fn step_playing<R: Rng>(
    game: &mut GameState,
    input: TickInput,
    rng: &mut R,
    report: &mut TickReport,
) {
    let config = game.config;

    // Gravity, then the jump overrides it
    game.bird.velocity += config.gravity;
    if input.jump {
        game.bird.velocity = config.jump_impulse;
    }
    game.bird.y += game.bird.velocity;

    game.frame_count += 1;
    let cadence = config.spawn_cadence();
    if cadence > 0 && game.frame_count % cadence == 0 {
        report.spawned = Some(game.spawn_pillar(rng));
    }

    for pillar in &mut game.pillars {
        pillar.x -= config.pillar_speed;
    }
    debug_assert!(
        game.pillars
            .iter()
            .zip(game.pillars.iter().skip(1))
            .all(|(a, b)| a.x < b.x),
        "pillars out of spawn order"
    );

    // Spawn order keeps the oldest (leftmost) pillar at the front
    while game
        .pillars
        .front()
        .is_some_and(|p| p.is_offscreen(&config))
    {
        game.pillars.pop_front();
        game.score += 1;
        report.scored += 1;
    }

    if check_collision(game) {
        game.phase = Phase::Over;
        report.crashed = true;
    }
}

/// True if the bird is outside the gap of any pillar in its column.
///
/// There is no floor or ceiling: with no pillar in the column the bird can
/// leave the canvas freely.
pub fn check_collision(game: &GameState) -> bool {
    let config = &game.config;
    game.pillars
        .iter()
        .any(|p| p.in_bird_column(config) && p.blocks(game.bird.y, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn playing_game() -> GameState {
        let mut game = GameState::new(GameConfig::default());
        game.phase = Phase::Playing;
        game
    }

    #[test]
    fn test_waiting_ignores_ticks_without_jump() {
        let mut game = GameState::new(GameConfig::default());
        let mut rng = create_test_rng();
        for _ in 0..100 {
            let report = advance(&mut game, TickInput::NONE, &mut rng);
            assert_eq!(report, TickReport::default());
        }
        assert_eq!(game.phase, Phase::Waiting);
        assert_eq!(game.bird.y, 315.0);
        assert_eq!(game.frame_count, 0);
    }

    #[test]
    fn test_waiting_ignores_confirm() {
        let mut game = GameState::new(GameConfig::default());
        let mut rng = create_test_rng();
        let report = advance(&mut game, TickInput::CONFIRM, &mut rng);
        assert!(!report.reset);
        assert_eq!(game.phase, Phase::Waiting);
    }

    #[test]
    fn test_jump_starts_game_and_plays_same_tick() {
        let mut game = GameState::new(GameConfig::default());
        let mut rng = create_test_rng();

        let report = advance(&mut game, TickInput::JUMP, &mut rng);

        assert!(report.started);
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(game.bird.velocity, -2.0);
        assert_eq!(game.bird.y, 313.0);
        assert_eq!(game.frame_count, 1);
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut game = playing_game();
        let mut rng = create_test_rng();
        advance(&mut game, TickInput::NONE, &mut rng);
        assert!((game.bird.velocity - 0.1).abs() < 1e-9);
        advance(&mut game, TickInput::NONE, &mut rng);
        assert!((game.bird.velocity - 0.2).abs() < 1e-9);
        assert!((game.bird.y - 315.3).abs() < 1e-9);
    }

    #[test]
    fn test_jump_overrides_velocity() {
        let mut game = playing_game();
        game.bird.velocity = 7.5;
        let mut rng = create_test_rng();
        advance(&mut game, TickInput::JUMP, &mut rng);
        assert_eq!(game.bird.velocity, -2.0);
    }

    #[test]
    fn test_velocity_is_uncapped() {
        let mut game = playing_game();
        game.bird.velocity = 1000.0;
        let mut rng = create_test_rng();
        advance(&mut game, TickInput::NONE, &mut rng);
        assert!(game.bird.velocity > 1000.0);
    }

    #[test]
    fn test_pillar_scrolls_by_speed() {
        let mut game = playing_game();
        game.pillars.push_back(Pillar { x: 500, gap_top: 0 });
        let mut rng = create_test_rng();
        advance(&mut game, TickInput::NONE, &mut rng);
        assert_eq!(game.pillars[0].x, 497);
    }

    #[test]
    fn test_offscreen_pillar_scores() {
        let mut game = playing_game();
        game.pillars.push_back(Pillar {
            x: -198,
            gap_top: 0,
        });
        let mut rng = create_test_rng();

        // -198 -> -201 crosses -200
        let report = advance(&mut game, TickInput::NONE, &mut rng);

        assert_eq!(report.scored, 1);
        assert_eq!(game.score, 1);
        assert!(game.pillars.is_empty());
    }

    #[test]
    fn test_pillar_at_boundary_does_not_score() {
        let mut game = playing_game();
        game.pillars.push_back(Pillar {
            x: -197,
            gap_top: 0,
        });
        let mut rng = create_test_rng();

        // -197 -> -200, not yet below -200
        let report = advance(&mut game, TickInput::NONE, &mut rng);

        assert_eq!(report.scored, 0);
        assert_eq!(game.pillars.len(), 1);
    }

    #[test]
    fn test_pillar_in_column_blocks_bird() {
        let mut game = playing_game();
        game.bird.y = 10.0;
        game.pillars.push_back(Pillar {
            x: 20,
            gap_top: 100,
        });
        assert!(check_collision(&game));
    }

    #[test]
    fn test_bird_in_gap_is_safe() {
        let mut game = playing_game();
        game.bird.y = 150.0;
        game.pillars.push_back(Pillar {
            x: 20,
            gap_top: 100,
        });
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_pillar_outside_column_is_safe() {
        let mut game = playing_game();
        game.bird.y = 10.0;
        game.pillars.push_back(Pillar {
            x: 40,
            gap_top: 100,
        });
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_bird_can_leave_screen_without_pillars() {
        let mut game = playing_game();
        game.bird.y = -5000.0;
        let mut rng = create_test_rng();
        advance(&mut game, TickInput::NONE, &mut rng);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_crash_reports_and_freezes() {
        let mut game = playing_game();
        game.bird.y = 629.0;
        game.pillars.push_back(Pillar { x: 10, gap_top: 0 });
        let mut rng = create_test_rng();

        let report = advance(&mut game, TickInput::NONE, &mut rng);
        assert!(report.crashed);
        assert_eq!(game.phase, Phase::Over);

        let frozen = game.clone();
        advance(&mut game, TickInput::JUMP, &mut rng);
        assert_eq!(game.bird, frozen.bird);
        assert_eq!(game.pillars, frozen.pillars);
        assert_eq!(game.frame_count, frozen.frame_count);
    }

    #[test]
    fn test_confirm_resets_after_crash() {
        let mut game = playing_game();
        game.phase = Phase::Over;
        game.score = 4;
        game.frame_count = 900;
        game.bird.y = 12.0;
        game.bird.velocity = 3.0;
        game.pillars.push_back(Pillar { x: 10, gap_top: 0 });
        let mut rng = create_test_rng();

        let report = advance(&mut game, TickInput::CONFIRM, &mut rng);

        assert!(report.reset);
        assert_eq!(game.phase, Phase::Waiting);
        assert_eq!(game.score, 0);
        assert_eq!(game.frame_count, 0);
        assert_eq!(game.bird.y, 315.0);
        assert_eq!(game.bird.velocity, 0.0);
        assert!(game.pillars.is_empty());
    }

    #[test]
    fn test_crash_with_held_confirm_resets_same_tick() {
        let mut game = playing_game();
        game.bird.y = 629.0;
        game.pillars.push_back(Pillar { x: 10, gap_top: 0 });
        let mut rng = create_test_rng();

        let report = advance(&mut game, TickInput::CONFIRM, &mut rng);

        assert!(report.crashed);
        assert!(report.reset);
        assert_eq!(game.phase, Phase::Waiting);
    }

    #[test]
    fn test_playing_ignores_confirm() {
        let mut game = playing_game();
        game.score = 2;
        let mut rng = create_test_rng();
        let report = advance(&mut game, TickInput::CONFIRM, &mut rng);
        assert!(!report.reset);
        assert_eq!(game.score, 2);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_spawn_on_cadence_tick() {
        let mut game = playing_game();
        let mut rng = create_test_rng();
        for _ in 0..212 {
            let report = advance(&mut game, TickInput::JUMP, &mut rng);
            assert!(report.spawned.is_none());
        }
        let report = advance(&mut game, TickInput::JUMP, &mut rng);
        let spawned = report.spawned.expect("pillar on tick 213");
        // Spawned at the right edge, then scrolled once in the same tick
        assert_eq!(game.pillars.back().map(|p| p.x), Some(637));
        assert_eq!(spawned.x, 640);
    }
}
