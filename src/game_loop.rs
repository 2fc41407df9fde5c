//! Fixed-timestep host loop.
//!
//! Polls the keyboard between ticks, advances the game once per tick, and
//! redraws after every tick. Update and draw run on the same thread, so the
//! game state needs no lock.

use crate::assets::Sprites;
use crate::game::{advance, GameState, TickReport};
use crate::input::InputLatch;
use crate::ui::render_game;
use crossterm::event::{self, Event};
use log::{debug, info};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Most ticks run back to back after a stall before the clock resyncs.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Converts elapsed wall-clock time into whole ticks.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: Duration,
    accumulated: Duration,
}

impl FixedStep {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed` and return how many ticks are due.
    ///
    /// Backlog beyond [`MAX_CATCH_UP_TICKS`] is dropped so a long stall does
    /// not fast-forward the game.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
            if ticks == MAX_CATCH_UP_TICKS {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        ticks
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulated)
    }
}

/// Run one tick with the latched input and log what happened.
pub fn run_tick<R: Rng>(
    game: &mut GameState,
    latch: &mut InputLatch,
    rng: &mut R,
) -> TickReport {
    let report = advance(game, latch.take(), rng);
    log_report(game, &report);
    report
}

fn log_report(game: &GameState, report: &TickReport) {
    if report.started {
        info!("Game started");
    }
    if let Some(pillar) = report.spawned {
        debug!(
            "Spawned pillar at x={} gap_top={} (frame {})",
            pillar.x, pillar.gap_top, game.frame_count
        );
    }
    if report.scored > 0 {
        debug!("Passed {} pillar(s), score {}", report.scored, game.score);
    }
    if report.crashed {
        info!("Game over with score {}", game.score);
    }
    if report.reset {
        info!("Game reset");
    }
}

/// Drive the game until the player quits.
pub fn run<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    game: &mut GameState,
    sprites: &Sprites,
    rng: &mut R,
    fps: u32,
) -> io::Result<()> {
    let mut clock = FixedStep::new(fps);
    let mut latch = InputLatch::new();
    let mut last = Instant::now();

    terminal.draw(|f| {
        let area = f.size();
        render_game(f, area, game, sprites)
    })?;

    loop {
        // Wait for input, but never past the next tick
        if event::poll(clock.until_next())? {
            if let Event::Key(key) = event::read()? {
                latch.handle_key(&key);
            }
        }
        if latch.quit_requested() {
            info!("Quit requested");
            return Ok(());
        }

        let now = Instant::now();
        let due = clock.advance(now - last);
        last = now;
        if due == 0 {
            continue;
        }

        for _ in 0..due {
            run_tick(game, &mut latch, rng);
        }
        terminal.draw(|f| {
            let area = f.size();
            render_game(f, area, game, sprites)
        })?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Phase};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fixed_step_interval() {
        let clock = FixedStep::new(50);
        assert_eq!(clock.interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut clock = FixedStep::new(50);
        assert_eq!(clock.advance(Duration::from_millis(15)), 0);
        assert_eq!(clock.until_next(), Duration::from_millis(5));
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.until_next(), Duration::from_millis(15));
        assert_eq!(clock.advance(Duration::from_millis(35)), 2);
    }

    #[test]
    fn test_fixed_step_caps_catch_up() {
        let mut clock = FixedStep::new(50);
        assert_eq!(clock.advance(Duration::from_secs(10)), MAX_CATCH_UP_TICKS);
        assert_eq!(clock.until_next(), Duration::from_millis(20));
    }

    #[test]
    fn test_run_tick_consumes_latch() {
        let mut game = GameState::new(GameConfig::default());
        let mut latch = InputLatch::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        latch.handle_key(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty()));
        let report = run_tick(&mut game, &mut latch, &mut rng);
        assert!(report.started);
        assert_eq!(game.phase, Phase::Playing);

        // Jump was consumed, so gravity applies again
        run_tick(&mut game, &mut latch, &mut rng);
        assert!((game.bird.velocity - (-1.9)).abs() < 1e-9);
    }
}
