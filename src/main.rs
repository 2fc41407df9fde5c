use anyhow::{Context, Result};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::assets::Sprites;
use flappy::config::{AppConfig, Command, HELP};
use flappy::{build_info, game_loop, logging, GameState};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> Result<()> {
    let config = match AppConfig::from_env()? {
        Command::Help => {
            print!("{HELP}");
            return Ok(());
        }
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Command::Run(config) => config,
    };

    logging::init(&config.log_file)?;
    info!("Starting {}", build_info::version_line());
    info!("Configuration: {:?}", config);

    // Everything that can fail happens before the terminal is taken over
    let sprites = Sprites::load(&config.asset_dir).context("failed to load sprites")?;

    #[cfg(feature = "web")]
    let _server = match config.http_port {
        Some(port) => Some(
            flappy::web::spawn_static_server(port, config.public_dir.clone())
                .context("failed to start static file server")?,
        ),
        None => None,
    };

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Using RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut game = GameState::new(config.game);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = game_loop::run(&mut terminal, &mut game, &sprites, &mut rng, config.fps);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("game loop failed")?;
    info!("Exiting with score {}", game.score);
    Ok(())
}
