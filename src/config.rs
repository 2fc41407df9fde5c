//! Host configuration loaded from the command line and environment.
//!
//! Command-line flags win over environment variables, which win over the
//! defaults in [`crate::constants`].

use crate::constants::*;
use crate::game::GameConfig;
use pico_args::Arguments;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

pub const HELP: &str = "\
Flappy - a terminal arcade game with a static file sidecar

USAGE:
  flappy [OPTIONS]

OPTIONS:
  --fps        N      Ticks per second                 [default: env FLAPPY_FPS or 60]
  --port       PORT   Static file server port          [default: env FLAPPY_PORT or 8080]
  --public-dir DIR    Directory served over HTTP       [default: env FLAPPY_PUBLIC_DIR or public]
  --assets     DIR    Directory holding the sprites    [default: env FLAPPY_ASSETS or flappybird]
  --log-file   FILE   Log output file                  [default: env FLAPPY_LOG or flappy.log]
  --seed       N      Seed for reproducible pillars

FLAGS:
  --no-serve          Do not start the static file server
  -h, --help          Print help information
  -v, --version       Print version information

CONTROLS:
  Space / Up          Jump (also starts the game)
  Enter               Restart after a crash
  Esc / q / Ctrl-C    Quit
";

/// Configuration errors. All are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid arguments: {0}")]
    Args(#[from] pico_args::Error),

    #[error("unexpected arguments: {0:?}")]
    Unexpected(Vec<OsString>),

    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: String },

    #[error("pillar speed {pillar_speed} leaves no spawn cadence for width {screen_width}")]
    ZeroSpawnCadence { screen_width: i32, pillar_speed: i32 },

    #[error("gravity and jump impulse must be finite")]
    NonFinitePhysics,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(AppConfig),
    Help,
    Version,
}

/// Everything the host needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub game: GameConfig,
    /// Ticks per second.
    pub fps: u32,
    /// Static file server port. `None` disables the server.
    pub http_port: Option<u16>,
    pub public_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub log_file: PathBuf,
    /// Fixed RNG seed, random when unset.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            fps: DEFAULT_FPS,
            http_port: Some(DEFAULT_HTTP_PORT),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Parse the process arguments and environment.
    pub fn from_env() -> Result<Command, ConfigError> {
        Self::parse(Arguments::from_env(), |var| std::env::var(var).ok())
    }

    /// Parse `args`, falling back to `env` for options not given.
    pub fn parse<F>(mut args: Arguments, env: F) -> Result<Command, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Help and version take priority over everything else
        if args.contains(["-h", "--help"]) {
            return Ok(Command::Help);
        }
        if args.contains(["-v", "--version"]) {
            return Ok(Command::Version);
        }

        let defaults = Self::default();

        let fps = match args.opt_value_from_str("--fps")? {
            Some(fps) => fps,
            None => parse_env_or(&env, "FLAPPY_FPS", defaults.fps)?,
        };
        let port = match args.opt_value_from_str("--port")? {
            Some(port) => port,
            None => parse_env_or(&env, "FLAPPY_PORT", DEFAULT_HTTP_PORT)?,
        };
        let public_dir = args
            .opt_value_from_str("--public-dir")?
            .or_else(|| env("FLAPPY_PUBLIC_DIR").map(PathBuf::from))
            .unwrap_or(defaults.public_dir);
        let asset_dir = args
            .opt_value_from_str("--assets")?
            .or_else(|| env("FLAPPY_ASSETS").map(PathBuf::from))
            .unwrap_or(defaults.asset_dir);
        let log_file = args
            .opt_value_from_str("--log-file")?
            .or_else(|| env("FLAPPY_LOG").map(PathBuf::from))
            .unwrap_or(defaults.log_file);
        let seed = args.opt_value_from_str("--seed")?;
        let no_serve = args.contains("--no-serve");

        let remaining = args.finish();
        if !remaining.is_empty() {
            return Err(ConfigError::Unexpected(remaining));
        }

        let config = Self {
            game: defaults.game,
            fps,
            http_port: (!no_serve).then_some(port),
            public_dir,
            asset_dir,
            log_file,
            seed,
        };
        config.validate()?;
        Ok(Command::Run(config))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::NonPositive {
                name: "fps",
                value: self.fps.to_string(),
            });
        }
        self.game.validate()
    }
}

fn parse_env_or<F, T>(env: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match env(var) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        None => Ok(default),
    }
}
