//! Character-art sprites loaded once at startup.
//!
//! A sprite file is plain text. An optional first line `color: <value>` sets
//! the foreground color (any name or `#rrggbb` ratatui understands); every
//! following line is a row of art. Rows are padded with spaces to the widest
//! row, and spaces are transparent when drawn.

use crate::constants::{BIRD_SPRITE_FILE, PILLAR_SPRITE_FILE};
use log::info;
use ratatui::style::Color;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Sprite loading errors. All are fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read sprite {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sprite {path} has no art")]
    Empty { path: PathBuf },

    #[error("sprite {path} has invalid color {value:?}")]
    BadColor { path: PathBuf, value: String },
}

/// An immutable grid of glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
    pub color: Color,
}

impl Sprite {
    /// Parse sprite text. `path` is only used in errors.
    pub fn parse(path: &Path, text: &str) -> Result<Self, AssetError> {
        let mut lines = text.lines().peekable();

        let mut color = Color::White;
        let header = lines.peek().copied();
        if let Some(value) = header.and_then(|line| line.trim().strip_prefix("color:")) {
            let value = value.trim();
            color = Color::from_str(value).map_err(|_| AssetError::BadColor {
                path: path.to_path_buf(),
                value: value.to_string(),
            })?;
            lines.next();
        }

        let mut rows: Vec<Vec<char>> = lines
            .map(|line| line.trim_end().chars().collect())
            .collect();
        // Trailing blank lines are not part of the art
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }
        for row in &mut rows {
            row.resize(width, ' ');
        }

        Ok(Self { rows, width, color })
    }

    /// Read and parse a sprite file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Glyph at a cell, wrapping in both directions so the sprite tiles.
    pub fn tile(&self, col: usize, row: usize) -> char {
        self.rows[row % self.rows.len()][col % self.width]
    }

    /// Glyph at normalized coordinates in `[0, 1)`, for stretching the
    /// sprite over an arbitrary box.
    pub fn sample(&self, u: f64, v: f64) -> char {
        let col = (u.clamp(0.0, 1.0) * self.width as f64) as usize;
        let row = (v.clamp(0.0, 1.0) * self.rows.len() as f64) as usize;
        self.rows[row.min(self.rows.len() - 1)][col.min(self.width - 1)]
    }
}

/// The two sprites the renderer needs.
#[derive(Debug, Clone)]
pub struct Sprites {
    pub bird: Sprite,
    pub pillar: Sprite,
}

impl Sprites {
    /// Load `bird.txt` and `pillar.txt` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let bird = Sprite::load(&dir.join(BIRD_SPRITE_FILE))?;
        let pillar = Sprite::load(&dir.join(PILLAR_SPRITE_FILE))?;
        info!(
            "Loaded sprites from {}: bird {}x{}, pillar {}x{}",
            dir.display(),
            bird.width(),
            bird.height(),
            pillar.width(),
            pillar.height()
        );
        Ok(Self { bird, pillar })
    }
}
