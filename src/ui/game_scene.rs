//! Terminal rendering of the game.
//!
//! The game lives on a fixed logical canvas; each terminal cell shows the
//! canvas point under its center, so the picture stretches to fill whatever
//! area the host gives it.

use crate::assets::{Sprite, Sprites};
use crate::game::{GameConfig, GameState, Phase};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
    Frame,
};

pub const BACKGROUND: Color = Color::Rgb(75, 145, 201);
pub const START_PROMPT: &str = "Press Space or Up Arrow to Start";
pub const GAME_OVER_PROMPT: &str = "GAME OVER. Press Enter to Restart";

/// Maps terminal cells to logical canvas points.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    area: Rect,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    pub fn new(area: Rect, config: &GameConfig) -> Self {
        let (width, height) = config.canvas_size();
        Self {
            area,
            canvas_width: f64::from(width),
            canvas_height: f64::from(height),
        }
    }

    /// Canvas point at the center of cell `(x, y)`.
    pub fn to_canvas(&self, x: u16, y: u16) -> (f64, f64) {
        let col = f64::from(x - self.area.x) + 0.5;
        let row = f64::from(y - self.area.y) + 0.5;
        (
            col * self.canvas_width / f64::from(self.area.width),
            row * self.canvas_height / f64::from(self.area.height),
        )
    }

    /// Canvas pixels per cell, horizontally.
    pub fn cell_width(&self) -> f64 {
        self.canvas_width / f64::from(self.area.width)
    }

    /// Canvas pixels per cell, vertically.
    pub fn cell_height(&self) -> f64 {
        self.canvas_height / f64::from(self.area.height)
    }
}

/// Background, pillars and bird. Text overlays are drawn on top by
/// [`render_game`].
pub struct PlayfieldWidget<'a> {
    game: &'a GameState,
    sprites: &'a Sprites,
}

impl<'a> PlayfieldWidget<'a> {
    pub fn new(game: &'a GameState, sprites: &'a Sprites) -> Self {
        Self { game, sprites }
    }

    /// Pillar glyph covering canvas point `(px, py)`, if any.
    fn pillar_glyph(&self, view: &Viewport, px: f64, py: f64) -> Option<char> {
        let config = &self.game.config;
        let pillar = self.game.pillars.iter().find(|p| {
            let left = f64::from(p.x);
            let gap_top = f64::from(p.gap_top);
            let in_columns = px >= left && px < left + f64::from(config.pillar_width);
            let in_band = py >= gap_top && py < gap_top + f64::from(config.pillar_gap);
            in_columns && !in_band
        })?;

        // Tile in cell units so the pattern scrolls with the pillar
        let col = ((px - f64::from(pillar.x)) / view.cell_width()) as usize;
        let row = (py / view.cell_height()) as usize;
        Some(self.sprites.pillar.tile(col, row))
    }

    /// Bird glyph covering canvas point `(px, py)`, if any.
    fn bird_glyph(&self, px: f64, py: f64) -> Option<char> {
        let config = &self.game.config;
        let size = f64::from(config.bird_size);
        let u = (px - f64::from(config.bird_draw_x)) / size;
        let v = (py - self.game.bird.y) / size;
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        Some(self.sprites.bird.sample(u, v)).filter(|c| *c != ' ')
    }
}

impl Widget for PlayfieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let view = Viewport::new(area, &self.game.config);
        let background = Style::default().bg(BACKGROUND);

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let (px, py) = view.to_canvas(x, y);
                let cell = buf.get_mut(x, y);
                cell.set_char(' ').set_style(background);

                if let Some(glyph) = self.bird_glyph(px, py) {
                    draw_glyph(cell, glyph, &self.sprites.bird, true);
                } else if let Some(glyph) = self.pillar_glyph(&view, px, py) {
                    draw_glyph(cell, glyph, &self.sprites.pillar, false);
                }
            }
        }
    }
}

fn draw_glyph(cell: &mut ratatui::buffer::Cell, glyph: char, sprite: &Sprite, bold: bool) {
    let mut style = Style::default().fg(sprite.color).bg(BACKGROUND);
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    cell.set_char(glyph).set_style(style);
}

/// Render the whole game scene: playfield, score, and phase prompt.
pub fn render_game(frame: &mut Frame, area: Rect, game: &GameState, sprites: &Sprites) {
    frame.render_widget(PlayfieldWidget::new(game, sprites), area);

    if area.height == 0 {
        return;
    }

    let text_style = Style::default()
        .fg(Color::White)
        .bg(BACKGROUND)
        .add_modifier(Modifier::BOLD);

    let score = Paragraph::new(format!("Score: {}", game.score)).style(text_style);
    frame.render_widget(score, Rect { height: 1, ..area });

    let prompt = match game.phase {
        Phase::Waiting => Some(START_PROMPT),
        Phase::Over => Some(GAME_OVER_PROMPT),
        Phase::Playing => None,
    };
    if let Some(prompt) = prompt {
        let row = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(prompt)
                .style(text_style)
                .alignment(Alignment::Center),
            row,
        );
    }
}
