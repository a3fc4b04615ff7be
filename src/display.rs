//! Rendering layer — all terminal I/O lives here.
//!
//! `TerminalPresenter` records what the core asks to show; `render` then
//! maps the logical playfield onto the terminal grid and draws it.  No game
//! logic is performed here.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arcade_shooter::config::GameConfig;
use arcade_shooter::entities::EntityKind;
use arcade_shooter::host::{EntityHandle, Label, Presenter};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Green;
const C_PLAYER_HIT: Color = Color::Red;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_PROMPT: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Presenter ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct TerminalPresenter {
    labels: HashMap<Label, (String, bool)>,
    entities: HashMap<EntityHandle, (EntityKind, f32, f32)>,
    player: (f32, f32),
    flashing: bool,
    next_handle: u64,
}

impl TerminalPresenter {
    fn label(&self, label: Label) -> Option<&str> {
        match self.labels.get(&label) {
            Some((text, true)) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

impl Presenter for TerminalPresenter {
    fn create_entity(&mut self, kind: EntityKind, x: f32, y: f32, _vy: f32) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        self.entities.insert(handle, (kind, x, y));
        handle
    }

    fn destroy_entity(&mut self, handle: EntityHandle) {
        self.entities.remove(&handle);
    }

    fn set_entity_position(&mut self, handle: EntityHandle, x: f32, y: f32) {
        if let Some(entry) = self.entities.get_mut(&handle) {
            entry.1 = x;
            entry.2 = y;
        }
    }

    fn set_player_position(&mut self, x: f32, y: f32) {
        self.player = (x, y);
    }

    fn set_player_tint(&mut self, flashing: bool) {
        self.flashing = flashing;
    }

    fn set_text(&mut self, label: Label, value: &str) {
        self.labels.entry(label).or_default().0 = value.to_string();
    }

    fn set_visible(&mut self, label: Label, visible: bool) {
        self.labels.entry(label).or_default().1 = visible;
    }
}

// ── Playfield → grid mapping ──────────────────────────────────────────────────

/// Interior of the border: columns 1..w-1, rows 2..h-2.
struct Grid {
    width: u16,
    height: u16,
    field_w: f32,
    field_h: f32,
}

impl Grid {
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cols = self.width.saturating_sub(2).max(1) as f32;
        let rows = self.height.saturating_sub(4).max(1) as f32;
        let col = ((x / self.field_w) * cols).clamp(0.0, cols - 1.0) as u16 + 1;
        let row = ((y / self.field_h) * rows).clamp(0.0, rows - 1.0) as u16 + 2;
        (col, row)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    view: &TerminalPresenter,
    config: &GameConfig,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let grid = Grid {
        width,
        height,
        field_w: config.width,
        field_h: config.height,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &grid)?;
    draw_hud(out, view, &grid)?;

    for &(kind, x, y) in view.entities.values() {
        draw_entity(out, &grid, kind, x, y)?;
    }

    draw_player(out, view, &grid)?;
    draw_messages(out, view, &grid)?;
    draw_controls_hint(out, &grid)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let w = grid.width as usize;
    let h = grid.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &TerminalPresenter, grid: &Grid) -> std::io::Result<()> {
    if let Some(score) = view.label(Label::Score) {
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(score))?;
    }

    if let Some(lives) = view.label(Label::Lives) {
        let rx = grid.width.saturating_sub(lives.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        out.queue(Print(lives))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &TerminalPresenter, grid: &Grid) -> std::io::Result<()> {
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    let (col, row) = grid.cell(view.player.0, view.player.1);
    let color = if view.flashing { C_PLAYER_HIT } else { C_PLAYER };
    out.queue(style::SetForegroundColor(color))?;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    let wing_y = row + 1;
    if wing_y < grid.height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), wing_y))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_entity<W: Write>(
    out: &mut W,
    grid: &Grid,
    kind: EntityKind,
    x: f32,
    y: f32,
) -> std::io::Result<()> {
    let (col, row) = grid.cell(x, y);
    match kind {
        EntityKind::Enemy => {
            out.queue(style::SetForegroundColor(C_ENEMY))?;
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
            out.queue(Print("«▼»"))?;
        }
        EntityKind::Bullet => {
            out.queue(style::SetForegroundColor(C_BULLET))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("|"))?;
        }
    }
    Ok(())
}

// ── Prompts ───────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(out: &mut W, grid: &Grid, row: u16, text: &str) -> std::io::Result<()> {
    let col = (grid.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_messages<W: Write>(out: &mut W, view: &TerminalPresenter, grid: &Grid) -> std::io::Result<()> {
    let mid = grid.height / 2;

    if let Some(text) = view.label(Label::GameOver) {
        out.queue(style::SetForegroundColor(C_GAME_OVER))?;
        for (i, line) in text.lines().enumerate() {
            draw_centered(out, grid, mid.saturating_sub(2) + i as u16, line)?;
        }
    }
    if let Some(text) = view.label(Label::StartPrompt) {
        out.queue(style::SetForegroundColor(C_PROMPT))?;
        draw_centered(out, grid, mid, text)?;
    }
    if let Some(text) = view.label(Label::Instructions) {
        out.queue(style::SetForegroundColor(C_HINT))?;
        draw_centered(out, grid, mid + 2, text)?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ENTER : Start   Q : Quit"))?;
    Ok(())
}
