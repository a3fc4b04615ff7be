mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use arcade_shooter::config::{self, GameConfig};
use arcade_shooter::game::Game;
use arcade_shooter::input::{Control, InputSource, Trigger};

use display::TerminalPresenter;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Log file path; unset means logging stays off (stdout belongs to the UI).
const LOG_ENV: &str = "ARCADE_SHOOTER_LOG";

// ── Keyboard state ────────────────────────────────────────────────────────────

/// A press arriving within this many frames of the previous press/repeat of
/// the same key is OS auto-repeat, not a new tap.  Must stay below the gap of
/// a fast double tap (3 frames at 30 FPS).
const REPEAT_GAP: u64 = 2;

/// Maps each held key → the frame it was last seen (press or repeat).
///
/// Fire and start are counted per fresh press rather than derived from the
/// held level, so a second tap inside `HOLD_WINDOW` or two taps drained in
/// the same frame each yield their own trigger.
#[derive(Default)]
struct TerminalInput {
    key_frame: HashMap<KeyCode, u64>,
    /// Fresh presses not yet consumed by a trigger sample.
    pending: HashMap<KeyCode, u32>,
    frame: u64,
}

impl TerminalInput {
    fn press(&mut self, code: KeyCode) {
        let fresh = match self.key_frame.get(&code) {
            None => true,
            Some(&last) => self.frame.saturating_sub(last) > REPEAT_GAP,
        };
        if fresh {
            *self.pending.entry(code).or_insert(0) += 1;
        }
        self.key_frame.insert(code, self.frame);
    }

    /// Keyboard-enhancement repeat: keeps the key held, never a new press.
    fn repeat(&mut self, code: KeyCode) {
        self.key_frame.insert(code, self.frame);
    }

    fn release(&mut self, code: &KeyCode) {
        self.key_frame.remove(code);
    }

    fn is_down(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn take_press(&mut self, key: KeyCode) -> bool {
        match self.pending.get_mut(&key) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_down(k))
    }
}

impl InputSource for TerminalInput {
    fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Left => self.any_down(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            Control::Right => self.any_down(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        }
    }

    fn take_edge(&mut self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Fire => self.take_press(KeyCode::Char(' ')),
            Trigger::Start => self.take_press(KeyCode::Enter),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    config: GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    let frame = config.frame_duration();
    let mut game = Game::new(config, TerminalPresenter::default(), thread_rng());
    let mut input = TerminalInput::default();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        input.frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                    input.press(code);
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => input.repeat(code),
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => input.release(&code),
            }
        }

        let now = Instant::now();
        game.tick_from(&mut input, now - last);
        last = now;

        display::render(out, game.presenter(), &game.state().config)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging() -> io::Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    init_logging()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::load_or_default(config_path.as_deref())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
