//! Terminal speedcubing timer.
//!
//! Shows a scramble, times a solve with the spacebar, and requests a new
//! scramble after every solve.

mod app;
mod client;
mod input;
mod timer;
mod ui;

pub use app::{App, Command, GENERATING_TEXT, SCRAMBLE_ERROR_TEXT, SOLVING_TEXT};
pub use client::{ClientError, ScrambleClient, ScrambleSource, error_message};
pub use input::{KeyAction, map_key};
pub use timer::{KeyMode, Stopwatch, TimerPhase, TimerTransition, format_elapsed};
pub use ui::{NET_HEIGHT, NET_WIDTH, solved_net};

use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Redraw interval; also bounds key-event latency.
const FRAME: Duration = Duration::from_millis(16);

/// Run the timer TUI.
pub async fn run_tui(source: ScrambleSource) -> Result<()> {
    // Log to a file so output does not interfere with the TUI
    let log_file = std::fs::File::create("cube_timer_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?source, "Starting cube timer TUI");

    enable_raw_mode()?;

    let mode = if supports_keyboard_enhancement().unwrap_or(false) {
        KeyMode::HoldRelease
    } else {
        KeyMode::PressOnly
    };
    info!(?mode, "Key mode selected");

    let mut terminal = match enter_screen(mode) {
        Ok(terminal) => terminal,
        Err(e) => {
            error!(error = ?e, "Terminal setup failed");
            disable_raw_mode()?;
            leave_screen(&mut io::stdout(), mode)?;
            return Err(e);
        }
    };

    let res = run_loop(&mut terminal, source, mode).await;

    disable_raw_mode()?;
    leave_screen(terminal.backend_mut(), mode)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Timer loop error");
    }
    res
}

/// Switches to the alternate screen and, in hold mode, asks the terminal to
/// report key releases.
fn enter_screen(mode: KeyMode) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mode == KeyMode::HoldRelease {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Undoes [`enter_screen`]. Safe to call after a partial setup.
fn leave_screen<W: Write>(out: &mut W, mode: KeyMode) -> io::Result<()> {
    if mode == KeyMode::HoldRelease {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, LeaveAlternateScreen)
}

#[instrument(skip_all, fields(mode = ?mode))]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    source: ScrambleSource,
    mode: KeyMode,
) -> Result<()> {
    let (scramble_tx, mut scramble_rx) = mpsc::unbounded_channel();
    let mut app = App::new(mode);

    spawn_fetch(&source, &scramble_tx);

    loop {
        let now = Instant::now();
        terminal.draw(|f| ui::draw(f, &app, now))?;

        while let Ok(result) = scramble_rx.try_recv() {
            app.handle_scramble(result);
        }

        if !event::poll(FRAME)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            let action = map_key(key);
            debug!(?action, "Key action");
            match app.handle_key(action, Instant::now()) {
                Some(Command::FetchScramble) => spawn_fetch(&source, &scramble_tx),
                Some(Command::Quit) => {
                    info!("User quit");
                    return Ok(());
                }
                None => {}
            }
        }
    }
}

fn spawn_fetch(source: &ScrambleSource, tx: &mpsc::UnboundedSender<Result<String, String>>) {
    let source = source.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source
            .next_scramble()
            .await
            .map_err(|e| e.message);
        if tx.send(result).is_err() {
            debug!("Timer closed before scramble arrived");
        }
    });
}
