//! Application state and logic.

use super::input::KeyAction;
use super::timer::{KeyMode, Stopwatch, TimerTransition};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Shown while a scramble is being fetched.
pub const GENERATING_TEXT: &str = "Generating Scramble...";
/// Shown while a solve is timed.
pub const SOLVING_TEXT: &str = "Solving...";
/// Shown when a scramble could not be produced.
pub const SCRAMBLE_ERROR_TEXT: &str = "Error generating scramble.";

/// Side effect the run loop must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch a new scramble in the background.
    FetchScramble,
    /// Exit the timer.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    stopwatch: Stopwatch,
    scramble_text: String,
    status_message: String,
    hint: &'static str,
    solves: Vec<std::time::Duration>,
}

impl App {
    /// Creates a new application.
    pub fn new(mode: KeyMode) -> Self {
        let hint = match mode {
            KeyMode::HoldRelease => "Hold space, release to start. Tap space to stop.",
            KeyMode::PressOnly => "Press space to start and stop.",
        };
        Self {
            stopwatch: Stopwatch::new(mode),
            scramble_text: GENERATING_TEXT.to_string(),
            status_message: hint.to_string(),
            hint,
            solves: Vec::new(),
        }
    }

    /// Gets the stopwatch.
    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Gets the scramble line.
    pub fn scramble_text(&self) -> &str {
        &self.scramble_text
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Gets the times of finished solves, oldest first.
    pub fn solves(&self) -> &[std::time::Duration] {
        &self.solves
    }

    /// Handles a key action and returns the command it triggers, if any.
    pub fn handle_key(&mut self, action: KeyAction, now: Instant) -> Option<Command> {
        let transition = match action {
            KeyAction::SpacePress => self.stopwatch.press(now),
            KeyAction::SpaceRelease => self.stopwatch.release(now),
            KeyAction::NewScramble if !self.stopwatch.is_running() => {
                return Some(self.begin_fetch());
            }
            KeyAction::Quit => return Some(Command::Quit),
            KeyAction::NewScramble | KeyAction::Ignore => None,
        };

        match transition? {
            TimerTransition::Started => {
                info!("Solve started");
                self.scramble_text = SOLVING_TEXT.to_string();
                None
            }
            TimerTransition::Stopped(elapsed) => {
                info!(elapsed_ms = elapsed.as_millis() as u64, "Solve finished");
                self.solves.push(elapsed);
                Some(self.begin_fetch())
            }
        }
    }

    /// Handles the outcome of a scramble fetch.
    ///
    /// Results arriving mid-solve are dropped so "Solving..." stays up.
    pub fn handle_scramble(&mut self, result: Result<String, String>) {
        if self.stopwatch.is_running() {
            debug!(ok = result.is_ok(), "Scramble result arrived mid-solve, dropped");
            return;
        }
        match result {
            Ok(scramble) => {
                debug!(scramble = %scramble, "Scramble received");
                self.scramble_text = scramble;
                self.status_message = self.hint.to_string();
            }
            Err(message) => {
                warn!(error = %message, "Error generating scramble");
                self.scramble_text = SCRAMBLE_ERROR_TEXT.to_string();
                self.status_message = message;
            }
        }
    }

    /// Marks a fetch as in flight.
    pub fn begin_fetch(&mut self) -> Command {
        self.scramble_text = GENERATING_TEXT.to_string();
        Command::FetchScramble
    }
}
