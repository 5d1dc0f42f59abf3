//! Spacebar stopwatch.
//!
//! Hold space to arm, release to start, press and release again to stop.
//! Terminals that cannot report key releases fall back to press-only mode,
//! where each press toggles the timer.

use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// How key events drive the stopwatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Press arms, release starts or stops.
    HoldRelease,
    /// Press toggles; releases are never reported.
    PressOnly,
}

/// Stopwatch phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Not timing.
    Idle,
    /// Space held, ready to start on release.
    Armed,
    /// Timing a solve.
    Running {
        /// When the solve started.
        started: Instant,
    },
}

/// Change reported back to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTransition {
    /// A solve started.
    Started,
    /// A solve finished with this time.
    Stopped(Duration),
}

/// Spacebar-driven solve timer.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    mode: KeyMode,
    phase: TimerPhase,
    held: bool,
    last: Duration,
}

impl Stopwatch {
    /// Creates an idle stopwatch.
    pub fn new(mode: KeyMode) -> Self {
        Self {
            mode,
            phase: TimerPhase::Idle,
            held: false,
            last: Duration::ZERO,
        }
    }

    /// Returns the key mode.
    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Returns `true` while space is held down.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Returns `true` while a solve is being timed.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, TimerPhase::Running { .. })
    }

    /// Time to display: live while running, otherwise the last solve.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.phase {
            TimerPhase::Running { started } => now.saturating_duration_since(started),
            TimerPhase::Idle | TimerPhase::Armed => self.last,
        }
    }

    /// Handles a space press.
    #[instrument(skip(self, now), fields(phase = ?self.phase))]
    pub fn press(&mut self, now: Instant) -> Option<TimerTransition> {
        match self.mode {
            KeyMode::HoldRelease => {
                if self.held {
                    return None;
                }
                self.held = true;
                if self.phase == TimerPhase::Idle {
                    debug!("Timer armed");
                    self.phase = TimerPhase::Armed;
                }
                None
            }
            KeyMode::PressOnly => {
                if self.is_running() {
                    Some(self.stop(now))
                } else {
                    Some(self.start(now))
                }
            }
        }
    }

    /// Handles a space release.
    #[instrument(skip(self, now), fields(phase = ?self.phase))]
    pub fn release(&mut self, now: Instant) -> Option<TimerTransition> {
        if self.mode == KeyMode::PressOnly {
            return None;
        }
        self.held = false;
        match self.phase {
            TimerPhase::Running { .. } => Some(self.stop(now)),
            TimerPhase::Armed => Some(self.start(now)),
            TimerPhase::Idle => None,
        }
    }

    fn start(&mut self, now: Instant) -> TimerTransition {
        debug!("Timer started");
        self.phase = TimerPhase::Running { started: now };
        TimerTransition::Started
    }

    fn stop(&mut self, now: Instant) -> TimerTransition {
        self.last = self.elapsed(now);
        self.phase = TimerPhase::Idle;
        debug!(elapsed_ms = self.last.as_millis() as u64, "Timer stopped");
        TimerTransition::Stopped(self.last)
    }
}

/// Formats a duration as `MM:SS.mmm`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00.000");
    }

    #[test]
    fn formats_minutes_seconds_millis() {
        assert_eq!(format_elapsed(Duration::from_millis(83_456)), "01:23.456");
        assert_eq!(format_elapsed(Duration::from_millis(9_007)), "00:09.007");
    }

    #[test]
    fn formats_past_an_hour() {
        assert_eq!(format_elapsed(Duration::from_secs(61 * 60)), "61:00.000");
    }
}
