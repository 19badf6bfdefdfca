//! Timer engine implementation.
//!
//! The timer engine is a tick-counting state machine. It does not own a
//! thread or a clock: the caller invokes `tick()` once per second while the
//! timer runs (see [`crate::ticker::Ticker`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running
//!            |
//!            v  (seconds_left hits 0, or skip)
//!          Idle  (next session)
//! ```
//!
//! ## Usage
//!
//! ```
//! use pomotimer_core::{Settings, TimerEngine};
//!
//! let mut engine = TimerEngine::new(Settings::default());
//! engine.start();
//! // Once per second:
//! if let Some(event) = engine.tick() {
//!     // a session finished
//!     # let _ = event;
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::policy;
use super::session::{Session, SessionType};
use super::settings::{SettingField, Settings};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Current session has not been started, or was reset.
    Idle,
    Running,
    Paused,
}

/// Core timer engine.
///
/// Owns the settings, the current session, the run state and the
/// completed-work counter. All mutation goes through the command methods,
/// each of which returns the resulting [`Event`] or `None` if the command
/// had no effect.
#[derive(Debug, Clone, Serialize)]
pub struct TimerEngine {
    settings: Settings,
    session: Session,
    state: TimerState,
    work_sessions_completed: u32,
}

impl TimerEngine {
    /// Create a new engine: an idle Work session with the full duration.
    pub fn new(settings: Settings) -> Self {
        Self {
            session: Session::new(SessionType::Work, &settings),
            settings,
            state: TimerState::Idle,
            work_sessions_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_type(&self) -> SessionType {
        self.session.session_type()
    }

    pub fn seconds_left(&self) -> u64 {
        self.session.seconds_left()
    }

    pub fn total_seconds(&self) -> u64 {
        self.session.total_seconds()
    }

    pub fn work_sessions_completed(&self) -> u32 {
        self.work_sessions_completed
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        self.session.progress()
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        self.session.display()
    }

    /// Whether the settings form accepts edits.
    pub fn settings_editable(&self) -> bool {
        !self.is_running()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.is_running(),
            session_type: self.session_type(),
            session_label: self.session_type().label().to_string(),
            seconds_left: self.seconds_left(),
            total_seconds: self.total_seconds(),
            display: self.display(),
            work_sessions_completed: self.work_sessions_completed,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. A session already at zero is rewound first.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            debug!("start ignored: already running");
            return None;
        }
        if self.session.is_finished() {
            self.session.rewind();
        }
        self.state = TimerState::Running;
        info!(
            session = %self.session_type(),
            seconds_left = self.seconds_left(),
            "timer started"
        );
        Some(Event::TimerStarted {
            session_type: self.session_type(),
            seconds_left: self.seconds_left(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            debug!("pause ignored: not running");
            return None;
        }
        self.state = TimerState::Paused;
        info!(seconds_left = self.seconds_left(), "timer paused");
        Some(Event::TimerPaused {
            seconds_left: self.seconds_left(),
            at: Utc::now(),
        })
    }

    /// Continue a paused countdown. From `Idle` this behaves like `start`.
    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Paused if !self.session.is_finished() => {
                self.state = TimerState::Running;
                info!(seconds_left = self.seconds_left(), "timer resumed");
                Some(Event::TimerResumed {
                    seconds_left: self.seconds_left(),
                    at: Utc::now(),
                })
            }
            TimerState::Paused | TimerState::Idle => self.start(),
            TimerState::Running => None,
        }
    }

    /// Pause when running, resume otherwise.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.resume()
        }
    }

    /// Rewind the current session to its full length and stop.
    /// Session type and completed-work count are untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.session.rewind();
        info!(session = %self.session_type(), "timer reset");
        Some(Event::TimerReset {
            session_type: self.session_type(),
            seconds_left: self.seconds_left(),
            at: Utc::now(),
        })
    }

    /// Stop, force the countdown to zero and apply the transition now.
    pub fn skip(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.session.drain();
        self.evaluate(true)
    }

    /// Call once per second. Returns `Some(Event::SessionCompleted)` when
    /// the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.session.decrement();
        debug!(seconds_left = self.seconds_left(), "tick");
        self.evaluate(false)
    }

    /// Replace the settings. Has no effect while running.
    ///
    /// The current session's total is recomputed; if it changed, the
    /// countdown restarts from the new total and the timer goes idle.
    pub fn apply_settings(&mut self, settings: Settings) -> Option<Event> {
        if self.is_running() {
            debug!("settings change ignored while running");
            return None;
        }
        if settings == self.settings {
            return None;
        }
        self.settings = settings;
        if self.session.retime(&self.settings) {
            self.state = TimerState::Idle;
        }
        info!(?settings, "settings changed");
        Some(Event::SettingsChanged {
            settings,
            at: Utc::now(),
        })
    }

    /// Apply raw text input to one field (clamped). No effect while running.
    pub fn edit_setting(&mut self, field: SettingField, input: &str) -> Option<Event> {
        if self.is_running() {
            debug!(%field, "settings edit ignored while running");
            return None;
        }
        let settings = self.settings.with_input(field, input);
        self.apply_settings(settings)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn evaluate(&mut self, skipped: bool) -> Option<Event> {
        if !self.session.is_finished() {
            return None;
        }
        Some(self.complete(skipped))
    }

    fn complete(&mut self, skipped: bool) -> Event {
        let from = self.session_type();
        if from == SessionType::Work {
            self.work_sessions_completed = self.work_sessions_completed.saturating_add(1);
        }
        let to = policy::next_session_type(
            from,
            self.work_sessions_completed,
            self.settings.long_break_every(),
        );
        self.state = TimerState::Idle;
        self.session = Session::new(to, &self.settings);
        info!(
            %from,
            %to,
            skipped,
            completed = self.work_sessions_completed,
            "session completed"
        );
        Event::SessionCompleted {
            from,
            to,
            work_sessions_completed: self.work_sessions_completed,
            skipped,
            at: Utc::now(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
