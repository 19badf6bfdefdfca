use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SessionType, Settings};

/// Every state change of the timer produces an Event.
/// The UI reacts to them; the log records them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        session_type: SessionType,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        session_type: SessionType,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    /// A session ended, either by reaching zero or by Skip.
    /// Exactly one of these is emitted per transition; it carries the cue.
    SessionCompleted {
        from: SessionType,
        to: SessionType,
        work_sessions_completed: u32,
        skipped: bool,
        at: DateTime<Utc>,
    },
    SettingsChanged {
        settings: Settings,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        session_type: SessionType,
        session_label: String,
        seconds_left: u64,
        total_seconds: u64,
        display: String,
        work_sessions_completed: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether this event marks a session transition (and so wants a cue).
    pub fn is_transition(&self) -> bool {
        matches!(self, Event::SessionCompleted { .. })
    }

    /// One-line announcement for the status line.
    pub fn announcement(&self) -> String {
        match self {
            Event::TimerStarted { session_type, .. } => format!("{session_type} started"),
            Event::TimerPaused { .. } => "Paused".to_string(),
            Event::TimerResumed { .. } => "Resumed".to_string(),
            Event::TimerReset { session_type, .. } => format!("{session_type} reset"),
            Event::SessionCompleted {
                from, to, skipped, ..
            } => {
                let verb = if *skipped { "skipped" } else { "finished" };
                format!("{from} {verb}. Next: {to}")
            }
            Event::SettingsChanged { .. } => "Settings updated".to_string(),
            Event::StateSnapshot { display, session_label, .. } => {
                format!("{session_label} {display}")
            }
        }
    }
}
