use serde::{Deserialize, Serialize};

use super::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    /// Human readable label shown next to the countdown.
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Work => "Work",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }

    /// Full length of a session of this type under `settings`, in seconds.
    pub fn total_seconds(self, settings: &Settings) -> u64 {
        match self {
            SessionType::Work => settings.work_seconds(),
            SessionType::ShortBreak => settings.short_break_seconds(),
            SessionType::LongBreak => settings.long_break_seconds(),
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One work or break period.
///
/// A `Session` is replaced, never retyped, when the timer moves on; only
/// `seconds_left` changes while it is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    session_type: SessionType,
    total_seconds: u64,
    seconds_left: u64,
}

impl Session {
    /// A fresh session with the full duration remaining.
    pub fn new(session_type: SessionType, settings: &Settings) -> Self {
        let total_seconds = session_type.total_seconds(settings);
        Self {
            session_type,
            total_seconds,
            seconds_left: total_seconds,
        }
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn seconds_left(&self) -> u64 {
        self.seconds_left
    }

    pub fn is_finished(&self) -> bool {
        self.seconds_left == 0
    }

    /// Remove one second. Saturates at zero.
    pub(crate) fn decrement(&mut self) {
        self.seconds_left = self.seconds_left.saturating_sub(1);
    }

    pub(crate) fn rewind(&mut self) {
        self.seconds_left = self.total_seconds;
    }

    pub(crate) fn drain(&mut self) {
        self.seconds_left = 0;
    }

    /// Recompute the total from `settings`. A changed total restarts the
    /// countdown from the new length; returns whether that happened.
    pub(crate) fn retime(&mut self, settings: &Settings) -> bool {
        let total = self.session_type.total_seconds(settings);
        if total == self.total_seconds {
            return false;
        }
        self.total_seconds = total;
        self.seconds_left = total;
        true
    }

    /// 0.0 .. 1.0 progress within the session.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        1.0 - (self.seconds_left as f64 / self.total_seconds as f64)
    }

    /// Remaining time as `MM:SS`. Minutes are not wrapped into hours.
    pub fn display(&self) -> String {
        format_clock(self.seconds_left)
    }
}

/// Format seconds as `MM:SS`, e.g. `25:00` or `120:00`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::SettingField;

    #[test]
    fn new_session_starts_full() {
        let settings = Settings::default();
        let s = Session::new(SessionType::Work, &settings);
        assert_eq!(s.total_seconds(), 25 * 60);
        assert_eq!(s.seconds_left(), 25 * 60);
        assert!(!s.is_finished());
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let settings = Settings::from_minutes(1, 1, 1, 2);
        let mut s = Session::new(SessionType::ShortBreak, &settings);
        for _ in 0..100 {
            s.decrement();
        }
        assert_eq!(s.seconds_left(), 0);
        assert!(s.is_finished());
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(120 * 60), "120:00");
        assert_eq!(format_clock(61), "01:01");
    }

    #[test]
    fn retime_keeps_progress_when_total_unchanged() {
        let settings = Settings::default();
        let mut s = Session::new(SessionType::Work, &settings);
        s.decrement();
        assert!(!s.retime(&settings.with_field(SettingField::LongBreakEvery, 6)));
        assert_eq!(s.seconds_left(), 25 * 60 - 1);

        assert!(s.retime(&Settings::from_minutes(30, 5, 15, 4)));
        assert_eq!(s.total_seconds(), 30 * 60);
        assert_eq!(s.seconds_left(), 30 * 60);
    }

    #[test]
    fn progress_bounds() {
        let settings = Settings::default();
        let mut s = Session::new(SessionType::LongBreak, &settings);
        assert_eq!(s.progress(), 0.0);
        s.drain();
        assert_eq!(s.progress(), 1.0);
    }
}
