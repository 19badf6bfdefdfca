//! Session durations and long-break cadence.
//!
//! Every value that enters [`Settings`] goes through [`SettingField::clamp`],
//! so a `Settings` is always within bounds. Bad input is clamped to the
//! nearest bound rather than rejected.

use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: u64 = 60;

/// One editable settings input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    WorkMinutes,
    ShortBreakMinutes,
    LongBreakMinutes,
    LongBreakEvery,
}

impl SettingField {
    /// Fields in form order.
    pub const ALL: [SettingField; 4] = [
        SettingField::WorkMinutes,
        SettingField::ShortBreakMinutes,
        SettingField::LongBreakMinutes,
        SettingField::LongBreakEvery,
    ];

    /// Inclusive `(min, max)` bounds.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            SettingField::WorkMinutes => (1, 120),
            SettingField::ShortBreakMinutes => (1, 60),
            SettingField::LongBreakMinutes => (1, 90),
            SettingField::LongBreakEvery => (2, 10),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingField::WorkMinutes => "Work minutes",
            SettingField::ShortBreakMinutes => "Short break minutes",
            SettingField::LongBreakMinutes => "Long break minutes",
            SettingField::LongBreakEvery => "Long break every",
        }
    }

    pub fn clamp(self, value: i64) -> u32 {
        let (min, max) = self.bounds();
        value.clamp(i64::from(min), i64::from(max)) as u32
    }

    /// Interpret raw text input. Fractions are truncated, out-of-range values
    /// clamp to the nearest bound, and anything non-numeric (including an
    /// empty string) clamps to the lower bound.
    pub fn clamp_input(self, input: &str) -> u32 {
        let input = input.trim();
        if let Ok(n) = input.parse::<i64>() {
            return self.clamp(n);
        }
        let (min, max) = self.bounds();
        match input.parse::<f64>() {
            Ok(f) if !f.is_nan() => f.trunc().clamp(f64::from(min), f64::from(max)) as u32,
            _ => min,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for SettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Durations (stored in seconds) and long-break cadence.
///
/// Deserializing goes through the same clamping as every other constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSettings")]
pub struct Settings {
    work_seconds: u64,
    short_break_seconds: u64,
    long_break_seconds: u64,
    long_break_every: u32,
}

impl Settings {
    /// Build from minute values, clamping each into its bounds.
    pub fn from_minutes(
        work_minutes: i64,
        short_break_minutes: i64,
        long_break_minutes: i64,
        long_break_every: i64,
    ) -> Self {
        let minutes = |field: SettingField, v: i64| u64::from(field.clamp(v)) * SECONDS_PER_MINUTE;
        Self {
            work_seconds: minutes(SettingField::WorkMinutes, work_minutes),
            short_break_seconds: minutes(SettingField::ShortBreakMinutes, short_break_minutes),
            long_break_seconds: minutes(SettingField::LongBreakMinutes, long_break_minutes),
            long_break_every: SettingField::LongBreakEvery.clamp(long_break_every),
        }
    }

    pub fn work_seconds(&self) -> u64 {
        self.work_seconds
    }

    pub fn short_break_seconds(&self) -> u64 {
        self.short_break_seconds
    }

    pub fn long_break_seconds(&self) -> u64 {
        self.long_break_seconds
    }

    pub fn long_break_every(&self) -> u32 {
        self.long_break_every
    }

    /// Current value of `field` in the unit the form shows.
    pub fn get(&self, field: SettingField) -> u32 {
        let to_minutes = |secs: u64| (secs / SECONDS_PER_MINUTE) as u32;
        match field {
            SettingField::WorkMinutes => to_minutes(self.work_seconds),
            SettingField::ShortBreakMinutes => to_minutes(self.short_break_seconds),
            SettingField::LongBreakMinutes => to_minutes(self.long_break_seconds),
            SettingField::LongBreakEvery => self.long_break_every,
        }
    }

    /// Copy with `field` set to `value`, clamped.
    pub fn with_field(self, field: SettingField, value: i64) -> Self {
        let mut next = self;
        let clamped = field.clamp(value);
        let secs = u64::from(clamped) * SECONDS_PER_MINUTE;
        match field {
            SettingField::WorkMinutes => next.work_seconds = secs,
            SettingField::ShortBreakMinutes => next.short_break_seconds = secs,
            SettingField::LongBreakMinutes => next.long_break_seconds = secs,
            SettingField::LongBreakEvery => next.long_break_every = clamped,
        }
        next
    }

    /// Copy with `field` set from raw text input.
    pub fn with_input(self, field: SettingField, input: &str) -> Self {
        self.with_field(field, i64::from(field.clamp_input(input)))
    }
}

/// Wire shape of [`Settings`], before clamping.
#[derive(Deserialize)]
struct RawSettings {
    work_seconds: u64,
    short_break_seconds: u64,
    long_break_seconds: u64,
    long_break_every: u32,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let minutes = |secs: u64| i64::try_from(secs / SECONDS_PER_MINUTE).unwrap_or(i64::MAX);
        Self::from_minutes(
            minutes(raw.work_seconds),
            minutes(raw.short_break_seconds),
            minutes(raw.long_break_seconds),
            i64::from(raw.long_break_every),
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15, 4)
    }
}
