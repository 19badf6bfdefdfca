//! Session-transition policy.
//!
//! Work is always followed by a break; a break is always followed by work.
//! The break is long exactly when the completed-work count is a positive
//! multiple of the cadence.

use serde::{Deserialize, Serialize};

use super::session::SessionType;
use super::settings::Settings;

/// Session type that follows `current`.
///
/// `completed` is the work count *after* `current` ended, so a finished
/// work session must already be included.
pub fn next_session_type(current: SessionType, completed: u32, long_break_every: u32) -> SessionType {
    match current {
        SessionType::Work => {
            if is_long_break_due(completed, long_break_every) {
                SessionType::LongBreak
            } else {
                SessionType::ShortBreak
            }
        }
        SessionType::ShortBreak | SessionType::LongBreak => SessionType::Work,
    }
}

pub fn is_long_break_due(completed: u32, long_break_every: u32) -> bool {
    long_break_every > 0 && completed > 0 && completed % long_break_every == 0
}

/// One entry of a [`plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSession {
    /// 1-based position in the plan.
    pub position: usize,
    pub session_type: SessionType,
    pub duration_secs: u64,
    /// Work sessions completed when this one begins.
    pub work_sessions_before: u32,
}

/// Longest plan [`plan`] will build.
pub const MAX_PLAN_LEN: usize = 1000;

/// The next `count` sessions starting with `from`, assuming every session
/// runs to completion. `count` is capped at [`MAX_PLAN_LEN`].
pub fn plan(settings: &Settings, from: SessionType, completed: u32, count: usize) -> Vec<PlannedSession> {
    let mut current = from;
    let mut completed = completed;
    (1..=count.min(MAX_PLAN_LEN))
        .map(|position| {
            let entry = PlannedSession {
                position,
                session_type: current,
                duration_secs: current.total_seconds(settings),
                work_sessions_before: completed,
            };
            if current == SessionType::Work {
                completed = completed.saturating_add(1);
            }
            current = next_session_type(current, completed, settings.long_break_every());
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn breaks_return_to_work() {
        assert_eq!(next_session_type(SessionType::ShortBreak, 3, 4), SessionType::Work);
        assert_eq!(next_session_type(SessionType::LongBreak, 4, 4), SessionType::Work);
    }

    #[test]
    fn fourth_work_session_earns_long_break() {
        let types: Vec<_> = (1..=8)
            .map(|n| next_session_type(SessionType::Work, n, 4))
            .collect();
        assert_eq!(
            types,
            vec![
                SessionType::ShortBreak,
                SessionType::ShortBreak,
                SessionType::ShortBreak,
                SessionType::LongBreak,
                SessionType::ShortBreak,
                SessionType::ShortBreak,
                SessionType::ShortBreak,
                SessionType::LongBreak,
            ]
        );
    }

    #[test]
    fn zero_completed_is_never_long() {
        assert!(!is_long_break_due(0, 2));
    }

    #[test]
    fn plan_alternates_work_and_breaks() {
        let settings = Settings::from_minutes(25, 5, 15, 4);
        let p = plan(&settings, SessionType::Work, 0, 9);
        let types: Vec<_> = p.iter().map(|s| s.session_type).collect();
        assert_eq!(
            types,
            vec![
                SessionType::Work,
                SessionType::ShortBreak,
                SessionType::Work,
                SessionType::ShortBreak,
                SessionType::Work,
                SessionType::ShortBreak,
                SessionType::Work,
                SessionType::LongBreak,
                SessionType::Work,
            ]
        );
        assert_eq!(p[7].duration_secs, 15 * 60);
        assert_eq!(p[7].work_sessions_before, 4);
        assert_eq!(p[8].position, 9);
    }

    #[test]
    fn plan_of_zero_is_empty() {
        assert!(plan(&Settings::default(), SessionType::Work, 0, 0).is_empty());
    }

    #[test]
    fn huge_count_is_capped() {
        let p = plan(&Settings::default(), SessionType::Work, 0, usize::MAX);
        assert_eq!(p.len(), MAX_PLAN_LEN);
        assert_eq!(p.last().map(|s| s.position), Some(MAX_PLAN_LEN));
    }

    proptest! {
        #[test]
        fn long_break_iff_multiple(completed in 1u32..1000, every in 2u32..=10) {
            let next = next_session_type(SessionType::Work, completed, every);
            if completed % every == 0 {
                prop_assert_eq!(next, SessionType::LongBreak);
            } else {
                prop_assert_eq!(next, SessionType::ShortBreak);
            }
        }
    }
}
