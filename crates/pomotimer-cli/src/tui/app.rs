//! Application state for the TUI.

use pomotimer_core::audio::play_cue;
use pomotimer_core::{Chime, Event, SettingField, Tick, Ticker, TimerEngine};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::tui::event::Action;

pub const HELP: &str =
    "s:start | space:pause/resume | r:reset | n:skip | tab:field | 0-9,enter:edit | q:quit";

/// Application state.
///
/// The engine is only touched from the UI thread; the ticker task feeds
/// it through `ticks`.
pub struct App {
    pub engine: TimerEngine,
    ticker: Ticker,
    ticks: UnboundedReceiver<Tick>,
    handle: Handle,
    chime: Box<dyn Chime>,
    /// Settings field with the cursor.
    pub selected: SettingField,
    /// Text typed into `selected` but not yet applied.
    pub input: Option<String>,
    /// Status message to display.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: TimerEngine, chime: Box<dyn Chime>, handle: Handle) -> Self {
        let (ticker, ticks) = Ticker::every_second();
        Self {
            engine,
            ticker,
            ticks,
            handle,
            chime,
            selected: SettingField::WorkMinutes,
            input: None,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    #[cfg(test)]
    pub fn ticker_active(&self) -> bool {
        self.ticker.is_active()
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::Start => {
                let ev = self.engine.start();
                self.apply(ev);
            }
            Action::Toggle => {
                let ev = self.engine.toggle();
                self.apply(ev);
            }
            Action::Reset => {
                let ev = self.engine.reset();
                self.apply(ev);
            }
            Action::Skip => {
                let ev = self.engine.skip();
                self.apply(ev);
            }
            Action::NextField => self.select(self.selected.next()),
            Action::PreviousField => self.select(self.selected.previous()),
            Action::Digit(c) => self.push_digit(c),
            Action::Backspace => {
                if let Some(input) = self.input.as_mut() {
                    input.pop();
                }
            }
            Action::Commit => self.commit_input(),
            Action::CancelEdit => {
                self.input = None;
                self.status = None;
            }
            Action::Help => self.status = Some(HELP.to_string()),
        }
    }

    /// Feed every queued tick from the current ticker task to the engine.
    pub fn drain_ticks(&mut self) {
        while let Ok(tick) = self.ticks.try_recv() {
            if !self.ticker.is_current(&tick) {
                continue;
            }
            let ev = self.engine.tick();
            self.apply(ev);
        }
    }

    pub fn quit(&mut self) {
        self.ticker.cancel();
        self.should_quit = true;
    }

    fn select(&mut self, field: SettingField) {
        self.input = None;
        self.selected = field;
    }

    fn push_digit(&mut self, c: char) {
        if !self.engine.settings_editable() {
            self.status = Some("Settings are locked while the timer runs".to_string());
            return;
        }
        let input = self.input.get_or_insert_with(String::new);
        // Longer input would clamp to the maximum anyway.
        if input.len() < 4 {
            input.push(c);
        }
    }

    fn commit_input(&mut self) {
        let Some(input) = self.input.take() else {
            return;
        };
        let ev = self.engine.edit_setting(self.selected, &input);
        if ev.is_none() && !self.engine.settings_editable() {
            self.status = Some("Settings are locked while the timer runs".to_string());
        }
        self.apply(ev);
    }

    /// Announce `event`, play the cue for transitions, and keep the ticker
    /// in step with the engine's run state.
    fn apply(&mut self, event: Option<Event>) {
        if let Some(event) = event {
            if event.is_transition() {
                play_cue(&*self.chime);
            }
            self.status = Some(event.announcement());
        }
        if self.engine.is_running() {
            // Edits typed before starting are dropped.
            self.input = None;
        }
        self.ticker.sync(self.engine.is_running(), &self.handle);
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use pomotimer_core::{SessionType, Settings};

    use super::*;

    /// Counts plays; clones share the count.
    #[derive(Default, Clone)]
    struct CountingChime {
        plays: Arc<AtomicUsize>,
    }

    impl CountingChime {
        fn plays(&self) -> usize {
            self.plays.load(Ordering::SeqCst)
        }
    }

    impl Chime for CountingChime {
        fn play(&self) -> io::Result<()> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn app_with(settings: Settings) -> (App, CountingChime) {
        let chime = CountingChime::default();
        let app = App::new(
            TimerEngine::new(settings),
            Box::new(chime.clone()),
            Handle::current(),
        );
        (app, chime)
    }

    #[tokio::test(start_paused = true)]
    async fn running_timer_counts_down_each_second() {
        let (mut app, _) = app_with(Settings::default());
        app.dispatch(Action::Start);
        assert!(app.ticker_active());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        app.drain_ticks();
        assert_eq!(app.engine.seconds_left(), 25 * 60 - 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_ticker() {
        let (mut app, _) = app_with(Settings::default());
        app.dispatch(Action::Start);
        app.dispatch(Action::Toggle);
        assert!(!app.ticker_active());

        tokio::time::sleep(Duration::from_secs(5)).await;
        app.drain_ticks();
        assert_eq!(app.engine.seconds_left(), 25 * 60);

        app.dispatch(Action::Toggle);
        assert!(app.ticker_active());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_plays_one_cue_and_stops() {
        let (mut app, chime) = app_with(Settings::from_minutes(1, 1, 1, 4));
        app.dispatch(Action::Start);

        tokio::time::sleep(Duration::from_millis(61_500)).await;
        app.drain_ticks();

        assert_eq!(chime.plays(), 1);
        assert_eq!(app.engine.session_type(), SessionType::ShortBreak);
        assert_eq!(app.engine.seconds_left(), 60);
        assert!(!app.ticker_active());
        assert_eq!(
            app.status.as_deref(),
            Some("Work finished. Next: Short Break")
        );
    }

    #[tokio::test]
    async fn skip_plays_cue() {
        let (mut app, chime) = app_with(Settings::default());
        app.dispatch(Action::Skip);
        assert_eq!(chime.plays(), 1);
        assert_eq!(app.engine.work_sessions_completed(), 1);
    }

    #[tokio::test]
    async fn typed_value_is_applied_on_commit() {
        let (mut app, _) = app_with(Settings::default());
        app.dispatch(Action::Digit('4'));
        app.dispatch(Action::Digit('0'));
        assert_eq!(app.input.as_deref(), Some("40"));
        app.dispatch(Action::Commit);
        assert_eq!(app.engine.total_seconds(), 40 * 60);
        assert!(app.input.is_none());
    }

    #[tokio::test]
    async fn out_of_range_input_is_clamped() {
        let (mut app, _) = app_with(Settings::default());
        app.dispatch(Action::NextField);
        app.dispatch(Action::NextField);
        app.dispatch(Action::NextField);
        assert_eq!(app.selected, SettingField::LongBreakEvery);
        for c in "99".chars() {
            app.dispatch(Action::Digit(c));
        }
        app.dispatch(Action::Commit);
        assert_eq!(app.engine.settings().long_break_every(), 10);
    }

    #[tokio::test]
    async fn form_is_locked_while_running() {
        let (mut app, _) = app_with(Settings::default());
        app.dispatch(Action::Start);
        app.dispatch(Action::Digit('9'));
        assert!(app.input.is_none());
        assert_eq!(
            app.status.as_deref(),
            Some("Settings are locked while the timer runs")
        );
        assert_eq!(app.engine.settings(), &Settings::default());
    }

    #[tokio::test]
    async fn quit_stops_ticker() {
        let (mut app, _) = app_with(Settings::default());
        app.dispatch(Action::Start);
        app.dispatch(Action::Quit);
        assert!(app.should_quit);
        assert!(!app.ticker_active());
    }
}
