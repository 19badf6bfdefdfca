use std::time::Duration;

use clap::Args;
use pomotimer_core::{Chime, Config, SettingField, Settings, Silent, TerminalBell, TimerEngine};

use crate::tui;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Work session length in minutes (1-120)
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub work: Option<i64>,
    /// Short break length in minutes (1-60)
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub short_break: Option<i64>,
    /// Long break length in minutes (1-90)
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub long_break: Option<i64>,
    /// Work sessions before each long break (2-10)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub every: Option<i64>,
    /// Do not ring the bell on transitions
    #[arg(long)]
    pub mute: bool,
}

impl RunArgs {
    /// Config settings with any command-line overrides applied (clamped).
    pub fn settings(&self, config: &Config) -> Settings {
        let overrides = [
            (SettingField::WorkMinutes, self.work),
            (SettingField::ShortBreakMinutes, self.short_break),
            (SettingField::LongBreakMinutes, self.long_break),
            (SettingField::LongBreakEvery, self.every),
        ];
        overrides
            .into_iter()
            .fold(config.settings(), |settings, (field, value)| match value {
                Some(v) => settings.with_field(field, v),
                None => settings,
            })
    }

    pub fn chime(&self, config: &Config) -> Box<dyn Chime> {
        if self.mute || !config.notifications.enabled {
            Box::new(Silent)
        } else {
            Box::new(TerminalBell)
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let settings = args.settings(&config);
    tracing::info!(?settings, "starting interactive timer");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    tui::run(
        runtime.handle(),
        TimerEngine::new(settings),
        args.chime(&config),
        Duration::from_millis(config.ui.tick_rate_ms.max(10)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let config = Config::default();
        let args = RunArgs {
            work: Some(50),
            every: Some(3),
            ..RunArgs::default()
        };
        let s = args.settings(&config);
        assert_eq!(s.work_seconds(), 50 * 60);
        assert_eq!(s.short_break_seconds(), 5 * 60);
        assert_eq!(s.long_break_every(), 3);
    }

    #[test]
    fn overrides_are_clamped() {
        let args = RunArgs {
            work: Some(0),
            long_break: Some(1000),
            every: Some(-1),
            ..RunArgs::default()
        };
        let s = args.settings(&Config::default());
        assert_eq!(s.work_seconds(), 60);
        assert_eq!(s.long_break_seconds(), 90 * 60);
        assert_eq!(s.long_break_every(), 2);
    }
}
