//! # pomotimer Core Library
//!
//! Business logic for the pomotimer interval timer. The terminal front end
//! in `pomotimer-cli` is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-counting state machine over Work, Short Break
//!   and Long Break sessions; the caller invokes `tick()` once per second
//! - **Ticker**: the single recurring tokio task that produces those ticks
//! - **Audio**: the cue played on every session transition
//! - **Storage**: TOML configuration providing startup defaults
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Settings`]: Bounded durations and long-break cadence
//! - [`Ticker`]: Scheduled tick task handle
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod error;
pub mod events;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use audio::{Chime, Silent, TerminalBell};
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use storage::{data_dir, Config};
pub use ticker::{Tick, Ticker};
pub use timer::{SessionType, SettingField, Settings, TimerEngine, TimerState};
