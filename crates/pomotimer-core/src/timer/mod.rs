mod engine;
pub mod policy;
mod session;
mod settings;

pub use engine::{TimerEngine, TimerState};
pub use policy::{next_session_type, plan, PlannedSession};
pub use session::{format_clock, Session, SessionType};
pub use settings::{SettingField, Settings};
