mod action;
mod choice;
mod config;
mod effect;
mod error;
mod event;
mod state;


pub use action::SessionAction;
pub use choice::{Choice, RoundOutcome};
pub use config::{GamePhase, SessionConfig};
pub use effect::SessionEffect;
pub use error::SessionError;
pub use event::{RoundReport, SessionEvent};
pub use state::GameSession;
