mod command;
mod player;
mod queue;
mod session;
mod types;

pub use command::Command;
pub use player::{Player, PlayerState, Trigger};
pub use queue::{MatchmakingCommand, MatchmakingOutcome, MatchmakingQueue};
pub use session::{
    Choice, GamePhase, GameSession, RoundOutcome, RoundReport, SessionAction, SessionConfig, SessionEffect,
    SessionError, SessionEvent,
};
pub use types::{PlayerId, SessionId};
