use thiserror::Error;

use crate::{PlayerId, SessionId};

use super::config::GamePhase;

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("action {action} not valid in phase {phase:?}")]
    InvalidPhase { action: &'static str, phase: GamePhase },

    #[error("player {player_id:?} is not seated in session {session_id:?}")]
    NotAParticipant { session_id: SessionId, player_id: PlayerId },

    #[error("player {0:?} already chose this round")]
    AlreadyChosen(PlayerId),
}
