use serde::Serialize;

use crate::{PlayerId, SessionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    Connected,
    InQueue,
    InGameChoosing,
    InGameWaiting,
    ViewingResults,
    ReadyForNextRound,
}

/// Everything that can move a player between states, whether sent by the
/// player or raised by the coordinator on their behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Join,
    Choose,
    Ready,
    Matched,
    RoundResolved,
    RoundStarted,
    MatchEnded,
    OpponentLeft,
}

impl PlayerState {
    /// The transition table. `None` means the trigger is not legal here.
    #[must_use]
    pub fn next(
        self,
        trigger: Trigger,
    ) -> Option<PlayerState> {
        use PlayerState::*;
        use Trigger::*;

        match (self, trigger) {
            (Connected, Join) => Some(InQueue),
            (InQueue, Matched) => Some(InGameChoosing),
            (InGameChoosing, Choose) => Some(InGameWaiting),
            (InGameWaiting, RoundResolved) => Some(ViewingResults),
            (InGameWaiting, MatchEnded) => Some(Connected),
            (ViewingResults, Ready) => Some(ReadyForNextRound),
            (ReadyForNextRound, RoundStarted) => Some(InGameChoosing),
            (InGameChoosing | InGameWaiting | ViewingResults | ReadyForNextRound, OpponentLeft) => Some(Connected),
            _ => None,
        }
    }

    #[must_use]
    pub fn in_game(self) -> bool {
        matches!(
            self,
            PlayerState::InGameChoosing
                | PlayerState::InGameWaiting
                | PlayerState::ViewingResults
                | PlayerState::ReadyForNextRound
        )
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: Option<String>,
    pub state: PlayerState,
    pub session: Option<SessionId>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            name: None,
            state: PlayerState::Connected,
            session: None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}
