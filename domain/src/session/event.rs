use super::{Choice, RoundOutcome};

/// What the two seats see of a session. Rendering to text is left to the
/// notifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    MatchFound { opponent: String },
    ChoiceLocked,
    RoundResolved(RoundReport),
    AwaitingReady,
    MatchOver { winner: String },
    NewRound { round: u32 },
    ForfeitWin { opponent: String },
}

/// Both choices and the running score after a round, seat order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u32,
    pub names: [String; 2],
    pub choices: [Choice; 2],
    pub outcome: RoundOutcome,
    pub scores: [u8; 2],
}

impl RoundReport {
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        self.outcome.winning_seat().map(|seat| self.names[seat].as_str())
    }
}
