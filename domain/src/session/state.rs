use crate::{PlayerId, SessionId};

use super::{
    Choice, GamePhase, RoundReport, SessionAction, SessionConfig, SessionEffect, SessionError, SessionEvent,
};

#[derive(Clone, Debug)]
pub(super) struct Seat {
    pub(super) player_id: PlayerId,
    pub(super) name: String,
    pub(super) choice: Option<Choice>,
    pub(super) score: u8,
}

impl Seat {
    fn new(
        player_id: PlayerId,
        name: String,
    ) -> Self {
        Self {
            player_id,
            name,
            choice: None,
            score: 0,
        }
    }
}

/// One match between two seated players.
#[derive(Clone, Debug)]
pub struct GameSession {
    id: SessionId,
    config: SessionConfig,
    pub(super) seats: [Seat; 2],
    pub(super) phase: GamePhase,
    pub(super) round: u32,
}

impl GameSession {
    pub fn process_action(
        &mut self,
        action: SessionAction,
    ) -> Result<Vec<SessionEffect>, SessionError> {
        match action {
            SessionAction::Choose { player_id, choice } => self.handle_choose(player_id, choice),
            SessionAction::NextRound => self.handle_next_round(),
            SessionAction::Forfeit { leaver } => self.handle_forfeit(leaver),
        }
    }

    fn require_phase(
        &self,
        required: GamePhase,
        action: &'static str,
    ) -> Result<(), SessionError> {
        if self.phase != required {
            return Err(SessionError::InvalidPhase {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn seat_of(
        &self,
        player_id: PlayerId,
    ) -> Result<usize, SessionError> {
        self.seats
            .iter()
            .position(|seat| seat.player_id == player_id)
            .ok_or(SessionError::NotAParticipant {
                session_id: self.id,
                player_id,
            })
    }

    fn broadcast(
        &self,
        event: SessionEvent,
    ) -> impl Iterator<Item = SessionEffect> + '_ {
        self.seats.iter().map(move |seat| SessionEffect::Notification {
            player_id: seat.player_id,
            event: event.clone(),
        })
    }
}

impl GameSession {
    #[must_use]
    pub fn new(
        id: SessionId,
        first: (PlayerId, String),
        second: (PlayerId, String),
        config: SessionConfig,
    ) -> Self {
        Self {
            id,
            config,
            seats: [Seat::new(first.0, first.1), Seat::new(second.0, second.1)],
            phase: GamePhase::RoundActive,
            round: 1,
        }
    }

    /// Seats both players and tells each who they are up against.
    #[must_use]
    pub fn launch(
        id: SessionId,
        first: (PlayerId, String),
        second: (PlayerId, String),
        config: SessionConfig,
    ) -> (Self, Vec<SessionEffect>) {
        let session = Self::new(id, first, second, config);

        let effects = session
            .seats
            .iter()
            .zip(session.seats.iter().rev())
            .map(|(seat, opponent)| SessionEffect::Notification {
                player_id: seat.player_id,
                event: SessionEvent::MatchFound {
                    opponent: opponent.name.clone(),
                },
            })
            .collect();

        (session, effects)
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn participants(&self) -> [PlayerId; 2] {
        [self.seats[0].player_id, self.seats[1].player_id]
    }

    #[must_use]
    pub fn scores(&self) -> [u8; 2] {
        [self.seats[0].score, self.seats[1].score]
    }

    #[must_use]
    pub fn opponent_of(
        &self,
        player_id: PlayerId,
    ) -> Option<PlayerId> {
        let seat = self.seat_of(player_id).ok()?;
        Some(self.seats[1 - seat].player_id)
    }

    #[must_use]
    pub fn name_of(
        &self,
        player_id: PlayerId,
    ) -> Option<&str> {
        let seat = self.seat_of(player_id).ok()?;
        Some(self.seats[seat].name.as_str())
    }

    fn handle_choose(
        &mut self,
        player_id: PlayerId,
        choice: Choice,
    ) -> Result<Vec<SessionEffect>, SessionError> {
        self.require_phase(GamePhase::RoundActive, "Choose")?;
        let seat = self.seat_of(player_id)?;

        if self.seats[seat].choice.is_some() {
            return Err(SessionError::AlreadyChosen(player_id));
        }
        self.seats[seat].choice = Some(choice);

        let mut effects = vec![SessionEffect::Notification {
            player_id,
            event: SessionEvent::ChoiceLocked,
        }];

        if let [Some(first), Some(second)] = [self.seats[0].choice, self.seats[1].choice] {
            effects.extend(self.resolve_round(first, second));
        }

        Ok(effects)
    }

    fn resolve_round(
        &mut self,
        first: Choice,
        second: Choice,
    ) -> Vec<SessionEffect> {
        let outcome = first.against(second);
        if let Some(winner) = outcome.winning_seat() {
            self.seats[winner].score += 1;
        }

        let report = RoundReport {
            round: self.round,
            names: [self.seats[0].name.clone(), self.seats[1].name.clone()],
            choices: [first, second],
            outcome,
            scores: self.scores(),
        };

        let match_winner = self
            .seats
            .iter()
            .find(|seat| seat.score >= self.config.wins_to_take_match())
            .map(|seat| seat.name.clone());

        let follow_up = match match_winner {
            Some(winner) => {
                self.phase = GamePhase::GameOver;
                SessionEvent::MatchOver { winner }
            }
            None => {
                self.phase = GamePhase::RoundComplete;
                SessionEvent::AwaitingReady
            }
        };

        self.broadcast(SessionEvent::RoundResolved(report))
            .chain(self.broadcast(follow_up))
            .collect()
    }

    fn handle_next_round(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        self.require_phase(GamePhase::RoundComplete, "NextRound")?;

        for seat in &mut self.seats {
            seat.choice = None;
        }
        self.phase = GamePhase::RoundActive;
        self.round += 1;

        Ok(self.broadcast(SessionEvent::NewRound { round: self.round }).collect())
    }

    fn handle_forfeit(
        &mut self,
        leaver: PlayerId,
    ) -> Result<Vec<SessionEffect>, SessionError> {
        if self.phase == GamePhase::GameOver {
            return Err(SessionError::InvalidPhase {
                action: "Forfeit",
                phase: self.phase,
            });
        }
        let seat = self.seat_of(leaver)?;
        self.phase = GamePhase::GameOver;

        let remaining = &self.seats[1 - seat];
        Ok(vec![SessionEffect::Notification {
            player_id: remaining.player_id,
            event: SessionEvent::ForfeitWin {
                opponent: self.seats[seat].name.clone(),
            },
        }])
    }
}
