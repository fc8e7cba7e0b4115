use std::collections::VecDeque;

use crate::PlayerId;

/// Players waiting for an opponent, oldest first.
#[derive(Default, Clone, Debug)]
pub struct MatchmakingQueue {
    queue: VecDeque<PlayerId>,
}

pub enum MatchmakingCommand {
    PlayerJoin(PlayerId),
    PlayerLeave(PlayerId),
    /// Puts a player back at the head after a pairing had to be abandoned.
    Requeue(PlayerId),
    TryMatchmake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchmakingOutcome {
    Matched(PlayerId, PlayerId),
    Enqueued(PlayerId),
    Dequeued(PlayerId),
    Waiting(usize),
    PlayerNotFound,
    AlreadyQueued,
}

impl MatchmakingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn contains(
        &self,
        player_id: PlayerId,
    ) -> bool {
        self.queue.contains(&player_id)
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.queue.iter().copied()
    }

    pub fn handle_command(
        &mut self,
        command: MatchmakingCommand,
    ) -> MatchmakingOutcome {
        match command {
            MatchmakingCommand::PlayerJoin(player_id) => {
                if self.contains(player_id) {
                    MatchmakingOutcome::AlreadyQueued
                } else {
                    self.queue.push_back(player_id);
                    MatchmakingOutcome::Enqueued(player_id)
                }
            }
            MatchmakingCommand::PlayerLeave(player_id) => {
                if let Some(pos) = self.queue.iter().position(|&pid| pid == player_id) {
                    self.queue.remove(pos);
                    MatchmakingOutcome::Dequeued(player_id)
                } else {
                    MatchmakingOutcome::PlayerNotFound
                }
            }
            MatchmakingCommand::Requeue(player_id) => {
                if self.contains(player_id) {
                    MatchmakingOutcome::AlreadyQueued
                } else {
                    self.queue.push_front(player_id);
                    MatchmakingOutcome::Enqueued(player_id)
                }
            }
            MatchmakingCommand::TryMatchmake => {
                if self.queue.len() < 2 {
                    return MatchmakingOutcome::Waiting(self.queue.len());
                }
                match (self.queue.pop_front(), self.queue.pop_front()) {
                    (Some(first), Some(second)) => MatchmakingOutcome::Matched(first, second),
                    _ => MatchmakingOutcome::Waiting(0),
                }
            }
        }
    }
}
