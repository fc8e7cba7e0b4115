use std::collections::HashMap;

use tracing::{debug, warn};

use domain::{Player, PlayerId, PlayerState, Trigger};

/// Connected players, owned by value and keyed by connection identity.
#[derive(Default)]
pub(super) struct PlayerRegistry {
    players: HashMap<PlayerId, Player>,
}

impl PlayerRegistry {
    /// Returns `false` if the id was already registered.
    pub(super) fn register(
        &mut self,
        player_id: PlayerId,
    ) -> bool {
        if self.players.contains_key(&player_id) {
            return false;
        }
        self.players.insert(player_id, Player::new(player_id));
        true
    }

    pub(super) fn get(
        &self,
        player_id: PlayerId,
    ) -> Option<&Player> {
        self.players.get(&player_id)
    }

    pub(super) fn get_mut(
        &mut self,
        player_id: PlayerId,
    ) -> Option<&mut Player> {
        self.players.get_mut(&player_id)
    }

    pub(super) fn remove(
        &mut self,
        player_id: PlayerId,
    ) -> Option<Player> {
        self.players.remove(&player_id)
    }

    pub(super) fn state_of(
        &self,
        player_id: PlayerId,
    ) -> Option<PlayerState> {
        self.players.get(&player_id).map(|p| p.state)
    }

    /// Moves a player through the transition table. Illegal transitions leave
    /// the player untouched.
    pub(super) fn apply(
        &mut self,
        player_id: PlayerId,
        trigger: Trigger,
    ) -> Option<PlayerState> {
        let Some(player) = self.players.get_mut(&player_id) else {
            debug!(player_id = ?player_id, trigger = ?trigger, "Transition for unregistered player skipped");
            return None;
        };

        match player.state.next(trigger) {
            Some(next) => {
                debug!(player_id = ?player_id, from = ?player.state, to = ?next, "Player state changed");
                player.state = next;
                Some(next)
            }
            None => {
                warn!(player_id = ?player_id, state = ?player.state, trigger = ?trigger, "Illegal transition ignored");
                None
            }
        }
    }

    pub(super) fn len(&self) -> usize {
        self.players.len()
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }
}
