use std::collections::HashMap;

use domain::{GameSession, SessionId};

/// Owns every running session. Players refer to theirs by id.
#[derive(Default)]
pub(super) struct SessionStore {
    sessions: HashMap<SessionId, GameSession>,
}

impl SessionStore {
    pub(super) fn insert(
        &mut self,
        session: GameSession,
    ) {
        self.sessions.insert(session.id(), session);
    }

    pub(super) fn get_mut(
        &mut self,
        session_id: SessionId,
    ) -> Option<&mut GameSession> {
        self.sessions.get_mut(&session_id)
    }

    pub(super) fn remove(
        &mut self,
        session_id: SessionId,
    ) -> Option<GameSession> {
        self.sessions.remove(&session_id)
    }

    pub(super) fn len(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    pub(super) fn iter(&self) -> impl Iterator<Item = &GameSession> {
        self.sessions.values()
    }
}
