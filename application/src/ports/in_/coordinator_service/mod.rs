mod registry;
mod sessions;


use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ports::out_::{Notification, PlayerNotifier};
use domain::{
    Choice, Command, GamePhase, GameSession, MatchmakingCommand, MatchmakingOutcome, MatchmakingQueue, PlayerId,
    PlayerState, SessionAction, SessionConfig, SessionEffect, SessionId, Trigger,
};

use registry::PlayerRegistry;
use sessions::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CoordinatorSnapshot {
    pub players: usize,
    pub named_players: usize,
    pub queued: usize,
    pub active_sessions: usize,
}

/// Owns the player registry, the matchmaking queue and the running sessions.
///
/// Every handler runs to completion before the next one is called, so the
/// registry, queue and store always agree with each other between calls:
/// a player is either queued (`InQueue`), linked to exactly one session
/// (an in-game state), or neither (`Connected`).
pub struct CoordinatorService {
    notifier: Arc<dyn PlayerNotifier>,
    config: SessionConfig,
    players: PlayerRegistry,
    queue: MatchmakingQueue,
    sessions: SessionStore,
}

impl CoordinatorService {
    pub fn new(
        notifier: Arc<dyn PlayerNotifier>,
        config: SessionConfig,
    ) -> Self {
        Self {
            notifier,
            config,
            players: PlayerRegistry::default(),
            queue: MatchmakingQueue::new(),
            sessions: SessionStore::default(),
        }
    }

    pub fn snapshot(&self) -> CoordinatorSnapshot {
        CoordinatorSnapshot {
            players: self.players.len(),
            named_players: self.players.iter().filter(|p| p.name.is_some()).count(),
            queued: self.queue.len(),
            active_sessions: self.sessions.len(),
        }
    }

    pub fn handle_connect(
        &mut self,
        player_id: PlayerId,
    ) {
        if self.players.register(player_id) {
            info!(player_id = ?player_id, "Player connected");
        } else {
            warn!(player_id = ?player_id, "Duplicate connect ignored");
        }
    }

    /// Handles one inbound line. The first non-empty line names the player;
    /// every later line is a command.
    pub async fn handle_line(
        &mut self,
        player_id: PlayerId,
        line: &str,
    ) {
        let line = line.trim_end();
        let Some(player) = self.players.get_mut(player_id) else {
            warn!(player_id = ?player_id, "Line from unregistered player dropped");
            return;
        };

        if player.name.is_none() {
            if line.is_empty() {
                debug!(player_id = ?player_id, "Blank name ignored");
                return;
            }
            player.name = Some(line.to_string());
            info!(player_id = ?player_id, name = %line, "Player named");
            self.notifier.notify_player(player_id, Notification::Menu).await;
            return;
        }

        let state = player.state;
        debug!(player_id = ?player_id, name = %player.display_name(), command = %line, "<- Received");

        match Command::parse(line) {
            Command::Quit => {
                self.notifier.notify_player(player_id, Notification::Goodbye).await;
                self.handle_disconnect(player_id).await;
            }
            Command::Unknown(_) => {
                self.notifier
                    .notify_player(player_id, Notification::UnknownCommand(state))
                    .await;
            }
            Command::Join => {
                if self.admit(player_id, state, Trigger::Join).await {
                    self.join(player_id).await;
                }
            }
            Command::Choose(choice) => {
                if self.admit(player_id, state, Trigger::Choose).await {
                    self.choose(player_id, choice).await;
                }
            }
            Command::Ready => {
                if self.admit(player_id, state, Trigger::Ready).await {
                    self.ready(player_id).await;
                }
            }
        }
    }

    /// Unwinds everything a player is part of. Safe to call more than once.
    pub async fn handle_disconnect(
        &mut self,
        player_id: PlayerId,
    ) {
        let Some(player) = self.players.remove(player_id) else {
            debug!(player_id = ?player_id, "Disconnect for unknown player ignored");
            return;
        };
        info!(player_id = ?player_id, name = %player.display_name(), state = ?player.state, "Player disconnected");

        if let MatchmakingOutcome::Dequeued(_) = self.queue.handle_command(MatchmakingCommand::PlayerLeave(player_id)) {
            info!(player_id = ?player_id, "Removed from matchmaking queue");
        }

        if let Some(session_id) = player.session {
            self.forfeit(session_id, player_id).await;
        }

        self.notifier.disconnect_player(player_id).await;
    }

    async fn admit(
        &self,
        player_id: PlayerId,
        state: PlayerState,
        trigger: Trigger,
    ) -> bool {
        if state.next(trigger).is_some() {
            return true;
        }
        debug!(player_id = ?player_id, state = ?state, trigger = ?trigger, "Command rejected");
        self.notifier
            .notify_player(player_id, Notification::Rejected(state))
            .await;
        false
    }

    async fn join(
        &mut self,
        player_id: PlayerId,
    ) {
        self.players.apply(player_id, Trigger::Join);
        let outcome = self.queue.handle_command(MatchmakingCommand::PlayerJoin(player_id));
        debug!(player_id = ?player_id, outcome = ?outcome, "Player joined queue");
        self.notifier.notify_player(player_id, Notification::Joined).await;

        while let MatchmakingOutcome::Matched(first, second) = self.queue.handle_command(MatchmakingCommand::TryMatchmake) {
            self.start_session(first, second).await;
        }
    }

    async fn start_session(
        &mut self,
        first: PlayerId,
        second: PlayerId,
    ) {
        let seat = |player_id: PlayerId| {
            self.players
                .get(player_id)
                .filter(|p| p.state == PlayerState::InQueue)
                .map(|p| (p.id, p.display_name().to_string()))
        };

        let (Some(first_seat), Some(second_seat)) = (seat(first), seat(second)) else {
            for player_id in [second, first] {
                if self.players.state_of(player_id) == Some(PlayerState::InQueue) {
                    self.queue.handle_command(MatchmakingCommand::Requeue(player_id));
                } else {
                    warn!(player_id = ?player_id, "Stale queue entry dropped");
                }
            }
            return;
        };

        let session_id = SessionId::new();
        let (session, effects) = GameSession::launch(session_id, first_seat, second_seat, self.config.clone());

        for player_id in [first, second] {
            if let Some(player) = self.players.get_mut(player_id) {
                player.session = Some(session_id);
            }
            self.players.apply(player_id, Trigger::Matched);
        }
        self.sessions.insert(session);
        info!(session_id = ?session_id, first = ?first, second = ?second, "Match found");

        self.dispatch(effects).await;
    }

    async fn choose(
        &mut self,
        player_id: PlayerId,
        choice: Choice,
    ) {
        let Some(session_id) = self.session_of(player_id) else {
            return;
        };
        let Some(session) = self.sessions.get_mut(session_id) else {
            warn!(player_id = ?player_id, session_id = ?session_id, "Choice for missing session dropped");
            return;
        };

        let effects = match session.process_action(SessionAction::Choose { player_id, choice }) {
            Ok(effects) => effects,
            Err(err) => {
                warn!(player_id = ?player_id, error = %err, "Choice dropped");
                return;
            }
        };
        let phase = session.phase();
        let participants = session.participants();
        debug!(player_id = ?player_id, choice = %choice, "Choice locked");

        self.players.apply(player_id, Trigger::Choose);
        match phase {
            GamePhase::RoundActive => {}
            GamePhase::RoundComplete => {
                for participant in participants {
                    self.players.apply(participant, Trigger::RoundResolved);
                }
            }
            GamePhase::GameOver => self.finish_session(session_id),
        }

        self.dispatch(effects).await;
    }

    async fn ready(
        &mut self,
        player_id: PlayerId,
    ) {
        self.players.apply(player_id, Trigger::Ready);

        let Some(session_id) = self.session_of(player_id) else {
            return;
        };
        let Some(session) = self.sessions.get_mut(session_id) else {
            warn!(player_id = ?player_id, session_id = ?session_id, "Ready for missing session dropped");
            return;
        };

        let opponent_ready = session
            .opponent_of(player_id)
            .and_then(|opponent| self.players.state_of(opponent))
            == Some(PlayerState::ReadyForNextRound);
        if !opponent_ready {
            self.notifier
                .notify_player(player_id, Notification::WaitingForOpponentReady)
                .await;
            return;
        }

        let effects = match session.process_action(SessionAction::NextRound) {
            Ok(effects) => effects,
            Err(err) => {
                warn!(session_id = ?session_id, error = %err, "Next round not started");
                return;
            }
        };
        for participant in session.participants() {
            self.players.apply(participant, Trigger::RoundStarted);
        }
        debug!(session_id = ?session_id, round = session.round(), "Round started");

        self.dispatch(effects).await;
    }

    async fn forfeit(
        &mut self,
        session_id: SessionId,
        leaver: PlayerId,
    ) {
        let Some(mut session) = self.sessions.remove(session_id) else {
            debug!(session_id = ?session_id, "Session already closed");
            return;
        };

        let effects = match session.process_action(SessionAction::Forfeit { leaver }) {
            Ok(effects) => effects,
            Err(err) => {
                warn!(session_id = ?session_id, error = %err, "Forfeit not recorded");
                Vec::new()
            }
        };

        let Some(opponent) = session.opponent_of(leaver) else {
            return;
        };
        let Some(player) = self.players.get_mut(opponent) else {
            debug!(session_id = ?session_id, opponent = ?opponent, "Opponent already gone");
            return;
        };
        player.session = None;
        self.players.apply(opponent, Trigger::OpponentLeft);
        info!(session_id = ?session_id, winner = ?opponent, "Session closed by forfeit");

        self.dispatch(effects).await;
    }

    fn finish_session(
        &mut self,
        session_id: SessionId,
    ) {
        let Some(session) = self.sessions.remove(session_id) else {
            return;
        };
        for participant in session.participants() {
            if let Some(player) = self.players.get_mut(participant) {
                player.session = None;
            }
            self.players.apply(participant, Trigger::MatchEnded);
        }
        info!(session_id = ?session_id, scores = ?session.scores(), "Match over");
    }

    fn session_of(
        &self,
        player_id: PlayerId,
    ) -> Option<SessionId> {
        let session = self.players.get(player_id).and_then(|p| p.session);
        if session.is_none() {
            warn!(player_id = ?player_id, "In-game player has no session");
        }
        session
    }

    async fn dispatch(
        &self,
        effects: Vec<SessionEffect>,
    ) {
        for effect in effects {
            match effect {
                SessionEffect::Notification { player_id, event } => {
                    self.notifier
                        .notify_player(player_id, Notification::Session(event))
                        .await;
                }
            }
        }
    }
}
