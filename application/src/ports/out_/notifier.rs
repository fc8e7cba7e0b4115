use std::fmt;

use async_trait::async_trait;

use domain::{PlayerId, PlayerState, RoundOutcome, RoundReport, SessionEvent};

/// Everything the coordinator says to a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Menu,
    Joined,
    Session(SessionEvent),
    WaitingForOpponentReady,
    Rejected(PlayerState),
    UnknownCommand(PlayerState),
    Goodbye,
}

#[async_trait]
pub trait PlayerNotifier: Send + Sync {
    async fn notify_player(
        &self,
        player_id: PlayerId,
        notification: Notification,
    );

    /// Closes the player's connection once everything already sent has been
    /// flushed. Unknown players are ignored.
    async fn disconnect_player(
        &self,
        player_id: PlayerId,
    );
}

impl fmt::Display for Notification {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Notification::Menu => f.write_str(concat!(
                "\n--- Rock Paper Scissors ---\n",
                "Commands:\n",
                "join - Join matchmaking queue\n",
                "rock/paper/scissors - Make your choice\n",
                "ready - Start the next round\n",
                "quit - Exits the game\n",
            )),
            Notification::Joined => f.write_str("Joined matchmaking queue. Waiting for opponent...\n"),
            Notification::Session(event) => write_session_event(f, event),
            Notification::WaitingForOpponentReady => f.write_str("Ready! Waiting for opponent...\n"),
            Notification::Rejected(state) => f.write_str(rejection_hint(*state)),
            Notification::UnknownCommand(state) => write!(f, "Unknown command. {}", help_hint(*state)),
            Notification::Goodbye => f.write_str("Goodbye!\n"),
        }
    }
}

fn write_session_event(
    f: &mut fmt::Formatter<'_>,
    event: &SessionEvent,
) -> fmt::Result {
    match event {
        SessionEvent::MatchFound { opponent } => write!(
            f,
            "\n--- MATCH FOUND ---\nPlaying against: {opponent}\nChoose: rock, paper, or scissors\n"
        ),
        SessionEvent::ChoiceLocked => f.write_str("Choice locked in! Waiting for opponent...\n"),
        SessionEvent::RoundResolved(report) => write_round_report(f, report),
        SessionEvent::AwaitingReady => f.write_str("\nType 'ready' for next round!\n"),
        SessionEvent::MatchOver { winner } => write!(
            f,
            "\n--- GAME OVER ---\n{winner} WINS THE MATCH!\n\nType 'join' to play again or 'quit' to leave\n"
        ),
        SessionEvent::NewRound { round } => write!(f, "\n--- NEW ROUND ---\nRound {round}. Type: rock, paper, or scissors\n"),
        SessionEvent::ForfeitWin { opponent } => write!(
            f,
            "\n--- OPPONENT DISCONNECTED ---\nYour opponent, {opponent}, has left the game. You win by forfeit\nType 'join' to find a new match\n"
        ),
    }
}

fn write_round_report(
    f: &mut fmt::Formatter<'_>,
    report: &RoundReport,
) -> fmt::Result {
    let [first, second] = &report.names;
    let [first_choice, second_choice] = report.choices;
    let [first_score, second_score] = report.scores;

    writeln!(f, "\n--- ROUND RESULT ---")?;
    writeln!(f, "{first} chose: {first_choice}")?;
    writeln!(f, "{second} chose: {second_choice}")?;
    match (report.outcome, report.winner_name()) {
        (RoundOutcome::Tie, _) | (_, None) => writeln!(f, "It's a TIE!")?,
        (_, Some(winner)) => writeln!(f, "{winner} WINS this round!")?,
    }
    writeln!(f, "\nScore: {first} {first_score} - {second_score} {second}")
}

fn rejection_hint(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Connected => "You're not in a game! Type 'join' to play.\n",
        PlayerState::InQueue => "You're in queue. Please wait for a match.\n",
        PlayerState::InGameChoosing => "Invalid command! Type: rock, paper, or scissors\n",
        PlayerState::InGameWaiting => "Waiting for opponent to choose...\n",
        PlayerState::ViewingResults => "Type 'ready' for next round!\n",
        PlayerState::ReadyForNextRound => "Waiting for opponent to ready up...\n",
    }
}

fn help_hint(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Connected => "Type 'join' to play!\n",
        PlayerState::InGameChoosing => "Invalid choice! Type: rock, paper, or scissors\n",
        other => rejection_hint(other),
    }
}
