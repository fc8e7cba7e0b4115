use crate::PlayerId;

use super::Choice;

#[derive(Clone, Copy, Debug)]
pub enum SessionAction {
    Choose { player_id: PlayerId, choice: Choice },
    NextRound,
    Forfeit { leaver: PlayerId },
}
