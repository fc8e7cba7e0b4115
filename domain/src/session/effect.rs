use crate::PlayerId;

use super::SessionEvent;

#[derive(Clone, Debug)]
pub enum SessionEffect {
    Notification { player_id: PlayerId, event: SessionEvent },
}
