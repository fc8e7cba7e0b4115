#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    RoundActive,
    RoundComplete,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    wins_to_take_match: u8,
}

impl SessionConfig {
    /// Round wins needed to take the match; 2 makes it best of three.
    /// A match always needs at least one win, so 0 is raised to 1.
    #[must_use]
    pub fn new(wins_to_take_match: u8) -> Self {
        Self {
            wins_to_take_match: wins_to_take_match.max(1),
        }
    }

    #[must_use]
    pub fn wins_to_take_match(&self) -> u8 {
        self.wins_to_take_match
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(2)
    }
}
