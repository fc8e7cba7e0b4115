use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Tie,
    FirstSeatWins,
    SecondSeatWins,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    #[must_use]
    pub fn beats(
        self,
        other: Choice,
    ) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors) | (Choice::Scissors, Choice::Paper) | (Choice::Paper, Choice::Rock)
        )
    }

    /// Resolves a round with `self` in the first seat.
    #[must_use]
    pub fn against(
        self,
        other: Choice,
    ) -> RoundOutcome {
        if self.beats(other) {
            RoundOutcome::FirstSeatWins
        } else if other.beats(self) {
            RoundOutcome::SecondSeatWins
        } else {
            RoundOutcome::Tie
        }
    }
}

impl RoundOutcome {
    #[must_use]
    pub fn winning_seat(self) -> Option<usize> {
        match self {
            RoundOutcome::Tie => None,
            RoundOutcome::FirstSeatWins => Some(0),
            RoundOutcome::SecondSeatWins => Some(1),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_dominance_over_all_pairs() {
        let expected = [
            (Choice::Rock, Choice::Rock, RoundOutcome::Tie),
            (Choice::Rock, Choice::Paper, RoundOutcome::SecondSeatWins),
            (Choice::Rock, Choice::Scissors, RoundOutcome::FirstSeatWins),
            (Choice::Paper, Choice::Rock, RoundOutcome::FirstSeatWins),
            (Choice::Paper, Choice::Paper, RoundOutcome::Tie),
            (Choice::Paper, Choice::Scissors, RoundOutcome::SecondSeatWins),
            (Choice::Scissors, Choice::Rock, RoundOutcome::SecondSeatWins),
            (Choice::Scissors, Choice::Paper, RoundOutcome::FirstSeatWins),
            (Choice::Scissors, Choice::Scissors, RoundOutcome::Tie),
        ];

        for (first, second, outcome) in expected {
            assert_eq!(first.against(second), outcome, "{first} vs {second}");
        }
    }

    #[test]
    fn test_resolution_is_symmetric() {
        for first in Choice::ALL {
            for second in Choice::ALL {
                let swapped = match first.against(second) {
                    RoundOutcome::Tie => RoundOutcome::Tie,
                    RoundOutcome::FirstSeatWins => RoundOutcome::SecondSeatWins,
                    RoundOutcome::SecondSeatWins => RoundOutcome::FirstSeatWins,
                };
                assert_eq!(second.against(first), swapped, "{first} vs {second}");
            }
        }
    }

    #[test]
    fn test_each_choice_beats_exactly_one() {
        for choice in Choice::ALL {
            let beaten = Choice::ALL.iter().filter(|&&other| choice.beats(other)).count();
            assert_eq!(beaten, 1, "{choice}");
            assert!(!choice.beats(choice));
        }
    }
}
