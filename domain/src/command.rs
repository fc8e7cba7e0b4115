use crate::Choice;

/// A line received from a named player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Join,
    Choose(Choice),
    Ready,
    Quit,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let command = line.to_lowercase();
        match command.as_str() {
            "join" => Command::Join,
            "rock" => Command::Choose(Choice::Rock),
            "paper" => Command::Choose(Choice::Paper),
            "scissors" => Command::Choose(Choice::Scissors),
            "ready" => Command::Ready,
            "quit" => Command::Quit,
            _ => Command::Unknown(command),
        }
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Command::parse(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Command::parse("JOIN"), Command::Join);
        assert_eq!(Command::parse("Rock"), Command::Choose(Choice::Rock));
        assert_eq!(Command::parse("pApEr"), Command::Choose(Choice::Paper));
        assert_eq!(Command::parse("scissors"), Command::Choose(Choice::Scissors));
        assert_eq!(Command::parse("Ready"), Command::Ready);
        assert_eq!(Command::parse("QUIT"), Command::Quit);
    }

    #[test]
    fn test_unknown_keeps_lowercased_text() {
        assert_eq!(Command::parse("Lizard"), Command::Unknown("lizard".to_string()));
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    }

    #[test]
    fn test_surrounding_text_is_not_a_command() {
        assert_eq!(Command::parse("join now"), Command::Unknown("join now".to_string()));
    }
}
