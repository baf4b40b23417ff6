/// One line of terminal input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index; typed as the 1-based number shown on screen.
    Answer(usize),
    Skip,
    Previous,
    Next,
    Finish,
    Restart,
    ToggleTheme,
    Quit,
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Ok(number) = line.parse::<usize>() {
            return number.checked_sub(1).map(Self::Answer);
        }
        match line.to_ascii_lowercase().as_str() {
            "s" | "skip" => Some(Self::Skip),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "n" | "next" => Some(Self::Next),
            "f" | "finish" => Some(Self::Finish),
            "r" | "retry" | "restart" => Some(Self::Restart),
            "t" | "theme" => Some(Self::ToggleTheme),
            "q" | "quit" | "exit" => Some(Self::Quit),
            "h" | "?" | "help" => Some(Self::Help),
            _ => None,
        }
    }
}

pub const HELP: &str = "\
  1..9  answer with that option
  s     skip question
  p / n previous / next question
  f     finish test
  r     restart (or retry after an error)
  t     toggle dark theme
  q     quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_option_numbers_as_zero_based() {
        assert_eq!(Command::parse("1"), Some(Command::Answer(0)));
        assert_eq!(Command::parse(" 4 \n"), Some(Command::Answer(3)));
        assert_eq!(Command::parse("0"), None);
    }

    #[test]
    fn parses_letters_and_words() {
        assert_eq!(Command::parse("s"), Some(Command::Skip));
        assert_eq!(Command::parse("P"), Some(Command::Previous));
        assert_eq!(Command::parse("next"), Some(Command::Next));
        assert_eq!(Command::parse("f"), Some(Command::Finish));
        assert_eq!(Command::parse("retry"), Some(Command::Restart));
        assert_eq!(Command::parse("t"), Some(Command::ToggleTheme));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("dance"), None);
        assert_eq!(Command::parse(""), None);
    }
}
