use core::str::FromStr;
use gridsweep_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Same as tapping a cell: flag if hidden, open if flagged.
    Click(Coord2),
    Flag(Coord2),
    Open(Coord2),
    Restart,
    /// Empty line: draw the board and timer again.
    Redraw,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseCommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("expected `<row> <col>`")]
    MissingCoords,
    #[error("`{0}` is not a valid row or column")]
    BadNumber(String),
    #[error("unexpected trailing input `{0}`")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(Command::Redraw);
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "o" | "open" => Command::Open(parse_coords(&mut words)?),
            "n" | "new" | "restart" => Command::Restart,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ if first.starts_with(|c: char| c.is_ascii_digit()) => {
                let row = parse_number(first)?;
                let col = parse_number(words.next().ok_or(ParseCommandError::MissingCoords)?)?;
                Command::Click((row, col))
            }
            _ => return Err(ParseCommandError::Unknown(first.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, ParseCommandError> {
    let row = parse_number(words.next().ok_or(ParseCommandError::MissingCoords)?)?;
    let col = parse_number(words.next().ok_or(ParseCommandError::MissingCoords)?)?;
    Ok((row, col))
}

fn parse_number(word: &str) -> Result<Coord, ParseCommandError> {
    word.parse()
        .map_err(|_| ParseCommandError::BadNumber(word.to_string()))
}

pub(crate) const HELP: &str = "\
commands:
  <row> <col>     tap a cell (hidden: flag it, flagged: open it)
  f <row> <col>   flag a hidden cell
  o <row> <col>   open a flagged cell
  n               new game
  <enter>         redraw; the timer only updates when the board is drawn
  q               quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_coordinates_as_click() {
        assert_eq!("3 4".parse(), Ok(Command::Click((3, 4))));
        assert_eq!("  0   9 ".parse(), Ok(Command::Click((0, 9))));
    }

    #[test]
    fn parses_named_commands() {
        assert_eq!("f 1 2".parse(), Ok(Command::Flag((1, 2))));
        assert_eq!("OPEN 7 3".parse(), Ok(Command::Open((7, 3))));
        assert_eq!("n".parse(), Ok(Command::Restart));
        assert_eq!("quit".parse(), Ok(Command::Quit));
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("".parse(), Ok(Command::Redraw));
        assert_eq!("   ".parse(), Ok(Command::Redraw));
    }

    #[test]
    fn help_mentions_redraw() {
        assert!(HELP.contains("<enter>"));
        assert!(HELP.contains("timer"));
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!("f 1".parse::<Command>(), Err(ParseCommandError::MissingCoords));
        assert_eq!(
            "1 x".parse::<Command>(),
            Err(ParseCommandError::BadNumber("x".to_string()))
        );
        assert_eq!(
            "1 -2".parse::<Command>(),
            Err(ParseCommandError::BadNumber("-2".to_string()))
        );
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".to_string()))
        );
        assert_eq!(
            "q now".parse::<Command>(),
            Err(ParseCommandError::Trailing("now".to_string()))
        );
    }
}
