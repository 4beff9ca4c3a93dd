use std::ops::RangeInclusive;
use std::str::FromStr;

use clap::ValueEnum;
use sapper_core::{CellCount, Coord, Coord2, GameConfig, GameError};
use thiserror::Error;

use crate::preset::Difficulty;

/// Accepted board height and width for custom games.
pub const SIZE_RANGE: RangeInclusive<u32> = 10..=50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unrecognized command {0}! Use \"help\" to get a list of commands!")]
    Unrecognized(String),
    #[error("Invalid number of arguments {count}!\n> Correct usage is: {usage}")]
    WrongArity { count: usize, usage: &'static str },
    #[error("Arguments should be numbers!")]
    NotNumeric,
    #[error("Invalid difficulty {0}! Expected easy, medium, or expert.")]
    UnknownDifficulty(String),
    #[error("Height {rows} and width {cols} out of range 10-50!")]
    SizeOutOfRange { rows: u32, cols: u32 },
    #[error("You need to start a game first!")]
    NoGame,
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Start(GameConfig),
    Check(Coord2),
    Flag(Coord2),
    Help(Option<String>),
    Quit,
}

pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: [CommandHelp; 5] = [
    CommandHelp {
        name: "start",
        usage: "[s]tart <height> <width> <mines> | [s]tart <easy | medium | expert>",
        description: "When given a difficulty, starts a game at that difficulty. Otherwise starts a game with the given dimensions.",
    },
    CommandHelp {
        name: "check",
        usage: "[c]heck <row> <col>",
        description: "Checks the tile at the given row and column. If it is a mine, the game is lost.",
    },
    CommandHelp {
        name: "flag",
        usage: "[f]lag <row> <col>",
        description: "Flags the tile at the given row and column. Prevents you from accidentally checking the flagged position.",
    },
    CommandHelp {
        name: "help",
        usage: "[h]elp [cmd]",
        description: "Lists all available commands if no cmd is specified. Otherwise gives detailed information on the passed command.",
    },
    CommandHelp {
        name: "quit",
        usage: "[q]uit",
        description: "Quits the game.",
    },
];

/// Help for a single command, matched by any prefix of its name.
pub fn lookup_help(topic: &str) -> Option<&'static CommandHelp> {
    let topic = topic.to_lowercase();
    if topic.is_empty() {
        return None;
    }
    COMMANDS.iter().find(|help| help.name.starts_with(&topic))
}

fn parse_number(arg: &str) -> Result<u32, CommandError> {
    arg.parse().map_err(|_| CommandError::NotNumeric)
}

fn parse_coords(args: &[&str], usage: &'static str) -> Result<Coord2, CommandError> {
    let &[row, col] = args else {
        return Err(CommandError::WrongArity {
            count: args.len(),
            usage,
        });
    };
    let (row, col) = (parse_number(row)?, parse_number(col)?);

    // anything wider than a coordinate is off the board anyway
    let row = Coord::try_from(row).map_err(|_| GameError::InvalidCoords)?;
    let col = Coord::try_from(col).map_err(|_| GameError::InvalidCoords)?;
    Ok((row, col))
}

fn parse_start(args: &[&str]) -> Result<GameConfig, CommandError> {
    match *args {
        [difficulty] => Difficulty::from_str(difficulty, true)
            .map(Difficulty::config)
            .map_err(|_| CommandError::UnknownDifficulty(difficulty.to_owned())),
        [rows, cols, mines] => {
            let (rows, cols, mines) = (parse_number(rows)?, parse_number(cols)?, parse_number(mines)?);
            if !SIZE_RANGE.contains(&rows) || !SIZE_RANGE.contains(&cols) {
                return Err(CommandError::SizeOutOfRange { rows, cols });
            }
            let mines = CellCount::try_from(mines).map_err(|_| GameError::TooManyMines)?;
            // both sides fit in a coordinate after the range check
            Ok(GameConfig::new(rows as Coord, cols as Coord, mines)?)
        }
        _ => Err(CommandError::WrongArity {
            count: args.len(),
            usage: "start <height> <width> <mines> | start <easy | medium | expert>",
        }),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match name {
            "s" | "start" => parse_start(&args).map(Command::Start),
            "c" | "check" => parse_coords(&args, "check <row> <col>.").map(Command::Check),
            "f" | "flag" => parse_coords(&args, "flag <row> <col>.").map(Command::Flag),
            "h" | "help" => Ok(Command::Help(args.first().map(|&topic| topic.to_owned()))),
            "q" | "quit" => Ok(Command::Quit),
            _ => Err(CommandError::Unrecognized(name.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn parses_moves_with_aliases() {
        assert_eq!(parse("check 3 4"), Ok(Command::Check((3, 4))));
        assert_eq!(parse("c 0 9\n"), Ok(Command::Check((0, 9))));
        assert_eq!(parse("  flag 1 2 "), Ok(Command::Flag((1, 2))));
        assert_eq!(parse("f 7 7"), Ok(Command::Flag((7, 7))));
        assert_eq!(parse("q"), Ok(Command::Quit));
        assert_eq!(parse("help check"), Ok(Command::Help(Some("check".into()))));
        assert_eq!(parse("h"), Ok(Command::Help(None)));
    }

    #[test]
    fn parses_start_forms() {
        assert_eq!(
            parse("start easy"),
            Ok(Command::Start(GameConfig::new_unchecked((8, 8), 10)))
        );
        assert_eq!(
            parse("s Expert"),
            Ok(Command::Start(GameConfig::new_unchecked((30, 16), 99)))
        );
        assert_eq!(
            parse("s 12 20 30"),
            Ok(Command::Start(GameConfig::new_unchecked((12, 20), 30)))
        );
    }

    #[test]
    fn rejects_bad_start() {
        assert_eq!(
            parse("start hard"),
            Err(CommandError::UnknownDifficulty("hard".into()))
        );
        assert_eq!(
            parse("start 9 20 5"),
            Err(CommandError::SizeOutOfRange { rows: 9, cols: 20 })
        );
        assert_eq!(
            parse("start 10 10 100"),
            Err(CommandError::Game(GameError::TooManyMines))
        );
        assert_eq!(parse("start 10 ten 5"), Err(CommandError::NotNumeric));
        assert!(matches!(
            parse("start 10 10"),
            Err(CommandError::WrongArity { count: 2, .. })
        ));
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert_eq!(parse("check -1 2"), Err(CommandError::NotNumeric));
        assert_eq!(parse("flag a b"), Err(CommandError::NotNumeric));
        assert_eq!(
            parse("check 300 1"),
            Err(CommandError::Game(GameError::InvalidCoords))
        );
        assert!(matches!(
            parse("check 1"),
            Err(CommandError::WrongArity { count: 1, .. })
        ));
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(
            parse("dig 1 1"),
            Err(CommandError::Unrecognized("dig".into()))
        );
        assert_eq!(parse(""), Err(CommandError::Unrecognized(String::new())));
    }

    #[test]
    fn help_lookup_by_prefix() {
        assert_eq!(lookup_help("flag").map(|help| help.name), Some("flag"));
        assert_eq!(lookup_help("S").map(|help| help.name), Some("start"));
        assert_eq!(lookup_help("che").map(|help| help.name), Some("check"));
        assert_eq!(lookup_help("QUI").map(|help| help.name), Some("quit"));
        assert!(lookup_help("checks").is_none());
        assert!(lookup_help("").is_none());
        assert!(lookup_help("x").is_none());
    }
}
