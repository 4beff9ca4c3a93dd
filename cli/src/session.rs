use std::io::{self, Write};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use sapper_core::{BoardView, CascadePolicy, GameConfig, PlayEngine, SolutionView};

use crate::command::{COMMANDS, Command, CommandError, lookup_help};
use crate::render::{BoardDisplay, Palette, SolutionDisplay};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Command loop state: at most one running game plus the seed source for the next ones.
pub struct Session {
    game: Option<PlayEngine>,
    seeds: SmallRng,
    cascade: CascadePolicy,
    palette: Palette,
}

impl Session {
    pub fn new(seed: u64, cascade: CascadePolicy) -> Self {
        Self {
            game: None,
            seeds: SmallRng::seed_from_u64(seed),
            cascade,
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn start(&mut self, config: GameConfig) -> Result<(), CommandError> {
        let seed = self.seeds.random();
        log::debug!("Starting {:?} with seed {}", config, seed);
        let engine = PlayEngine::with_seed(config, seed)?.with_cascade_policy(self.cascade);
        self.game = Some(engine);
        Ok(())
    }

    /// Runs one input line and prints the resulting board.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        match line.parse::<Command>() {
            Ok(Command::Quit) => return Ok(Flow::Quit),
            Ok(command) => match self.apply(command) {
                Ok(Some(reply)) => write!(out, "{reply}")?,
                Ok(None) => {}
                Err(err) => writeln!(out, "> {err}")?,
            },
            Err(err) => writeln!(out, "> {err}")?,
        }

        self.show(out)?;
        Ok(Flow::Continue)
    }

    fn apply(&mut self, command: Command) -> Result<Option<String>, CommandError> {
        match command {
            Command::Start(config) => self.start(config).map(|_| None),
            Command::Check(coords) => {
                let hit = self.game_mut()?.check(coords)?;
                log::debug!("Checked {:?}, mine: {}", coords, hit);
                Ok(None)
            }
            Command::Flag(coords) => {
                let outcome = self.game_mut()?.flag(coords)?;
                log::debug!("Flagged {:?}: {:?}", coords, outcome);
                Ok(None)
            }
            Command::Help(topic) => help_text(topic.as_deref()).map(Some),
            Command::Quit => Ok(None),
        }
    }

    fn game_mut(&mut self) -> Result<&mut PlayEngine, CommandError> {
        self.game.as_mut().ok_or(CommandError::NoGame)
    }

    /// Prints the running board, or the verdict and full layout once the game is decided.
    pub fn show(&mut self, out: &mut impl Write) -> io::Result<()> {
        let Some(game) = &self.game else {
            return writeln!(out, "> Start a game with the start command.");
        };

        if !game.game_over() {
            return write!(out, "{}", BoardDisplay(&BoardView::from_engine(game), self.palette));
        }

        let verdict = if game.win() { "You won!" } else { "You lost." };
        writeln!(out, "> Game over! {verdict}")?;
        match SolutionView::from_engine(game) {
            Ok(solution) => write!(out, "{}", SolutionDisplay(&solution, self.palette))?,
            // decided before any mine was placed
            Err(_) => write!(out, "{}", BoardDisplay(&BoardView::from_engine(game), self.palette))?,
        }
        self.game = None;
        Ok(())
    }
}

fn help_text(topic: Option<&str>) -> Result<String, CommandError> {
    match topic {
        Some(topic) => {
            let help = lookup_help(topic)
                .ok_or_else(|| CommandError::Unrecognized(topic.to_owned()))?;
            Ok(format!("> {}\n>  - {}\n", help.usage, help.description))
        }
        None => {
            let mut text = String::new();
            if let Some(help) = lookup_help("help") {
                text.push_str(&format!("> {}: {}\n", help.usage, help.description));
            }
            for help in COMMANDS.iter().filter(|help| help.name != "help") {
                text.push_str(&format!(">  - {}\n", help.usage));
            }
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = session.handle(line, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn moves_need_a_game() {
        let mut session = Session::new(1, CascadePolicy::Standard);

        let (flow, text) = run(&mut session, "check 1 1");

        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            text,
            "> You need to start a game first!\n> Start a game with the start command.\n"
        );
    }

    #[test]
    fn start_prints_hidden_board() {
        let mut session = Session::new(1, CascadePolicy::Standard);

        let (_, text) = run(&mut session, "start easy");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], " 0 ☐ ☐ ☐ ☐ ☐ ☐ ☐ ☐");
        assert_eq!(lines[9], format!("{:>16}", "Mines: 10"));
    }

    #[test]
    fn engine_errors_are_reported_and_game_continues() {
        let mut session = Session::new(1, CascadePolicy::Standard);
        run(&mut session, "start easy");

        let (_, text) = run(&mut session, "flag 8 0");
        assert!(text.starts_with("> Invalid coordinates\n"));

        run(&mut session, "flag 2 2");
        let (_, text) = run(&mut session, "check 2 2");
        assert!(text.starts_with("> That position is flagged\n"));
        assert!(text.contains("Mines: 9"));
    }

    #[test]
    fn single_safe_cell_wins_on_first_check() {
        let mut session = Session::new(1, CascadePolicy::Standard);
        run(&mut session, "start 10 10 99");

        let (_, text) = run(&mut session, "c 4 4");

        assert!(text.starts_with("> Game over! You won!\n"));
        assert_eq!(text.matches('☢').count(), 99);

        // the finished game is dropped
        let (_, text) = run(&mut session, "c 4 4");
        assert!(text.starts_with("> You need to start a game first!"));
    }

    #[test]
    fn colored_session_keeps_layout() {
        let mut session = Session::new(1, CascadePolicy::Standard).with_palette(Palette::Color);
        run(&mut session, "start 10 10 99");

        let (_, text) = run(&mut session, "c 4 4");

        assert!(text.starts_with("> Game over! You won!\n"));
        assert_eq!(text.matches('☢').count(), 99);
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(text.contains("\u{1b}["));
        }
    }

    #[test]
    fn help_lists_and_describes() {
        let mut session = Session::new(1, CascadePolicy::Standard);

        let (_, text) = run(&mut session, "help");
        assert!(text.starts_with("> [h]elp [cmd]: Lists all available commands"));
        assert!(text.contains(">  - [q]uit\n"));

        let (_, text) = run(&mut session, "help che");
        assert!(text.starts_with("> [c]heck <row> <col>\n"));

        let (_, text) = run(&mut session, "help f");
        assert!(text.starts_with("> [f]lag <row> <col>\n>  - Flags the tile"));

        let (_, text) = run(&mut session, "help dig");
        assert!(text.starts_with("> Unrecognized command dig!"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = Session::new(1, CascadePolicy::Standard);
        assert_eq!(run(&mut session, "quit"), (Flow::Quit, String::new()));
    }
}
