use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;

use preset::{CascadeMode, Difficulty};
use render::Palette;
use session::{Flow, Session};

mod command;
mod preset;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How far revealing a cell spreads
    #[arg(short, long, value_enum, default_value_t)]
    cascade: CascadeMode,

    /// Start right away at this difficulty
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Draw the board without colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut stdout = io::stdout().lock();
    let palette = if args.no_color || !stdout.is_terminal() {
        Palette::Plain
    } else {
        Palette::Color
    };
    let mut session = Session::new(seed, args.cascade.into()).with_palette(palette);

    writeln!(stdout, "> Welcome to Minesweeper!")?;
    if let Some(difficulty) = args.difficulty {
        session.start(difficulty.config())?;
        session.show(&mut stdout)?;
    }

    let mut lines = io::stdin().lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if session.handle(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }

    writeln!(stdout, "> Thank you for playing!")?;
    writeln!(stdout, "> Bye bye!")?;
    Ok(())
}
