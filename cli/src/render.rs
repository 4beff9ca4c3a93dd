use std::fmt::{self, Display, Formatter};

use crossterm::style::{Color, Stylize, style};
use sapper_core::{BoardView, Cell, Coord, SolutionView, SolvedCell, ToNdIndex};

const HIDDEN: char = '☐';
const FLAG: char = '⚑';
const MINE: char = '☢';
const DETONATED: char = '✸';

/// Whether glyphs carry terminal colors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Plain,
    Color,
}

fn count_color(count: u8) -> Option<Color> {
    match count {
        1 => Some(Color::DarkBlue),
        2 => Some(Color::DarkGreen),
        3 => Some(Color::DarkRed),
        4 => Some(Color::Blue),
        5 => Some(Color::Red),
        6 => Some(Color::Green),
        7 => Some(Color::DarkYellow),
        8 => Some(Color::DarkGrey),
        _ => None,
    }
}

fn count_glyph(count: u8) -> char {
    match count {
        0 => ' ',
        count => char::from_digit(count.into(), 10).unwrap_or('?'),
    }
}

fn write_glyph(
    f: &mut Formatter<'_>,
    glyph: char,
    color: Option<Color>,
    palette: Palette,
) -> fmt::Result {
    match (palette, color) {
        (Palette::Color, Some(color)) => write!(f, " {}", style(glyph).with(color)),
        _ => write!(f, " {glyph}"),
    }
}

fn write_count(f: &mut Formatter<'_>, count: u8, palette: Palette) -> fmt::Result {
    write_glyph(f, count_glyph(count), count_color(count), palette)
}

fn write_header(f: &mut Formatter<'_>, cols: Coord) -> fmt::Result {
    write!(f, "  ")?;
    for col in 0..cols {
        write!(f, " {}", col % 10)?;
    }
    writeln!(f)
}

/// Mid-game board: what the player has uncovered so far.
pub struct BoardDisplay<'a>(pub &'a BoardView, pub Palette);

impl Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self(view, palette) = *self;
        let (rows, cols) = view.size;

        write_header(f, cols)?;
        for row in 0..rows {
            write!(f, "{row:>2}")?;
            for col in 0..cols {
                let cell = view.cells[(row, col).to_nd_index()];
                match cell.adjacent_mines() {
                    Some(count) => write_count(f, count, palette)?,
                    None if cell == Cell::Flagged => write!(f, " {FLAG}")?,
                    None => write!(f, " {HIDDEN}")?,
                }
            }
            writeln!(f)?;
        }

        let footer = format!("Mines: {}", view.mines_left);
        writeln!(f, "{footer:>width$}", width = usize::from(cols) * 2)
    }
}

/// End-of-game board with every mine and count disclosed.
pub struct SolutionDisplay<'a>(pub &'a SolutionView, pub Palette);

impl Display for SolutionDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self(view, palette) = *self;
        let (rows, cols) = view.size;

        write_header(f, cols)?;
        for row in 0..rows {
            write!(f, "{row:>2}")?;
            for col in 0..cols {
                match view.cells[(row, col).to_nd_index()] {
                    SolvedCell::Mine if view.detonated_at == Some((row, col)) => {
                        write_glyph(f, DETONATED, Some(Color::Red), palette)?
                    }
                    SolvedCell::Mine => write!(f, " {MINE}")?,
                    SolvedCell::Safe(count) => write_count(f, count, palette)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{MineLayout, PlayEngine};

    fn engine() -> PlayEngine<sapper_core::FixedGenerator> {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        PlayEngine::from_layout(layout).unwrap()
    }

    #[test]
    fn draws_hidden_flagged_and_open_cells() {
        let mut engine = engine();
        engine.check((0, 2)).unwrap();
        engine.flag((1, 0)).unwrap();

        let text = BoardDisplay(&BoardView::from_engine(&engine), Palette::Plain).to_string();

        assert_eq!(
            text,
            concat!(
                "   0 1 2\n",
                " 0 ☐ 1  \n",
                " 1 ⚑ 1  \n",
                "Mines: 0\n",
            )
        );
    }

    #[test]
    fn footer_is_right_aligned() {
        let layout = MineLayout::from_mine_coords((1, 12), &[(0, 0), (0, 5)]).unwrap();
        let engine = PlayEngine::from_layout(layout).unwrap();

        let text = BoardDisplay(&BoardView::from_engine(&engine), Palette::Plain).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "   0 1 2 3 4 5 6 7 8 9 0 1");
        assert_eq!(lines[2], format!("{:>24}", "Mines: 2"));
    }

    #[test]
    fn solution_marks_detonated_mine() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (1, 2)]).unwrap();
        let mut engine = PlayEngine::from_layout(layout).unwrap();
        engine.check((1, 2)).unwrap();

        let solution = SolutionView::from_engine(&engine).unwrap();
        let text = SolutionDisplay(&solution, Palette::Plain).to_string();

        assert_eq!(
            text,
            concat!(
                "   0 1 2\n",
                " 0 ☢ 2 1\n",
                " 1 1 2 ✸\n",
            )
        );
    }

    #[test]
    fn colors_counts_and_detonation_only_when_asked() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (1, 2)]).unwrap();
        let mut engine = PlayEngine::from_layout(layout).unwrap();
        engine.check((1, 2)).unwrap();
        let solution = SolutionView::from_engine(&engine).unwrap();

        let plain = SolutionDisplay(&solution, Palette::Plain).to_string();
        let colored = SolutionDisplay(&solution, Palette::Color).to_string();

        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains('✸') && colored.contains('2'));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(colored.contains("\u{1b}["));
            assert_ne!(plain, colored);
        }
    }

    #[test]
    fn color_table_covers_every_count() {
        assert_eq!(count_color(0), None);
        for count in 1..=8 {
            assert!(count_color(count).is_some());
        }
        assert_eq!(count_color(1), Some(Color::DarkBlue));
        assert_eq!(count_color(3), Some(Color::DarkRed));
    }
}
