use core::fmt;

use crate::*;

/// Text grid of a board: a header with column indices, then one bordered line per row.
#[derive(Copy, Clone, Debug)]
pub struct BoardView<'a> {
    engine: &'a PlayEngine,
    show_mines: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(engine: &'a PlayEngine, show_mines: bool) -> Self {
        Self { engine, show_mines }
    }
}

impl PlayEngine {
    /// Player view while the game goes on, or every mine uncovered once it ended.
    pub fn view(&self, show_mines: bool) -> BoardView<'_> {
        BoardView::new(self, show_mines)
    }
}

fn digits(value: Coord) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

fn write_border(
    f: &mut fmt::Formatter<'_>,
    size: Coord,
    label_width: usize,
    cell_width: usize,
) -> fmt::Result {
    write!(f, "{:label_width$} +", "")?;
    for _ in 0..size {
        write!(f, "{:-<cell_width$}+", "")?;
    }
    writeln!(f)
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.engine.size();
        let label_width = digits(size.saturating_sub(1));
        let cell_width = label_width + 2;

        // indices sit where a centered symbol of the same column would
        let mut written = 0;
        for col in 0..size {
            let start = label_width + 2 + usize::from(col) * (cell_width + 1);
            let target = start + (cell_width - digits(col)) / 2;
            let gap = target - written;
            write!(f, "{:gap$}{col}", "")?;
            written = target + digits(col);
        }
        writeln!(f)?;

        for row in 0..size {
            write_border(f, size, label_width, cell_width)?;
            write!(f, "{row:>label_width$} |")?;
            for col in 0..size {
                let symbol = self.engine.cell_view((row, col), self.show_mines).symbol();
                write!(f, "{symbol:^cell_width$}|")?;
            }
            writeln!(f)?;
        }
        write_border(f, size, label_width, cell_width)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn played_engine() -> PlayEngine {
        let layout = MineLayout::from_mine_coords(3, &[(0, 0), (0, 2)]).unwrap();
        let mut engine = PlayEngine::new(layout);
        engine.reveal((2, 0)).unwrap();
        engine
    }

    #[test]
    fn renders_player_view() {
        let expected = "    0   1   2
  +---+---+---+
0 |   |   |   |
  +---+---+---+
1 | 1 | 2 | 1 |
  +---+---+---+
2 |   |   |   |
  +---+---+---+
";
        assert_eq!(played_engine().view(false).to_string(), expected);
    }

    #[test]
    fn renders_mines_when_shown() {
        let expected = "    0   1   2
  +---+---+---+
0 | * |   | * |
  +---+---+---+
1 | 1 | 2 | 1 |
  +---+---+---+
2 |   |   |   |
  +---+---+---+
";
        assert_eq!(played_engine().view(true).to_string(), expected);
    }

    #[test]
    fn wide_boards_keep_columns_aligned() {
        let layout = MineLayout::from_mine_coords(11, &[(0, 0)]).unwrap();
        let engine = PlayEngine::new(layout);
        let rendered = engine.view(true).to_string();
        let mut lines = rendered.lines();

        let header = lines.next().unwrap();
        let border = lines.next().unwrap();
        let first_row = lines.next().unwrap();

        assert!(header.starts_with("     0    1"));
        assert!(header.ends_with(" 10"));
        assert!(border.starts_with("   +----+"));
        assert!(first_row.starts_with(" 0 | *  |"));
        assert_eq!(border.len(), first_row.len());
        assert_eq!(rendered.lines().count(), 1 + 2 * 11 + 1);
    }

    #[test]
    fn digit_widths() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(254), 3);
    }
}
