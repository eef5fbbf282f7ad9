use crate::*;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Raw coordinates, not yet checked against the board.
    Reveal { row: i32, col: i32 },
}

impl Command {
    /// Accepts `q`/`quit` in any case, or exactly two whitespace-separated base-10 integers.
    ///
    /// `max` is the largest valid coordinate and only ends up in the error message.
    pub fn parse(line: &str, max: Coord) -> Result<Self> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(Self::Quit);
        }

        let invalid = GameError::InvalidCommand { max };
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(row), Some(col), None) => {
                let row = row.parse().map_err(|_| invalid)?;
                let col = col.parse().map_err(|_| invalid)?;
                Ok(Self::Reveal { row, col })
            }
            _ => Err(invalid),
        }
    }
}
