use std::io::{self, BufRead, Write};

use gridsweep_core::{self as game, Command, PlayEngine, RevealOutcome};

const PROMPT: &str = "Enter coordinate (row col) e.g. '3 7': ";

/// How a session came to an end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SessionEnd {
    Won,
    Lost,
    /// Explicit quit command or end of input.
    Quit,
}

/// Read-move-render loop over a single game.
pub(crate) struct Session<R, W> {
    engine: PlayEngine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) fn new(engine: PlayEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    /// Plays until the game is won or lost, or the player quits. Only I/O failures are returned as errors, bad
    /// moves are reported to the player and the loop goes on.
    pub(crate) fn run(&mut self) -> io::Result<SessionEnd> {
        let mut buf = Vec::new();
        loop {
            self.render(false)?;
            self.output.write_all(PROMPT.as_bytes())?;
            self.output.flush()?;

            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                log::info!("End of input, leaving");
                writeln!(self.output)?;
                return self.finish(SessionEnd::Quit);
            }
            let line = String::from_utf8_lossy(&buf);

            match self.play_line(&line) {
                Ok(None) => {}
                Ok(Some(end)) => return self.finish(end),
                Err(err) => {
                    log::debug!("Rejected {:?}: {}", line.trim_end(), err);
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (PlayEngine, W) {
        (self.engine, self.output)
    }

    fn play_line(&mut self, line: &str) -> game::Result<Option<SessionEnd>> {
        let max = self.engine.size().saturating_sub(1);
        let coords = match Command::parse(line, max)? {
            Command::Quit => return Ok(Some(SessionEnd::Quit)),
            Command::Reveal { row, col } => self.engine.validate_coords(row, col)?,
        };

        Ok(match self.engine.reveal(coords)? {
            RevealOutcome::Revealed => None,
            RevealOutcome::HitMine => Some(SessionEnd::Lost),
            RevealOutcome::Won => Some(SessionEnd::Won),
        })
    }

    fn finish(&mut self, end: SessionEnd) -> io::Result<SessionEnd> {
        match end {
            SessionEnd::Quit => writeln!(self.output, "Bye!")?,
            SessionEnd::Lost => {
                self.render(true)?;
                match self.engine.triggered_mine() {
                    Some((row, col)) => writeln!(self.output, "boom! ({row}, {col}) was a mine.")?,
                    None => writeln!(self.output, "boom!")?,
                }
            }
            SessionEnd::Won => {
                self.render(true)?;
                writeln!(self.output, "You win!")?;
            }
        }
        log::info!(
            "Session ended: {:?} with {} cells revealed",
            end,
            self.engine.revealed_count()
        );
        self.output.flush()?;
        Ok(end)
    }

    fn render(&mut self, show_mines: bool) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", self.engine.view(show_mines))?;
        writeln!(self.output)
    }
}
