use alloc::collections::VecDeque;
use ndarray::Array2;

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game from the first move to the last, over a layout that was fully generated beforehand.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayEngine {
    mine_layout: MineLayout,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        log::debug!(
            "New {}x{} game with {} mines",
            size,
            size,
            mine_layout.mine_count()
        );
        Self {
            mine_layout,
            revealed: Array2::default((size, size).to_nd_index()),
            revealed_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn size(&self) -> Coord {
        self.mine_layout.size()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    /// Converts raw player input into board coordinates.
    pub fn validate_coords(&self, row: i32, col: i32) -> Result<Coord2> {
        let size = self.size();
        let axis = |value: i32| Coord::try_from(value).ok().filter(|&value| value < size);
        match (axis(row), axis(col)) {
            (Some(row), Some(col)) => Ok((row, col)),
            _ => Err(self.out_of_bounds()),
        }
    }

    pub fn cell_view(&self, coords: Coord2, show_mines: bool) -> CellView {
        match self.mine_layout.content(coords) {
            CellContent::Empty(count) if self.is_revealed(coords) => CellView::Revealed(count),
            CellContent::Mine if show_mines => CellView::Mine,
            _ => CellView::Hidden,
        }
    }

    pub fn all_non_mines_revealed(&self) -> bool {
        self.revealed_count == self.mine_layout.safe_cell_count()
    }

    /// Plays a single move.
    ///
    /// Stepping on a mine loses the game without marking the mine as revealed. Any other cell is opened together with
    /// the zero region around it, winning the game once no safe cell is left hidden.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        if !self.in_bounds(coords) {
            return Err(self.out_of_bounds());
        }

        if self.is_revealed(coords) {
            return Err(GameError::AlreadyRevealed);
        }

        if self.mine_layout.contains_mine(coords) {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.reveal_cascade(coords);
        log::debug!("Revealed {} cells from {:?}", opened, coords);

        if self.all_non_mines_revealed() {
            self.end_game(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Opens `start` and flood-fills through zero cells, returning how many cells were newly revealed.
    ///
    /// Cells out of bounds, already revealed or holding a mine are skipped, so mines are never opened here. Nothing
    /// is opened once the game has ended.
    fn reveal_cascade(&mut self, start: Coord2) -> CellCount {
        if self.state.is_finished() {
            log::debug!("Game already ended, not revealing from {:?}", start);
            return 0;
        }

        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if !self.in_bounds(coords)
                || self.is_revealed(coords)
                || self.mine_layout.contains_mine(coords)
            {
                continue;
            }

            self.revealed[coords.to_nd_index()] = true;
            opened += 1;

            if self.mine_layout.adjacent_mine_count(coords) == Some(0) {
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.is_revealed(pos) && !self.mine_layout[pos]),
                );
                log::trace!("Zero at {:?}, {} cells queued", coords, to_visit.len());
            }
        }

        self.revealed_count += opened;
        opened
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            GameState::Won
        } else {
            GameState::Lost
        };
        log::debug!("Game ended: {:?}", self.state);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn in_bounds(&self, (row, col): Coord2) -> bool {
        let size = self.size();
        row < size && col < size
    }

    fn out_of_bounds(&self) -> GameError {
        GameError::OutOfBounds {
            max: self.size().saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord, mines: &[Coord2]) -> PlayEngine {
        PlayEngine::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn revealed_cells(engine: &PlayEngine) -> CellCount {
        engine.revealed.iter().filter(|&&revealed| revealed).count() as CellCount
    }

    #[test]
    fn reveal_next_to_mine_opens_single_cell() {
        let mut engine = engine(4, &[(0, 0), (3, 3)]);

        let outcome = engine.reveal((0, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(engine.cell_view((0, 1), false), CellView::Revealed(1));
        assert_eq!(engine.revealed_count(), 1);
        assert_eq!(revealed_cells(&engine), 1);
    }

    #[test]
    fn reveal_zero_cascades_over_connected_region() {
        let mut engine = engine(4, &[(0, 0), (3, 3)]);

        let outcome = engine.reveal((1, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.revealed_count(), 14);
        assert!(!engine.is_revealed((0, 0)));
        assert!(!engine.is_revealed((3, 3)));
        assert_eq!(engine.cell_view((1, 1), false), CellView::Revealed(1));
        assert_eq!(engine.cell_view((2, 2), false), CellView::Revealed(1));
        assert_eq!(engine.cell_view((0, 3), false), CellView::Revealed(0));
    }

    #[test]
    fn cascade_stops_at_numbered_border() {
        // row 2 is all mines, the cascade from the top must not cross it
        let mines = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];
        let mut engine = engine(5, &mines);

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(engine.revealed_count(), 10);
        for col in 0..5 {
            assert_eq!(engine.cell_view((0, col), false), CellView::Revealed(0));
            assert!(engine.is_revealed((1, col)));
            assert!(!engine.is_revealed((2, col)));
            assert!(!engine.is_revealed((3, col)));
            assert!(!engine.is_revealed((4, col)));
        }
        assert_eq!(engine.cell_view((1, 0), false), CellView::Revealed(2));
        assert_eq!(engine.cell_view((1, 2), false), CellView::Revealed(3));
    }

    #[test]
    fn cascade_skips_invalid_start() {
        let mut engine = engine(3, &[(1, 1)]);

        assert_eq!(engine.reveal_cascade((1, 1)), 0);
        assert_eq!(engine.reveal_cascade((3, 0)), 0);
        assert_eq!(engine.reveal_cascade((0, 0)), 1);
        assert_eq!(engine.reveal_cascade((0, 0)), 0);
        assert_eq!(engine.revealed_count(), 1);
    }

    #[test]
    fn cascade_does_nothing_after_loss() {
        let mut engine = engine(3, &[(0, 0)]);
        engine.reveal((0, 0)).unwrap();

        assert_eq!(engine.reveal_cascade((2, 2)), 0);
        assert_eq!(engine.revealed_count(), 0);
        assert!(!engine.is_revealed((2, 2)));
        assert!(!engine.all_non_mines_revealed());
        assert_eq!(engine.state(), GameState::Lost);
    }

    #[test]
    fn cascade_does_nothing_after_win() {
        let mut engine = engine(2, &[(0, 0)]);
        engine.reveal((0, 1)).unwrap();
        engine.reveal((1, 0)).unwrap();
        engine.reveal((1, 1)).unwrap();

        assert!(engine.is_won());
        assert_eq!(engine.reveal_cascade((0, 1)), 0);
        assert_eq!(engine.revealed_count(), 3);
    }

    #[test]
    fn reveal_mine_loses_without_revealing_it() {
        let mut engine = engine(3, &[(1, 1)]);

        let outcome = engine.reveal((1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.state(), GameState::Lost);
        assert_eq!(engine.triggered_mine(), Some((1, 1)));
        assert!(!engine.is_revealed((1, 1)));
        assert_eq!(engine.cell_view((1, 1), false), CellView::Hidden);
        assert_eq!(engine.cell_view((1, 1), true), CellView::Mine);
    }

    #[test]
    fn no_moves_after_loss() {
        let mut engine = engine(2, &[(0, 0)]);

        engine.reveal((0, 0)).unwrap();

        assert_eq!(engine.reveal((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.state(), GameState::Lost);
        assert!(!engine.is_won());
        assert_eq!(engine.revealed_count(), 0);
    }

    #[test]
    fn already_revealed_is_reported_without_change() {
        let mut engine = engine(4, &[(0, 0), (3, 3)]);
        engine.reveal((0, 1)).unwrap();
        let before = engine.clone();

        assert_eq!(engine.reveal((0, 1)), Err(GameError::AlreadyRevealed));
        assert_eq!(engine.reveal((0, 1)), Err(GameError::AlreadyRevealed));
        assert_eq!(engine, before);
    }

    #[test]
    fn winning_requires_every_safe_cell() {
        let mut engine = engine(2, &[(0, 0)]);

        assert_eq!(engine.reveal((0, 1)).unwrap(), RevealOutcome::Revealed);
        assert!(!engine.all_non_mines_revealed());
        assert_eq!(engine.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::Won);
        assert!(engine.all_non_mines_revealed());
        assert!(engine.is_won());
        assert_eq!(engine.triggered_mine(), None);
    }

    #[test]
    fn mine_free_board_is_won_in_one_move() {
        let mut engine = engine(3, &[]);

        assert_eq!(engine.reveal((2, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.revealed_count(), 9);
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let engine = engine(4, &[(0, 0)]);

        assert_eq!(engine.validate_coords(3, 0), Ok((3, 0)));
        assert_eq!(engine.validate_coords(0, 3), Ok((0, 3)));
        assert_eq!(
            engine.validate_coords(4, 0),
            Err(GameError::OutOfBounds { max: 3 })
        );
        assert_eq!(
            engine.validate_coords(0, -1),
            Err(GameError::OutOfBounds { max: 3 })
        );
        assert_eq!(
            engine.validate_coords(i32::MAX, i32::MIN),
            Err(GameError::OutOfBounds { max: 3 })
        );
    }

    #[test]
    fn reveal_rejects_out_of_bounds() {
        let mut engine = engine(4, &[(0, 0)]);

        assert_eq!(
            engine.reveal((4, 4)),
            Err(GameError::OutOfBounds { max: 3 })
        );
        assert_eq!(engine.state(), GameState::Playing);
    }
}
