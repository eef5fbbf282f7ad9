use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Generation strategy that repeatedly picks a uniformly random cell and places a mine there, retrying when the cell
/// already holds one, until the requested amount has been placed.
#[derive(Clone, Debug)]
pub struct RejectionSampler<R> {
    rng: R,
}

impl<R: Rng> RejectionSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RejectionSampler<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LayoutGenerator for RejectionSampler<R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        let config = GameConfig::new(config.size, config.mines).inspect_err(|_| {
            log::warn!(
                "Cannot fit {} mines on a {}x{} board",
                config.mines,
                config.size,
                config.size
            );
        })?;
        let GameConfig { size, mines } = config;

        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        let mut mines_placed = 0;
        let mut rejected = 0u32;

        while mines_placed < mines {
            let coords = (self.rng.random_range(0..size), self.rng.random_range(0..size));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                rejected += 1;
                log::trace!("Mine already at {:?}, picking again", coords);
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board leaving {} safe cells, {} picks rejected",
            mines_placed,
            size,
            size,
            config.safe_cells(),
            rejected
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
