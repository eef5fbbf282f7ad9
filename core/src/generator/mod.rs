use crate::*;
pub use random::*;

mod random;

/// Strategy that decides where the mines go.
pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
