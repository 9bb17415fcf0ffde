use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for a [`Board`].
///
/// Boards take their generator at construction, so tests can swap the random one for a fixed layout.
pub trait LayoutGenerator {
    /// Produces a layout of `config.size()` with exactly `config.mines` mines.
    fn generate(&mut self, config: GameConfig) -> MineLayout;
}

/// Always hands out the same layout, regardless of the requested config.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayoutGenerator {
    layout: MineLayout,
}

impl FixedLayoutGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }
}

impl LayoutGenerator for FixedLayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        if self.layout.game_config() != config {
            log::warn!(
                "Fixed layout {} does not match requested config {}",
                self.layout.game_config(),
                config
            );
        }
        self.layout.clone()
    }
}
