use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement: every set of `mines` distinct cells is equally likely.
///
/// The generator owns its rng, so re-initializing a board with the same generator continues the stream and yields a
/// new layout each time, while two generators built from the same seed yield the same sequence of layouts.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeds from the wall clock, for games that do not need to be reproducible.
    pub fn from_time() -> Self {
        use web_time::{SystemTime, UNIX_EPOCH};

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        log::debug!("Seeding layout generator from clock: {}", seed);
        Self::new(seed)
    }
}

impl Default for RandomLayoutGenerator {
    fn default() -> Self {
        Self::from_time()
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        let total_cells = config.total_cells();
        let (rows, cols) = config.size();

        let mines = if config.mines > total_cells {
            log::warn!(
                "Board only fits {} mines but {} were requested, filling it",
                total_cells,
                config.mines
            );
            total_cells
        } else {
            config.mines
        };

        // partial Fisher-Yates: the first `mines` slots end up as a uniform sample without replacement
        let mut cells: Vec<CellCount> = (0..total_cells).collect();
        for i in 0..mines {
            let pick = self.rng.random_range(i..total_cells);
            cells.swap(i as usize, pick as usize);
        }

        let mut mine_mask = Array2::default(config.size().to_nd_index());
        for &cell in &cells[..mines as usize] {
            let coords = ((cell / CellCount::from(cols)) as Coord, (cell % CellCount::from(cols)) as Coord);
            mine_mask[coords.to_nd_index()] = true;
        }
        let layout = MineLayout::from_sized_mask(mine_mask);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!("Generated {}x{} layout with {} mines", rows, cols, layout.mine_count());
        layout
    }
}
