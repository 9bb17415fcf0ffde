#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use render::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod render;
mod types;

/// Immutable mine placement of a board together with the adjacency counts derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineMask", into = "MineMask")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent_mines: Array2<u8>,
    mine_count: CellCount,
}

/// Serialized form of a [`MineLayout`]; adjacency is derived again on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineMask {
    size: Coord2,
    mines: Array2<bool>,
}

impl MineLayout {
    /// Layout of a 0x0 board, used before the first game is initialized.
    pub fn empty() -> Self {
        Self::from_sized_mask(Array2::default([0, 0]))
    }

    /// Builds a layout from an arbitrary mask, rejecting masks whose sides do not fit a [`Coord`].
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let _: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        let _: Coord = cols.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self::from_sized_mask(mine_mask))
    }

    /// `mine_mask` must have been allocated from a [`Coord2`] size.
    pub(crate) fn from_sized_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let adjacent_mines = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            mine_mask
                .iter_neighbors((row as Coord, col as Coord))
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8
        });
        Self {
            mine_mask,
            adjacent_mines,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_sized_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig::new_unchecked(rows, cols, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        types::grid_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent_mines[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    #[cfg(test)]
    pub(crate) fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl TryFrom<MineMask> for MineLayout {
    type Error = GameError;

    fn try_from(mask: MineMask) -> Result<Self> {
        let (rows, cols) = mask.size;
        if mask.mines.dim() != (rows.into(), cols.into()) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::from_sized_mask(mask.mines))
    }
}

impl From<MineLayout> for MineMask {
    fn from(layout: MineLayout) -> Self {
        Self {
            size: layout.size(),
            mines: layout.mine_mask,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
