use serde::{Deserialize, Serialize};

/// Player-visible cover of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// Read-only view of everything the engine knows about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub cover: CoverState,
}
