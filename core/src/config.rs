use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Dimensions and mine count of a game.
///
/// A valid config has at least one row, one column and one cell without a mine, so a win is always
/// reachable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(rows, cols, mines).validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.rows == 0 || self.cols == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// Parses the `ROWSxCOLSxMINES` size strings used by the board menu, e.g. `8x10x10`.
impl FromStr for GameConfig {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('x');
        let mut next_part = || parts.next().ok_or(GameError::MalformedConfig);

        let rows = next_part()?.parse().map_err(|_| GameError::MalformedConfig)?;
        let cols = next_part()?.parse().map_err(|_| GameError::MalformedConfig)?;
        let mines = next_part()?.parse().map_err(|_| GameError::MalformedConfig)?;
        if parts.next().is_some() {
            return Err(GameError::MalformedConfig);
        }

        Self::new(rows, cols, mines)
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.rows, self.cols, self.mines)
    }
}

/// Preset boards offered by the game menu.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(8, 10, 10),
            Self::Medium => GameConfig::new_unchecked(14, 18, 40),
        }
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(GameConfig::new(0, 5, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 0, 0), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn requires_at_least_one_safe_cell() {
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(3, 3, 8).map(|c| c.safe_cells()), Ok(1));
        assert!(GameConfig::new(1, 1, 0).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            let config = difficulty.config();
            assert_eq!(config.validate(), Ok(config));
        }
        assert_eq!(GameConfig::default(), GameConfig::new_unchecked(8, 10, 10));
    }

    #[test]
    fn parses_menu_size_strings() {
        assert_eq!("8x10x10".parse(), Ok(GameConfig::new_unchecked(8, 10, 10)));
        assert_eq!(" 14x18x40 ".parse(), Ok(Difficulty::Medium.config()));
    }

    #[test]
    fn rejects_malformed_size_strings() {
        for input in ["", "8x10", "8x10x10x1", "axbxc", "8 x 10 x 10", "-1x2x0"] {
            assert_eq!(input.parse::<GameConfig>(), Err(GameError::MalformedConfig), "{input:?}");
        }
        assert_eq!("2x2x4".parse::<GameConfig>(), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let config = Difficulty::Medium.config();
        assert_eq!(config.to_string().parse(), Ok(config));
    }

    #[test]
    fn serializes_as_plain_fields() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        assert_eq!(json, r#"{"rows":8,"cols":10,"mines":10}"#);
    }
}
