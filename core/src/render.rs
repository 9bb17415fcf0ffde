use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a presentation layer should draw for a single cell.
///
/// The textual forms (`H`, `F`, `0`-`8`, `M`) are the class suffixes the board stylesheet keys on.
///
/// A board only ever produces `Open(0..=8)`. A hand-built `Open` above 8 renders as `?`, which does not parse back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RenderCode {
    Covered,
    Flag,
    Open(u8),
    Mine,
}

impl RenderCode {
    const OPEN: [&'static str; 9] = ["0", "1", "2", "3", "4", "5", "6", "7", "8"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Covered => "H",
            Self::Flag => "F",
            Self::Open(count) if (count as usize) < Self::OPEN.len() => Self::OPEN[count as usize],
            Self::Open(_) => "?",
            Self::Mine => "M",
        }
    }
}

impl From<RenderCode> for &'static str {
    fn from(code: RenderCode) -> Self {
        code.as_str()
    }
}

impl FromStr for RenderCode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "H" => Ok(Self::Covered),
            "F" => Ok(Self::Flag),
            "M" => Ok(Self::Mine),
            _ => match s.parse::<u8>() {
                Ok(count) if count <= 8 && s.len() == 1 => Ok(Self::Open(count)),
                _ => Err(GameError::InvalidBoardShape),
            },
        }
    }
}

impl TryFrom<String> for RenderCode {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for RenderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the whole board as `nrows` rows of `ncols` render codes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rendering {
    rows: Vec<Vec<RenderCode>>,
}

impl Rendering {
    pub(crate) fn new(rows: Vec<Vec<RenderCode>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<RenderCode>] {
        &self.rows
    }

    pub fn get(&self, (row, col): Coord2) -> Option<RenderCode> {
        self.rows.get(usize::from(row))?.get(usize::from(col)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = RenderCode> + '_ {
        self.rows.iter().flatten().copied()
    }

    pub fn into_rows(self) -> Vec<Vec<RenderCode>> {
        self.rows
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for code in row {
                write!(f, "{}", code)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
