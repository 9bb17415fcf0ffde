use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::num::Saturating;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Fresh board, nothing revealed yet
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Counters a presentation layer needs to draw its header and detect the end of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub nrows: Coord,
    pub ncols: Coord,
    pub nmines: CellCount,
    pub nmarked: CellCount,
    pub nuncovered: CellCount,
    pub done: bool,
    pub exploded: bool,
}

impl GameStatus {
    /// Mines minus flags, negative when the player placed more flags than there are mines.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.nmines) - i64::from(self.nmarked)
    }
}

/// The board-state machine: owns the mine layout, every cell's cover and the win/loss state.
///
/// Mutating calls on a finished game are accepted and ignored. Only bad input is reported as an error.
#[derive(Clone, Debug)]
pub struct Board<G = RandomLayoutGenerator> {
    generator: G,
    mine_layout: MineLayout,
    cells: Array2<CoverState>,
    uncovered_count: CellCount,
    flagged_count: Saturating<CellCount>,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(RandomLayoutGenerator::default())
    }
}

impl<G: LayoutGenerator> Board<G> {
    /// Creates an empty 0x0 board, call [`Board::initialize`] to start a game.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            mine_layout: MineLayout::empty(),
            cells: Array2::default([0, 0]),
            uncovered_count: 0,
            flagged_count: Saturating(0),
            state: EngineState::Ready,
            triggered_mine: None,
        }
    }

    pub fn with_config(config: GameConfig, generator: G) -> Result<Self> {
        let mut board = Self::new(generator);
        board.initialize_with_config(config)?;
        Ok(board)
    }

    /// Starts a new game with a freshly generated layout. Invalid input leaves the current game untouched.
    pub fn initialize(&mut self, rows: Coord, cols: Coord, mines: CellCount) -> Result<()> {
        self.initialize_with_config(GameConfig::new_unchecked(rows, cols, mines))
    }

    pub fn initialize_with_config(&mut self, config: GameConfig) -> Result<()> {
        let config = config.validate().inspect_err(|_| {
            log::warn!("Rejected board configuration {}", config);
        })?;
        let layout = self.generator.generate(config);
        if layout.game_config() != config {
            log::warn!(
                "Generator returned a {} layout for requested config {}",
                layout.game_config(),
                config
            );
            return Err(GameError::InvalidConfiguration);
        }
        self.load_layout(layout)
    }

    /// Starts a new game on the given layout, bypassing the generator.
    pub fn load_layout(&mut self, mine_layout: MineLayout) -> Result<()> {
        mine_layout.game_config().validate()?;

        log::debug!("New game: {}", mine_layout.game_config());
        self.cells = Array2::default(mine_layout.size().to_nd_index());
        self.mine_layout = mine_layout;
        self.uncovered_count = 0;
        self.flagged_count = Saturating(0);
        self.state = EngineState::Ready;
        self.triggered_mine = None;
        Ok(())
    }

    /// Starts a new game with the same dimensions and mine count as the current one.
    pub fn restart(&mut self) -> Result<()> {
        self.initialize_with_config(self.config())
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cover_at(&self, coords: Coord2) -> Result<CoverState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(Cell {
            is_mine: self.mine_layout.contains_mine(coords),
            adjacent_mines: self.mine_layout.adjacent_mine_count(coords),
            cover: self.cells[coords.to_nd_index()],
        })
    }

    pub fn status(&self) -> GameStatus {
        let (nrows, ncols) = self.size();
        GameStatus {
            nrows,
            ncols,
            nmines: self.mine_layout.mine_count(),
            nmarked: self.flagged_count.0,
            nuncovered: self.uncovered_count,
            done: self.state.is_finished(),
            exploded: matches!(self.state, EngineState::Lost),
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CoverState::*;
        use MarkOutcome::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        if self.state.is_finished() {
            log::debug!("Ignoring flag at {:?}, game already ended", coords);
            return Ok(NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged_count += 1;
                log::debug!("Flagged {:?}", coords);
                Changed
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                log::debug!("Unflagged {:?}", coords);
                Changed
            }
            Revealed => NoChange,
        })
    }

    /// Reveals a hidden cell, flood-filling from it when it has no adjacent mines.
    ///
    /// Flagged cells are protected and have to be unflagged first.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        if self.state.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game already ended", coords);
            return Ok(RevealOutcome::NoChange);
        }

        match self.cells[coords.to_nd_index()] {
            CoverState::Hidden => Ok(self.reveal_hidden_cell(coords)),
            CoverState::Flagged | CoverState::Revealed => Ok(RevealOutcome::NoChange),
        }
    }

    fn reveal_hidden_cell(&mut self, coords: Coord2) -> RevealOutcome {
        self.uncover(coords);

        if self.mine_layout.contains_mine(coords) {
            log::debug!("Hit mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
        log::debug!("Revealed {:?}, adjacent mines: {}", coords, adjacent_mines);
        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.uncovered_count == self.mine_layout.safe_cell_count() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    /// Reveals every hidden cell reachable from `origin` through zero cells, including the numbered border.
    ///
    /// `origin` must already be revealed and have no adjacent mines. No neighbour of a zero cell is a mine, so
    /// nothing revealed here can end the game with a loss.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut visited: HashSet<Coord2> = HashSet::from([origin]);
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(origin).collect();
        log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", origin, to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // flags stay put, and anything revealed was counted already
            if self.cells[visit_coords.to_nd_index()] != CoverState::Hidden {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            self.uncover(visit_coords);
            let visit_adjacent_mines = self.mine_layout.adjacent_mine_count(visit_coords);
            log::trace!(
                "Flood revealed cell at {:?}, adjacent mines: {}",
                visit_coords,
                visit_adjacent_mines
            );

            if visit_adjacent_mines == 0 {
                let next: Vec<_> = self
                    .hidden_neighbors(visit_coords)
                    .filter(|pos| !visited.contains(pos))
                    .collect();
                to_visit.extend(next);
            }
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()] == CoverState::Hidden)
    }

    fn uncover(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()] = CoverState::Revealed;
        self.uncovered_count += 1;
    }

    /// Projects the board into one render code per cell. After a loss every mine shows, flagged or not.
    pub fn rendering(&self) -> Rendering {
        let exploded = matches!(self.state, EngineState::Lost);
        let rows: Vec<Vec<RenderCode>> = self
            .cells
            .outer_iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, &cover)| {
                        let coords = (row as Coord, col as Coord);
                        self.render_cell(coords, cover, exploded)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        Rendering::new(rows)
    }

    fn render_cell(&self, coords: Coord2, cover: CoverState, exploded: bool) -> RenderCode {
        if exploded && self.mine_layout.contains_mine(coords) {
            return RenderCode::Mine;
        }

        match cover {
            CoverState::Hidden => RenderCode::Covered,
            CoverState::Flagged => RenderCode::Flag,
            CoverState::Revealed => RenderCode::Open(self.mine_layout.adjacent_mine_count(coords)),
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!(
            "Game ended: {:?} with {} of {} safe cells revealed",
            self.state,
            self.uncovered_count,
            self.mine_layout.safe_cell_count()
        );
    }
}
