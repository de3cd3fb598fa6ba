use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

pub const ROWS: Coord = 10;
pub const COLUMNS: Coord = 10;
pub const BOMB_COUNT: CellCount = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((ROWS, COLUMNS), BOMB_COUNT)
    }
}

/// Where the mines are. Fixed for the lifetime of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_coords: Vec<Coord2>,
}

impl MineLayout {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(size, mine_coords.len().try_into().unwrap_or(CellCount::MAX))?;

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                return Err(GameError::DuplicateMine);
            }
            *cell = true;
        }

        Ok(Self {
            mine_mask,
            mine_coords: mine_coords.to_vec(),
        })
    }

    /// Builds a layout from row-major linear indices.
    pub fn from_mine_indices(size: Coord2, indices: &[CellCount]) -> Result<Self> {
        let total = mult(size.0, size.1);
        let coords = indices
            .iter()
            .map(|&index| {
                if index < total {
                    Ok(coords_from_index(index, size))
                } else {
                    Err(GameError::InvalidCoords)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_mine_coords(size, &coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        // dimensions come from a `Coord2`, so they always fit
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_coords.len() as CellCount
    }

    /// Mine positions in the order they were placed.
    pub fn mine_coords(&self) -> &[Coord2] {
        &self.mine_coords
    }

    pub fn mine_indices(&self) -> Vec<CellCount> {
        let size = self.size();
        self.mine_coords
            .iter()
            .map(|&coords| linear_index(coords, size))
            .collect()
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Why an operation was refused without touching the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The game is already won or lost.
    GameOver,
    /// Every flag is already on the board.
    NoFlagsLeft,
    /// Flags only go on hidden cells.
    NotHidden,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Won,
    Rejected(Rejection),
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Flagged | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
    Rejected(Rejection),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
            Rejected(_) => false,
        }
    }
}

/// Result of one player action, with everything a renderer needs to redraw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report<O> {
    pub outcome: O,
    /// Cells whose display changed, in row-major order.
    pub updates: Vec<CellUpdate>,
    pub state: EngineState,
    pub remaining_flags: CellCount,
}

impl<O> Report<O> {
    pub fn map<P>(self, f: impl FnOnce(O) -> P) -> Report<P> {
        Report {
            outcome: f(self.outcome),
            updates: self.updates,
            state: self.state,
            remaining_flags: self.remaining_flags,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    Flag(FlagOutcome),
    Reveal(RevealOutcome),
}

impl Interaction {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Flag(outcome) => outcome.has_update(),
            Self::Reveal(outcome) => outcome.has_update(),
        }
    }
}
