use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    mine_layout: MineLayout,
    board: Array2<EngineCell>,
    revealed_count: CellCount,
    remaining_flags: CellCount,
    correct_flags: CellCount,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        let remaining_flags = mine_layout.mine_count();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            remaining_flags,
            correct_flags: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Starts a fresh game. Without a seed a new one is drawn every call.
    pub fn initialize(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        let generator = match seed {
            Some(seed) => RandomMinefieldGenerator::new(seed),
            None => RandomMinefieldGenerator::from_entropy(),
        };
        log::debug!(
            "New {}x{} game with {} mines, seed {}",
            config.size.0,
            config.size.1,
            config.mines,
            generator.seed()
        );
        Ok(Self::new(generator.generate(config)))
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

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn remaining_flags(&self) -> CellCount {
        self.remaining_flags
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn correctly_flagged_mine_count(&self) -> CellCount {
        self.correct_flags
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_display(&self, coords: Coord2) -> Result<DisplayState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.display_at(coords))
    }

    pub fn display_board(&self) -> Array2<DisplayState> {
        Array2::from_shape_fn(self.size().to_nd_index(), |(row, col)| {
            self.display_at((row as Coord, col as Coord))
        })
    }

    /// Puts a flag on a hidden cell. Flagging every mine wins the game.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Report<FlagOutcome>> {
        let coords = self.mine_layout.validate_coords(coords)?;
        let mut touched = BTreeSet::new();
        let outcome = self.place_flag(coords, &mut touched);
        Ok(self.report(outcome, touched))
    }

    /// Acts on a flagged cell: the flag is lifted and the cell opened.
    ///
    /// Hidden and revealed cells are left alone; a hidden cell has to be
    /// flagged first.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Report<RevealOutcome>> {
        let coords = self.mine_layout.validate_coords(coords)?;
        let mut touched = BTreeSet::new();
        let outcome = self.reveal_flagged(coords, &mut touched);
        Ok(self.report(outcome, touched))
    }

    /// Single click: flags a hidden cell, reveals a flagged one.
    pub fn interact(&mut self, coords: Coord2) -> Result<Report<Interaction>> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(match self.cell_at(coords) {
            EngineCell::Hidden => self.toggle_flag(coords)?.map(Interaction::Flag),
            EngineCell::Flagged | EngineCell::Revealed(_) => {
                self.reveal(coords)?.map(Interaction::Reveal)
            }
        })
    }

    fn place_flag(&mut self, coords: Coord2, touched: &mut BTreeSet<Coord2>) -> FlagOutcome {
        use FlagOutcome::*;

        if self.state.is_finished() {
            return Rejected(Rejection::GameOver);
        }
        if self.cell_at(coords) != EngineCell::Hidden {
            return Rejected(Rejection::NotHidden);
        }
        if self.remaining_flags == 0 {
            return Rejected(Rejection::NoFlagsLeft);
        }

        self.board[coords.to_nd_index()] = EngineCell::Flagged;
        self.remaining_flags -= 1;
        if self.mine_layout[coords] {
            self.correct_flags += 1;
        }
        touched.insert(coords);

        if self.check_win(touched) {
            Won
        } else {
            Flagged
        }
    }

    fn reveal_flagged(&mut self, coords: Coord2, touched: &mut BTreeSet<Coord2>) -> RevealOutcome {
        use RevealOutcome::*;

        if self.state.is_finished() {
            return Rejected(Rejection::GameOver);
        }
        if self.cell_at(coords) != EngineCell::Flagged {
            return NoChange;
        }

        self.lift_flag(coords);
        touched.insert(coords);

        if self.mine_layout[coords] {
            self.triggered_mine = Some(coords);
            self.end_game(EngineState::Lost);
            touched.extend(self.mine_layout.mine_coords().iter().copied());
            return HitMine;
        }

        self.flood_reveal(coords, touched);

        if self.check_win(touched) {
            Won
        } else {
            Revealed
        }
    }

    /// Opens `start` and, through zero-count cells, everything connected to it.
    fn flood_reveal(&mut self, start: Coord2, touched: &mut BTreeSet<Coord2>) {
        let before = self.revealed_count;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = self.cell_at(coords);
            if cell.is_revealed() || self.mine_layout[coords] {
                continue;
            }
            if cell == EngineCell::Flagged {
                // same refund as unflagging by hand
                self.lift_flag(coords);
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
            self.board[coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
            self.revealed_count += 1;
            touched.insert(coords);

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.cell_at(pos).is_revealed()),
                );
            }
        }

        log::trace!(
            "Revealed {} cells from {:?}",
            self.revealed_count - before,
            start
        );
    }

    /// Returns the flag on `coords` to the pool and hides the cell again.
    fn lift_flag(&mut self, coords: Coord2) {
        self.board[coords.to_nd_index()] = EngineCell::Hidden;
        self.remaining_flags = (self.remaining_flags + 1).min(self.total_mines());
        if self.mine_layout[coords] {
            self.correct_flags = self.correct_flags.saturating_sub(1);
        }
    }

    fn check_win(&mut self, touched: &mut BTreeSet<Coord2>) -> bool {
        let all_safe_revealed = self.revealed_count == self.mine_layout.safe_cell_count();
        let all_mines_flagged = self.correct_flags == self.total_mines();

        if all_safe_revealed || all_mines_flagged {
            self.end_game(EngineState::Won);
            touched.extend(self.mine_layout.mine_coords().iter().copied());
            true
        } else {
            false
        }
    }

    fn end_game(&mut self, state: EngineState) {
        if self.state.is_finished() {
            return;
        }

        log::debug!(
            "Game over: {:?} with {} cells revealed and {} mines flagged",
            state,
            self.revealed_count,
            self.correct_flags
        );
        self.state = state;
    }

    fn display_at(&self, coords: Coord2) -> DisplayState {
        let has_mine = self.mine_layout[coords];

        match self.state {
            EngineState::Won if has_mine => DisplayState::WinMarkedMine,
            EngineState::Lost if self.triggered_mine == Some(coords) => DisplayState::ExplodedMine,
            EngineState::Lost if has_mine => DisplayState::ExposedMine,
            _ => self.cell_at(coords).into(),
        }
    }

    fn report<O>(&self, outcome: O, touched: BTreeSet<Coord2>) -> Report<O> {
        Report {
            outcome,
            updates: touched
                .into_iter()
                .map(|coords| CellUpdate {
                    coords,
                    display: self.display_at(coords),
                })
                .collect(),
            state: self.state,
            remaining_flags: self.remaining_flags,
        }
    }
}
