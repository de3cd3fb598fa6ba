use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
}

impl EngineCell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

/// What a renderer should draw for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    Hidden,
    Flagged,
    RevealedEmpty,
    /// Revealed cell touching 1 to 8 mines.
    RevealedNumber(u8),
    /// The mine whose reveal lost the game.
    ExplodedMine,
    /// Any other mine, shown after a loss.
    ExposedMine,
    /// A mine shown as flagged after a win, flagged by the player or not.
    WinMarkedMine,
}

impl DisplayState {
    pub const fn is_mine(self) -> bool {
        matches!(
            self,
            Self::ExplodedMine | Self::ExposedMine | Self::WinMarkedMine
        )
    }
}

impl From<EngineCell> for DisplayState {
    fn from(cell: EngineCell) -> Self {
        match cell {
            EngineCell::Hidden => Self::Hidden,
            EngineCell::Flagged => Self::Flagged,
            EngineCell::Revealed(0) => Self::RevealedEmpty,
            EngineCell::Revealed(count) => Self::RevealedNumber(count),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub coords: Coord2,
    pub display: DisplayState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_end_of_game_markers_are_mines() {
        use DisplayState::*;

        for state in [ExplodedMine, ExposedMine, WinMarkedMine] {
            assert!(state.is_mine(), "{state:?}");
        }
        for state in [Hidden, Flagged, RevealedEmpty, RevealedNumber(2)] {
            assert!(!state.is_mine(), "{state:?}");
        }
    }

    #[test]
    fn engine_cells_map_to_display() {
        assert_eq!(DisplayState::from(EngineCell::Hidden), DisplayState::Hidden);
        assert_eq!(DisplayState::from(EngineCell::Revealed(0)), DisplayState::RevealedEmpty);
        assert_eq!(
            DisplayState::from(EngineCell::Revealed(4)),
            DisplayState::RevealedNumber(4)
        );
    }
}
