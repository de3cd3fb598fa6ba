use core::fmt::Write;
use gridsweep_core as game;
use game::DisplayState;

const RESET: &str = "\x1b[0m";

/// ANSI foreground color for a neighbor count.
fn number_color(count: u8) -> &'static str {
    match count {
        1 => "\x1b[94m",
        2 => "\x1b[32m",
        3 => "\x1b[91m",
        4 => "\x1b[34m",
        5 => "\x1b[33m",
        6 => "\x1b[96m",
        7 => "\x1b[30m",
        8 => "\x1b[90m",
        _ => RESET,
    }
}

fn glyph(state: DisplayState) -> char {
    use DisplayState::*;
    match state {
        Hidden => '■',
        Flagged | WinMarkedMine => '⚑',
        RevealedEmpty => '·',
        RevealedNumber(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        ExplodedMine => '✸',
        ExposedMine => '●',
    }
}

fn color(state: DisplayState) -> &'static str {
    use DisplayState::*;
    match state {
        Hidden => "\x1b[92m",
        Flagged | WinMarkedMine | ExplodedMine => "\x1b[91m",
        RevealedEmpty => "\x1b[37m",
        RevealedNumber(count) => number_color(count),
        ExposedMine => "\x1b[97m",
    }
}

/// Background behind mines once the game is over.
fn mine_background(state: DisplayState) -> &'static str {
    match state {
        DisplayState::ExplodedMine => "\x1b[41m",
        DisplayState::WinMarkedMine => "\x1b[47m",
        _ => "\x1b[40m",
    }
}

pub(crate) fn render_cell(state: DisplayState, ansi: bool) -> String {
    if ansi && state.is_mine() {
        format!(
            "{}{}{}{RESET}",
            mine_background(state),
            color(state),
            glyph(state)
        )
    } else if ansi {
        format!("{}{}{RESET}", color(state), glyph(state))
    } else {
        glyph(state).to_string()
    }
}

/// Draws the grid with row and column labels.
pub(crate) fn render_board(engine: &game::PlayEngine, ansi: bool) -> String {
    let board = engine.display_board();
    let (_, cols) = engine.size();
    let mut out = String::from("   ");

    for col in 0..cols {
        let _ = write!(out, " {col}");
    }
    out.push('\n');

    for (row, cells) in board.rows().into_iter().enumerate() {
        let _ = write!(out, "{row:>2} ");
        for &state in cells {
            out.push(' ');
            out.push_str(&render_cell(state, ansi));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_cells_use_single_glyphs() {
        assert_eq!(render_cell(DisplayState::Hidden, false), "■");
        assert_eq!(render_cell(DisplayState::RevealedNumber(3), false), "3");
        assert_eq!(render_cell(DisplayState::ExplodedMine, false), "✸");
        assert_eq!(
            render_cell(DisplayState::WinMarkedMine, false),
            render_cell(DisplayState::Flagged, false)
        );
    }

    #[test]
    fn colored_cells_are_reset() {
        let cell = render_cell(DisplayState::RevealedNumber(1), true);
        assert!(cell.starts_with("\x1b[94m"));
        assert!(cell.ends_with(RESET));
    }

    #[test]
    fn mines_get_a_background() {
        let exploded = render_cell(DisplayState::ExplodedMine, true);
        let exposed = render_cell(DisplayState::ExposedMine, true);
        let flagged = render_cell(DisplayState::Flagged, true);

        assert!(exploded.starts_with("\x1b[41m"));
        assert!(exposed.starts_with("\x1b[40m"));
        assert!(render_cell(DisplayState::WinMarkedMine, true).starts_with("\x1b[47m"));
        assert!(!flagged.contains("\x1b[4"));
    }

    #[test]
    fn board_has_header_and_one_line_per_row() {
        let layout = game::MineLayout::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        let mut engine = game::PlayEngine::new(layout);
        engine.toggle_flag((1, 2)).unwrap();
        engine.reveal((1, 2)).unwrap();

        let text = render_board(&engine, false);

        assert_eq!(text, "    0 1 2\n 0  ■ 1 ·\n 1  ■ 1 ·\n");
    }
}
