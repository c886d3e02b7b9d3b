//! Text rendering of a board.
//!
//! Presentation only: everything here is read off the board's public wall,
//! flag, and occupancy queries. Each cell is two characters wide (its
//! content and its East edge), with separator rows carrying South walls:
//!
//! ```text
//! +-+-+-+
//! |0| ~ |
//! + +-+ +
//! |   ☐ |
//! +-+-+-+
//! ```

use icewalker_core::Board;

/// Content marker of a cell: the occupying piece's id digit, the final
/// marker, a thawed marker, or blank ice.
fn content(board: &Board, x: u16, y: u16) -> char {
    let cell = board.cell(x, y).expect("cell on the grid");
    if let Some(piece) = cell.occupant() {
        // Ids past 9 wrap; boards that large are not really playable in a
        // terminal anyway.
        char::from_digit((piece % 10) as u32, 10).unwrap_or('?')
    } else if cell.is_final() {
        '☐'
    } else if cell.is_thawed() {
        '~'
    } else {
        ' '
    }
}

fn east_wall(board: &Board, x: u16, y: u16) -> bool {
    x + 1 == board.width() || board.cell(x, y).map(|c| c.has_east_wall()).unwrap_or(false)
}

fn south_wall(board: &Board, x: u16, y: u16) -> bool {
    board.cell(x, y).map(|c| c.has_south_wall()).unwrap_or(false)
}

/// Draw the whole board.
pub fn draw(board: &Board) -> String {
    let width = board.width();
    let height = board.height();
    let border: String = "+-".repeat(width as usize) + "+";

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');

    for y in 0..height {
        out.push('|');
        for x in 0..width {
            out.push(content(board, x, y));
            out.push(if east_wall(board, x, y) { '|' } else { ' ' });
        }
        out.push('\n');

        if y + 1 == height {
            break;
        }

        // Separator row: South walls, with a joint wherever at least two
        // of the four wall segments around the corner meet.
        out.push('+');
        for x in 0..width {
            out.push(if south_wall(board, x, y) { '-' } else { ' ' });
            if x + 1 == width {
                break;
            }
            let segments = [
                board.cell(x, y).map(|c| c.has_east_wall()).unwrap_or(false),
                south_wall(board, x, y),
                board
                    .cell(x, y + 1)
                    .map(|c| c.has_east_wall())
                    .unwrap_or(false),
                south_wall(board, x + 1, y),
            ];
            let meeting = segments.iter().filter(|on| **on).count();
            out.push(if meeting >= 2 { '+' } else { ' ' });
        }
        out.push('+');
        out.push('\n');
    }

    out.push_str(&border);
    out
}
