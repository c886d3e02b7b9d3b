//! JSON board descriptions.
//!
//! A description carries the grid dimensions, wall placements, the final
//! cell, thawed cells, and the initial piece positions:
//!
//! ```json
//! {
//!     "dimensions": [4, 3],
//!     "final_cell": [3, 2],
//!     "walls": [[1, 0, "E"], [2, 1, "S"]],
//!     "players": { "main": [0, 0], "others": [[2, 2]] },
//!     "thawed": [[1, 2]]
//! }
//! ```
//!
//! `players.main` becomes piece 0 (the primary piece); `others` get ids
//! 1..N in listed order. `walls` and `thawed` may be omitted.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::{Board, Direction};

#[derive(Deserialize)]
struct BoardFile {
    dimensions: (u16, u16),
    final_cell: (u16, u16),
    #[serde(default)]
    walls: Vec<(u16, u16, Direction)>,
    players: PlayersFile,
    #[serde(default)]
    thawed: Vec<(u16, u16)>,
}

#[derive(Deserialize)]
struct PlayersFile {
    main: (u16, u16),
    #[serde(default)]
    others: Vec<(u16, u16)>,
}

/// Parse a board description from JSON text.
pub fn from_str(text: &str) -> Result<Board, LoadError> {
    let file: BoardFile = serde_json::from_str(text)?;
    Ok(build(file)?)
}

/// Load a board description file.
pub fn load(path: impl AsRef<Path>) -> Result<Board, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&text)
}

fn build(file: BoardFile) -> Result<Board, crate::BoardError> {
    let (width, height) = file.dimensions;
    let mut board = Board::new(width, height)?;

    let (x, y) = file.final_cell;
    board.set_final(x, y)?;

    for (x, y, direction) in file.walls {
        board.add_wall(x, y, direction)?;
    }

    let (x, y) = file.players.main;
    board.add_piece(x, y)?;
    for (x, y) in file.players.others {
        board.add_piece(x, y)?;
    }

    for (x, y) in file.thawed {
        board.set_thawed(x, y)?;
    }

    Ok(board)
}
