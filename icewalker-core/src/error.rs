//! Error types for board construction, loading, and play.

use std::path::PathBuf;

use crate::{Direction, PieceId};

/// Errors raised while building or querying a board.
///
/// Coordinates are always validated, never clamped.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("coordinates ({x}, {y}) are outside the {width}x{height} grid")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    #[error("walls sit on a cell's East or South edge only, got {0}")]
    InvalidDirection(Direction),

    #[error("cell ({x}, {y}) is already occupied by piece {piece}")]
    Occupied { x: u16, y: u16, piece: PieceId },

    #[error("the final cell is already set at ({x}, {y})")]
    FinalAlreadySet { x: u16, y: u16 },

    #[error("cell ({x}, {y}) cannot be both final and thawed")]
    FinalOnThawed { x: u16, y: u16 },
}

/// Errors raised while loading a board description.
///
/// Loading rejects malformed descriptions outright; nothing is repaired.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read board file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("board description is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid board description: {0}")]
    Invalid(#[from] BoardError),
}

/// Errors raised by applying a move to a live board.
///
/// A blocked move is not among them: a piece that cannot advance is the
/// defined [`Slide::Blocked`](crate::Slide::Blocked) outcome, not a failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no piece with id {0} on the board")]
    UnknownPiece(PieceId),
}

/// Errors raised while parsing interactive input into a [`Move`](crate::Move).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("expected 'piece, direction' (e.g. '0, N')")]
    Syntax,

    #[error("'{0}' is not a piece number")]
    BadPiece(String),

    #[error("'{0}' is not a direction (use N, S, E or W)")]
    BadDirection(String),
}
