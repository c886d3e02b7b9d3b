//! Ice Walker game logic: grid, walls, sliding pieces, configurations.
//!
//! # Grid model
//!
//! ```text
//! (0,0) --- x grows East --->
//!   |
//!   y grows South
//!   |
//!   v
//! ```
//!
//! Walls sit on cell *edges* and are stored on the East and South side of the
//! cell that owns them. Each edge belongs to exactly one cell:
//!
//! ```text
//!   the North wall of (x, y) is the South wall of (x, y-1)
//!   the West  wall of (x, y) is the East  wall of (x-1, y)
//! ```
//!
//! This halves wall storage; every wall query goes through
//! [`Board`] so the sharing is respected uniformly. The grid boundary is not
//! stored at all: stepping off the board is treated as hitting a wall.
//!
//! # The slide rule
//!
//! A move names a piece and a direction. The piece advances one cell at a
//! time in that direction until a wall, the grid edge, or another piece stops
//! it, or until it enters a thawed cell (thin ice), which it enters and then
//! freezes on. A piece already standing on a thawed cell can never move
//! again. A move that cannot advance at all leaves the board untouched.
//!
//! Reaching the final cell with the primary piece (id 0) wins; any piece on a
//! thawed cell is a losing condition. Neither flag affects movement itself;
//! the engine only produces positions, and the outcome is read off the
//! resulting configuration.

pub mod error;
pub mod format;
pub mod session;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crate::error::{BoardError, LoadError, MoveError, ParseMoveError};
pub use crate::session::Game;

/// Piece identifier. Ids are assigned contiguously from 0 as pieces are
/// added; id 0 is the primary piece whose position decides the win.
pub type PieceId = usize;

/// Cardinal direction.
///
/// Serialized as the single letters used by board descriptions and by the
/// interactive prompt.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// All directions in the fixed clockwise enumeration order.
    ///
    /// The solver expands moves in this order, so it doubles as the stable
    /// tie-break between equally short solutions.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// One-letter form (N/E/S/W).
    #[inline]
    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Parse a one-letter form, case-insensitively.
    pub fn from_letter(letter: char) -> Option<Direction> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Position on the grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    #[inline]
    pub fn new(x: u16, y: u16) -> Pos {
        Pos { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A move: which piece to slide, and which way.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    pub piece: PieceId,
    pub direction: Direction,
}

impl Move {
    #[inline]
    pub fn new(piece: PieceId, direction: Direction) -> Move {
        Move { piece, direction }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.piece, self.direction)
    }
}

/// Parses the interactive grammar: `piece, direction`, e.g. `0, N` or `2,e`.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        let (piece, direction) = s.split_once(',').ok_or(ParseMoveError::Syntax)?;
        let piece = piece.trim();
        let piece: PieceId = piece
            .parse()
            .map_err(|_| ParseMoveError::BadPiece(piece.to_string()))?;

        let direction = direction.trim();
        let mut letters = direction.chars();
        let direction = match (letters.next(), letters.next()) {
            (Some(letter), None) => Direction::from_letter(letter),
            _ => None,
        }
        .ok_or_else(|| ParseMoveError::BadDirection(direction.to_string()))?;

        Ok(Move { piece, direction })
    }
}

/// The outcome of applying a move to a live board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slide {
    /// The piece came to rest on a new cell.
    Moved { from: Pos, to: Pos },
    /// The piece could not advance at all; the board is unchanged.
    Blocked,
}

/// One grid square.
///
/// Holds the two walls this cell owns (East and South edges), the win/lose
/// flags, and the derived occupancy index. Occupancy always mirrors the
/// board's piece positions; [`Board`] is the only writer.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Cell {
    wall_east: bool,
    wall_south: bool,
    is_final: bool,
    is_thawed: bool,
    occupant: Option<PieceId>,
}

impl Cell {
    /// Wall on the East edge of this cell.
    #[inline]
    pub fn has_east_wall(&self) -> bool {
        self.wall_east
    }

    /// Wall on the South edge of this cell.
    #[inline]
    pub fn has_south_wall(&self) -> bool {
        self.wall_south
    }

    /// Whether this is the final cell.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Whether this cell is thawed (thin ice).
    #[inline]
    pub fn is_thawed(&self) -> bool {
        self.is_thawed
    }

    /// The piece currently on this cell, if any.
    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    /// Check if no piece is on this cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The ordered tuple of piece positions: the node identity for search.
///
/// Equality and hashing are purely structural: two configurations compare
/// equal iff every piece sits on the same cell, regardless of which board
/// instance produced them. The wall/flag topology is carried by the [`Board`]
/// the configuration is interpreted against and never varies during a search.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Config {
    positions: Box<[Pos]>,
}

impl Config {
    fn new(positions: Vec<Pos>) -> Config {
        Config {
            positions: positions.into_boxed_slice(),
        }
    }

    /// Piece positions in id order.
    #[inline]
    pub fn positions(&self) -> &[Pos] {
        &self.positions
    }

    /// Position of the primary piece, if the board has any pieces.
    #[inline]
    pub fn primary(&self) -> Option<Pos> {
        self.positions.first().copied()
    }
}

/// The game board: wall/flag topology plus piece positions.
///
/// The topology (walls, final cell, thawed cells) is built once by a loader
/// and then only read. Piece positions are the single source of truth; each
/// cell's occupant is a derived index kept in lockstep by every mutation.
#[derive(Clone, Debug)]
pub struct Board {
    width: u16,
    height: u16,
    /// Row-major, `y * width + x`.
    cells: Vec<Cell>,
    /// Indexed by piece id.
    pieces: Vec<Pos>,
    final_cell: Option<Pos>,
}

impl Board {
    /// Create an empty board. Zero dimensions are rejected.
    pub fn new(width: u16, height: u16) -> Result<Board, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyGrid { width, height });
        }
        Ok(Board {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            pieces: Vec::new(),
            final_cell: None,
        })
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Check if a position is on the grid.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    fn check_bounds(&self, x: u16, y: u16) -> Result<Pos, BoardError> {
        let pos = Pos::new(x, y);
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get the cell at (x, y), failing on out-of-bounds coordinates.
    pub fn cell(&self, x: u16, y: u16) -> Result<&Cell, BoardError> {
        let pos = self.check_bounds(x, y)?;
        Ok(self.cell_at(pos))
    }

    /// Cell lookup for a position already known to be on the grid.
    #[inline]
    fn cell_at(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    #[inline]
    fn cell_at_mut(&mut self, pos: Pos) -> &mut Cell {
        let index = self.index(pos);
        &mut self.cells[index]
    }

    /// Attach a wall to the East or South edge of (x, y).
    ///
    /// Walls on other edges belong to the neighbouring cell; asking for one
    /// here is rejected rather than translated. Adding the same wall twice
    /// has no further effect.
    pub fn add_wall(&mut self, x: u16, y: u16, direction: Direction) -> Result<(), BoardError> {
        let pos = self.check_bounds(x, y)?;
        match direction {
            Direction::East => self.cell_at_mut(pos).wall_east = true,
            Direction::South => self.cell_at_mut(pos).wall_south = true,
            Direction::North | Direction::West => {
                return Err(BoardError::InvalidDirection(direction))
            }
        }
        Ok(())
    }

    /// Mark (x, y) as the final cell. A board has at most one; re-marking
    /// the same cell is a no-op, marking a second cell is rejected.
    pub fn set_final(&mut self, x: u16, y: u16) -> Result<(), BoardError> {
        let pos = self.check_bounds(x, y)?;
        if let Some(existing) = self.final_cell {
            if existing != pos {
                return Err(BoardError::FinalAlreadySet {
                    x: existing.x,
                    y: existing.y,
                });
            }
            return Ok(());
        }
        if self.cell_at(pos).is_thawed {
            return Err(BoardError::FinalOnThawed { x, y });
        }
        self.final_cell = Some(pos);
        self.cell_at_mut(pos).is_final = true;
        Ok(())
    }

    /// Mark (x, y) as thawed. Idempotent.
    pub fn set_thawed(&mut self, x: u16, y: u16) -> Result<(), BoardError> {
        let pos = self.check_bounds(x, y)?;
        if self.cell_at(pos).is_final {
            return Err(BoardError::FinalOnThawed { x, y });
        }
        self.cell_at_mut(pos).is_thawed = true;
        Ok(())
    }

    /// The final cell, once set.
    #[inline]
    pub fn final_cell(&self) -> Option<Pos> {
        self.final_cell
    }

    /// Place a new piece, assigning the next id (the first piece added is
    /// the primary piece, id 0). Rejects off-grid and occupied cells.
    pub fn add_piece(&mut self, x: u16, y: u16) -> Result<PieceId, BoardError> {
        let pos = self.check_bounds(x, y)?;
        if let Some(piece) = self.cell_at(pos).occupant {
            return Err(BoardError::Occupied { x, y, piece });
        }
        let id = self.pieces.len();
        self.pieces.push(pos);
        self.cell_at_mut(pos).occupant = Some(id);
        Ok(id)
    }

    /// Piece positions in id order.
    #[inline]
    pub fn pieces(&self) -> &[Pos] {
        &self.pieces
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Move a piece to a new cell, keeping the occupancy index in lockstep.
    fn relocate(&mut self, piece: PieceId, to: Pos) {
        let from = self.pieces[piece];
        self.cell_at_mut(from).occupant = None;
        self.cell_at_mut(to).occupant = Some(piece);
        self.pieces[piece] = to;
    }

    // ========== Slide engine ==========

    /// Single-step neighbour, or None when the step leaves the grid.
    fn neighbor(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        let next = match direction {
            Direction::North => Pos::new(pos.x, pos.y.checked_sub(1)?),
            Direction::West => Pos::new(pos.x.checked_sub(1)?, pos.y),
            Direction::East => Pos::new(pos.x + 1, pos.y),
            Direction::South => Pos::new(pos.x, pos.y + 1),
        };
        self.contains(next).then_some(next)
    }

    /// Whether a wall separates `from` from its neighbour in `direction`.
    ///
    /// East/South walls live on `from` itself; North/West walls live on the
    /// neighbour, as its South/East wall. `from` and the neighbour must both
    /// be on the grid.
    fn wall_blocks(&self, from: Pos, direction: Direction) -> bool {
        match direction {
            Direction::East => self.cell_at(from).wall_east,
            Direction::South => self.cell_at(from).wall_south,
            Direction::West => self.cell_at(Pos::new(from.x - 1, from.y)).wall_east,
            Direction::North => self.cell_at(Pos::new(from.x, from.y - 1)).wall_south,
        }
    }

    /// Where a slide comes to rest, given the piece positions of some
    /// configuration. Returns the starting cell when the piece cannot move.
    ///
    /// This is the one transition function; the live-board [`Board::apply`]
    /// and the pure [`Board::successor`] both call it, so interactive play
    /// and search can never disagree on semantics.
    fn destination(&self, positions: &[Pos], piece: PieceId, direction: Direction) -> Pos {
        let mut at = positions[piece];

        // A piece on thin ice is frozen for good.
        if self.cell_at(at).is_thawed {
            return at;
        }

        while let Some(next) = self.neighbor(at, direction) {
            if self.wall_blocks(at, direction) {
                break;
            }
            if positions
                .iter()
                .enumerate()
                .any(|(id, pos)| id != piece && *pos == next)
            {
                break;
            }
            at = next;
            // Thin ice is entered, then ends the slide.
            if self.cell_at(at).is_thawed {
                break;
            }
        }
        at
    }

    /// Apply a move to the live board.
    ///
    /// A move that cannot advance is the defined [`Slide::Blocked`] result,
    /// not an error; only a nonexistent piece id fails.
    pub fn apply(&mut self, mv: Move) -> Result<Slide, MoveError> {
        if mv.piece >= self.pieces.len() {
            return Err(MoveError::UnknownPiece(mv.piece));
        }
        let from = self.pieces[mv.piece];
        let to = self.destination(&self.pieces, mv.piece, mv.direction);
        if to == from {
            return Ok(Slide::Blocked);
        }
        self.relocate(mv.piece, to);
        Ok(Slide::Moved { from, to })
    }

    // ========== Configurations ==========

    /// Snapshot the current piece positions.
    pub fn config(&self) -> Config {
        Config::new(self.pieces.clone())
    }

    /// The configuration reached from `config` by `mv`, or None when the
    /// move is a no-op.
    ///
    /// Pure: `config` is read only, and the returned value shares no mutable
    /// state with either input. The caller guarantees `mv.piece` exists.
    pub fn successor(&self, config: &Config, mv: Move) -> Option<Config> {
        let from = config.positions[mv.piece];
        let to = self.destination(&config.positions, mv.piece, mv.direction);
        if to == from {
            return None;
        }
        let mut positions = config.positions.to_vec();
        positions[mv.piece] = to;
        Some(Config::new(positions))
    }

    /// Winning iff the primary piece stands on the final cell.
    pub fn is_winning(&self, config: &Config) -> bool {
        config
            .primary()
            .is_some_and(|pos| self.cell_at(pos).is_final)
    }

    /// Losing iff any piece stands on a thawed cell.
    pub fn is_losing(&self, config: &Config) -> bool {
        config
            .positions
            .iter()
            .any(|pos| self.cell_at(*pos).is_thawed)
    }

    /// Pieces currently frozen on thawed cells, in id order.
    pub fn frozen_pieces(&self) -> Vec<PieceId> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, pos)| self.cell_at(**pos).is_thawed)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_board(width: u16, height: u16) -> Board {
        Board::new(width, height).unwrap()
    }

    #[test]
    fn test_direction_opposite() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_direction_letters() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_letter(direction.letter()), Some(direction));
            assert_eq!(
                Direction::from_letter(direction.letter().to_ascii_lowercase()),
                Some(direction)
            );
        }
        assert_eq!(Direction::from_letter('X'), None);
    }

    #[test]
    fn test_board_rejects_empty_grid() {
        assert!(matches!(
            Board::new(0, 3),
            Err(BoardError::EmptyGrid { .. })
        ));
        assert!(matches!(
            Board::new(3, 0),
            Err(BoardError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let board = open_board(2, 2);
        assert!(board.cell(1, 1).is_ok());
        assert!(matches!(
            board.cell(2, 0),
            Err(BoardError::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(matches!(
            board.cell(0, 5),
            Err(BoardError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_add_wall_east_south_only() {
        let mut board = open_board(3, 3);
        board.add_wall(1, 1, Direction::East).unwrap();
        board.add_wall(1, 1, Direction::South).unwrap();
        assert_eq!(
            board.add_wall(1, 1, Direction::North),
            Err(BoardError::InvalidDirection(Direction::North))
        );
        assert_eq!(
            board.add_wall(1, 1, Direction::West),
            Err(BoardError::InvalidDirection(Direction::West))
        );
    }

    #[test]
    fn test_add_wall_idempotent() {
        let mut board = open_board(3, 3);
        board.add_wall(0, 0, Direction::East).unwrap();
        let snapshot = *board.cell(0, 0).unwrap();
        board.add_wall(0, 0, Direction::East).unwrap();
        assert_eq!(*board.cell(0, 0).unwrap(), snapshot);
        assert!(board.cell(0, 0).unwrap().has_east_wall());
        assert!(!board.cell(0, 0).unwrap().has_south_wall());
    }

    #[test]
    fn test_final_cell_is_unique() {
        let mut board = open_board(3, 3);
        board.set_final(2, 2).unwrap();
        // Re-marking the same cell is fine.
        board.set_final(2, 2).unwrap();
        assert_eq!(
            board.set_final(0, 0),
            Err(BoardError::FinalAlreadySet { x: 2, y: 2 })
        );
        assert_eq!(board.final_cell(), Some(Pos::new(2, 2)));
    }

    #[test]
    fn test_final_and_thawed_cannot_overlap() {
        let mut board = open_board(3, 3);
        board.set_final(1, 1).unwrap();
        assert_eq!(
            board.set_thawed(1, 1),
            Err(BoardError::FinalOnThawed { x: 1, y: 1 })
        );

        let mut board = open_board(3, 3);
        board.set_thawed(1, 1).unwrap();
        assert_eq!(
            board.set_final(1, 1),
            Err(BoardError::FinalOnThawed { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_add_piece_assigns_contiguous_ids() {
        let mut board = open_board(3, 3);
        assert_eq!(board.add_piece(0, 0).unwrap(), 0);
        assert_eq!(board.add_piece(2, 2).unwrap(), 1);
        assert_eq!(board.add_piece(1, 0).unwrap(), 2);
        assert_eq!(board.piece_count(), 3);
        assert_eq!(board.cell(2, 2).unwrap().occupant(), Some(1));
    }

    #[test]
    fn test_add_piece_rejects_occupied_and_off_grid() {
        let mut board = open_board(2, 2);
        board.add_piece(0, 0).unwrap();
        assert_eq!(
            board.add_piece(0, 0),
            Err(BoardError::Occupied { x: 0, y: 0, piece: 0 })
        );
        assert!(matches!(
            board.add_piece(5, 0),
            Err(BoardError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_slide_runs_to_the_edge() {
        let mut board = open_board(2, 2);
        board.add_piece(0, 0).unwrap();
        let slide = board.apply(Move::new(0, Direction::East)).unwrap();
        assert_eq!(
            slide,
            Slide::Moved {
                from: Pos::new(0, 0),
                to: Pos::new(1, 0),
            }
        );
        assert_eq!(board.pieces()[0], Pos::new(1, 0));
        assert!(board.cell(0, 0).unwrap().is_empty());
        assert_eq!(board.cell(1, 0).unwrap().occupant(), Some(0));
    }

    #[test]
    fn test_slide_blocked_on_first_step_changes_nothing() {
        let mut board = open_board(3, 1);
        board.add_wall(0, 0, Direction::East).unwrap();
        board.add_piece(0, 0).unwrap();
        let before = board.config();

        assert_eq!(
            board.apply(Move::new(0, Direction::East)).unwrap(),
            Slide::Blocked
        );
        assert_eq!(board.config(), before);
        assert_eq!(board.cell(0, 0).unwrap().occupant(), Some(0));

        // Edges behave the same way: not even a partial move.
        assert_eq!(
            board.apply(Move::new(0, Direction::West)).unwrap(),
            Slide::Blocked
        );
        assert_eq!(board.config(), before);
    }

    #[test]
    fn test_wall_is_shared_between_neighbours() {
        // One E wall between (0,0) and (1,0) blocks eastbound from the left
        // and westbound from the right.
        let mut board = open_board(2, 1);
        board.add_wall(0, 0, Direction::East).unwrap();
        board.add_piece(0, 0).unwrap();
        board.add_piece(1, 0).unwrap();

        assert_eq!(
            board.apply(Move::new(0, Direction::East)).unwrap(),
            Slide::Blocked
        );
        assert_eq!(
            board.apply(Move::new(1, Direction::West)).unwrap(),
            Slide::Blocked
        );
    }

    #[test]
    fn test_south_wall_blocks_northbound_from_below() {
        let mut board = open_board(1, 2);
        board.add_wall(0, 0, Direction::South).unwrap();
        board.add_piece(0, 1).unwrap();
        assert_eq!(
            board.apply(Move::new(0, Direction::North)).unwrap(),
            Slide::Blocked
        );
    }

    #[test]
    fn test_slide_stops_before_another_piece() {
        let mut board = open_board(5, 1);
        board.add_piece(0, 0).unwrap();
        board.add_piece(3, 0).unwrap();
        let slide = board.apply(Move::new(0, Direction::East)).unwrap();
        assert_eq!(
            slide,
            Slide::Moved {
                from: Pos::new(0, 0),
                to: Pos::new(2, 0),
            }
        );
    }

    #[test]
    fn test_final_flag_does_not_stop_a_slide() {
        // Final cell in the middle of an open row: a non-stopping flag.
        let mut board = open_board(4, 1);
        board.set_final(1, 0).unwrap();
        board.add_piece(0, 0).unwrap();
        let slide = board.apply(Move::new(0, Direction::East)).unwrap();
        assert_eq!(
            slide,
            Slide::Moved {
                from: Pos::new(0, 0),
                to: Pos::new(3, 0),
            }
        );
    }

    #[test]
    fn test_slide_stops_on_the_final_cell_at_an_obstruction() {
        // Adjacent to the final cell, with the grid edge right behind it.
        let mut board = open_board(2, 1);
        board.set_final(1, 0).unwrap();
        board.add_piece(0, 0).unwrap();
        board.apply(Move::new(0, Direction::East)).unwrap();
        assert_eq!(board.pieces()[0], Pos::new(1, 0));
        assert!(board.is_winning(&board.config()));
    }

    #[test]
    fn test_thawed_cell_is_entered_and_ends_the_slide() {
        let mut board = open_board(5, 1);
        board.set_thawed(2, 0).unwrap();
        board.add_piece(0, 0).unwrap();
        let slide = board.apply(Move::new(0, Direction::East)).unwrap();
        assert_eq!(
            slide,
            Slide::Moved {
                from: Pos::new(0, 0),
                to: Pos::new(2, 0),
            }
        );
        assert!(board.is_losing(&board.config()));
    }

    #[test]
    fn test_frozen_piece_never_moves_again() {
        let mut board = open_board(5, 5);
        board.set_thawed(2, 2).unwrap();
        board.add_piece(2, 0).unwrap();
        board.apply(Move::new(0, Direction::South)).unwrap();
        assert_eq!(board.pieces()[0], Pos::new(2, 2));

        for direction in Direction::ALL {
            assert_eq!(
                board.apply(Move::new(0, direction)).unwrap(),
                Slide::Blocked
            );
            assert_eq!(board.pieces()[0], Pos::new(2, 2));
        }
    }

    #[test]
    fn test_sliding_again_at_an_obstruction_is_a_noop() {
        let mut board = open_board(4, 4);
        board.add_piece(1, 1).unwrap();
        board.apply(Move::new(0, Direction::East)).unwrap();
        let rest = board.config();
        assert_eq!(
            board.apply(Move::new(0, Direction::East)).unwrap(),
            Slide::Blocked
        );
        assert_eq!(board.config(), rest);
    }

    #[test]
    fn test_slides_are_not_unit_inverses() {
        // North then South from the middle overshoots to the far edge.
        let mut board = open_board(3, 3);
        board.add_piece(1, 1).unwrap();
        board.apply(Move::new(0, Direction::North)).unwrap();
        assert_eq!(board.pieces()[0], Pos::new(1, 0));
        board.apply(Move::new(0, Direction::South)).unwrap();
        assert_eq!(board.pieces()[0], Pos::new(1, 2));
    }

    #[test]
    fn test_apply_rejects_unknown_piece() {
        let mut board = open_board(2, 2);
        board.add_piece(0, 0).unwrap();
        assert_eq!(
            board.apply(Move::new(3, Direction::East)),
            Err(MoveError::UnknownPiece(3))
        );
    }

    #[test]
    fn test_config_value_equality_across_boards() {
        use std::collections::HashMap;

        let build = |pieces: &[(u16, u16)]| {
            let mut board = open_board(4, 4);
            board.add_wall(1, 1, Direction::East).unwrap();
            for (x, y) in pieces {
                board.add_piece(*x, *y).unwrap();
            }
            board
        };

        let a = build(&[(0, 0), (3, 3)]);
        let b = build(&[(0, 0), (3, 3)]);
        let c = build(&[(0, 0), (3, 2)]);

        assert_eq!(a.config(), b.config());
        assert_ne!(a.config(), c.config());

        // Independently built configurations must collide in a hash map.
        let mut visited = HashMap::new();
        visited.insert(a.config(), 1);
        assert_eq!(visited.get(&b.config()), Some(&1));
        assert_eq!(visited.get(&c.config()), None);
    }

    #[test]
    fn test_successor_leaves_the_source_untouched() {
        let mut board = open_board(4, 1);
        board.add_piece(0, 0).unwrap();
        let start = board.config();

        let next = board
            .successor(&start, Move::new(0, Direction::East))
            .unwrap();
        assert_eq!(start.positions()[0], Pos::new(0, 0));
        assert_eq!(next.positions()[0], Pos::new(3, 0));
        // The live board did not move either.
        assert_eq!(board.pieces()[0], Pos::new(0, 0));
    }

    #[test]
    fn test_successor_reports_noops_as_none() {
        let mut board = open_board(2, 1);
        board.add_piece(0, 0).unwrap();
        let start = board.config();
        assert!(board.successor(&start, Move::new(0, Direction::West)).is_none());
        assert!(board.successor(&start, Move::new(0, Direction::North)).is_none());
        assert!(board.successor(&start, Move::new(0, Direction::East)).is_some());
    }

    #[test]
    fn test_move_parse_and_display() {
        let mv: Move = "0, E".parse().unwrap();
        assert_eq!(mv, Move::new(0, Direction::East));
        assert_eq!(mv.to_string(), "(0, E)");

        let mv: Move = " 12 ,n ".parse().unwrap();
        assert_eq!(mv, Move::new(12, Direction::North));

        assert_eq!("0 E".parse::<Move>(), Err(ParseMoveError::Syntax));
        assert_eq!(
            "x, E".parse::<Move>(),
            Err(ParseMoveError::BadPiece("x".to_string()))
        );
        assert_eq!(
            "0, Q".parse::<Move>(),
            Err(ParseMoveError::BadDirection("Q".to_string()))
        );
        assert_eq!(
            "0, EE".parse::<Move>(),
            Err(ParseMoveError::BadDirection("EE".to_string()))
        );
    }

    #[test]
    fn test_occupancy_tracks_positions_under_random_play() {
        use rand::prelude::*;

        let mut rng = rand::rngs::StdRng::seed_from_u64(0xB0A2D);

        for _ in 0..50 {
            let mut board = open_board(6, 5);
            board.add_wall(2, 1, Direction::East).unwrap();
            board.add_wall(3, 3, Direction::South).unwrap();
            board.add_wall(4, 0, Direction::South).unwrap();
            board.set_thawed(1, 4).unwrap();
            board.set_final(5, 4).unwrap();
            board.add_piece(0, 0).unwrap();
            board.add_piece(3, 2).unwrap();
            board.add_piece(5, 1).unwrap();

            for _ in 0..40 {
                let mv = Move::new(
                    rng.random_range(0..board.piece_count()),
                    Direction::ALL[rng.random_range(0..4)],
                );
                board.apply(mv).unwrap();

                // Derived occupancy always agrees with the position vector.
                let mut seen = 0;
                for y in 0..board.height() {
                    for x in 0..board.width() {
                        if let Some(piece) = board.cell(x, y).unwrap().occupant() {
                            assert_eq!(board.pieces()[piece], Pos::new(x, y));
                            seen += 1;
                        }
                    }
                }
                assert_eq!(seen, board.piece_count());
            }
        }
    }
}
