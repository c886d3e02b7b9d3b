//! Interactive game session over a live board.

use crate::error::MoveError;
use crate::{Board, Direction, PieceId, Slide};

/// A single game in progress.
///
/// Owns one live [`Board`] and mutates it move by move. The transitions go
/// through the same slide engine the solver uses, so interactive play and
/// solvability analysis cannot drift apart.
pub struct Game {
    board: Board,
    moves_played: u32,
}

impl Game {
    pub fn new(board: Board) -> Game {
        Game {
            board,
            moves_played: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves that actually advanced a piece; blocked moves do not count.
    #[inline]
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Slide a piece. Blocked moves are a defined outcome, not an error;
    /// only an unknown piece id fails.
    pub fn apply(&mut self, piece: PieceId, direction: Direction) -> Result<Slide, MoveError> {
        let slide = self.board.apply(crate::Move { piece, direction })?;
        if let Slide::Moved { .. } = slide {
            self.moves_played += 1;
        }
        Ok(slide)
    }

    /// The primary piece stands on the final cell.
    pub fn is_won(&self) -> bool {
        self.board.is_winning(&self.board.config())
    }

    /// The primary piece is frozen on a thawed cell, so the final cell is
    /// out of reach for good.
    pub fn is_lost(&self) -> bool {
        self.board.frozen_pieces().contains(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pos;

    fn small_game() -> Game {
        let mut board = Board::new(3, 3).unwrap();
        board.set_final(2, 2).unwrap();
        board.add_piece(0, 0).unwrap();
        Game::new(board)
    }

    #[test]
    fn test_session_play_to_the_win() {
        let mut game = small_game();
        assert!(!game.is_won());

        assert_eq!(
            game.apply(0, Direction::East).unwrap(),
            Slide::Moved {
                from: Pos::new(0, 0),
                to: Pos::new(2, 0),
            }
        );
        assert!(!game.is_won());

        game.apply(0, Direction::South).unwrap();
        assert!(game.is_won());
        assert_eq!(game.moves_played(), 2);
    }

    #[test]
    fn test_blocked_moves_do_not_count_or_corrupt() {
        let mut game = small_game();
        assert_eq!(game.apply(0, Direction::West).unwrap(), Slide::Blocked);
        assert_eq!(game.apply(0, Direction::North).unwrap(), Slide::Blocked);
        assert_eq!(game.moves_played(), 0);
        assert_eq!(game.board().pieces()[0], Pos::new(0, 0));
    }

    #[test]
    fn test_unknown_piece_is_an_error_and_leaves_state_alone() {
        let mut game = small_game();
        assert_eq!(game.apply(7, Direction::East), Err(MoveError::UnknownPiece(7)));
        assert_eq!(game.board().pieces()[0], Pos::new(0, 0));
        assert_eq!(game.moves_played(), 0);
    }

    #[test]
    fn test_lost_when_the_primary_piece_freezes() {
        let mut board = Board::new(3, 1).unwrap();
        board.set_final(2, 0).unwrap();
        board.set_thawed(1, 0).unwrap();
        board.add_piece(0, 0).unwrap();
        let mut game = Game::new(board);

        game.apply(0, Direction::East).unwrap();
        assert!(game.is_lost());
        assert!(!game.is_won());
        // Frozen for good.
        assert_eq!(game.apply(0, Direction::East).unwrap(), Slide::Blocked);
    }
}
