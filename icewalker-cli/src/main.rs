//! Ice Walker interactive console.
//!
//! Loads a board description and plays it turn by turn on stdin. Bad input
//! is reported and re-prompted; the session itself never crashes on it.

mod render;

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use icewalker_core::{format, Game, Move, Slide};

fn main() -> ExitCode {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "icewalker-cli".into());
    let (Some(board_path), None) = (args.next(), args.next()) else {
        eprintln!("usage: {program} <board.json>");
        return ExitCode::from(2);
    };

    let board = match format::load(&board_path) {
        Ok(board) => board,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::from(2);
        }
    };

    let mut game = Game::new(board);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", render::draw(game.board()));

        if game.is_won() {
            println!("You win! ({} move(s))", game.moves_played());
            return ExitCode::SUCCESS;
        }
        if game.is_lost() {
            println!("Your piece froze on thin ice. The exit is out of reach.");
            return ExitCode::from(1);
        }

        print!("Your play 'piece, direction' or 'q' (quit): ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            // EOF or a broken pipe ends the session quietly.
            _ => {
                println!();
                return ExitCode::SUCCESS;
            }
        };
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") {
            println!("You just gave up the game.");
            return ExitCode::SUCCESS;
        }

        let mv: Move = match line.parse() {
            Ok(mv) => mv,
            Err(error) => {
                println!("Wrong input: {error}. Please try again.");
                continue;
            }
        };

        match game.apply(mv.piece, mv.direction) {
            Err(error) => println!("Error: {error}. Please try again."),
            Ok(Slide::Blocked) => println!("Piece {} cannot move {}.", mv.piece, mv.direction),
            Ok(Slide::Moved { to, .. }) => {
                if game.board().frozen_pieces().contains(&mv.piece) {
                    println!("Piece {} slid onto thin ice and froze at {}.", mv.piece, to);
                }
            }
        }
    }
}
