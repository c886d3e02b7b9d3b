//! Ice Walker solver.
//!
//! Reads a JSON board description and prints a shortest winning move
//! sequence, or reports that none exists.
//!
//! Exit status: 0 = solved, 1 = unsolvable, 2 = invalid input,
//! 3 = aborted (node budget exceeded or interrupted).

mod solver;
mod stats;

use std::env;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use icewalker_core::format;

use crate::solver::{Outcome, Solver};

const EXIT_SOLVED: u8 = 0;
const EXIT_UNSOLVABLE: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_ABORTED: u8 = 3;

struct Args {
    board_path: String,
    max_nodes: Option<usize>,
    log_interval_secs: u64,
}

fn usage(program: &str) -> String {
    format!("usage: {program} <board.json> [--max-nodes N] [--log-interval SECS]")
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "icewalker-solver".into());

    let mut board_path = None;
    let mut max_nodes = None;
    let mut log_interval_secs = 5;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-nodes" => {
                let value = args.next().ok_or_else(|| usage(&program))?;
                max_nodes = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--max-nodes wants a number, got '{value}'"))?,
                );
            }
            "--log-interval" => {
                let value = args.next().ok_or_else(|| usage(&program))?;
                log_interval_secs = value
                    .parse()
                    .map_err(|_| format!("--log-interval wants seconds, got '{value}'"))?;
            }
            _ if board_path.is_none() && !arg.starts_with("--") => {
                board_path = Some(arg);
            }
            _ => return Err(usage(&program)),
        }
    }

    Ok(Args {
        board_path: board_path.ok_or_else(|| usage(&program))?,
        max_nodes,
        log_interval_secs,
    })
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };

    let board = match format::load(&args.board_path) {
        Ok(board) => board,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };

    // Flip on SIGINT so a long search stops at the next expansion instead
    // of dying mid-report.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping search...");
        r.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Warning: could not install Ctrl-C handler: {error}");
    }

    println!(
        "Searching {}x{} board, {} piece(s)...",
        board.width(),
        board.height(),
        board.piece_count()
    );

    let start = Instant::now();
    let mut solver = Solver::new(&board, args.max_nodes);
    let result = solver.solve(&running, args.log_interval_secs);
    let elapsed = start.elapsed();

    match result {
        Ok(Outcome::Solved(path)) => {
            println!("Solved in {} move(s):", path.len());
            for mv in &path {
                println!("{mv}");
            }
            println!();
            solver.stats.print_summary(solver.explored());
            println!("Time: {:.3}s", elapsed.as_secs_f64());
            ExitCode::from(EXIT_SOLVED)
        }
        Ok(Outcome::Unsolvable) => {
            println!(
                "Unsolvable: no winning configuration among the {} reachable one(s).",
                solver.explored()
            );
            println!();
            solver.stats.print_summary(solver.explored());
            println!("Time: {:.3}s", elapsed.as_secs_f64());
            ExitCode::from(EXIT_UNSOLVABLE)
        }
        Err(abort) => {
            eprintln!("Search aborted: {abort}");
            solver.stats.print_summary(solver.explored());
            ExitCode::from(EXIT_ABORTED)
        }
    }
}
