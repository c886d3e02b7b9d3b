//! Breadth-first search for a shortest winning move sequence.
//!
//! Nodes are whole piece configurations; edges are the slide transitions.
//! The frontier is a FIFO queue and the visited map doubles as the
//! predecessor chain, so the first winning configuration dequeued is reached
//! by a minimum number of moves and its path can be walked back to the
//! start.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

use icewalker_core::{Board, Config, Direction, Move};

use crate::stats::SearchStats;

/// Terminal result of a completed search.
#[derive(Debug)]
pub enum Outcome {
    /// A shortest move sequence from the start to a winning configuration.
    Solved(Vec<Move>),
    /// The reachable component contains no winning configuration.
    Unsolvable,
}

/// Reasons a search stopped before reaching a terminal result.
///
/// Distinct from [`Outcome`]: an aborted search proves nothing about
/// solvability.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Abort {
    #[error("node budget of {0} configurations exceeded")]
    NodeLimit(usize),

    #[error("search interrupted")]
    Interrupted,
}

/// BFS solver over the configurations of one board.
pub struct Solver<'a> {
    board: &'a Board,
    /// Configuration -> the (predecessor, move) that first discovered it;
    /// None for the start. Keys are position tuples compared by value, so
    /// visiting is immune to which board object produced a configuration.
    visited: HashMap<Config, Option<(Config, Move)>>,
    /// Upper bound on the visited set, None for unbounded.
    max_nodes: Option<usize>,
    pub stats: SearchStats,
}

impl<'a> Solver<'a> {
    pub fn new(board: &'a Board, max_nodes: Option<usize>) -> Self {
        Self {
            board,
            visited: HashMap::new(),
            max_nodes,
            stats: SearchStats::new(),
        }
    }

    /// Number of distinct configurations discovered so far.
    #[inline]
    pub fn explored(&self) -> usize {
        self.visited.len()
    }

    /// Run the search to one of the terminal outcomes, or abort on the node
    /// budget or an external interrupt (`running` flipping to false).
    pub fn solve(
        &mut self,
        running: &AtomicBool,
        log_interval_secs: u64,
    ) -> Result<Outcome, Abort> {
        let start = self.board.config();
        let mut frontier = VecDeque::new();
        self.visited.insert(start.clone(), None);
        frontier.push_back(start);

        while let Some(config) = frontier.pop_front() {
            if !running.load(Ordering::SeqCst) {
                return Err(Abort::Interrupted);
            }

            // BFS order: the first winning configuration dequeued is one a
            // shortest path reaches.
            if self.board.is_winning(&config) {
                let path = self.reconstruct(&config);
                self.stats.solution_length = Some(path.len());
                return Ok(Outcome::Solved(path));
            }
            self.stats.expanded += 1;
            if self.board.is_losing(&config) {
                // Frozen pieces stop moving; the rest keep exploring.
                self.stats.losing_seen += 1;
            }

            // Pieces in id order, directions clockwise: the stable
            // tie-break that makes reported solutions reproducible.
            for piece in 0..self.board.piece_count() {
                for direction in Direction::ALL {
                    let mv = Move::new(piece, direction);
                    let Some(next) = self.board.successor(&config, mv) else {
                        self.stats.noop_moves += 1;
                        continue;
                    };
                    if self.visited.contains_key(&next) {
                        self.stats.duplicate_hits += 1;
                        continue;
                    }
                    if let Some(limit) = self.max_nodes {
                        if self.visited.len() >= limit {
                            return Err(Abort::NodeLimit(limit));
                        }
                    }
                    self.visited.insert(next.clone(), Some((config.clone(), mv)));
                    frontier.push_back(next);
                }
            }

            self.stats.max_frontier = self.stats.max_frontier.max(frontier.len());
            if self.stats.should_log(log_interval_secs) {
                self.stats.log_progress(self.visited.len(), frontier.len());
            }
        }

        Ok(Outcome::Unsolvable)
    }

    /// Walk the predecessor chain from a winning configuration back to the
    /// start, then reverse it into playing order.
    fn reconstruct(&self, end: &Config) -> Vec<Move> {
        let mut path = Vec::new();
        let mut current = end;
        while let Some(Some((predecessor, mv))) = self.visited.get(current) {
            path.push(*mv);
            current = predecessor;
        }
        path.reverse();
        path
    }
}
