//! Search statistics and progress reporting.

use std::time::Instant;

/// Get current process memory usage in bytes (RSS - Resident Set Size).
/// Returns None if unable to determine.
#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    use std::fs;

    let status = fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            let kb: u64 = rest.split_whitespace().next()?.parse().ok()?;
            return Some(kb * 1024);
        }
    }
    None
}

#[cfg(not(target_os = "linux"))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Statistics collected during a search.
#[derive(Debug)]
pub struct SearchStats {
    /// Configurations dequeued and expanded.
    pub expanded: u64,

    /// Successors discarded because they were already visited.
    pub duplicate_hits: u64,

    /// (piece, direction) transitions that could not advance.
    pub noop_moves: u64,

    /// Expanded configurations with at least one frozen piece.
    pub losing_seen: u64,

    /// High-water mark of the frontier queue.
    pub max_frontier: usize,

    /// Length of the found solution, if any.
    pub solution_length: Option<usize>,

    /// For rate calculation.
    start_time: Instant,
    last_log_time: Instant,
    last_log_expanded: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            expanded: 0,
            duplicate_hits: 0,
            noop_moves: 0,
            losing_seen: 0,
            max_frontier: 0,
            solution_length: None,
            start_time: now,
            last_log_time: now,
            last_log_expanded: 0,
        }
    }

    /// Check if we should log progress.
    pub fn should_log(&self, interval_secs: u64) -> bool {
        self.last_log_time.elapsed().as_secs() >= interval_secs
    }

    /// Log progress and reset the log timer.
    pub fn log_progress(&mut self, unique: usize, frontier: usize) {
        let elapsed_total = self.start_time.elapsed().as_secs();

        // Rate since the last log line.
        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            (self.expanded - self.last_log_expanded) as f64 / elapsed
        } else {
            0.0
        };

        let mem_str = get_memory_usage()
            .map(|m| format!(" mem={}", format_bytes(m)))
            .unwrap_or_default();

        println!(
            "[{:02}:{:02}:{:02}] expanded={} unique={} frontier={} dupes={} rate={:.0}/s{}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.expanded,
            unique,
            frontier,
            self.duplicate_hits,
            rate,
            mem_str,
        );

        self.last_log_time = Instant::now();
        self.last_log_expanded = self.expanded;
    }

    /// Print final summary.
    pub fn print_summary(&self, unique: usize) {
        println!("Configurations expanded: {}", self.expanded);
        println!("Distinct configurations: {}", unique);
        println!("Duplicate discoveries: {}", self.duplicate_hits);
        println!("No-op transitions: {}", self.noop_moves);
        println!("Losing configurations seen: {}", self.losing_seen);
        println!("Frontier high-water mark: {}", self.max_frontier);
        if let Some(length) = self.solution_length {
            println!("Solution length: {} moves", length);
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            println!(
                "Average rate: {:.0} configurations/sec",
                self.expanded as f64 / elapsed
            );
        }
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}
