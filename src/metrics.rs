use core::fmt;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::solver::{SearchOutcome, Strategy};
use crate::{Cell, PathingGrid, SearchError};

/// Summary of one search run, as shown in the comparison table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunMetrics {
    pub algorithm: String,
    pub nodes_visited: usize,
    /// Cells on the reconstructed path, 0 if the finish was not reached.
    pub path_length: usize,
    /// Wall time of the search and path reconstruction, rounded to 2 decimals.
    pub execution_time_ms: f64,
    /// UTC time of day the run finished, `HH:MM:SS`.
    pub timestamp: String,
}

impl RunMetrics {
    /// Runs `strategy` and records its metrics alongside the outcome.
    pub fn measure(
        strategy: Strategy,
        grid: &PathingGrid,
        start: Cell,
        finish: Cell,
    ) -> Result<(RunMetrics, Box<dyn SearchOutcome>), SearchError> {
        let timer = Instant::now();
        let outcome = strategy.run(grid, start, finish)?;
        let path_length = if outcome.found() {
            outcome.path().len()
        } else {
            0
        };
        let elapsed = timer.elapsed().as_secs_f64() * 1000.0;
        let metrics = RunMetrics {
            algorithm: strategy.name().to_owned(),
            nodes_visited: outcome.visited().len(),
            path_length,
            execution_time_ms: round_to_hundredths(elapsed),
            timestamp: wall_clock(SystemTime::now()),
        };
        info!(
            "{}: {} visited, path length {}, {:.2} ms",
            metrics.algorithm, metrics.nodes_visited, metrics.path_length, metrics.execution_time_ms
        );
        Ok((metrics, outcome))
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn wall_clock(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let day = secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, day % 3600 / 60, day % 60)
}

/// Metrics of successive runs, oldest first.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MetricsLog {
    pub runs: Vec<RunMetrics>,
}

impl MetricsLog {
    pub fn record(&mut self, metrics: RunMetrics) {
        self.runs.push(metrics);
    }
    pub fn clear(&mut self) {
        self.runs.clear();
    }
    pub fn len(&self) -> usize {
        self.runs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl fmt::Display for MetricsLog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{:<18} | {:>8} | {:>6} | {:>9} | {}",
            "Algorithm", "Visited", "Path", "Time (ms)", "Time"
        )?;
        let rows = self.runs.iter().map(|m| {
            format!(
                "{:<18} | {:>8} | {:>6} | {:>9.2} | {}",
                m.algorithm, m.nodes_visited, m.path_length, m.execution_time_ms, m.timestamp
            )
        });
        write!(f, "{}", rows.format("\n"))
    }
}
