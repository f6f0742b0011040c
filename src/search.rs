use crate::config::{ConfigError, SearchConfig};
use crate::record::PlacementRecord;
use crate::types::Placement;
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The stack emptied; every reachable record was expanded.
    Exhausted,
    IterationLimit,
    TimeLimit,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "search space exhausted"),
            Self::IterationLimit => write!(f, "iteration limit reached"),
            Self::TimeLimit => write!(f, "time limit reached"),
        }
    }
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Records popped from the stack, including the one that hit a cap.
    pub iterations: u64,
    pub children_generated: u64,
    /// Times the best record was replaced.
    pub improvements: u64,
    pub max_stack_depth: usize,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search statistics:")?;
        writeln!(f, "  Iterations:          {}", self.iterations)?;
        writeln!(f, "  Children generated:  {}", self.children_generated)?;
        writeln!(f, "  Improvements:        {}", self.improvements)?;
        writeln!(f, "  Max stack depth:     {}", self.max_stack_depth)?;
        writeln!(f, "  Elapsed:             {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Best packing found plus how the search ended.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub count: usize,
    pub placements: Vec<Placement>,
    pub termination: Termination,
    pub stats: SearchStats,
}

/// Depth-first placement search over an explicit stack of [`PlacementRecord`]s.
///
/// For every popped record, children are generated for each item spec (outer loop)
/// and each grid position in row-major order (inner loop), and pushed in that order.
/// The last generated child is therefore expanded first.
#[derive(Debug, Clone)]
pub struct Search {
    config: SearchConfig,
}

impl Search {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn run(&self) -> SearchOutcome {
        let start = Instant::now();
        let config = &self.config;
        let rows = config.sheet.rows();
        let cols = config.sheet.cols();

        let initial = PlacementRecord::empty(rows, cols);
        let mut best = initial.clone();
        let mut stack = vec![initial];
        let mut stats = SearchStats {
            max_stack_depth: 1,
            ..SearchStats::default()
        };
        let mut termination = Termination::Exhausted;

        tracing::info!(
            sheet = %config.sheet,
            rows,
            cols,
            items = config.items.len(),
            max_iterations = config.max_iterations,
            max_runtime = ?config.max_runtime,
            "starting placement search"
        );

        while let Some(current) = stack.pop() {
            stats.iterations += 1;
            if config.progress_interval > 0 && stats.iterations % config.progress_interval == 0 {
                tracing::info!(
                    iteration = stats.iterations,
                    current = current.items_placed(),
                    best = best.items_placed(),
                    stack = stack.len(),
                    "search progress"
                );
            }

            if stats.iterations >= config.max_iterations {
                termination = Termination::IterationLimit;
                break;
            }
            if start.elapsed() >= config.max_runtime {
                termination = Termination::TimeLimit;
                break;
            }

            for &item in &config.items {
                for x in 0..rows {
                    for y in 0..cols {
                        if !current.grid().can_place(item, x, y) {
                            continue;
                        }
                        let child = current.child(item, x, y);
                        stats.children_generated += 1;
                        if child.items_placed() > best.items_placed() {
                            tracing::debug!(
                                items = child.items_placed(),
                                iteration = stats.iterations,
                                "new best placement"
                            );
                            best = child.clone();
                            stats.improvements += 1;
                        }
                        stack.push(child);
                    }
                }
            }
            stats.max_stack_depth = stats.max_stack_depth.max(stack.len());
        }

        stats.elapsed = start.elapsed();
        tracing::info!(
            reason = %termination,
            iterations = stats.iterations,
            elapsed = ?stats.elapsed,
            best = best.items_placed(),
            "placement search finished"
        );

        SearchOutcome {
            count: best.items_placed(),
            placements: best.into_placements(),
            termination,
            stats,
        }
    }
}

/// Validates `config` and runs one search.
pub fn run(config: SearchConfig) -> Result<SearchOutcome, ConfigError> {
    Ok(Search::new(config)?.run())
}
