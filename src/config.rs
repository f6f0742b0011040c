use crate::types::{ItemSpec, Sheet};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000;
pub const DEFAULT_MAX_RUNTIME: Duration = Duration::from_secs(60);
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;
/// Largest discretized sheet accepted. Every search node owns a grid copy of this many bits.
pub const MAX_SHEET_CELLS: usize = 1 << 20;

/// Input validation failures, detected before any search runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sheet dimensions must be finite and positive, got {0}")]
    InvalidSheet(Sheet),
    #[error("sheet of {rows}x{cols} cells exceeds the limit of {} cells", MAX_SHEET_CELLS)]
    SheetTooLarge { rows: usize, cols: usize },
    #[error("item {index} dimensions must be finite and positive, got {item}")]
    InvalidItem { index: usize, item: ItemSpec },
    #[error("max iterations must be non-zero")]
    ZeroIterations,
    #[error("max runtime must be a finite positive number of seconds, got {0}")]
    InvalidRuntime(f64),
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Converts a runtime cap given in seconds.
pub fn runtime_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    if !is_positive(secs) {
        return Err(ConfigError::InvalidRuntime(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidRuntime(secs))
}

/// Everything one search run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub sheet: Sheet,
    pub items: Vec<ItemSpec>,
    pub max_iterations: u64,
    pub max_runtime: Duration,
    /// Iterations between progress log lines; zero disables them.
    pub progress_interval: u64,
}

impl SearchConfig {
    pub fn new(sheet: Sheet, items: Vec<ItemSpec>) -> Self {
        Self {
            sheet,
            items,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_runtime: DEFAULT_MAX_RUNTIME,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_runtime(mut self, max_runtime: Duration) -> Self {
        self.max_runtime = max_runtime;
        self
    }

    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.sheet.length) || !is_positive(self.sheet.width) {
            return Err(ConfigError::InvalidSheet(self.sheet));
        }
        let (rows, cols) = (self.sheet.rows(), self.sheet.cols());
        if rows.checked_mul(cols).is_none_or(|cells| cells > MAX_SHEET_CELLS) {
            return Err(ConfigError::SheetTooLarge { rows, cols });
        }
        if let Some((index, &item)) = self
            .items
            .iter()
            .enumerate()
            .find(|(_, item)| !is_positive(item.length) || !is_positive(item.width))
        {
            return Err(ConfigError::InvalidItem { index, item });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.max_runtime.is_zero() {
            return Err(ConfigError::InvalidRuntime(0.0));
        }
        Ok(())
    }
}
