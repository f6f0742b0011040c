//! Depth-first search for dense non-overlapping placements of rectangular
//! items on a discretized sheet, bounded by iteration and wall-clock caps.

pub mod config;
pub mod grid;
pub mod record;
pub mod render;
pub mod search;
pub mod types;

pub use config::{ConfigError, SearchConfig};
pub use search::{Search, SearchOutcome, SearchStats, Termination};
pub use types::{ItemSpec, Placement, Sheet};
