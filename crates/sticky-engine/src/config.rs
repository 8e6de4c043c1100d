//! Engine Configuration

use serde::{Deserialize, Serialize};
use sticky_layout::{DEFAULT_SIZE_EPSILON, TableRunPolicy};

/// Engine configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// `z-index` forced on every sticky target
    pub z_index: i32,

    /// How runs of table header cells add to the stacked height
    pub table_run_policy: TableRunPolicy,

    /// Size changes at or below this many px are not reported
    pub size_epsilon: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            z_index: 1,
            table_run_policy: TableRunPolicy::Overlap,
            size_epsilon: DEFAULT_SIZE_EPSILON,
        }
    }
}
