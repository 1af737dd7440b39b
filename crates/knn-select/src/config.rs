use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Options for a greedy feature search.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub direction: SearchDirection,

    /// Evaluate the candidates of a level on the rayon thread pool.
    /// Results are still reported in ascending feature order.
    pub parallel: bool,
}

/// Which way the greedy search walks the subset lattice.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    /// Start empty and add one feature per level.
    #[default]
    Forward,
    /// Start with every feature and remove one per level.
    Backward,
}

impl SearchDirection {
    pub fn name(&self) -> &'static str {
        match self {
            SearchDirection::Forward => "Forward Selection",
            SearchDirection::Backward => "Backward Elimination",
        }
    }
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "forward" | "forward-selection" | "forward_selection" => {
                Ok(SearchDirection::Forward)
            }
            "2" | "backward" | "backward-elimination" | "backward_elimination" => {
                Ok(SearchDirection::Backward)
            }
            _ => Err(format!(
                "Unknown search direction: {}. Expected 'forward' (1) or 'backward' (2)",
                s
            )),
        }
    }
}

impl SearchConfig {
    pub fn new(direction: SearchDirection, parallel: bool) -> Self {
        Self {
            direction,
            parallel,
        }
    }
}
