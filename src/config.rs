use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::BOARD_SIZE;

/// Number of placements the reference rules hand out per request.
pub const DEFAULT_PLACEMENT_LIMIT: usize = 100;

/// A short edge of the board and the two ranks along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// Ranks 5 and 6
    Top,
    /// Ranks 1 and 2
    Bottom,
}

impl Edge {
    /// Row indices of the placement band along this edge.
    pub fn rows(&self) -> [usize; 2] {
        match self {
            Edge::Top => [BOARD_SIZE - 2, BOARD_SIZE - 1],
            Edge::Bottom => [0, 1],
        }
    }

    pub fn opposite(&self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    pub fn contains_row(&self, row: usize) -> bool {
        self.rows().contains(&row)
    }
}

/// Which placements survive when the enumeration is capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// The first placements in row-major enumeration order.
    First,
    /// Distinct placements drawn uniformly from all arrangements.
    Random { seed: u64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid rules configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("placement_limit must be at least 1 (use null for no limit)")]
    ZeroLimit,
}

/// Tunables of the move generator.
///
/// The defaults reproduce the reference behaviour: the first 100 placements,
/// Black setting up on the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Upper bound on generated placements; `None` enumerates them all.
    pub placement_limit: Option<usize>,
    pub placement_sampling: Sampling,
    /// Edge Black places on. White takes the opposite one.
    pub black_edge: Edge,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            placement_limit: Some(DEFAULT_PLACEMENT_LIMIT),
            placement_sampling: Sampling::First,
            black_edge: Edge::Top,
        }
    }
}

impl RulesConfig {
    /// Configuration that enumerates every placement.
    pub fn exhaustive() -> Self {
        RulesConfig {
            placement_limit: None,
            ..Default::default()
        }
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placement_limit == Some(0) {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(())
    }
}
