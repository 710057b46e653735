//! Engine tuning knobs. Defaults match long-standing club practice; requests may override them.

use serde::{Deserialize, Serialize};

/// Name of the synthetic player used to test result entry. Its games are ignored.
pub const TEST_PLAYER: &str = "Test Player";

/// Swiss candidate weighting and bracket shaping.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwissConfig {
    /// Cost of one prior meeting, in units of standings distance.
    pub repeat_weight: i64,
    /// Players this many places apart (or more) within a bracket never meet.
    pub max_distance: usize,
    /// Bottom brackets smaller than this are merged upward.
    pub min_bottom_group: usize,
}

impl Default for SwissConfig {
    fn default() -> Self {
        Self {
            repeat_weight: 30,
            max_distance: 11,
            min_bottom_group: 6,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub swiss: SwissConfig,
    /// Results naming this player are dropped on ingestion.
    pub test_player: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            swiss: SwissConfig::default(),
            test_player: TEST_PLAYER.to_string(),
        }
    }
}
