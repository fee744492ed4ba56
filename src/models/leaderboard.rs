//! Leaderboard entry flags

use serde::Deserialize;

/// Partial update of a leaderboard entry's visibility flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LeaderboardPatch {
    pub hidden: Option<bool>,
    pub disqualified: Option<bool>,
}

impl LeaderboardPatch {
    pub fn is_empty(&self) -> bool {
        self.hidden.is_none() && self.disqualified.is_none()
    }
}
