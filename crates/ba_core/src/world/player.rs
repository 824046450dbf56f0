//! Player roster entry and its derived quantities.

use serde::{Deserialize, Serialize};

use super::ball::{Mass, Vec2};

/// One agent in the arena: a named collection of masses on a team.
///
/// The simulation owns the masses and keeps them in a stable order; the
/// renderer only derives the centroid and the leaderboard size from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub team_name: String,
    pub masses: Vec<Mass>,
}

impl Player {
    pub fn new(name: impl Into<String>, team_name: impl Into<String>, masses: Vec<Mass>) -> Self {
        Self { name: name.into(), team_name: team_name.into(), masses }
    }

    /// Size-weighted mean position of the player's masses (weight = radius²).
    ///
    /// `None` for a player with no masses left.
    pub fn centroid(&self) -> Option<Vec2> {
        let mut weighted = Vec2::zeros();
        let mut total = 0.0f32;
        for mass in &self.masses {
            weighted += mass.position * mass.size();
            total += mass.size();
        }
        if total > 0.0 {
            Some(weighted / total)
        } else {
            None
        }
    }

    /// Aggregate size measure used for leaderboard ranking.
    pub fn total_size(&self) -> f32 {
        self.masses.iter().map(Mass::size).sum()
    }
}
