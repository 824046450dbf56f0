//! World entity data carriers.
//!
//! Plain read-only snapshots of what the simulation owns. The renderer
//! never mutates these; category is carried by the snapshot collection a
//! ball lives in, not by the ball itself.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// 2D world position or offset, in arena units (one unit = one pixel of
/// the global raster).
pub type Vec2 = Vector2<f32>;

/// A plain circular entity: food, thorn or spore.
///
/// Invariant: `radius > 0`. Positions are assumed in-bounds by the
/// simulation; the renderer clips while drawing instead of validating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { position: Vec2::new(x, y), radius }
    }
}

/// One blob of a player's body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    pub position: Vec2,
    pub radius: f32,
    /// Arena-wide player identity. Indexes the player grayscale table.
    pub owner_id: u32,
    /// Team identity. Indexes the team color table in the colorful path.
    pub team_id: u32,
}

impl Mass {
    pub fn new(x: f32, y: f32, radius: f32, owner_id: u32, team_id: u32) -> Self {
        Self { position: Vec2::new(x, y), radius, owner_id, team_id }
    }

    /// Leaderboard size measure for a single mass.
    #[inline]
    pub fn size(&self) -> f32 {
        self.radius * self.radius
    }
}
