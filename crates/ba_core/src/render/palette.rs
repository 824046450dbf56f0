//! Color and shape assignment.
//!
//! One immutable `Palette` is injected into both the rasterizer and the
//! feature decoder, so the color a category is drawn with and the color it
//! is decoded from can never drift apart. Grayscale values must be
//! collision-free: the decoder reconstructs masks by exact equality, and
//! the rasterizer guarantees hard-edged fills (no anti-aliasing, no
//! blending) to keep that inversion lossless.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::world::Vec2;

use super::canvas::Rgb;

// =============================================================================
// Thorn shape approximation
// =============================================================================

/// Vertex count of the thorn polygon.
pub const THORN_VERTICES: usize = 20;
/// Outer-spike radius factor; spike tips circumscribe the ball's circle.
pub const THORN_SPIKE_FACTOR: f32 = 1.15;

/// Approximate a thorn ball as a spiked polygon: vertices alternate
/// between the circle radius and the spike radius.
pub fn spiked_polygon(center: Vec2, radius: f32) -> Vec<Vec2> {
    (0..THORN_VERTICES)
        .map(|i| {
            let angle = (i as f32 / THORN_VERTICES as f32) * std::f32::consts::TAU;
            let r = if i % 2 == 0 { radius * THORN_SPIKE_FACTOR } else { radius };
            Vec2::new(center.x + angle.cos() * r, center.y + angle.sin() * r)
        })
        .collect()
}

// =============================================================================
// Palette
// =============================================================================

/// Fixed color tables for every entity category and identity.
///
/// Grayscale values feed the feature path; RGB values feed the colorful
/// spectator path (where players are colored per *team*, not per
/// identity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    // === Grayscale (feature path) ===
    pub background_gray: u8,
    pub food_gray: u8,
    pub spore_gray: u8,
    pub thorns_gray: u8,
    /// One grayscale value per player identity, indexed by `owner_id`.
    pub player_grays: Vec<u8>,

    // === RGB (colorful path) ===
    pub background: Rgb,
    pub food_color: Rgb,
    pub spore_color: Rgb,
    pub thorns_color: Rgb,
    /// One color per team, indexed by `team_id`.
    pub team_colors: Vec<Rgb>,
    /// Panel separator ink.
    pub panel_line: Rgb,
    /// Identity glyph ink.
    pub glyph_ink: Rgb,
}

static DEFAULT_PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    background_gray: 0,
    food_gray: 230,
    spore_gray: 240,
    thorns_gray: 250,
    player_grays: (0..24u32).map(|i| 40 + (i as u8) * 8).collect(),
    background: [40, 40, 40],
    food_color: [156, 204, 101],
    spore_color: [255, 202, 40],
    thorns_color: [46, 125, 50],
    team_colors: vec![
        [229, 57, 53],
        [30, 136, 229],
        [67, 160, 71],
        [251, 140, 0],
        [142, 36, 170],
        [0, 137, 123],
        [253, 216, 53],
        [109, 76, 65],
    ],
    panel_line: [0, 0, 0],
    glyph_ink: [255, 255, 255],
});

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE.clone()
    }
}

impl Palette {
    /// Grayscale value for a player identity.
    pub fn gray_for_player(&self, id: u32) -> Result<u8> {
        self.player_grays
            .get(id as usize)
            .copied()
            .ok_or(RenderError::UnknownIdentity { id })
    }

    /// Team color for the colorful path.
    pub fn color_for_team(&self, id: u32) -> Result<Rgb> {
        self.team_colors
            .get(id as usize)
            .copied()
            .ok_or(RenderError::UnknownTeam { id })
    }

    /// Number of player identities this palette can render.
    pub fn player_capacity(&self) -> usize {
        self.player_grays.len()
    }

    /// Reject palettes whose grayscale assignment is not collision-free.
    ///
    /// The decoder inverts the rasterizer by exact equality, so every
    /// category/identity value must differ from every other one and from
    /// the background.
    pub fn validate(&self) -> Result<()> {
        let mut grays = Vec::with_capacity(self.player_grays.len() + 4);
        grays.push(self.background_gray);
        grays.push(self.food_gray);
        grays.push(self.spore_gray);
        grays.push(self.thorns_gray);
        grays.extend_from_slice(&self.player_grays);
        let mut sorted = grays.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != grays.len() {
            return Err(RenderError::InvalidConfig(
                "grayscale palette values collide; exact-equality decoding would be lossy".into(),
            ));
        }
        if self.player_grays.is_empty() {
            return Err(RenderError::InvalidConfig("palette has no player identities".into()));
        }
        if self.team_colors.is_empty() {
            return Err(RenderError::InvalidConfig("palette has no team colors".into()));
        }
        Ok(())
    }
}
