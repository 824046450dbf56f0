//! Per-player view-window computation.
//!
//! The window is the axis-aligned rectangle the agent observes: it must
//! contain every mass the player owns (circle, not just center), stay
//! inside the arena, and never shrink when it hits an arena edge;
//! clamping moves the corner, it does not resize.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::world::{Player, Vec2};

use super::observer::ObserverConfig;

// =============================================================================
// ViewRect
// =============================================================================

/// Axis-aligned window over the arena raster, `left < right`,
/// `top < bottom`, in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl ViewRect {
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Center containment, half-open: `[left, right) × [top, bottom)`.
    /// Radius is deliberately ignored; this matches the overlap
    /// enumeration convention, not the painted pixels.
    #[inline]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.left as f32
            && position.x < self.right as f32
            && position.y >= self.top as f32
            && position.y < self.bottom as f32
    }

    /// A zero or negative extent is an internal invariant violation, not
    /// a condition to clamp away.
    pub fn validate(&self) -> Result<()> {
        if self.left >= self.right || self.top >= self.bottom {
            return Err(RenderError::DegenerateWindow {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Window calculation
// =============================================================================

/// Compute the player's view window.
///
/// Extents are the maxima of `|offset from centroid| + radius` per axis,
/// floored by the configured minimum vision extents so small players
/// still get a usable window. The window is a square of side
/// `2 * max(extents) * scale_up_ratio`, centered on the centroid as
/// closely as the arena bounds allow. When the player spans most of the
/// arena the window degenerates to the full arena; that is expected.
pub fn view_rect(player: &Player, config: &ObserverConfig) -> Result<ViewRect> {
    let centroid = player.centroid().ok_or_else(|| RenderError::EmptyPlayer {
        player: player.name.clone(),
    })?;

    let mut xs_max = 0.0f32;
    let mut ys_max = 0.0f32;
    for mass in &player.masses {
        let offset = centroid - mass.position;
        xs_max = xs_max.max(offset.x.abs() + mass.radius);
        ys_max = ys_max.max(offset.y.abs() + mass.radius);
    }
    xs_max = xs_max.max(config.vision_x_min);
    ys_max = ys_max.max(config.vision_y_min);

    let scale = xs_max.max(ys_max);
    let half = scale * config.scale_up_ratio;
    let side = half * 2.0;
    let full_w = config.full_width() as f32;
    let full_h = config.full_height() as f32;

    // Clamp the corner, never both edges independently: position shifts
    // at arena borders while the window size is preserved.
    let left = ((centroid.x - half) as i64)
        .max(0)
        .min(((full_w - side) as i64).max(0));
    let top = ((centroid.y - half) as i64)
        .max(0)
        .min(((full_h - side) as i64).max(0));
    let right = ((left as f32 + side) as i64).min(full_w as i64);
    let bottom = ((top as f32 + side) as i64).min(full_h as i64);

    let rect = ViewRect::new(left as usize, top as usize, right as usize, bottom as usize);
    rect.validate()?;
    Ok(rect)
}
