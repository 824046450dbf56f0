//! Tick orchestration: one world snapshot in, one observation per agent
//! out.
//!
//! ## Design notes
//!
//! - The global raster is computed **at most once per tick** and shared
//!   read-only across every per-player crop; rasterization is O(total
//!   entities) while the per-player step is only O(crop size +
//!   entities-in-window).
//! - Grayscale/feature and colorful/display are two sibling pipelines
//!   sharing the window/crop/overlap logic; the split is a configuration
//!   branch here, not an inheritance hierarchy.
//! - Any failure aborts the whole call; a partially-populated result
//!   never escapes to the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::world::WorldSnapshot;

use super::canvas::{Canvas, Frame, Gray, Rgb};
use super::clip::{clip_display, clip_oriented, orient_display};
use super::features::{decode_features, FeatureLayers};
use super::overlap::OverlapQuery;
use super::palette::Palette;
use super::raster::{rasterize_color, rasterize_gray};
use super::scoreboard::draw_leaderboard;
use super::window::{view_rect, ViewRect};

// =============================================================================
// Configuration
// =============================================================================

/// Observer configuration, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Arena width in pixels.
    pub width: usize,
    /// Arena height in pixels.
    pub height: usize,
    /// Extra margin on each side of the arena, (x, y).
    pub padding: (usize, usize),
    /// Zoom-out factor applied to the view-window extent (default: 1.5).
    pub scale_up_ratio: f32,
    /// Minimum view extent on the x axis (default: 100).
    pub vision_x_min: f32,
    /// Minimum view extent on the y axis (default: 100).
    pub vision_y_min: f32,
    /// Compute pixel-based features at all. With `false` the observer
    /// runs in pure-geometry mode: overlap data only, no rasterization.
    pub use_spatial: bool,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            padding: (0, 0),
            scale_up_ratio: 1.5,
            vision_x_min: 100.0,
            vision_y_min: 100.0,
            use_spatial: true,
        }
    }
}

impl ObserverConfig {
    /// Raster width including padding margins.
    pub fn full_width(&self) -> usize {
        self.width + 2 * self.padding.0
    }

    /// Raster height including padding margins.
    pub fn full_height(&self) -> usize {
        self.height + 2 * self.padding.1
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig("arena dimensions must be positive".into()));
        }
        if self.scale_up_ratio <= 0.0 {
            return Err(RenderError::InvalidConfig("scale_up_ratio must be positive".into()));
        }
        if self.vision_x_min < 0.0 || self.vision_y_min < 0.0 {
            return Err(RenderError::InvalidConfig("vision minima must be non-negative".into()));
        }
        Ok(())
    }
}

/// Parameters of the colorful/display variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorfulSpec {
    /// Side length of each per-player display crop (default: 300).
    pub partial_size: usize,
    /// Players per team, used for identity glyph letters (default: 3).
    pub players_per_team: usize,
    /// Width of the leaderboard side panel in pixels (default: 150).
    pub bar_width: usize,
}

impl Default for ColorfulSpec {
    fn default() -> Self {
        Self { partial_size: 300, players_per_team: 3, bar_width: 150 }
    }
}

impl ColorfulSpec {
    pub fn validate(&self) -> Result<()> {
        if self.partial_size == 0 {
            return Err(RenderError::InvalidConfig("partial_size must be positive".into()));
        }
        if self.players_per_team == 0 {
            return Err(RenderError::InvalidConfig("players_per_team must be positive".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// Per-agent observation for one tick. Ephemeral: borrows the snapshot
/// and is meant to be consumed before the next tick.
#[derive(Debug, Clone)]
pub struct ObservationBundle<'a> {
    /// Decoded binary masks; `None` in pure-geometry mode.
    pub feature_layers: Option<FeatureLayers>,
    /// The agent's view window over the arena.
    pub rectangle: ViewRect,
    /// Lazy per-category enumeration of entities in the window.
    pub overlap: OverlapQuery<'a>,
    pub team_name: &'a str,
}

/// Everything the feature path produces for one tick.
#[derive(Debug, Clone)]
pub struct TickObservations<'a> {
    /// The shared global raster; `None` in pure-geometry mode.
    pub global: Option<Canvas<Gray>>,
    /// One bundle per player, keyed by player name.
    pub players: HashMap<&'a str, ObservationBundle<'a>>,
}

/// Everything the colorful path produces for one tick: the annotated
/// global frame and fixed-size per-player crops, both in display (BGR)
/// channel order.
#[derive(Debug, Clone)]
pub struct ColorfulFrame {
    pub global: Canvas<Rgb>,
    pub players: HashMap<String, Canvas<Rgb>>,
}

// =============================================================================
// ArenaObserver
// =============================================================================

/// The per-tick orchestrator. Owns nothing across ticks but its
/// configuration and palette; every raster buffer is freshly allocated
/// per call and discarded with the returned value.
#[derive(Debug, Clone)]
pub struct ArenaObserver {
    config: ObserverConfig,
    palette: Palette,
}

impl ArenaObserver {
    pub fn new(config: ObserverConfig, palette: Palette) -> Result<Self> {
        config.validate()?;
        palette.validate()?;
        Ok(Self { config, palette })
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Grayscale/feature path: rasterize the arena once, then window,
    /// crop, orient, decode and enumerate for every player.
    pub fn observe_all<'a>(&self, snapshot: &WorldSnapshot<'a>) -> Result<TickObservations<'a>> {
        let global = if self.config.use_spatial {
            Some(rasterize_gray(
                snapshot,
                &self.palette,
                self.config.full_width(),
                self.config.full_height(),
            )?)
        } else {
            None
        };

        let player_count = snapshot.player_count();
        let mut players = HashMap::with_capacity(player_count);
        for player in snapshot.players {
            let rectangle = view_rect(player, &self.config)?;
            let feature_layers = match &global {
                Some(canvas) => {
                    let clip = clip_oriented(canvas, &rectangle)?;
                    Some(decode_features(&Frame::Gray(clip), &self.palette, player_count)?)
                }
                None => None,
            };
            log::trace!(
                "observation for {}: window ({},{})-({},{})",
                player.name,
                rectangle.left,
                rectangle.top,
                rectangle.right,
                rectangle.bottom
            );
            players.insert(
                player.name.as_str(),
                ObservationBundle {
                    feature_layers,
                    rectangle,
                    overlap: OverlapQuery::new(rectangle, snapshot, player),
                    team_name: player.team_name.as_str(),
                },
            );
        }
        log::debug!(
            "tick observed: {} players, spatial={}",
            players.len(),
            self.config.use_spatial
        );
        Ok(TickObservations { global, players })
    }

    /// Colorful/display path: annotated color frame with leaderboard
    /// panel and identity glyphs, plus resized per-player crops.
    pub fn render_colorful(
        &self,
        snapshot: &WorldSnapshot<'_>,
        spec: &ColorfulSpec,
    ) -> Result<ColorfulFrame> {
        spec.validate()?;
        let width = self.config.full_width();
        let height = self.config.full_height();
        let mut canvas = rasterize_color(snapshot, &self.palette, width, height, spec)?;
        draw_leaderboard(&mut canvas, snapshot, &self.palette, spec.players_per_team, width)?;

        let mut players = HashMap::with_capacity(snapshot.player_count());
        for player in snapshot.players {
            let rectangle = view_rect(player, &self.config)?;
            players.insert(
                player.name.clone(),
                clip_display(&canvas, &rectangle, spec.partial_size)?,
            );
        }
        Ok(ColorfulFrame { global: orient_display(&canvas), players })
    }
}
