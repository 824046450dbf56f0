//! Rendering and observation pipeline.
//!
//! ## Design principles
//!
//! 1. **Snapshot contract**: everything is derived from the
//!    `WorldSnapshot` handed in; no engine state is reached back into.
//! 2. **One palette**: the rasterizer and the feature decoder share one
//!    injected `Palette`, so drawing and decoding can never disagree.
//! 3. **Two sibling pipelines**: the grayscale/feature path and the
//!    colorful/display path share windowing, cropping and overlap logic
//!    and branch at the orchestrator: exact pixels where decoding
//!    depends on them, resize/reorder only where it does not.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ba_core::render::{ArenaObserver, ObserverConfig, Palette};
//!
//! let observer = ArenaObserver::new(ObserverConfig::default(), Palette::default())?;
//! let obs = observer.observe_all(&snapshot)?;
//! let my_view = &obs.players["player-7"];
//! ```

mod canvas;
mod clip;
mod features;
mod observer;
mod overlap;
mod palette;
mod raster;
mod scoreboard;
mod window;

pub use canvas::{Canvas, Frame, Gray, Rgb};
pub use clip::{clip_display, clip_frame, clip_oriented, orient_display};
pub use features::{decode_features, FeatureLayers};
pub use observer::{
    ArenaObserver, ColorfulFrame, ColorfulSpec, ObservationBundle, ObserverConfig,
    TickObservations,
};
pub use overlap::{BallDescriptor, MassDescriptor, OverlapQuery, OverlapSnapshot};
pub use palette::{spiked_polygon, Palette, THORN_SPIKE_FACTOR, THORN_VERTICES};
pub use raster::{rasterize_color, rasterize_gray};
pub use scoreboard::{draw_leaderboard, draw_text, identity_letter};
pub use window::{view_rect, ViewRect};
