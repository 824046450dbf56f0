//! # ba_core - Ball Arena observation and rendering core
//!
//! Converts a shared multi-agent arena world (circular and spiked
//! entities grouped by category and ownership) into per-tick renderings:
//! a global raster of the whole arena, and for each agent an
//! agent-centered observation: cropped pixels, per-category binary
//! feature masks, and a structured enumeration of nearby entities.
//!
//! ## Features
//! - Lossless color→category decoding (exact inverse of the rasterizer)
//! - Adaptive per-agent view windows with size-preserving edge clamping
//! - Pure-geometry mode (overlap data only, no rasterization)
//! - Colorful spectator frames with leaderboard panel and identity glyphs

pub mod error;
pub mod render;
pub mod world;

pub use error::{RenderError, Result};
pub use render::{
    ArenaObserver, BallDescriptor, Canvas, ColorfulFrame, ColorfulSpec, FeatureLayers, Frame,
    MassDescriptor, ObservationBundle, ObserverConfig, OverlapQuery, OverlapSnapshot, Palette,
    TickObservations, ViewRect,
};
pub use world::{Ball, Mass, Player, Vec2, WorldSnapshot};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tick_end_to_end() {
        let food = vec![Ball::new(360.0, 360.0, 5.0)];
        let thorns: Vec<Ball> = Vec::new();
        let spores: Vec<Ball> = Vec::new();
        let players = vec![
            Player::new("alice", "red", vec![Mass::new(500.0, 500.0, 20.0, 0, 0)]),
            Player::new("bob", "blue", vec![Mass::new(100.0, 900.0, 15.0, 1, 1)]),
        ];
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);

        let observer = ArenaObserver::new(ObserverConfig::default(), Palette::default()).unwrap();
        let obs = observer.observe_all(&snapshot).unwrap();

        // Alice's window covers the food ball; it must show up in both
        // representations: the decoded food mask and the overlap data.
        let alice = &obs.players["alice"];
        assert_eq!(alice.rectangle, ViewRect::new(350, 350, 650, 650));
        let layers = alice.feature_layers.as_ref().unwrap();
        let food_mask = layers.get_layer(layers.food_index()).unwrap();
        assert!(food_mask.iter().any(|&b| b == 1));
        assert_eq!(alice.overlap.food().count(), 1);

        // Bob's window excludes it from both.
        let bob = &obs.players["bob"];
        let layers = bob.feature_layers.as_ref().unwrap();
        let food_mask = layers.get_layer(layers.food_index()).unwrap();
        assert!(food_mask.iter().all(|&b| b == 0));
        assert_eq!(bob.overlap.food().count(), 0);
    }

    #[test]
    fn test_observation_and_display_paths_agree_on_windows() {
        let food: Vec<Ball> = Vec::new();
        let thorns: Vec<Ball> = Vec::new();
        let spores: Vec<Ball> = Vec::new();
        let players = vec![Player::new("p", "t", vec![Mass::new(500.0, 500.0, 20.0, 0, 0)])];
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);

        let observer = ArenaObserver::new(ObserverConfig::default(), Palette::default()).unwrap();
        let obs = observer.observe_all(&snapshot).unwrap();
        let frame = observer.render_colorful(&snapshot, &ColorfulSpec::default()).unwrap();

        // Same windowing on both paths; only the presentation differs.
        assert_eq!(obs.players["p"].rectangle.width(), 300);
        assert_eq!(frame.players["p"].width(), 300);
    }
}
