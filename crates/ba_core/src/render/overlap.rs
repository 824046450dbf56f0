//! Structured (non-pixel) enumeration of entities inside a view window.
//!
//! Membership is by center position only, radius ignored. The rasterizer
//! still paints pixels of entities straddling the window edge, so an
//! entity can be visible in the feature masks yet absent here. That
//! asymmetry is intentional and load-bearing for downstream consumers;
//! do not "fix" it.

use serde::{Deserialize, Serialize};

use crate::world::{Ball, Player, WorldSnapshot};

use super::window::ViewRect;

// =============================================================================
// Descriptors
// =============================================================================

/// Position/radius of one non-player ball inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallDescriptor {
    pub position: (f32, f32),
    pub radius: f32,
}

impl BallDescriptor {
    fn of(ball: &Ball) -> Self {
        Self { position: (ball.position.x, ball.position.y), radius: ball.radius }
    }
}

/// Position/radius plus ownership of one player mass inside a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassDescriptor {
    pub position: (f32, f32),
    pub radius: f32,
    pub player: String,
    pub team: String,
}

// =============================================================================
// OverlapQuery
// =============================================================================

/// Lazy per-category enumeration of entities whose center lies inside a
/// window. Each accessor returns a fresh finite iterator: one-shot, but
/// restartable by calling again.
#[derive(Debug, Clone, Copy)]
pub struct OverlapQuery<'a> {
    rect: ViewRect,
    food: &'a [Ball],
    thorns: &'a [Ball],
    spores: &'a [Ball],
    player: &'a Player,
}

impl<'a> OverlapQuery<'a> {
    pub fn new(rect: ViewRect, snapshot: &WorldSnapshot<'a>, player: &'a Player) -> Self {
        Self {
            rect,
            food: snapshot.food,
            thorns: snapshot.thorns,
            spores: snapshot.spores,
            player,
        }
    }

    pub fn rect(&self) -> ViewRect {
        self.rect
    }

    pub fn food(&self) -> impl Iterator<Item = BallDescriptor> + 'a {
        Self::balls_in(self.rect, self.food)
    }

    pub fn thorns(&self) -> impl Iterator<Item = BallDescriptor> + 'a {
        Self::balls_in(self.rect, self.thorns)
    }

    pub fn spores(&self) -> impl Iterator<Item = BallDescriptor> + 'a {
        Self::balls_in(self.rect, self.spores)
    }

    /// The observed player's own masses inside the window, with owner
    /// and team names attached.
    pub fn masses(&self) -> impl Iterator<Item = MassDescriptor> + 'a {
        let rect = self.rect;
        let player = self.player;
        player
            .masses
            .iter()
            .filter(move |mass| rect.contains(mass.position))
            .map(move |mass| MassDescriptor {
                position: (mass.position.x, mass.position.y),
                radius: mass.radius,
                player: player.name.clone(),
                team: player.team_name.clone(),
            })
    }

    fn balls_in(rect: ViewRect, balls: &'a [Ball]) -> impl Iterator<Item = BallDescriptor> + 'a {
        balls
            .iter()
            .filter(move |ball| rect.contains(ball.position))
            .map(BallDescriptor::of)
    }

    /// Eagerly evaluate all four categories, e.g. for JSON export.
    pub fn materialize(&self) -> OverlapSnapshot {
        OverlapSnapshot {
            food: self.food().collect(),
            thorns: self.thorns().collect(),
            spores: self.spores().collect(),
            masses: self.masses().collect(),
        }
    }
}

/// Materialized overlap data for eager or serialized consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapSnapshot {
    pub food: Vec<BallDescriptor>,
    pub thorns: Vec<BallDescriptor>,
    pub spores: Vec<BallDescriptor>,
    pub masses: Vec<MassDescriptor>,
}

impl OverlapSnapshot {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Mass;

    fn snapshot_parts() -> (Vec<Ball>, Vec<Ball>, Vec<Ball>, Vec<Player>) {
        let food = vec![Ball::new(10.0, 10.0, 5.0), Ball::new(500.0, 500.0, 5.0)];
        let thorns = vec![Ball::new(15.0, 12.0, 12.0)];
        let spores = vec![Ball::new(120.0, 120.0, 3.0)];
        let players = vec![Player::new(
            "0",
            "0",
            vec![Mass::new(8.0, 8.0, 6.0, 0, 0), Mass::new(400.0, 400.0, 6.0, 0, 0)],
        )];
        (food, thorns, spores, players)
    }

    #[test]
    fn test_ball_inside_rectangle_appears_exactly_once() {
        let (food, thorns, spores, players) = snapshot_parts();
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);
        let query = OverlapQuery::new(ViewRect::new(0, 0, 20, 20), &snapshot, &players[0]);

        let seen: Vec<BallDescriptor> = query.food().collect();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].position, (10.0, 10.0));
        assert_eq!(seen[0].radius, 5.0);
    }

    #[test]
    fn test_ball_outside_rectangle_never_appears() {
        let (food, thorns, spores, players) = snapshot_parts();
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);
        let query = OverlapQuery::new(ViewRect::new(50, 50, 100, 100), &snapshot, &players[0]);
        assert_eq!(query.food().count(), 0);
        assert_eq!(query.thorns().count(), 0);
        assert_eq!(query.spores().count(), 0);
        assert_eq!(query.masses().count(), 0);
    }

    #[test]
    fn test_masses_carry_owner_and_team() {
        let (food, thorns, spores, players) = snapshot_parts();
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);
        let query = OverlapQuery::new(ViewRect::new(0, 0, 20, 20), &snapshot, &players[0]);

        let masses: Vec<MassDescriptor> = query.masses().collect();
        assert_eq!(masses.len(), 1);
        assert_eq!(masses[0].player, "0");
        assert_eq!(masses[0].team, "0");
    }

    #[test]
    fn test_iterators_restart_on_recall() {
        let (food, thorns, spores, players) = snapshot_parts();
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);
        let query = OverlapQuery::new(ViewRect::new(0, 0, 20, 20), &snapshot, &players[0]);
        assert_eq!(query.food().count(), query.food().count());
    }

    #[test]
    fn test_center_containment_ignores_radius() {
        // Ball center at x=25 with radius 10 straddles the rect edge at
        // x=20: painted pixels would reach into the window, but the
        // overlap data intentionally excludes it.
        let food = vec![Ball::new(25.0, 10.0, 10.0)];
        let (_, thorns, spores, players) = snapshot_parts();
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);
        let query = OverlapQuery::new(ViewRect::new(0, 0, 20, 20), &snapshot, &players[0]);
        assert_eq!(query.food().count(), 0);
    }

    #[test]
    fn test_materialize_round_trips_json() {
        let (food, thorns, spores, players) = snapshot_parts();
        let snapshot = WorldSnapshot::new(&food, &thorns, &spores, &players);
        let query = OverlapQuery::new(ViewRect::new(0, 0, 200, 200), &snapshot, &players[0]);
        let materialized = query.materialize();
        let json = materialized.to_json().unwrap();
        let parsed: OverlapSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, materialized);
    }
}
