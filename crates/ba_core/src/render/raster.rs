//! Global arena rasterization.
//!
//! Draw order is fixed and identical in both paths: food → thorns →
//! spores → players (ascending registration order, masses in list
//! order). Later categories overdraw earlier ones, so a pixel always
//! carries exactly one category's color, the invariant the feature
//! decoder rests on.

use crate::error::Result;
use crate::world::WorldSnapshot;

use super::canvas::{Canvas, Gray, Rgb};
use super::observer::ColorfulSpec;
use super::palette::{spiked_polygon, Palette};
use super::scoreboard::{draw_glyph_centered, identity_letter, GLYPH_HEIGHT};

/// Separator line width between arena and leaderboard panel.
const PANEL_SEPARATOR_PX: usize = 3;

/// Feature-path raster: every entity in its grayscale category/identity
/// color on a fresh background-filled buffer.
pub fn rasterize_gray(
    snapshot: &WorldSnapshot<'_>,
    palette: &Palette,
    width: usize,
    height: usize,
) -> Result<Canvas<Gray>> {
    let mut canvas = Canvas::new(width, height, palette.background_gray);
    for ball in snapshot.food {
        canvas.fill_circle(ball.position, ball.radius, palette.food_gray);
    }
    for ball in snapshot.thorns {
        canvas.fill_polygon(&spiked_polygon(ball.position, ball.radius), palette.thorns_gray);
    }
    for ball in snapshot.spores {
        canvas.fill_circle(ball.position, ball.radius, palette.spore_gray);
    }
    for player in snapshot.players {
        for mass in &player.masses {
            let color = palette.gray_for_player(mass.owner_id)?;
            canvas.fill_circle(mass.position, mass.radius, color);
        }
    }
    Ok(canvas)
}

/// Display-path raster: arena plus an empty side panel of
/// `spec.bar_width` pixels, players colored per team with an identity
/// glyph on every mass. The leaderboard text is composed separately.
pub fn rasterize_color(
    snapshot: &WorldSnapshot<'_>,
    palette: &Palette,
    width: usize,
    height: usize,
    spec: &ColorfulSpec,
) -> Result<Canvas<Rgb>> {
    let mut canvas = Canvas::new(width + spec.bar_width, height, palette.background);
    canvas.fill_rect(width + 1, 0, width + 1 + PANEL_SEPARATOR_PX, height, palette.panel_line);

    for ball in snapshot.food {
        canvas.fill_circle(ball.position, ball.radius, palette.food_color);
    }
    for ball in snapshot.thorns {
        canvas.fill_polygon(&spiked_polygon(ball.position, ball.radius), palette.thorns_color);
    }
    for ball in snapshot.spores {
        canvas.fill_circle(ball.position, ball.radius, palette.spore_color);
    }
    for player in snapshot.players {
        for mass in &player.masses {
            let color = palette.color_for_team(mass.team_id)?;
            canvas.fill_circle(mass.position, mass.radius, color);
            let letter = identity_letter(mass.owner_id, spec.players_per_team);
            let scale = ((mass.radius / 1.6) / GLYPH_HEIGHT as f32).round().max(1.0) as usize;
            draw_glyph_centered(&mut canvas, letter, mass.position, scale, palette.glyph_ink);
        }
    }
    Ok(canvas)
}
