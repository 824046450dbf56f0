//! Leaderboard panel and identity glyphs for the colorful path.
//!
//! Text is rendered with a built-in 5×7 bitmap font (uppercase, digits,
//! minimal punctuation) scaled by integer factors. Glyph fidelity is not
//! a goal of the spectator path; legibility at small sizes is.

use crate::error::Result;
use crate::world::{Player, Vec2, WorldSnapshot};

use super::canvas::{Canvas, Rgb};
use super::palette::Palette;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal advance between glyphs, in unscaled pixels.
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

// =============================================================================
// 5×7 font
// =============================================================================

/// Rows of 5-bit patterns, MSB = leftmost column. Lowercase maps to
/// uppercase; unknown characters render as blank space.
fn glyph(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => [0x00; GLYPH_HEIGHT],
    }
}

// =============================================================================
// Text drawing
// =============================================================================

/// Draw `text` with its top-left corner at `(x, y)`, scaled by `scale`.
pub fn draw_text(canvas: &mut Canvas<Rgb>, text: &str, x: usize, y: usize, scale: usize, color: Rgb) {
    let scale = scale.max(1);
    let mut cursor = x;
    for ch in text.chars() {
        let rows = glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    canvas.fill_rect(
                        cursor + col * scale,
                        y + row * scale,
                        cursor + (col + 1) * scale,
                        y + (row + 1) * scale,
                        color,
                    );
                }
            }
        }
        cursor += GLYPH_ADVANCE * scale;
    }
}

/// Draw a single character centered on a world position.
pub fn draw_glyph_centered(canvas: &mut Canvas<Rgb>, ch: char, center: Vec2, scale: usize, color: Rgb) {
    let scale = scale.max(1);
    let w = (GLYPH_WIDTH * scale) as f32;
    let h = (GLYPH_HEIGHT * scale) as f32;
    let x = (center.x - w / 2.0).max(0.0) as usize;
    let y = (center.y - h / 2.0).max(0.0) as usize;
    draw_text(canvas, &ch.to_string(), x, y, scale, color);
}

/// Identity glyph letter for a mass: `'A' + owner_id % players_per_team`.
pub fn identity_letter(owner_id: u32, players_per_team: usize) -> char {
    let per_team = players_per_team.max(1) as u32;
    (b'A' + (owner_id % per_team) as u8) as char
}

// =============================================================================
// Leaderboard panel
// =============================================================================

/// Render the leaderboard into the side panel: teams sorted by
/// descending total size, each followed by its member players in
/// registration order, all in the team's color.
pub fn draw_leaderboard(
    canvas: &mut Canvas<Rgb>,
    snapshot: &WorldSnapshot<'_>,
    palette: &Palette,
    players_per_team: usize,
    panel_x: usize,
) -> Result<()> {
    struct TeamEntry<'a> {
        name: &'a str,
        team_id: Option<u32>,
        size: f32,
        members: Vec<&'a Player>,
    }

    let mut teams: Vec<TeamEntry<'_>> = Vec::new();
    for player in snapshot.players {
        match teams.iter_mut().find(|t| t.name == player.team_name) {
            Some(team) => {
                team.size += player.total_size();
                if team.team_id.is_none() {
                    team.team_id = player.masses.first().map(|m| m.team_id);
                }
                team.members.push(player);
            }
            None => teams.push(TeamEntry {
                name: &player.team_name,
                team_id: player.masses.first().map(|m| m.team_id),
                size: player.total_size(),
                members: vec![player],
            }),
        }
    }
    teams.sort_by(|a, b| b.size.total_cmp(&a.size));

    let x = panel_x + 20;
    let mut start = 10;
    for team in &teams {
        let color = match team.team_id {
            Some(id) => palette.color_for_team(id)?,
            None => palette.glyph_ink,
        };
        start += 20;
        draw_text(canvas, &format!("{} : {:.3}", team.name, team.size), x, start, 2, color);
        start += 20;
        for member in &team.members {
            let letter = member
                .masses
                .first()
                .map(|m| identity_letter(m.owner_id, players_per_team))
                .unwrap_or('-');
            draw_text(
                canvas,
                &format!("  {} : {:.3}", letter, member.total_size()),
                x,
                start,
                2,
                color,
            );
            start += 20;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Ball, Mass};

    #[test]
    fn test_identity_letter_wraps_per_team() {
        assert_eq!(identity_letter(0, 3), 'A');
        assert_eq!(identity_letter(1, 3), 'B');
        assert_eq!(identity_letter(2, 3), 'C');
        assert_eq!(identity_letter(3, 3), 'A');
        assert_eq!(identity_letter(7, 3), 'B');
    }

    #[test]
    fn test_draw_text_paints_ink_only() {
        let mut canvas = Canvas::new(40, 12, [0u8; 3]);
        draw_text(&mut canvas, "A:1", 0, 0, 1, [255, 255, 255]);
        assert!(canvas.pixels().iter().any(|&p| p == [255, 255, 255]));
        assert!(canvas.pixels().iter().all(|&p| p == [0; 3] || p == [255; 3]));
    }

    #[test]
    fn test_draw_text_scales() {
        let mut small = Canvas::new(20, 10, [0u8; 3]);
        let mut big = Canvas::new(40, 20, [0u8; 3]);
        draw_text(&mut small, "H", 0, 0, 1, [255; 3]);
        draw_text(&mut big, "H", 0, 0, 2, [255; 3]);
        let lit = |c: &Canvas<Rgb>| c.pixels().iter().filter(|&&p| p == [255; 3]).count();
        assert_eq!(lit(&big), lit(&small) * 4);
    }

    #[test]
    fn test_leaderboard_draws_in_team_colors() {
        let palette = Palette::default();
        let players = vec![
            Player::new("0", "red", vec![Mass::new(100.0, 100.0, 10.0, 0, 0)]),
            Player::new("1", "blue", vec![Mass::new(200.0, 200.0, 30.0, 1, 1)]),
        ];
        let empty: Vec<Ball> = Vec::new();
        let snapshot = WorldSnapshot::new(&empty, &empty, &empty, &players);
        let mut canvas = Canvas::new(600, 400, palette.background);
        draw_leaderboard(&mut canvas, &snapshot, &palette, 3, 400).unwrap();

        let team0 = palette.color_for_team(0).unwrap();
        let team1 = palette.color_for_team(1).unwrap();
        assert!(canvas.pixels().iter().any(|&p| p == team0));
        assert!(canvas.pixels().iter().any(|&p| p == team1));
        // Panel text stays inside the panel.
        for y in 0..canvas.height() {
            for x in 0..400 {
                assert_eq!(canvas.get(x, y), Some(palette.background));
            }
        }
    }
}
