//! Feature decoding: grayscale crop → per-category binary masks.
//!
//! This is the exact algebraic inverse of the grayscale rasterizer: mask
//! `i` is 1 wherever the pixel equals the grayscale value the palette
//! assigns to category/identity `i`, 0 elsewhere. Layer order is fixed:
//! players `0..P-1`, then food, spore, thorns. Any palette change must
//! flow through the same injected `Palette` the rasterizer used, or every
//! mask decodes wrong.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::canvas::Frame;
use super::palette::Palette;

// =============================================================================
// FeatureLayers
// =============================================================================

/// Ordered stack of `P + 3` binary masks over one player's view crop.
///
/// Each layer is a flattened `width × height` mask (row-major, 0 or 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureLayers {
    pub width: usize,
    pub height: usize,
    /// Number of player-identity layers at the front of the stack.
    pub player_count: usize,
    /// Layer labels for reference.
    pub labels: Vec<String>,
    /// Binary masks, one per category/identity.
    pub layers: Vec<Vec<u8>>,
}

impl FeatureLayers {
    /// Layers appended after the per-player ones: food, spore, thorns.
    pub const EXTRA_LAYERS: usize = 3;

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn food_index(&self) -> usize {
        self.player_count
    }

    pub fn spore_index(&self) -> usize {
        self.player_count + 1
    }

    pub fn thorns_index(&self) -> usize {
        self.player_count + 2
    }

    /// A specific mask as a flat slice.
    pub fn get_layer(&self, idx: usize) -> Option<&[u8]> {
        self.layers.get(idx).map(|l| l.as_slice())
    }

    /// Tensor shape (C, H, W).
    pub fn to_tensor_shape(&self) -> (usize, usize, usize) {
        (self.layers.len(), self.height, self.width)
    }

    /// All masks concatenated in CHW order, as floats for model input.
    pub fn to_flat_chw(&self) -> Vec<f32> {
        let mut v = Vec::with_capacity(self.layers.len() * self.width * self.height);
        for layer in &self.layers {
            v.extend(layer.iter().map(|&b| b as f32));
        }
        v
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a grayscale crop into binary masks for `player_count`
/// identities plus food, spore and thorns.
///
/// The frame must be single-channel; a color frame is a caller bug
/// (spatial-mode misuse), surfaced as `DecoderPrecondition` rather than
/// silently producing wrong masks.
pub fn decode_features(frame: &Frame, palette: &Palette, player_count: usize) -> Result<FeatureLayers> {
    let gray = frame.expect_gray()?;
    let pixels = gray.pixels();

    let mut layers = Vec::with_capacity(player_count + FeatureLayers::EXTRA_LAYERS);
    let mut labels = Vec::with_capacity(player_count + FeatureLayers::EXTRA_LAYERS);
    for id in 0..player_count {
        let value = palette.gray_for_player(id as u32)?;
        layers.push(mask_of(pixels, value));
        labels.push(format!("player_{id}"));
    }
    for (label, value) in [
        ("food", palette.food_gray),
        ("spore", palette.spore_gray),
        ("thorns", palette.thorns_gray),
    ] {
        layers.push(mask_of(pixels, value));
        labels.push(label.to_string());
    }

    Ok(FeatureLayers {
        width: gray.width(),
        height: gray.height(),
        player_count,
        labels,
        layers,
    })
}

#[inline]
fn mask_of(pixels: &[u8], value: u8) -> Vec<u8> {
    pixels.iter().map(|&p| u8::from(p == value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::render::canvas::Canvas;
    use proptest::prelude::*;

    fn paint(palette: &Palette, cells: &[(usize, usize, u8)]) -> Frame {
        let mut canvas = Canvas::new(8, 8, palette.background_gray);
        for &(x, y, value) in cells {
            canvas.set(x, y, value);
        }
        Frame::Gray(canvas)
    }

    #[test]
    fn test_decode_layer_order_and_indices() {
        let palette = Palette::default();
        let frame = paint(&palette, &[]);
        let features = decode_features(&frame, &palette, 4).unwrap();
        assert_eq!(features.layer_count(), 7);
        assert_eq!(features.labels[0], "player_0");
        assert_eq!(features.labels[features.food_index()], "food");
        assert_eq!(features.labels[features.spore_index()], "spore");
        assert_eq!(features.labels[features.thorns_index()], "thorns");
        assert_eq!(features.to_tensor_shape(), (7, 8, 8));
    }

    #[test]
    fn test_decode_inverts_painted_categories() {
        let palette = Palette::default();
        let p0 = palette.gray_for_player(0).unwrap();
        let p2 = palette.gray_for_player(2).unwrap();
        let frame = paint(
            &palette,
            &[(1, 1, p0), (2, 5, p2), (3, 3, palette.food_gray), (6, 0, palette.thorns_gray)],
        );
        let features = decode_features(&frame, &palette, 3).unwrap();

        let at = |layer: usize, x: usize, y: usize| features.layers[layer][y * 8 + x];
        assert_eq!(at(0, 1, 1), 1);
        assert_eq!(at(2, 2, 5), 1);
        assert_eq!(at(features.food_index(), 3, 3), 1);
        assert_eq!(at(features.thorns_index(), 6, 0), 1);
        // Background decodes to no layer at all.
        assert!(features.layers.iter().all(|l| l[0] == 0));
    }

    #[test]
    fn test_decode_rejects_color_frame() {
        let palette = Palette::default();
        let frame = Frame::Color(Canvas::new(4, 4, [0u8; 3]));
        assert!(matches!(
            decode_features(&frame, &palette, 2),
            Err(RenderError::DecoderPrecondition)
        ));
    }

    #[test]
    fn test_flat_chw_length() {
        let palette = Palette::default();
        let frame = paint(&palette, &[]);
        let features = decode_features(&frame, &palette, 2).unwrap();
        assert_eq!(features.to_flat_chw().len(), 5 * 8 * 8);
    }

    proptest! {
        /// Mask completeness: for any painting of palette colors, each
        /// pixel activates exactly one layer (or none for background),
        /// never more than one.
        #[test]
        fn prop_masks_are_one_hot(
            cells in proptest::collection::vec(
                (0usize..8, 0usize..8, 0usize..7), 0..40,
            )
        ) {
            let palette = Palette::default();
            let player_count = 4usize;
            let value_of = |cat: usize| -> u8 {
                match cat {
                    0..=3 => palette.gray_for_player(cat as u32).unwrap(),
                    4 => palette.food_gray,
                    5 => palette.spore_gray,
                    _ => palette.thorns_gray,
                }
            };
            let mut canvas = Canvas::new(8, 8, palette.background_gray);
            let mut expected = vec![None::<usize>; 64];
            for &(x, y, cat) in &cells {
                canvas.set(x, y, value_of(cat));
                expected[y * 8 + x] = Some(cat);
            }

            let features =
                decode_features(&Frame::Gray(canvas), &palette, player_count).unwrap();
            for idx in 0..64 {
                let hits: Vec<usize> = (0..features.layer_count())
                    .filter(|&l| features.layers[l][idx] == 1)
                    .collect();
                match expected[idx] {
                    Some(cat) => prop_assert_eq!(hits, vec![cat]),
                    None => prop_assert!(hits.is_empty()),
                }
            }
        }
    }
}
