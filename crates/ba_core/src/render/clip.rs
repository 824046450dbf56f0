//! Crop and canonical orientation.
//!
//! Every per-player view is presented in one fixed orientation: crop,
//! horizontal mirror, then a 90° rotation. The composition is not
//! configurable. On the feature path the transform is pure pixel
//! movement, so exact values survive for the decoder. Only the
//! display path may resize (nearest-neighbor) and reorder channels for
//! the display pixel format.

use crate::error::Result;

use super::canvas::{Canvas, Frame, Rgb};
use super::window::ViewRect;

/// Feature-path clip: crop plus the canonical mirror + rotate, exact.
pub fn clip_oriented<P: Copy + PartialEq>(canvas: &Canvas<P>, rect: &ViewRect) -> Result<Canvas<P>> {
    Ok(canvas.crop(rect)?.mirror_h().rot90())
}

/// Frame-level clip for callers holding either channel layout.
pub fn clip_frame(frame: &Frame, rect: &ViewRect) -> Result<Frame> {
    match frame.crop(rect)? {
        Frame::Gray(c) => Ok(Frame::Gray(c.mirror_h().rot90())),
        Frame::Color(c) => Ok(Frame::Color(c.mirror_h().rot90())),
    }
}

/// Display-path clip: canonical orientation, then resize to a square of
/// `partial_size` and RGB→BGR reorder.
pub fn clip_display(canvas: &Canvas<Rgb>, rect: &ViewRect, partial_size: usize) -> Result<Canvas<Rgb>> {
    Ok(canvas
        .crop(rect)?
        .mirror_h()
        .rot90()
        .resize_nearest(partial_size, partial_size)
        .swap_rb())
}

/// Orientation + channel reorder for the full annotated display frame
/// (no crop, no resize).
pub fn orient_display(canvas: &Canvas<Rgb>) -> Canvas<Rgb> {
    canvas.mirror_h().rot90().swap_rb()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_oriented_is_exact() {
        let mut canvas = Canvas::new(8, 8, 0u8);
        canvas.set(2, 3, 7);
        canvas.set(5, 6, 9);
        let rect = ViewRect::new(1, 2, 7, 8);
        let clip = clip_oriented(&canvas, &rect).unwrap();
        // 6x6 crop, rotated: still 6x6, same pixel multiset.
        assert_eq!(clip.width(), 6);
        assert_eq!(clip.height(), 6);
        let mut values: Vec<u8> = clip.pixels().iter().copied().filter(|&p| p != 0).collect();
        values.sort_unstable();
        assert_eq!(values, vec![7, 9]);
    }

    #[test]
    fn test_clip_oriented_fixed_composition() {
        // 2x2 crop of a marked canvas pins the mirror+rot90 composition:
        //   a b   mirror->  b a   rot90->  a c
        //   c d             d c            b d
        let canvas = Canvas::from_raw(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let rect = ViewRect::new(0, 0, 2, 2);
        let clip = clip_oriented(&canvas, &rect).unwrap();
        assert_eq!(clip.pixels(), &[1, 3, 2, 4]);
    }

    #[test]
    fn test_clip_display_resizes_and_reorders() {
        let canvas = Canvas::new(8, 8, [10u8, 20, 30]);
        let rect = ViewRect::new(0, 0, 4, 4);
        let clip = clip_display(&canvas, &rect, 6).unwrap();
        assert_eq!(clip.width(), 6);
        assert_eq!(clip.height(), 6);
        assert_eq!(clip.get(0, 0), Some([30, 20, 10]));
    }

    #[test]
    fn test_clip_frame_dispatches_both_layouts() {
        let gray = Frame::Gray(Canvas::new(4, 4, 0u8));
        let color = Frame::Color(Canvas::new(4, 4, [0u8; 3]));
        let rect = ViewRect::new(0, 0, 2, 4);
        let g = clip_frame(&gray, &rect).unwrap();
        let c = clip_frame(&color, &rect).unwrap();
        // rot90 swaps the crop's dimensions.
        assert_eq!((g.width(), g.height()), (4, 2));
        assert_eq!((c.width(), c.height()), (4, 2));
    }
}
