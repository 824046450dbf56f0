//! Raster buffers and pixel-exact drawing.
//!
//! `Canvas` is a plain row-major pixel buffer. All fills are hard-edged:
//! a pixel either receives exactly the requested color or is untouched.
//! No anti-aliasing and no blending anywhere: the feature decoder
//! inverts the rasterizer by exact color equality and any smoothing would
//! corrupt every mask.
//!
//! The geometric transforms (`crop`, `mirror_h`, `rot90`) move pixels
//! without resampling; `resize_nearest` and `swap_rb` exist only for the
//! colorful display path, where exact-color decoding is not required
//! downstream.

use crate::error::{RenderError, Result};
use crate::world::Vec2;

use super::window::ViewRect;

/// Single-channel pixel.
pub type Gray = u8;
/// Three-channel pixel, RGB order unless a transform says otherwise.
pub type Rgb = [u8; 3];

// =============================================================================
// Canvas
// =============================================================================

/// Row-major `width × height` pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas<P> {
    width: usize,
    height: usize,
    data: Vec<P>,
}

impl<P: Copy + PartialEq> Canvas<P> {
    pub fn new(width: usize, height: usize, fill: P) -> Self {
        Self { width, height, data: vec![fill; width * height] }
    }

    /// Wrap an existing buffer, rejecting length/shape mismatches.
    pub fn from_raw(width: usize, height: usize, data: Vec<P>) -> Result<Self> {
        let expected = width * height;
        if data.len() != expected {
            return Err(RenderError::UnsupportedBufferShape { expected, found: data.len() });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<P> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Write one pixel; out-of-bounds writes are clipped silently, the
    /// same way entities partially outside the arena are drawn clipped.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: P) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    pub fn pixels(&self) -> &[P] {
        &self.data
    }

    /// Filled circle. A pixel is inside iff its integer coordinate is
    /// within `radius` of the center.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: P) {
        if radius <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let x0 = (center.x - radius).floor().max(0.0) as usize;
        let y0 = (center.y - radius).floor().max(0.0) as usize;
        let x1f = (center.x + radius).ceil();
        let y1f = (center.y + radius).ceil();
        if x1f < 0.0 || y1f < 0.0 {
            return;
        }
        let x1 = (x1f as usize).min(self.width - 1);
        let y1 = (y1f as usize).min(self.height - 1);
        let r2 = radius * radius;
        for py in y0..=y1 {
            let dy = py as f32 - center.y;
            for px in x0..=x1 {
                let dx = px as f32 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.data[py * self.width + px] = color;
                }
            }
        }
    }

    /// Filled polygon via even-odd scanline. Vertices wrap implicitly.
    pub fn fill_polygon(&mut self, vertices: &[Vec2], color: P) {
        if vertices.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }
        let min_y = vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
        let max_y = vertices.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max);
        if max_y < 0.0 {
            return;
        }
        let y0 = min_y.floor().max(0.0) as usize;
        let y1 = (max_y.ceil() as usize).min(self.height - 1);
        let mut crossings: Vec<f32> = Vec::with_capacity(vertices.len());
        for py in y0..=y1 {
            let sy = py as f32;
            crossings.clear();
            for i in 0..vertices.len() {
                let a = vertices[i];
                let b = vertices[(i + 1) % vertices.len()];
                if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                    let t = (sy - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                if pair[1] < 0.0 || pair[0] > (self.width - 1) as f32 {
                    continue;
                }
                let xa = pair[0].ceil().max(0.0) as usize;
                let xb = (pair[1].floor().max(0.0) as usize).min(self.width - 1);
                if xa > xb {
                    continue;
                }
                for px in xa..=xb {
                    self.data[py * self.width + px] = color;
                }
            }
        }
    }

    /// Axis-aligned filled rectangle over `[x0,x1) × [y0,y1)`, clipped.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: P) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.data[py * self.width + px] = color;
            }
        }
    }

    /// Extract the sub-buffer inside `rect`.
    ///
    /// A degenerate or out-of-range rect is an internal invariant
    /// violation (window clamping should make it impossible) and is
    /// surfaced loudly instead of being clamped further.
    pub fn crop(&self, rect: &ViewRect) -> Result<Canvas<P>> {
        rect.validate()?;
        if rect.right > self.width || rect.bottom > self.height {
            return Err(RenderError::WindowOutOfBounds {
                left: rect.left,
                top: rect.top,
                right: rect.right,
                bottom: rect.bottom,
                width: self.width,
                height: self.height,
            });
        }
        let mut data = Vec::with_capacity(rect.width() * rect.height());
        for y in rect.top..rect.bottom {
            data.extend_from_slice(&self.data[y * self.width + rect.left..y * self.width + rect.right]);
        }
        Ok(Canvas { width: rect.width(), height: rect.height(), data })
    }

    /// Horizontal mirror (flip left-right). Exact pixel moves.
    pub fn mirror_h(&self) -> Canvas<P> {
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            for x in 0..self.width {
                data.push(self.data[y * self.width + (self.width - 1 - x)]);
            }
        }
        Canvas { width: self.width, height: self.height, data }
    }

    /// 90° counterclockwise rotation. Output is `height × width`.
    pub fn rot90(&self) -> Canvas<P> {
        let (w, h) = (self.width, self.height);
        let mut data = Vec::with_capacity(self.data.len());
        for y_new in 0..w {
            for x_new in 0..h {
                data.push(self.data[x_new * w + (w - 1 - y_new)]);
            }
        }
        Canvas { width: h, height: w, data }
    }
}

impl Canvas<Rgb> {
    /// Nearest-neighbor resize. Display path only: the feature path never
    /// resamples, because decoded masks require exact pixel survival.
    pub fn resize_nearest(&self, width: usize, height: usize) -> Canvas<Rgb> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = y * self.height / height;
            for x in 0..width {
                let sx = x * self.width / width;
                data.push(self.data[sy * self.width + sx]);
            }
        }
        Canvas { width, height, data }
    }

    /// Reorder channels RGB→BGR for display consumers.
    pub fn swap_rb(&self) -> Canvas<Rgb> {
        let data = self.data.iter().map(|&[r, g, b]| [b, g, r]).collect();
        Canvas { width: self.width, height: self.height, data }
    }
}

// =============================================================================
// Frame: single- vs. three-channel rasters behind one type
// =============================================================================

/// A raster of either channel layout. The cropper accepts both; the
/// feature decoder accepts only the single-channel variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Gray(Canvas<Gray>),
    Color(Canvas<Rgb>),
}

impl Frame {
    pub fn width(&self) -> usize {
        match self {
            Frame::Gray(c) => c.width(),
            Frame::Color(c) => c.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Frame::Gray(c) => c.height(),
            Frame::Color(c) => c.height(),
        }
    }

    /// Channel count: 1 for grayscale, 3 for color.
    pub fn channels(&self) -> usize {
        match self {
            Frame::Gray(_) => 1,
            Frame::Color(_) => 3,
        }
    }

    /// Crop the sub-raster inside `rect`, whichever layout this is.
    pub fn crop(&self, rect: &ViewRect) -> Result<Frame> {
        match self {
            Frame::Gray(c) => Ok(Frame::Gray(c.crop(rect)?)),
            Frame::Color(c) => Ok(Frame::Color(c.crop(rect)?)),
        }
    }

    /// The single-channel canvas, or the decoder-precondition error that
    /// signals a caller bug (feature decoding invoked on a color frame).
    pub fn expect_gray(&self) -> Result<&Canvas<Gray>> {
        match self {
            Frame::Gray(c) => Ok(c),
            Frame::Color(_) => Err(RenderError::DecoderPrecondition),
        }
    }
}
