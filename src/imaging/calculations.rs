//! Pure calculation functions for output geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! ## Rounding
//!
//! Ratios are computed in `f64`. Every size and offset is then rounded half
//! away from zero (`f64::round`), and sizes are clamped to at least one
//! pixel. The same rule applies to target resolution, blit sizes, centering
//! offsets and watermark placement.

use super::codec::Dimensions;
use super::params::Fit;

/// An axis-aligned pixel rectangle with a non-negative origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of an image of size `dims`.
    pub fn full(dims: Dimensions) -> Self {
        Self::new(0, 0, dims.width, dims.height)
    }
}

/// Where a scaled source lands on an output canvas.
///
/// `blit`, `x` and `y` describe the full scaled source. Offsets are signed:
/// in [`Fit::Cover`] the blit overflows the canvas. `source` is the part of
/// the source image that stays visible, so only that window is resampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Output canvas size.
    pub canvas: Dimensions,
    /// Size the whole source would be resampled to.
    pub blit: Dimensions,
    /// Top-left corner of the blit on the canvas.
    pub x: i64,
    pub y: i64,
    /// Source pixels that end up inside the canvas.
    pub source: Rect,
}

impl Placement {
    /// The part of the blit that lands on the canvas, in canvas coordinates.
    ///
    /// Empty (zero width or height) when the blit misses the canvas entirely.
    pub fn visible(&self) -> Rect {
        visible_window(self.canvas, self.blit, self.x, self.y)
    }
}

fn visible_window(canvas: Dimensions, blit: Dimensions, x: i64, y: i64) -> Rect {
    let (x0, x1) = clip_span(x, blit.width, canvas.width);
    let (y0, y1) = clip_span(y, blit.height, canvas.height);
    Rect::new(x0, y0, x1 - x0, y1 - y0)
}

/// Clip `[start, start + len)` to `[0, limit)`.
fn clip_span(start: i64, len: u32, limit: u32) -> (u32, u32) {
    let lo = start.clamp(0, limit as i64);
    let hi = (start + len as i64).clamp(lo, limit as i64);
    (lo as u32, hi as u32)
}

/// Map a visible window of the blit back onto source pixels along one axis.
///
/// `offset` is where the window starts inside the blit. The result stays
/// within `[0, src_len)` and is at least one pixel long.
fn source_span(offset: u32, len: u32, blit_len: u32, src_len: u32) -> (u32, u32) {
    let scale = src_len as f64 / blit_len as f64;
    let start = (round_offset(offset as f64 * scale).max(0) as u32).min(src_len - 1);
    let span = round_size(len as f64 * scale).min(src_len - start);
    (start, span)
}

fn source_window(source: Dimensions, blit: Dimensions, x: i64, y: i64, visible: Rect) -> Rect {
    let (sx, sw) = source_span(
        (visible.x as i64 - x) as u32,
        visible.width,
        blit.width,
        source.width,
    );
    let (sy, sh) = source_span(
        (visible.y as i64 - y) as u32,
        visible.height,
        blit.height,
        source.height,
    );
    Rect::new(sx, sy, sw, sh)
}

fn round_size(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

fn round_offset(value: f64) -> i64 {
    value.round() as i64
}

/// Resolve a requested size against the source aspect ratio.
///
/// A single given dimension derives the other from the source ratio.
/// Returns `None` when neither is given (unscaled clone).
///
/// # Examples
/// ```
/// # use imgresize::imaging::{Dimensions, resolve_target};
/// let src = Dimensions::new(400, 200);
/// assert_eq!(resolve_target(src, Some(100), None), Some(Dimensions::new(100, 50)));
/// assert_eq!(resolve_target(src, None, Some(100)), Some(Dimensions::new(200, 100)));
/// assert_eq!(resolve_target(src, None, None), None);
/// ```
pub fn resolve_target(
    source: Dimensions,
    width: Option<u32>,
    height: Option<u32>,
) -> Option<Dimensions> {
    let src_w = source.width as f64;
    let src_h = source.height as f64;

    let (w, h) = match (width, height) {
        (None, None) => return None,
        (Some(w), Some(h)) => (w.max(1), h.max(1)),
        (Some(w), None) => (w.max(1), round_size(w as f64 * src_h / src_w)),
        (None, Some(h)) => (round_size(h as f64 * src_w / src_h), h.max(1)),
    };

    Some(Dimensions::new(w, h))
}

/// Compute where the source goes on a `target`-sized canvas.
///
/// Both policies compare the source ratio `w/h` against the target ratio
/// `ww/hh` and center the blit on the free axis. They pick opposite scale
/// factors for the same comparison:
///
/// - [`Fit::Letterbox`] takes the smaller scale so nothing overflows. A
///   relatively narrower source fills the height and is padded left/right;
///   otherwise it fills the width and is padded top/bottom.
/// - [`Fit::Cover`] takes the larger scale so nothing is left uncovered. A
///   relatively narrower source fills the width and is cropped top/bottom;
///   otherwise it fills the height and is cropped left/right.
///
/// For cover the canvas window is mapped back into source coordinates with
/// the same rounding, giving [`Placement::source`]. Letterbox keeps the
/// whole source.
pub fn calculate_placement(source: Dimensions, target: Dimensions, fit: Fit) -> Placement {
    let (w, h) = (source.width as f64, source.height as f64);
    let (ww, hh) = (target.width as f64, target.height as f64);

    let ratio = w / h;
    let right_ratio = ww / hh;

    let (blit, x, y) = match fit {
        Fit::Letterbox => {
            if ratio < right_ratio {
                let new_width = round_size(w * hh / h);
                let x = round_offset((ww - new_width as f64) / 2.0);
                (Dimensions::new(new_width, target.height), x, 0)
            } else {
                let new_height = round_size(h * ww / w);
                let y = round_offset((hh - new_height as f64) / 2.0);
                (Dimensions::new(target.width, new_height), 0, y)
            }
        }
        Fit::Cover => {
            if ratio < right_ratio {
                let new_height = round_size(h * ww / w);
                let y = round_offset((hh - new_height as f64) / 2.0);
                (Dimensions::new(target.width, new_height), 0, y)
            } else {
                let new_width = round_size(w * hh / h);
                let x = round_offset((ww - new_width as f64) / 2.0);
                (Dimensions::new(new_width, target.height), x, 0)
            }
        }
    };

    let crop = match fit {
        Fit::Letterbox => Rect::full(source),
        Fit::Cover => source_window(source, blit, x, y, visible_window(target, blit, x, y)),
    };

    Placement {
        canvas: target,
        blit,
        x,
        y,
        source: crop,
    }
}

/// Compute the watermark rectangle on a base image.
///
/// The mark is shown at `base.width / width_divisor`, never wider than its
/// native width, with height following the mark's ratio. It is anchored
/// `margin` pixels from the left edge and `margin` pixels above the bottom
/// edge.
pub fn calculate_watermark_placement(
    base: Dimensions,
    mark: Dimensions,
    margin: u32,
    width_divisor: u32,
) -> Placement {
    let native_w = mark.width as f64;
    let width = (base.width as f64 / width_divisor.max(1) as f64).min(native_w);
    let width = round_size(width);
    let height = round_size(width as f64 * mark.height as f64 / native_w);

    Placement {
        canvas: base,
        blit: Dimensions::new(width, height),
        x: margin as i64,
        y: base.height as i64 - height as i64 - margin as i64,
        source: Rect::full(mark),
    }
}
