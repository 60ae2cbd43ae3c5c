//! Pixel operations: clone, resize onto a canvas, composite.
//!
//! These functions take a [`Placement`] from the
//! [`calculations`](super::calculations) module and do the pixel work. They
//! never touch the filesystem and never fail: buffers are allocated up front
//! and every paint is clipped to the destination.

use super::calculations::{Placement, Rect};
use super::codec::Dimensions;
use super::params::ResampleFilter;
use image::{Rgba, RgbaImage, imageops};
use tracing::debug;

/// Fully transparent black, the fill for every fresh canvas.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Copy `source` into a fresh canvas of the same size.
///
/// The copy replaces pixels instead of blending them, so alpha survives
/// exactly. The result never shares storage with `source`.
pub fn clone_canvas(source: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(source.width(), source.height(), TRANSPARENT);
    imageops::replace(&mut canvas, source, 0, 0);
    canvas
}

/// Resample `source` onto a new transparent canvas at `placement`.
///
/// Only `placement.source` is resampled, straight to the visible part of the
/// blit, and painted with alpha blending. The resampled buffer is never
/// larger than the canvas. Whatever the blit does not reach stays transparent.
pub fn resize_to(source: &RgbaImage, placement: &Placement, filter: ResampleFilter) -> RgbaImage {
    let window = placement.visible();
    let crop = placement.source;
    debug!(
        src_w = source.width(),
        src_h = source.height(),
        canvas_w = placement.canvas.width,
        canvas_h = placement.canvas.height,
        crop_x = crop.x,
        crop_y = crop.y,
        crop_w = crop.width,
        crop_h = crop.height,
        dest_x = window.x,
        dest_y = window.y,
        dest_w = window.width,
        dest_h = window.height,
        "Resampling onto canvas"
    );

    let mut canvas = RgbaImage::from_pixel(
        placement.canvas.width,
        placement.canvas.height,
        TRANSPARENT,
    );
    if window.width == 0 || window.height == 0 {
        return canvas;
    }

    let scaled = if crop == Rect::full(Dimensions::of(source)) {
        resample(source, window.width, window.height, filter)
    } else {
        let cropped =
            imageops::crop_imm(source, crop.x, crop.y, crop.width, crop.height).to_image();
        resample(&cropped, window.width, window.height, filter)
    };
    imageops::overlay(&mut canvas, &scaled, window.x as i64, window.y as i64);
    canvas
}

/// Scale `overlay` to `placement.blit` and alpha-blend it onto `base` in place.
pub fn composite(
    base: &mut RgbaImage,
    overlay: &RgbaImage,
    placement: &Placement,
    filter: ResampleFilter,
) {
    debug!(
        w = placement.blit.width,
        h = placement.blit.height,
        x = placement.x,
        y = placement.y,
        "Compositing overlay"
    );
    let scaled = resample(overlay, placement.blit.width, placement.blit.height, filter);
    imageops::overlay(base, &scaled, placement.x, placement.y);
}

fn resample(source: &RgbaImage, w: u32, h: u32, filter: ResampleFilter) -> RgbaImage {
    if source.dimensions() == (w, h) {
        return source.clone();
    }
    imageops::resize(source, w, h, filter.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::calculations::{calculate_placement, calculate_watermark_placement};
    use crate::imaging::{Dimensions, Fit};
    use crate::test_helpers::corner_image;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn solid(w: u32, h: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(w, h, color)
    }

    fn row_is_transparent(img: &RgbaImage, y: u32) -> bool {
        (0..img.width()).all(|x| img.get_pixel(x, y)[3] == 0)
    }

    #[test]
    fn clone_is_pixel_identical() {
        let mut src = corner_image(6, 4);
        src.put_pixel(2, 2, Rgba([9, 9, 9, 0]));
        src.put_pixel(3, 2, Rgba([50, 60, 70, 128]));

        let copy = clone_canvas(&src);
        assert_eq!(copy, src);
    }

    #[test]
    fn clone_does_not_alias_source() {
        let src = solid(3, 3, RED);
        let mut copy = clone_canvas(&src);
        copy.put_pixel(1, 1, BLUE);
        assert_eq!(src.get_pixel(1, 1), &RED);
    }

    #[test]
    fn letterbox_leaves_transparent_bands() {
        // 400x200 into 100x100: content rows 25..75
        let src = solid(400, 200, RED);
        let placement =
            calculate_placement(Dimensions::of(&src), Dimensions::new(100, 100), Fit::Letterbox);

        let out = resize_to(&src, &placement, ResampleFilter::Triangle);
        assert_eq!(out.dimensions(), (100, 100));
        for y in (0..25).chain(75..100) {
            assert!(row_is_transparent(&out, y), "row {y} should be transparent");
        }
        for y in 25..75 {
            for x in 0..100 {
                assert_eq!(out.get_pixel(x, y), &RED, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn cover_leaves_no_transparent_pixels() {
        let src = solid(400, 200, BLUE);
        let placement =
            calculate_placement(Dimensions::of(&src), Dimensions::new(100, 100), Fit::Cover);

        let out = resize_to(&src, &placement, ResampleFilter::Triangle);
        assert_eq!(out.dimensions(), (100, 100));
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn cover_crops_symmetrically() {
        // Left third red, middle blue, right third red; cover to a square keeps the middle.
        let src = RgbaImage::from_fn(300, 100, |x, _| if (100..200).contains(&x) { BLUE } else { RED });
        let placement =
            calculate_placement(Dimensions::of(&src), Dimensions::new(100, 100), Fit::Cover);
        assert_eq!((placement.x, placement.y), (-100, 0));

        let out = resize_to(&src, &placement, ResampleFilter::Nearest);
        assert_eq!(out.get_pixel(0, 50), &BLUE);
        assert_eq!(out.get_pixel(99, 50), &BLUE);
    }

    #[test]
    fn cover_long_strip_resamples_only_the_visible_window() {
        // Red strip with a blue 10px square in the middle; cover to 500x500
        // shows just that square.
        let src = RgbaImage::from_fn(10000, 10, |x, _| {
            if (4995..5005).contains(&x) { BLUE } else { RED }
        });
        let placement =
            calculate_placement(Dimensions::of(&src), Dimensions::new(500, 500), Fit::Cover);

        let out = resize_to(&src, &placement, ResampleFilter::Nearest);
        assert_eq!(out.dimensions(), (500, 500));
        assert!(out.pixels().all(|p| *p == BLUE));
    }

    #[test]
    fn cover_tall_source_keeps_vertical_middle() {
        let src = RgbaImage::from_fn(50, 150, |_, y| if (50..100).contains(&y) { BLUE } else { RED });
        let placement =
            calculate_placement(Dimensions::of(&src), Dimensions::new(20, 20), Fit::Cover);

        let out = resize_to(&src, &placement, ResampleFilter::Nearest);
        assert_eq!(out.dimensions(), (20, 20));
        assert!(out.pixels().all(|p| *p == BLUE));
    }

    #[test]
    fn resize_is_deterministic() {
        let src = corner_image(37, 23);
        let placement =
            calculate_placement(Dimensions::of(&src), Dimensions::new(20, 20), Fit::Letterbox);
        let a = resize_to(&src, &placement, ResampleFilter::Triangle);
        let b = resize_to(&src, &placement, ResampleFilter::Triangle);
        assert_eq!(a, b);
    }

    #[test]
    fn resize_keeps_source_transparency() {
        let src = solid(10, 10, Rgba([0, 255, 0, 0]));
        let placement =
            calculate_placement(Dimensions::of(&src), Dimensions::new(5, 5), Fit::Letterbox);
        let out = resize_to(&src, &placement, ResampleFilter::Triangle);
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn composite_paints_bottom_left() {
        let mut base = solid(100, 60, RED);
        let mark = solid(40, 20, BLUE);
        let placement =
            calculate_watermark_placement(Dimensions::of(&base), Dimensions::of(&mark), 10, 4);
        // 100/4 = 25 wide, 25*20/40 = 12.5 → 13 tall, y = 60 - 13 - 10 = 37
        assert_eq!(placement.blit, Dimensions::new(25, 13));
        assert_eq!(placement.y, 37);

        composite(&mut base, &mark, &placement, ResampleFilter::Triangle);
        assert_eq!(base.get_pixel(10, 37), &BLUE);
        assert_eq!(base.get_pixel(34, 49), &BLUE);
        assert_eq!(base.get_pixel(9, 37), &RED);
        assert_eq!(base.get_pixel(35, 49), &RED);
        assert_eq!(base.get_pixel(10, 50), &RED);
    }

    #[test]
    fn composite_blends_transparent_overlay() {
        let mut base = solid(40, 40, RED);
        let mark = solid(10, 10, Rgba([0, 0, 255, 0]));
        let placement =
            calculate_watermark_placement(Dimensions::of(&base), Dimensions::of(&mark), 10, 4);

        composite(&mut base, &mark, &placement, ResampleFilter::Triangle);
        assert!(base.pixels().all(|p| *p == RED));
    }
}
