//! Shared test utilities for the imgresize test suite.
//!
//! Fixtures are generated in memory instead of being checked in, so every
//! test states the exact size, alpha and orientation it depends on.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = write_fixture(tmp.path(), "tilted.jpg", &jpeg_bytes_with_orientation(400, 200, 6));
//! let doc = ImageDocument::open(&path).unwrap();
//! assert_eq!(doc.dimensions(), Dimensions::new(200, 400));
//! ```

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Pixel fixtures
// =========================================================================

/// Opaque gradient, distinct enough to survive lossy encoding.
pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Mid-grey image with a unique color in each corner.
pub fn corner_image(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([128, 128, 128, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(width - 1, 0, Rgba([0, 255, 0, 255]));
    img.put_pixel(0, height - 1, Rgba([0, 0, 255, 255]));
    img.put_pixel(width - 1, height - 1, Rgba([255, 255, 0, 255]));
    img
}

// =========================================================================
// Encoded fixtures
// =========================================================================

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient_rgb(width, height);
    let mut out = Vec::new();
    JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .unwrap();
    out
}

/// Single-frame GIF; pixels with alpha 0 map to the transparent index.
pub fn gif_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .encode(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
            .unwrap();
    }
    out
}

/// Red on the left half, fully transparent on the right half.
pub fn half_transparent(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 0, 0]) }
    })
}

/// JPEG with an APP1 EXIF segment carrying a single `Orientation` entry.
pub fn jpeg_bytes_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let jpeg = jpeg_bytes(width, height);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "encoder did not emit SOI");

    let segment = exif_app1_segment(orientation);
    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Big-endian TIFF block with IFD0 holding one SHORT: tag 0x0112.
fn exif_app1_segment(orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.extend_from_slice(&42u16.to_be_bytes());
    tiff.extend_from_slice(&8u32.to_be_bytes()); // IFD0 offset
    tiff.extend_from_slice(&1u16.to_be_bytes()); // entry count
    tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_be_bytes()); // count
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]); // value padding
    tiff.extend_from_slice(&0u32.to_be_bytes()); // no IFD1

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    segment.extend_from_slice(&payload);
    segment
}

// =========================================================================
// Filesystem
// =========================================================================

/// Write fixture bytes under `dir` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
