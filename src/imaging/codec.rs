//! Codec trait and shared types.
//!
//! The [`Codec`] trait is the seam between pixel work and byte formats. It
//! defines the four operations every codec must support: decode,
//! read_orientation, encode, and rotate.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec) built on the `image` and
//! `kamadak-exif` crates.

use super::params::{Mime, Quality, Rotation};
use image::RgbaImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(pixels: &RgbaImage) -> Self {
        Self::new(pixels.width(), pixels.height())
    }
}

/// A decoded image: an RGBA buffer plus the format it was read from.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub pixels: RgbaImage,
    pub mime: Mime,
}

impl Decoded {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::of(&self.pixels)
    }
}

/// Byte-level image codec.
///
/// `Send + Sync` so documents can be handed to worker threads.
pub trait Codec: Send + Sync {
    /// Sniff the format from content and decode to RGBA.
    ///
    /// Formats outside [`Mime`] fail with [`ResizeError::UnsupportedFormat`];
    /// bytes that do not yield a non-empty buffer fail with
    /// [`ResizeError::InvalidImage`].
    fn decode(&self, bytes: &[u8]) -> Result<Decoded, ResizeError>;

    /// EXIF `Orientation` value, if one can be read. Never fails.
    fn read_orientation(&self, bytes: &[u8]) -> Option<u32>;

    /// Encode a buffer in the given format.
    fn encode(&self, pixels: &RgbaImage, mime: Mime, quality: Quality)
    -> Result<Vec<u8>, ResizeError>;

    /// Rotate counterclockwise by the given quarter turns.
    fn rotate(&self, pixels: RgbaImage, rotation: Rotation) -> RgbaImage;
}
