//! Parameter types for image operations.
//!
//! These types describe *what* to produce, not *how*. They sit between the
//! [`document`](crate::document) (which decides what to derive from a
//! decoded image) and the [`codec`](super::codec) plus
//! [`operations`](super::operations) (which do the pixel work).
//!
//! ## Types
//!
//! - [`Mime`] — The closed set of formats we read and write (JPEG, PNG, GIF).
//! - [`Quality`] — Lossy encoding quality (1–100). Clamped on construction.
//! - [`Rotation`] — Counterclockwise quarter turn derived from EXIF orientation.
//! - [`Fit`] — Letterbox (fit inside, pad) or cover (fill, crop).
//! - [`ResampleFilter`] — Interpolation used for every scaled paint.
//! - [`TargetSpec`] — Requested output size, fit policy and format override.

use super::codec::ResizeError;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image formats supported for both decoding and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mime {
    Jpeg,
    Png,
    Gif,
}

impl Mime {
    pub fn as_str(self) -> &'static str {
        match self {
            Mime::Jpeg => "image/jpeg",
            Mime::Png => "image/png",
            Mime::Gif => "image/gif",
        }
    }

    /// Map a sniffed `image` format onto the supported set.
    pub fn from_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Mime::Jpeg),
            image::ImageFormat::Png => Some(Mime::Png),
            image::ImageFormat::Gif => Some(Mime::Gif),
            _ => None,
        }
    }

    /// Whether the format can carry per-pixel transparency.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Mime::Jpeg)
    }
}

impl fmt::Display for Mime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mime {
    type Err = ResizeError;

    /// Accepts full mime strings (`image/png`) and bare names (`png`, `jpg`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.strip_prefix("image/").unwrap_or(&name) {
            "jpeg" | "jpg" | "pjpeg" => Ok(Mime::Jpeg),
            "png" => Ok(Mime::Png),
            "gif" => Ok(Mime::Gif),
            _ => Err(ResizeError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Counterclockwise rotation applied to present an image upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation needed for an EXIF `Orientation` value.
    ///
    /// Only the pure rotations are honoured: 3 (upside down), 6 (sensor
    /// turned clockwise, needs 270° counterclockwise) and 8 (needs 90°
    /// counterclockwise). Mirrored variants and unknown values are left alone.
    pub fn from_orientation(tag: u32) -> Self {
        match tag {
            3 => Rotation::Deg180,
            6 => Rotation::Deg270,
            8 => Rotation::Deg90,
            _ => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Quarter turns swap width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// How the source is fitted into a target box of a different aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Scale to fit entirely inside, pad the remainder with transparency.
    Letterbox,
    /// Scale to cover the whole box, crop the overflow.
    Cover,
}

/// Interpolation filter for scaled paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    /// Bilinear; the default smooth resample.
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Requested output for [`ImageDocument::get`](crate::ImageDocument::get)
/// and [`ImageDocument::save`](crate::ImageDocument::save).
///
/// With only one of `width`/`height` set, the other follows the source
/// aspect ratio. With neither set, the result is an unscaled clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `true` letterboxes, `false` covers and crops.
    pub extend: bool,
    /// Encoding format for saves; defaults to the document's own format.
    pub output_mime: Option<Mime>,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            extend: true,
            output_mime: None,
        }
    }
}

impl TargetSpec {
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn height(height: u32) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Switch to cover-and-crop instead of letterboxing.
    pub fn cover(mut self) -> Self {
        self.extend = false;
        self
    }

    pub fn with_output(mut self, mime: Mime) -> Self {
        self.output_mime = Some(mime);
        self
    }

    pub fn fit(&self) -> Fit {
        if self.extend { Fit::Letterbox } else { Fit::Cover }
    }
}
