//! Production codec built on the `image` crate ecosystem.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `image::ImageReader::with_guessed_format` (magic bytes) |
//! | Decode (JPEG, PNG, GIF) | `image` crate decoders, first frame only |
//! | EXIF orientation | `kamadak-exif` (`exif::Reader::read_from_container`) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder`, alpha dropped |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, RGBA |
//! | Encode → GIF | `image::codecs::gif::GifEncoder`, quantized RGBA |
//! | Rotate | `image::imageops::rotate90` / `rotate180` / `rotate270` |

use super::codec::{Codec, Decoded, ResizeError};
use super::params::{Mime, Quality, Rotation};
use image::buffer::ConvertBuffer;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader, RgbImage, RgbaImage, imageops};
use std::io::Cursor;
use tracing::trace;

/// Codec backed by the pure-Rust `image` decoders and encoders.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for RustCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Decoded, ResizeError> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let format = reader.format();
        let mime = format.and_then(Mime::from_format).ok_or_else(|| {
            ResizeError::UnsupportedFormat(match format {
                Some(f) => format!("{f:?}"),
                None => "unrecognized data".to_string(),
            })
        })?;

        let img = reader
            .decode()
            .map_err(|e| ResizeError::InvalidImage(format!("Failed to decode {mime}: {e}")))?;
        if img.width() == 0 || img.height() == 0 {
            return Err(ResizeError::InvalidImage(format!("Empty {mime} image")));
        }

        Ok(Decoded {
            pixels: img.into_rgba8(),
            mime,
        })
    }

    fn read_orientation(&self, bytes: &[u8]) -> Option<u32> {
        let mut cursor = Cursor::new(bytes);
        let exif = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => exif,
            Err(e) => {
                trace!(error = %e, "No readable EXIF data");
                return None;
            }
        };

        exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
    }

    fn encode(
        &self,
        pixels: &RgbaImage,
        mime: Mime,
        quality: Quality,
    ) -> Result<Vec<u8>, ResizeError> {
        let (width, height) = pixels.dimensions();
        let mut out = Vec::new();

        let result = match mime {
            Mime::Jpeg => {
                // JPEG has no alpha channel; transparent areas keep their RGB value.
                let rgb: RgbImage = pixels.convert();
                JpegEncoder::new_with_quality(&mut out, quality.value() as u8).write_image(
                    rgb.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )
            }
            Mime::Png => PngEncoder::new(&mut out).write_image(
                pixels.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            ),
            Mime::Gif => {
                let mut encoder = GifEncoder::new(&mut out);
                encoder.encode(pixels.as_raw(), width, height, ExtendedColorType::Rgba8)
            }
        };

        result.map_err(|e| ResizeError::Encode(format!("{mime} encode failed: {e}")))?;
        Ok(out)
    }

    fn rotate(&self, pixels: RgbaImage, rotation: Rotation) -> RgbaImage {
        // imageops rotates clockwise.
        match rotation {
            Rotation::Deg0 => pixels,
            Rotation::Deg90 => imageops::rotate270(&pixels),
            Rotation::Deg180 => imageops::rotate180(&pixels),
            Rotation::Deg270 => imageops::rotate90(&pixels),
        }
    }
}
