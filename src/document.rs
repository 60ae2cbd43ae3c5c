//! The image document: one decoded, upright pixel buffer and everything
//! derived from it.
//!
//! ## Lifecycle
//!
//! ```text
//! open(path)            decode → read EXIF Orientation → rotate upright
//!   ├─ get(spec)        → new canvas (clone, letterbox or cover)
//!   ├─ save(path, spec) → get + encode + overwrite file
//!   ├─ apply_watermark  → composite a mark onto this buffer in place
//!   └─ destroy / drop   → buffer released exactly once
//! ```
//!
//! A document exclusively owns its buffer. It is not `Clone`; copies are
//! explicit through [`ImageDocument::clone_canvas`] and [`ImageDocument::get`],
//! and those canvases belong to the caller.

use crate::config::ResizeConfig;
use crate::imaging::{
    Codec, Dimensions, Mime, ResizeError, Rotation, RustCodec, TargetSpec, calculate_placement,
    calculate_watermark_placement, operations, resolve_target,
};
use image::RgbaImage;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, ResizeError>;

/// Options for [`ImageDocument::open_with`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Skip the up-front existence check. A tolerated missing file still
    /// cannot be identified and fails with
    /// [`ResizeError::UnsupportedFormat`].
    pub allow_missing: bool,
    pub config: ResizeConfig,
}

/// A decoded image, rotated upright, ready to be resized, watermarked and saved.
pub struct ImageDocument<C: Codec = RustCodec> {
    pixels: RgbaImage,
    mime: Mime,
    codec: C,
    config: ResizeConfig,
}

impl ImageDocument<RustCodec> {
    /// Open an image with the production codec and default config.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(RustCodec::new(), path, &LoadOptions::default())
    }
}

impl<C: Codec> ImageDocument<C> {
    /// Open an image with an explicit codec and options.
    ///
    /// Fails with [`ResizeError::NotFound`] for a missing path (unless
    /// tolerated), [`ResizeError::UnsupportedFormat`] for anything but JPEG,
    /// PNG or GIF, and [`ResizeError::InvalidImage`] for undecodable bytes.
    /// Orientation metadata is best effort: when it cannot be read the image
    /// is kept as decoded.
    pub fn open_with(codec: C, path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        if !options.allow_missing && !path.exists() {
            return Err(ResizeError::NotFound(path.to_path_buf()));
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ResizeError::UnsupportedFormat(format!(
                    "cannot identify {}",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let decoded = codec.decode(&bytes)?;
        let rotation = codec
            .read_orientation(&bytes)
            .map(Rotation::from_orientation)
            .unwrap_or_default();

        let pixels = if rotation == Rotation::Deg0 {
            decoded.pixels
        } else {
            debug!(
                path = %path.display(),
                degrees = rotation.degrees(),
                swaps_axes = rotation.swaps_axes(),
                "Correcting orientation"
            );
            codec.rotate(decoded.pixels, rotation)
        };

        debug!(
            path = %path.display(),
            mime = %decoded.mime,
            width = pixels.width(),
            height = pixels.height(),
            "Opened image"
        );

        Ok(Self {
            pixels,
            mime: decoded.mime,
            codec,
            config: options.config.clone(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::of(&self.pixels)
    }

    /// Format the image was decoded from.
    pub fn mime(&self) -> Mime {
        self.mime
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Whether the buffer holds pixels consistent with its dimensions.
    pub fn is_valid(&self) -> bool {
        let (w, h) = self.pixels.dimensions();
        w > 0 && h > 0 && self.pixels.as_raw().len() == w as usize * h as usize * 4
    }

    /// Release the pixel buffer.
    ///
    /// Consuming `self` makes a second release or any later use a compile
    /// error. Dropping the document has the same effect.
    pub fn destroy(self) {
        debug!(width = self.width(), height = self.height(), "Releasing image");
    }

    /// Unscaled copy of the buffer on a fresh canvas owned by the caller.
    pub fn clone_canvas(&self) -> RgbaImage {
        operations::clone_canvas(&self.pixels)
    }

    /// Derive a canvas per `spec`.
    ///
    /// Without a width or height this is [`clone_canvas`](Self::clone_canvas);
    /// otherwise the image is letterboxed or covered onto a canvas of the
    /// resolved target size.
    pub fn get(&self, spec: &TargetSpec) -> RgbaImage {
        let source = self.dimensions();
        match resolve_target(source, spec.width, spec.height) {
            None => self.clone_canvas(),
            Some(target) => {
                let placement = calculate_placement(source, target, spec.fit());
                operations::resize_to(&self.pixels, &placement, self.config.filter)
            }
        }
    }

    /// Derive a canvas per `spec` and write it to `path`.
    ///
    /// The format is `spec.output_mime` or else the document's own. An
    /// existing file at `path` is removed before writing; the replacement is
    /// not atomic.
    pub fn save(&self, path: impl AsRef<Path>, spec: &TargetSpec) -> Result<()> {
        let path = path.as_ref();
        let mime = spec.output_mime.unwrap_or(self.mime);

        let canvas = self.get(spec);
        let bytes = self.codec.encode(&canvas, mime, self.config.quality())?;
        drop(canvas);

        if path.exists() {
            fs::remove_file(path)?;
        }
        fs::write(path, &bytes)?;

        debug!(
            path = %path.display(),
            mime = %mime,
            bytes = bytes.len(),
            "Saved image"
        );
        Ok(())
    }

    /// Paint the watermark at `path` into the bottom-left corner of this image.
    ///
    /// Returns `Ok(false)` without touching the image when the watermark file
    /// does not exist. The watermark must be a format with transparency (PNG
    /// or GIF). It is shown at a fraction of this image's width, never wider
    /// than its native width; see [`WatermarkConfig`](crate::config::WatermarkConfig).
    pub fn apply_watermark(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "Watermark not found, skipping");
            return Ok(false);
        }

        let bytes = fs::read(path)?;
        let mark = self.codec.decode(&bytes)?;
        if !mark.mime.supports_alpha() {
            return Err(ResizeError::UnsupportedFormat(format!(
                "watermark must be PNG or GIF, got {}",
                mark.mime
            )));
        }

        let watermark = &self.config.watermark;
        let placement = calculate_watermark_placement(
            self.dimensions(),
            mark.dimensions(),
            watermark.margin,
            watermark.width_divisor,
        );
        operations::composite(&mut self.pixels, &mark.pixels, &placement, self.config.filter);
        Ok(true)
    }
}
