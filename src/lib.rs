//! # imgresize
//!
//! Orientation-aware resizing, letterboxing, cropping and watermarking for
//! JPEG, PNG and GIF images.
//!
//! # Lifecycle: Decode → Orient → Transform → Encode
//!
//! ```text
//! 1. Open       path   →  ImageDocument   (decode + EXIF orientation fix)
//! 2. Transform  doc    →  RgbaImage       (clone, letterbox, cover, watermark)
//! 3. Save       canvas →  file            (JPEG / PNG / GIF, overwrites)
//! ```
//!
//! ```no_run
//! use imgresize::{ImageDocument, TargetSpec};
//!
//! let mut doc = ImageDocument::open("photo.jpg")?;
//! doc.apply_watermark("mark.png")?;
//! doc.save("thumb.png", &TargetSpec::size(200, 200).cover())?;
//! doc.save("preview.jpg", &TargetSpec::width(800))?;
//! # Ok::<(), imgresize::ResizeError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`document`] | [`ImageDocument`]: open, get, save, watermark, release |
//! | [`imaging`] | Placement math, pixel operations, the [`Codec`](imaging::Codec) seam |
//! | [`config`] | `imgresize.toml` loading, merging over stock defaults, validation |
//!
//! # Design Decisions
//!
//! ## Two Fit Policies, Two Branches
//!
//! Letterbox (`extend = true`, the default) picks the *smaller* scale so the
//! whole image fits and pads with transparency. Cover (`extend = false`)
//! picks the *larger* scale so the target is filled and crops the overflow.
//! Both compare the same two ratios and land on opposite axes; see
//! [`imaging::calculate_placement`].
//!
//! ## Alpha Everywhere
//!
//! Every decoded image becomes RGBA8 and every canvas starts fully
//! transparent. Formats with alpha (PNG, GIF) keep it on save; JPEG drops it.
//!
//! ## Ownership Instead of Manual Release
//!
//! A document owns its buffer and is not `Clone`. Canvases returned by
//! [`ImageDocument::get`] belong to the caller. Release happens exactly once,
//! on [`ImageDocument::destroy`] or drop.

pub mod config;
pub mod document;
pub mod imaging;

pub use config::{ConfigError, ResizeConfig, WatermarkConfig};
pub use document::{ImageDocument, LoadOptions};
pub use imaging::{Dimensions, Fit, Mime, ResizeError, TargetSpec};

#[cfg(test)]
pub(crate) mod test_helpers;
