//! Image processing: geometry, pixel operations and the codec seam.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` codecs (JPEG, PNG, GIF) |
//! | **EXIF orientation** | `kamadak-exif` |
//! | **Resample** | `image::imageops::resize` (Triangle by default) |
//! | **Paint / composite** | `image::imageops::overlay` (alpha blending) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for placement math (unit testable)
//! - **Parameters**: Data structures describing what to produce
//! - **Codec**: [`Codec`] trait + [`RustCodec`]
//! - **Operations**: Pixel work driven by a computed [`Placement`]

mod calculations;
pub mod codec;
pub mod operations;
mod params;
pub mod rust_codec;

pub use calculations::{
    Placement, Rect, calculate_placement, calculate_watermark_placement, resolve_target,
};
pub use codec::{Codec, Decoded, Dimensions, ResizeError};
pub use params::{Fit, Mime, Quality, ResampleFilter, Rotation, TargetSpec};
pub use rust_codec::RustCodec;
