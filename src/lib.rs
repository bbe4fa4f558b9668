//! # pixelx
//!
//! Typed image handles over external decode and resample engines.
//!
//! This crate wraps the `image` decoders and the `fast_image_resize`
//! resampler to provide:
//! - Decoding from memory or file into an owned 8-bit buffer
//! - Metadata probing without decoding pixels
//! - Resizing with selectable filters, preserving the channel layout
//! - Checked, normalized per-pixel access
//!
//! ## Quick Start
//!
//! ```rust
//! use pixelx::{ChannelLayout, Image};
//!
//! // A 1x1 RGBA image
//! let img = Image::from_raw(vec![128, 64, 32, 255], 1, 1, ChannelLayout::Rgba)?;
//!
//! let px = img.pixel_at(0, 0)?;
//! assert!((px.g - 64.0 / 255.0).abs() < 1e-6);
//! assert!(img.pixel_at(1, 0).is_err());
//!
//! let bigger = img.resize(4, 4)?;
//! assert_eq!(bigger.layout(), ChannelLayout::Rgba);
//! # Ok::<(), pixelx::At<pixelx::Error>>(())
//! ```
//!
//! ## Decoding
//!
//! ```rust,no_run
//! use pixelx::{ChannelLayout, DecoderConfig, Image, ImageInfo};
//!
//! let info = ImageInfo::from_path("photo.jpg")?;
//! let img = Image::open_with(
//!     "photo.jpg",
//!     &DecoderConfig::new().desired_channels(ChannelLayout::Rgba),
//! )?;
//! assert_eq!((img.width(), img.height()), (info.width, info.height));
//! # Ok::<(), pixelx::At<pixelx::Error>>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod config;
mod decode;
mod error;
mod handle;
mod resize;
mod types;

// Re-exports
pub use config::{DecoderConfig, DesiredChannels, Filter, ResizeConfig};
pub use decode::{decode, decode_as, Decoder};
pub use error::{DecodingError, Error, Result};
pub use handle::Image;
pub use types::{ChannelLayout, ImageInfo, Pixel, Rgbaf};
pub use whereat::At;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Image>();
        assert_send_sync::<ImageInfo>();
    }
}
