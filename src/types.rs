//! Core types for image data representation.

use crate::decode;
use crate::error::{Error, Result};
use rgb::{FromSlice, RGB8, RGBA, RGBA8};
use std::path::Path;
use whereat::*;

/// A pixel with four normalized components in `[0, 1]`.
pub type Rgbaf = RGBA<f32>;

/// Channel layout of a decoded buffer.
///
/// The discriminant is the number of interleaved 8-bit samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelLayout {
    /// One luminance sample.
    Grey = 1,
    /// Luminance followed by alpha.
    GreyAlpha = 2,
    /// Red, green, blue.
    Rgb = 3,
    /// Red, green, blue, alpha.
    Rgba = 4,
}

impl ChannelLayout {
    /// Layout for a channel count, or `None` outside `1..=4`.
    #[must_use]
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Grey),
            2 => Some(ChannelLayout::GreyAlpha),
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }

    /// Bytes per pixel for this layout.
    #[must_use]
    pub const fn channels(self) -> usize {
        self as usize
    }

    /// Whether this layout has an alpha channel.
    #[must_use]
    pub const fn has_alpha(self) -> bool {
        matches!(self, ChannelLayout::GreyAlpha | ChannelLayout::Rgba)
    }

    /// Normalize one pixel's worth of samples.
    ///
    /// `px` must hold at least `self.channels()` bytes.
    #[inline]
    pub(crate) fn normalize(self, px: &[u8]) -> Rgbaf {
        let unit = |v: u8| f32::from(v) / 255.0;
        match self {
            ChannelLayout::Grey => {
                let v = unit(px[0]);
                RGBA::new(v, v, v, 1.0)
            }
            ChannelLayout::GreyAlpha => {
                let v = unit(px[0]);
                RGBA::new(v, v, v, unit(px[1]))
            }
            ChannelLayout::Rgb => RGBA::new(unit(px[0]), unit(px[1]), unit(px[2]), 1.0),
            ChannelLayout::Rgba => {
                RGBA::new(unit(px[0]), unit(px[1]), unit(px[2]), unit(px[3]))
            }
        }
    }
}

/// Image metadata obtained without decoding pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout the source encodes.
    pub layout: ChannelLayout,
}

impl ImageInfo {
    /// Probe encoded image data for its dimensions and channel layout.
    ///
    /// Only the header is parsed; no pixel buffer is allocated.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let png: &[u8] = &[0u8; 100]; // placeholder
    /// let info = pixelx::ImageInfo::from_memory(png)?;
    /// println!("{}x{} {:?}", info.width, info.height, info.layout);
    /// # Ok::<(), pixelx::At<pixelx::Error>>(())
    /// ```
    pub fn from_memory(data: &[u8]) -> Result<Self> {
        decode::memory_reader(data)
            .and_then(decode::probe_reader)
            .map_err(|e| at!(Error::ProbeFailed(e)))
    }

    /// Probe an image file for its dimensions and channel layout.
    ///
    /// A file that cannot be opened is reported as a probe failure.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        decode::file_reader(path.as_ref())
            .and_then(decode::probe_reader)
            .map_err(|e| at!(Error::ProbeFailed(e)))
    }

    /// Size in bytes of the decoded 8-bit buffer.
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * self.layout.channels()
    }
}

/// Marker trait for pixel types usable as typed views of an [`Image`](crate::Image).
///
/// # Implemented Types
///
/// - [`RGB8`] - 3-channel RGB
/// - [`RGBA8`] - 4-channel RGBA
pub trait Pixel: Copy + 'static + private::Sealed {
    /// The channel layout corresponding to this type.
    const LAYOUT: ChannelLayout;

    /// Reinterpret interleaved samples as pixels.
    #[doc(hidden)]
    fn cast(bytes: &[u8]) -> &[Self];

    /// Pixels back to interleaved samples.
    #[doc(hidden)]
    fn extend_bytes(pixels: &[Self], out: &mut Vec<u8>);
}

impl Pixel for RGBA8 {
    const LAYOUT: ChannelLayout = ChannelLayout::Rgba;

    fn cast(bytes: &[u8]) -> &[Self] {
        bytes.as_rgba()
    }

    fn extend_bytes(pixels: &[Self], out: &mut Vec<u8>) {
        out.extend(pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]));
    }
}

impl Pixel for RGB8 {
    const LAYOUT: ChannelLayout = ChannelLayout::Rgb;

    fn cast(bytes: &[u8]) -> &[Self] {
        bytes.as_rgb()
    }

    fn extend_bytes(pixels: &[Self], out: &mut Vec<u8>) {
        out.extend(pixels.iter().flat_map(|p| [p.r, p.g, p.b]));
    }
}

mod private {
    use super::*;

    pub trait Sealed {}
    impl Sealed for RGBA8 {}
    impl Sealed for RGB8 {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count() {
        assert_eq!(ChannelLayout::from_count(0), None);
        assert_eq!(ChannelLayout::from_count(1), Some(ChannelLayout::Grey));
        assert_eq!(ChannelLayout::from_count(4), Some(ChannelLayout::Rgba));
        assert_eq!(ChannelLayout::from_count(5), None);
    }

    #[test]
    fn test_channels_and_alpha() {
        assert_eq!(ChannelLayout::GreyAlpha.channels(), 2);
        assert_eq!(ChannelLayout::Rgb.channels(), 3);
        assert!(ChannelLayout::GreyAlpha.has_alpha());
        assert!(!ChannelLayout::Rgb.has_alpha());
    }

    #[test]
    fn test_normalize_grey_alpha() {
        let px = ChannelLayout::GreyAlpha.normalize(&[255, 0]);
        assert_eq!(px, RGBA::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_normalize_rgb_is_opaque() {
        let px = ChannelLayout::Rgb.normalize(&[0, 255, 0]);
        assert_eq!(px, RGBA::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_buffer_len() {
        let info = ImageInfo {
            width: 3,
            height: 2,
            layout: ChannelLayout::GreyAlpha,
        };
        assert_eq!(info.buffer_len(), 12);
    }
}
