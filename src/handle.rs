//! The owned image handle.

use crate::error::{Error, Result};
use crate::types::{ChannelLayout, ImageInfo, Pixel, Rgbaf};
use core::fmt;
use imgref::ImgRef;
use whereat::*;

/// A decoded 8-bit image that owns its pixel buffer.
///
/// The buffer always holds exactly `width * height * layout.channels()`
/// interleaved samples in row-major order. A handle is immutable once built;
/// [`Image::resize`] and [`Clone`] produce new handles with their own buffers.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: ChannelLayout,
}

impl Image {
    /// Caller guarantees the size invariant.
    pub(crate) fn from_parts(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels()
        );
        Self {
            pixels,
            width,
            height,
            layout,
        }
    }

    /// Wrap raw interleaved samples.
    ///
    /// Fails if `pixels.len()` is not `width * height * layout.channels()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixelx::{ChannelLayout, Image};
    ///
    /// let img = Image::from_raw(vec![128, 64, 32, 255], 1, 1, ChannelLayout::Rgba)?;
    /// let px = img.pixel_at(0, 0)?;
    /// assert!((px.r - 128.0 / 255.0).abs() < 1e-6);
    /// # Ok::<(), pixelx::At<pixelx::Error>>(())
    /// ```
    pub fn from_raw(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> Result<Self> {
        let required = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(layout.channels()));
        if required != Some(pixels.len()) {
            return Err(at!(Error::InvalidInput(format!(
                "buffer holds {} bytes, {}x{} {:?} needs {}",
                pixels.len(),
                width,
                height,
                layout,
                required.map_or_else(|| "more than usize::MAX".into(), |n| n.to_string())
            ))));
        }
        Ok(Self::from_parts(pixels, width, height, layout))
    }

    /// Copy typed pixels out of an imgref view.
    ///
    /// Padding past the view's width in each row is dropped.
    pub fn from_img<P: Pixel>(img: ImgRef<'_, P>) -> Result<Self> {
        let width = u32::try_from(img.width())
            .map_err(|_| at!(Error::InvalidInput("width exceeds u32".into())))?;
        let height = u32::try_from(img.height())
            .map_err(|_| at!(Error::InvalidInput("height exceeds u32".into())))?;

        let mut pixels = Vec::with_capacity(img.width() * img.height() * P::LAYOUT.channels());
        for row in img.rows() {
            P::extend_bytes(row, &mut pixels);
        }
        Ok(Self::from_parts(pixels, width, height, P::LAYOUT))
    }

    // === Accessors ===

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout of the buffer.
    #[must_use]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Dimensions and layout as an [`ImageInfo`].
    #[must_use]
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }

    /// Row stride in bytes.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.width as usize * self.layout.channels()
    }

    /// Raw interleaved samples.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the raw samples.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Samples of row `y`, or `None` past the last row.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        self.pixels.get(start..start + stride)
    }

    /// Typed view of the buffer.
    ///
    /// Fails with [`Error::LayoutMismatch`] unless the image layout is
    /// `P::LAYOUT`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixelx::{ChannelLayout, Image};
    /// use rgb::RGB8;
    ///
    /// let img = Image::from_raw(vec![1, 2, 3, 4, 5, 6], 2, 1, ChannelLayout::Rgb)?;
    /// let view = img.as_img::<RGB8>()?;
    /// assert_eq!(view.buf()[1], RGB8::new(4, 5, 6));
    /// # Ok::<(), pixelx::At<pixelx::Error>>(())
    /// ```
    pub fn as_img<P: Pixel>(&self) -> Result<ImgRef<'_, P>> {
        if P::LAYOUT != self.layout {
            return Err(at!(Error::LayoutMismatch {
                expected: P::LAYOUT,
                actual: self.layout,
            }));
        }
        Ok(ImgRef::new(
            P::cast(&self.pixels),
            self.width as usize,
            self.height as usize,
        ))
    }

    // === Pixel access ===

    /// Normalized pixel at column `x`, row `y`.
    ///
    /// Fails with [`Error::OutOfBounds`] when `x >= width` or `y >= height`.
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<Rgbaf> {
        self.get(x, y).ok_or_else(|| {
            at!(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        })
    }

    /// Normalized pixel at column `x`, row `y`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgbaf> {
        if x >= self.width || y >= self.height {
            return None;
        }
        // SAFETY: bounds checked above
        Some(unsafe { self.pixel_at_unchecked(x, y) })
    }

    /// Normalized pixel at column `x`, row `y`, without bounds checks.
    ///
    /// # Safety
    ///
    /// `x < self.width()` and `y < self.height()` must hold.
    #[must_use]
    pub unsafe fn pixel_at_unchecked(&self, x: u32, y: u32) -> Rgbaf {
        let bpp = self.layout.channels();
        let index = (y as usize * self.width as usize + x as usize) * bpp;
        // SAFETY: caller upholds the bounds; the buffer holds width * height * bpp bytes
        let px = unsafe { self.pixels.get_unchecked(index..index + bpp) };
        self.layout.normalize(px)
    }

    /// Iterate over every pixel in row-major order, normalized.
    pub fn normalized_pixels(&self) -> impl ExactSizeIterator<Item = Rgbaf> + '_ {
        let layout = self.layout;
        self.pixels
            .chunks_exact(layout.channels())
            .map(move |px| layout.normalize(px))
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("layout", &self.layout)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGBA8;

    fn checker() -> Image {
        Image::from_raw(vec![0, 255, 255, 0], 2, 2, ChannelLayout::Grey).unwrap()
    }

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        assert!(Image::from_raw(vec![0; 5], 2, 2, ChannelLayout::Grey).is_err());
        assert!(Image::from_raw(vec![0; 4], 2, 2, ChannelLayout::Grey).is_ok());
    }

    #[test]
    fn test_pixel_index_is_row_major() {
        let img = checker();
        assert_eq!(img.pixel_at(1, 0).unwrap().r, 1.0);
        assert_eq!(img.pixel_at(0, 1).unwrap().r, 1.0);
        assert_eq!(img.pixel_at(1, 1).unwrap().r, 0.0);
    }

    #[test]
    fn test_out_of_bounds() {
        let img = checker();
        assert!(img.get(2, 0).is_none());
        assert!(img.get(0, 2).is_none());
        let err = img.pixel_at(2, 0).unwrap_err();
        assert_eq!(
            *err.error(),
            Error::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn test_row_access() {
        let img = checker();
        assert_eq!(img.row(1), Some(&[255u8, 0][..]));
        assert_eq!(img.row(2), None);
    }

    #[test]
    fn test_layout_mismatch() {
        let img = checker();
        assert!(img.as_img::<RGBA8>().is_err());
    }

    #[test]
    fn test_from_img_drops_stride_padding() {
        let buf = vec![RGBA8::new(1, 2, 3, 4), RGBA8::new(9, 9, 9, 9)];
        let view = ImgRef::new_stride(&buf[..], 1, 1, 2);
        let img = Image::from_img(view).unwrap();
        assert_eq!(img.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(img.layout(), ChannelLayout::Rgba);
    }

    #[test]
    fn test_normalized_pixels_len() {
        assert_eq!(checker().normalized_pixels().len(), 4);
    }
}
