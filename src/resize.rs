//! Resampling via `fast_image_resize`.

use crate::config::{Filter, ResizeConfig};
use crate::error::{Error, Result};
use crate::handle::Image;
use crate::types::ChannelLayout;
use fast_image_resize as fr;
use whereat::*;

impl ChannelLayout {
    pub(crate) fn pixel_type(self) -> fr::PixelType {
        match self {
            ChannelLayout::Grey => fr::PixelType::U8,
            ChannelLayout::GreyAlpha => fr::PixelType::U8x2,
            ChannelLayout::Rgb => fr::PixelType::U8x3,
            ChannelLayout::Rgba => fr::PixelType::U8x4,
        }
    }
}

/// Cubic B-spline (B = 1, C = 0).
fn cubic_bspline(x: f64) -> f64 {
    let x = x.abs();
    if x < 1.0 {
        (4.0 + x * x * (3.0 * x - 6.0)) / 6.0
    } else if x < 2.0 {
        let t = 2.0 - x;
        t * t * t / 6.0
    } else {
        0.0
    }
}

fn filter_type(filter: Filter) -> Result<fr::FilterType> {
    Ok(match filter {
        Filter::Box => fr::FilterType::Box,
        Filter::Triangle => fr::FilterType::Bilinear,
        Filter::CatmullRom => fr::FilterType::CatmullRom,
        Filter::MitchellNetravali | Filter::Default => fr::FilterType::Mitchell,
        Filter::CubicBSpline => {
            let kernel = fr::Filter::new("cubic_bspline", cubic_bspline, 2.0)
                .map_err(|_| at!(Error::ResizeFailed("invalid filter support".into())))?;
            fr::FilterType::Custom(kernel)
        }
    })
}

/// Kernel radius in source pixels at unit scale.
fn support(filter: Filter) -> f64 {
    match filter {
        Filter::Box => 0.5,
        Filter::Triangle => 1.0,
        _ => 2.0,
    }
}

/// Edge pixels needed on each side so no kernel tap leaves the padded source.
fn edge_pad(support: f64, src: u32, dst: u32) -> usize {
    let scale = (f64::from(src) / f64::from(dst)).max(1.0);
    (support * scale).ceil() as usize
}

fn buffer_len(width: usize, height: usize, channels: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(channels)
}

fn try_alloc(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| at!(Error::OutOfMemory))?;
    Ok(buf)
}

/// Copy of `img` with `pad_x` columns and `pad_y` rows of replicated edge
/// pixels on every side.
fn pad_edges(img: &Image, pad_x: usize, pad_y: usize) -> Result<(Vec<u8>, u32, u32)> {
    let bpp = img.layout().channels();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let dims = w
        .checked_add(pad_x.saturating_mul(2))
        .zip(h.checked_add(pad_y.saturating_mul(2)))
        .and_then(|(pw, ph)| Some((u32::try_from(pw).ok()?, u32::try_from(ph).ok()?)));
    let (padded_w, padded_h) = dims.ok_or_else(|| at!(Error::OutOfMemory))?;
    let len = buffer_len(padded_w as usize, padded_h as usize, bpp)
        .ok_or_else(|| at!(Error::OutOfMemory))?;

    let mut out = try_alloc(len)?;
    let stride = img.stride();
    for y in 0..padded_h as usize {
        let sy = y.saturating_sub(pad_y).min(h - 1);
        let row = &img.as_bytes()[sy * stride..(sy + 1) * stride];
        let (first, last) = (&row[..bpp], &row[stride - bpp..]);
        for _ in 0..pad_x {
            out.extend_from_slice(first);
        }
        out.extend_from_slice(row);
        for _ in 0..pad_x {
            out.extend_from_slice(last);
        }
    }
    Ok((out, padded_w, padded_h))
}

impl Image {
    /// Resize with the default filter.
    ///
    /// See [`Image::resize_with`].
    pub fn resize(&self, width: u32, height: u32) -> Result<Image> {
        self.resize_with(width, height, &ResizeConfig::default())
    }

    /// Resize to `width` x `height` into a new image.
    ///
    /// The channel layout is preserved and `self` is left untouched. Resizing
    /// to the current dimensions returns an exact copy for every filter.
    /// Kernel taps past the border read the nearest edge pixel.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either target dimension is zero, or
    ///   the target buffer size does not fit in `usize`.
    /// - [`Error::OutOfMemory`] if a buffer cannot be allocated.
    /// - [`Error::InvalidInput`] if `self` has no pixels.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixelx::{ChannelLayout, Filter, Image, ResizeConfig};
    ///
    /// let img = Image::from_raw(vec![200; 4 * 4 * 3], 4, 4, ChannelLayout::Rgb)?;
    /// let half = img.resize_with(2, 2, &ResizeConfig::new().filter(Filter::Box))?;
    /// assert_eq!((half.width(), half.height()), (2, 2));
    /// assert_eq!(half.layout(), ChannelLayout::Rgb);
    /// # Ok::<(), pixelx::At<pixelx::Error>>(())
    /// ```
    pub fn resize_with(&self, width: u32, height: u32, config: &ResizeConfig) -> Result<Image> {
        if width == 0 || height == 0 {
            return Err(at!(Error::InvalidDimensions { width, height }));
        }

        let layout = self.layout();
        if (width, height) == (self.width(), self.height()) {
            log::trace!("resize to same size {}x{}, copying", width, height);
            return Ok(self.clone());
        }
        if self.width() == 0 || self.height() == 0 {
            return Err(at!(Error::InvalidInput("source image is empty".into())));
        }

        let len = buffer_len(width as usize, height as usize, layout.channels())
            .ok_or_else(|| at!(Error::InvalidDimensions { width, height }))?;
        let mut buf = try_alloc(len)?;
        buf.resize(len, 0);
        let mut dst = fr::images::Image::from_vec_u8(width, height, buf, layout.pixel_type())
            .map_err(|e| at!(Error::ResizeFailed(format!("target buffer: {e}"))))?;

        let filter = config
            .filter
            .resolve((self.width(), self.height()), (width, height));
        let pad_x = edge_pad(support(filter), self.width(), width);
        let pad_y = edge_pad(support(filter), self.height(), height);
        log::debug!(
            "resize {}x{} -> {}x{} {:?} with {:?}, edge pad {}x{}",
            self.width(),
            self.height(),
            width,
            height,
            layout,
            filter,
            pad_x,
            pad_y
        );

        let (padded, padded_w, padded_h) = pad_edges(self, pad_x, pad_y)?;
        let src = fr::images::ImageRef::new(padded_w, padded_h, &padded, layout.pixel_type())
            .map_err(|e| at!(Error::ResizeFailed(format!("source buffer: {e}"))))?;

        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(filter_type(filter)?))
            .crop(
                pad_x as f64,
                pad_y as f64,
                f64::from(self.width()),
                f64::from(self.height()),
            );
        fr::Resizer::new()
            .resize(&src, &mut dst, Some(&options))
            .map_err(|e| at!(Error::ResizeFailed(e.to_string())))?;

        Ok(Image::from_parts(dst.into_vec(), width, height, layout))
    }
}
