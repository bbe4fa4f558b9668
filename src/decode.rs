//! Image decoding and metadata probing.
//!
//! All format parsing is delegated to the `image` crate. This module only
//! maps its results onto an owned 8-bit buffer with a known [`ChannelLayout`].

use crate::config::{DecoderConfig, DesiredChannels};
use crate::error::{DecodingError, Error, Result};
use crate::handle::Image;
use crate::types::{ChannelLayout, ImageInfo};
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;
use whereat::*;

type Decoded = (Vec<u8>, u32, u32, ChannelLayout);

/// Reader over in-memory data, format detected from content.
pub(crate) fn memory_reader(
    data: &[u8],
) -> core::result::Result<ImageReader<Cursor<&[u8]>>, DecodingError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|_| DecodingError::Io)
}

/// Reader over a file, format detected from content.
pub(crate) fn file_reader(
    path: &Path,
) -> core::result::Result<ImageReader<BufReader<File>>, DecodingError> {
    ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|_| DecodingError::Io)
}

pub(crate) fn probe_reader<R: BufRead + Seek>(
    reader: ImageReader<R>,
) -> core::result::Result<ImageInfo, DecodingError> {
    let decoder = reader.into_decoder().map_err(|e| DecodingError::from(&e))?;
    let (width, height) = decoder.dimensions();
    let layout = ChannelLayout::from_count(decoder.color_type().channel_count())
        .ok_or(DecodingError::UnsupportedChannels)?;

    log::debug!("probed {}x{} {:?}", width, height, layout);
    Ok(ImageInfo {
        width,
        height,
        layout,
    })
}

fn decode_reader<R: BufRead + Seek>(
    mut reader: ImageReader<R>,
    config: &DecoderConfig,
) -> core::result::Result<Decoded, DecodingError> {
    reader.limits(config.limits());
    let img = reader.decode().map_err(|e| DecodingError::from(&e))?;

    let source = ChannelLayout::from_count(img.color().channel_count())
        .ok_or(DecodingError::UnsupportedChannels)?;
    let layout = match config.desired {
        DesiredChannels::Source => source,
        DesiredChannels::Exactly(layout) => layout,
    };
    let (width, height) = (img.width(), img.height());

    log::debug!(
        "decoded {}x{} {:?} as {:?}",
        width,
        height,
        source,
        layout
    );
    Ok((into_layout(img, layout), width, height, layout))
}

/// Flatten to 8-bit samples in the requested layout.
fn into_layout(img: DynamicImage, layout: ChannelLayout) -> Vec<u8> {
    match layout {
        ChannelLayout::Grey => img.into_luma8().into_raw(),
        ChannelLayout::GreyAlpha => img.into_luma_alpha8().into_raw(),
        ChannelLayout::Rgb => img.into_rgb8().into_raw(),
        ChannelLayout::Rgba => img.into_rgba8().into_raw(),
    }
}

fn finish(decoded: core::result::Result<Decoded, DecodingError>) -> Result<Image> {
    let (pixels, width, height, layout) = decoded.map_err(|e| at!(Error::DecodeFailed(e)))?;
    Ok(Image::from_parts(pixels, width, height, layout))
}

impl Image {
    /// Decode an image from encoded bytes, keeping the source layout.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let png: &[u8] = &[0u8; 100]; // placeholder
    /// let img = pixelx::Image::from_memory(png)?;
    /// let px = img.pixel_at(0, 0)?;
    /// println!("{} {} {} {}", px.r, px.g, px.b, px.a);
    /// # Ok::<(), pixelx::At<pixelx::Error>>(())
    /// ```
    pub fn from_memory(data: &[u8]) -> Result<Self> {
        Self::from_memory_with(data, &DecoderConfig::default())
    }

    /// Decode an image from encoded bytes with explicit configuration.
    pub fn from_memory_with(data: &[u8], config: &DecoderConfig) -> Result<Self> {
        finish(memory_reader(data).and_then(|reader| decode_reader(reader, config)))
    }

    /// Decode an image file, keeping the source layout.
    ///
    /// The format is detected from the file content. A file that cannot be
    /// read is reported as a decode failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &DecoderConfig::default())
    }

    /// Decode an image file with explicit configuration.
    pub fn open_with(path: impl AsRef<Path>, config: &DecoderConfig) -> Result<Self> {
        finish(file_reader(path.as_ref()).and_then(|reader| decode_reader(reader, config)))
    }
}

/// Decode encoded bytes into an [`Image`] with the source layout.
pub fn decode(data: &[u8]) -> Result<Image> {
    Image::from_memory(data)
}

/// Decode encoded bytes into an [`Image`] with the given layout.
///
/// # Example
///
/// ```rust,no_run
/// use pixelx::ChannelLayout;
///
/// let jpeg: &[u8] = &[0u8; 100]; // placeholder
/// let img = pixelx::decode_as(jpeg, ChannelLayout::Rgba)?;
/// assert_eq!(img.layout(), ChannelLayout::Rgba);
/// # Ok::<(), pixelx::At<pixelx::Error>>(())
/// ```
pub fn decode_as(data: &[u8], layout: ChannelLayout) -> Result<Image> {
    Image::from_memory_with(data, &DecoderConfig::new().desired_channels(layout))
}

/// Image decoder that probes before decoding.
///
/// # Example
///
/// ```rust,no_run
/// use pixelx::{ChannelLayout, Decoder};
///
/// let data: &[u8] = &[0u8; 100]; // placeholder
/// let decoder = Decoder::new(data)?;
/// let info = decoder.info();
/// println!("Image: {}x{}, {:?}", info.width, info.height, info.layout);
///
/// let img = decoder.desired_channels(ChannelLayout::Rgb).decode()?;
/// # Ok::<(), pixelx::At<pixelx::Error>>(())
/// ```
pub struct Decoder<'a> {
    data: &'a [u8],
    info: ImageInfo,
    config: DecoderConfig,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder for the given data.
    ///
    /// Fails with [`Error::ProbeFailed`] if the header cannot be read.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let info = ImageInfo::from_memory(data)?;
        Ok(Self {
            data,
            info,
            config: DecoderConfig::default(),
        })
    }

    /// Get image information.
    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    /// Set decoder configuration.
    #[must_use]
    pub fn config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the layout of the decoded buffer.
    #[must_use]
    pub fn desired_channels(mut self, desired: impl Into<DesiredChannels>) -> Self {
        self.config = self.config.desired_channels(desired);
        self
    }

    /// Decode the image.
    pub fn decode(self) -> Result<Image> {
        Image::from_memory_with(self.data, &self.config)
    }
}
