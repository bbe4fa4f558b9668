//! Decoder and resize configuration types.

use crate::types::ChannelLayout;

/// Channel layout to decode into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesiredChannels {
    /// Keep whatever layout the source encodes.
    #[default]
    Source,
    /// Convert to this layout, adding or dropping channels as needed.
    ///
    /// Grey becomes RGB by replication, a missing alpha channel becomes
    /// opaque, and dropped alpha is discarded.
    Exactly(ChannelLayout),
}

impl From<ChannelLayout> for DesiredChannels {
    fn from(layout: ChannelLayout) -> Self {
        DesiredChannels::Exactly(layout)
    }
}

impl From<Option<ChannelLayout>> for DesiredChannels {
    fn from(layout: Option<ChannelLayout>) -> Self {
        layout.map_or(DesiredChannels::Source, DesiredChannels::Exactly)
    }
}

/// Decoder configuration.
///
/// # Example
///
/// ```rust
/// use pixelx::{ChannelLayout, DecoderConfig};
///
/// let config = DecoderConfig::new()
///     .desired_channels(ChannelLayout::Rgba)
///     .max_dimensions(8192, 8192);
/// assert_eq!(config.get_max_dimensions(), Some((8192, 8192)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    pub(crate) desired: DesiredChannels,
    pub(crate) max_width: Option<u32>,
    pub(crate) max_height: Option<u32>,
    pub(crate) max_alloc: Option<u64>,
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings.
    ///
    /// Default: source layout, decoder's own limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout of the decoded buffer.
    #[must_use]
    pub fn desired_channels(mut self, desired: impl Into<DesiredChannels>) -> Self {
        self.desired = desired.into();
        self
    }

    /// Reject images wider or taller than these dimensions.
    #[must_use]
    pub fn max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    /// Cap the decoder's total allocation in bytes.
    #[must_use]
    pub fn max_alloc(mut self, bytes: u64) -> Self {
        self.max_alloc = Some(bytes);
        self
    }

    // === Accessors (read-only) ===

    /// Get the requested layout.
    #[must_use]
    pub fn get_desired_channels(&self) -> DesiredChannels {
        self.desired
    }

    /// Get the dimension limits, if set.
    #[must_use]
    pub fn get_max_dimensions(&self) -> Option<(u32, u32)> {
        self.max_width.zip(self.max_height)
    }

    pub(crate) fn limits(&self) -> image::Limits {
        let mut limits = image::Limits::default();
        if let Some(width) = self.max_width {
            limits.max_image_width = Some(width);
        }
        if let Some(height) = self.max_height {
            limits.max_image_height = Some(height);
        }
        if let Some(bytes) = self.max_alloc {
            limits.max_alloc = Some(bytes);
        }
        limits
    }
}

/// Resampling kernel used by [`Image::resize_with`](crate::Image::resize_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Filter {
    /// Catmull-Rom when upsampling, Mitchell-Netravali when either axis shrinks.
    ///
    /// The choice is made once and applies to both axes, so an image widened
    /// and shortened in one call is filtered with Mitchell-Netravali
    /// horizontally too. Resize in two calls to pick per axis.
    #[default]
    Default,
    /// Box filter (nearest-area average).
    Box,
    /// Triangle (bilinear) filter.
    Triangle,
    /// Cubic B-spline. Smooth, does not interpolate source samples.
    CubicBSpline,
    /// Catmull-Rom spline. Sharp, interpolating.
    CatmullRom,
    /// Mitchell-Netravali (B = C = 1/3).
    MitchellNetravali,
}

impl Filter {
    /// Resolve [`Filter::Default`] for a given scaling direction.
    ///
    /// One filter is returned for both axes: a shrink on either axis selects
    /// Mitchell-Netravali.
    #[must_use]
    pub fn resolve(self, src: (u32, u32), dst: (u32, u32)) -> Self {
        match self {
            Filter::Default if dst.0 < src.0 || dst.1 < src.1 => Filter::MitchellNetravali,
            Filter::Default => Filter::CatmullRom,
            other => other,
        }
    }
}

/// Resize configuration.
///
/// Samples are 8-bit, treated as linear values, with clamped edges.
/// Layouts with alpha are resampled premultiplied.
#[derive(Debug, Clone, Default)]
pub struct ResizeConfig {
    pub(crate) filter: Filter,
}

impl ResizeConfig {
    /// Create a new resize configuration with the default filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resampling filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Get the resampling filter.
    #[must_use]
    pub fn get_filter(&self) -> Filter {
        self.filter
    }
}

impl From<Filter> for ResizeConfig {
    fn from(filter: Filter) -> Self {
        Self { filter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_from_option() {
        assert_eq!(DesiredChannels::from(None), DesiredChannels::Source);
        assert_eq!(
            DesiredChannels::from(Some(ChannelLayout::Grey)),
            DesiredChannels::Exactly(ChannelLayout::Grey)
        );
    }

    #[test]
    fn test_limits_forwarded() {
        let limits = DecoderConfig::new()
            .max_dimensions(64, 32)
            .max_alloc(1 << 20)
            .limits();
        assert_eq!(limits.max_image_width, Some(64));
        assert_eq!(limits.max_image_height, Some(32));
        assert_eq!(limits.max_alloc, Some(1 << 20));
    }

    #[test]
    fn test_default_filter_resolution() {
        assert_eq!(
            Filter::Default.resolve((10, 10), (20, 20)),
            Filter::CatmullRom
        );
        assert_eq!(
            Filter::Default.resolve((10, 10), (20, 5)),
            Filter::MitchellNetravali
        );
        assert_eq!(Filter::Box.resolve((10, 10), (5, 5)), Filter::Box);
    }

    #[test]
    fn test_default_filter_is_shared_by_both_axes() {
        // widening x does not keep Catmull-Rom once y shrinks
        for dst in [(20, 5), (5, 20)] {
            assert_eq!(
                Filter::Default.resolve((10, 10), dst),
                Filter::MitchellNetravali
            );
        }
        assert_eq!(Filter::Default.resolve((10, 10), (20, 10)), Filter::CatmullRom);
    }
}
