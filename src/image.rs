use clap::builder::PossibleValue;
use clap::ValueEnum;

use crate::error::Error;
use crate::Result;

pub mod reader;
pub mod shape;
pub mod writer;

/// Largest accepted width or height; anything above is refused before allocation.
pub const MAX_IMAGE_SIDE: u64 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
    Gray,
    Rgb,
    Rgba,
}

impl Channels {
    pub fn count(&self) -> u8 {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Layout of the buffer handed to the display for this channel count
    pub fn display_layout(&self) -> PixelLayout {
        match self {
            Self::Gray | Self::Rgb => PixelLayout::Rgb,
            Self::Rgba => PixelLayout::Rgba,
        }
    }
}

impl TryFrom<u8> for Channels {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(Error::InvalidChannelCount(other)),
        }
    }
}

/// The dimension that gets recomputed when the data does not fit the shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dimension {
    Width,
    #[default]
    Height,
}

impl ValueEnum for Dimension {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Width, Self::Height]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Width => Some(PossibleValue::new("Width")),
            Self::Height => Some(PossibleValue::new("Height")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageShape {
    width: u32,
    height: u32,
    channels: Channels,
}

impl ImageShape {
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidDimension("width"));
        }
        if height == 0 {
            return Err(Error::InvalidDimension("height"));
        }
        Ok(Self {
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn expected_size(&self) -> u64 {
        self.pixel_count() * self.channels.count() as u64
    }

    pub fn is_oversized(&self) -> bool {
        self.width as u64 > MAX_IMAGE_SIDE || self.height as u64 > MAX_IMAGE_SIDE
    }

    pub(crate) fn check_size_limit(&self) -> Result<()> {
        if self.is_oversized() {
            return Err(Error::OversizedShape {
                width: self.width as u64,
                height: self.height as u64,
            });
        }
        Ok(())
    }

    pub(crate) fn with_dimension(&self, dimension: Dimension, value: u32) -> Self {
        match dimension {
            Dimension::Width => Self {
                width: value,
                ..*self
            },
            Dimension::Height => Self {
                height: value,
                ..*self
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Interleaved 8 bit pixels ready for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * layout.bytes_per_pixel();
        if data.len() != expected {
            return Err(Error::MismatchOfSizeBetweenShapeAndPixels(
                expected,
                data.len(),
            ));
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.layout.bytes_per_pixel())
    }

    pub fn has_alpha(&self) -> bool {
        self.layout == PixelLayout::Rgba
    }
}
