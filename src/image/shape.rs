use super::{Channels, Dimension, ImageShape};
use crate::error::Error;
use crate::Result;

/// Recompute the free dimension so the shape holds at least `data_length` bytes.
///
/// The free dimension becomes the smallest value `d >= 1` with
/// `d * fixed * channels >= data_length`, where `fixed` is the other dimension.
/// The channel count is never changed.
pub fn infer_shape(data_length: usize, shape: &ImageShape, free: Dimension) -> Result<ImageShape> {
    let fixed = match free {
        Dimension::Width => shape.height(),
        Dimension::Height => shape.width(),
    };
    let bytes_per_line = fixed as u64 * shape.channels().count() as u64;
    let inferred = (data_length as u64).div_ceil(bytes_per_line).max(1);
    let inferred = u32::try_from(inferred).map_err(|_| match free {
        Dimension::Width => Error::OversizedShape {
            width: inferred,
            height: shape.height() as u64,
        },
        Dimension::Height => Error::OversizedShape {
            width: shape.width() as u64,
            height: inferred,
        },
    })?;
    Ok(shape.with_dimension(free, inferred))
}

/// The requested shape when it fits the data exactly, otherwise the inferred one
pub fn fit_shape(data_length: usize, shape: &ImageShape, free: Dimension) -> Result<ImageShape> {
    if shape.expected_size() == data_length as u64 {
        return Ok(*shape);
    }
    let corrected = infer_shape(data_length, shape, free)?;
    log::debug!(
        "{} bytes do not fit {}x{}x{}, adjusted to {}x{}",
        data_length,
        shape.width(),
        shape.height(),
        shape.channels().count(),
        corrected.width(),
        corrected.height()
    );
    Ok(corrected)
}

/// Turns a requested channel count into a valid one.
///
/// Two channels cannot be displayed. Stepping down from RGB(A) lands on gray,
/// stepping up from gray lands on RGB.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChannelSelector {
    previous: Option<Channels>,
}

impl ChannelSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_previous(previous: Channels) -> Self {
        Self {
            previous: Some(previous),
        }
    }

    pub fn previous(&self) -> Option<Channels> {
        self.previous
    }

    pub fn select(&mut self, requested: u8) -> Result<Channels> {
        let channels = match requested {
            2 => match self.previous {
                Some(Channels::Rgb) | Some(Channels::Rgba) => Channels::Gray,
                Some(Channels::Gray) | None => Channels::Rgb,
            },
            other => Channels::try_from(other)?,
        };
        if requested == 2 {
            log::debug!("Channel count 2 coerced to {}", channels.count());
        }
        self.previous = Some(channels);
        Ok(channels)
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::{fit_shape, infer_shape, ChannelSelector};
    use crate::error::Error;
    use crate::image::{Channels, Dimension, ImageShape};

    fn shape(width: u32, height: u32, channels: Channels) -> ImageShape {
        ImageShape::new(width, height, channels).unwrap()
    }

    #[test]
    fn infer_height_rounds_up() {
        let corrected = infer_shape(5, &shape(2, 1, Channels::Rgb), Dimension::Height).unwrap();
        assert_eq!((corrected.width(), corrected.height()), (2, 1));
        let corrected = infer_shape(7, &shape(2, 1, Channels::Rgb), Dimension::Height).unwrap();
        assert_eq!((corrected.width(), corrected.height()), (2, 2));
    }

    #[test]
    fn infer_width_keeps_height() {
        let corrected = infer_shape(100, &shape(3, 4, Channels::Gray), Dimension::Width).unwrap();
        assert_eq!(corrected.width(), 25);
        assert_eq!(corrected.height(), 4);
        assert_eq!(corrected.channels(), Channels::Gray);
    }

    #[test]
    fn infer_empty_data_gives_one_line() {
        let corrected = infer_shape(0, &shape(16, 16, Channels::Rgba), Dimension::Height).unwrap();
        assert_eq!(corrected.height(), 1);
    }

    #[test]
    fn infer_beyond_u32_is_oversized() {
        let result = infer_shape(usize::MAX, &shape(1, 1, Channels::Gray), Dimension::Height);
        if usize::BITS > 32 {
            assert!(matches!(result, Err(Error::OversizedShape { width: 1, .. })));
        }
    }

    #[test]
    fn exact_fit_is_untouched() {
        let requested = shape(4, 3, Channels::Rgb);
        assert_eq!(fit_shape(36, &requested, Dimension::Height).unwrap(), requested);
    }

    #[test]
    fn two_channels_after_rgba_becomes_gray() {
        let mut selector = ChannelSelector::with_previous(Channels::Rgba);
        assert_eq!(selector.select(2).unwrap(), Channels::Gray);
        assert_eq!(selector.previous(), Some(Channels::Gray));
    }

    #[test]
    fn two_channels_after_gray_becomes_rgb() {
        let mut selector = ChannelSelector::with_previous(Channels::Gray);
        assert_eq!(selector.select(2).unwrap(), Channels::Rgb);
        assert_eq!(selector.previous(), Some(Channels::Rgb));
    }

    #[test]
    fn coercion_is_remembered() {
        let mut selector = ChannelSelector::new();
        assert_eq!(selector.select(2).unwrap(), Channels::Rgb);
        assert_eq!(selector.select(2).unwrap(), Channels::Gray);
        assert_eq!(selector.select(2).unwrap(), Channels::Rgb);
    }

    #[test]
    fn invalid_channel_count_rejected() {
        let mut selector = ChannelSelector::with_previous(Channels::Rgb);
        assert!(matches!(selector.select(5), Err(Error::InvalidChannelCount(5))));
        assert_eq!(selector.previous(), Some(Channels::Rgb));
    }

    fn any_channels() -> impl Strategy<Value = Channels> {
        prop_oneof![Just(Channels::Gray), Just(Channels::Rgb), Just(Channels::Rgba)]
    }

    fn any_dimension() -> impl Strategy<Value = Dimension> {
        prop_oneof![Just(Dimension::Width), Just(Dimension::Height)]
    }

    proptest! {
        #[test]
        fn inferred_dimension_is_minimal(
            data_length in 1usize..200_000,
            width in 1u32..500,
            height in 1u32..500,
            channels in any_channels(),
            free in any_dimension(),
        ) {
            let corrected = infer_shape(data_length, &shape(width, height, channels), free).unwrap();
            prop_assert!(corrected.expected_size() >= data_length as u64);
            let smaller = match free {
                Dimension::Width => corrected.width() - 1,
                Dimension::Height => corrected.height() - 1,
            };
            if smaller >= 1 {
                let below = corrected.with_dimension(free, smaller);
                prop_assert!(below.expected_size() < data_length as u64);
            }
            match free {
                Dimension::Width => prop_assert_eq!(corrected.height(), height),
                Dimension::Height => prop_assert_eq!(corrected.width(), width),
            }
        }
    }
}
