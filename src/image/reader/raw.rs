use super::padder::PaddedBytes;
use super::{Decoded, ImageReader};
use crate::image::shape::fit_shape;
use crate::image::{Channels, Dimension, ImageShape, PixelBuffer};
use crate::Result;

/// Reader for headerless row-major pixel data
pub struct RawImageReader<'a> {
    bytes: &'a [u8],
}

impl<'a> RawImageReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl ImageReader for RawImageReader<'_> {
    fn read_image(&self, requested: &ImageShape, free: Dimension) -> Result<Decoded> {
        decode(self.bytes, requested, free)
    }
}

/// Decode raw bytes into a display buffer.
///
/// When the bytes do not fill `requested` exactly, the `free` dimension is
/// re-inferred and the data zero-padded to the corrected size. Shapes wider or
/// taller than [`crate::image::MAX_IMAGE_SIDE`] are refused before any pixel
/// buffer is allocated.
pub fn decode(bytes: &[u8], requested: &ImageShape, free: Dimension) -> Result<Decoded> {
    let shape = fit_shape(bytes.len(), requested, free)?;
    shape.check_size_limit()?;

    let padded = PaddedBytes::new(bytes, shape.expected_size() as usize);
    let data = match shape.channels() {
        Channels::Gray => expand_gray(&padded),
        Channels::Rgb | Channels::Rgba => padded.to_vec(),
    };
    let pixels = PixelBuffer::new(
        shape.width(),
        shape.height(),
        shape.channels().display_layout(),
        data,
    )?;
    log::info!(
        "Decoded {} raw bytes as {}x{}x{} ({} bytes of padding)",
        bytes.len(),
        shape.width(),
        shape.height(),
        shape.channels().count(),
        padded.padding()
    );
    Ok(Decoded { pixels, shape })
}

fn expand_gray(padded: &PaddedBytes) -> Vec<u8> {
    let mut data = Vec::with_capacity(padded.padded_length() * 3);
    for gray in padded.iter() {
        data.extend_from_slice(&[gray, gray, gray]);
    }
    data
}

#[cfg(test)]
mod test {
    use super::{decode, RawImageReader};
    use crate::error::Error;
    use crate::image::reader::ImageReader;
    use crate::image::{Channels, Dimension, ImageShape, PixelLayout};

    fn shape(width: u32, height: u32, channels: Channels) -> ImageShape {
        ImageShape::new(width, height, channels).unwrap()
    }

    #[test]
    fn rgb_exact_fit_passes_through() {
        let bytes = [10, 20, 30, 40, 50, 60];
        let decoded = decode(&bytes, &shape(2, 1, Channels::Rgb), Dimension::Height).unwrap();
        assert_eq!(decoded.pixels.data(), &bytes);
        assert_eq!(decoded.pixels.layout(), PixelLayout::Rgb);
        assert_eq!(decoded.shape, shape(2, 1, Channels::Rgb));
    }

    #[test]
    fn short_rgb_is_zero_padded() {
        let decoded =
            decode(&[1, 2, 3, 4, 5], &shape(2, 1, Channels::Rgb), Dimension::Height).unwrap();
        assert_eq!(decoded.pixels.data(), &[1, 2, 3, 4, 5, 0]);
    }

    #[test]
    fn gray_is_replicated() {
        let decoded =
            decode(&[0, 85, 170, 255], &shape(2, 2, Channels::Gray), Dimension::Height).unwrap();
        assert_eq!(
            decoded.pixels.data(),
            &[0, 0, 0, 85, 85, 85, 170, 170, 170, 255, 255, 255]
        );
    }

    #[test]
    fn rgba_keeps_alpha() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let decoded = decode(&bytes, &shape(1, 2, Channels::Rgba), Dimension::Height).unwrap();
        assert_eq!(decoded.pixels.layout(), PixelLayout::Rgba);
        assert_eq!(decoded.pixels.data(), &bytes);
    }

    #[test]
    fn long_data_grows_height() {
        let bytes = [3; 10];
        let decoded = decode(&bytes, &shape(2, 1, Channels::Gray), Dimension::Height).unwrap();
        assert_eq!(decoded.shape.height(), 5);
        assert_eq!(decoded.pixels.data().len(), 30);
    }

    #[test]
    fn long_data_grows_width_when_height_is_fixed() {
        let bytes = [3; 10];
        let decoded = decode(&bytes, &shape(2, 3, Channels::Gray), Dimension::Width).unwrap();
        assert_eq!(decoded.shape.width(), 4);
        assert_eq!(decoded.shape.height(), 3);
        assert_eq!(decoded.pixels.data().len(), 36);
        assert!(decoded.pixels.data()[30..].iter().all(|&b| b == 0));
    }

    #[test]
    fn oversized_request_is_refused() {
        let result = decode(&[0; 16], &shape(20_000, 20_000, Channels::Rgb), Dimension::Height);
        assert!(matches!(result, Err(Error::OversizedShape { .. })));
    }

    #[test]
    fn oversized_inferred_shape_is_refused() {
        let bytes = vec![0; 10_001];
        let result = decode(&bytes, &shape(1, 1, Channels::Gray), Dimension::Height);
        assert!(matches!(
            result,
            Err(Error::OversizedShape {
                width: 1,
                height: 10_001
            })
        ));
    }

    #[test]
    fn reader_uses_raw_decode() {
        let bytes = [1, 2, 3];
        let reader = RawImageReader::new(&bytes);
        let decoded = reader
            .read_image(&shape(1, 1, Channels::Rgb), Dimension::Height)
            .unwrap();
        assert_eq!(decoded.pixels.data(), &bytes);
    }
}
