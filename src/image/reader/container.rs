use ::image::DynamicImage;

use super::{Decoded, ImageReader};
use crate::image::{Channels, Dimension, ImageShape, PixelBuffer, PixelLayout};
use crate::Result;

/// Reader for standard image files (PNG, JPEG, BMP, GIF, ...) decoded by `image`
#[derive(Clone, Debug)]
pub struct ContainerImageReader {
    image: DynamicImage,
}

impl ContainerImageReader {
    /// Detect a known container format.
    ///
    /// `None` means the bytes are not a decodable container image and should be
    /// treated as raw pixel data instead.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match ::image::load_from_memory(bytes) {
            Ok(image) => {
                log::debug!(
                    "Recognized container image {}x{} ({:?})",
                    image.width(),
                    image.height(),
                    image.color()
                );
                Some(Self::from_image(image))
            }
            Err(e) => {
                log::debug!("Not a container image: {}", e);
                None
            }
        }
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl ImageReader for ContainerImageReader {
    /// Only the channel count of `requested` matters, the size comes from the file.
    fn read_image(&self, requested: &ImageShape, _free: Dimension) -> Result<Decoded> {
        let channels = requested.channels();
        let shape = ImageShape::new(self.width(), self.height(), channels)?;
        let (layout, data) = match channels {
            Channels::Gray => (PixelLayout::Rgb, flatten_gray(&self.image)),
            Channels::Rgb => (PixelLayout::Rgb, flatten_rgb(&self.image)),
            Channels::Rgba => (PixelLayout::Rgba, self.image.to_rgba8().into_raw()),
        };
        let pixels = PixelBuffer::new(shape.width(), shape.height(), layout, data)?;
        Ok(Decoded { pixels, shape })
    }
}

/// Blend a component over an opaque white background
fn over_white(component: u8, alpha: u8) -> u8 {
    let component = component as u32;
    let alpha = alpha as u32;
    ((component * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}

fn flatten_gray(image: &DynamicImage) -> Vec<u8> {
    let gray = image.to_luma_alpha8();
    let mut data = Vec::with_capacity(gray.as_raw().len() / 2 * 3);
    for pixel in gray.pixels() {
        let [luma, alpha] = pixel.0;
        let value = over_white(luma, alpha);
        data.extend_from_slice(&[value, value, value]);
    }
    data
}

fn flatten_rgb(image: &DynamicImage) -> Vec<u8> {
    let rgba = image.to_rgba8();
    let mut data = Vec::with_capacity(rgba.as_raw().len() / 4 * 3);
    for pixel in rgba.pixels() {
        let [red, green, blue, alpha] = pixel.0;
        data.extend_from_slice(&[
            over_white(red, alpha),
            over_white(green, alpha),
            over_white(blue, alpha),
        ]);
    }
    data
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use ::image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::{over_white, ContainerImageReader};
    use crate::image::reader::ImageReader;
    use crate::image::{Channels, Dimension, ImageShape, PixelLayout};

    fn sample_image() -> DynamicImage {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        DynamicImage::ImageRgba8(image)
    }

    fn requested(channels: Channels) -> ImageShape {
        ImageShape::new(256, 256, channels).unwrap()
    }

    #[test]
    fn blend_over_white() {
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(0, 255), 0);
        assert_eq!(over_white(200, 255), 200);
        assert_eq!(over_white(0, 128), 127);
    }

    #[test]
    fn detect_png_bytes() {
        let mut bytes = Vec::new();
        sample_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let reader = ContainerImageReader::detect(&bytes).expect("PNG not recognized");
        assert_eq!((reader.width(), reader.height()), (2, 1));
    }

    #[test]
    fn detect_raw_bytes_fails() {
        assert!(ContainerImageReader::detect(&[1, 2, 3, 4, 5, 6]).is_none());
        assert!(ContainerImageReader::detect(&[]).is_none());
    }

    #[test]
    fn rgba_request_keeps_transparency() {
        let reader = ContainerImageReader::from_image(sample_image());
        let decoded = reader
            .read_image(&requested(Channels::Rgba), Dimension::Height)
            .unwrap();
        assert_eq!(decoded.pixels.layout(), PixelLayout::Rgba);
        assert_eq!(decoded.pixels.data(), &[200, 100, 50, 255, 0, 0, 0, 0]);
        assert_eq!((decoded.shape.width(), decoded.shape.height()), (2, 1));
    }

    #[test]
    fn rgb_request_composites_over_white() {
        let reader = ContainerImageReader::from_image(sample_image());
        let decoded = reader
            .read_image(&requested(Channels::Rgb), Dimension::Height)
            .unwrap();
        assert_eq!(decoded.pixels.layout(), PixelLayout::Rgb);
        assert_eq!(decoded.pixels.data(), &[200, 100, 50, 255, 255, 255]);
    }

    #[test]
    fn gray_request_is_gray_and_opaque() {
        let reader = ContainerImageReader::from_image(sample_image());
        let decoded = reader
            .read_image(&requested(Channels::Gray), Dimension::Height)
            .unwrap();
        let data = decoded.pixels.data();
        assert_eq!(data.len(), 6);
        assert_eq!(data[0], data[1]);
        assert_eq!(data[1], data[2]);
        assert_eq!(&data[3..], &[255, 255, 255]);
        assert_eq!(decoded.shape.channels(), Channels::Gray);
    }
}
