use std::io::{BufWriter, Write};

use ::image::codecs::png::PngEncoder;
use ::image::{ExtendedColorType, ImageEncoder, ImageResult};

use crate::image::{PixelBuffer, PixelLayout};

fn color_type(layout: PixelLayout) -> ExtendedColorType {
    match layout {
        PixelLayout::Rgb => ExtendedColorType::Rgb8,
        PixelLayout::Rgba => ExtendedColorType::Rgba8,
    }
}

/// Encode the display pixels as PNG, keeping alpha when the buffer has it
pub fn write_png<W: Write>(pixels: &PixelBuffer, writer: W) -> ImageResult<()> {
    let mut writer = BufWriter::new(writer);
    PngEncoder::new(&mut writer).write_image(
        pixels.data(),
        pixels.width(),
        pixels.height(),
        color_type(pixels.layout()),
    )?;
    writer.flush()?;
    Ok(())
}
