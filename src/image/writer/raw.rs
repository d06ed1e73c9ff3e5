use std::io::{self, Write};

use crate::image::{Channels, PixelBuffer};

const OPAQUE: u8 = 0xFF;

/// Writes display pixels as a headerless buffer with a chosen channel count
pub struct RawImageWriter<'a, T: Write> {
    writer: &'a mut T,
}

impl<'a, T: Write> RawImageWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> Self {
        RawImageWriter { writer }
    }

    pub fn write_image(&mut self, pixels: &PixelBuffer, target: Channels) -> io::Result<()> {
        self.writer.write_all(&encode(pixels, target))?;
        self.writer.flush()
    }
}

/// Re-encode display pixels with `target` channels per pixel.
///
/// Gray keeps the first component of every pixel, so the source must already
/// be gray. RGBA output takes the source alpha, or `0xFF` when there is none.
pub fn encode(pixels: &PixelBuffer, target: Channels) -> Vec<u8> {
    let mut data = Vec::with_capacity(pixels.pixel_count() * target.count() as usize);
    for pixel in pixels.pixels() {
        match target {
            Channels::Gray => data.push(pixel[0]),
            Channels::Rgb => data.extend_from_slice(&pixel[..3]),
            Channels::Rgba => {
                data.extend_from_slice(&pixel[..3]);
                data.push(if pixels.has_alpha() { pixel[3] } else { OPAQUE });
            }
        }
    }
    data
}
