use std::io::BufWriter;
use std::path::Path;

use super::{Channels, PixelBuffer};
use crate::error::Error;
use crate::{open_output_file, Result};

pub mod png;
pub mod raw;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Raw(Channels),
}

impl OutputFormat {
    /// PNG for a `.png` extension in any case, raw data with `channels` otherwise
    pub fn for_path(path: &Path, channels: Channels) -> Self {
        let is_png = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("png"));
        if is_png {
            Self::Png
        } else {
            Self::Raw(channels)
        }
    }
}

pub fn save_image(pixels: &PixelBuffer, path: &Path, channels: Channels) -> Result<()> {
    let output_file = open_output_file(path)?;
    let path_name = path.display().to_string();
    match OutputFormat::for_path(path, channels) {
        OutputFormat::Png => png::write_png(pixels, &output_file)
            .map_err(|e| Error::FailedToEncodeContainerImage(path_name, e))?,
        OutputFormat::Raw(channels) => {
            let mut output_file_writer = BufWriter::new(&output_file);
            raw::RawImageWriter::new(&mut output_file_writer)
                .write_image(pixels, channels)
                .map_err(|e| Error::FailedToWriteImageData(path_name, e))?
        }
    }
    log::info!("Saved {}x{} image to {}", pixels.width(), pixels.height(), path.display());
    Ok(())
}
