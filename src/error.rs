use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidDimension(&'static str),
    InvalidChannelCount(u8),
    OversizedShape { width: u64, height: u64 },
    MismatchOfSizeBetweenShapeAndPixels(usize, usize),
    InputFileNotFound(String),
    UnableToReadInputFile(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteImageData(String, std::io::Error),
    FailedToEncodeContainerImage(String, ::image::ImageError),
    UnableToListDirectory(String, std::io::Error),
    UnableToWriteHistory(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimension(name) => {
                write!(f, "Image {} must be at least 1 pixel", name)
            }
            Self::InvalidChannelCount(channels) => {
                write!(
                    f,
                    "Unsupported channel count {}. Expected 1 (gray), 3 (RGB) or 4 (RGBA).",
                    channels
                )
            }
            Self::OversizedShape { width, height } => {
                write!(
                    f,
                    "Image size {}x{} exceeds the limit of {} pixels per side",
                    width,
                    height,
                    crate::image::MAX_IMAGE_SIDE
                )
            }
            Self::MismatchOfSizeBetweenShapeAndPixels(expected, actual) => {
                write!(
                    f,
                    "Pixel buffer holds {} bytes, but its shape requires {}",
                    actual, expected
                )
            }
            Self::InputFileNotFound(path) => {
                write!(f, "Input file '{}' not found", path)
            }
            Self::UnableToReadInputFile(path, error) => {
                write!(f, "Unable to read input file '{}': {}", path, error)
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteImageData(path, error) => {
                write!(f, "Failed to write image data to '{}': {}", path, error)
            }
            Self::FailedToEncodeContainerImage(path, error) => {
                write!(f, "Failed to encode image '{}': {}", path, error)
            }
            Self::UnableToListDirectory(path, error) => {
                write!(f, "Unable to list directory '{}': {}", path, error)
            }
            Self::UnableToWriteHistory(path, error) => {
                write!(f, "Unable to write history file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {}
