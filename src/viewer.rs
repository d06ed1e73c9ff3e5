use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::image::reader::raw::RawImageReader;
use crate::image::reader::{Decoded, ImageReader};
use crate::image::shape::ChannelSelector;
use crate::image::writer::save_image;
use crate::image::{Channels, Dimension, ImageShape, PixelBuffer};
use crate::session::{CachedSource, SessionCache};
use crate::Result;

pub const APP_TITLE: &str = "Binary Image Viewer";

/// One render pass worth of user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewRequest {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub free: Dimension,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Raw,
    Container,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "raw data"),
            Self::Container => write!(f, "image file"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlankReason {
    Missing,
    Unreadable,
    Oversized,
}

impl Display for BlankReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "no such file"),
            Self::Unreadable => write!(f, "file could not be read"),
            Self::Oversized => write!(f, "image too large to display"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub pixels: PixelBuffer,
    pub shape: ImageShape,
    pub source: SourceKind,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Blank { title: String, reason: BlankReason },
    Image(Rendered),
}

impl View {
    pub fn title(&self) -> &str {
        match self {
            Self::Blank { title, .. } => title,
            Self::Image(rendered) => &rendered.title,
        }
    }
}

/// Strip surrounding quotes and make the path absolute. An empty path is the working directory.
pub fn normalize_path(path: &str) -> PathBuf {
    let trimmed = path.trim_matches(|c| c == '\'' || c == '"');
    if trimmed.is_empty() {
        return std::env::current_dir().unwrap_or_default();
    }
    std::path::absolute(trimmed).unwrap_or_else(|_| PathBuf::from(trimmed))
}

fn file_title(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{} - {}", name, APP_TITLE)
}

/// Renders requests one after another, keeping the session state between them.
#[derive(Default)]
pub struct Viewer {
    cache: SessionCache,
    channel_selector: ChannelSelector,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channels(channels: Channels) -> Self {
        Self {
            cache: SessionCache::new(),
            channel_selector: ChannelSelector::with_previous(channels),
        }
    }

    /// Channel count of the last request, after coercion
    pub fn channels(&self) -> Option<Channels> {
        self.channel_selector.previous()
    }

    pub fn view(&mut self, request: &ViewRequest) -> Result<View> {
        let channels = self.channel_selector.select(request.channels)?;
        let requested = ImageShape::new(request.width, request.height, channels)?;
        let path = normalize_path(&request.path);

        if !path.is_file() {
            self.cache.invalidate();
            return Ok(View::Blank {
                title: APP_TITLE.to_owned(),
                reason: BlankReason::Missing,
            });
        }

        let title = file_title(&path);
        let (decoded, source) = match self.cache.load(&path) {
            Ok(CachedSource::Container(reader)) => (
                reader.read_image(&requested, request.free),
                SourceKind::Container,
            ),
            Ok(CachedSource::Raw(bytes)) => (
                RawImageReader::new(bytes).read_image(&requested, request.free),
                SourceKind::Raw,
            ),
            Err(e @ Error::InputFileNotFound(_)) | Err(e @ Error::UnableToReadInputFile(..)) => {
                log::warn!("{}", e);
                return Ok(View::Blank {
                    title: APP_TITLE.to_owned(),
                    reason: BlankReason::Unreadable,
                });
            }
            Err(e) => return Err(e),
        };

        match decoded {
            Ok(Decoded { pixels, shape }) => Ok(View::Image(Rendered {
                pixels,
                shape,
                source,
                title,
            })),
            Err(e @ Error::OversizedShape { .. }) => {
                log::warn!("{}", e);
                Ok(View::Blank {
                    title,
                    reason: BlankReason::Oversized,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Save as PNG for a `.png` path, as raw data with the rendered channel count otherwise
    pub fn save(&self, rendered: &Rendered, path: &Path) -> Result<()> {
        save_image(&rendered.pixels, path, rendered.shape.channels())
    }
}
