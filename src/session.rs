use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::image::reader::container::ContainerImageReader;
use crate::logger::log_buffer_head;
use crate::Result;

/// What a source file turned out to be
pub enum CachedSource {
    Container(ContainerImageReader),
    Raw(Vec<u8>),
}

/// Holds the last loaded file so that shape edits do not hit the disk again.
///
/// The cache is keyed on the path and dropped as soon as a different path is
/// requested.
#[derive(Default)]
pub struct SessionCache {
    path: Option<PathBuf>,
    source: Option<CachedSource>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.source.is_some() && self.path.as_deref() == Some(path)
    }

    pub fn invalidate(&mut self) {
        self.path = None;
        self.source = None;
    }

    pub fn load(&mut self, path: &Path) -> Result<&CachedSource> {
        if self.is_cached(path) {
            log::debug!("Using cached data of {}", path.display());
        } else {
            self.invalidate();
            let source = read_source(path)?;
            self.path = Some(path.to_path_buf());
            self.source = Some(source);
        }
        self.source
            .as_ref()
            .ok_or_else(|| Error::InputFileNotFound(path.display().to_string()))
    }
}

fn read_source(path: &Path) -> Result<CachedSource> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::InputFileNotFound(path.display().to_string()),
        _ => Error::UnableToReadInputFile(path.display().to_string(), e),
    })?;
    log_buffer_head("Read source file", &bytes);
    Ok(match ContainerImageReader::detect(&bytes) {
        Some(container) => CachedSource::Container(container),
        None => CachedSource::Raw(bytes),
    })
}
