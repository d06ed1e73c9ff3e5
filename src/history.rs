use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::Result;

/// The last viewed path and shape, stored as four lines of text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl Default for History {
    fn default() -> Self {
        History {
            path: String::new(),
            width: 256,
            height: 256,
            channels: 3,
        }
    }
}

impl History {
    /// The executable's path with a `.cfg` extension
    pub fn default_location() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .map(|executable| executable.with_extension("cfg"))
    }

    /// Load the history, falling back to defaults when it is absent or damaged
    pub fn load(path: &Path) -> Self {
        Self::read(path).unwrap_or_default()
    }

    /// The saved history, `None` when it is absent or damaged
    pub fn read(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No history at {}", path.display());
                return None;
            }
            Err(e) => {
                log::warn!("Unable to read history {}: {}", path.display(), e);
                return None;
            }
        };
        let history = Self::parse(&content);
        if history.is_none() {
            log::warn!("Ignoring malformed history {}", path.display());
        }
        history
    }

    fn parse(content: &str) -> Option<Self> {
        let mut lines = content.split('\n');
        let path = lines.next()?.trim_end_matches('\r').to_owned();
        let width = lines.next()?.trim().parse().ok()?;
        let height = lines.next()?.trim().parse().ok()?;
        let channels = lines.next()?.trim().parse().ok()?;
        Some(History {
            path,
            width,
            height,
            channels,
        })
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        let content = [
            self.path.clone(),
            self.width.to_string(),
            self.height.to_string(),
            self.channels.to_string(),
        ]
        .join("\n");
        fs::write(path, content)
            .map_err(|e| Error::UnableToWriteHistory(path.display().to_string(), e))
    }
}
