use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
use error::Error;
use history::History;
use crate::image::Channels;
use viewer::{normalize_path, View, ViewRequest, Viewer};

pub mod browse;
mod cli;
pub mod error;
pub mod history;
pub mod image;
mod logger;
pub mod session;
pub mod viewer;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    channels: Option<u8>,
    free_dimension: crate::image::Dimension,
    output_file: Option<PathBuf>,
    step: isize,
    history_file: Option<PathBuf>,
}

pub(crate) fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e))
}

fn initial_request(arguments: &Arguments, history: History) -> ViewRequest {
    ViewRequest {
        path: arguments.input_file.clone().unwrap_or(history.path),
        width: arguments.width.unwrap_or(history.width),
        height: arguments.height.unwrap_or(history.height),
        channels: arguments.channels.unwrap_or(history.channels),
        free: arguments.free_dimension,
    }
}

fn remember(history_file: &Path, request: &ViewRequest, view: &View, viewer: &Viewer) {
    let (width, height) = match view {
        View::Image(rendered) => (rendered.shape.width(), rendered.shape.height()),
        View::Blank { .. } => (request.width, request.height),
    };
    let history = History {
        path: normalize_path(&request.path).display().to_string(),
        width,
        height,
        channels: viewer
            .channels()
            .map(|channels| channels.count())
            .unwrap_or(request.channels),
    };
    if let Err(e) = history.store(history_file) {
        log::warn!("{}", e);
    }
}

/// Render the requested file once, optionally save it, and update the history.
pub fn view_binary_image(arguments: &Arguments) -> Result<View> {
    let saved = arguments.history_file.as_deref().and_then(History::read);
    let mut viewer = match saved
        .as_ref()
        .and_then(|history| Channels::try_from(history.channels).ok())
    {
        Some(previous) => Viewer::with_channels(previous),
        None => Viewer::new(),
    };
    let history = saved.unwrap_or_default();
    let mut request = initial_request(arguments, history);
    if arguments.step != 0 {
        let next = browse::neighbour(&normalize_path(&request.path), arguments.step)?;
        request.path = next.display().to_string();
    }

    let view = viewer.view(&request)?;
    if let Some(output_file) = &arguments.output_file {
        match &view {
            View::Image(rendered) => viewer.save(rendered, output_file)?,
            View::Blank { .. } => log::warn!("Nothing to save to {}", output_file.display()),
        }
    }
    if let Some(history_file) = &arguments.history_file {
        remember(history_file, &request, &view, &viewer);
    }
    Ok(view)
}
