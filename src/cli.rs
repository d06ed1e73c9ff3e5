use crate::image::Dimension;
use crate::history::History;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgGroup, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_shape_arguments(command);
        let command = Self::register_free_dimension_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_browse_arguments(command);
        Self::register_history_arguments(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_shape_arguments(command: Command) -> Command {
        command
            .arg(Self::create_width_argument())
            .arg(Self::create_height_argument())
            .arg(Self::create_channels_argument())
    }

    fn register_free_dimension_argument(command: Command) -> Command {
        command.arg(Self::create_free_dimension_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_browse_arguments(command: Command) -> Command {
        command
            .arg(arg!(--next "View the next image file in the same directory").action(ArgAction::SetTrue))
            .arg(arg!(--prev "View the previous image file in the same directory").action(ArgAction::SetTrue))
            .group(ArgGroup::new("browse").args(["next", "prev"]).multiple(false))
    }

    fn register_history_arguments(command: Command) -> Command {
        command
            .arg(Self::create_history_argument())
            .arg(
                arg!(no_history: --"no-history" "Neither read nor write the history file")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("history"),
            )
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to a binary image or an image file")
            .value_parser(value_parser!(String))
            .required(false)
    }

    fn create_width_argument() -> Arg {
        arg!(width: -W --width <WIDTH> "Image width in pixels")
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_height_argument() -> Arg {
        arg!(height: -H --height <HEIGHT> "Image height in pixels")
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_channels_argument() -> Arg {
        arg!(channels: -c --channels <CHANNELS> "Channels: 1 (gray), 3 (RGB), 4 (RGBA)")
            .value_parser(value_parser!(u8).range(1..=4))
    }

    fn create_free_dimension_argument() -> Arg {
        arg!(free_dimension: -f --free_dimension <DIMENSION> "Dimension adjusted when the data does not fit")
            .default_value("Height")
            .value_parser(value_parser!(Dimension))
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output <FILE> "Save the displayed image (PNG for .png, raw data otherwise)")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_history_argument() -> Arg {
        arg!(history: --history <FILE> "History file with the last path and shape")
            .value_parser(value_parser!(PathBuf))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            width: matches.get_one::<u32>("width").copied(),
            height: matches.get_one::<u32>("height").copied(),
            channels: matches.get_one::<u8>("channels").copied(),
            free_dimension: Self::extract_free_dimension_argument(matches),
            output_file: matches.get_one::<PathBuf>("output_file").cloned(),
            step: Self::extract_step_argument(matches),
            history_file: Self::extract_history_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> Option<String> {
        matches.get_one::<String>("input_file").cloned()
    }

    fn extract_free_dimension_argument(matches: &ArgMatches) -> Dimension {
        matches
            .get_one::<Dimension>("free_dimension")
            .expect("Free dimension must be provided, but was unset.")
            .to_owned()
    }

    fn extract_step_argument(matches: &ArgMatches) -> isize {
        if matches.get_flag("next") {
            1
        } else if matches.get_flag("prev") {
            -1
        } else {
            0
        }
    }

    fn extract_history_argument(matches: &ArgMatches) -> Option<PathBuf> {
        if matches.get_flag("no_history") {
            return None;
        }
        matches
            .get_one::<PathBuf>("history")
            .cloned()
            .or_else(History::default_location)
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
