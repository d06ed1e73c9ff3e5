use std::env::args_os;

use binary_image_viewer::viewer::View;
use binary_image_viewer::{view_binary_image, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match view_binary_image(&arguments) {
        Ok(View::Image(rendered)) => println!(
            "{}: {}x{}, {} channel(s) from {}",
            rendered.title,
            rendered.shape.width(),
            rendered.shape.height(),
            rendered.shape.channels().count(),
            rendered.source
        ),
        Ok(view @ View::Blank { reason, .. }) => {
            println!("{}: nothing to display ({})", view.title(), reason)
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Viewing failed because of: {}", e);
        }
    }
}
