use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if let Err(file_error) = log4rs::init_file(CONFIG_FILE, Default::default()) {
        if let Err(e) = init_console_fallback() {
            eprintln!(
                "Logging disabled: {} ({}), fallback failed: {}",
                CONFIG_FILE, file_error, e
            );
        }
    }
}

fn init_console_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

pub fn log_buffer_head(label: &str, bytes: &[u8]) {
    const HEAD_LENGTH: usize = 16;
    fn get_byte_array(bytes: &[u8]) -> Vec<String> {
        bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
    }
    log::debug!(
        "{} ({} bytes) {:?}",
        label,
        bytes.len(),
        get_byte_array(&bytes[..bytes.len().min(HEAD_LENGTH)])
    );
}
