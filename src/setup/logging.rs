use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

fn colored_level(level: Level) -> ColoredString {
    let label = level.to_string();
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow().bold(),
        Level::Info => label.green().bold(),
        Level::Debug => label.blue().bold(),
        Level::Trace => label.purple().bold(),
    }
}

/// Sets up logging for the server.
///
/// Lines look like `2024-01-01T12:00:00Z INFO notes_api::http: message`, with the
/// level colored. Defaults to `Info`; `RUST_LOG` overrides it.
pub fn setup_log() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}: {}",
                buf.timestamp(),
                colored_level(record.level()),
                record.target().dimmed(),
                record.args()
            )
        })
        .filter(None, DEFAULT_LOG_LEVEL)
        .parse_default_env()
        .init();
}
