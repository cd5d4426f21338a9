//! File logging, one log file per tool.

use anyhow::Result;
use log::LevelFilter;

/// Dispatch `log` records to `<file>` as timestamped
/// `YYYY-MM-DD HH:MM:SS - LEVEL - message` lines.
pub fn setup_logging(file: &str, level: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{timestamp} - {level} - {message}",
                timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                level = record.level(),
                message = message,
            ))
        })
        .chain(fern::log_file(file)?)
        .apply()?;
    Ok(())
}
