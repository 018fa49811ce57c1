//! Logging utilities and initialization for keyflash

use anyhow::Result;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

/// Pick a level from the -v/-q flags, falling back to the configured default
pub fn select_level(verbose: u8, quiet: bool, default: LevelFilter) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => default,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Initialize logging for the keyflash CLI
pub fn init_cli_logging(
    verbose: u8,
    quiet: bool,
    tui_mode: bool,
    default: LevelFilter,
) -> Result<()> {
    let level = select_level(verbose, quiet, default);

    if tui_mode {
        // File logging only for TUI mode to avoid terminal interference
        init_file_logger(level)?;
    } else {
        Builder::from_default_env()
            .target(Target::Stderr)
            .filter_level(level)
            .format_timestamp_secs()
            .format_module_path(false)
            .init();
    }

    log_panics::init();

    log::debug!("keyflash logging initialized with level: {:?}", level);
    Ok(())
}

/// `<data_local_dir>/keyflash/logs`
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::APP_NAME)
        .join("logs")
}

/// Initialize file-based logging for TUI mode
fn init_file_logger(level: LevelFilter) -> Result<()> {
    use std::fs::OpenOptions;

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_file = log_dir.join("keyflash.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    Builder::from_default_env()
        .target(Target::Pipe(Box::new(file)))
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_selection() {
        assert_eq!(select_level(0, true, LevelFilter::Info), LevelFilter::Error);
        assert_eq!(select_level(3, true, LevelFilter::Info), LevelFilter::Error);
        assert_eq!(select_level(0, false, LevelFilter::Warn), LevelFilter::Warn);
        assert_eq!(select_level(1, false, LevelFilter::Info), LevelFilter::Debug);
        assert_eq!(select_level(2, false, LevelFilter::Info), LevelFilter::Trace);
    }

    #[test]
    fn test_log_dir_is_app_scoped() {
        let dir = log_dir();
        assert!(dir.ends_with("keyflash/logs"));
    }
}
