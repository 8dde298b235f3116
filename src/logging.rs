//! File logging via log4rs.
//!
//! The terminal is owned by the renderer, so log records go to a file and only
//! when a path is configured.

use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} {m}{n}";

/// Install the global logger writing to `path`.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .context("invalid log configuration")?;

    log4rs::init_config(config).context("logger already installed")?;
    Ok(())
}
