use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Env, Target};

use crate::config::LogConfig;
use crate::error::Result;

/// Route `log` output to a file, since the terminal belongs to the UI.
/// `RUST_LOG` wins over the configured level.
pub fn init(config: &LogConfig, path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or(config.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    log::info!("logging to {}", path.display());
    Ok(())
}
