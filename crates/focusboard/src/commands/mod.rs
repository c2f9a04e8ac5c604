pub mod charts;
pub mod export;
pub mod ingest;
pub mod init;
pub mod send;
pub mod version;
pub mod view;

use focusboard_core::Config;
use focusboard_report::Pipeline;
use focusboard_store::{CsvRecordStore, Paths};

/// Resolve paths and load config with environment overrides
pub fn load_config() -> anyhow::Result<(Paths, Config)> {
    let paths = Paths::new()?;
    let config = Config::load(&paths.config_file())?;
    Ok((paths, config))
}

pub fn pipeline(paths: &Paths, config: &Config) -> Pipeline<CsvRecordStore> {
    Pipeline::new(CsvRecordStore::new(config.data_file(paths)), config)
}

/// Single-threaded runtime for the network-bound commands
pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

pub const NO_DATA_MESSAGE: &str = "No sessions match the filter.";
