mod config;
pub mod logging;

pub use config::{
    CHECKSUM_SEED, DEFAULT_CHUNK_SIZE, PROGRAM_LOG_LEVEL, PROGRAM_NAME, REPORT_FILE_NAME,
    default_report_path,
};

pub use logging::init;
