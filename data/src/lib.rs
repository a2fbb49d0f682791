pub mod gallery;
pub mod log;
pub mod state;

pub use gallery::Gallery;
pub use state::State;

use std::path::PathBuf;

/// Env var overriding where Cardflow keeps its state, log and gallery.
pub const DATA_PATH_ENV: &str = "CARDFLOW_DATA_PATH";

pub fn get_data_path(relative: &str) -> PathBuf {
    let base = std::env::var(DATA_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs_next::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("cardflow")
        });

    base.join(relative)
}

#[derive(thiserror::Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Persistence error: {0}")]
    Persistence(#[from] serde_json::Error),
}
