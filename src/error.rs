use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("a gradient needs at least two stops, got {0}")]
    TooFewStops(usize),

    #[error("failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a usable TrueType/OpenType face")]
    FontParse(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest is not valid JSON: {0}")]
    ManifestJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
