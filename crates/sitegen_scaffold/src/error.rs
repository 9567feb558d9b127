use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to read directory {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{dir}: `{first}` and `{second}` both export `{name}`")]
    DuplicateName {
        dir: PathBuf,
        name: String,
        first: String,
        second: String,
    },
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
