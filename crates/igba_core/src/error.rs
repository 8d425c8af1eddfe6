use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}{}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("git is required but was not found on PATH.")]
    GitMissing,

    #[error("Operation cancelled.")]
    Cancelled,

    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Target directory is not empty: {}", .0.display())]
    TargetNotEmpty(PathBuf),

    #[error("Target path exists and is not a directory: {}", .0.display())]
    TargetNotDirectory(PathBuf),

    #[error("Template path does not exist: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Butano is required to continue.")]
    ButanoRequired,

    #[error("Failed to parse config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn io(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
