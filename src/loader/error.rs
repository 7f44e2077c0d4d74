//! Script loading error types.

use thiserror::Error;

/// Errors raised by the load context and the script loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Circular load detected for {file} from {parent}")]
    CircularLoad { file: String, parent: String },

    #[error("Unknown file loaded: {0}")]
    UnknownFile(String),

    #[error("Synchronous remote load rejected: {0}")]
    SyncRemote(String),

    #[error("Remote loading is disabled: {0}")]
    RemoteDisabled(String),

    #[error("IO error when reading `{0}`")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Raised by the executed script itself.
    #[error(transparent)]
    Script(anyhow::Error),
}

impl LoadError {
    /// Wrap an engine error, unwrapping loader errors raised by nested loads
    /// so they surface unchanged.
    pub(crate) fn from_script(err: anyhow::Error) -> Self {
        match err.downcast::<LoadError>() {
            Ok(err) => err,
            Err(err) => Self::Script(err),
        }
    }
}
