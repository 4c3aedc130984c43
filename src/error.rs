use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` worker thread panicked")]
    Panicked { command: String },

    #[error("could not find a process that uses port `{0}`")]
    PortNotFound(u16),

    #[error("expected a port number or a list of port numbers, got {0}")]
    InvalidArgument(String),
}

impl Error {
    /// True when the external utility could not run or failed.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(
            self,
            Self::Spawn { .. } | Self::Exit { .. } | Self::Panicked { .. }
        )
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PortNotFound(_))
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
