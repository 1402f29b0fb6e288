use crate::addr::AddrParseError;
use crate::base::cancel::ContextError;
use std::io;
use thiserror::Error;

/// Error returned by [`ip_addrs`](crate::ip_addrs).
#[derive(Debug, Error)]
pub enum Error {
    /// The DNS lookup failed, was cancelled or returned nothing.
    #[error("failed to resolve DNS name: {host}: {source}")]
    Dns {
        host: String,
        #[source]
        source: LookupError,
    },

    /// The `exec=` strategy failed.
    #[error("failed to retrieve IP addresses from executable: {0}")]
    Exec(#[source] ExecError),
}

impl Error {
    /// Returns the context failure behind this error, if the call was
    /// cancelled or ran past its deadline.
    pub fn context_error(&self) -> Option<ContextError> {
        match self {
            Error::Dns {
                source: LookupError::Context(e),
                ..
            } => Some(*e),
            Error::Exec(ExecError::Context(e)) => Some(*e),
            _ => None,
        }
    }
}

/// Failure of a single DNS lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("no addresses returned")]
    NoAddresses,

    #[error("lookup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Failure of the executable strategy.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Nothing follows the `exec=` prefix.
    #[error("no executable specified after exec=")]
    MissingCommand,

    /// The process could not be started.
    #[error("{command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The process exited unsuccessfully. `code` is -1 when it was
    /// terminated by a signal.
    #[error("executable failed with exit code {code}: {stderr}")]
    ExitStatus { code: i32, stderr: String },

    #[error("executable returned no output to stdout")]
    NoOutput,

    #[error("executable returned invalid IP address: {}", .0.text())]
    InvalidAddress(#[from] AddrParseError),

    /// Reading the output pipes or waiting on the child failed.
    #[error("failed to collect executable output: {0}")]
    Io(#[source] io::Error),

    #[error(transparent)]
    Context(#[from] ContextError),
}
