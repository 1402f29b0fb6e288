//! Ergonomic error context helpers.
//!
//! Provides extension traits for attaching the resolution target to
//! strategy-level failures, turning them into caller-facing [`Error`]s.

use crate::base::error::{Error, ExecError, LookupError};

/// Extension trait for adding the host name to DNS lookup results.
pub trait LookupResultExt<T> {
    /// Add DNS resolution context to a lookup error.
    ///
    /// # Example
    /// ```ignore
    /// use netaddrs::base::context::LookupResultExt;
    ///
    /// let addrs = resolver.resolve(name).await.dns_context("example.com")?;
    /// // Error: "failed to resolve DNS name: example.com: no addresses returned"
    /// ```
    fn dns_context(self, host: &str) -> Result<T, Error>;
}

impl<T> LookupResultExt<T> for Result<T, LookupError> {
    fn dns_context(self, host: &str) -> Result<T, Error> {
        self.map_err(|source| Error::Dns {
            host: host.to_string(),
            source,
        })
    }
}

/// Extension trait for wrapping executable strategy results.
pub trait ExecResultExt<T> {
    /// Mark the error as coming from the `exec=` strategy.
    fn exec_context(self) -> Result<T, Error>;
}

impl<T> ExecResultExt<T> for Result<T, ExecError> {
    fn exec_context(self) -> Result<T, Error> {
        self.map_err(Error::Exec)
    }
}
