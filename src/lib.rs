//! # netaddrs
//!
//! Resolve a list of IP addresses from a single configuration string.
//!
//! The string is either a DNS name, looked up through the system resolver,
//! or `exec=<command> [args...]`, in which case the command is run and the
//! addresses it prints on stdout are returned. This is typically used to
//! discover the servers to join or the addresses to bind to.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use netaddrs::{ip_addrs, Context, TracingLogger};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::background().with_timeout(Duration::from_secs(5));
//!     let addrs = ip_addrs(&ctx, "exec=/usr/local/bin/discover --dc east", &TracingLogger)
//!         .await
//!         .unwrap();
//!     for addr in addrs {
//!         println!("{}", addr);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Errors and the cancellation [`Context`]
//! - [`dns`] - DNS strategy and its backends
//! - [`exec`] - Executable strategy
//! - [`addr`] - [`ResolvedAddr`] and the output token parser
//! - [`logger`] - The debug sink consumed by both strategies

pub mod addr;
pub mod base;
pub mod dns;
pub mod exec;
pub mod logger;
mod resolver;

pub use addr::ResolvedAddr;
pub use base::cancel::{CancelHandle, Context, ContextError};
pub use base::error::{Error, ExecError, LookupError};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use resolver::{ip_addrs, Resolver, EXEC_PREFIX};
