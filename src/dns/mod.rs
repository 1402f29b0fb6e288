//! DNS strategy.
//!
//! Provides pluggable DNS resolution with two backends:
//! - System resolver (getaddrinfo via thread pool), the default
//! - Async hickory-dns resolver
//!
//! [`lookup`] runs one backend against a [`Context`] and reports the result
//! to the debug sink.

mod gai;
mod hickory;
mod resolve;

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolve::{Name, Resolve, Resolving};

use crate::addr::ResolvedAddr;
use crate::base::cancel::Context;
use crate::base::error::LookupError;
use crate::logger::Logger;

/// Resolves `host` once through `dns`, giving up as soon as `ctx` is done.
pub async fn lookup(
    ctx: &Context,
    dns: &dyn Resolve,
    host: &str,
    log: &dyn Logger,
) -> Result<Vec<ResolvedAddr>, LookupError> {
    if let Some(err) = ctx.err() {
        return Err(err.into());
    }

    let addrs = tokio::select! {
        res = dns.resolve(Name::new(host)) => res?,
        err = ctx.done() => return Err(err.into()),
    };

    log.debug("Resolved DNS name", &[("name", &host), ("ip-addrs", &addrs)]);
    Ok(addrs)
}
