//! System DNS resolver using getaddrinfo.
//!
//! This resolver uses the operating system's native DNS resolution via
//! `getaddrinfo`, executed on tokio's blocking pool so the async runtime is
//! never stalled. It is the default backend: it honours /etc/hosts,
//! /etc/resolv.conf, nsswitch and whatever else the platform configures.

use super::{Name, Resolve, Resolving};
use crate::addr::ResolvedAddr;
use crate::base::error::LookupError;
use std::net::ToSocketAddrs;

/// System DNS resolver using `getaddrinfo` in a thread pool.
///
/// A lookup that is abandoned because its context is done keeps its
/// blocking thread until `getaddrinfo` returns; the result is discarded.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            let host = name.as_str().to_string();

            let addrs = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, "resolving via getaddrinfo");
                (host.as_str(), 0u16)
                    .to_socket_addrs()
                    .map(|iter| iter.map(ResolvedAddr::from).collect::<Vec<_>>())
            })
            .await??;

            if addrs.is_empty() {
                return Err(LookupError::NoAddresses);
            }

            tracing::debug!(domain = %name, count = addrs.len(), "getaddrinfo resolution complete");
            Ok(addrs)
        })
    }
}
