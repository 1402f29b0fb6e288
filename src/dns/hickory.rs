//! Async DNS resolver using hickory-dns.
//!
//! An alternative to [`GaiResolver`](super::GaiResolver) that speaks DNS
//! itself instead of going through libc. It reads the system resolver
//! configuration, queries A and AAAA records together, and can be cancelled
//! mid-flight simply by dropping the lookup future.

use super::{Name, Resolve, Resolving};
use crate::addr::ResolvedAddr;
use crate::base::error::LookupError;
use hickory_resolver::{
    config::{LookupIpStrategy, ResolverConfig},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use std::{io, sync::LazyLock};

/// Async DNS resolver backed by hickory-dns.
///
/// The underlying resolver is lazily initialized on first use and shared
/// across all instances via a static `LazyLock`.
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: &'static LazyLock<TokioResolver>,
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver`.
    ///
    /// The resolver reads the system DNS configuration on first use; if
    /// that fails it falls back to hickory's defaults.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(|| {
            let mut builder = match TokioResolver::builder_tokio() {
                Ok(builder) => {
                    tracing::debug!("Using system DNS configuration");
                    builder
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read system DNS config, using defaults"
                    );
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            };

            // A and AAAA in one lookup
            builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

            builder.build()
        });

        Self {
            resolver: &RESOLVER,
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move {
            let domain = name.as_str();
            tracing::debug!(domain = %domain, "resolving via hickory-dns");

            let lookup = resolver.resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                LookupError::Io(lookup_failure(e.is_no_records_found(), e.to_string()))
            })?;

            let addrs: Vec<ResolvedAddr> = lookup.iter().map(ResolvedAddr::new).collect();

            if addrs.is_empty() {
                return Err(LookupError::NoAddresses);
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "hickory-dns resolution complete");
            Ok(addrs)
        })
    }
}

/// Only an answer without records means the name does not resolve; anything
/// else (timeouts, unreachable nameservers) is a transport failure.
fn lookup_failure(no_records: bool, message: String) -> io::Error {
    let kind = if no_records {
        io::ErrorKind::NotFound
    } else {
        io::ErrorKind::Other
    };
    io::Error::new(kind, message)
}
