//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that let
//! the DNS strategy run on different backends.

use crate::addr::ResolvedAddr;
use crate::base::error::LookupError;
use std::{fmt, future::Future, pin::Pin, sync::Arc};

/// A domain name to resolve into IP addresses.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Vec<ResolvedAddr>, LookupError>> + Send>>;

/// Trait for DNS resolution.
///
/// Implementations look up both A and AAAA records and return the
/// addresses in the order the backend produced them. An empty answer is an
/// error. Cancellation is handled by the caller, which drops the future
/// once its [`Context`](crate::Context) is done.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to IP addresses.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_name_from_str() {
        let name = Name::from("example.com");
        assert_eq!(name.as_str(), "example.com");
        assert_eq!(name.to_string(), "example.com");
    }

    #[test]
    fn test_name_from_string() {
        let domain = String::from("test.example.com");
        let name = Name::from(domain);
        assert_eq!(name.as_str(), "test.example.com");
    }

    #[test]
    fn test_name_debug_is_quoted() {
        assert_eq!(format!("{:?}", Name::new("example.com")), "\"example.com\"");
    }

    struct MockResolver {
        response: Vec<ResolvedAddr>,
    }

    impl Resolve for MockResolver {
        fn resolve(&self, _name: Name) -> Resolving {
            let addrs = self.response.clone();
            Box::pin(async move { Ok(addrs) })
        }
    }

    #[tokio::test]
    async fn test_arc_forwards() {
        let mock: Arc<dyn Resolve> = Arc::new(MockResolver {
            response: vec![ResolvedAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)))],
        });

        let addrs = mock.resolve(Name::new("example.com")).await.unwrap();
        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].ip(), IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)));
    }
}
