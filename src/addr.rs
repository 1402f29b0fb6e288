//! Resolved addresses and the token parser shared by both strategies.

use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    str::FromStr,
};
use thiserror::Error;

/// An IP address with an optional zone (IPv6 scope) identifier.
///
/// The textual form is `<ip>` or `<ip>%<zone>`. An empty zone is the same
/// as no zone.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct ResolvedAddr {
    ip: IpAddr,
    zone: Option<Box<str>>,
}

impl ResolvedAddr {
    /// Creates an address without a zone.
    #[inline]
    pub fn new(ip: IpAddr) -> Self {
        Self { ip, zone: None }
    }

    /// Creates an address with a zone. An empty `zone` means no zone.
    pub fn with_zone(ip: IpAddr, zone: impl Into<Box<str>>) -> Self {
        let zone = zone.into();
        Self {
            ip,
            zone: (!zone.is_empty()).then_some(zone),
        }
    }

    #[inline]
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    #[inline]
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }
}

impl From<IpAddr> for ResolvedAddr {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

/// Keeps the IPv6 scope id reported by the system resolver as the zone.
impl From<SocketAddr> for ResolvedAddr {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V6(v6) if v6.scope_id() != 0 => {
                Self::with_zone(addr.ip(), v6.scope_id().to_string())
            }
            _ => Self::new(addr.ip()),
        }
    }
}

impl fmt::Display for ResolvedAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone {
            Some(zone) => write!(f, "{}%{}", self.ip, zone),
            None => fmt::Display::fmt(&self.ip, f),
        }
    }
}

impl fmt::Debug for ResolvedAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A token that is not an `ip[%zone]` literal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid IP address: {text}")]
pub struct AddrParseError {
    text: String,
}

impl AddrParseError {
    /// The offending text: the address part when the zone split succeeded,
    /// otherwise the whole token.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl FromStr for ResolvedAddr {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, zone) = match s.split_once('%') {
            Some((_, zone)) if zone.contains('%') => {
                return Err(AddrParseError { text: s.to_string() });
            }
            Some((addr, zone)) => (addr, zone),
            None => (s, ""),
        };

        let ip = addr.parse::<IpAddr>().map_err(|_| AddrParseError {
            text: addr.to_string(),
        })?;
        Ok(Self::with_zone(ip, zone))
    }
}

/// Strips one layer of surrounding double quotes.
pub(crate) fn trim_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Parses a single output token: optionally quoted, optionally zoned.
pub fn parse_token(token: &str) -> Result<ResolvedAddr, AddrParseError> {
    trim_quotes(token).parse()
}

/// Parses every whitespace-separated token of `output`, in order.
///
/// Stops at the first invalid token; no partial result is returned.
pub fn parse_tokens(output: &str) -> Result<Vec<ResolvedAddr>, AddrParseError> {
    output.split_whitespace().map(parse_token).collect()
}
