//! Entry point that picks a strategy from the configuration string.

use crate::addr::ResolvedAddr;
use crate::base::cancel::Context;
use crate::base::context::{ExecResultExt, LookupResultExt};
use crate::base::error::Error;
use crate::dns::{self, GaiResolver, Resolve};
use crate::exec;
use crate::logger::Logger;
use std::{fmt, sync::Arc};

/// Prefix selecting the executable strategy.
pub const EXEC_PREFIX: &str = "exec=";

/// Looks up IP addresses using the method described by `cfg`, with the
/// system DNS resolver.
///
/// If `cfg` is a DNS name, addresses are looked up by querying the system
/// resolver for the A and AAAA records of that name.
///
/// If `cfg` starts with `exec=`, addresses are read from the output of the
/// command after the prefix. Arguments are separated by whitespace and
/// cannot contain spaces themselves. See [`exec`] for the rules the
/// executable must follow.
///
/// Use `ctx` to cancel the operation or set a deadline.
pub async fn ip_addrs(
    ctx: &Context,
    cfg: &str,
    log: &dyn Logger,
) -> Result<Vec<ResolvedAddr>, Error> {
    Resolver::default().ip_addrs(ctx, cfg, log).await
}

/// Resolver with a configurable DNS backend.
#[derive(Clone)]
pub struct Resolver {
    dns: Arc<dyn Resolve>,
}

impl Resolver {
    /// Creates a resolver that uses the system DNS resolver.
    pub fn new() -> Self {
        Self::with_dns(Arc::new(GaiResolver::new()))
    }

    /// Creates a resolver that sends DNS names to `dns`.
    pub fn with_dns(dns: Arc<dyn Resolve>) -> Self {
        Self { dns }
    }

    /// Same as [`ip_addrs`], using this resolver's DNS backend.
    pub async fn ip_addrs(
        &self,
        ctx: &Context,
        cfg: &str,
        log: &dyn Logger,
    ) -> Result<Vec<ResolvedAddr>, Error> {
        match cfg.strip_prefix(EXEC_PREFIX) {
            Some(command_line) => exec::run(ctx, command_line, log).await.exec_context(),
            None => dns::lookup(ctx, &*self.dns, cfg, log)
                .await
                .dns_context(cfg),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
