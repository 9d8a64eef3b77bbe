//! Credential bootstrap: derive a narrowly-scoped administrative
//! credential from the operator's existing identity.

use std::path::Path;

use tracing::{debug, info};

use crate::cache::EphemeralCache;
use crate::error::Result;
use crate::principal::Principal;

/// Read of the operator's current identity from their existing credential
/// holder.
pub trait IdentitySource {
    /// The principal currently held by the operator's default holder.
    fn current_principal(&self) -> Result<Principal>;
}

/// Interactive proof of an identity, scoped to a single target service.
pub trait TicketGrantor {
    /// Obtain a credential for `principal`, usable only against `service`,
    /// and store it at `cache`. The implementation owns the interactive
    /// password prompt.
    fn grant(&self, principal: &Principal, service: &Principal, cache: &Path) -> Result<()>;
}

/// Derive the short-lived administrative credential and publish it.
///
/// Reads the operator's identity, allocates the ephemeral cache, and asks
/// the grantor for a credential scoped to `service` alone — never for
/// general authentication. The returned cache keeps the credential and its
/// environment publication alive; the caller holds it for the remainder of
/// the run. On any failure the cache (if already allocated) is released
/// and the environment restored before the error propagates.
pub fn bootstrap(
    source: &dyn IdentitySource,
    grantor: &dyn TicketGrantor,
    service: &Principal,
) -> Result<EphemeralCache> {
    let operator = source.current_principal()?;
    debug!(operator = %operator, service = %service, "bootstrapping administrative credential");

    let cache = EphemeralCache::acquire()?;
    grantor.grant(&operator, service, cache.path())?;

    info!(operator = %operator, "administrative credential stored in ephemeral cache");
    Ok(cache)
}
