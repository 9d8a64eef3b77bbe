//! Production identity backends wrapping the system Kerberos tools
//!
//! The ticket-acquisition and cache protocols are consumed as opaque
//! capabilities: `klist` reports the operator's current principal and
//! `kinit` performs the interactive, service-scoped authentication.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::bootstrap::{IdentitySource, TicketGrantor};
use crate::error::{CredentialError, Result};
use crate::principal::Principal;

/// Reads the operator's current principal by probing the cache listing
/// tool.
#[derive(Debug, Clone)]
pub struct KlistProbe {
    program: String,
}

impl KlistProbe {
    /// Probe using the system `klist`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe using a specific listing tool.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for KlistProbe {
    fn default() -> Self {
        Self {
            program: "klist".to_string(),
        }
    }
}

impl IdentitySource for KlistProbe {
    fn current_principal(&self) -> Result<Principal> {
        let output = Command::new(&self.program).output().map_err(|err| {
            CredentialError::IdentityUnavailable {
                reason: format!("cannot run {}: {err}", self.program),
            }
        })?;
        if !output.status.success() {
            return Err(CredentialError::IdentityUnavailable {
                reason: format!("{} exited with {}", self.program, output.status),
            });
        }
        let listing = String::from_utf8_lossy(&output.stdout);
        let name = parse_default_principal(&listing).ok_or_else(|| {
            CredentialError::IdentityUnavailable {
                reason: "no default principal in cache listing".to_string(),
            }
        })?;
        debug!(principal = name, "read operator principal from default cache");
        Ok(name.parse()?)
    }
}

/// Extract the default principal from a cache listing.
///
/// MIT prints `Default principal: user@REALM`; Heimdal prints
/// `Principal: user@REALM`.
fn parse_default_principal(listing: &str) -> Option<&str> {
    listing.lines().find_map(|line| {
        let line = line.trim();
        line.strip_prefix("Default principal:")
            .or_else(|| line.strip_prefix("Principal:"))
            .map(str::trim)
    })
}

/// Obtains a service-scoped initial credential by running the system
/// ticket tool.
///
/// Standard streams are inherited so the underlying tool performs the
/// hidden password prompt itself.
#[derive(Debug, Clone)]
pub struct KinitGrantor {
    program: String,
}

impl KinitGrantor {
    /// Grant using the system `kinit`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant using a specific ticket tool.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for KinitGrantor {
    fn default() -> Self {
        Self {
            program: "kinit".to_string(),
        }
    }
}

impl TicketGrantor for KinitGrantor {
    fn grant(&self, principal: &Principal, service: &Principal, cache: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("-c")
            .arg(format!("FILE:{}", cache.display()))
            .arg("-S")
            .arg(service.to_string())
            .arg(principal.to_string())
            .status()
            .map_err(|err| CredentialError::AuthenticationFailed {
                principal: principal.to_string(),
                reason: format!("cannot run {}: {err}", self.program),
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(CredentialError::AuthenticationFailed {
                principal: principal.to_string(),
                reason: format!("{} exited with {}", self.program, status),
            })
        }
    }
}
