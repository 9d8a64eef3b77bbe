//! Fatal engine errors

use std::io;

use thiserror::Error;

use rekey_credential::{CredentialError, PrincipalError};

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Fatal errors that end a run outside the reset loop.
///
/// Classified reset outcomes are not errors; they are ordinary values the
/// state machine consumes. Everything here aborts the run with a one-line
/// diagnostic naming the failing operation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Administrative credential bootstrap failed
    #[error("cannot authenticate to Kerberos")]
    Bootstrap(#[source] CredentialError),

    /// The username prompt could not be read
    #[error("error reading username")]
    UsernameRead(#[source] io::Error),

    /// The target account name does not parse as a principal
    #[error("invalid principal name")]
    InvalidTarget(#[source] PrincipalError),

    /// The secret prompt could not be read
    #[error("cannot prompt for a password")]
    SecretInput(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn bootstrap_error_chains_its_cause() {
        let err = EngineError::Bootstrap(CredentialError::IdentityUnavailable {
            reason: "no ticket cache".to_string(),
        });
        assert_eq!(err.to_string(), "cannot authenticate to Kerberos");
        assert!(
            err.source().unwrap().to_string().contains("no ticket cache"),
            "cause should be preserved for the diagnostic chain"
        );
    }
}
