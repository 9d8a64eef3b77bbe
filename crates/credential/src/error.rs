//! Error types for credential operations

use thiserror::Error;

/// Result type alias for credential operations
pub type Result<T> = std::result::Result<T, CredentialError>;

/// Errors from principal-name parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrincipalError {
    /// Principal names must be non-empty
    #[error("principal name is empty")]
    Empty,

    /// Whitespace and control characters never appear in a principal name
    #[error("principal name '{name}' contains whitespace or control characters")]
    ForbiddenCharacter {
        /// The rejected name
        name: String,
    },

    /// A structural component of the name is empty
    #[error("principal name '{name}' has an empty {component}")]
    EmptyComponent {
        /// The rejected name
        name: String,
        /// Which component was empty ("primary", "instance", or "realm")
        component: &'static str,
    },
}

/// Errors raised while bootstrapping the administrative credential
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The operator's current identity could not be read from their
    /// existing credential holder
    #[error("cannot get principal name from credential cache: {reason}")]
    IdentityUnavailable {
        /// What went wrong while probing the holder
        reason: String,
    },

    /// The identity system rejected the authentication attempt (bad
    /// password, unreachable realm, misconfiguration)
    #[error("authentication failed for {principal}: {reason}")]
    AuthenticationFailed {
        /// Principal that attempted to authenticate
        principal: String,
        /// What the identity system reported
        reason: String,
    },

    /// The ephemeral cache could not be allocated. Unrecoverable.
    #[error("cannot create ephemeral credential cache")]
    CacheUnavailable(#[source] std::io::Error),

    /// A second bootstrap was attempted while a cache is already live
    #[error("an ephemeral credential cache is already live in this process")]
    CacheBusy,

    /// A principal name failed to parse
    #[error(transparent)]
    InvalidPrincipal(#[from] PrincipalError),
}
