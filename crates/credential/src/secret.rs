//! Zeroizing storage for plaintext secrets

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// A plaintext secret that zeros its memory on drop.
///
/// Held only for the window between collection and transmission. The type
/// is deliberately not `Clone`: at most one live copy of a confirmed
/// secret exists at a time, and dropping it is the release point.
pub struct Secret(SecretString);

impl Secret {
    /// Wrap a plaintext secret.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Expose the secret (use with caution)
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Constant-time, byte-exact equality check
    pub fn eq_ct(&self, other: &Self) -> bool {
        let a = self.0.expose_secret().as_bytes();
        let b = other.0.expose_secret().as_bytes();
        a.ct_eq(b).into()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_secrets_compare_equal() {
        assert!(Secret::new("abc123").eq_ct(&Secret::new("abc123")));
    }

    #[test]
    fn different_secrets_compare_unequal() {
        assert!(!Secret::new("abc123").eq_ct(&Secret::new("xyz999")));
    }

    #[test]
    fn different_lengths_compare_unequal() {
        assert!(!Secret::new("abc").eq_ct(&Secret::new("abc123")));
    }

    #[test]
    fn debug_never_prints_the_value() {
        let secret = Secret::new("hunter2");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }
}
