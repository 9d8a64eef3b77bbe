//! Classification of one remote reset attempt

/// Result of one remote reset attempt.
///
/// Three states, never collapsed to a boolean: the orchestration loop
/// treats each one differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The remote side confirmed the change.
    Success,
    /// Worth trying again, possibly with a different secret.
    Retriable,
    /// Retrying the same request cannot succeed.
    Permanent,
}
