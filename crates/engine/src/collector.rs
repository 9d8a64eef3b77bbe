//! Interactive collection of the new secret

use std::io;

use thiserror::Error;

use rekey_credential::Secret;

use crate::prompt::Prompter;

/// Failure modes of one collection attempt.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The two entries differ. The caller re-prompts; never a hard
    /// failure.
    #[error("passwords don't match")]
    Mismatch,

    /// Input could not be read at all.
    #[error("cannot prompt for a password")]
    Input(#[from] io::Error),
}

/// Prompt twice for the new secret and require byte-exact agreement.
///
/// Both entry buffers are dropped (and thereby zeroized) on every exit
/// path, including the mismatch path, so the confirmed value is the only
/// secret that outlives this call.
pub fn collect_secret(prompter: &mut dyn Prompter) -> Result<Secret, CollectError> {
    let entry = prompter.hidden("New password: ")?;
    let confirmation = prompter.hidden("Re-enter new password: ")?;
    if !entry.eq_ct(&confirmation) {
        return Err(CollectError::Mismatch);
    }
    Ok(entry)
}
