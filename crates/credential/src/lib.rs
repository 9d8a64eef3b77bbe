//! Rekey credential handling
//!
//! Principal names, zeroizing secret storage, and the ephemeral credential
//! cache that scopes a short-lived administrative ticket to a single
//! process.
//!
//! The underlying ticket-acquisition and cache protocols are consumed as
//! opaque capabilities through the [`IdentitySource`] and [`TicketGrantor`]
//! seams; [`backend`] provides the production implementations wrapping the
//! system Kerberos tools.

// The ephemeral cache publishes its location through the process
// environment, which is an unsafe operation under edition 2024. See
// `cache.rs` for the safety argument.
#![allow(unsafe_code)]

pub mod backend;
pub mod bootstrap;
pub mod cache;
mod error;
mod principal;
mod secret;

pub use backend::{KinitGrantor, KlistProbe};
pub use bootstrap::{IdentitySource, TicketGrantor, bootstrap};
pub use cache::EphemeralCache;
pub use error::{CredentialError, PrincipalError, Result};
pub use principal::Principal;
pub use secret::Secret;
