//! Authenticated remote command channel
//!
//! An opaque RPC seam: a command vector goes in, exit status and captured
//! output come back. The production client wraps the system `remctl`
//! binary, authenticating with whatever credential the process environment
//! currently points at; the wire protocol itself is never reimplemented
//! here.

mod channel;
mod client;
mod error;

pub use channel::{Endpoint, InvocationOutput, RemoteChannel};
pub use client::RemctlClient;
pub use error::ChannelError;
