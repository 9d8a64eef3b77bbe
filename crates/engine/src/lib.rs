//! Password-change orchestration engine
//!
//! Drives the full flow: bootstrap an administrative credential, confirm
//! the target account with the operator, then collect and transmit the new
//! secret with a bounded number of remote attempts.
//!
//! Everything here is single-threaded, synchronous, and blocking; each
//! step completes fully before the next begins. Classified reset outcomes
//! travel as ordinary values — only collaborator-level failures surface as
//! errors.

pub mod collector;
pub mod directory;
mod error;
pub mod invoker;
mod outcome;
pub mod orchestrator;
pub mod prompt;

pub use collector::{CollectError, collect_secret};
pub use directory::{Directory, DirectoryError, PasswdFile};
pub use error::{EngineError, Result};
pub use invoker::ResetInvoker;
pub use orchestrator::{ChangeOrchestrator, RetryBudget, RunOutcome};
pub use outcome::ResetOutcome;
pub use prompt::{Prompter, TerminalPrompter};
