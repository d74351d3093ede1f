//! The workflow around a PVSS dealing: bind it to an unlock condition, prove
//! the binding, keep it on a ledger until the condition is met, then collect
//! decrypted shares until the secret can be reconstructed.

mod condition;
pub use condition::*;
mod error;
pub use error::*;
mod oracle;
pub use oracle::*;
mod ledger;
pub use ledger::*;
mod orchestrator;
pub use orchestrator::*;
