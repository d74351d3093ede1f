use thiserror::Error;
use tlpvss::PvssError;

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A local PVSS operation failed
    #[error(transparent)]
    Pvss(#[from] PvssError),

    /// The ledger or the proof oracle failed. The underlying error is kept
    /// as reported
    #[error("{collaborator} failed")]
    ExternalCollaboratorFailure {
        collaborator: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// A reconstruction or proof did not match the expected value
    #[error("verification failed: {0}")]
    VerificationFailed(String),
}

impl ProtocolError {
    pub(crate) fn ledger(source: anyhow::Error) -> Self {
        ProtocolError::ExternalCollaboratorFailure {
            collaborator: "ledger",
            source,
        }
    }

    pub(crate) fn oracle(source: anyhow::Error) -> Self {
        ProtocolError::ExternalCollaboratorFailure {
            collaborator: "proof oracle",
            source,
        }
    }
}
