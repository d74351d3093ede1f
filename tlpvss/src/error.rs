use thiserror::Error;
use tlpvss_common::EncodingError;

pub type Result<T, E = PvssError> = std::result::Result<T, E>;

/// Failures of the PVSS primitives.
///
/// A reconstruction from too few or from poisoned shares is not an error:
/// [`crate::combine_shares`] returns some other group element. Only explicit
/// checks against an expected value report [`PvssError::VerificationFailed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PvssError {
    /// Bad participant count, threshold or index
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A ciphertext with inconsistent lengths or undecodable points
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// A decrypted share that does not decode to a group element
    #[error("malformed share: {0}")]
    MalformedShare(String),

    /// A well formed value did not match what it was checked against
    #[error("verification failed: {0}")]
    VerificationFailed(&'static str),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
}
