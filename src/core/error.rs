//! Errors produced while computing a digest

use thiserror::Error;

/// The only way a digest computation can fail is the byte source
/// failing underneath it. Padding, scheduling and compression are
/// total over their inputs.
#[derive(Debug, Error)]
pub enum Sha1Error {
    /// Reading from the byte source failed. The partially processed
    /// state is discarded, no digest is produced.
    #[error("failed to read from byte source: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors from parsing a hexadecimal digest string
#[derive(Debug, Error)]
pub enum ParseDigestError {
    #[error("invalid hex: {0}")]
    Hex(#[from] crate::utils::hex::DecodeHexError),

    #[error("expected 20 bytes, found {0}")]
    Length(usize),
}
