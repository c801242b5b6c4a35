// Error Types
// Single error enum covering the whole cipher pipeline

use num_bigint::BigUint;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during key generation and file encryption/decryption
#[derive(Debug, Error)]
pub enum CipherError {
    /// The input file for an encrypt/decrypt operation does not exist.
    #[error("input file not found: {}", .0.display())]
    InputMissing(PathBuf),

    /// Decryption was requested but no private key artifact is present.
    #[error("private key file not found: {}", .0.display())]
    KeyMissing(PathBuf),

    /// No modular inverse exists for the chosen public exponent.
    /// Should not happen with the exponent search range; fatal if it does.
    #[error("no modular inverse for public exponent {e} modulo totient {phi}")]
    NoModularInverse { e: BigUint, phi: BigUint },

    /// A plaintext block was not strictly below the modulus. The block
    /// sizing guarantees this, so hitting it means an internal bug.
    #[error("plaintext block {index} is not below the modulus")]
    BlockExceedsModulus { index: usize },

    /// A decimal or hex integer field in a persisted artifact failed to parse.
    #[error("malformed big-integer field: {0:?}")]
    MalformedNumber(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for all cipher operations
pub type Result<T> = std::result::Result<T, CipherError>;
