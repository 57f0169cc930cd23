// Winternitz One-Time Signature implementation (w = 8 bits)

use thiserror::Error;

pub mod chain;
pub mod digest;
pub mod keypair;
pub mod scheme;
pub mod signature;

pub use self::chain::{advance_segments, hash_chain};
pub use self::digest::{checksum, message_digest};
pub use self::keypair::{PrivateKey, PublicKey};
pub use self::scheme::Scheme;
pub use self::signature::Signature;

/// Length of every hash chain: one step per value of a digest byte.
pub const CHAIN_STEPS: usize = 256;

/// Smallest accepted hash output size in bytes
pub const MIN_HASH_SIZE: usize = 16;

/// Largest accepted hash output size in bytes
pub const MAX_HASH_SIZE: usize = 128;

/// Number of checksum bytes appended to the message digest
pub const CHECKSUM_SIZE: usize = 2;

/// Errors that can occur during key generation and signing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WotsError {
    #[error("Hash output sizes must be within [16, 128] bytes (digest: {digest_size}, chain: {chain_size})")]
    InvalidParameter { digest_size: usize, chain_size: usize },

    #[error("Invalid private key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("Invalid signature size: expected {expected} bytes, got {actual}")]
    InvalidSignatureSize { expected: usize, actual: usize },

    #[error("Random source failure: {0}")]
    RandomSourceFailure(String),

    #[error("Private key has already been used to sign a message")]
    KeyConsumed,
}

pub type Result<T> = std::result::Result<T, WotsError>;
