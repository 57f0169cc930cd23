use crate::wots::scheme::Scheme;
use crate::wots::{Result, WotsError};

/// WOTS signature
///
/// Byte layout: `nonce (digest_size) || segment_0 || ... || segment_{digest_size+1}`,
/// each segment `chain_block_size` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
    nonce_len: usize,
    block_size: usize,
}

impl Signature {
    pub(crate) fn new(bytes: Vec<u8>, nonce_len: usize, block_size: usize) -> Self {
        Signature { bytes, nonce_len, block_size }
    }

    /// Parse a signature laid out for `scheme`
    pub fn from_bytes(bytes: &[u8], scheme: &Scheme) -> Result<Self> {
        if bytes.len() != scheme.signature_size() {
            return Err(WotsError::InvalidSignatureSize {
                expected: scheme.signature_size(),
                actual: bytes.len(),
            });
        }
        Ok(Signature::new(bytes.to_vec(), scheme.digest_size(), scheme.chain_block_size()))
    }

    /// Randomization string the message digest was computed with
    pub fn nonce(&self) -> &[u8] {
        &self.bytes[..self.nonce_len]
    }

    /// Partially advanced chain values, one per digest and checksum byte
    pub fn segments(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.bytes[self.nonce_len..].chunks_exact(self.block_size)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
