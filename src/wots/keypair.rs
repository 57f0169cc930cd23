use std::fmt;

use zeroize::Zeroizing;

use crate::wots::scheme::Scheme;
use crate::wots::signature::Signature;
use crate::wots::Result;

/// WOTS public key: the hash of all fully advanced private key chains.
///
/// Unlike the private key it may be reused for any number of verifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        PublicKey(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for PublicKey {
    fn from(bytes: Vec<u8>) -> Self {
        PublicKey(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

enum KeyMaterial {
    Usable(Zeroizing<Vec<u8>>),
    Consumed,
}

/// WOTS private key
///
/// Holds `digest_size + 2` chain segments until it signs a message. Signing moves
/// the key to the consumed state: the segment bytes are wiped and every later
/// signing attempt fails with [`WotsError::KeyConsumed`](crate::wots::WotsError).
/// The derived public key stays available.
pub struct PrivateKey {
    material: KeyMaterial,
    public_key: PublicKey,
}

impl PrivateKey {
    pub(crate) fn new(material: Zeroizing<Vec<u8>>, public_key: PublicKey) -> Self {
        PrivateKey {
            material: KeyMaterial::Usable(material),
            public_key,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self.material, KeyMaterial::Consumed)
    }

    /// Raw chain segments, or `None` once the key has signed
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.material {
            KeyMaterial::Usable(bytes) => Some(bytes.as_slice()),
            KeyMaterial::Consumed => None,
        }
    }

    /// Wipe the key material. Dropping the `Zeroizing` buffer overwrites it.
    pub(crate) fn consume(&mut self) {
        self.material = KeyMaterial::Consumed;
    }

    /// Sign `message` and give up the key, making reuse a compile error.
    pub fn sign_once(mut self, scheme: &Scheme, message: &[u8]) -> Result<Signature> {
        scheme.sign(&mut self, message)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.material {
            KeyMaterial::Usable(_) => "usable",
            KeyMaterial::Consumed => "consumed",
        };
        f.debug_struct("PrivateKey")
            .field("state", &state)
            .field("public_key", &self.public_key)
            .finish()
    }
}
