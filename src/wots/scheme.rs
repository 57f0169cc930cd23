use std::fmt;
use std::sync::Mutex;

use log::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::hash::{self, HashFactory};
use crate::crypto::random::SecureRandom;
use crate::wots::chain::advance_segments;
use crate::wots::digest::message_digest;
use crate::wots::keypair::{PrivateKey, PublicKey};
use crate::wots::signature::Signature;
use crate::wots::{Result, WotsError, CHAIN_STEPS, CHECKSUM_SIZE, MAX_HASH_SIZE, MIN_HASH_SIZE};

/// One-time signature signing/verification configuration.
///
/// Sizes follow from the output sizes of the two hash functions: `hash` computes
/// message digests and compresses the public key, `chain_hash` advances the key
/// chains. Both may be the same function. Construction never fails; out of range
/// hash sizes are only rejected when key material is generated or imported.
///
/// A `Scheme` is `Send + Sync`. Every operation draws fresh hash states from the
/// factories, and the random source is locked only while a nonce or key is drawn.
pub struct Scheme {
    hash: HashFactory,
    chain_hash: HashFactory,
    digest_size: usize,
    chain_block_size: usize,
    rng: Mutex<Box<dyn SecureRandom>>,
}

impl Scheme {
    /// Scheme using the same hash function for digests and chains
    pub fn new<R>(hash: HashFactory, rng: R) -> Self
    where
        R: SecureRandom + 'static,
    {
        Self::with_chain_hash(hash.clone(), hash, rng)
    }

    /// Scheme with a dedicated chaining hash function
    pub fn with_chain_hash<R>(hash: HashFactory, chain_hash: HashFactory, rng: R) -> Self
    where
        R: SecureRandom + 'static,
    {
        let digest_size = hash().output_size();
        let chain_block_size = chain_hash().output_size();
        Scheme {
            hash,
            chain_hash,
            digest_size,
            chain_block_size,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn sha256<R: SecureRandom + 'static>(rng: R) -> Self {
        Self::new(hash::sha256(), rng)
    }

    pub fn sha512<R: SecureRandom + 'static>(rng: R) -> Self {
        Self::new(hash::sha512(), rng)
    }

    pub fn sha3_256<R: SecureRandom + 'static>(rng: R) -> Self {
        Self::new(hash::sha3_256(), rng)
    }

    /// Output size of the digest hash; also the nonce and public key length
    pub fn digest_size(&self) -> usize {
        self.digest_size
    }

    /// Output size of the chaining hash; the length of each key segment
    pub fn chain_block_size(&self) -> usize {
        self.chain_block_size
    }

    /// Number of chains: one per digest byte plus the checksum bytes
    pub fn segment_count(&self) -> usize {
        self.digest_size + CHECKSUM_SIZE
    }

    pub fn private_key_size(&self) -> usize {
        self.segment_count() * self.chain_block_size
    }

    pub fn public_key_size(&self) -> usize {
        self.digest_size
    }

    pub fn signature_size(&self) -> usize {
        self.digest_size + self.private_key_size()
    }

    /// Check that both hash output sizes are within the supported range
    pub fn validate(&self) -> Result<()> {
        if self.sizes_supported() {
            return Ok(());
        }
        warn!(
            "rejecting hash output sizes: digest {} bytes, chain {} bytes",
            self.digest_size, self.chain_block_size
        );
        Err(WotsError::InvalidParameter {
            digest_size: self.digest_size,
            chain_size: self.chain_block_size,
        })
    }

    /// Generate a new private key from the random source, with its public key
    pub fn generate_key(&self) -> Result<PrivateKey> {
        self.validate()?;
        let mut material = Zeroizing::new(vec![0u8; self.private_key_size()]);
        self.fill_random(&mut material)?;
        let public_key = self.compute_public_key(&material);
        debug!(
            "generated WOTS key pair ({} byte private key, {} byte public key)",
            material.len(),
            public_key.len()
        );
        Ok(PrivateKey::new(material, public_key))
    }

    /// Adopt existing private key bytes, deriving the matching public key.
    ///
    /// The buffer itself becomes the key material: it is wiped when the key signs
    /// or is dropped, and immediately if the import fails.
    pub fn private_key_from_bytes(&self, bytes: Vec<u8>) -> Result<PrivateKey> {
        let material = Zeroizing::new(bytes);
        let public_key = self.derive_public_key(&material)?;
        debug!("imported {} byte WOTS private key", material.len());
        Ok(PrivateKey::new(material, public_key))
    }

    /// Import private key bytes held in a caller-owned buffer.
    ///
    /// The buffer is zeroed before this returns, on success and on failure, so
    /// the returned key holds the only usable copy of the material.
    pub fn private_key_from_slice(&self, bytes: &mut [u8]) -> Result<PrivateKey> {
        let material = bytes.to_vec();
        bytes.zeroize();
        self.private_key_from_bytes(material)
    }

    /// Deterministically derive the public key of raw private key bytes
    pub fn derive_public_key(&self, private_key: &[u8]) -> Result<PublicKey> {
        self.validate()?;
        self.check_key_size(private_key)?;
        Ok(self.compute_public_key(private_key))
    }

    /// Sign `message`, consuming the private key.
    ///
    /// On success the key material is wiped and the key can never sign again. If
    /// the nonce cannot be drawn the key is left untouched.
    pub fn sign(&self, key: &mut PrivateKey, message: &[u8]) -> Result<Signature> {
        let material = match key.as_bytes() {
            Some(bytes) => bytes,
            None => {
                warn!("refusing to sign with a consumed WOTS private key");
                return Err(WotsError::KeyConsumed);
            }
        };
        self.check_key_size(material)?;

        let mut nonce = vec![0u8; self.digest_size];
        self.fill_random(&mut nonce)?;

        let mut hasher = (self.hash)();
        let digest = message_digest(hasher.as_mut(), &nonce, message);

        let mut chain_hasher = (self.chain_hash)();
        let chains = advance_segments(
            chain_hasher.as_mut(),
            material,
            self.chain_block_size,
            digest.iter().map(|&v| usize::from(v)),
        );

        let mut bytes = nonce;
        bytes.extend_from_slice(&chains);
        key.consume();
        debug!("signed {} byte message, WOTS private key consumed", message.len());

        Ok(Signature::new(bytes, self.digest_size, self.chain_block_size))
    }

    /// Verify `signature` over `message` against `public_key`.
    ///
    /// Malformed input of any size yields `false`. Running time depends on the
    /// message and signature, which are public.
    pub fn verify<P, S>(&self, public_key: P, message: &[u8], signature: S) -> bool
    where
        P: AsRef<[u8]>,
        S: AsRef<[u8]>,
    {
        let public_key = public_key.as_ref();
        let signature = signature.as_ref();
        if !self.sizes_supported() {
            return false;
        }
        if public_key.len() != self.public_key_size() || signature.len() != self.signature_size() {
            trace!(
                "rejecting malformed input: public key {} bytes, signature {} bytes",
                public_key.len(),
                signature.len()
            );
            return false;
        }

        let (nonce, chains) = signature.split_at(self.digest_size);
        let mut hasher = (self.hash)();
        let digest = message_digest(hasher.as_mut(), nonce, message);

        let mut chain_hasher = (self.chain_hash)();
        let completed = advance_segments(
            chain_hasher.as_mut(),
            chains,
            self.chain_block_size,
            digest.iter().map(|&v| CHAIN_STEPS - usize::from(v)),
        );

        let valid = hasher.hash(&completed) == public_key;
        debug!("WOTS signature verification: {}", if valid { "valid" } else { "invalid" });
        valid
    }

    fn sizes_supported(&self) -> bool {
        let in_range = |size: usize| (MIN_HASH_SIZE..=MAX_HASH_SIZE).contains(&size);
        in_range(self.digest_size) && in_range(self.chain_block_size)
    }

    fn compute_public_key(&self, private_key: &[u8]) -> PublicKey {
        let mut chain_hasher = (self.chain_hash)();
        let tops = advance_segments(
            chain_hasher.as_mut(),
            private_key,
            self.chain_block_size,
            std::iter::repeat(CHAIN_STEPS),
        );
        let mut key_hasher = (self.hash)();
        PublicKey::from(key_hasher.hash(&tops))
    }

    fn check_key_size(&self, private_key: &[u8]) -> Result<()> {
        if private_key.len() != self.private_key_size() {
            return Err(WotsError::InvalidKeySize {
                expected: self.private_key_size(),
                actual: private_key.len(),
            });
        }
        Ok(())
    }

    fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| WotsError::RandomSourceFailure("random source lock poisoned".to_string()))?;
        rng.fill_bytes(dest)
            .map_err(|e| WotsError::RandomSourceFailure(e.to_string()))
    }
}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheme")
            .field("digest_size", &self.digest_size)
            .field("chain_block_size", &self.chain_block_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random::{OsSecureRandom, ZeroRandom};

    const MESSAGE: &[u8] = b"hello world!";

    const ZERO_KEY_PUBLIC: &str = "12badcdead2bd79b8f4b7ca282e6dfdf70575367abd73e5a99a2ce82934e678a";

    const ZERO_KEY_SIGNATURE: &str = concat!(
        "0000000000000000000000000000000000000000000000000000000000000000",
        "fe4af4eb44d9b92afdc3113bc3fba48531502d6367ad42de3a7f1d1ea4065ba4",
        "9285d5464c11fbae7c4fb52853c13ad90b96329a1a9916f27dec541854a4c870",
        "7aade9f61124f326b6e4dc528dde65091542d0daf30701b1f82cb8d42338ca6b",
        "70bbf46548f59c479fd53a99e12d3b0369829032d71a232acb9250590fdd8266",
        "c22d7db74930d86c2a58bd587f0286f3770c820f5f19632cf4bd7feb7272c0e3",
        "b8331a92c67548b46710f37f1b6296bf6e1bb0c3a58c74f268db21bd04d99b9e",
        "3d5ccfb70a61014b2844c2e945a64bf9baa70efa52c12a6eff5f412173ed4829",
        "6aab97a8de05c896f2ffc797829439c679548fbe6dcf0a5fe33f0a7a4c346dfe",
        "e99696a9507ceafdb46582adc8d66b4106bbd7f7856c3b0d9d390e0a4818b653",
        "dcb20558bd220be59a3d7f0091a128adb350093364276bcc7efd1ffebe16111e",
        "4a738c7e12a7cf3bd2fa4e5c73e891bc94b0ed624ab4d07512dc3380789560ac",
        "8c3462ebc269e6f586be7641ce147bfa3f6bcd1898689c779ca014ffa36c475f",
        "3c2510a2958b0f7e6f0ed4136794431487542fc878370e33bf1a0eb5773a0a99",
        "adc45f8aa3cdb2fab60f7acbd2bad698515796a1679169273c1a761ffa0ec7e1",
        "3c2510a2958b0f7e6f0ed4136794431487542fc878370e33bf1a0eb5773a0a99",
        "4a70be7dadf143ff0522a3bb327e17405a524c01006df8c8eccc4af1137fbc80",
        "ca3c0b2554f1a2abbf129920b69be5a5ef6291c28bbc5dd074062cc479ad96f9",
        "67c9b2b58d5d5f1ff1917d6ca4cb0f64708ad3a24bcc31b254503a1a3772b26c",
        "56678c2f4ed34409f1dd59ac8038c12db6bc3531bd1f357bea091fe005e7891a",
        "49b85ae5536901b2da5e912fd05a88922223194146c668a7cdaaddc79563018e",
        "ed149b8e2fceab392b2b7266729fea0c5ce521cd995e62cb77f8b7370e7cb691",
        "4a97017cbf4db39cf1a26247adcefdebad3e74fdeea53011d8c38655e92c90e2",
        "f82a233690ca4699b455f9dc596e7d584285bae03f2a2a2bd4f8c3700b10d99c",
        "adc45f8aa3cdb2fab60f7acbd2bad698515796a1679169273c1a761ffa0ec7e1",
        "62848041ba49141096961bdfd2ffc9a1149cd15ad42b0faede546ede66189aae",
        "dcc1691d14dd430e89790dc95813855ca4d58e25cf5bc5ea1d8cbd156978bd8f",
        "4a97017cbf4db39cf1a26247adcefdebad3e74fdeea53011d8c38655e92c90e2",
        "4a97017cbf4db39cf1a26247adcefdebad3e74fdeea53011d8c38655e92c90e2",
        "72fc625da1e21768a3166f1fc3fa47b4eaa3bb7292babd782bf79e24f6d7ec11",
        "74ec4ea1ad43ce29f4a7a87dbb24c32dde78147d76fbaf424749ef5e95d07e61",
        "63f82b39c388bdae3b50b49fa832b716fa1f75f3529668ef2d2880381c14aafe",
        "67b49acd901803287e9651fb8a57eb5f0eb19c96da6716cbb13e57788b5d5c4d",
        "2d3ed0150be70d26dabe1fe2acba277352340a86dd60e8ddb8edf05ad34fa525",
        "7c96bb095478d0585e6b455147315fbfd090cf2542a713c47d1bc0c95751326e",
    );

    #[test]
    fn test_sizes_sha256() {
        let scheme = Scheme::sha256(OsSecureRandom::new());

        assert_eq!(scheme.digest_size(), 32);
        assert_eq!(scheme.segment_count(), 34);
        assert_eq!(scheme.private_key_size(), 34 * 32);
        assert_eq!(scheme.public_key_size(), 32);
        assert_eq!(scheme.signature_size(), 1120);
    }

    #[test]
    fn test_known_vector_zero_random() {
        let scheme = Scheme::sha256(ZeroRandom);
        let mut key = scheme.generate_key().unwrap();
        let public_key = key.public_key().clone();
        assert_eq!(hex::encode(public_key.as_bytes()), ZERO_KEY_PUBLIC);

        let signature = scheme.sign(&mut key, MESSAGE).unwrap();

        assert_eq!(hex::encode(signature.as_bytes()), ZERO_KEY_SIGNATURE);
        assert!(scheme.verify(&public_key, MESSAGE, &signature));
        assert!(!scheme.verify(&public_key, b"hello world", &signature));
    }

    #[test]
    fn test_sign_consumes_key() {
        let scheme = Scheme::sha256(OsSecureRandom::new());
        let mut key = scheme.generate_key().unwrap();

        scheme.sign(&mut key, MESSAGE).unwrap();

        assert!(key.is_consumed());
        assert!(key.as_bytes().is_none());
        assert_eq!(scheme.sign(&mut key, MESSAGE), Err(WotsError::KeyConsumed));
    }

    #[test]
    fn test_two_hash_public_key() {
        let scheme = Scheme::with_chain_hash(hash::sha256(), hash::sha3_256(), ZeroRandom);
        let key = scheme.generate_key().unwrap();

        assert_eq!(
            hex::encode(key.public_key().as_bytes()),
            "3fa7e0b0bc0e9a8d3e8f86cc0bb1b4d62ebca8e12333dd2dc66a85bdcdec232b"
        );
    }

    #[test]
    fn test_shake256_small_digest_public_key() {
        let scheme = Scheme::new(hash::shake256(16), ZeroRandom);
        let key = scheme.generate_key().unwrap();

        assert_eq!(scheme.private_key_size(), 18 * 16);
        assert_eq!(hex::encode(key.public_key().as_bytes()), "27dc0fdda40bbf2d55729605f7900b84");
    }

    #[test]
    fn test_out_of_range_hash_sizes() {
        let small = Scheme::new(hash::shake256(8), OsSecureRandom::new());
        assert_eq!(small.public_key_size(), 8);
        assert!(matches!(
            small.generate_key(),
            Err(WotsError::InvalidParameter { digest_size: 8, chain_size: 8 })
        ));

        let large = Scheme::new(hash::shake256(129), OsSecureRandom::new());
        assert!(matches!(large.validate(), Err(WotsError::InvalidParameter { .. })));

        let bad_chain = Scheme::with_chain_hash(hash::sha256(), hash::shake256(15), OsSecureRandom::new());
        assert!(matches!(
            bad_chain.generate_key(),
            Err(WotsError::InvalidParameter { digest_size: 32, chain_size: 15 })
        ));
    }

    #[test]
    fn test_verify_with_empty_hash_output_is_false() {
        let scheme = Scheme::new(hash::shake256(0), OsSecureRandom::new());
        let signature = vec![0u8; scheme.signature_size()];

        assert!(!scheme.verify(&[] as &[u8], b"message", &signature));
    }

    #[test]
    fn test_scheme_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Scheme>();
    }
}
