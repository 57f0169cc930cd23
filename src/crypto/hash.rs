// Hash function abstractions

use std::sync::Arc;

use sha2::digest::{ExtendableOutputReset, FixedOutputReset, Update, XofReader};
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512, Shake256};

/// Trait for stateful hash functions
///
/// Mirrors the reset / write / sum capability set of a streaming hash. `sum` leaves
/// the state reset, so one instance can be reused for consecutive evaluations.
pub trait HashFunction {
    /// Discard any buffered input
    fn reset(&mut self);

    /// Absorb more input
    fn write(&mut self, data: &[u8]);

    /// Finalize, returning the digest and resetting the state
    fn sum(&mut self) -> Vec<u8>;

    /// Get output size in bytes
    fn output_size(&self) -> usize;

    /// Hash input data from a clean state
    fn hash(&mut self, data: &[u8]) -> Vec<u8> {
        self.reset();
        self.write(data);
        self.sum()
    }
}

impl<D> HashFunction for D
where
    D: Digest + FixedOutputReset,
{
    fn reset(&mut self) {
        Digest::reset(self);
    }

    fn write(&mut self, data: &[u8]) {
        Digest::update(self, data);
    }

    fn sum(&mut self) -> Vec<u8> {
        Digest::finalize_reset(self).to_vec()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// SHAKE256 squeezed to a caller-chosen output length
#[derive(Clone)]
pub struct Shake256Hash {
    inner: Shake256,
    output_size: usize,
}

impl Shake256Hash {
    pub fn new(output_size: usize) -> Self {
        Shake256Hash { inner: Shake256::default(), output_size }
    }
}

impl HashFunction for Shake256Hash {
    fn reset(&mut self) {
        self.inner = Shake256::default();
    }

    fn write(&mut self, data: &[u8]) {
        Update::update(&mut self.inner, data);
    }

    fn sum(&mut self) -> Vec<u8> {
        let mut out = vec![0u8; self.output_size];
        self.inner.finalize_xof_reset().read(&mut out);
        out
    }

    fn output_size(&self) -> usize {
        self.output_size
    }
}

/// Produces a fresh, independent hash state on every call.
///
/// Factories are shared by all signing and verification calls of a scheme; the
/// states they hand out never are.
pub type HashFactory = Arc<dyn Fn() -> Box<dyn HashFunction> + Send + Sync>;

/// Factory for any RustCrypto fixed-output digest
pub fn hash_factory<D>() -> HashFactory
where
    D: Digest + FixedOutputReset + 'static,
{
    Arc::new(|| Box::new(D::new()) as Box<dyn HashFunction>)
}

pub fn sha256() -> HashFactory {
    hash_factory::<Sha256>()
}

pub fn sha512() -> HashFactory {
    hash_factory::<Sha512>()
}

pub fn sha3_256() -> HashFactory {
    hash_factory::<Sha3_256>()
}

pub fn sha3_512() -> HashFactory {
    hash_factory::<Sha3_512>()
}

/// Factory for SHAKE256 with an arbitrary output size, e.g. to pick a digest size
/// no fixed-output hash offers.
pub fn shake256(output_size: usize) -> HashFactory {
    Arc::new(move || Box::new(Shake256Hash::new(output_size)) as Box<dyn HashFunction>)
}
