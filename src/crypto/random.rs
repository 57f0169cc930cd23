// Random number generation

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Secure random number generator trait
pub trait SecureRandom: Send {
    /// Fill `dest` entirely with random bytes, or fail without a partial result
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error>;

    /// Generate random bytes
    fn random_bytes(&mut self, size: usize) -> Result<Vec<u8>, rand::Error> {
        let mut bytes = vec![0u8; size];
        self.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }
}

/// OS-based secure random number generator
pub struct OsSecureRandom {
    rng: OsRng,
}

impl OsSecureRandom {
    pub fn new() -> Self {
        OsSecureRandom { rng: OsRng }
    }
}

impl Default for OsSecureRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureRandom for OsSecureRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Adapter for any cryptographically secure `rand` generator, such as a seeded
/// `StdRng` when reproducible keys are wanted.
pub struct RngSecureRandom<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng + Send> RngSecureRandom<R> {
    pub fn new(rng: R) -> Self {
        RngSecureRandom { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore + CryptoRng + Send> SecureRandom for RngSecureRandom<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Always yields zero bytes. Only for known-answer tests.
#[cfg(test)]
pub(crate) struct ZeroRandom;

#[cfg(test)]
impl SecureRandom for ZeroRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}
