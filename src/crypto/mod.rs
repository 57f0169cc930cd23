pub mod hash;
pub mod random;

pub use self::hash::{hash_factory, HashFactory, HashFunction, Shake256Hash};
pub use self::random::{OsSecureRandom, RngSecureRandom, SecureRandom};
