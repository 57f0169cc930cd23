//! Winternitz-Lamport-Diffie one-time signatures.
//!
//! With a one-way hash function of sufficient length and a private key that is
//! random, secret and used for a single message, forging a signature is infeasible,
//! including for a quantum adversary that cannot invert the hash.
//!
//! The Winternitz parameter is fixed at 8 bits: every digest byte selects a depth
//! in a 256-step hash chain. For an `n`-byte hash, key generation costs
//! `(n + 2) * 256 + 1` hash evaluations and signing or verifying a message costs
//! `1 + (n + 2) * 255 / 2` on average. Messages are hashed with a fresh
//! randomization string per signature (NIST SP 800-106), which is prepended to
//! the signature.
//!
//! ```
//! use wots_signatures::{OsSecureRandom, Scheme};
//!
//! let scheme = Scheme::sha256(OsSecureRandom::new());
//! let mut key = scheme.generate_key().unwrap();
//! let public_key = key.public_key().clone();
//!
//! let signature = scheme.sign(&mut key, b"Hello world!").unwrap();
//! assert_eq!(signature.len(), 1120);
//! assert!(scheme.verify(&public_key, b"Hello world!", &signature));
//!
//! // The key is spent after one signature.
//! assert!(scheme.sign(&mut key, b"another message").is_err());
//! ```
//!
//! Signing by value turns key reuse into a compile error:
//!
//! ```compile_fail
//! use wots_signatures::{OsSecureRandom, Scheme};
//!
//! let scheme = Scheme::sha256(OsSecureRandom::new());
//! let key = scheme.generate_key().unwrap();
//! let _first = key.sign_once(&scheme, b"first");
//! let _second = key.sign_once(&scheme, b"second");
//! ```

pub mod crypto;
pub mod wots;

pub use crate::crypto::{HashFactory, HashFunction, OsSecureRandom, RngSecureRandom, SecureRandom};
pub use crate::wots::{PrivateKey, PublicKey, Result, Scheme, Signature, WotsError};
