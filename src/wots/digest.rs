//! Randomized message hashing (NIST SP 800-106) with a Winternitz checksum.
//!
//! ```text
//! padding: m = msg || 0x80 || 0x00...
//! hashing: H(r || m_1 ^ r || ... || m_L ^ r || len(r) as u16 big endian)
//! ```
//!
//! where `m_1..m_L` are `len(r)`-byte blocks of the padded message. The 2-byte
//! checksum `sum(256 - d[i]) mod 2^16` is appended big endian, so raising any
//! digest byte (fewer chain steps for a forger) lowers the checksum and forces
//! one of its bytes to go backwards along a chain.

use crate::crypto::hash::HashFunction;

/// Returns `d || checksum(d)` where `d` is the randomized digest of `message`
/// under the nonce `r`. The nonce length doubles as the block length.
pub fn message_digest(hasher: &mut dyn HashFunction, r: &[u8], message: &[u8]) -> Vec<u8> {
    let block_len = r.len();
    let mut block = vec![0u8; block_len];

    hasher.reset();
    hasher.write(r);

    let mut blocks = message.chunks_exact(block_len);
    for chunk in &mut blocks {
        xor_into(&mut block, chunk, r);
        hasher.write(&block);
    }

    // Final block always exists: the 0x80 marker goes after the remainder.
    let rest = blocks.remainder();
    block.fill(0);
    block[..rest.len()].copy_from_slice(rest);
    block[rest.len()] = 0x80;
    for (b, k) in block.iter_mut().zip(r) {
        *b ^= k;
    }
    hasher.write(&block);
    hasher.write(&(block_len as u16).to_be_bytes());

    let mut d = hasher.sum();
    let sum = checksum(&d);
    d.extend_from_slice(&sum.to_be_bytes());
    d
}

/// Winternitz checksum: the sum of remaining chain distances, modulo 2^16.
pub fn checksum(digest: &[u8]) -> u16 {
    digest
        .iter()
        .fold(0u16, |sum, &v| sum.wrapping_add(256 - u16::from(v)))
}

fn xor_into(out: &mut [u8], a: &[u8], b: &[u8]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x ^ y;
    }
}
