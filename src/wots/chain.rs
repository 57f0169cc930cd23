use zeroize::Zeroize;

use crate::crypto::hash::HashFunction;

/// Compute hash chain H^k(x)
///
/// Every step hashes only the running value; `iterations == 0` returns a copy of
/// the input. Intermediate values are preimages of the result and are wiped as
/// soon as the next one is computed.
pub fn hash_chain(hasher: &mut dyn HashFunction, input: &[u8], iterations: usize) -> Vec<u8> {
    let mut result = input.to_vec();
    for _ in 0..iterations {
        advance(hasher, &mut result);
    }
    result
}

/// Replace `value` with `H(value)`, zeroing the previous value's buffer.
pub(crate) fn advance(hasher: &mut dyn HashFunction, value: &mut Vec<u8>) {
    let next = hasher.hash(value);
    let mut previous = std::mem::replace(value, next);
    previous.zeroize();
}

/// Advance each `block_size` segment of `segments` by the matching step count and
/// return the advanced segments concatenated in order.
///
/// Segments are independent of each other. Extra segments or extra step counts
/// beyond the shorter of the two are ignored.
pub fn advance_segments<I>(
    hasher: &mut dyn HashFunction,
    segments: &[u8],
    block_size: usize,
    steps: I,
) -> Vec<u8>
where
    I: IntoIterator<Item = usize>,
{
    let mut out = Vec::with_capacity(segments.len());
    for (segment, n) in segments.chunks_exact(block_size).zip(steps) {
        out.extend_from_slice(&hash_chain(hasher, segment, n));
    }
    out
}
