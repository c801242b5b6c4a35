// Block Codec
// Byte sequences <-> big-integer blocks sized to stay below the modulus

use num_bigint::BigUint;
use num_traits::Zero;

use super::bigint::bit_length;

/// Largest byte count guaranteed to encode to a value strictly below `n`:
/// max(1, floor((bit_length(n) - 1) / 8)).
pub fn max_block_bytes(n: &BigUint) -> usize {
    let bytes = bit_length(n).saturating_sub(1) / 8;
    (bytes as usize).max(1)
}

/// Partition `data` into consecutive chunks of `max_block_bytes(n)` bytes
/// (the final chunk may be shorter) and read each as a big-endian unsigned
/// integer. Returns the blocks together with the chunk size used.
pub fn encode_blocks(data: &[u8], n: &BigUint) -> (Vec<BigUint>, usize) {
    let max_bytes = max_block_bytes(n);
    let blocks = data.chunks(max_bytes).map(BigUint::from_bytes_be).collect();
    (blocks, max_bytes)
}

/// Concatenate the minimal big-endian byte representation of every block.
///
/// No fixed width and no re-padding: leading zero bytes of an original chunk
/// are not recoverable, and an all-zero chunk contributes no bytes at all.
/// Round trips are exact only when no chunk starts with a zero byte. This
/// lossiness is a known property of the scheme and is kept as-is.
pub fn decode_blocks(blocks: &[BigUint]) -> Vec<u8> {
    let mut out = Vec::new();
    for block in blocks {
        if block.is_zero() {
            continue;
        }
        out.extend_from_slice(&block.to_bytes_be());
    }
    out
}
