// RSA Core Module
// Big-integer primitives, primality testing, key generation, block codec

pub mod bigint;
pub mod blocks;
pub mod keygen;
pub mod prime;

pub use bigint::{bit_length, extended_gcd, mod_inverse, mod_pow};
pub use blocks::{decode_blocks, encode_blocks, max_block_bytes};
pub use keygen::{digits_to_bits, generate_keypair, KeyPair, PrivateKey, PublicKey};
pub use prime::{gen_prime_with_bits, is_probable_prime, random_integer};
