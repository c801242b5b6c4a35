// RSA Key Generation
// Digit-sized key pairs: decimal digit count -> bit length -> primes -> exponents

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use crate::error::{CipherError, Result};

use super::bigint::mod_inverse;
use super::prime::gen_prime_with_bits;

/// Default public exponent candidate.
const PUBLIC_EXPONENT: u32 = 65_537;

/// RSA Key Pair
/// Immutable once generated; `bit_length` is the actual bit length of the
/// modulus, which can land one bit under the requested target because the
/// product of two forced-width primes is not exactly aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub bit_length: u64,
}

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub n: BigUint,
    pub d: BigUint,
}

impl KeyPair {
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey {
            n: self.n.clone(),
            d: self.d.clone(),
        }
    }

    /// Euler totient of the modulus: (p-1)(q-1).
    pub fn totient(&self) -> BigUint {
        (&self.p - 1u8) * (&self.q - 1u8)
    }
}

/// Convert a decimal digit count for the modulus into a target bit length:
/// max(2, ceil(digits * log2(10))).
pub fn digits_to_bits(digits: u32) -> u64 {
    let bits = (digits as f64 * std::f64::consts::LOG2_10).ceil() as u64;
    bits.max(2)
}

/// Pick the public exponent for a given totient. 65537 unless it shares a
/// factor with the totient, in which case the smallest odd candidate from 3
/// upward that is coprime with the totient is used. If no candidate below
/// 65537 qualifies, 65537 comes back anyway and the inverse computation in
/// the caller reports the failure.
fn select_public_exponent(phi: &BigUint) -> BigUint {
    let default_e = BigUint::from(PUBLIC_EXPONENT);
    if !(phi % &default_e).is_zero() {
        return default_e;
    }

    let mut candidate = BigUint::from(3u8);
    while candidate < default_e {
        if candidate.gcd(phi).is_one() {
            return candidate;
        }
        candidate += 2u8;
    }
    default_e
}

/// Generate an RSA key pair whose modulus is roughly `requested_digits`
/// decimal digits wide.
///
/// The target bit length splits into floor(bits/2) for p and the remainder
/// for q; the two primes are generated independently with no distinctness
/// check (a collision is astronomically unlikely at real sizes).
/// `requested_digits` must be at least 1 — a smaller value targets a 1-bit
/// prime and the search never terminates.
pub fn generate_keypair<R: Rng + ?Sized>(rng: &mut R, requested_digits: u32) -> Result<KeyPair> {
    let bits = digits_to_bits(requested_digits);
    let p_bits = bits / 2;
    let q_bits = bits - p_bits;

    let p = gen_prime_with_bits(rng, p_bits);
    let q = gen_prime_with_bits(rng, q_bits);

    let n = &p * &q;
    let phi = (&p - 1u8) * (&q - 1u8);

    let e = select_public_exponent(&phi);
    let d = mod_inverse(&e, &phi).ok_or_else(|| CipherError::NoModularInverse {
        e: e.clone(),
        phi: phi.clone(),
    })?;

    let bit_length = n.bits();
    Ok(KeyPair {
        p,
        q,
        n,
        e,
        d,
        bit_length,
    })
}
