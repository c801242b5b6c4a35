// Randomness and Primality
// Fixed-width random integers and the Miller-Rabin probable-prime test

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;

use super::bigint::mod_pow;

/// Screening primes: candidates equal to one are accepted outright,
/// candidates divisible by one are rejected before any witness runs.
const SMALL_PRIMES: [u32; 11] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

/// Deterministic witnesses used for the first Miller-Rabin rounds; further
/// rounds draw random witnesses from [2, n-2].
const FIXED_WITNESSES: [u32; 5] = [2, 3, 5, 7, 11];

/// Miller-Rabin rounds used when searching for a prime. The false-positive
/// probability is bounded by 4^-rounds.
pub const PRIME_TEST_ROUNDS: u32 = 12;

/// Generate a random integer occupying exactly `bits` bits: the most
/// significant bit is forced to 1, so the value lies in [2^(bits-1), 2^bits).
pub fn random_integer<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> BigUint {
    debug_assert!(bits >= 1);
    let mut value = rng.gen_biguint(bits);
    value.set_bit(bits - 1, true);
    value
}

/// Miller-Rabin probable-prime test.
/// Returns true if `n` is probably prime after `rounds` witness rounds.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u8);
    if n < &two {
        return false;
    }
    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u64;
    while !d.bit(0) {
        d >>= 1;
        s += 1;
    }

    for round in 0..rounds {
        let a = match FIXED_WITNESSES.get(round as usize) {
            Some(&w) => BigUint::from(w),
            // uniform over [2, n-2]
            None => rng.gen_biguint_range(&two, &n_minus_one),
        };

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        let mut witnessed = false;
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                witnessed = true;
                break;
            }
        }
        if !witnessed {
            // definitely composite
            return false;
        }
    }

    true
}

/// Generate a probable prime of exactly `bits` bits by rejection sampling:
/// draw a fixed-width random integer, force it odd, test, repeat. Terminates
/// almost surely but has no iteration cap or cancellation hook. `bits` must
/// be at least 2 for the loop to ever accept.
pub fn gen_prime_with_bits<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> BigUint {
    loop {
        let mut candidate = random_integer(rng, bits);
        candidate.set_bit(0, true);
        if is_probable_prime(&candidate, PRIME_TEST_ROUNDS, rng) {
            return candidate;
        }
    }
}
