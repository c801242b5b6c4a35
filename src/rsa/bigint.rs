// Big Integer Primitives
// Modular exponentiation, extended Euclid and modular inverse over num-bigint

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Number of significant bits of `n`; zero has bit length 0.
pub fn bit_length(n: &BigUint) -> u64 {
    n.bits()
}

/// Modular exponentiation: base^exp mod modulus
/// Binary square-and-multiply, scanning the exponent least-significant-bit
/// first and reducing after every multiplication.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b). The Bezout
/// coefficients can be negative, so they come back as signed integers.
/// Iterative on purpose: recursion depth grows with the bit width.
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &quotient * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &quotient * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    // remainders stay non-negative for non-negative inputs
    let gcd = old_r.magnitude().clone();
    (gcd, old_x, old_y)
}

/// Compute the modular inverse: a^(-1) mod m, the unique value in [0, m).
/// Returns None when gcd(a, m) != 1 and no inverse exists; callers must
/// handle that case explicitly.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let (gcd, x, _) = extended_gcd(a, m);
    if !gcd.is_one() {
        return None;
    }

    let modulus = BigInt::from(m.clone());
    x.mod_floor(&modulus).to_biguint()
}
