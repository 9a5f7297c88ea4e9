//! Common functionality shared between tests.

// Different tests may use only a subset of the available functionality
#![allow(dead_code)]

use modexp_core::BigInt;
use num_bigint::BigUint;

/// `BigInt` to `num_bigint::BigUint`.
pub fn to_biguint(value: &BigInt) -> BigUint {
    // stored most significant first; BigUint::new wants the opposite
    let digits: Vec<u32> = value.as_words().iter().rev().copied().collect();
    BigUint::new(digits)
}

/// `num_bigint::BigUint` to a `len`-word `BigInt`.
///
/// Panics if the value does not fit.
pub fn from_biguint(value: &BigUint, len: usize) -> BigInt {
    let mut digits = value.to_u32_digits();
    assert!(digits.len() <= len, "value does not fit in {len} words");
    digits.resize(len, 0);
    digits.reverse();
    BigInt::from(digits)
}
