//! Equivalence tests between the engine's arithmetic and `num-bigint` /
//! `num-modular`.

mod common;

use common::{from_biguint, to_biguint};
use modexp_core::{BigInt, DoublingResidue, ModExpCore, MontgomeryMultiplier, ResidueCalculator};
use num_bigint::BigUint;
use num_modular::ModularUnaryOps;
use num_traits::One;
use proptest::{collection::vec, prelude::*};

/// Reduce raw words below the modulus.
fn reduce(words: Vec<u32>, modulus: &BigInt) -> BigInt {
    let value = to_biguint(&BigInt::from(words)) % to_biguint(modulus);
    from_biguint(&value, modulus.len())
}

prop_compose! {
    /// Generate an odd modulus of 1..=8 words.
    fn odd_modulus()
        (len in 1usize..=8)
        (mut words in vec(any::<u32>(), len))
        -> BigInt
    {
        let len = words.len();
        words[len - 1] |= 1;
        BigInt::from(words)
    }
}

prop_compose! {
    /// Generate an odd modulus with an exponent and a reduced message.
    fn exponentiation_operands()
        (n in odd_modulus())
        (e in vec(any::<u32>(), n.len()), m in vec(any::<u32>(), n.len()), n in Just(n))
        -> (BigInt, BigInt, BigInt)
    {
        let m = reduce(m, &n);
        (n, BigInt::from(e), m)
    }
}

prop_compose! {
    /// Generate an odd modulus with two reduced multiplicands.
    fn product_operands()
        (n in odd_modulus())
        (a in vec(any::<u32>(), n.len()), b in vec(any::<u32>(), n.len()), n in Just(n))
        -> (BigInt, BigInt, BigInt)
    {
        let a = reduce(a, &n);
        let b = reduce(b, &n);
        (n, a, b)
    }
}

proptest! {
    #[test]
    fn exponentiate_matches_modpow((n, e, m) in exponentiation_operands()) {
        let mut core = ModExpCore::new();
        let c = core.exponentiate(&m, &e, &n).unwrap();

        let expected = to_biguint(&m).modpow(&to_biguint(&e), &to_biguint(&n));
        prop_assert_eq!(to_biguint(&c), expected);
        prop_assert_eq!(c.len(), n.len());
    }

    #[test]
    fn exponent_one_returns_the_message((n, _, m) in exponentiation_operands()) {
        let mut core = ModExpCore::new();
        let e = BigInt::from_u64(1, n.len());
        let c = core.exponentiate(&m, &e, &n).unwrap();
        prop_assert_eq!(c, m);
    }

    #[test]
    fn montgomery_product_matches_oracle((n, a, b) in product_operands()) {
        let mut multiplier = MontgomeryMultiplier::new();
        multiplier.install_modulus(n.clone()).unwrap();
        let p = multiplier.multiply(a.clone(), b.clone()).unwrap();

        // the emitted product is canonical
        prop_assert!(p < n);

        let n_bi = to_biguint(&n);
        let r = BigUint::one() << (32 * n.len());
        let r_inv = r.invm(&n_bi).expect("R is coprime to any odd modulus");
        let expected = to_biguint(&a) * to_biguint(&b) * r_inv % &n_bi;
        prop_assert_eq!(to_biguint(&p), expected);
    }

    #[test]
    fn residue_constant_matches_oracle(n in odd_modulus()) {
        let mut calc = DoublingResidue::new();
        calc.start(&n);
        while !calc.is_ready() {
            calc.step();
        }
        let r2 = calc.result().unwrap();

        let expected = (BigUint::one() << (64 * n.len())) % to_biguint(&n);
        prop_assert_eq!(to_biguint(r2), expected);
    }
}
