//! Montgomery residue constant setup.
//!
//! Entering Montgomery form requires the per-modulus constant `R² mod N`
//! where `R = 2^(32·L)`. The exponentiation controller obtains it through
//! the [`ResidueCalculator`] capability, a start/ready/result handshake
//! mirroring the one it uses toward the multiplier, so alternative setup
//! algorithms can be swapped in. [`DoublingResidue`] is the stock
//! implementation.

use crate::BigInt;
use subtle::Choice;

/// Computes `R² mod N` for an odd modulus `N`, one tick at a time.
///
/// Implementations are restartable: a new [`start`][Self::start] discards
/// any prior computation.
pub trait ResidueCalculator {
    /// Begin computing the constant for the given odd modulus.
    fn start(&mut self, modulus: &BigInt);

    /// Advance the computation by one tick. A no-op while no computation is
    /// in flight.
    fn step(&mut self);

    /// Whether the constant is available.
    fn is_ready(&self) -> bool;

    /// The computed constant, once ready.
    fn result(&self) -> Option<&BigInt>;
}

/// Residue setup by iterated doubling.
///
/// Starts from `1 mod N` and doubles `64·L` times, reducing after each
/// doubling, to reach `2^(64·L) = R² (mod N)`. One doubling is performed per
/// tick, so setup takes `64·L` ticks.
#[derive(Clone, Debug)]
pub struct DoublingResidue {
    modulus: BigInt,
    value: BigInt,
    remaining: u32,
    ready: bool,
}

impl DoublingResidue {
    /// Create a calculator with no computation in progress.
    pub fn new() -> Self {
        Self {
            modulus: BigInt::zero(0),
            value: BigInt::zero(0),
            remaining: 0,
            ready: false,
        }
    }

    /// Double `value` modulo the stored modulus.
    fn double_mod(&mut self) {
        let bit = self.value.double_assign();
        let reduce = Choice::from(bit as u8) | !self.value.ct_lt(&self.modulus);
        let borrow = self.value.conditional_sub_assign(&self.modulus, reduce);
        debug_assert_eq!(bit, borrow);
    }
}

impl ResidueCalculator for DoublingResidue {
    fn start(&mut self, modulus: &BigInt) {
        debug_assert!(modulus.is_odd());

        self.modulus = modulus.clone();
        self.value = BigInt::one(modulus.len());
        // 1 is not reduced when N = 1.
        let reduce = !self.value.ct_lt(&self.modulus);
        self.value.conditional_sub_assign(&self.modulus, reduce);

        self.remaining = 2 * modulus.bits_precision();
        self.ready = false;
    }

    fn step(&mut self) {
        // remaining is 0 both before the first start and after completion.
        if self.remaining == 0 {
            return;
        }

        self.double_mod();
        self.remaining -= 1;
        if self.remaining == 0 {
            self.ready = true;
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn result(&self) -> Option<&BigInt> {
        self.ready.then_some(&self.value)
    }
}

impl Default for DoublingResidue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for DoublingResidue {
    fn zeroize(&mut self) {
        self.modulus.zeroize();
        self.value.zeroize();
        self.remaining = 0;
        self.ready = false;
    }
}
