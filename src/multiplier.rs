//! Word-serial Montgomery multiplication as a steppable automaton.
//!
//! [`MontgomeryMultiplier`] computes `A·B·R⁻¹ mod N` for `R = 2^(32·L)`,
//! processing one word of operand `B` per loop pass instead of one bit, as in
//! Algorithm 14.36 of the Handbook of Applied Cryptography
//! (<https://cacr.uwaterloo.ca/hac/about/chap14.pdf>). Each outer pass folds
//! one operand word into the accumulator, cancels the low accumulator word
//! with a multiple of the modulus, and divides by 2^32 with a word shift, so
//! the quotient never has to be materialized.
//!
//! The multiplier advances one state per [`step`][MontgomeryMultiplier::step]
//! call and holds its state between calls. Completion is signaled through a
//! ready flag that stays raised until the next start.

use crate::{
    BigInt, Error, Result, Word,
    word::invert_mod_word,
};
use subtle::Choice;

/// Control state of the multiplier, advanced one transition per step.
///
/// A full product takes `4·L + 5` steps: one each for
/// [`InitAccumulator`][MultiplierState::InitAccumulator] and
/// [`LoopSetup`][MultiplierState::LoopSetup], four per operand word, and one
/// each for the closing [`LoopIterate`][MultiplierState::LoopIterate],
/// [`Emit`][MultiplierState::Emit] and [`Done`][MultiplierState::Done].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MultiplierState {
    /// Waiting for work. Stepping here is a no-op.
    Idle,
    /// Zero the accumulator.
    InitAccumulator,
    /// Reset the operand-word cursor.
    LoopSetup,
    /// Fetch the next operand word and derive the reduction factor for this
    /// pass, or leave the loop once every word has been folded in.
    LoopIterate,
    /// Add the scaled modulus `q·N` into the accumulator.
    AddModulus,
    /// Add the scaled operand `b·A` into the accumulator.
    AddOperand,
    /// Divide the accumulator by 2^32; the low word is zero by choice of `q`.
    ShiftWord,
    /// Reduce the accumulator below the modulus and latch it as the product.
    Emit,
    /// Raise the ready flag and return to idle.
    Done,
}

/// Steppable Montgomery product engine for equal-length operands.
///
/// A modulus is installed once per session with
/// [`install_modulus`][Self::install_modulus]; each product is then kicked
/// off with [`start`][Self::start] and driven by [`step`][Self::step] until
/// [`is_ready`][Self::is_ready] reports completion. The emitted product is
/// fully reduced, so it can feed the next multiplication directly.
#[derive(Clone, Debug)]
pub struct MontgomeryMultiplier {
    state: MultiplierState,
    modulus: BigInt,
    /// `-N⁻¹ mod 2^32`, derived from the installed modulus.
    neg_inv: Word,
    a: BigInt,
    b: BigInt,
    /// Accumulator `S`; invariant `S < 2N` at every loop boundary.
    acc: BigInt,
    /// Accumulator bits above the top word, at most 33 bits wide.
    head: u64,
    /// Operand words folded in so far.
    word_index: usize,
    /// Operand word latched for the current pass.
    cur_word: Word,
    /// Reduction factor latched for the current pass.
    cur_q: Word,
    product: BigInt,
    ready: bool,
}

impl MontgomeryMultiplier {
    /// Create a multiplier with no modulus installed.
    pub fn new() -> Self {
        Self {
            state: MultiplierState::Idle,
            modulus: BigInt::zero(0),
            neg_inv: 0,
            a: BigInt::zero(0),
            b: BigInt::zero(0),
            acc: BigInt::zero(0),
            head: 0,
            word_index: 0,
            cur_word: 0,
            cur_q: 0,
            product: BigInt::zero(0),
            ready: false,
        }
    }

    /// Install the modulus for subsequent products and derive its Montgomery
    /// constant.
    ///
    /// Returns [`Error::NonOddModulus`] unless the modulus is odd, and
    /// [`Error::BusyRejected`] while a product is in flight.
    pub fn install_modulus(&mut self, modulus: BigInt) -> Result<()> {
        if self.is_busy() {
            return Err(Error::BusyRejected);
        }
        if !modulus.is_odd() {
            return Err(Error::NonOddModulus);
        }

        let n0 = modulus.as_words()[modulus.len() - 1];
        self.neg_inv = invert_mod_word(n0).wrapping_neg();
        self.acc = BigInt::zero(modulus.len());
        self.product = BigInt::zero(modulus.len());
        self.modulus = modulus;
        self.ready = false;
        Ok(())
    }

    /// Begin computing the Montgomery product `a·b·R⁻¹ mod N`.
    ///
    /// Both operands must match the installed modulus in word count and be
    /// fully reduced. The computation runs over subsequent
    /// [`step`][Self::step] calls.
    pub fn start(&mut self, a: BigInt, b: BigInt) -> Result<()> {
        if self.is_busy() {
            return Err(Error::BusyRejected);
        }
        if !self.modulus.is_odd() {
            return Err(Error::NonOddModulus);
        }
        if a.len() != self.modulus.len() {
            return Err(Error::InvalidLength { words: a.len() });
        }
        if b.len() != self.modulus.len() {
            return Err(Error::InvalidLength { words: b.len() });
        }
        if a >= self.modulus || b >= self.modulus {
            return Err(Error::OperandOutOfRange);
        }

        self.a = a;
        self.b = b;
        self.ready = false;
        self.state = MultiplierState::InitAccumulator;
        Ok(())
    }

    /// Advance the automaton by one state transition. A no-op while idle.
    pub fn step(&mut self) {
        let len = self.modulus.len();

        self.state = match self.state {
            MultiplierState::Idle => MultiplierState::Idle,

            MultiplierState::InitAccumulator => {
                self.acc.as_words_mut().fill(0);
                self.head = 0;
                MultiplierState::LoopSetup
            }

            MultiplierState::LoopSetup => {
                self.word_index = 0;
                MultiplierState::LoopIterate
            }

            MultiplierState::LoopIterate => {
                if self.word_index == len {
                    MultiplierState::Emit
                } else {
                    // Operand words are consumed least significant first.
                    let b = self.b.as_words()[len - 1 - self.word_index];
                    let s0 = self.acc.as_words()[len - 1];
                    let a0 = self.a.as_words()[len - 1];

                    // q makes the low accumulator word vanish after both
                    // additions, keeping the upcoming division exact.
                    self.cur_word = b;
                    self.cur_q = s0
                        .wrapping_add(b.wrapping_mul(a0))
                        .wrapping_mul(self.neg_inv);
                    MultiplierState::AddModulus
                }
            }

            MultiplierState::AddModulus => {
                let carry = self.acc.carrying_add_mul_assign(&self.modulus, self.cur_q, 0);
                self.head += carry as u64;
                MultiplierState::AddOperand
            }

            MultiplierState::AddOperand => {
                let carry = self.acc.carrying_add_mul_assign(&self.a, self.cur_word, 0);
                self.head += carry as u64;
                MultiplierState::ShiftWord
            }

            MultiplierState::ShiftWord => {
                let words = self.acc.as_words_mut();
                debug_assert_eq!(words[len - 1], 0, "division by 2^32 must be exact");
                words.copy_within(0..len - 1, 1);
                words[0] = self.head as Word;
                self.head >>= Word::BITS;
                self.word_index += 1;
                MultiplierState::LoopIterate
            }

            MultiplierState::Emit => {
                // S < 2N here, so a single masked subtraction settles it.
                let reduce = Choice::from(self.head as u8) | !self.acc.ct_lt(&self.modulus);
                let borrow = self.acc.conditional_sub_assign(&self.modulus, reduce);
                debug_assert_eq!(self.head, borrow as u64);
                self.head = 0;
                self.product.as_words_mut().copy_from_slice(self.acc.as_words());
                MultiplierState::Done
            }

            MultiplierState::Done => {
                self.ready = true;
                MultiplierState::Idle
            }
        };
    }

    /// Whether a product is in flight.
    pub fn is_busy(&self) -> bool {
        self.state != MultiplierState::Idle
    }

    /// Whether the last started product has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current control state.
    pub fn state(&self) -> MultiplierState {
        self.state
    }

    /// The completed product, once [`is_ready`][Self::is_ready] reports it.
    pub fn product(&self) -> Option<&BigInt> {
        self.ready.then_some(&self.product)
    }

    /// Compute one Montgomery product to completion.
    pub fn multiply(&mut self, a: BigInt, b: BigInt) -> Result<BigInt> {
        self.start(a, b)?;
        while !self.ready {
            self.step();
        }
        Ok(self.product.clone())
    }

    /// Abandon any in-flight product and return to idle.
    ///
    /// The installed modulus is retained.
    pub fn reset(&mut self) {
        self.state = MultiplierState::Idle;
        self.head = 0;
        self.word_index = 0;
        self.ready = false;
    }
}

impl Default for MontgomeryMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for MontgomeryMultiplier {
    fn zeroize(&mut self) {
        self.modulus.zeroize();
        self.a.zeroize();
        self.b.zeroize();
        self.acc.zeroize();
        self.product.zeroize();
        self.neg_inv = 0;
        self.head = 0;
        self.cur_word = 0;
        self.cur_q = 0;
        self.reset();
    }
}
