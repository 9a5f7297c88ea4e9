//! [`BigInt`] addition operations.

use super::BigInt;
use crate::{
    Word,
    word::{carrying_add, carrying_mul_add},
};
use core::ops::{Add, AddAssign};

impl BigInt {
    /// Add `rhs` in place, returning the carry out of the most significant
    /// word.
    ///
    /// Both operands must have the same word count.
    pub fn carrying_add_assign(&mut self, rhs: &Self, mut carry: Word) -> Word {
        debug_assert_eq!(self.len(), rhs.len());

        for i in (0..self.words.len()).rev() {
            let (w, c) = carrying_add(self.words[i], rhs.words[i], carry);
            self.words[i] = w;
            carry = c;
        }

        carry
    }

    /// Compute `self + rhs + carry`, returning the result along with the
    /// carry out of the most significant word.
    pub fn carrying_add(&self, rhs: &Self, carry: Word) -> (Self, Word) {
        let mut ret = self.clone();
        let carry = ret.carrying_add_assign(rhs, carry);
        (ret, carry)
    }

    /// Double in place, returning the bit shifted out of the most significant
    /// word.
    pub fn double_assign(&mut self) -> Word {
        let mut carry = 0;

        for i in (0..self.words.len()).rev() {
            let w = self.words[i];
            self.words[i] = (w << 1) | carry;
            carry = w >> (Word::BITS - 1);
        }

        carry
    }

    /// Add the product `rhs · b` in place, where `b` is a single word,
    /// returning the carry out of the most significant word.
    ///
    /// Both operands must have the same word count.
    pub fn carrying_add_mul_assign(&mut self, rhs: &Self, b: Word, mut carry: Word) -> Word {
        debug_assert_eq!(self.len(), rhs.len());

        for i in (0..self.words.len()).rev() {
            let (w, c) = carrying_mul_add(rhs.words[i], b, self.words[i], carry);
            self.words[i] = w;
            carry = c;
        }

        carry
    }
}

impl Add<&BigInt> for BigInt {
    type Output = BigInt;

    fn add(mut self, rhs: &BigInt) -> BigInt {
        let carry = self.carrying_add_assign(rhs, 0);
        assert_eq!(carry, 0, "attempted to add with overflow");
        self
    }
}

impl Add<BigInt> for BigInt {
    type Output = BigInt;

    fn add(self, rhs: BigInt) -> BigInt {
        self + &rhs
    }
}

impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, rhs: &BigInt) {
        let carry = self.carrying_add_assign(rhs, 0);
        assert_eq!(carry, 0, "attempted to add with overflow");
    }
}
