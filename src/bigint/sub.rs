//! [`BigInt`] subtraction operations.

use super::BigInt;
use crate::{Word, word::borrowing_sub};
use subtle::{Choice, ConditionallySelectable};

impl BigInt {
    /// Subtract `rhs` in place, returning the borrow out of the most
    /// significant word.
    ///
    /// Both operands must have the same word count.
    pub fn borrowing_sub_assign(&mut self, rhs: &Self, mut borrow: Word) -> Word {
        debug_assert_eq!(self.len(), rhs.len());

        for i in (0..self.words.len()).rev() {
            let (w, b) = borrowing_sub(self.words[i], rhs.words[i], borrow);
            self.words[i] = w;
            borrow = b;
        }

        borrow
    }

    /// Compute `self - rhs - borrow`, returning the result along with the
    /// borrow out of the most significant word.
    pub fn borrowing_sub(&self, rhs: &Self, borrow: Word) -> (Self, Word) {
        let mut ret = self.clone();
        let borrow = ret.borrowing_sub_assign(rhs, borrow);
        (ret, borrow)
    }

    /// Subtract `rhs` in place if `choice` is truthy, otherwise leave `self`
    /// unchanged. Returns the borrow out of the most significant word.
    ///
    /// The word-level work performed is the same either way.
    pub fn conditional_sub_assign(&mut self, rhs: &Self, choice: Choice) -> Word {
        debug_assert_eq!(self.len(), rhs.len());

        let mask = Word::conditional_select(&0, &Word::MAX, choice);
        let mut borrow = 0;

        for i in (0..self.words.len()).rev() {
            let (w, b) = borrowing_sub(self.words[i], rhs.words[i] & mask, borrow);
            self.words[i] = w;
            borrow = b;
        }

        borrow
    }
}
