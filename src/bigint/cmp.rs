//! [`BigInt`] comparisons.
//!
//! Big-endian word order makes same-length comparison a lexicographic slice
//! compare. [`BigInt::ct_lt`] exists separately for the datapath, where the
//! comparison is a full borrow chain regardless of the operand values.

use super::BigInt;
use crate::{Word, word::borrowing_sub};
use core::cmp::Ordering;
use subtle::Choice;

/// Strip leading zero words.
fn significant(words: &[Word]) -> &[Word] {
    let first = words.iter().position(|&w| w != 0).unwrap_or(words.len());
    &words[first..]
}

impl BigInt {
    /// Is `self` numerically less than `rhs`?
    ///
    /// Evaluated as a full borrow chain. Both operands must have the same
    /// word count.
    pub fn ct_lt(&self, rhs: &Self) -> Choice {
        debug_assert_eq!(self.len(), rhs.len());

        let mut borrow = 0;
        for i in (0..self.words.len()).rev() {
            let (_, b) = borrowing_sub(self.words[i], rhs.words[i], borrow);
            borrow = b;
        }

        Choice::from(borrow as u8)
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = significant(&self.words);
        let rhs = significant(&other.words);

        lhs.len()
            .cmp(&rhs.len())
            .then_with(|| lhs.cmp(rhs))
            .then_with(|| self.len().cmp(&other.len()))
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::BigInt;

    #[test]
    fn ordering_follows_value() {
        let small = BigInt::from([0, 7]);
        let large = BigInt::from([1, 0]);
        assert!(small < large);
        assert!(large > small);
        assert!(small < BigInt::from([0, 8]));
        assert_eq!(small, BigInt::from([0, 7]));
    }

    #[test]
    fn ordering_across_word_counts() {
        assert!(BigInt::from([0, 0, 7]) > BigInt::from([5]));
        assert!(BigInt::from([1, 0]) > BigInt::from([u32::MAX]));
    }

    #[test]
    fn ct_lt() {
        let n = BigInt::from([0, 0, 13]);
        assert_eq!(BigInt::from_u64(12, 3).ct_lt(&n).unwrap_u8(), 1);
        assert_eq!(BigInt::from_u64(13, 3).ct_lt(&n).unwrap_u8(), 0);
        assert_eq!(BigInt::from_u64(14, 3).ct_lt(&n).unwrap_u8(), 0);
    }
}
