//! `Word` is the 32-bit storage granule of the engine: the unit of every bank
//! access, every register transfer, and every carry-chain step.
//!
//! The free functions here are the arithmetic leaves everything else is built
//! from: a carry-propagate adder, a borrow-propagate subtractor, and the
//! widening multiply-accumulate used by the Montgomery row passes.

/// Unsigned 32-bit storage granule.
pub type Word = u32;

/// Unsigned wide integer type: double the width of [`Word`].
pub(crate) type WideWord = u64;

/// Computes `lhs + rhs + carry`, returning the result along with the new
/// carry (0, 1, or 2).
#[inline(always)]
pub(crate) const fn carrying_add(lhs: Word, rhs: Word, carry: Word) -> (Word, Word) {
    let ret = lhs as WideWord + rhs as WideWord + carry as WideWord;
    (ret as Word, (ret >> Word::BITS) as Word)
}

/// Computes `lhs - (rhs + borrow)`, returning the result along with the new
/// borrow (0 or 1).
#[inline(always)]
pub(crate) const fn borrowing_sub(lhs: Word, rhs: Word, borrow: Word) -> (Word, Word) {
    let (diff, b1) = lhs.overflowing_sub(rhs);
    let (diff, b2) = diff.overflowing_sub(borrow);
    // The two subtractions can never both underflow.
    (diff, b1 as Word | b2 as Word)
}

/// Computes `(lhs * rhs) + addend + carry`, returning the result along with
/// the new carry. Cannot overflow the wide type.
#[inline(always)]
pub(crate) const fn carrying_mul_add(
    lhs: Word,
    rhs: Word,
    addend: Word,
    carry: Word,
) -> (Word, Word) {
    let ret = (lhs as WideWord * rhs as WideWord) + addend as WideWord + carry as WideWord;
    (ret as Word, (ret >> Word::BITS) as Word)
}

/// Computes the multiplicative inverse of `value` modulo 2^32 by Hensel
/// lifting from a 5-bit seed. Requires `value` to be odd.
pub(crate) const fn invert_mod_word(value: Word) -> Word {
    debug_assert!(value & 1 == 1);
    let x = value.wrapping_mul(3) ^ 2;
    let y = 1u32.wrapping_sub(x.wrapping_mul(value));
    let (x, y) = (x.wrapping_mul(y.wrapping_add(1)), y.wrapping_mul(y));
    let (x, y) = (x.wrapping_mul(y.wrapping_add(1)), y.wrapping_mul(y));
    x.wrapping_mul(y.wrapping_add(1))
}

#[cfg(test)]
mod tests {
    use super::Word;

    #[test]
    fn carrying_add() {
        assert_eq!(super::carrying_add(1, 2, 0), (3, 0));
        assert_eq!(super::carrying_add(Word::MAX, 1, 0), (0, 1));
        assert_eq!(super::carrying_add(Word::MAX, Word::MAX, 1), (Word::MAX, 1));
    }

    #[test]
    fn borrowing_sub() {
        assert_eq!(super::borrowing_sub(3, 2, 0), (1, 0));
        assert_eq!(super::borrowing_sub(0, 1, 0), (Word::MAX, 1));
        assert_eq!(super::borrowing_sub(0, Word::MAX, 1), (0, 1));
        assert_eq!(super::borrowing_sub(5, 2, 1), (2, 0));
    }

    #[test]
    fn carrying_mul_add() {
        assert_eq!(super::carrying_mul_add(0, 0, 0, 0), (0, 0));
        assert_eq!(super::carrying_mul_add(2, 3, 4, 5), (15, 0));
        // (2^32 - 1)^2 + (2^32 - 1) + (2^32 - 1) = 2^64 - 1
        let (lo, hi) = super::carrying_mul_add(Word::MAX, Word::MAX, Word::MAX, Word::MAX);
        assert_eq!((lo, hi), (Word::MAX, Word::MAX));
    }

    #[test]
    fn invert_mod_word() {
        assert_eq!(super::invert_mod_word(1), 1);
        assert_eq!(super::invert_mod_word(3), 0xAAAAAAAB);

        for value in [5u32, 0xB, 0x10001, 0xDDDDDDDD, Word::MAX] {
            let inv = super::invert_mod_word(value);
            assert_eq!(value.wrapping_mul(inv), 1);
        }
    }
}
