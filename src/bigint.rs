//! Big unsigned integers represented as a runtime-length sequence of 32-bit
//! words in big-endian word order.

mod add;
mod bits;
mod cmp;
mod sub;

use crate::Word;
use core::fmt;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Big unsigned integer with a word count fixed at construction.
///
/// Words are stored in **big-endian word order**: index 0 holds the most
/// significant word and index `len - 1` the least significant, matching the
/// bank and register addressing convention of the engine. The value is
/// `Σ words[i] · 2^(32·(len-1-i))`.
///
/// Unlike arbitrary-precision integers, a `BigInt` never grows: carry out of
/// the most significant word is returned to the caller, not absorbed.
#[derive(Clone, PartialEq, Eq)]
pub struct BigInt {
    /// Boxed slice of words, most significant first.
    pub(crate) words: Box<[Word]>,
}

impl BigInt {
    /// Get the value `0` with the given word count.
    pub fn zero(len: usize) -> Self {
        Self {
            words: vec![0; len].into(),
        }
    }

    /// Get the value `1` with the given word count.
    ///
    /// Panics if `len` is zero.
    pub fn one(len: usize) -> Self {
        assert!(len > 0, "word count must be nonzero");
        let mut ret = Self::zero(len);
        ret.words[len - 1] = 1;
        ret
    }

    /// Create a [`BigInt`] holding `value`, zero-padded to `len` words.
    ///
    /// Panics if `len` is zero or `value` does not fit in `len` words.
    pub fn from_u64(value: u64, len: usize) -> Self {
        assert!(len > 0, "word count must be nonzero");
        let hi = (value >> Word::BITS) as Word;
        assert!(len >= 2 || hi == 0, "value does not fit in one word");

        let mut ret = Self::zero(len);
        ret.words[len - 1] = value as Word;
        if len >= 2 {
            ret.words[len - 2] = hi;
        }
        ret
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether this [`BigInt`] has zero words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Is this value equal to zero?
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Is this value an odd number?
    pub fn is_odd(&self) -> bool {
        self.words.last().is_some_and(|&w| w & 1 == 1)
    }

    /// Borrow the words, most significant first.
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    /// Mutably borrow the words, most significant first.
    pub fn as_words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Convert into the inner boxed word slice.
    pub fn into_words(self) -> Box<[Word]> {
        self.words
    }
}

impl From<&[Word]> for BigInt {
    fn from(words: &[Word]) -> Self {
        Self {
            words: words.into(),
        }
    }
}

impl From<Vec<Word>> for BigInt {
    fn from(words: Vec<Word>) -> Self {
        Self {
            words: words.into_boxed_slice(),
        }
    }
}

impl<const N: usize> From<[Word; N]> for BigInt {
    fn from(words: [Word; N]) -> Self {
        Self {
            words: Box::new(words),
        }
    }
}

impl num_traits::Zero for BigInt {
    fn zero() -> Self {
        Self::zero(1)
    }

    fn is_zero(&self) -> bool {
        self.is_zero()
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt(0x{self:X})")
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.words.is_empty() {
            return write!(f, "{:08x}", 0);
        }
        for word in self.words.iter() {
            write!(f, "{word:08x}")?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.words.is_empty() {
            return write!(f, "{:08X}", 0);
        }
        for word in self.words.iter() {
            write!(f, "{word:08X}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.words.zeroize();
    }
}
