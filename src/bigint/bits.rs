//! Bit-level access to [`BigInt`].

use super::BigInt;
use crate::Word;

impl BigInt {
    /// Total number of bits the representation can hold.
    pub fn bits_precision(&self) -> u32 {
        self.words.len() as u32 * Word::BITS
    }

    /// Returns bit `index`, counted from the least significant bit of the
    /// least significant word. Out-of-range indices read as zero.
    ///
    /// Runtime may vary with `index`.
    pub fn bit_vartime(&self, index: u32) -> bool {
        if index >= self.bits_precision() {
            return false;
        }

        let word = self.words.len() - 1 - (index / Word::BITS) as usize;
        (self.words[word] >> (index % Word::BITS)) & 1 == 1
    }
}
