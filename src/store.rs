//! Word-addressable operand banks.
//!
//! Each bank holds one operand as a [`BigInt`] whose word count tracks the
//! configured operand length. Offset 0 addresses the most significant word
//! of a bank, matching the bus-facing register layout.

use crate::{BigInt, Word};

/// The four externally addressable operand banks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bank {
    /// The modulus `N`.
    Modulus,
    /// The exponent `e`.
    Exponent,
    /// The message `M`.
    Message,
    /// The result `C`.
    Result,
}

/// Backing storage for the operand banks.
#[derive(Clone, Debug)]
pub(crate) struct OperandStore {
    modulus: BigInt,
    exponent: BigInt,
    message: BigInt,
    result: BigInt,
}

impl OperandStore {
    /// Create a store with all banks zeroed at the given word count.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            modulus: BigInt::zero(len),
            exponent: BigInt::zero(len),
            message: BigInt::zero(len),
            result: BigInt::zero(len),
        }
    }

    /// Word count of every bank.
    pub(crate) fn len(&self) -> usize {
        self.modulus.len()
    }

    /// Zero all banks and resize them to `len` words.
    pub(crate) fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    /// Borrow a bank.
    pub(crate) fn get(&self, bank: Bank) -> &BigInt {
        match bank {
            Bank::Modulus => &self.modulus,
            Bank::Exponent => &self.exponent,
            Bank::Message => &self.message,
            Bank::Result => &self.result,
        }
    }

    /// Replace the contents of a bank.
    ///
    /// The replacement must match the configured word count.
    pub(crate) fn set(&mut self, bank: Bank, value: BigInt) {
        debug_assert_eq!(value.len(), self.len());
        match bank {
            Bank::Modulus => self.modulus = value,
            Bank::Exponent => self.exponent = value,
            Bank::Message => self.message = value,
            Bank::Result => self.result = value,
        }
    }

    /// Read one word of a bank, or `None` if `offset` is outside the
    /// configured length.
    pub(crate) fn word(&self, bank: Bank, offset: usize) -> Option<Word> {
        self.get(bank).as_words().get(offset).copied()
    }

    /// Write one word of a bank, or `None` if `offset` is outside the
    /// configured length.
    pub(crate) fn set_word(&mut self, bank: Bank, offset: usize, value: Word) -> Option<()> {
        let words = match bank {
            Bank::Modulus => self.modulus.as_words_mut(),
            Bank::Exponent => self.exponent.as_words_mut(),
            Bank::Message => self.message.as_words_mut(),
            Bank::Result => self.result.as_words_mut(),
        };
        *words.get_mut(offset)? = value;
        Some(())
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for OperandStore {
    fn zeroize(&mut self) {
        self.modulus.zeroize();
        self.exponent.zeroize();
        self.message.zeroize();
        self.result.zeroize();
    }
}
