//! Error types.

use core::fmt;

/// Result type with the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the engine and its register interface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Operand length (in words) outside the supported range.
    InvalidLength {
        /// The rejected word count.
        words: usize,
    },

    /// The loaded modulus is even (or zero), so no Montgomery constant
    /// exists for it.
    NonOddModulus,

    /// The loaded message is not fully reduced modulo the modulus.
    OperandOutOfRange,

    /// A command or operand write arrived while a computation was in
    /// flight.
    BusyRejected,

    /// A register access decoded to no mapped register.
    UnmappedAddress {
        /// The offending address.
        address: u16,
    },

    /// A write targeted a read-only register.
    WriteToReadOnly {
        /// The offending address.
        address: u16,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength { words } => {
                write!(f, "unsupported operand length: {words} words")
            }
            Error::NonOddModulus => f.write_str("modulus must be odd"),
            Error::OperandOutOfRange => f.write_str("message must be less than the modulus"),
            Error::BusyRejected => f.write_str("engine is busy"),
            Error::UnmappedAddress { address } => {
                write!(f, "no register mapped at address {address:#06x}")
            }
            Error::WriteToReadOnly { address } => {
                write!(f, "write to read-only register at address {address:#06x}")
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display() {
        assert_eq!(
            Error::InvalidLength { words: 300 }.to_string(),
            "unsupported operand length: 300 words"
        );
        assert_eq!(Error::NonOddModulus.to_string(), "modulus must be odd");
        assert_eq!(
            Error::UnmappedAddress { address: 0x0603 }.to_string(),
            "no register mapped at address 0x0603"
        );
    }
}
