//! Word-addressed register front end.
//!
//! [`RegisterInterface`] exposes the engine the way a bus master sees it:
//! a flat 16-bit word-address space split into a general block and one
//! block per operand bank. The high byte of an address selects the block,
//! the low byte the word offset inside it.
//!
//! | Address       | Contents                                   |
//! |---------------|--------------------------------------------|
//! | `0x0000`      | core identification (read-only)            |
//! | `0x0001`      | core version (read-only)                   |
//! | `0x0008`      | control: start / reset bits                |
//! | `0x0009`      | status: ready / busy bits (read-only)      |
//! | `0x0100..`    | modulus words, most significant first      |
//! | `0x0200..`    | exponent words                             |
//! | `0x0300..`    | message words                              |
//! | `0x0400..`    | result words (read-only)                   |
//! | `0x0500`      | operand length in words                    |
//!
//! Bank offsets are valid up to the configured length; everything else
//! decodes to [`Error::UnmappedAddress`]. While a run is in flight all bank
//! accesses and configuration writes are rejected with
//! [`Error::BusyRejected`]; identification, status and length stay
//! readable, and a control write carrying the reset bit aborts the run.

use crate::{
    Error, ModExpCore, Result, Word,
    residue::{DoublingResidue, ResidueCalculator},
    store::Bank,
};

/// Identification word, `"MODX"` in ASCII.
pub const CORE_ID: Word = 0x4D4F_4458;

/// Version word, `0x00MMmmpp` encoding major.minor.patch.
pub const CORE_VERSION: Word = 0x0001_0000;

/// Identification register address.
pub const ADDR_ID: u16 = 0x0000;
/// Version register address.
pub const ADDR_VERSION: u16 = 0x0001;
/// Control register address.
pub const ADDR_CONTROL: u16 = 0x0008;
/// Status register address.
pub const ADDR_STATUS: u16 = 0x0009;
/// First word of the modulus bank.
pub const ADDR_MODULUS: u16 = 0x0100;
/// First word of the exponent bank.
pub const ADDR_EXPONENT: u16 = 0x0200;
/// First word of the message bank.
pub const ADDR_MESSAGE: u16 = 0x0300;
/// First word of the result bank.
pub const ADDR_RESULT: u16 = 0x0400;
/// Operand length register address.
pub const ADDR_LENGTH: u16 = 0x0500;

/// Control bit: begin a run from the loaded banks.
pub const CONTROL_START: Word = 1;
/// Control bit: abandon any in-flight run.
pub const CONTROL_RESET: Word = 1 << 1;

/// Status bit: the last started run has completed.
pub const STATUS_READY: Word = 1;
/// Status bit: a run is in flight.
pub const STATUS_BUSY: Word = 1 << 1;

/// Bus-facing wrapper around [`ModExpCore`].
///
/// Register accesses never advance the computation; the owner clocks the
/// engine explicitly through [`tick`][Self::tick] while polling the status
/// register.
#[derive(Clone, Debug)]
pub struct RegisterInterface<R: ResidueCalculator = DoublingResidue> {
    core: ModExpCore<R>,
}

impl RegisterInterface<DoublingResidue> {
    /// Create an interface around a freshly reset engine.
    pub fn new() -> Self {
        Self::with_core(ModExpCore::new())
    }
}

impl Default for RegisterInterface<DoublingResidue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ResidueCalculator> RegisterInterface<R> {
    /// Wrap an existing engine.
    pub fn with_core(core: ModExpCore<R>) -> Self {
        Self { core }
    }

    /// Borrow the wrapped engine.
    pub fn core(&self) -> &ModExpCore<R> {
        &self.core
    }

    /// Unwrap into the engine.
    pub fn into_core(self) -> ModExpCore<R> {
        self.core
    }

    /// Advance the engine by one tick.
    pub fn tick(&mut self) {
        self.core.step();
    }

    /// Read the register at `address`.
    pub fn read(&self, address: u16) -> Result<Word> {
        let offset = (address & 0xFF) as usize;

        match address >> 8 {
            0x0 => match address {
                ADDR_ID => Ok(CORE_ID),
                ADDR_VERSION => Ok(CORE_VERSION),
                ADDR_CONTROL => Ok(0),
                ADDR_STATUS => Ok(self.status()),
                _ => Err(Error::UnmappedAddress { address }),
            },
            0x1 => self.bank_read(Bank::Modulus, offset, address),
            0x2 => self.bank_read(Bank::Exponent, offset, address),
            0x3 => self.bank_read(Bank::Message, offset, address),
            0x4 => self.bank_read(Bank::Result, offset, address),
            0x5 if offset == 0 => Ok(self.core.length() as Word),
            _ => Err(Error::UnmappedAddress { address }),
        }
    }

    /// Write `value` to the register at `address`.
    pub fn write(&mut self, address: u16, value: Word) -> Result<()> {
        let offset = (address & 0xFF) as usize;

        match address >> 8 {
            0x0 => match address {
                ADDR_ID | ADDR_VERSION | ADDR_STATUS => {
                    Err(Error::WriteToReadOnly { address })
                }
                ADDR_CONTROL => self.control(value),
                _ => Err(Error::UnmappedAddress { address }),
            },
            0x1 => self.bank_write(Bank::Modulus, offset, value, address),
            0x2 => self.bank_write(Bank::Exponent, offset, value, address),
            0x3 => self.bank_write(Bank::Message, offset, value, address),
            0x4 => Err(Error::WriteToReadOnly { address }),
            0x5 if offset == 0 => self.core.set_length(value as usize),
            _ => Err(Error::UnmappedAddress { address }),
        }
    }

    /// Current status word.
    fn status(&self) -> Word {
        let mut status = 0;
        if self.core.is_ready() {
            status |= STATUS_READY;
        }
        if self.core.is_busy() {
            status |= STATUS_BUSY;
        }
        status
    }

    /// Apply a control word. Reset is honored before start, so a write
    /// carrying both bits restarts the engine from the loaded banks.
    fn control(&mut self, value: Word) -> Result<()> {
        if value & CONTROL_RESET != 0 {
            self.core.reset();
        }
        if value & CONTROL_START != 0 {
            self.core.start()?;
        }
        Ok(())
    }

    fn bank_read(&self, bank: Bank, offset: usize, address: u16) -> Result<Word> {
        if self.core.is_busy() {
            return Err(Error::BusyRejected);
        }
        self.core
            .bank_word(bank, offset)
            .ok_or(Error::UnmappedAddress { address })
    }

    fn bank_write(
        &mut self,
        bank: Bank,
        offset: usize,
        value: Word,
        address: u16,
    ) -> Result<()> {
        if self.core.is_busy() {
            return Err(Error::BusyRejected);
        }
        self.core
            .set_bank_word(bank, offset, value)
            .ok_or(Error::UnmappedAddress { address })
    }
}
