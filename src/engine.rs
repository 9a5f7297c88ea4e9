//! The modular exponentiation engine.
//!
//! [`ModExpCore`] bundles the operand banks and the two control automatons
//! behind the programmatic interface: configure a length, load operands,
//! start, tick until ready, read the result. The word-addressed bus front
//! end in [`registers`][crate::registers] layers on top of this type.

use crate::{
    BigInt, Error, Result, Word,
    controller::{ControllerState, ExponentiationController},
    residue::{DoublingResidue, ResidueCalculator},
    store::{Bank, OperandStore},
};
use tracing::{debug, instrument};

/// Largest supported operand size in words (8192 bits).
pub const MAX_OPERAND_WORDS: usize = 256;

/// Word-addressable modular exponentiation engine computing `M^e mod N`.
///
/// The engine holds one operand set at a time. Operand banks persist across
/// runs and are overwritten only by explicit loads, by
/// [`set_length`][Self::set_length] (which zeroes them), or by result
/// write-back on completion. While a run is in flight every load, start and
/// result access is rejected with [`Error::BusyRejected`]; only an explicit
/// [`reset`][Self::reset] abandons a run early.
#[derive(Clone, Debug)]
pub struct ModExpCore<R: ResidueCalculator = DoublingResidue> {
    store: OperandStore,
    controller: ExponentiationController<R>,
}

impl ModExpCore<DoublingResidue> {
    /// Create an engine with a one-word operand length and zeroed banks.
    pub fn new() -> Self {
        Self::with_residue_calculator(DoublingResidue::new())
    }
}

impl Default for ModExpCore<DoublingResidue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ResidueCalculator> ModExpCore<R> {
    /// Create an engine with a caller-supplied residue calculator.
    pub fn with_residue_calculator(residue_calc: R) -> Self {
        Self {
            store: OperandStore::new(1),
            controller: ExponentiationController::with_residue_calculator(residue_calc),
        }
    }

    /// Configured operand length in words.
    pub fn length(&self) -> usize {
        self.store.len()
    }

    /// Set the operand length and zero every bank.
    ///
    /// `words` must lie in `1..=`[`MAX_OPERAND_WORDS`].
    pub fn set_length(&mut self, words: usize) -> Result<()> {
        if self.is_busy() {
            return Err(Error::BusyRejected);
        }
        if words == 0 || words > MAX_OPERAND_WORDS {
            return Err(Error::InvalidLength { words });
        }

        self.store.reset(words);
        Ok(())
    }

    /// Load the modulus bank. The slice length must match the configured
    /// length exactly.
    pub fn load_modulus(&mut self, words: &[Word]) -> Result<()> {
        self.load(Bank::Modulus, words)
    }

    /// Load the exponent bank. The slice length must match the configured
    /// length exactly.
    pub fn load_exponent(&mut self, words: &[Word]) -> Result<()> {
        self.load(Bank::Exponent, words)
    }

    /// Load the message bank. The slice length must match the configured
    /// length exactly.
    pub fn load_message(&mut self, words: &[Word]) -> Result<()> {
        self.load(Bank::Message, words)
    }

    fn load(&mut self, bank: Bank, words: &[Word]) -> Result<()> {
        if self.is_busy() {
            return Err(Error::BusyRejected);
        }
        if words.len() != self.store.len() {
            return Err(Error::InvalidLength { words: words.len() });
        }

        self.store.set(bank, BigInt::from(words));
        Ok(())
    }

    /// Begin computing `message^exponent mod modulus` from the loaded banks.
    ///
    /// Operands are validated here, before any state changes: the modulus
    /// must be odd and the message fully reduced. The run then advances one
    /// tick per [`step`][Self::step] call.
    pub fn start(&mut self) -> Result<()> {
        if self.is_busy() {
            return Err(Error::BusyRejected);
        }

        self.controller.start(
            self.store.get(Bank::Modulus).clone(),
            self.store.get(Bank::Exponent).clone(),
            self.store.get(Bank::Message).clone(),
        )?;
        debug!(words = self.store.len(), "modular exponentiation started");
        Ok(())
    }

    /// Advance the engine by one tick. A no-op while idle.
    pub fn step(&mut self) {
        if !self.controller.is_busy() {
            return;
        }

        self.controller.step();
        if let Some(result) = self.controller.result() {
            self.store.set(Bank::Result, result.clone());
            debug!("modular exponentiation complete");
        }
    }

    /// Tick until the in-flight run (if any) completes.
    #[instrument(skip_all, level = "debug", fields(words = self.length()))]
    pub fn run_to_completion(&mut self) {
        while self.is_busy() {
            self.step();
        }
    }

    /// Whether a run is in flight.
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Whether the last started run has completed and its result is
    /// readable.
    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    /// Control state of the exponentiation automaton.
    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Borrow the result bank.
    ///
    /// Rejected while a run is in flight. Before the first completed run
    /// the bank reads as zero.
    pub fn result(&self) -> Result<&BigInt> {
        if self.is_busy() {
            return Err(Error::BusyRejected);
        }
        Ok(self.store.get(Bank::Result))
    }

    /// Abandon any in-flight run and return to idle.
    ///
    /// Bank contents persist; no partial result is written back.
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// Compute `message^exponent mod modulus` in one call.
    ///
    /// Reconfigures the engine to the modulus length, loads all three
    /// banks, and runs to completion. All operands must have the same word
    /// count.
    pub fn exponentiate(
        &mut self,
        message: &BigInt,
        exponent: &BigInt,
        modulus: &BigInt,
    ) -> Result<BigInt> {
        self.set_length(modulus.len())?;
        self.load_modulus(modulus.as_words())?;
        self.load_exponent(exponent.as_words())?;
        self.load_message(message.as_words())?;
        self.start()?;
        self.run_to_completion();
        self.result().cloned()
    }

    /// Read one word of a bank, if `offset` is within the configured
    /// length.
    pub(crate) fn bank_word(&self, bank: Bank, offset: usize) -> Option<Word> {
        self.store.word(bank, offset)
    }

    /// Write one word of a bank, if `offset` is within the configured
    /// length.
    pub(crate) fn set_bank_word(&mut self, bank: Bank, offset: usize, value: Word) -> Option<()> {
        self.store.set_word(bank, offset, value)
    }
}

#[cfg(feature = "zeroize")]
impl<R: ResidueCalculator + zeroize::Zeroize> zeroize::Zeroize for ModExpCore<R> {
    fn zeroize(&mut self) {
        self.store.zeroize();
        self.controller.zeroize();
    }
}
