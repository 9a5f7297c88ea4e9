//! Exponentiation control automaton.
//!
//! [`ExponentiationController`] realizes `M^e mod N` as a right-to-left
//! binary ladder over Montgomery products. It owns the multiplier and a
//! [`ResidueCalculator`], drives both through their ready/busy handshakes,
//! and routes each completed product into one of its two working values:
//! the accumulator `Z` (running result) and the power `P` (running square
//! of the message).
//!
//! Stages, in order: residue setup, conversion of `1` and the message into
//! Montgomery form, one conditional multiply and one square per exponent
//! bit from least to most significant, and a final conversion out of
//! Montgomery form. The controller scans all `32·L` exponent bits; leading
//! zero bits cost a square each but do not change the result.

use crate::{
    BigInt, Error, Result,
    multiplier::MontgomeryMultiplier,
    residue::{DoublingResidue, ResidueCalculator},
};
use tracing::trace;

/// Control state of the exponentiation ladder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControllerState {
    /// Waiting for work. Stepping here is a no-op.
    Idle,
    /// Running the residue calculator to obtain `R² mod N`.
    ResidueSetup,
    /// Computing `Z ← MontMul(1, R²)`, the Montgomery form of 1.
    IdentityInit,
    /// Computing `P ← MontMul(M, R²)`, the Montgomery form of the message.
    MessageInit,
    /// Computing `Z ← MontMul(Z, P)` for a set exponent bit.
    LadderMultiply,
    /// Computing `P ← MontMul(P, P)`; performed for every exponent bit.
    LadderSquare,
    /// Computing `Z ← MontMul(Z, 1)` to leave Montgomery form.
    Normalize,
    /// Raise the ready flag and return to idle.
    Done,
}

/// Which value feeds a multiplier operand port.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OperandSource {
    /// The constant 1, reduced modulo `N`.
    One,
    Message,
    Residue,
    Accumulator,
    Power,
}

/// Where a completed product is written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum WriteTarget {
    Accumulator,
    Power,
    /// Rest position of the selector while no product is in flight.
    Discard,
}

/// Drives residue setup, Montgomery-form conversion, and the
/// square-and-multiply ladder, one tick per [`step`][Self::step] call.
#[derive(Clone, Debug)]
pub struct ExponentiationController<R: ResidueCalculator = DoublingResidue> {
    state: ControllerState,
    multiplier: MontgomeryMultiplier,
    residue_calc: R,
    modulus: BigInt,
    exponent: BigInt,
    message: BigInt,
    /// `R² mod N`, captured from the residue calculator.
    residue: BigInt,
    /// `Z`, the running result.
    accumulator: BigInt,
    /// `P`, the running square of the message.
    power: BigInt,
    target: WriteTarget,
    /// Index of the exponent bit the ladder is processing, from bit 0.
    bit: u32,
    ready: bool,
}

impl ExponentiationController<DoublingResidue> {
    /// Create a controller using [`DoublingResidue`] for residue setup.
    pub fn new() -> Self {
        Self::with_residue_calculator(DoublingResidue::new())
    }
}

impl Default for ExponentiationController<DoublingResidue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ResidueCalculator> ExponentiationController<R> {
    /// Create a controller with a caller-supplied residue calculator.
    pub fn with_residue_calculator(residue_calc: R) -> Self {
        Self {
            state: ControllerState::Idle,
            multiplier: MontgomeryMultiplier::new(),
            residue_calc,
            modulus: BigInt::zero(0),
            exponent: BigInt::zero(0),
            message: BigInt::zero(0),
            residue: BigInt::zero(0),
            accumulator: BigInt::zero(0),
            power: BigInt::zero(0),
            target: WriteTarget::Discard,
            bit: 0,
            ready: false,
        }
    }

    /// Begin computing `message^exponent mod modulus`.
    ///
    /// All three operands must have the same word count, the modulus must be
    /// odd, and the message must be fully reduced. The computation runs over
    /// subsequent [`step`][Self::step] calls.
    pub fn start(&mut self, modulus: BigInt, exponent: BigInt, message: BigInt) -> Result<()> {
        if self.is_busy() {
            return Err(Error::BusyRejected);
        }
        if exponent.len() != modulus.len() {
            return Err(Error::InvalidLength {
                words: exponent.len(),
            });
        }
        if message.len() != modulus.len() {
            return Err(Error::InvalidLength {
                words: message.len(),
            });
        }
        if !modulus.is_odd() {
            return Err(Error::NonOddModulus);
        }
        if message >= modulus {
            return Err(Error::OperandOutOfRange);
        }

        self.multiplier.install_modulus(modulus.clone())?;
        self.residue_calc.start(&modulus);

        let len = modulus.len();
        self.modulus = modulus;
        self.exponent = exponent;
        self.message = message;
        self.residue = BigInt::zero(len);
        self.accumulator = BigInt::zero(len);
        self.power = BigInt::zero(len);
        self.target = WriteTarget::Discard;
        self.bit = 0;
        self.ready = false;
        self.advance(ControllerState::ResidueSetup);
        Ok(())
    }

    /// Advance the automaton by one tick. A no-op while idle.
    ///
    /// Each tick steps whichever sub-block is active; stage transitions
    /// happen on the tick that observes the sub-block's ready flag.
    pub fn step(&mut self) {
        match self.state {
            ControllerState::Idle => {}

            ControllerState::ResidueSetup => {
                if let Some(r2) = self.residue_calc.result() {
                    self.residue = r2.clone();
                    self.begin(
                        OperandSource::One,
                        OperandSource::Residue,
                        WriteTarget::Accumulator,
                    );
                    self.advance(ControllerState::IdentityInit);
                } else {
                    self.residue_calc.step();
                }
            }

            ControllerState::IdentityInit => {
                if self.multiplier.is_ready() {
                    self.route_product();
                    self.begin(
                        OperandSource::Message,
                        OperandSource::Residue,
                        WriteTarget::Power,
                    );
                    self.advance(ControllerState::MessageInit);
                } else {
                    self.multiplier.step();
                }
            }

            ControllerState::MessageInit => {
                if self.multiplier.is_ready() {
                    self.route_product();
                    self.enter_ladder_step();
                } else {
                    self.multiplier.step();
                }
            }

            ControllerState::LadderMultiply => {
                if self.multiplier.is_ready() {
                    self.route_product();
                    // The square for this bit still has to run.
                    self.begin(
                        OperandSource::Power,
                        OperandSource::Power,
                        WriteTarget::Power,
                    );
                    self.advance(ControllerState::LadderSquare);
                } else {
                    self.multiplier.step();
                }
            }

            ControllerState::LadderSquare => {
                if self.multiplier.is_ready() {
                    self.route_product();
                    self.bit += 1;
                    self.enter_ladder_step();
                } else {
                    self.multiplier.step();
                }
            }

            ControllerState::Normalize => {
                if self.multiplier.is_ready() {
                    self.route_product();
                    self.advance(ControllerState::Done);
                } else {
                    self.multiplier.step();
                }
            }

            ControllerState::Done => {
                self.ready = true;
                self.advance(ControllerState::Idle);
            }
        }
    }

    /// Whether an exponentiation is in flight.
    pub fn is_busy(&self) -> bool {
        self.state != ControllerState::Idle
    }

    /// Whether the last started exponentiation has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current control state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The final result, once [`is_ready`][Self::is_ready] reports it.
    pub fn result(&self) -> Option<&BigInt> {
        self.ready.then_some(&self.accumulator)
    }

    /// Abandon any in-flight exponentiation and return to idle.
    pub fn reset(&mut self) {
        self.state = ControllerState::Idle;
        self.target = WriteTarget::Discard;
        self.bit = 0;
        self.ready = false;
        self.multiplier.reset();
    }

    /// Pick the next ladder stage, or leave the ladder after the last bit.
    fn enter_ladder_step(&mut self) {
        if self.bit == self.exponent.bits_precision() {
            self.begin(
                OperandSource::One,
                OperandSource::Accumulator,
                WriteTarget::Accumulator,
            );
            self.advance(ControllerState::Normalize);
        } else if self.exponent.bit_vartime(self.bit) {
            self.begin(
                OperandSource::Accumulator,
                OperandSource::Power,
                WriteTarget::Accumulator,
            );
            self.advance(ControllerState::LadderMultiply);
        } else {
            self.begin(
                OperandSource::Power,
                OperandSource::Power,
                WriteTarget::Power,
            );
            self.advance(ControllerState::LadderSquare);
        }
    }

    /// Start a Montgomery product with the selected operands and route its
    /// eventual result to `target`.
    fn begin(&mut self, a: OperandSource, b: OperandSource, target: WriteTarget) {
        let a = self.resolve(a);
        let b = self.resolve(b);
        self.target = target;
        let started = self.multiplier.start(a, b);
        debug_assert!(started.is_ok(), "operands stay reduced inside a run");
    }

    /// Materialize an operand selection as a reduced value.
    fn resolve(&self, source: OperandSource) -> BigInt {
        match source {
            OperandSource::One => {
                let mut one = BigInt::one(self.modulus.len());
                // 1 is not reduced when N = 1.
                let reduce = !one.ct_lt(&self.modulus);
                one.conditional_sub_assign(&self.modulus, reduce);
                one
            }
            OperandSource::Message => self.message.clone(),
            OperandSource::Residue => self.residue.clone(),
            OperandSource::Accumulator => self.accumulator.clone(),
            OperandSource::Power => self.power.clone(),
        }
    }

    /// Copy a completed product into the selected destination and park the
    /// selector.
    fn route_product(&mut self) {
        if let Some(product) = self.multiplier.product() {
            match self.target {
                WriteTarget::Accumulator => self.accumulator = product.clone(),
                WriteTarget::Power => self.power = product.clone(),
                WriteTarget::Discard => {}
            }
        }
        self.target = WriteTarget::Discard;
    }

    fn advance(&mut self, next: ControllerState) {
        trace!(from = ?self.state, to = ?next, bit = self.bit, "stage transition");
        self.state = next;
    }
}

#[cfg(feature = "zeroize")]
impl<R: ResidueCalculator + zeroize::Zeroize> zeroize::Zeroize for ExponentiationController<R> {
    fn zeroize(&mut self) {
        self.multiplier.zeroize();
        self.residue_calc.zeroize();
        self.modulus.zeroize();
        self.exponent.zeroize();
        self.message.zeroize();
        self.residue.zeroize();
        self.accumulator.zeroize();
        self.power.zeroize();
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::{ControllerState, ExponentiationController};
    use crate::{BigInt, Error};

    fn run(modulus: u64, exponent: u64, message: u64, len: usize) -> BigInt {
        let mut ctrl = ExponentiationController::new();
        ctrl.start(
            BigInt::from_u64(modulus, len),
            BigInt::from_u64(exponent, len),
            BigInt::from_u64(message, len),
        )
        .unwrap();
        while !ctrl.is_ready() {
            ctrl.step();
        }
        ctrl.result().unwrap().clone()
    }

    #[test]
    fn small_exponentiation() {
        // 4³ mod 13 = 64 mod 13 = 12
        assert_eq!(run(13, 3, 4, 1).as_words(), &[12]);
    }

    #[test]
    fn zero_exponent_yields_one() {
        assert_eq!(run(13, 0, 4, 1).as_words(), &[1]);
    }

    #[test]
    fn high_bit_exponent() {
        // ord(2) mod 13 = 12 and 2^31 ≡ 8 (mod 12), so 2^(2^31) ≡ 2^8 ≡ 9.
        assert_eq!(run(13, 1 << 31, 2, 1).as_words(), &[9]);
    }

    #[test]
    fn trivial_modulus() {
        assert!(run(1, 5, 0, 1).is_zero());
    }

    #[test]
    fn stage_order() {
        let mut ctrl = ExponentiationController::new();
        ctrl.start(
            BigInt::from([13u32]),
            BigInt::from([3u32]),
            BigInt::from([4u32]),
        )
        .unwrap();

        let mut stages = vec![ctrl.state()];
        while ctrl.is_busy() {
            ctrl.step();
            if stages.last() != Some(&ctrl.state()) {
                stages.push(ctrl.state());
            }
        }

        // Bits 0 and 1 of e = 3 are set; the squares for the 30 clear bits
        // above them run back to back and collapse into the final
        // LadderSquare entry.
        use ControllerState::*;
        assert_eq!(
            stages,
            vec![
                ResidueSetup,
                IdentityInit,
                MessageInit,
                LadderMultiply,
                LadderSquare,
                LadderMultiply,
                LadderSquare,
                Normalize,
                Done,
                Idle,
            ]
        );
    }

    #[test]
    fn rejects_start_while_busy() {
        let mut ctrl = ExponentiationController::new();
        ctrl.start(
            BigInt::from([13u32]),
            BigInt::from([3u32]),
            BigInt::from([4u32]),
        )
        .unwrap();
        ctrl.step();

        assert_eq!(
            ctrl.start(
                BigInt::from([13u32]),
                BigInt::from([3u32]),
                BigInt::from([4u32])
            ),
            Err(Error::BusyRejected)
        );
    }

    #[test]
    fn validates_operands() {
        let mut ctrl = ExponentiationController::new();
        assert_eq!(
            ctrl.start(
                BigInt::from([12u32]),
                BigInt::one(1),
                BigInt::from([4u32])
            ),
            Err(Error::NonOddModulus)
        );
        assert_eq!(
            ctrl.start(
                BigInt::from([13u32]),
                BigInt::one(1),
                BigInt::from([13u32])
            ),
            Err(Error::OperandOutOfRange)
        );
        assert_eq!(
            ctrl.start(BigInt::from([13u32]), BigInt::one(2), BigInt::one(1)),
            Err(Error::InvalidLength { words: 2 })
        );
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut ctrl = ExponentiationController::new();
        ctrl.start(
            BigInt::from([13u32]),
            BigInt::from([3u32]),
            BigInt::from([4u32]),
        )
        .unwrap();
        for _ in 0..10 {
            ctrl.step();
        }

        ctrl.reset();
        assert!(!ctrl.is_busy());
        assert!(!ctrl.is_ready());
        assert_eq!(ctrl.result(), None);

        // reusable after reset
        ctrl.start(
            BigInt::from([13u32]),
            BigInt::from([3u32]),
            BigInt::from([4u32]),
        )
        .unwrap();
        while !ctrl.is_ready() {
            ctrl.step();
        }
        assert_eq!(ctrl.result().unwrap().as_words(), &[12]);
    }
}
