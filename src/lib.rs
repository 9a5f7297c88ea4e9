//! Pure Rust model of a word-addressable modular exponentiation engine.
//!
//! # About
//! This crate computes `C = M^e mod N` for operands from 32 up to 8192 bits
//! (in 32-bit steps) the way a hardware accelerator does: two cooperating
//! control automatons, a word-serial Montgomery multiplier and a
//! square-and-multiply ladder controller, advance one state per tick over
//! shared word-addressed operand banks. The engine is exposed twice:
//!
//! - [`ModExpCore`], the programmatic interface: load operands as word
//!   slices, start, tick (or run to completion), read the result.
//! - [`registers::RegisterInterface`], the bus-facing front end: a flat
//!   16-bit word-address space with identification, control, status and
//!   length registers alongside the operand banks, as a driver sees it.
//!
//! Operand words use big-endian word order throughout: offset 0 of a bank
//! holds the most significant word.
//!
//! # Example
//! ```
//! use modexp_core::{BigInt, ModExpCore};
//!
//! let mut core = ModExpCore::new();
//! let c = core.exponentiate(
//!     &BigInt::from([4u32]),
//!     &BigInt::from([3u32]),
//!     &BigInt::from([13u32]),
//! )?;
//! assert_eq!(c.as_words(), &[12]); // 4³ mod 13
//! # Ok::<(), modexp_core::Error>(())
//! ```
//!
//! # Design notes
//! - Montgomery products are computed word-serially (one operand word per
//!   loop pass) rather than bit-serially, which changes the cost per state
//!   but not the visible state sequence or any result.
//! - Both automatons follow a hold-unless-enabled discipline: state changes
//!   happen only inside [`step`][ModExpCore::step] calls, never as a side
//!   effect of loads or reads.
//! - Precondition violations (zero or oversized length, even modulus,
//!   unreduced message, access while busy) surface as [`Error`] values
//!   before any state changes, rather than as silently wrong results.
//! - Montgomery residue setup is pluggable through the
//!   [`ResidueCalculator`] capability; [`DoublingResidue`] is the stock
//!   implementation.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod bigint;
mod controller;
mod engine;
mod error;
mod multiplier;
mod residue;
mod store;
mod word;

pub mod registers;

pub use crate::{
    bigint::BigInt,
    controller::{ControllerState, ExponentiationController},
    engine::{MAX_OPERAND_WORDS, ModExpCore},
    error::{Error, Result},
    multiplier::{MontgomeryMultiplier, MultiplierState},
    registers::RegisterInterface,
    residue::{DoublingResidue, ResidueCalculator},
    word::Word,
};
pub use subtle;
