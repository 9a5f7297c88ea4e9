//! Driver-style tests exercising the engine through its register map.

mod common;

use common::to_biguint;
use modexp_core::{
    BigInt, Error, Word,
    registers::{
        ADDR_CONTROL, ADDR_EXPONENT, ADDR_ID, ADDR_LENGTH, ADDR_MESSAGE, ADDR_MODULUS,
        ADDR_RESULT, ADDR_STATUS, CONTROL_RESET, CONTROL_START, CORE_ID, RegisterInterface,
        STATUS_BUSY, STATUS_READY,
    },
};

/// Load a bank word by word, most significant first.
fn load_bank(bus: &mut RegisterInterface, base: u16, words: &[Word]) {
    for (offset, word) in words.iter().enumerate() {
        bus.write(base + offset as u16, *word).unwrap();
    }
}

/// Poll until the busy bit drops.
fn wait_ready(bus: &mut RegisterInterface) {
    while bus.read(ADDR_STATUS).unwrap() & STATUS_BUSY != 0 {
        bus.tick();
    }
}

/// Read a full result value back, most significant word first.
fn read_result(bus: &RegisterInterface, len: usize) -> BigInt {
    let words: Vec<Word> = (0..len)
        .map(|offset| bus.read(ADDR_RESULT + offset as u16).unwrap())
        .collect();
    BigInt::from(words)
}

#[test]
fn driver_flow_two_words() {
    let mut bus = RegisterInterface::new();
    assert_eq!(bus.read(ADDR_ID).unwrap(), CORE_ID);

    bus.write(ADDR_LENGTH, 2).unwrap();
    let n = [0x0000_0001, 0x0000_0005]; // 2^32 + 5
    let e = [0x0000_0000, 0x0001_0001]; // 65537
    let m = [0x0000_0000, 0xDEAD_BEEF];
    load_bank(&mut bus, ADDR_MODULUS, &n);
    load_bank(&mut bus, ADDR_EXPONENT, &e);
    load_bank(&mut bus, ADDR_MESSAGE, &m);

    bus.write(ADDR_CONTROL, CONTROL_START).unwrap();
    wait_ready(&mut bus);
    assert_eq!(bus.read(ADDR_STATUS).unwrap(), STATUS_READY);

    let expected = to_biguint(&BigInt::from(m))
        .modpow(&to_biguint(&BigInt::from(e)), &to_biguint(&BigInt::from(n)));
    assert_eq!(to_biguint(&read_result(&bus, 2)), expected);
}

#[test]
fn banks_persist_across_runs() {
    let mut bus = RegisterInterface::new();
    bus.write(ADDR_MODULUS, 187).unwrap();
    bus.write(ADDR_EXPONENT, 7).unwrap();
    bus.write(ADDR_MESSAGE, 88).unwrap();

    bus.write(ADDR_CONTROL, CONTROL_START).unwrap();
    wait_ready(&mut bus);
    assert_eq!(bus.read(ADDR_RESULT).unwrap(), 11);

    // the operand banks still hold the inputs and can be rerun unchanged
    assert_eq!(bus.read(ADDR_MODULUS).unwrap(), 187);
    assert_eq!(bus.read(ADDR_EXPONENT).unwrap(), 7);
    assert_eq!(bus.read(ADDR_MESSAGE).unwrap(), 88);

    bus.write(ADDR_CONTROL, CONTROL_START).unwrap();
    wait_ready(&mut bus);
    assert_eq!(bus.read(ADDR_RESULT).unwrap(), 11);
}

#[test]
fn length_change_clears_banks() {
    let mut bus = RegisterInterface::new();
    bus.write(ADDR_MODULUS, 187).unwrap();

    bus.write(ADDR_LENGTH, 3).unwrap();
    for offset in 0..3 {
        assert_eq!(bus.read(ADDR_MODULUS + offset).unwrap(), 0);
    }
    assert_eq!(
        bus.read(ADDR_MODULUS + 3),
        Err(Error::UnmappedAddress { address: 0x0103 })
    );
}

#[test]
fn start_with_invalid_operands_fails_over_the_bus() {
    let mut bus = RegisterInterface::new();
    bus.write(ADDR_MODULUS, 14).unwrap(); // even
    bus.write(ADDR_EXPONENT, 3).unwrap();
    bus.write(ADDR_MESSAGE, 4).unwrap();
    assert_eq!(
        bus.write(ADDR_CONTROL, CONTROL_START),
        Err(Error::NonOddModulus)
    );
    assert_eq!(bus.read(ADDR_STATUS).unwrap(), 0);
}

#[test]
fn mid_run_abort_and_restart() {
    let mut bus = RegisterInterface::new();
    bus.write(ADDR_MODULUS, 13).unwrap();
    bus.write(ADDR_EXPONENT, 3).unwrap();
    bus.write(ADDR_MESSAGE, 4).unwrap();

    bus.write(ADDR_CONTROL, CONTROL_START).unwrap();
    for _ in 0..10 {
        bus.tick();
    }
    assert_eq!(bus.read(ADDR_MESSAGE), Err(Error::BusyRejected));

    bus.write(ADDR_CONTROL, CONTROL_RESET).unwrap();
    assert_eq!(bus.read(ADDR_STATUS).unwrap(), 0);
    assert_eq!(bus.read(ADDR_RESULT).unwrap(), 0);

    bus.write(ADDR_CONTROL, CONTROL_START).unwrap();
    wait_ready(&mut bus);
    assert_eq!(bus.read(ADDR_RESULT).unwrap(), 12);
}

#[test]
fn ticks_while_idle_are_harmless() {
    let mut bus = RegisterInterface::new();
    for _ in 0..100 {
        bus.tick();
    }
    assert_eq!(bus.read(ADDR_STATUS).unwrap(), 0);

    bus.write(ADDR_MODULUS, 13).unwrap();
    bus.write(ADDR_EXPONENT, 3).unwrap();
    bus.write(ADDR_MESSAGE, 4).unwrap();
    bus.write(ADDR_CONTROL, CONTROL_START).unwrap();
    wait_ready(&mut bus);
    assert_eq!(bus.read(ADDR_RESULT).unwrap(), 12);
}
