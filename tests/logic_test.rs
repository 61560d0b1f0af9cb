//! Tests for the bitwise instructions: AND, ORA, EOR and BIT.

use mos6502::{Cpu, FlatMemory, MemoryBus};

/// Helper to create a CPU with the reset vector pointing at 0x8000.
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = Cpu::new(memory);
    cpu.reset();
    cpu
}

#[test]
fn and_immediate_masks_accumulator() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x29);
    cpu.memory_mut().write(0x8001, 0x0F);

    cpu.set_a(0x5A);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x0A);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn and_zero_result_sets_z() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x29);
    cpu.memory_mut().write(0x8001, 0x0F);

    cpu.set_a(0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn and_zero_page_x() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x35);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0015, 0xF0);

    cpu.set_a(0xFF);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
}

#[test]
fn ora_merges_bits() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x09);
    cpu.memory_mut().write(0x8001, 0x0F);

    cpu.set_a(0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn ora_zero_stays_zero() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x09);
    cpu.memory_mut().write(0x8001, 0x00);

    cpu.set_a(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn eor_toggles_bits() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x49);
    cpu.memory_mut().write(0x8001, 0xFF);

    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
}

#[test]
fn eor_self_clears_accumulator() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x49);
    cpu.memory_mut().write(0x8001, 0x42);

    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn eor_absolute() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x4D);
    cpu.memory_mut().write(0x8001, 0x00);
    cpu.memory_mut().write(0x8002, 0x20);
    cpu.memory_mut().write(0x2000, 0xAA);

    cpu.set_a(0x55);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xFF);
    assert_eq!(cpu.pc(), 0x8003);
}

// ========== BIT ==========

#[test]
fn bit_copies_memory_bits_to_n_and_v() {
    let mut cpu = setup_cpu();

    // BIT $10 with M = 0xC0: N and V from bits 7/6 of memory
    cpu.memory_mut().write(0x8000, 0x24);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0010, 0xC0);

    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    // A & M == 0 even though N/V are set
    assert!(cpu.flag_z());
    // A itself untouched
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn bit_z_from_masked_result_only() {
    let mut cpu = setup_cpu();

    // M = 0x40: V set, N clear, and A & M != 0 so Z clear
    cpu.memory_mut().write(0x8000, 0x24);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0010, 0x40);

    cpu.set_a(0x40);

    cpu.step().unwrap();

    assert!(!cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_z());
}

#[test]
fn bit_absolute_clears_n_and_v_from_low_operand() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x2C);
    cpu.memory_mut().write(0x8001, 0x00);
    cpu.memory_mut().write(0x8002, 0x30);
    cpu.memory_mut().write(0x3000, 0x01);

    cpu.set_a(0xFF);
    cpu.set_flag_n(true);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8003);
}
