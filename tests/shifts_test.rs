//! Tests for the shift and rotate instructions: ASL, LSR, ROL, ROR.

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

// ========== ASL ==========

#[test]
fn asl_accumulator_shifts_into_carry() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x0A);

    cpu.set_a(0x81);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c()); // old bit 7
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn asl_memory_sets_n_from_result_bit7() {
    let mut cpu = setup_cpu();

    // ASL $10 with M = 0x40 -> 0x80: N set, C clear
    cpu.memory_mut().write(0x8000, 0x06);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0010, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.memory_mut().read(0x0010), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn asl_zero_result() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x0A);

    cpu.set_a(0x80);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

// ========== LSR ==========

#[test]
fn lsr_accumulator_shifts_into_carry() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x4A);

    cpu.set_a(0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c()); // old bit 0
    assert!(!cpu.flag_n());
}

#[test]
fn lsr_always_clears_n() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x4A);

    cpu.set_a(0xFF);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x7F);
    assert!(!cpu.flag_n());
    assert!(cpu.flag_c());
}

#[test]
fn lsr_memory_absolute() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x4E);
    cpu.memory_mut().write(0x8001, 0x00);
    cpu.memory_mut().write(0x8002, 0x20);
    cpu.memory_mut().write(0x2000, 0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.memory_mut().read(0x2000), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

// ========== ROL / ROR ==========

#[test]
fn rol_pulls_carry_into_bit0() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x2A);

    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c()); // old bit 7
}

#[test]
fn rol_memory_zero_page() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x26);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0010, 0x41);

    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.memory_mut().read(0x0010), 0x82);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn ror_pulls_carry_into_bit7() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x6A);

    cpu.set_a(0x01);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_c()); // old bit 0
    assert!(cpu.flag_n());
}

#[test]
fn ror_without_carry() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x6A);

    cpu.set_a(0x02);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_n());
}

// ========== Round Trips ==========

#[test]
fn rol_then_ror_restores_value_and_carry() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x2A); // ROL A
    cpu.memory_mut().write(0x8001, 0x6A); // ROR A

    cpu.set_a(0xB7);
    cpu.set_flag_c(true);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xB7);
    assert!(cpu.flag_c());
}

#[test]
fn asl_then_lsr_restores_byte_without_bit7() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x0A); // ASL A
    cpu.memory_mut().write(0x8001, 0x4A); // LSR A

    cpu.set_a(0x35); // bit 7 clear

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x35);
    assert!(!cpu.flag_c());
}
