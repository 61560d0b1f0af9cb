//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: unconditional jump, absolute or indirect
//! - JSR/RTS: subroutine call and return
//! - BRK/RTI: software interrupt and return
//! - NOP: no operation

use crate::addressing::AddressingMode;
use crate::{Cpu, MemoryBus, OPCODE_TABLE};
use crate::cpu::IRQ_VECTOR;

/// Executes the JMP (Jump) instruction.
///
/// Sets PC to the effective address. The indirect form reproduces the
/// NMOS page-boundary quirk: a pointer ending in 0xFF takes its high
/// byte from the start of the same page.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    cpu.pc = cpu.effective_address(metadata.addressing_mode);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes `PC + 2` - the address of the last byte of the JSR instruction
/// - high byte first, then jumps to the absolute target. RTS compensates
/// with its +1.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut Cpu<M>, _opcode: u8) {
    let target = cpu.effective_address(AddressingMode::Absolute);
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_pc(return_address);
    cpu.pc = target;
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address low byte first and resumes at that address
/// plus one.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut Cpu<M>, _opcode: u8) {
    let return_address = cpu.pull_pc();
    cpu.pc = return_address.wrapping_add(1);
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Pushes `PC + 2` (BRK occupies one byte but leaves a padding byte),
/// pushes the status with B and bit 5 set, sets I and vectors through
/// the IRQ/BRK vector at 0xFFFE/0xFFFF.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut Cpu<M>, _opcode: u8) {
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_pc(return_address);

    let status = cpu.status_for_break();
    cpu.push_u8(status);

    cpu.flag_i = true;
    cpu.pc = cpu.read_word(IRQ_VECTOR);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register, then the interrupted PC. Unlike RTS there
/// is no +1: interrupts push the exact resume address.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut Cpu<M>, _opcode: u8) {
    let status = cpu.pull_u8();
    cpu.set_status_from_pull(status);
    cpu.pc = cpu.pull_pc();
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}
