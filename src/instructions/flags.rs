//! # Status Flag Instructions
//!
//! Direct flag set/clear operations: CLC, SEC, CLI, SEI, CLD, SED, CLV.
//! All are single-byte implied-mode instructions touching exactly one
//! flag. There is no SEV; overflow can only be set by arithmetic (or BIT).

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

fn advance<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes CLC (Clear Carry Flag).
pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_c = false;
    advance(cpu, opcode);
}

/// Executes SEC (Set Carry Flag).
pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_c = true;
    advance(cpu, opcode);
}

/// Executes CLI (Clear Interrupt Disable).
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_i = false;
    advance(cpu, opcode);
}

/// Executes SEI (Set Interrupt Disable).
pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_i = true;
    advance(cpu, opcode);
}

/// Executes CLD (Clear Decimal Mode).
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_d = false;
    advance(cpu, opcode);
}

/// Executes SED (Set Decimal Mode).
pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_d = true;
    advance(cpu, opcode);
}

/// Executes CLV (Clear Overflow Flag).
pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_v = false;
    advance(cpu, opcode);
}
