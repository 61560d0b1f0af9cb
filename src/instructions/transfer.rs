//! # Register Transfer Instructions
//!
//! This module implements register-to-register moves:
//! - TAX/TAY/TXA/TYA: between the accumulator and the index registers
//! - TSX/TXS: between the stack pointer and X
//!
//! Every transfer updates N and Z from the moved value except TXS, which
//! touches no flags (the stack pointer is not an ALU destination).

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

fn advance<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.x = cpu.a;
    let result = cpu.x;
    cpu.set_nz(result);
    advance(cpu, opcode);
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.y = cpu.a;
    let result = cpu.y;
    cpu.set_nz(result);
    advance(cpu, opcode);
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.a = cpu.x;
    let result = cpu.a;
    cpu.set_nz(result);
    advance(cpu, opcode);
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.a = cpu.y;
    let result = cpu.a;
    cpu.set_nz(result);
    advance(cpu, opcode);
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.x = cpu.sp;
    let result = cpu.x;
    cpu.set_nz(result);
    advance(cpu, opcode);
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// The only transfer that updates no flags.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.sp = cpu.x;
    advance(cpu, opcode);
}
