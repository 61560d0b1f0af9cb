//! # Stack Instructions
//!
//! This module implements the stack push/pull operations:
//! - PHA/PLA: push and pull the accumulator (PLA updates N and Z)
//! - PHP/PLP: push and pull the status register
//!
//! PHP pushes the status with the B bit and bit 5 set, the same image a
//! BRK pushes. PLP loads the arithmetic flags from the pulled byte and
//! ignores its B bit, so PHP followed by PLP restores every observable
//! flag.

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

fn advance<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let value = cpu.a;
    cpu.push_u8(value);
    advance(cpu, opcode);
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let value = cpu.pull_u8();
    cpu.a = value;
    cpu.set_nz(value);
    advance(cpu, opcode);
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let status = cpu.status_for_break();
    cpu.push_u8(status);
    advance(cpu, opcode);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Unlike PLA this sets no N/Z from a "result"; the flags simply become
/// what the pulled byte says.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let status = cpu.pull_u8();
    cpu.set_status_from_pull(status);
    advance(cpu, opcode);
}
