//! # Increment and Decrement Instructions
//!
//! This module implements INC/DEC on memory and INX/INY/DEX/DEY on the
//! index registers. All six wrap modulo 256 and update N and Z from the
//! result; the carry flag is never involved.

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

/// Executes the INC (Increment Memory) instruction.
///
/// Read-modify-write: the old value is read, incremented, and written
/// back to the same effective address.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let addr = cpu.effective_address(metadata.addressing_mode);

    let result = cpu.memory.read(addr).wrapping_add(1);
    cpu.memory.write(addr, result);
    cpu.set_nz(result);

    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let addr = cpu.effective_address(metadata.addressing_mode);

    let result = cpu.memory.read(addr).wrapping_sub(1);
    cpu.memory.write(addr, result);
    cpu.set_nz(result);

    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.x = cpu.x.wrapping_add(1);
    let result = cpu.x;
    cpu.set_nz(result);

    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.y = cpu.y.wrapping_add(1);
    let result = cpu.y;
    cpu.set_nz(result);

    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.x = cpu.x.wrapping_sub(1);
    let result = cpu.x;
    cpu.set_nz(result);

    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.y = cpu.y.wrapping_sub(1);
    let result = cpu.y;
    cpu.set_nz(result);

    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes());
}
