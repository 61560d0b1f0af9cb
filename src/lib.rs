//! # MOS 6502 CPU Emulator
//!
//! An instruction-level emulator for the NMOS 6502: an 8-bit little-endian
//! processor with a 16-bit address space, a page-1 stack, twelve addressing
//! modes and 151 documented opcodes.
//!
//! This crate provides the CPU state machine, a trait-based memory bus
//! abstraction, a table-driven opcode decoder and a memory-mapped peripheral
//! layer. Execution is instruction-by-instruction; the core does not model
//! per-cycle bus activity.
//!
//! ## Quick Start
//!
//! ```rust
//! use mos6502::{Cpu, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // Program: LDA #$05; ADC #$03
//! memory.load(0x8000, &[0xA9, 0x05, 0x69, 0x03]);
//!
//! // Reset vector -> 0x8000
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//!
//! let mut cpu = Cpu::new(memory);
//! cpu.reset();
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//! assert_eq!(cpu.a(), 0x08);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus`
//!   trait; peripherals plug into an [`AddressSpace`] without the CPU ever
//!   knowing about them.
//! - **Table-driven decode**: all opcode metadata lives in [`OPCODE_TABLE`],
//!   the single source of truth for mnemonic, addressing mode and length.
//! - **Deterministic halts**: an unknown opcode, an external stop signal or
//!   a peripheral fault end the run cleanly between instructions, never in
//!   the middle of one.
//!
//! ## Modules
//!
//! - `cpu` - CPU state, execution and interrupt sequencing
//! - `memory` - `MemoryBus` trait and the flat 64 KiB implementation
//! - `peripherals` - peripheral contract and the window-routing address space
//! - `opcodes` - opcode metadata table
//! - `addressing` - addressing mode enumeration

pub mod addressing;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod peripherals;

// Internal instruction implementations (not part of the public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{Cpu, Halt, InterruptLines};
pub use memory::{BusFault, FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};
pub use peripherals::{AddressSpace, Peripheral, PeripheralError};

/// Errors that can occur during CPU execution.
///
/// Every variant is fatal to the run: the CPU halts before the next fetch
/// and the host decides what to do with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The byte at PC has no defined opcode mapping.
    ///
    /// PC is left pointing at the offending byte; no memory was mutated.
    UnknownOpcode {
        /// The undefined opcode byte.
        opcode: u8,
        /// Address the byte was fetched from.
        pc: u16,
    },

    /// A peripheral reported an error while servicing a read or write.
    PeripheralFault {
        /// Name the peripheral registered under.
        peripheral: String,
        /// The peripheral's own description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UnknownOpcode { opcode, pc } => {
                write!(f, "Unknown opcode 0x{:02X} at 0x{:04X}", opcode, pc)
            }
            ExecutionError::PeripheralFault { peripheral, message } => {
                write!(f, "Peripheral '{}' fault: {}", peripheral, message)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
