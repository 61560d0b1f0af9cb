//! # Addressing Modes
//!
//! This module defines the addressing modes supported by the 6502 processor.
//! Each mode determines how the CPU interprets operand bytes and calculates
//! effective addresses.

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation. It also fixes the instruction length: one opcode byte
/// plus [`operand_bytes`](AddressingMode::operand_bytes) operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by the instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in the instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into the accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by the X register.
    ///
    /// Example: LDA $80,X (load from 0x0080 + X, wraps within zero page)
    ZeroPageX,

    /// Zero page address indexed by the Y register.
    ///
    /// Example: LDX $80,Y (load from 0x0080 + Y, wraps within zero page)
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// The branch target is the address of the next instruction (PC + 2)
    /// plus the signed displacement.
    Relative,

    /// Full 16-bit address, little-endian in the instruction stream.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by the X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by the Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer. Only used by JMP.
    ///
    /// Reproduces the NMOS page-boundary quirk: the pointer's high byte is
    /// fetched from within the same page when the pointer ends in 0xFF.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X) - add X to 0x40 within zero page, read a 16-bit
    /// address from there, load from that address.
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y - read a 16-bit base address from zero page
    /// 0x40, add Y, load from the result.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode for this mode.
    pub fn operand_bytes(&self) -> u16 {
        use AddressingMode::*;

        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    /// Conventional assembly notation for the mode, used by the trace output.
    ///
    /// Implicit mode renders as an empty string so a traced NOP is just
    /// `NOP`, while an absolute-indexed ADC renders as `ADC abs,X`.
    pub fn notation(&self) -> &'static str {
        use AddressingMode::*;

        match self {
            Implicit => "",
            Accumulator => "A",
            Immediate => "#",
            ZeroPage => "zpg",
            ZeroPageX => "zpg,X",
            ZeroPageY => "zpg,Y",
            Relative => "rel",
            Absolute => "abs",
            AbsoluteX => "abs,X",
            AbsoluteY => "abs,Y",
            Indirect => "ind",
            IndirectX => "(zpg,X)",
            IndirectY => "(zpg),Y",
        }
    }
}
