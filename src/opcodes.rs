//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that
//! serves as the single source of truth for all 6502 instruction decoding.
//!
//! The table covers:
//! - **151 documented instructions** - official NMOS 6502 opcodes
//! - **105 undefined opcodes** - marked with the `"???"` mnemonic
//!
//! The table is built from the canonical 6502 opcode matrix. Instruction
//! length is not stored separately: it follows from the addressing mode
//! (one opcode byte plus the mode's operand bytes).

use crate::addressing::AddressingMode;

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use mos6502::{AddressingMode, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.size_bytes(), 2);
/// assert_eq!(lda_imm.to_string(), "LDA #");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "STA"; "???" for undefined opcodes).
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,
}

impl OpcodeMetadata {
    /// Total instruction size in bytes: opcode plus operand bytes.
    pub fn size_bytes(&self) -> u16 {
        1 + self.addressing_mode.operand_bytes()
    }

    /// Whether this entry describes a documented instruction.
    pub fn is_legal(&self) -> bool {
        self.mnemonic != "???"
    }
}

impl std::fmt::Display for OpcodeMetadata {
    /// Renders the trace form of the instruction, e.g. `ADC abs,X` or `NOP`.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let notation = self.addressing_mode.notation();
        if notation.is_empty() {
            write!(f, "{}", self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, notation)
        }
    }
}

const fn op(mnemonic: &'static str, addressing_mode: AddressingMode) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
    }
}

/// Undefined opcode placeholder. Fetching one of these halts the CPU.
const ILL: OpcodeMetadata = op("???", AddressingMode::Implicit);

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// Index into the array with the opcode byte to retrieve its metadata.
/// Undefined entries carry the `"???"` mnemonic; the CPU refuses to execute
/// them rather than mimicking undocumented hardware behavior.
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = {
    use AddressingMode::*;

    [
        // 0x00 - 0x0F
        op("BRK", Implicit),    // 0x00
        op("ORA", IndirectX),   // 0x01
        ILL,                    // 0x02
        ILL,                    // 0x03
        ILL,                    // 0x04
        op("ORA", ZeroPage),    // 0x05
        op("ASL", ZeroPage),    // 0x06
        ILL,                    // 0x07
        op("PHP", Implicit),    // 0x08
        op("ORA", Immediate),   // 0x09
        op("ASL", Accumulator), // 0x0A
        ILL,                    // 0x0B
        ILL,                    // 0x0C
        op("ORA", Absolute),    // 0x0D
        op("ASL", Absolute),    // 0x0E
        ILL,                    // 0x0F
        // 0x10 - 0x1F
        op("BPL", Relative),    // 0x10
        op("ORA", IndirectY),   // 0x11
        ILL,                    // 0x12
        ILL,                    // 0x13
        ILL,                    // 0x14
        op("ORA", ZeroPageX),   // 0x15
        op("ASL", ZeroPageX),   // 0x16
        ILL,                    // 0x17
        op("CLC", Implicit),    // 0x18
        op("ORA", AbsoluteY),   // 0x19
        ILL,                    // 0x1A
        ILL,                    // 0x1B
        ILL,                    // 0x1C
        op("ORA", AbsoluteX),   // 0x1D
        op("ASL", AbsoluteX),   // 0x1E
        ILL,                    // 0x1F
        // 0x20 - 0x2F
        op("JSR", Absolute),    // 0x20
        op("AND", IndirectX),   // 0x21
        ILL,                    // 0x22
        ILL,                    // 0x23
        op("BIT", ZeroPage),    // 0x24
        op("AND", ZeroPage),    // 0x25
        op("ROL", ZeroPage),    // 0x26
        ILL,                    // 0x27
        op("PLP", Implicit),    // 0x28
        op("AND", Immediate),   // 0x29
        op("ROL", Accumulator), // 0x2A
        ILL,                    // 0x2B
        op("BIT", Absolute),    // 0x2C
        op("AND", Absolute),    // 0x2D
        op("ROL", Absolute),    // 0x2E
        ILL,                    // 0x2F
        // 0x30 - 0x3F
        op("BMI", Relative),    // 0x30
        op("AND", IndirectY),   // 0x31
        ILL,                    // 0x32
        ILL,                    // 0x33
        ILL,                    // 0x34
        op("AND", ZeroPageX),   // 0x35
        op("ROL", ZeroPageX),   // 0x36
        ILL,                    // 0x37
        op("SEC", Implicit),    // 0x38
        op("AND", AbsoluteY),   // 0x39
        ILL,                    // 0x3A
        ILL,                    // 0x3B
        ILL,                    // 0x3C
        op("AND", AbsoluteX),   // 0x3D
        op("ROL", AbsoluteX),   // 0x3E
        ILL,                    // 0x3F
        // 0x40 - 0x4F
        op("RTI", Implicit),    // 0x40
        op("EOR", IndirectX),   // 0x41
        ILL,                    // 0x42
        ILL,                    // 0x43
        ILL,                    // 0x44
        op("EOR", ZeroPage),    // 0x45
        op("LSR", ZeroPage),    // 0x46
        ILL,                    // 0x47
        op("PHA", Implicit),    // 0x48
        op("EOR", Immediate),   // 0x49
        op("LSR", Accumulator), // 0x4A
        ILL,                    // 0x4B
        op("JMP", Absolute),    // 0x4C
        op("EOR", Absolute),    // 0x4D
        op("LSR", Absolute),    // 0x4E
        ILL,                    // 0x4F
        // 0x50 - 0x5F
        op("BVC", Relative),    // 0x50
        op("EOR", IndirectY),   // 0x51
        ILL,                    // 0x52
        ILL,                    // 0x53
        ILL,                    // 0x54
        op("EOR", ZeroPageX),   // 0x55
        op("LSR", ZeroPageX),   // 0x56
        ILL,                    // 0x57
        op("CLI", Implicit),    // 0x58
        op("EOR", AbsoluteY),   // 0x59
        ILL,                    // 0x5A
        ILL,                    // 0x5B
        ILL,                    // 0x5C
        op("EOR", AbsoluteX),   // 0x5D
        op("LSR", AbsoluteX),   // 0x5E
        ILL,                    // 0x5F
        // 0x60 - 0x6F
        op("RTS", Implicit),    // 0x60
        op("ADC", IndirectX),   // 0x61
        ILL,                    // 0x62
        ILL,                    // 0x63
        ILL,                    // 0x64
        op("ADC", ZeroPage),    // 0x65
        op("ROR", ZeroPage),    // 0x66
        ILL,                    // 0x67
        op("PLA", Implicit),    // 0x68
        op("ADC", Immediate),   // 0x69
        op("ROR", Accumulator), // 0x6A
        ILL,                    // 0x6B
        op("JMP", Indirect),    // 0x6C
        op("ADC", Absolute),    // 0x6D
        op("ROR", Absolute),    // 0x6E
        ILL,                    // 0x6F
        // 0x70 - 0x7F
        op("BVS", Relative),    // 0x70
        op("ADC", IndirectY),   // 0x71
        ILL,                    // 0x72
        ILL,                    // 0x73
        ILL,                    // 0x74
        op("ADC", ZeroPageX),   // 0x75
        op("ROR", ZeroPageX),   // 0x76
        ILL,                    // 0x77
        op("SEI", Implicit),    // 0x78
        op("ADC", AbsoluteY),   // 0x79
        ILL,                    // 0x7A
        ILL,                    // 0x7B
        ILL,                    // 0x7C
        op("ADC", AbsoluteX),   // 0x7D
        op("ROR", AbsoluteX),   // 0x7E
        ILL,                    // 0x7F
        // 0x80 - 0x8F
        ILL,                    // 0x80
        op("STA", IndirectX),   // 0x81
        ILL,                    // 0x82
        ILL,                    // 0x83
        op("STY", ZeroPage),    // 0x84
        op("STA", ZeroPage),    // 0x85
        op("STX", ZeroPage),    // 0x86
        ILL,                    // 0x87
        op("DEY", Implicit),    // 0x88
        ILL,                    // 0x89
        op("TXA", Implicit),    // 0x8A
        ILL,                    // 0x8B
        op("STY", Absolute),    // 0x8C
        op("STA", Absolute),    // 0x8D
        op("STX", Absolute),    // 0x8E
        ILL,                    // 0x8F
        // 0x90 - 0x9F
        op("BCC", Relative),    // 0x90
        op("STA", IndirectY),   // 0x91
        ILL,                    // 0x92
        ILL,                    // 0x93
        op("STY", ZeroPageX),   // 0x94
        op("STA", ZeroPageX),   // 0x95
        op("STX", ZeroPageY),   // 0x96
        ILL,                    // 0x97
        op("TYA", Implicit),    // 0x98
        op("STA", AbsoluteY),   // 0x99
        op("TXS", Implicit),    // 0x9A
        ILL,                    // 0x9B
        ILL,                    // 0x9C
        op("STA", AbsoluteX),   // 0x9D
        ILL,                    // 0x9E
        ILL,                    // 0x9F
        // 0xA0 - 0xAF
        op("LDY", Immediate),   // 0xA0
        op("LDA", IndirectX),   // 0xA1
        op("LDX", Immediate),   // 0xA2
        ILL,                    // 0xA3
        op("LDY", ZeroPage),    // 0xA4
        op("LDA", ZeroPage),    // 0xA5
        op("LDX", ZeroPage),    // 0xA6
        ILL,                    // 0xA7
        op("TAY", Implicit),    // 0xA8
        op("LDA", Immediate),   // 0xA9
        op("TAX", Implicit),    // 0xAA
        ILL,                    // 0xAB
        op("LDY", Absolute),    // 0xAC
        op("LDA", Absolute),    // 0xAD
        op("LDX", Absolute),    // 0xAE
        ILL,                    // 0xAF
        // 0xB0 - 0xBF
        op("BCS", Relative),    // 0xB0
        op("LDA", IndirectY),   // 0xB1
        ILL,                    // 0xB2
        ILL,                    // 0xB3
        op("LDY", ZeroPageX),   // 0xB4
        op("LDA", ZeroPageX),   // 0xB5
        op("LDX", ZeroPageY),   // 0xB6
        ILL,                    // 0xB7
        op("CLV", Implicit),    // 0xB8
        op("LDA", AbsoluteY),   // 0xB9
        op("TSX", Implicit),    // 0xBA
        ILL,                    // 0xBB
        op("LDY", AbsoluteX),   // 0xBC
        op("LDA", AbsoluteX),   // 0xBD
        op("LDX", AbsoluteY),   // 0xBE
        ILL,                    // 0xBF
        // 0xC0 - 0xCF
        op("CPY", Immediate),   // 0xC0
        op("CMP", IndirectX),   // 0xC1
        ILL,                    // 0xC2
        ILL,                    // 0xC3
        op("CPY", ZeroPage),    // 0xC4
        op("CMP", ZeroPage),    // 0xC5
        op("DEC", ZeroPage),    // 0xC6
        ILL,                    // 0xC7
        op("INY", Implicit),    // 0xC8
        op("CMP", Immediate),   // 0xC9
        op("DEX", Implicit),    // 0xCA
        ILL,                    // 0xCB
        op("CPY", Absolute),    // 0xCC
        op("CMP", Absolute),    // 0xCD
        op("DEC", Absolute),    // 0xCE
        ILL,                    // 0xCF
        // 0xD0 - 0xDF
        op("BNE", Relative),    // 0xD0
        op("CMP", IndirectY),   // 0xD1
        ILL,                    // 0xD2
        ILL,                    // 0xD3
        ILL,                    // 0xD4
        op("CMP", ZeroPageX),   // 0xD5
        op("DEC", ZeroPageX),   // 0xD6
        ILL,                    // 0xD7
        op("CLD", Implicit),    // 0xD8
        op("CMP", AbsoluteY),   // 0xD9
        ILL,                    // 0xDA
        ILL,                    // 0xDB
        ILL,                    // 0xDC
        op("CMP", AbsoluteX),   // 0xDD
        op("DEC", AbsoluteX),   // 0xDE
        ILL,                    // 0xDF
        // 0xE0 - 0xEF
        op("CPX", Immediate),   // 0xE0
        op("SBC", IndirectX),   // 0xE1
        ILL,                    // 0xE2
        ILL,                    // 0xE3
        op("CPX", ZeroPage),    // 0xE4
        op("SBC", ZeroPage),    // 0xE5
        op("INC", ZeroPage),    // 0xE6
        ILL,                    // 0xE7
        op("INX", Implicit),    // 0xE8
        op("SBC", Immediate),   // 0xE9
        op("NOP", Implicit),    // 0xEA
        ILL,                    // 0xEB
        op("CPX", Absolute),    // 0xEC
        op("SBC", Absolute),    // 0xED
        op("INC", Absolute),    // 0xEE
        ILL,                    // 0xEF
        // 0xF0 - 0xFF
        op("BEQ", Relative),    // 0xF0
        op("SBC", IndirectY),   // 0xF1
        ILL,                    // 0xF2
        ILL,                    // 0xF3
        ILL,                    // 0xF4
        op("SBC", ZeroPageX),   // 0xF5
        op("INC", ZeroPageX),   // 0xF6
        ILL,                    // 0xF7
        op("SED", Implicit),    // 0xF8
        op("SBC", AbsoluteY),   // 0xF9
        ILL,                    // 0xFA
        ILL,                    // 0xFB
        ILL,                    // 0xFC
        op("SBC", AbsoluteX),   // 0xFD
        op("INC", AbsoluteX),   // 0xFE
        ILL,                    // 0xFF
    ]
};
