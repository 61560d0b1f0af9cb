//! # CPU State and Execution
//!
//! This module contains the [`Cpu`] struct representing the 6502 processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the next instruction
//! - **Stack pointer** (SP): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Instruction register** (IR): the last fetched opcode, for tracing
//! - **Status flags**: N, V, B, D, I, Z, C as individual bool fields,
//!   packed into a byte only when pushed or observed
//! - **Interrupt lines**: pending IRQ/NMI booleans shared with external
//!   agents through an [`InterruptLines`] handle
//!
//! ## Execution Model
//!
//! - [`Cpu::step`] samples the interrupt lines, then fetches and executes
//!   one instruction (or vectors through an interrupt instead).
//! - [`Cpu::run`] steps until the stop signal is raised, an unknown opcode
//!   is fetched or a peripheral faults, and reports the reason as a
//!   [`Halt`].
//!
//! Execution is instruction-level: there is no cycle accounting, and a
//! step either completes in full or halts the machine before the next
//! fetch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{AddressingMode, ExecutionError, MemoryBus, OPCODE_TABLE};

/// NMI vector location (little-endian target at 0xFFFA/0xFFFB).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector location (little-endian target at 0xFFFC/0xFFFD).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector location (little-endian target at 0xFFFE/0xFFFF).
pub const IRQ_VECTOR: u16 = 0xFFFE;

// Packed status register bit masks (NV-BDIZC).
const FLAG_N: u8 = 0x80;
const FLAG_V: u8 = 0x40;
const FLAG_UNUSED: u8 = 0x20;
const FLAG_B: u8 = 0x10;
const FLAG_D: u8 = 0x08;
const FLAG_I: u8 = 0x04;
const FLAG_Z: u8 = 0x02;
const FLAG_C: u8 = 0x01;

/// Pending interrupt lines, shared between the CPU and external agents.
///
/// Peripheral models or host threads hold an `Arc<InterruptLines>` (from
/// [`Cpu::interrupt_lines`]) and raise lines on it; the CPU samples the
/// lines once per step, between instructions.
///
/// The NMI line is edge-like: the core clears it when it services the
/// interrupt. The IRQ line is level-sensitive: it stays raised until the
/// external agent clears it, so a handler that returns without
/// acknowledging its device will be re-entered.
pub struct InterruptLines {
    irq: AtomicBool,
    nmi: AtomicBool,
}

impl InterruptLines {
    fn new() -> Self {
        Self {
            irq: AtomicBool::new(false),
            nmi: AtomicBool::new(false),
        }
    }

    /// Raises the maskable interrupt request line.
    pub fn raise_irq(&self) {
        self.irq.store(true, Ordering::SeqCst);
    }

    /// Lowers the IRQ line (the acknowledging agent's job).
    pub fn clear_irq(&self) {
        self.irq.store(false, Ordering::SeqCst);
    }

    /// Current state of the IRQ line.
    pub fn irq_raised(&self) -> bool {
        self.irq.load(Ordering::SeqCst)
    }

    /// Raises the non-maskable interrupt line.
    pub fn raise_nmi(&self) {
        self.nmi.store(true, Ordering::SeqCst);
    }

    /// Current state of the NMI line.
    pub fn nmi_raised(&self) -> bool {
        self.nmi.load(Ordering::SeqCst)
    }

    /// Consumes a pending NMI, clearing the line.
    fn take_nmi(&self) -> bool {
        self.nmi.swap(false, Ordering::SeqCst)
    }
}

/// Why a [`Cpu::run`] call came to rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The external stop signal was raised. This is the clean exit.
    Stopped,

    /// The byte at PC has no defined opcode mapping.
    UnknownOpcode {
        /// The undefined opcode byte.
        opcode: u8,
        /// Address the byte was fetched from.
        pc: u16,
    },

    /// A peripheral reported an error while servicing an access.
    PeripheralFault {
        /// Name the peripheral registered under.
        peripheral: String,
        /// The peripheral's description of the failure.
        message: String,
    },
}

impl From<ExecutionError> for Halt {
    fn from(error: ExecutionError) -> Self {
        match error {
            ExecutionError::UnknownOpcode { opcode, pc } => Halt::UnknownOpcode { opcode, pc },
            ExecutionError::PeripheralFault { peripheral, message } => {
                Halt::PeripheralFault { peripheral, message }
            }
        }
    }
}

impl std::fmt::Display for Halt {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Halt::Stopped => write!(f, "stopped by host"),
            Halt::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode 0x{:02X} at 0x{:04X}", opcode, pc)
            }
            Halt::PeripheralFault { peripheral, message } => {
                write!(f, "peripheral '{}' fault: {}", peripheral, message)
            }
        }
    }
}

/// 6502 CPU state and execution context.
///
/// The struct contains all processor state and owns its memory bus; it is
/// generic over the bus implementation via the [`MemoryBus`] trait, so the
/// same core drives a bare [`crate::FlatMemory`] or a peripheral-routing
/// [`crate::AddressSpace`].
///
/// # Examples
///
/// ```
/// use mos6502::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80); // reset vector -> 0x8000
///
/// let mut cpu = Cpu::new(memory);
/// cpu.reset();
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
/// ```
pub struct Cpu<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of the next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 | sp is the physical stack address)
    pub(crate) sp: u8,

    /// Instruction register: the last fetched opcode
    pub(crate) ir: u8,

    /// Negative flag (bit 7 of the last result)
    pub(crate) flag_n: bool,

    /// Overflow flag (signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (meaningful only in pushed status copies)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (BCD arithmetic in ADC/SBC)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (last result was zero)
    pub(crate) flag_z: bool,

    /// Carry flag
    pub(crate) flag_c: bool,

    /// Pending interrupt lines, shared with external agents
    lines: Arc<InterruptLines>,

    /// External stop signal, checked once per run-loop iteration
    stop: Arc<AtomicBool>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// All registers and flags start zeroed; call [`reset`](Cpu::reset) to
    /// perform the hardware reset sequence before executing.
    pub fn new(memory: M) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0x00,
            ir: 0x00,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            lines: Arc::new(InterruptLines::new()),
            stop: Arc::new(AtomicBool::new(false)),
            memory,
        }
    }

    /// Performs the power-on/reset sequence.
    ///
    /// Loads PC from the reset vector at 0xFFFC/0xFFFD (little-endian),
    /// sets SP to 0xFD and the status register to 0x24 (interrupt disable
    /// set, every other flag clear).
    pub fn reset(&mut self) {
        self.pc = self.read_word(RESET_VECTOR);
        self.sp = 0xFD;
        self.flag_n = false;
        self.flag_v = false;
        self.flag_b = false;
        self.flag_d = false;
        self.flag_i = true;
        self.flag_z = false;
        self.flag_c = false;
    }

    /// Executes one step: services a pending interrupt, or fetches,
    /// decodes and executes one instruction.
    ///
    /// The interrupt lines are sampled only here, between instructions.
    /// NMI takes priority over IRQ; IRQ is honored only while the I flag
    /// is clear. A serviced interrupt consumes the whole step - the first
    /// handler instruction executes on the next call.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::UnknownOpcode`] when the byte at PC has no
    ///   defined mapping. PC is left at the fetch address and no memory
    ///   was touched.
    /// - [`ExecutionError::PeripheralFault`] when a peripheral reported
    ///   an error during the instruction. The instruction itself ran to
    ///   completion first.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.lines.take_nmi() {
            self.service_interrupt(NMI_VECTOR);
            return self.collect_fault();
        }
        if self.lines.irq_raised() && !self.flag_i {
            self.service_interrupt(IRQ_VECTOR);
            return self.collect_fault();
        }

        // Fetch
        let opcode = self.memory.read(self.pc);
        self.ir = opcode;

        // Decode
        let metadata = &OPCODE_TABLE[opcode as usize];
        if !metadata.is_legal() {
            return Err(ExecutionError::UnknownOpcode {
                opcode,
                pc: self.pc,
            });
        }

        // Execute
        use crate::instructions::{
            alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
        };

        match metadata.mnemonic {
            "ADC" => alu::execute_adc(self, opcode),
            "AND" => alu::execute_and(self, opcode),
            "ASL" => shifts::execute_asl(self, opcode),
            "BCC" => branches::execute_bcc(self, opcode),
            "BCS" => branches::execute_bcs(self, opcode),
            "BEQ" => branches::execute_beq(self, opcode),
            "BIT" => alu::execute_bit(self, opcode),
            "BMI" => branches::execute_bmi(self, opcode),
            "BNE" => branches::execute_bne(self, opcode),
            "BPL" => branches::execute_bpl(self, opcode),
            "BRK" => control::execute_brk(self, opcode),
            "BVC" => branches::execute_bvc(self, opcode),
            "BVS" => branches::execute_bvs(self, opcode),
            "CLC" => flags::execute_clc(self, opcode),
            "CLD" => flags::execute_cld(self, opcode),
            "CLI" => flags::execute_cli(self, opcode),
            "CLV" => flags::execute_clv(self, opcode),
            "CMP" => alu::execute_cmp(self, opcode),
            "CPX" => alu::execute_cpx(self, opcode),
            "CPY" => alu::execute_cpy(self, opcode),
            "DEC" => inc_dec::execute_dec(self, opcode),
            "DEX" => inc_dec::execute_dex(self, opcode),
            "DEY" => inc_dec::execute_dey(self, opcode),
            "EOR" => alu::execute_eor(self, opcode),
            "INC" => inc_dec::execute_inc(self, opcode),
            "INX" => inc_dec::execute_inx(self, opcode),
            "INY" => inc_dec::execute_iny(self, opcode),
            "JMP" => control::execute_jmp(self, opcode),
            "JSR" => control::execute_jsr(self, opcode),
            "LDA" => load_store::execute_lda(self, opcode),
            "LDX" => load_store::execute_ldx(self, opcode),
            "LDY" => load_store::execute_ldy(self, opcode),
            "LSR" => shifts::execute_lsr(self, opcode),
            "NOP" => control::execute_nop(self, opcode),
            "ORA" => alu::execute_ora(self, opcode),
            "PHA" => stack::execute_pha(self, opcode),
            "PHP" => stack::execute_php(self, opcode),
            "PLA" => stack::execute_pla(self, opcode),
            "PLP" => stack::execute_plp(self, opcode),
            "ROL" => shifts::execute_rol(self, opcode),
            "ROR" => shifts::execute_ror(self, opcode),
            "RTI" => control::execute_rti(self, opcode),
            "RTS" => control::execute_rts(self, opcode),
            "SBC" => alu::execute_sbc(self, opcode),
            "SEC" => flags::execute_sec(self, opcode),
            "SED" => flags::execute_sed(self, opcode),
            "SEI" => flags::execute_sei(self, opcode),
            "STA" => load_store::execute_sta(self, opcode),
            "STX" => load_store::execute_stx(self, opcode),
            "STY" => load_store::execute_sty(self, opcode),
            "TAX" => transfer::execute_tax(self, opcode),
            "TAY" => transfer::execute_tay(self, opcode),
            "TSX" => transfer::execute_tsx(self, opcode),
            "TXA" => transfer::execute_txa(self, opcode),
            "TXS" => transfer::execute_txs(self, opcode),
            "TYA" => transfer::execute_tya(self, opcode),
            mnemonic => unreachable!("opcode table names unhandled mnemonic {}", mnemonic),
        }

        self.collect_fault()
    }

    /// Steps until a halt condition and reports the reason.
    ///
    /// The stop signal (see [`stop_handle`](Cpu::stop_handle)) is checked
    /// once per iteration, between instructions; it is the only clean
    /// termination. Errors from [`step`](Cpu::step) map onto the matching
    /// [`Halt`] variants.
    pub fn run(&mut self) -> Halt {
        loop {
            if self.stop.load(Ordering::SeqCst) {
                return Halt::Stopped;
            }
            if let Err(error) = self.step() {
                return error.into();
            }
        }
    }

    /// Shared handle to the pending interrupt lines.
    ///
    /// External agents raise IRQ/NMI on the returned handle; the CPU
    /// samples them between instructions.
    pub fn interrupt_lines(&self) -> Arc<InterruptLines> {
        Arc::clone(&self.lines)
    }

    /// Shared stop signal for [`run`](Cpu::run).
    ///
    /// Storing `true` makes the run loop return [`Halt::Stopped`] before
    /// the next fetch.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Pushes PC and status, sets I, and vectors.
    ///
    /// The pushed status copy has B clear (this is an interrupt, not a
    /// BRK) and bit 5 set.
    fn service_interrupt(&mut self, vector: u16) {
        self.push_pc(self.pc);
        let status = self.status() & !FLAG_B;
        self.push_u8(status);
        self.flag_i = true;
        self.pc = self.read_word(vector);
    }

    fn collect_fault(&mut self) -> Result<(), ExecutionError> {
        match self.memory.take_fault() {
            Some(fault) => Err(ExecutionError::PeripheralFault {
                peripheral: fault.source,
                message: fault.message,
            }),
            None => Ok(()),
        }
    }

    // ========== Register and Flag Accessors ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The physical stack address is 0x0100 | SP; the stack grows
    /// downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the instruction register: the last opcode fetched.
    pub fn ir(&self) -> u8 {
        self.ir
    }

    /// Returns the status register packed into a byte.
    ///
    /// Bit layout is NV-BDIZC; bit 5 reads as 1, as on hardware.
    pub fn status(&self) -> u8 {
        let mut status = FLAG_UNUSED;

        if self.flag_n {
            status |= FLAG_N;
        }
        if self.flag_v {
            status |= FLAG_V;
        }
        if self.flag_b {
            status |= FLAG_B;
        }
        if self.flag_d {
            status |= FLAG_D;
        }
        if self.flag_i {
            status |= FLAG_I;
        }
        if self.flag_z {
            status |= FLAG_Z;
        }
        if self.flag_c {
            status |= FLAG_C;
        }

        status
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters (host/test use) ==========

    /// Sets the accumulator register value.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register value.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register value.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter value.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer value.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Helpers for Instruction Implementations ==========

    /// Sets N and Z from a result byte: Z iff zero, N from bit 7.
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = (value & 0x80) != 0;
    }

    /// Loads the arithmetic flags from a pulled status byte (PLP/RTI).
    ///
    /// The B bit of the byte is ignored: B exists only in pushed copies,
    /// not as a latch in the processor.
    pub(crate) fn set_status_from_pull(&mut self, value: u8) {
        self.flag_n = (value & FLAG_N) != 0;
        self.flag_v = (value & FLAG_V) != 0;
        self.flag_d = (value & FLAG_D) != 0;
        self.flag_i = (value & FLAG_I) != 0;
        self.flag_z = (value & FLAG_Z) != 0;
        self.flag_c = (value & FLAG_C) != 0;
    }

    /// Status byte as pushed by PHP/BRK: B and bit 5 forced on.
    pub(crate) fn status_for_break(&self) -> u8 {
        self.status() | FLAG_B | FLAG_UNUSED
    }

    // ========== Stack Discipline ==========

    /// Pushes a byte: writes to 0x0100 | SP, then decrements SP.
    pub(crate) fn push_u8(&mut self, value: u8) {
        self.memory.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pulls a byte: increments SP, then reads from 0x0100 | SP.
    pub(crate) fn pull_u8(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(0x0100 | self.sp as u16)
    }

    /// Pushes a 16-bit value high byte first, preserving little-endian
    /// order when the bytes are later read as a word.
    pub(crate) fn push_pc(&mut self, value: u16) {
        self.push_u8((value >> 8) as u8);
        self.push_u8((value & 0xFF) as u8);
    }

    /// Pulls a 16-bit value low byte first (the inverse of `push_pc`).
    pub(crate) fn pull_pc(&mut self) -> u16 {
        let low = self.pull_u8() as u16;
        let high = self.pull_u8() as u16;
        (high << 8) | low
    }

    // ========== Addressing-Mode Resolution ==========

    /// Reads a little-endian word at `addr`.
    pub(crate) fn read_word(&mut self, addr: u16) -> u16 {
        let low = self.memory.read(addr) as u16;
        let high = self.memory.read(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Reads a little-endian word whose high byte cannot leave the page
    /// of `addr`.
    ///
    /// This is the NMOS pointer-fetch behavior: a pointer at 0x10FF takes
    /// its high byte from 0x1000, and a zero-page pointer at 0xFF takes
    /// its high byte from 0x00.
    fn read_word_in_page(&mut self, addr: u16) -> u16 {
        let low = self.memory.read(addr) as u16;
        let high_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let high = self.memory.read(high_addr) as u16;
        (high << 8) | low
    }

    /// Computes the effective address for a memory-operand mode, with PC
    /// pointing at the opcode byte.
    pub(crate) fn effective_address(&mut self, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::ZeroPage => self.memory.read(self.pc.wrapping_add(1)) as u16,
            AddressingMode::ZeroPageX => {
                let base = self.memory.read(self.pc.wrapping_add(1));
                base.wrapping_add(self.x) as u16
            }
            AddressingMode::ZeroPageY => {
                let base = self.memory.read(self.pc.wrapping_add(1));
                base.wrapping_add(self.y) as u16
            }
            AddressingMode::Absolute => self.read_word(self.pc.wrapping_add(1)),
            AddressingMode::AbsoluteX => {
                let base = self.read_word(self.pc.wrapping_add(1));
                base.wrapping_add(self.x as u16)
            }
            AddressingMode::AbsoluteY => {
                let base = self.read_word(self.pc.wrapping_add(1));
                base.wrapping_add(self.y as u16)
            }
            AddressingMode::Indirect => {
                let pointer = self.read_word(self.pc.wrapping_add(1));
                self.read_word_in_page(pointer)
            }
            AddressingMode::IndirectX => {
                let base = self.memory.read(self.pc.wrapping_add(1));
                let pointer = base.wrapping_add(self.x) as u16;
                self.read_word_in_page(pointer)
            }
            AddressingMode::IndirectY => {
                let pointer = self.memory.read(self.pc.wrapping_add(1)) as u16;
                let base = self.read_word_in_page(pointer);
                base.wrapping_add(self.y as u16)
            }
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Immediate
            | AddressingMode::Relative => {
                unreachable!("mode {:?} has no effective address", mode)
            }
        }
    }

    /// Resolves the operand value for a value-consuming instruction.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode) -> u8 {
        match mode {
            AddressingMode::Accumulator => self.a,
            AddressingMode::Immediate => self.memory.read(self.pc.wrapping_add(1)),
            _ => {
                let addr = self.effective_address(mode);
                self.memory.read(addr)
            }
        }
    }

    /// Reads the signed branch displacement at PC+1.
    pub(crate) fn branch_displacement(&mut self) -> i8 {
        self.memory.read(self.pc.wrapping_add(1)) as i8
    }
}
