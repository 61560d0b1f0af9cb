//! Memory-mapped peripheral support.
//!
//! This module provides the contract between the CPU core and external
//! hardware models: a [`Peripheral`] claims a fixed 256-byte window of the
//! address space and services reads and writes translated to an 8-bit
//! offset within that window. [`AddressSpace`] owns the backing 64 KiB RAM
//! and routes each access to the first registered window that covers it,
//! falling back to RAM.
//!
//! The CPU never interprets a peripheral's internal state. Peripheral
//! errors are latched as a [`BusFault`] and collected by the core at the
//! next instruction boundary, so an instruction always completes before
//! the run halts.

use crate::memory::{BusFault, MemoryBus};

/// Width of a peripheral window in bytes.
///
/// A window spans `[start, start + 0xFF]`, so offsets fit in a `u8`.
pub const WINDOW_SIZE: u16 = 0x100;

/// Error a peripheral may report from `read` or `write`.
///
/// The message is surfaced verbatim in the halt reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeripheralError {
    message: String,
}

impl PeripheralError {
    /// Creates an error carrying the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PeripheralError {}

/// Interface for memory-mapped hardware claiming a 256-byte window.
///
/// Offsets are relative to the window start; the peripheral never sees
/// absolute addresses. `read` takes `&mut self` because reading a register
/// is allowed to have side effects (draining a receive buffer,
/// acknowledging a condition).
///
/// # Examples
///
/// ```
/// use mos6502::{Peripheral, PeripheralError};
///
/// struct Latch {
///     value: u8,
/// }
///
/// impl Peripheral for Latch {
///     fn name(&self) -> &str {
///         "latch"
///     }
///
///     fn read(&mut self, _offset: u8) -> Result<u8, PeripheralError> {
///         Ok(self.value)
///     }
///
///     fn write(&mut self, _offset: u8, value: u8) -> Result<(), PeripheralError> {
///         self.value = value;
///         Ok(())
///     }
/// }
/// ```
pub trait Peripheral {
    /// Name used in registration bookkeeping and fault messages.
    fn name(&self) -> &str;

    /// Reads the register at `offset` within the window.
    fn read(&mut self, offset: u8) -> Result<u8, PeripheralError>;

    /// Writes the register at `offset` within the window.
    fn write(&mut self, offset: u8, value: u8) -> Result<(), PeripheralError>;
}

/// One registered peripheral and the window it claims.
struct Window {
    start: u16,
    end: u16,
    peripheral: Box<dyn Peripheral>,
}

impl Window {
    fn contains(&self, addr: u16) -> bool {
        addr >= self.start && addr <= self.end
    }
}

/// The CPU's 64 KiB address space: flat RAM plus peripheral windows.
///
/// Resolution order on every access: the first registered window covering
/// the address wins; otherwise the backing RAM answers. A window and RAM
/// never both answer the same address, and registration order is the
/// tie-break when windows overlap.
///
/// # Examples
///
/// ```
/// use mos6502::{AddressSpace, MemoryBus, Peripheral, PeripheralError};
///
/// struct Zeros;
///
/// impl Peripheral for Zeros {
///     fn name(&self) -> &str {
///         "zeros"
///     }
///     fn read(&mut self, _offset: u8) -> Result<u8, PeripheralError> {
///         Ok(0)
///     }
///     fn write(&mut self, _offset: u8, _value: u8) -> Result<(), PeripheralError> {
///         Ok(())
///     }
/// }
///
/// let mut bus = AddressSpace::new();
/// bus.register(0xD000, Box::new(Zeros));
///
/// bus.write(0x1234, 0x42); // RAM
/// assert_eq!(bus.read(0x1234), 0x42);
/// assert_eq!(bus.read(0xD017), 0x00); // window
/// ```
pub struct AddressSpace {
    ram: Box<[u8; 65536]>,
    windows: Vec<Window>,
    fault: Option<BusFault>,
}

impl AddressSpace {
    /// Creates an address space with zeroed RAM and no peripherals.
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 65536]),
            windows: Vec::new(),
            fault: None,
        }
    }

    /// Registers a peripheral over the window `[start, start + 0xFF]`.
    ///
    /// The window is clamped at 0xFFFF rather than wrapping. Overlapping
    /// windows are permitted; the earliest registration covering an
    /// address services it.
    pub fn register(&mut self, start: u16, peripheral: Box<dyn Peripheral>) {
        let end = start.saturating_add(WINDOW_SIZE - 1);
        self.windows.push(Window {
            start,
            end,
            peripheral,
        });
    }

    /// Copies a raw binary image into RAM starting at `base`.
    ///
    /// Peripheral windows are not written through; an image is RAM
    /// contents only.
    ///
    /// # Panics
    ///
    /// Panics if the image would run past the end of the address space.
    pub fn load(&mut self, base: u16, bytes: &[u8]) {
        let start = base as usize;
        self.ram[start..start + bytes.len()].copy_from_slice(bytes);
    }

    fn latch_fault(&mut self, source: &str, error: PeripheralError) {
        // Keep the first fault; later ones from the same instruction are
        // consequences of running on after it.
        if self.fault.is_none() {
            self.fault = Some(BusFault {
                source: source.to_string(),
                message: error.to_string(),
            });
        }
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for AddressSpace {
    fn read(&mut self, addr: u16) -> u8 {
        for i in 0..self.windows.len() {
            if self.windows[i].contains(addr) {
                let offset = (addr - self.windows[i].start) as u8;
                return match self.windows[i].peripheral.read(offset) {
                    Ok(value) => value,
                    Err(error) => {
                        let name = self.windows[i].peripheral.name().to_string();
                        self.latch_fault(&name, error);
                        0xFF
                    }
                };
            }
        }
        self.ram[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        for i in 0..self.windows.len() {
            if self.windows[i].contains(addr) {
                let offset = (addr - self.windows[i].start) as u8;
                if let Err(error) = self.windows[i].peripheral.write(offset, value) {
                    let name = self.windows[i].peripheral.name().to_string();
                    self.latch_fault(&name, error);
                }
                return;
            }
        }
        self.ram[addr as usize] = value;
    }

    fn take_fault(&mut self) -> Option<BusFault> {
        self.fault.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 256 bytes of peripheral-local storage, for routing tests.
    struct ScratchPad {
        name: &'static str,
        data: [u8; 256],
    }

    impl ScratchPad {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                data: [0; 256],
            }
        }
    }

    impl Peripheral for ScratchPad {
        fn name(&self) -> &str {
            self.name
        }

        fn read(&mut self, offset: u8) -> Result<u8, PeripheralError> {
            Ok(self.data[offset as usize])
        }

        fn write(&mut self, offset: u8, value: u8) -> Result<(), PeripheralError> {
            self.data[offset as usize] = value;
            Ok(())
        }
    }

    /// Fails every access, for fault latching tests.
    struct Broken;

    impl Peripheral for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn read(&mut self, offset: u8) -> Result<u8, PeripheralError> {
            Err(PeripheralError::new(format!("read of offset {}", offset)))
        }

        fn write(&mut self, offset: u8, _value: u8) -> Result<(), PeripheralError> {
            Err(PeripheralError::new(format!("write of offset {}", offset)))
        }
    }

    #[test]
    fn ram_backs_unclaimed_addresses() {
        let mut bus = AddressSpace::new();
        assert_eq!(bus.read(0x0000), 0x00);

        bus.write(0x1234, 0x42);
        assert_eq!(bus.read(0x1234), 0x42);
        assert_eq!(bus.read(0x1233), 0x00);
    }

    #[test]
    fn window_covers_exactly_256_bytes() {
        let mut bus = AddressSpace::new();
        bus.register(0xD000, Box::new(ScratchPad::new("pad")));

        // RAM on both sides of the window keeps its own contents.
        bus.write(0xCFFF, 0x11);
        bus.write(0xD100, 0x22);

        // Writes inside the window land in the peripheral, not RAM.
        bus.write(0xD000, 0xAA);
        bus.write(0xD0FF, 0xBB);

        assert_eq!(bus.read(0xCFFF), 0x11);
        assert_eq!(bus.read(0xD000), 0xAA);
        assert_eq!(bus.read(0xD0FF), 0xBB);
        assert_eq!(bus.read(0xD100), 0x22);
    }

    #[test]
    fn peripheral_shadows_ram() {
        let mut bus = AddressSpace::new();

        // RAM value written before the window exists.
        bus.write(0xD042, 0x99);
        bus.register(0xD000, Box::new(ScratchPad::new("pad")));

        // The window answers now, and the RAM byte is unreachable.
        assert_eq!(bus.read(0xD042), 0x00);

        bus.write(0xD042, 0x55);
        assert_eq!(bus.read(0xD042), 0x55);
    }

    #[test]
    fn first_registration_wins_on_overlap() {
        let mut bus = AddressSpace::new();
        bus.register(0xD000, Box::new(ScratchPad::new("first")));
        bus.register(0xD080, Box::new(ScratchPad::new("second")));

        // 0xD0C0 is inside both windows; the first registration services it
        // at offset 0xC0.
        bus.write(0xD0C0, 0x7E);
        assert_eq!(bus.read(0xD0C0), 0x7E);

        // The second window owns addresses past the end of the first.
        bus.write(0xD100, 0x3C);
        assert_eq!(bus.read(0xD100), 0x3C);
    }

    #[test]
    fn window_clamps_at_top_of_memory() {
        let mut bus = AddressSpace::new();
        bus.register(0xFF80, Box::new(ScratchPad::new("top")));

        bus.write(0xFFFF, 0x12);
        assert_eq!(bus.read(0xFFFF), 0x12);

        // No wraparound: address 0x0000 stays RAM.
        bus.write(0x0000, 0x34);
        assert_eq!(bus.read(0x0000), 0x34);
    }

    #[test]
    fn offsets_are_window_relative() {
        let mut bus = AddressSpace::new();
        bus.register(0x8000, Box::new(ScratchPad::new("pad")));

        bus.write(0x8010, 0xAB);

        // Same offset through a direct read.
        assert_eq!(bus.read(0x8010), 0xAB);
        // Offset 0x10 of a second identical pad elsewhere is independent.
        bus.register(0x9000, Box::new(ScratchPad::new("other")));
        assert_eq!(bus.read(0x9010), 0x00);
    }

    #[test]
    fn read_fault_latches_and_yields_ff() {
        let mut bus = AddressSpace::new();
        bus.register(0xD000, Box::new(Broken));

        assert_eq!(bus.read(0xD004), 0xFF);

        let fault = bus.take_fault().expect("fault should be latched");
        assert_eq!(fault.source, "broken");
        assert_eq!(fault.message, "read of offset 4");

        // Taking the fault clears it.
        assert_eq!(bus.take_fault(), None);
    }

    #[test]
    fn write_fault_latches() {
        let mut bus = AddressSpace::new();
        bus.register(0xD000, Box::new(Broken));

        bus.write(0xD001, 0x00);

        let fault = bus.take_fault().expect("fault should be latched");
        assert_eq!(fault.message, "write of offset 1");
    }

    #[test]
    fn first_fault_is_kept() {
        let mut bus = AddressSpace::new();
        bus.register(0xD000, Box::new(Broken));

        let _ = bus.read(0xD002);
        let _ = bus.read(0xD003);

        let fault = bus.take_fault().expect("fault should be latched");
        assert_eq!(fault.message, "read of offset 2");
    }

    #[test]
    fn load_writes_ram_only() {
        let mut bus = AddressSpace::new();
        bus.register(0x0000, Box::new(ScratchPad::new("pad")));
        bus.load(0x0000, &[0xA9, 0x42]);
        bus.load(0x0200, &[0xEA]);

        // The covered bytes went to RAM underneath; the window still
        // answers reads there. Uncovered bytes read back directly.
        assert_eq!(bus.read(0x0000), 0x00);
        assert_eq!(bus.read(0x0200), 0xEA);
    }
}
