//! Host CLI for the 6502 emulator.
//!
//! Loads a raw binary image into the address space, resets the CPU and
//! runs it until a halt condition. The image carries no header; it is
//! copied verbatim to the load address, and it is the image's job to
//! leave a usable reset vector at 0xFFFC/0xFFFD.

use getopts::Options;
use mos6502::{AddressSpace, Cpu, Halt, MemoryBus, OPCODE_TABLE};
use std::env;
use std::io::Write;
use std::process;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_PERIPHERAL_FAULT: i32 = 2;

/// Prints usage information with an optional reason.
fn print_usage(opts: &Options, reason: Option<&str>) {
    let mut stderr = std::io::stderr();
    if let Some(r) = reason {
        let _ = writeln!(stderr, "{}", r);
    }
    let _ = writeln!(stderr, "mos6502 is an instruction-level MOS 6502 emulator.");
    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "{}", opts.usage("Usage: mos6502 [OPTION]... FILE"));
}

/// Parses a hex argument of the form `FFFC`, `0xFFFC` or `$FFFC`.
fn parse_hex_u16(raw: &str) -> Result<u16, String> {
    let digits = raw
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|_| format!("invalid hex address: {}", raw))
}

/// Initializes and runs the emulator, returning the process exit code.
fn init() -> i32 {
    let args: Vec<String> = env::args().collect();

    let mut opts = Options::new();
    opts.optopt(
        "b",
        "base",
        "load the image at the specified address (default 0)",
        "[HEX]",
    );
    opts.optflag("d", "debug", "trace each executed instruction to stdout");
    opts.optflag("h", "help", "print this message");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            print_usage(&opts, Some(&f.to_string()));
            return EXIT_FAILURE;
        }
    };

    if matches.opt_present("help") {
        print_usage(&opts, None);
        return EXIT_SUCCESS;
    }

    let image_path = match matches.free.first() {
        Some(path) => path.clone(),
        None => {
            print_usage(&opts, Some("no binary image specified"));
            return EXIT_FAILURE;
        }
    };

    let base = match matches.opt_str("base") {
        Some(raw) => match parse_hex_u16(&raw) {
            Ok(addr) => addr,
            Err(message) => {
                print_usage(&opts, Some(&message));
                return EXIT_FAILURE;
            }
        },
        None => 0x0000,
    };

    let image = match std::fs::read(&image_path) {
        Ok(bytes) => bytes,
        Err(error) => {
            eprintln!("cannot read {}: {}", image_path, error);
            return EXIT_FAILURE;
        }
    };

    if base as usize + image.len() > 0x10000 {
        eprintln!(
            "image of {} bytes does not fit at 0x{:04X}",
            image.len(),
            base
        );
        return EXIT_FAILURE;
    }

    let mut bus = AddressSpace::new();
    bus.load(base, &image);

    let mut cpu = Cpu::new(bus);
    cpu.reset();

    let halt = if matches.opt_present("debug") {
        run_traced(&mut cpu)
    } else {
        cpu.run()
    };

    match halt {
        Halt::Stopped => EXIT_SUCCESS,
        Halt::UnknownOpcode { .. } => {
            eprintln!("halted: {}", halt);
            EXIT_FAILURE
        }
        Halt::PeripheralFault { .. } => {
            eprintln!("halted: {}", halt);
            EXIT_PERIPHERAL_FAULT
        }
    }
}

/// Steps the CPU manually, printing one `MNEMONIC mode` line per executed
/// instruction (e.g. `ADC abs,X`).
fn run_traced<M: MemoryBus>(cpu: &mut Cpu<M>) -> Halt {
    let stop = cpu.stop_handle();
    loop {
        if stop.load(std::sync::atomic::Ordering::SeqCst) {
            return Halt::Stopped;
        }
        match cpu.step() {
            Ok(()) => println!("{}", OPCODE_TABLE[cpu.ir() as usize]),
            Err(error) => return error.into(),
        }
    }
}

fn main() {
    process::exit(init());
}
