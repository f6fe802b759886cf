extern crate invaders;

use invaders::machine::{Machine, FPS};
use invaders::tools;

extern crate clap;
use clap::{App, Arg, ErrorKind};

use std::io;
use std::process::exit;
use std::thread::sleep;
use std::time::Duration;

fn main() {
    let matches = App::new("invaders")
        .version("0.1")
        .arg(Arg::with_name("INPUT")
            .help("Sets the rom file to use")
            .required(true)
            .index(1))
        .arg(Arg::with_name("diag")
            .long("diag")
            .help("Loads the rom as a cpudiag test image at 0x0100"))
        .arg(Arg::with_name("trace")
            .long("trace")
            .value_name("FILE")
            .help("Writes an execution trace to FILE")
            .takes_value(true))
        .arg(Arg::with_name("no-throttle")
            .long("no-throttle")
            .help("Runs unpaced at host speed"))
        .get_matches_safe();

    let matches = match matches {
        Ok(matches) => matches,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                println!("{}", e.message);
                exit(0);
            }
            _ => {
                eprintln!("{}", e.message);
                exit(6);
            }
        },
    };

    let filename = matches.value_of("INPUT").unwrap();

    let data = match tools::read_binary(filename) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("couldn't open rom {}: {}", filename, e);
            exit(match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => 1,
                _ => 3,
            });
        }
    };

    let mut machine = Machine::default();
    if let Some(path) = matches.value_of("trace") {
        machine.write_trace_to(path);
    }

    let res = if matches.is_present("diag") {
        machine.load_diag_rom(&data)
    } else {
        machine.load_rom(&data, 0)
    };
    if let Err(e) = res {
        eprintln!("{}", e);
        exit(4);
    }
    println!("loaded rom {} ({} bytes)", filename, data.len());

    let throttle = !matches.is_present("no-throttle");
    let diag = matches.is_present("diag");
    let half_frame = machine.cpu.clock_hz / FPS / 2;
    let ns_per_cycle = (1_000_000_000 / machine.cpu.clock_hz) as u64;

    // Emulation loop. Runs one instruction at a time, raises the two
    // display interrupts at half-frame boundaries and sleeps off the
    // cycles the instruction cost at the 2 MHz clock.
    loop {
        if let Err(e) = machine.execute_instruction() {
            eprintln!("{}", e);
            exit(5);
        }

        if !diag && machine.cpu.cycle_count >= half_frame {
            machine.cpu.cycle_count = 0;
            let vector = machine.next_interrupt_vector();
            machine.inject_interrupt(vector);
        }

        if throttle {
            sleep(Duration::from_nanos(machine.cpu.cycles as u64 * ns_per_cycle));
        }
    }
}
