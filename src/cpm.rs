use crate::cpu::{R, RP};
use crate::machine::Machine;

/// CP/M BDOS console services, reached through CALL 5 by the cpudiag
/// test driver. Only the two functions the diagnostic uses are serviced.
pub fn bdos_call(machine: &mut Machine) {
    match machine.cpu.get_r8(R::C) {
        0x02 => {
            // BDOS 2 - CONSOLE OUTPUT
            let a = machine.cpu.get_r8(R::A);
            print!("{}", a as char);
        }
        0x09 => {
            // BDOS 9 - PRINT STRING
            // DE -> message, $-terminated, 3 bytes of padding in front
            let addr = machine.cpu.get_rp(RP::DE).wrapping_add(3);
            print!("{}", machine.mmu.read_asciid(addr));
        }
        c => {
            println!("bdos error: unhandled function {:02X}", c);
        }
    }
}
