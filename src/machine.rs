use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

use crate::cpm;
use crate::cpu::{BRANCH_TAKEN_CYCLES, CPU, Instruction, Op, R, RP};
use crate::memory::MMU;
use crate::tools::read_binary;

#[cfg(test)]
#[path = "./machine_test.rs"]
mod machine_test;

/// prints access to I/O ports
const DEBUG_IO: bool = false;

/// frames per second of the arcade hardware, paces the interrupt cadence
pub const FPS: usize = 60;

/// vector of the interrupt raised when the beam reaches mid-screen
pub const MID_SCREEN_VECTOR: u16 = 0x0008;

/// vector of the interrupt raised at the end of a frame
pub const END_OF_FRAME_VECTOR: u16 = 0x0010;

quick_error! {
    /// a ROM image could not be brought into memory
    #[derive(Debug)]
    pub enum RomError {
        Io(err: io::Error) {
            from()
            display("rom i/o error: {}", err)
        }
        TooLarge(len: usize, base: u16) {
            display("rom of {} bytes does not fit at base {:04X}", len, base)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum MachineError {
        /// execution reached a byte with no decoding on this machine
        UnimplementedOpcode(op: u8, pc: u16) {
            display("unimplemented opcode {:02X} at {:04X}", op, pc)
        }
    }
}

/// a host-provided device behind the 8080's I/O ports
pub trait Component {
    /// returns Some<u8> if read was handled
    fn in_u8(&mut self, _port: u8) -> Option<u8> {
        None
    }

    /// returns true if write was handled
    fn out_u8(&mut self, _port: u8, _data: u8) -> bool {
        false
    }
}

pub struct Machine {
    pub mmu: MMU,
    pub cpu: CPU,

    /// base offset where rom was loaded
    pub rom_base: u16,

    /// length of loaded rom in bytes
    pub rom_length: usize,

    /// handlers for i/o ports
    components: Vec<Box<dyn Component>>,

    /// if set, writes an execution trace to `trace_file`
    trace_file: Option<File>,

    /// services CP/M BDOS console calls at address 5 (cpudiag mode)
    cpm_compat: bool,
}

impl Machine {
    pub fn default() -> Self {
        Machine {
            cpu: CPU::default(),
            mmu: MMU::default(),
            rom_base: 0,
            rom_length: 0,
            components: Vec::new(),
            trace_file: None,
            cpm_compat: false,
        }
    }

    /// reset the CPU and memory
    pub fn hard_reset(&mut self) {
        self.cpu = CPU::default();
        self.mmu.memory.clear();
        self.cpm_compat = false;
    }

    /// registers a device to answer port reads and writes
    pub fn add_component(&mut self, component: Box<dyn Component>) {
        self.components.push(component);
    }

    /// Enables writing of an execution trace to file, one line per
    /// executed instruction.
    pub fn write_trace_to(&mut self, filename: &str) {
        let trace_path = Path::new(filename);

        let file = match File::create(&trace_path) {
            Err(why) => panic!("couldn't create {:?}: {}", trace_path.display(), why),
            Ok(file) => file,
        };

        self.trace_file = Some(file);
    }

    /// resets the machine and copies a rom image into memory at `base`
    pub fn load_rom(&mut self, data: &[u8], base: u16) -> Result<(), RomError> {
        if base as usize + data.len() > 0x1_0000 {
            return Err(RomError::TooLarge(data.len(), base));
        }
        self.hard_reset();
        self.mmu.write(base, data);
        self.rom_base = base;
        self.rom_length = data.len();
        Ok(())
    }

    /// loads a rom image from a file
    pub fn load_rom_file(&mut self, filename: &str, base: u16) -> Result<(), RomError> {
        let data = read_binary(filename)?;
        self.load_rom(&data, base)
    }

    /// Loads the cpudiag test rom at 0x0100 and applies its driver
    /// accommodations: execution starts at 0x0100, the warm-boot target
    /// at 0 is parked with a byte that stops execution, the diagnostic's
    /// stack pointer is corrected and the DAA test is jumped over.
    pub fn load_diag_rom(&mut self, data: &[u8]) -> Result<(), RomError> {
        self.load_rom(data, 0x0100)?;
        self.cpm_compat = true;
        self.cpu.regs.pc = 0x0100;
        self.mmu.write_u8(0x0000, 0x27);
        self.mmu.write_u8(0x0170, 0x07);
        self.mmu.write(0x059C, &[0xC3, 0xC2, 0x05]);
        Ok(())
    }

    /// Simulates the RST response to an external interrupt: push pc and
    /// jump to `vector`. Dropped while the interrupt latch is clear.
    /// Accepting an interrupt clears the latch again.
    pub fn inject_interrupt(&mut self, vector: u16) {
        if !self.cpu.interrupts_enabled {
            return;
        }
        let pc = self.cpu.regs.pc;
        self.cpu.push16(&mut self.mmu, pc);
        self.cpu.regs.pc = vector;
        self.cpu.interrupts_enabled = false;
        self.cpu.last_interrupt = vector;
    }

    /// the vector the frame cadence injects next, alternating mid-screen
    /// and end-of-frame
    pub fn next_interrupt_vector(&self) -> u16 {
        if self.cpu.last_interrupt == MID_SCREEN_VECTOR {
            END_OF_FRAME_VECTOR
        } else {
            MID_SCREEN_VECTOR
        }
    }

    /// executes enough instructions for 1 video frame, injecting the
    /// mid-screen and end-of-frame interrupts at half-frame boundaries
    pub fn execute_frame(&mut self) -> Result<(), MachineError> {
        let half_frame = self.cpu.clock_hz / FPS / 2;

        for _ in 0..2 {
            while self.cpu.cycle_count < half_frame {
                self.execute_instruction()?;
            }
            self.cpu.cycle_count = 0;
            let vector = self.next_interrupt_vector();
            self.inject_interrupt(vector);
        }
        Ok(())
    }

    /// executes n instructions of the cpu
    pub fn execute_instructions(&mut self, count: usize) -> Result<(), MachineError> {
        for _ in 0..count {
            self.execute_instruction()?;
        }
        Ok(())
    }

    /// executes the next CPU instruction
    pub fn execute_instruction(&mut self) -> Result<(), MachineError> {
        let start = self.cpu.regs.pc;
        let op = self.cpu.decoder.get_instruction(&self.mmu, start);

        if self.trace_file.is_some() {
            self.write_trace_line(start, &op);
        }

        self.cpu.regs.pc = start.wrapping_add(u16::from(op.length));
        let mut cycles = op.cycles;
        let f = self.cpu.regs.flags;

        match op.command {
            Op::Invalid(b) => {
                return Err(MachineError::UnimplementedOpcode(b, start));
            }
            Op::Nop => {}
            Op::Lxi(rp) => self.cpu.set_rp(rp, op.params.imm16()),
            Op::Stax(rp) => {
                let a = self.cpu.get_r8(R::A);
                self.mmu.write_u8(self.cpu.get_rp(rp), a);
            }
            Op::Ldax(rp) => {
                let val = self.mmu.read_u8(self.cpu.get_rp(rp));
                self.cpu.set_r8(R::A, val);
            }
            Op::Inx(rp) => {
                let val = self.cpu.get_rp(rp).wrapping_add(1);
                self.cpu.set_rp(rp, val);
            }
            Op::Dcx(rp) => {
                let val = self.cpu.get_rp(rp).wrapping_sub(1);
                self.cpu.set_rp(rp, val);
            }
            Op::Dad(rp) => {
                let res = self.cpu.get_rp(RP::HL) as usize + self.cpu.get_rp(rp) as usize;
                self.cpu.regs.flags.set_carry_u16(res);
                self.cpu.set_rp(RP::HL, res as u16);
            }
            Op::Inr(r) => {
                let val = self.cpu.read_r8(&self.mmu, r).wrapping_add(1);
                self.cpu.write_r8(&mut self.mmu, r, val);
                self.cpu.regs.flags.set_szp_u8(val as usize);
            }
            Op::Dcr(r) => {
                let val = self.cpu.read_r8(&self.mmu, r).wrapping_sub(1);
                self.cpu.write_r8(&mut self.mmu, r, val);
                self.cpu.regs.flags.set_szp_u8(val as usize);
            }
            Op::Mvi(r) => {
                let val = op.params.imm8();
                self.cpu.write_r8(&mut self.mmu, r, val);
            }
            Op::Rlc => {
                let a = self.cpu.get_r8(R::A);
                self.cpu.regs.flags.carry = a & 0x80 != 0;
                self.cpu.set_r8(R::A, a.rotate_left(1));
            }
            Op::Rrc => {
                let a = self.cpu.get_r8(R::A);
                self.cpu.regs.flags.carry = a & 1 != 0;
                self.cpu.set_r8(R::A, a.rotate_right(1));
            }
            Op::Ral => {
                let a = self.cpu.get_r8(R::A);
                self.cpu.regs.flags.carry = a & 0x80 != 0;
                self.cpu.set_r8(R::A, a << 1 | f.carry_val() as u8);
            }
            Op::Rar => {
                let a = self.cpu.get_r8(R::A);
                self.cpu.regs.flags.carry = a & 1 != 0;
                self.cpu.set_r8(R::A, a >> 1 | (f.carry_val() as u8) << 7);
            }
            Op::Shld => {
                let hl = self.cpu.get_rp(RP::HL);
                self.mmu.write_u16(op.params.imm16(), hl);
            }
            Op::Lhld => {
                let val = self.mmu.read_u16(op.params.imm16());
                self.cpu.set_rp(RP::HL, val);
            }
            Op::Sta => {
                let a = self.cpu.get_r8(R::A);
                self.mmu.write_u8(op.params.imm16(), a);
            }
            Op::Lda => {
                let val = self.mmu.read_u8(op.params.imm16());
                self.cpu.set_r8(R::A, val);
            }
            Op::Cma => {
                let a = self.cpu.get_r8(R::A);
                self.cpu.set_r8(R::A, !a);
            }
            Op::Stc => self.cpu.regs.flags.carry = true,
            Op::Cmc => self.cpu.regs.flags.carry = !f.carry,
            Op::Mov(dst, src) => {
                let val = self.cpu.read_r8(&self.mmu, src);
                self.cpu.write_r8(&mut self.mmu, dst, val);
            }
            Op::Add(r) => {
                let src = self.cpu.read_r8(&self.mmu, r) as usize;
                self.cpu.add8(src, 0);
            }
            Op::Adc(r) => {
                let src = self.cpu.read_r8(&self.mmu, r) as usize;
                self.cpu.add8(src, f.carry_val());
            }
            Op::Sub(r) => {
                let src = self.cpu.read_r8(&self.mmu, r) as usize;
                self.cpu.sub8(src, 0);
            }
            Op::Sbb(r) => {
                let src = self.cpu.read_r8(&self.mmu, r) as usize;
                self.cpu.sub8(src, f.carry_val());
            }
            Op::Ana(r) => {
                let src = self.cpu.read_r8(&self.mmu, r);
                self.cpu.and8(src);
            }
            Op::Xra(r) => {
                let src = self.cpu.read_r8(&self.mmu, r);
                self.cpu.xor8(src);
            }
            Op::Ora(r) => {
                let src = self.cpu.read_r8(&self.mmu, r);
                self.cpu.or8(src);
            }
            Op::Cmp(r) => {
                let src = self.cpu.read_r8(&self.mmu, r) as usize;
                self.cpu.cmp8(src);
            }
            Op::Adi => self.cpu.add8(op.params.imm8() as usize, 0),
            Op::Aci => self.cpu.add8(op.params.imm8() as usize, f.carry_val()),
            Op::Sui => self.cpu.sub8(op.params.imm8() as usize, 0),
            Op::Sbi => self.cpu.sub8(op.params.imm8() as usize, f.carry_val()),
            Op::Ani => self.cpu.and8(op.params.imm8()),
            Op::Xri => self.cpu.xor8(op.params.imm8()),
            Op::Ori => self.cpu.or8(op.params.imm8()),
            Op::Cpi => self.cpu.cmp8(op.params.imm8() as usize),
            Op::Ret => self.cpu.regs.pc = self.cpu.pop16(&self.mmu),
            Op::Rnz => cycles += self.ret_if(!f.zero),
            Op::Rz => cycles += self.ret_if(f.zero),
            Op::Rnc => cycles += self.ret_if(!f.carry),
            Op::Rc => cycles += self.ret_if(f.carry),
            Op::Rpo => cycles += self.ret_if(!f.parity),
            Op::Rpe => cycles += self.ret_if(f.parity),
            Op::Rp => cycles += self.ret_if(!f.sign),
            Op::Rm => cycles += self.ret_if(f.sign),
            Op::Jmp => self.cpu.regs.pc = op.params.imm16(),
            Op::Jnz => self.jump_if(!f.zero, op.params.imm16()),
            Op::Jz => self.jump_if(f.zero, op.params.imm16()),
            Op::Jnc => self.jump_if(!f.carry, op.params.imm16()),
            Op::Jc => self.jump_if(f.carry, op.params.imm16()),
            Op::Jpo => self.jump_if(!f.parity, op.params.imm16()),
            Op::Jpe => self.jump_if(f.parity, op.params.imm16()),
            Op::Jp => self.jump_if(!f.sign, op.params.imm16()),
            Op::Jm => self.jump_if(f.sign, op.params.imm16()),
            Op::Call => {
                let addr = op.params.imm16();
                if self.cpm_compat && addr == 0x0005 {
                    cpm::bdos_call(self);
                } else {
                    let ret = self.cpu.regs.pc;
                    self.cpu.push16(&mut self.mmu, ret);
                    self.cpu.regs.pc = addr;
                }
            }
            Op::Cnz => cycles += self.call_if(!f.zero, op.params.imm16()),
            Op::Cz => cycles += self.call_if(f.zero, op.params.imm16()),
            Op::Cnc => cycles += self.call_if(!f.carry, op.params.imm16()),
            Op::Cc => cycles += self.call_if(f.carry, op.params.imm16()),
            Op::Cpo => cycles += self.call_if(!f.parity, op.params.imm16()),
            Op::Cpe => cycles += self.call_if(f.parity, op.params.imm16()),
            Op::Cp => cycles += self.call_if(!f.sign, op.params.imm16()),
            Op::Cm => cycles += self.call_if(f.sign, op.params.imm16()),
            Op::Push(rp) => {
                let val = self.cpu.get_rp(rp);
                self.cpu.push16(&mut self.mmu, val);
            }
            Op::Pop(rp) => {
                let val = self.cpu.pop16(&self.mmu);
                self.cpu.set_rp(rp, val);
            }
            Op::PushPsw => {
                let val = u16::from(self.cpu.get_r8(R::A)) << 8 | u16::from(f.u8());
                self.cpu.push16(&mut self.mmu, val);
            }
            Op::PopPsw => {
                let val = self.cpu.pop16(&self.mmu);
                self.cpu.set_r8(R::A, (val >> 8) as u8);
                self.cpu.regs.flags.set_u8(val as u8);
            }
            Op::Xthl => {
                let sp = self.cpu.regs.sp;
                let stacked = self.mmu.read_u16(sp);
                let hl = self.cpu.get_rp(RP::HL);
                self.mmu.write_u16(sp, hl);
                self.cpu.set_rp(RP::HL, stacked);
            }
            Op::Xchg => {
                let de = self.cpu.get_rp(RP::DE);
                let hl = self.cpu.get_rp(RP::HL);
                self.cpu.set_rp(RP::DE, hl);
                self.cpu.set_rp(RP::HL, de);
            }
            Op::Sphl => self.cpu.regs.sp = self.cpu.get_rp(RP::HL),
            Op::Pchl => self.cpu.regs.pc = self.cpu.get_rp(RP::HL),
            Op::In => {
                let val = self.in_u8(op.params.imm8());
                self.cpu.set_r8(R::A, val);
            }
            Op::Out => {
                let a = self.cpu.get_r8(R::A);
                self.out_u8(op.params.imm8(), a);
            }
            Op::Ei => self.cpu.interrupts_enabled = true,
            Op::Di => self.cpu.interrupts_enabled = false,
        }

        self.cpu.cycles = cycles;
        self.cpu.cycle_count += cycles;
        self.cpu.instruction_count += 1;
        Ok(())
    }

    fn jump_if(&mut self, cond: bool, addr: u16) {
        if cond {
            self.cpu.regs.pc = addr;
        }
    }

    fn call_if(&mut self, cond: bool, addr: u16) -> usize {
        if cond {
            let ret = self.cpu.regs.pc;
            self.cpu.push16(&mut self.mmu, ret);
            self.cpu.regs.pc = addr;
            BRANCH_TAKEN_CYCLES
        } else {
            0
        }
    }

    fn ret_if(&mut self, cond: bool) -> usize {
        if cond {
            self.cpu.regs.pc = self.cpu.pop16(&self.mmu);
            BRANCH_TAKEN_CYCLES
        } else {
            0
        }
    }

    /// asks the registered devices to answer a port read, 0 if unhandled
    fn in_u8(&mut self, port: u8) -> u8 {
        for component in &mut self.components {
            if let Some(val) = component.in_u8(port) {
                if DEBUG_IO {
                    println!("in_u8: port {:02X} = {:02X}", port, val);
                }
                return val;
            }
        }
        if DEBUG_IO {
            println!("in_u8: port {:02X} unhandled", port);
        }
        0
    }

    /// offers a port write to the registered devices
    fn out_u8(&mut self, port: u8, data: u8) {
        for component in &mut self.components {
            if component.out_u8(port, data) {
                if DEBUG_IO {
                    println!("out_u8: port {:02X} = {:02X}", port, data);
                }
                return;
            }
        }
        if DEBUG_IO {
            println!("out_u8: port {:02X} = {:02X} unhandled", port, data);
        }
    }

    fn write_trace_line(&mut self, offset: u16, op: &Instruction) {
        let regs = &self.cpu.regs;
        let line = format!(
            "[{:04X}] {:<14} a:{:02X} bc:{:04X} de:{:04X} hl:{:04X} sp:{:04X} C{} Z{} S{} P{}",
            offset,
            format!("{}", op),
            regs.get_r8(R::A),
            regs.get_rp(RP::BC),
            regs.get_rp(RP::DE),
            regs.get_rp(RP::HL),
            regs.sp,
            regs.flags.carry as u8,
            regs.flags.zero as u8,
            regs.flags.sign as u8,
            regs.flags.parity as u8,
        );
        if let Some(file) = &mut self.trace_file {
            let _ = writeln!(file, "{}", line);
        }
    }
}
