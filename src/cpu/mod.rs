// these modules are re-exported as a single module

pub use self::decoder::*;
mod decoder;

pub use self::instruction::*;
mod instruction;

pub use self::register::*;
mod register;

pub use self::flag::*;
mod flag;

pub use self::op::*;
mod op;

use std::num::Wrapping;

use crate::memory::MMU;

/// prints diagnostics of stack usage (push / pop)
const DEBUG_STACK: bool = false;

pub struct CPU {
    pub instruction_count: usize,

    /// state count of the most recently executed instruction
    pub cycles: usize,

    /// running state counter, reset by the host when pacing frames
    pub cycle_count: usize,

    /// general purpose registers, pc, sp, flags
    pub regs: RegisterState,

    /// the EI/DI latch. injected interrupts are dropped while clear.
    pub interrupts_enabled: bool,

    /// vector of the most recently accepted interrupt, 0 if none
    pub last_interrupt: u16,

    pub decoder: Decoder,
    pub clock_hz: usize,
}

impl CPU {
    pub fn default() -> Self {
        CPU {
            instruction_count: 0,
            cycles: 0,
            cycle_count: 0,
            regs: RegisterState::default(),
            interrupts_enabled: false,
            last_interrupt: 0,
            decoder: Decoder::default(),
            clock_hz: 2_000_000, // Intel 8080 at 2.000 MHz
        }
    }

    pub fn get_r8(&self, r: R) -> u8 {
        self.regs.get_r8(r)
    }

    pub fn set_r8(&mut self, r: R, val: u8) {
        self.regs.set_r8(r, val);
    }

    pub fn get_rp(&self, rp: RP) -> u16 {
        self.regs.get_rp(rp)
    }

    pub fn set_rp(&mut self, rp: RP, val: u16) {
        self.regs.set_rp(rp, val);
    }

    /// reads an 8-bit operand. M reads the memory byte at HL.
    pub fn read_r8(&self, mmu: &MMU, r: R) -> u8 {
        match r {
            R::M => mmu.read_u8(self.regs.get_rp(RP::HL)),
            _ => self.regs.get_r8(r),
        }
    }

    /// writes an 8-bit operand. M writes the memory byte at HL.
    pub fn write_r8(&mut self, mmu: &mut MMU, r: R, val: u8) {
        match r {
            R::M => mmu.write_u8(self.regs.get_rp(RP::HL), val),
            _ => self.regs.set_r8(r, val),
        }
    }

    /// pushes a word: high byte at sp-1, low byte at sp-2
    pub fn push16(&mut self, mmu: &mut MMU, data: u16) {
        let sp = self.regs.sp.wrapping_sub(2);
        self.regs.sp = sp;
        if DEBUG_STACK {
            println!("[{:04X}] push16 {:04X} to {:04X}", self.regs.pc, data, sp);
        }
        mmu.write_u16(sp, data);
    }

    /// pops a word: low byte at sp, high byte at sp+1
    pub fn pop16(&mut self, mmu: &MMU) -> u16 {
        let sp = self.regs.sp;
        let data = mmu.read_u16(sp);
        if DEBUG_STACK {
            println!("[{:04X}] pop16 {:04X} from {:04X}", self.regs.pc, data, sp);
        }
        self.regs.sp = sp.wrapping_add(2);
        data
    }

    /// adds `src` plus carry-in to A. carry comes from the 9-bit sum,
    /// sign/zero/parity from the stored byte.
    pub fn add8(&mut self, src: usize, carry_in: usize) {
        let a = self.regs.get_r8(R::A) as usize;
        let res = a + src + carry_in;

        self.regs.flags.set_carry_u8(res);
        self.regs.flags.set_szp_u8(res);
        self.regs.set_r8(R::A, res as u8);
    }

    /// subtracts `src` plus borrow-in from A. carry is the borrow flag.
    pub fn sub8(&mut self, src: usize, borrow_in: usize) {
        let a = self.regs.get_r8(R::A) as usize;
        let res = (Wrapping(a) - Wrapping(src) - Wrapping(borrow_in)).0;

        self.regs.flags.carry = a < src + borrow_in;
        self.regs.flags.set_szp_u8(res);
        self.regs.set_r8(R::A, res as u8);
    }

    /// compares `src` against A, keeping only the flag effects
    pub fn cmp8(&mut self, src: usize) {
        let a = self.regs.get_r8(R::A) as usize;
        let res = (Wrapping(a) - Wrapping(src)).0;

        self.regs.flags.carry = a < src;
        self.regs.flags.set_szp_u8(res);
    }

    /// ands `src` into A, clearing carry
    pub fn and8(&mut self, src: u8) {
        let res = self.regs.get_r8(R::A) & src;
        self.regs.flags.carry = false;
        self.regs.flags.set_szp_u8(res as usize);
        self.regs.set_r8(R::A, res);
    }

    /// xors `src` into A, clearing carry
    pub fn xor8(&mut self, src: u8) {
        let res = self.regs.get_r8(R::A) ^ src;
        self.regs.flags.carry = false;
        self.regs.flags.set_szp_u8(res as usize);
        self.regs.set_r8(R::A, res);
    }

    /// ors `src` into A, clearing carry
    pub fn or8(&mut self, src: u8) {
        let res = self.regs.get_r8(R::A) | src;
        self.regs.flags.carry = false;
        self.regs.flags.set_szp_u8(res as usize);
        self.regs.set_r8(R::A, res);
    }
}
