use crate::cpu::instruction::{Instruction, InstructionInfo, Parameter, instruction_info_to_str};
use crate::cpu::op::{Op, op_cycles};
use crate::cpu::register::{R, RP};
use crate::memory::MMU;

/// if enabled, prints decoded instructions each time they are being decoded
const DEBUG_DECODER: bool = false;

#[cfg(test)]
#[path = "./decoder_test.rs"]
mod decoder_test;

#[derive(Clone, Default)]
pub struct Decoder {}

impl Decoder {
    /// decodes the opcode at `offset` into a Instruction
    pub fn get_instruction(&self, mmu: &MMU, offset: u16) -> Instruction {
        let b = mmu.read_u8(offset);
        let d8 = || Parameter::Imm8(mmu.read_u8(offset.wrapping_add(1)));
        let d16 = || Parameter::Imm16(mmu.read_u16(offset.wrapping_add(1)));

        let (command, params) = match b {
            0x00 => (Op::Nop, Parameter::None),
            0x01 => (Op::Lxi(RP::BC), d16()),
            0x02 => (Op::Stax(RP::BC), Parameter::None),
            0x03 => (Op::Inx(RP::BC), Parameter::None),
            0x04 => (Op::Inr(R::B), Parameter::None),
            0x05 => (Op::Dcr(R::B), Parameter::None),
            0x06 => (Op::Mvi(R::B), d8()),
            0x07 => (Op::Rlc, Parameter::None),
            0x09 => (Op::Dad(RP::BC), Parameter::None),
            0x0A => (Op::Ldax(RP::BC), Parameter::None),
            0x0B => (Op::Dcx(RP::BC), Parameter::None),
            0x0C => (Op::Inr(R::C), Parameter::None),
            0x0D => (Op::Dcr(R::C), Parameter::None),
            0x0E => (Op::Mvi(R::C), d8()),
            0x0F => (Op::Rrc, Parameter::None),

            0x11 => (Op::Lxi(RP::DE), d16()),
            0x12 => (Op::Stax(RP::DE), Parameter::None),
            0x13 => (Op::Inx(RP::DE), Parameter::None),
            0x14 => (Op::Inr(R::D), Parameter::None),
            0x15 => (Op::Dcr(R::D), Parameter::None),
            0x16 => (Op::Mvi(R::D), d8()),
            0x17 => (Op::Ral, Parameter::None),
            0x19 => (Op::Dad(RP::DE), Parameter::None),
            0x1A => (Op::Ldax(RP::DE), Parameter::None),
            0x1B => (Op::Dcx(RP::DE), Parameter::None),
            0x1C => (Op::Inr(R::E), Parameter::None),
            0x1D => (Op::Dcr(R::E), Parameter::None),
            0x1E => (Op::Mvi(R::E), d8()),
            0x1F => (Op::Rar, Parameter::None),

            0x21 => (Op::Lxi(RP::HL), d16()),
            0x22 => (Op::Shld, d16()),
            0x23 => (Op::Inx(RP::HL), Parameter::None),
            0x24 => (Op::Inr(R::H), Parameter::None),
            0x25 => (Op::Dcr(R::H), Parameter::None),
            0x26 => (Op::Mvi(R::H), d8()),
            0x29 => (Op::Dad(RP::HL), Parameter::None),
            0x2A => (Op::Lhld, d16()),
            0x2B => (Op::Dcx(RP::HL), Parameter::None),
            0x2C => (Op::Inr(R::L), Parameter::None),
            0x2D => (Op::Dcr(R::L), Parameter::None),
            0x2E => (Op::Mvi(R::L), d8()),
            0x2F => (Op::Cma, Parameter::None),

            0x31 => (Op::Lxi(RP::SP), d16()),
            0x32 => (Op::Sta, d16()),
            0x33 => (Op::Inx(RP::SP), Parameter::None),
            0x34 => (Op::Inr(R::M), Parameter::None),
            0x35 => (Op::Dcr(R::M), Parameter::None),
            0x36 => (Op::Mvi(R::M), d8()),
            0x37 => (Op::Stc, Parameter::None),
            0x39 => (Op::Dad(RP::SP), Parameter::None),
            0x3A => (Op::Lda, d16()),
            0x3B => (Op::Dcx(RP::SP), Parameter::None),
            0x3C => (Op::Inr(R::A), Parameter::None),
            0x3D => (Op::Dcr(R::A), Parameter::None),
            0x3E => (Op::Mvi(R::A), d8()),
            0x3F => (Op::Cmc, Parameter::None),

            // 0x76 would be HLT, outside this machine's instruction set
            0x76 => (Op::Invalid(b), Parameter::None),
            0x40..=0x7F => (Op::Mov(R::from(b >> 3), R::from(b)), Parameter::None),

            0x80..=0x87 => (Op::Add(R::from(b)), Parameter::None),
            0x88..=0x8F => (Op::Adc(R::from(b)), Parameter::None),
            0x90..=0x97 => (Op::Sub(R::from(b)), Parameter::None),
            0x98..=0x9F => (Op::Sbb(R::from(b)), Parameter::None),
            0xA0..=0xA7 => (Op::Ana(R::from(b)), Parameter::None),
            0xA8..=0xAF => (Op::Xra(R::from(b)), Parameter::None),
            0xB0..=0xB7 => (Op::Ora(R::from(b)), Parameter::None),
            0xB8..=0xBF => (Op::Cmp(R::from(b)), Parameter::None),

            0xC0 => (Op::Rnz, Parameter::None),
            0xC1 => (Op::Pop(RP::BC), Parameter::None),
            0xC2 => (Op::Jnz, d16()),
            0xC3 => (Op::Jmp, d16()),
            0xC4 => (Op::Cnz, d16()),
            0xC5 => (Op::Push(RP::BC), Parameter::None),
            0xC6 => (Op::Adi, d8()),
            0xC8 => (Op::Rz, Parameter::None),
            0xC9 => (Op::Ret, Parameter::None),
            0xCA => (Op::Jz, d16()),
            0xCC => (Op::Cz, d16()),
            0xCD => (Op::Call, d16()),
            0xCE => (Op::Aci, d8()),

            0xD0 => (Op::Rnc, Parameter::None),
            0xD1 => (Op::Pop(RP::DE), Parameter::None),
            0xD2 => (Op::Jnc, d16()),
            0xD3 => (Op::Out, d8()),
            0xD4 => (Op::Cnc, d16()),
            0xD5 => (Op::Push(RP::DE), Parameter::None),
            0xD6 => (Op::Sui, d8()),
            0xD8 => (Op::Rc, Parameter::None),
            0xDA => (Op::Jc, d16()),
            0xDB => (Op::In, d8()),
            0xDC => (Op::Cc, d16()),
            0xDE => (Op::Sbi, d8()),

            0xE0 => (Op::Rpo, Parameter::None),
            0xE1 => (Op::Pop(RP::HL), Parameter::None),
            0xE2 => (Op::Jpo, d16()),
            0xE3 => (Op::Xthl, Parameter::None),
            0xE4 => (Op::Cpo, d16()),
            0xE5 => (Op::Push(RP::HL), Parameter::None),
            0xE6 => (Op::Ani, d8()),
            0xE8 => (Op::Rpe, Parameter::None),
            0xE9 => (Op::Pchl, Parameter::None),
            0xEA => (Op::Jpe, d16()),
            0xEB => (Op::Xchg, Parameter::None),
            0xEC => (Op::Cpe, d16()),
            0xEE => (Op::Xri, d8()),

            0xF0 => (Op::Rp, Parameter::None),
            0xF1 => (Op::PopPsw, Parameter::None),
            0xF2 => (Op::Jp, d16()),
            0xF3 => (Op::Di, Parameter::None),
            0xF4 => (Op::Cp, d16()),
            0xF5 => (Op::PushPsw, Parameter::None),
            0xF6 => (Op::Ori, d8()),
            0xF8 => (Op::Rm, Parameter::None),
            0xF9 => (Op::Sphl, Parameter::None),
            0xFA => (Op::Jm, d16()),
            0xFB => (Op::Ei, Parameter::None),
            0xFC => (Op::Cm, d16()),
            0xFE => (Op::Cpi, d8()),

            // RST vectors, DAA and the unused 8080 encodings
            _ => (Op::Invalid(b), Parameter::None),
        };

        let length = 1 + params.len();
        let op = Instruction {
            command,
            params,
            length,
            cycles: op_cycles(b),
        };
        if DEBUG_DECODER {
            println!("get_instruction at {:04X}: {}", offset, op);
        }
        op
    }

    /// decodes the op at `offset` into a InstructionInfo
    pub fn get_instruction_info(&self, mmu: &MMU, offset: u16) -> InstructionInfo {
        let instr = self.get_instruction(mmu, offset);
        InstructionInfo {
            offset,
            bytes: mmu.read(offset, instr.length as usize),
            instruction: instr,
        }
    }

    /// decodes `n` instructions starting at `offset`
    pub fn decode_to_block(&self, mmu: &MMU, offset: u16, n: usize) -> Vec<InstructionInfo> {
        let mut ops: Vec<InstructionInfo> = Vec::new();
        let mut inst_offset = 0;
        for _ in 0..n {
            let op = self.get_instruction_info(mmu, offset.wrapping_add(inst_offset));
            inst_offset = inst_offset.wrapping_add(u16::from(op.instruction.length));
            ops.push(op);
        }
        ops
    }

    pub fn disassemble_block_to_str(&self, mmu: &MMU, offset: u16, n: usize) -> String {
        let ops = self.decode_to_block(mmu, offset, n);
        instruction_info_to_str(&ops)
    }
}
