use std::fmt;

use crate::cpu::op::Op;

/// immediate operand bytes following an opcode
#[derive(Clone, Debug, PartialEq)]
pub enum Parameter {
    None,
    Imm8(u8),
    Imm16(u16),
}

impl Parameter {
    pub fn len(&self) -> u8 {
        match *self {
            Parameter::None => 0,
            Parameter::Imm8(_) => 1,
            Parameter::Imm16(_) => 2,
        }
    }

    pub fn imm8(&self) -> u8 {
        match *self {
            Parameter::Imm8(imm) => imm,
            _ => panic!("imm8 on parameter {:?}", self),
        }
    }

    pub fn imm16(&self) -> u16 {
        match *self {
            Parameter::Imm16(imm) => imm,
            _ => panic!("imm16 on parameter {:?}", self),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub command: Op,
    pub params: Parameter,
    pub length: u8,

    /// base state count, not counting taken conditional branches
    pub cycles: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.describe_instruction())
    }
}

impl Instruction {
    fn describe_instruction(&self) -> String {
        match &self.command {
            Op::Nop => "nop".to_string(),
            Op::Lxi(rp) => format!("lxi {},0x{:04X}", rp.as_str(), self.params.imm16()),
            Op::Stax(rp) => format!("stax {}", rp.as_str()),
            Op::Ldax(rp) => format!("ldax {}", rp.as_str()),
            Op::Inx(rp) => format!("inx {}", rp.as_str()),
            Op::Dcx(rp) => format!("dcx {}", rp.as_str()),
            Op::Dad(rp) => format!("dad {}", rp.as_str()),
            Op::Inr(r) => format!("inr {}", r.as_str()),
            Op::Dcr(r) => format!("dcr {}", r.as_str()),
            Op::Mvi(r) => format!("mvi {},0x{:02X}", r.as_str(), self.params.imm8()),
            Op::Rlc => "rlc".to_string(),
            Op::Rrc => "rrc".to_string(),
            Op::Ral => "ral".to_string(),
            Op::Rar => "rar".to_string(),
            Op::Shld => format!("shld 0x{:04X}", self.params.imm16()),
            Op::Lhld => format!("lhld 0x{:04X}", self.params.imm16()),
            Op::Sta => format!("sta 0x{:04X}", self.params.imm16()),
            Op::Lda => format!("lda 0x{:04X}", self.params.imm16()),
            Op::Cma => "cma".to_string(),
            Op::Stc => "stc".to_string(),
            Op::Cmc => "cmc".to_string(),
            Op::Mov(dst, src) => format!("mov {},{}", dst.as_str(), src.as_str()),
            Op::Add(r) => format!("add {}", r.as_str()),
            Op::Adc(r) => format!("adc {}", r.as_str()),
            Op::Sub(r) => format!("sub {}", r.as_str()),
            Op::Sbb(r) => format!("sbb {}", r.as_str()),
            Op::Ana(r) => format!("ana {}", r.as_str()),
            Op::Xra(r) => format!("xra {}", r.as_str()),
            Op::Ora(r) => format!("ora {}", r.as_str()),
            Op::Cmp(r) => format!("cmp {}", r.as_str()),
            Op::Adi => format!("adi 0x{:02X}", self.params.imm8()),
            Op::Aci => format!("aci 0x{:02X}", self.params.imm8()),
            Op::Sui => format!("sui 0x{:02X}", self.params.imm8()),
            Op::Sbi => format!("sbi 0x{:02X}", self.params.imm8()),
            Op::Ani => format!("ani 0x{:02X}", self.params.imm8()),
            Op::Xri => format!("xri 0x{:02X}", self.params.imm8()),
            Op::Ori => format!("ori 0x{:02X}", self.params.imm8()),
            Op::Cpi => format!("cpi 0x{:02X}", self.params.imm8()),
            Op::Rnz => "rnz".to_string(),
            Op::Rz => "rz".to_string(),
            Op::Rnc => "rnc".to_string(),
            Op::Rc => "rc".to_string(),
            Op::Rpo => "rpo".to_string(),
            Op::Rpe => "rpe".to_string(),
            Op::Rp => "rp".to_string(),
            Op::Rm => "rm".to_string(),
            Op::Ret => "ret".to_string(),
            Op::Jnz => format!("jnz 0x{:04X}", self.params.imm16()),
            Op::Jz => format!("jz 0x{:04X}", self.params.imm16()),
            Op::Jnc => format!("jnc 0x{:04X}", self.params.imm16()),
            Op::Jc => format!("jc 0x{:04X}", self.params.imm16()),
            Op::Jpo => format!("jpo 0x{:04X}", self.params.imm16()),
            Op::Jpe => format!("jpe 0x{:04X}", self.params.imm16()),
            Op::Jp => format!("jp 0x{:04X}", self.params.imm16()),
            Op::Jm => format!("jm 0x{:04X}", self.params.imm16()),
            Op::Jmp => format!("jmp 0x{:04X}", self.params.imm16()),
            Op::Cnz => format!("cnz 0x{:04X}", self.params.imm16()),
            Op::Cz => format!("cz 0x{:04X}", self.params.imm16()),
            Op::Cnc => format!("cnc 0x{:04X}", self.params.imm16()),
            Op::Cc => format!("cc 0x{:04X}", self.params.imm16()),
            Op::Cpo => format!("cpo 0x{:04X}", self.params.imm16()),
            Op::Cpe => format!("cpe 0x{:04X}", self.params.imm16()),
            Op::Cp => format!("cp 0x{:04X}", self.params.imm16()),
            Op::Cm => format!("cm 0x{:04X}", self.params.imm16()),
            Op::Call => format!("call 0x{:04X}", self.params.imm16()),
            Op::Push(rp) => format!("push {}", rp.as_str()),
            Op::Pop(rp) => format!("pop {}", rp.as_str()),
            Op::PushPsw => "push psw".to_string(),
            Op::PopPsw => "pop psw".to_string(),
            Op::Xthl => "xthl".to_string(),
            Op::Xchg => "xchg".to_string(),
            Op::Sphl => "sphl".to_string(),
            Op::Pchl => "pchl".to_string(),
            Op::In => format!("in 0x{:02X}", self.params.imm8()),
            Op::Out => format!("out 0x{:02X}", self.params.imm8()),
            Op::Ei => "ei".to_string(),
            Op::Di => "di".to_string(),
            Op::Invalid(b) => format!("invalid 0x{:02X}", b),
        }
    }
}

/// a decoded instruction annotated with its position and raw bytes
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionInfo {
    pub offset: u16,
    pub bytes: Vec<u8>,
    pub instruction: Instruction,
}

impl fmt::Display for InstructionInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use std::fmt::Write as _;
        let mut hex = String::with_capacity(self.bytes.len() * 2);
        for b in &self.bytes {
            let _ = write!(hex, "{:02X}", b);
        }
        write!(f, "[{:04X}] {:<8} {}", self.offset, hex, self.instruction)
    }
}

pub fn instruction_info_to_str(ops: &[InstructionInfo]) -> String {
    let lines: Vec<String> = ops.iter().map(|op| op.to_string()).collect();
    lines.join("\n")
}
