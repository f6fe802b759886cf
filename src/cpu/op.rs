use crate::cpu::register::{R, RP};

/// one decoded 8080 operation
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Nop,

    /// load 16-bit immediate into a register pair
    Lxi(RP),

    /// store A through BC or DE
    Stax(RP),

    /// load A through BC or DE
    Ldax(RP),

    /// increment pair, no flags
    Inx(RP),

    /// decrement pair, no flags
    Dcx(RP),

    /// 16-bit add of a pair into HL, carry on 17-bit overflow
    Dad(RP),

    Inr(R),
    Dcr(R),

    /// load 8-bit immediate into register or M
    Mvi(R),

    /// rotate A left, bit 7 into carry and bit 0
    Rlc,

    /// rotate A right, bit 0 into carry and bit 7
    Rrc,

    /// rotate A left through carry
    Ral,

    /// rotate A right through carry
    Rar,

    /// store HL at a 16-bit address
    Shld,

    /// load HL from a 16-bit address
    Lhld,

    Sta,
    Lda,

    /// complement A, no flags
    Cma,

    /// set carry
    Stc,

    /// complement carry
    Cmc,

    Mov(R, R),

    Add(R),
    Adc(R),
    Sub(R),
    Sbb(R),
    Ana(R),
    Xra(R),
    Ora(R),

    /// compare register or M against A, result discarded
    Cmp(R),

    Adi,
    Aci,
    Sui,
    Sbi,
    Ani,
    Xri,
    Ori,

    /// compare immediate against A, result discarded
    Cpi,

    Rnz, Rz, Rnc, Rc, Rpo, Rpe, Rp, Rm,
    Ret,

    Jnz, Jz, Jnc, Jc, Jpo, Jpe, Jp, Jm,
    Jmp,

    Cnz, Cz, Cnc, Cc, Cpo, Cpe, Cp, Cm,
    Call,

    Push(RP),
    Pop(RP),

    /// push A and the packed flag byte
    PushPsw,

    /// pop A and the packed flag byte
    PopPsw,

    /// exchange HL with the word at the top of the stack
    Xthl,

    /// exchange DE with HL
    Xchg,

    Sphl,
    Pchl,

    /// read a port into A
    In,

    /// write A to a port
    Out,

    /// raise the interrupt-enable latch
    Ei,

    /// clear the interrupt-enable latch
    Di,

    /// a byte with no decoding on this machine
    Invalid(u8),
}

/// canonical 8080 state counts per opcode, from the Intel data sheet.
/// conditional CALL and RET are listed at their not-taken cost, a taken
/// one costs 6 more.
static OPCODE_CYCLES: [usize; 256] = [
    4, 10, 7,  5,  5,  5,  7,  4,  4, 10, 7,  5,  5,  5,  7,  4, // 0x00
    4, 10, 7,  5,  5,  5,  7,  4,  4, 10, 7,  5,  5,  5,  7,  4, // 0x10
    4, 10, 16, 5,  5,  5,  7,  4,  4, 10, 16, 5,  5,  5,  7,  4, // 0x20
    4, 10, 13, 5,  10, 10, 10, 4,  4, 10, 13, 5,  5,  5,  7,  4, // 0x30
    5, 5,  5,  5,  5,  5,  7,  5,  5, 5,  5,  5,  5,  5,  7,  5, // 0x40
    5, 5,  5,  5,  5,  5,  7,  5,  5, 5,  5,  5,  5,  5,  7,  5, // 0x50
    5, 5,  5,  5,  5,  5,  7,  5,  5, 5,  5,  5,  5,  5,  7,  5, // 0x60
    7, 7,  7,  7,  7,  7,  7,  7,  5, 5,  5,  5,  5,  5,  7,  5, // 0x70
    4, 4,  4,  4,  4,  4,  7,  4,  4, 4,  4,  4,  4,  4,  7,  4, // 0x80
    4, 4,  4,  4,  4,  4,  7,  4,  4, 4,  4,  4,  4,  4,  7,  4, // 0x90
    4, 4,  4,  4,  4,  4,  7,  4,  4, 4,  4,  4,  4,  4,  7,  4, // 0xA0
    4, 4,  4,  4,  4,  4,  7,  4,  4, 4,  4,  4,  4,  4,  7,  4, // 0xB0
    5, 10, 10, 10, 11, 11, 7,  11, 5, 10, 10, 10, 11, 17, 7,  11, // 0xC0
    5, 10, 10, 10, 11, 11, 7,  11, 5, 10, 10, 10, 11, 17, 7,  11, // 0xD0
    5, 10, 10, 18, 11, 11, 7,  11, 5, 5,  10, 4,  11, 17, 7,  11, // 0xE0
    5, 10, 10, 4,  11, 11, 7,  11, 5, 5,  10, 4,  11, 17, 7,  11, // 0xF0
];

/// the additional cost of a taken conditional CALL or RET
pub const BRANCH_TAKEN_CYCLES: usize = 6;

pub fn op_cycles(opcode: u8) -> usize {
    OPCODE_CYCLES[opcode as usize]
}
