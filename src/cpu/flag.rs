#[cfg(test)]
#[path = "./flag_test.rs"]
mod flag_test;

/// the 8080 condition flags. kept as separate booleans internally,
/// packed into the PSW byte only for PUSH PSW / POP PSW.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Flags {
    pub zero: bool,      // PSW bit 0: result was 0
    pub sign: bool,      // PSW bit 1: bit 7 of result
    pub parity: bool,    // PSW bit 2: even number of 1-bits in result
    pub carry: bool,     // PSW bit 3: carry / borrow out of bit 7
    pub auxiliary: bool, // PSW bit 4: carried through PSW only, never consulted
}

pub const FLAG_Z: u8 = 0x01;
pub const FLAG_S: u8 = 0x02;
pub const FLAG_P: u8 = 0x04;
pub const FLAG_C: u8 = 0x08;
pub const FLAG_AC: u8 = 0x10;

static PARITY_LOOKUP: [u8; 256] = [
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P,
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P,
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0,
    FLAG_P, 0, 0, FLAG_P, 0, FLAG_P, FLAG_P, 0, 0, FLAG_P, FLAG_P, 0, FLAG_P, 0, 0, FLAG_P
];

impl Flags {
    /// set equal to the most-significant bit of the result,
    /// the sign bit of a signed integer
    pub fn set_sign_u8(&mut self, v: usize) {
        self.sign = v & 0x80 != 0;
    }

    /// set if the low byte of the result is zero
    pub fn set_zero_u8(&mut self, v: usize) {
        self.zero = v & 0xFF == 0;
    }

    /// set if the low byte of the result contains an even number of 1 bits
    pub fn set_parity(&mut self, v: usize) {
        self.parity = PARITY_LOOKUP[v & 0xFF] != 0;
    }

    /// sets sign, zero and parity from an 8-bit result
    pub fn set_szp_u8(&mut self, v: usize) {
        self.set_sign_u8(v);
        self.set_zero_u8(v);
        self.set_parity(v);
    }

    /// set if an 8-bit addition carried out of bit 7
    pub fn set_carry_u8(&mut self, res: usize) {
        self.carry = res & 0x100 != 0;
    }

    /// set if a 16-bit addition carried out of bit 15 (used by DAD)
    pub fn set_carry_u16(&mut self, res: usize) {
        self.carry = res & 0x1_0000 != 0;
    }

    pub fn carry_val(&self) -> usize {
        if self.carry {
            1
        } else {
            0
        }
    }

    /// packs the flags into the PSW byte
    pub fn u8(&self) -> u8 {
        let mut val = 0 as u8;
        if self.zero {
            val |= FLAG_Z;
        }
        if self.sign {
            val |= FLAG_S;
        }
        if self.parity {
            val |= FLAG_P;
        }
        if self.carry {
            val |= FLAG_C;
        }
        if self.auxiliary {
            val |= FLAG_AC;
        }
        val
    }

    /// initializes the flags from a packed PSW byte
    pub fn set_u8(&mut self, val: u8) {
        self.zero      = val & FLAG_Z != 0;
        self.sign      = val & FLAG_S != 0;
        self.parity    = val & FLAG_P != 0;
        self.carry     = val & FLAG_C != 0;
        self.auxiliary = val & FLAG_AC != 0;
    }
}
