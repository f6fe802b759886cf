use crate::cpu::{R, RP, RegisterState};

#[test]
fn pairs_compose_high_low() {
    let mut regs = RegisterState::default();
    regs.set_r8(R::B, 0x12);
    regs.set_r8(R::C, 0x34);
    assert_eq!(0x1234, regs.get_rp(RP::BC));

    regs.set_rp(RP::DE, 0xABCD);
    assert_eq!(0xAB, regs.get_r8(R::D));
    assert_eq!(0xCD, regs.get_r8(R::E));

    regs.set_rp(RP::SP, 0x2400);
    assert_eq!(0x2400, regs.sp);
}

#[test]
fn decodes_register_fields() {
    assert_eq!(R::B, R::from(0));
    assert_eq!(R::M, R::from(6));
    assert_eq!(R::A, R::from(7));
    // only the low 3 bits matter
    assert_eq!(R::C, R::from(0b1111_1001));
}
