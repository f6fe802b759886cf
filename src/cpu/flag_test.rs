use crate::cpu::Flags;

#[test]
fn psw_round_trips() {
    // packing then unpacking restores every flag combination
    for val in 0..0x20u16 {
        let mut flags = Flags::default();
        flags.set_u8(val as u8);
        assert_eq!(val as u8, flags.u8());
    }

    let mut flags = Flags::default();
    flags.zero = true;
    flags.carry = true;
    assert_eq!(0x09, flags.u8());
}

#[test]
fn parity_counts_ones_in_low_byte() {
    let mut flags = Flags::default();
    flags.set_parity(0x00); // zero ones
    assert_eq!(true, flags.parity);
    flags.set_parity(0x01); // one
    assert_eq!(false, flags.parity);
    flags.set_parity(0x4E); // four
    assert_eq!(true, flags.parity);
    flags.set_parity(0xFF); // eight
    assert_eq!(true, flags.parity);
    flags.set_parity(0x17F); // only the low byte counts
    assert_eq!(false, flags.parity);
}

#[test]
fn sign_and_zero_track_stored_byte() {
    let mut flags = Flags::default();
    flags.set_szp_u8(0x100); // 9-bit sum, stored byte is 0
    assert_eq!(true, flags.zero);
    assert_eq!(false, flags.sign);

    flags.set_szp_u8(0x80);
    assert_eq!(false, flags.zero);
    assert_eq!(true, flags.sign);
}
