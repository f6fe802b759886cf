use crate::memory::MMU;

#[test]
fn reads_words_little_endian() {
    let mut mmu = MMU::default();
    mmu.write_u8(0x2400, 0x34);
    mmu.write_u8(0x2401, 0x12);
    assert_eq!(0x1234, mmu.read_u16(0x2400));

    mmu.write_u16(0x2500, 0xABCD);
    assert_eq!(0xCD, mmu.read_u8(0x2500));
    assert_eq!(0xAB, mmu.read_u8(0x2501));
}

#[test]
fn word_access_wraps_at_top_of_memory() {
    let mut mmu = MMU::default();
    mmu.write_u16(0xFFFF, 0x1234);
    assert_eq!(0x34, mmu.read_u8(0xFFFF));
    assert_eq!(0x12, mmu.read_u8(0x0000));
    assert_eq!(0x1234, mmu.read_u16(0xFFFF));
}

#[test]
fn block_write_wraps() {
    let mut mmu = MMU::default();
    mmu.write(0xFFFE, &[0x11, 0x22, 0x33]);
    assert_eq!(vec![0x11, 0x22, 0x33], mmu.read(0xFFFE, 3));
    assert_eq!(0x33, mmu.read_u8(0x0000));
}

#[test]
fn reads_dollar_terminated_text() {
    let mut mmu = MMU::default();
    mmu.write(0x0200, b" CPU HAS FAILED!$");
    assert_eq!(" CPU HAS FAILED!", mmu.read_asciid(0x0200));
}
