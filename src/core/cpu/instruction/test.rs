use super::*;

#[test]
fn movz_extracts_register_immediate_and_shift() {
    let i = decode(0xD2A0_00A1); // movz x1, #5, lsl #16
    assert!(i.valid);
    assert_eq!(i.op, Op::Movz);
    assert_eq!(i.rd, 1);
    assert_eq!(i.imm, 5);
    assert_eq!(i.shift, 16);
}

#[test]
fn cmp_alias_is_distinguished_from_subs_ext_by_rd_field() {
    // subs xzr, x1, x2  ==  cmp x1, x2
    let i = decode(0xEB02_003F);
    assert_eq!(i.op, Op::Cmp);
    assert_eq!(i.rd, 31);
    assert_eq!(i.rn, 1);
    assert_eq!(i.rm, 2);

    // subs x0, x1, x2 (Rd = 0, not an alias)
    let j = decode(0xEB02_0020);
    assert_eq!(j.op, Op::SubsExt);
    assert_eq!(j.rd, 0);
}

#[test]
fn cbz_reads_the_tested_register_as_rt_not_rd() {
    // cbz x3, +8
    let i = decode(0x3400_0043);
    assert_eq!(i.op, Op::Cbz);
    assert_eq!(i.rt, 3);
    assert_eq!(i.imm, 8);
}

#[test]
fn branch_immediate_sign_extends_and_scales_by_four() {
    // b -4  (imm26 = -1 as a 26-bit field)
    let i = decode(0x1400_0000 | 0x03FF_FFFF);
    assert_eq!(i.op, Op::B);
    assert_eq!(i.imm, -4);
}

#[test]
fn lsl_and_lsr_share_a_pattern_and_split_on_imms() {
    // lsl x0, x1, #4  =>  immr = 60, imms = 59 (63 - 4)
    let immr = 60u32;
    let imms = 59u32;
    let raw = 0xD340_0000 | (immr << 16) | (imms << 10) | (1 << 5) | 0;
    let i = decode(raw);
    assert_eq!(i.op, Op::Lsl);
    assert_eq!(i.shift, 4);

    // lsr x0, x1, #4  =>  immr = 4, imms = 63
    let raw = 0xD340_0000 | (4 << 16) | (63 << 10) | (1 << 5) | 0;
    let i = decode(raw);
    assert_eq!(i.op, Op::Lsr);
    assert_eq!(i.shift, 4);
}

#[test]
fn ldstur_sign_extends_the_nine_bit_offset() {
    // stur x1, [x2, #-8]   imm9 = 0x1F8 (-8 as 9-bit two's complement)
    let raw = 0xF800_0000 | (0x1F8 << 12) | (2 << 5) | 1;
    let i = decode(raw);
    assert_eq!(i.op, Op::Stur);
    assert_eq!(i.rt, 1);
    assert_eq!(i.rn, 2);
    assert_eq!(i.imm, -8);
}

#[test]
fn hlt_decodes_with_its_immediate_comment_field() {
    let i = decode(0xD440_0000);
    assert!(i.valid);
    assert_eq!(i.op, Op::Hlt);
}

#[test]
fn unrecognized_word_is_reported_without_failing() {
    let i = decode(0xFFFF_FFFF);
    assert!(!i.valid);
}

#[test]
fn decode_is_a_pure_total_function() {
    let a = decode(0xD2A0_00A1);
    let b = decode(0xD2A0_00A1);
    assert_eq!(a, b);
}
