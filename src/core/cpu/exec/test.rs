use super::*;
use crate::core::cpu::instruction::decode;

fn run(words: &[u32], steps: usize) -> (CpuState, Memory) {
    let mut memory = Memory::new();
    memory.load_words(0x1000, words);
    let mut state = CpuState::new(0x1000);
    for _ in 0..steps {
        let raw = memory.read_32(state.pc);
        let inst = decode(raw);
        if !inst.valid {
            state.pc += 4;
            continue;
        }
        match execute(&inst, &mut state, &mut memory) {
            PcAction::Advance => state.pc = state.pc.wrapping_add(4),
            PcAction::Rel(off) => state.pc = state.pc.wrapping_add(off as u64),
            PcAction::Abs(addr) => state.pc = addr,
            PcAction::Halt => break,
        }
        state.clamp_zero_register();
    }
    (state, memory)
}

#[test]
fn scenario_a_arithmetic_and_flags() {
    let (s, _) = run(&[
        0xD280_00A1, // movz x1, #5
        0xD280_0062, // movz x2, #3
        0xEB02_0020, // subs x0, x1, x2
    ], 3);
    assert_eq!(s.reg(0), 2);
    assert_eq!(s.reg(1), 5);
    assert_eq!(s.reg(2), 3);
    assert!(!s.flag_z && !s.flag_n);
    assert_eq!(s.pc, 0x100C);
}

#[test]
fn scenario_b_conditional_branch_taken() {
    let (s, _) = run(&[
        0xD280_00E1, // movz x1, #7
        0xEB01_003F, // subs xzr, x1, x1  (cmp x1, x1)
        0x5400_0040, // b.eq +8
        0xD29D_D5A0, // movz x0, #0xDEAD (skipped)
        0xD280_0020, // movz x0, #1
    ], 4);
    assert_eq!(s.reg(0), 1);
    assert!(s.flag_z);
}

#[test]
fn scenario_c_memory_round_trip() {
    let mut memory = Memory::new();
    let mut state = CpuState::new(0x1000);
    state.set_reg(1, 0x100);
    state.set_reg(2, 0x1122_3344_5566_7788);

    let stur = decode(0xF800_0020 | (1 << 5) | 2); // stur x2, [x1, #0]
    execute(&stur, &mut state, &mut memory);
    assert_eq!(memory.read_32(0x100), 0x5566_7788);
    assert_eq!(memory.read_32(0x104), 0x1122_3344);

    let ldur = decode(0xF840_0020 | (1 << 5) | 3); // ldur x3, [x1, #0]
    execute(&ldur, &mut state, &mut memory);
    assert_eq!(state.reg(3), 0x1122_3344_5566_7788);
}

#[test]
fn scenario_d_byte_store_load_lane_selection() {
    let mut memory = Memory::new();
    let mut state = CpuState::new(0x1000);
    state.set_reg(1, 0x200);
    state.set_reg(2, 0xAB);

    // sturb w2, [x1, #3]
    let sturb = decode(0x3800_0000 | (3 << 12) | (1 << 5) | 2);
    execute(&sturb, &mut state, &mut memory);
    assert_eq!(memory.read_32(0x200), 0xAB00_0000);

    // ldurb w3, [x1, #3]
    let ldurb = decode(0x3840_0000 | (3 << 12) | (1 << 5) | 3);
    execute(&ldurb, &mut state, &mut memory);
    assert_eq!(state.reg(3), 0xAB);
}

#[test]
fn scenario_e_hlt_clears_run_bit() {
    let mut memory = Memory::new();
    memory.load_words(0x1000, &[0xD440_0000]);
    let mut state = CpuState::new(0x1000);
    let inst = decode(memory.read_32(state.pc));
    assert_eq!(execute(&inst, &mut state, &mut memory), PcAction::Halt);
}

#[test]
fn cbz_reads_rt_not_rd() {
    // cbz x5, +8  then if taken skip a movz
    let (s, _) = run(&[
        0x3400_0045, // cbz x5, +8   (x5 == 0, taken)
        0xD280_0020, // movz x0, #1 (skipped)
        0xD280_0040, // movz x0, #2 (target)
    ], 2);
    assert_eq!(s.reg(0), 2);
}

#[test]
fn lsl_by_zero_is_identity_and_lsl_63_leaves_only_bit_zero() {
    let mut state = CpuState::new(0);
    let mut memory = Memory::new();
    state.set_reg(1, 0xF0);

    // lsl x0, x1, #0  (immr=0, imms=63)
    let raw = 0xD340_0000 | (0 << 16) | (63 << 10) | (1 << 5) | 0;
    let i = decode(raw);
    execute(&i, &mut state, &mut memory);
    assert_eq!(state.reg(0), 0xF0);

    state.set_reg(1, 1);
    // lsl x0, x1, #63  (immr=1, imms=0)
    let raw = 0xD340_0000 | (1 << 16) | (0 << 10) | (1 << 5) | 0;
    let i = decode(raw);
    execute(&i, &mut state, &mut memory);
    assert_eq!(state.reg(0), 1u64 << 63);
}

#[test]
fn ldurb_from_address_with_low_bits_set_reads_the_correct_lane() {
    let mut state = CpuState::new(0);
    let mut memory = Memory::new();
    memory.write_32(0x40, 0x11_22_33_44);
    state.set_reg(1, 0x43); // low two bits = 3

    let ldurb = decode(0x3840_0000 | (1 << 5) | 2); // ldurb w2, [x1, #0]
    execute(&ldurb, &mut state, &mut memory);
    assert_eq!(state.reg(2), 0x11);
}
