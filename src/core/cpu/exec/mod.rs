// License below.
//! Executes a decoded instruction against architectural state and memory.
#![warn(missing_docs)]

#[cfg(test)]
mod test;

use crate::core::cpu::condition;
use crate::core::cpu::instruction::{DecodedInstruction, Op};
use crate::core::cpu::state::{CpuState, XZR};
use crate::core::memory::Memory;

/// What the cycle driver should do to the program counter after an
/// instruction executes.
///
/// Directly analogous to a "did the pipeline flush" flag in a classic
/// sequential CPU model: everything that isn't a taken branch advances by
/// one instruction width, and the handful of forms that redirect control
/// flow say so explicitly instead of the driver having to infer it from
/// the operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcAction {
    /// `PC += 4`.
    Advance,
    /// `PC += offset` (a signed byte offset, already scaled by the
    /// instruction's own encoding).
    Rel(i64),
    /// `PC = addr`, used only by `BR`.
    Abs(u64),
    /// Stop simulation; the cycle driver clears `RUN_BIT`.
    Halt,
}

/// Applies `inst` to `state`, reading and writing `memory` as needed, and
/// returns the PC directive for the cycle driver to apply.
///
/// `state` is mutated in place to become the post-instruction `NEXT_STATE`;
/// callers pass in a clone of `CURRENT_STATE` rather than the live snapshot,
/// matching the data flow `CURRENT_STATE → decode → execute → NEXT_STATE`.
pub fn execute(inst: &DecodedInstruction, state: &mut CpuState, memory: &mut Memory) -> PcAction {
    match inst.op {
        Op::AddsImm => { flagged(state, inst.rd, add(state.reg(inst.rn as usize), imm_operand(inst))); PcAction::Advance }
        Op::SubsImm => { flagged(state, inst.rd, sub(state.reg(inst.rn as usize), imm_operand(inst))); PcAction::Advance }
        Op::CmpImm => { flagged(state, XZR as u8, sub(state.reg(inst.rn as usize), imm_operand(inst))); PcAction::Advance }
        Op::AddImm => { state.set_reg(inst.rd as usize, add(state.reg(inst.rn as usize), imm_operand(inst))); PcAction::Advance }
        Op::SubImm => { state.set_reg(inst.rd as usize, sub(state.reg(inst.rn as usize), imm_operand(inst))); PcAction::Advance }

        Op::AddsExt => { flagged(state, inst.rd, add(state.reg(inst.rn as usize), state.reg(inst.rm as usize))); PcAction::Advance }
        Op::SubsExt => { flagged(state, inst.rd, sub(state.reg(inst.rn as usize), state.reg(inst.rm as usize))); PcAction::Advance }
        Op::Cmp => { flagged(state, XZR as u8, sub(state.reg(inst.rn as usize), state.reg(inst.rm as usize))); PcAction::Advance }
        Op::Add => { state.set_reg(inst.rd as usize, add(state.reg(inst.rn as usize), state.reg(inst.rm as usize))); PcAction::Advance }
        Op::Sub => { state.set_reg(inst.rd as usize, sub(state.reg(inst.rn as usize), state.reg(inst.rm as usize))); PcAction::Advance }
        Op::Mul => { state.set_reg(inst.rd as usize, state.reg(inst.rn as usize).wrapping_mul(state.reg(inst.rm as usize))); PcAction::Advance }

        Op::Ands => { flagged(state, inst.rd, state.reg(inst.rn as usize) & state.reg(inst.rm as usize)); PcAction::Advance }
        Op::Eor => { state.set_reg(inst.rd as usize, state.reg(inst.rn as usize) ^ state.reg(inst.rm as usize)); PcAction::Advance }
        Op::Orr => { state.set_reg(inst.rd as usize, state.reg(inst.rn as usize) | state.reg(inst.rm as usize)); PcAction::Advance }

        Op::Lsl => { state.set_reg(inst.rd as usize, state.reg(inst.rn as usize) << (inst.shift & 0x3F)); PcAction::Advance }
        Op::Lsr => { state.set_reg(inst.rd as usize, state.reg(inst.rn as usize) >> (inst.shift & 0x3F)); PcAction::Advance }

        Op::Movz => { state.set_reg(inst.rd as usize, (inst.imm as u64) << inst.shift); PcAction::Advance }

        Op::B => PcAction::Rel(inst.imm),
        Op::Br => PcAction::Abs(state.reg(inst.rn as usize)),
        Op::Bcond => {
            if condition::check_raw(inst.cond, state.flag_z, state.flag_n) { PcAction::Rel(inst.imm) } else { PcAction::Advance }
        }
        Op::Cbz => if state.reg(inst.rt as usize) == 0 { PcAction::Rel(inst.imm) } else { PcAction::Advance },
        Op::Cbnz => if state.reg(inst.rt as usize) != 0 { PcAction::Rel(inst.imm) } else { PcAction::Advance },

        Op::Ldur => {
            let addr = effective_address(state, inst);
            let low = memory.read_32(addr) as u64;
            let high = memory.read_32(addr.wrapping_add(4)) as u64;
            state.set_reg(inst.rt as usize, (high << 32) | low);
            PcAction::Advance
        }
        Op::Ldurb => {
            let addr = effective_address(state, inst);
            let lane = (addr & 0b11) * 8;
            let value = (memory.read_32(addr) >> lane) & 0xFF;
            state.set_reg(inst.rt as usize, value as u64);
            PcAction::Advance
        }
        Op::Ldurh => {
            let addr = effective_address(state, inst);
            let lane = (addr & 0b11) * 8;
            let value = (memory.read_32(addr) >> lane) & 0xFFFF;
            state.set_reg(inst.rt as usize, value as u64);
            PcAction::Advance
        }
        Op::Stur => {
            let addr = effective_address(state, inst);
            let value = state.reg(inst.rt as usize);
            memory.write_32(addr, value as u32);
            memory.write_32(addr.wrapping_add(4), (value >> 32) as u32);
            PcAction::Advance
        }
        Op::Sturb => { splice_store(memory, effective_address(state, inst), state.reg(inst.rt as usize), 0xFF); PcAction::Advance }
        Op::Sturh => { splice_store(memory, effective_address(state, inst), state.reg(inst.rt as usize), 0xFFFF); PcAction::Advance }

        Op::Hlt => PcAction::Halt,
    }
}

fn imm_operand(inst: &DecodedInstruction) -> u64 {
    if inst.shift == 1 { (inst.imm as u64) << 12 } else { inst.imm as u64 }
}

fn add(a: u64, b: u64) -> u64 { a.wrapping_add(b) }
fn sub(a: u64, b: u64) -> u64 { a.wrapping_sub(b) }

/// Writes `result` to `rd` and derives Z/N from it, read as a signed
/// 64-bit value — the one flag-setting convention every `*S` form shares.
fn flagged(state: &mut CpuState, rd: u8, result: u64) {
    state.set_reg(rd as usize, result);
    state.set_flags_from(result as i64);
}

fn effective_address(state: &CpuState, inst: &DecodedInstruction) -> u64 {
    state.reg(inst.rn as usize).wrapping_add(inst.imm as u64)
}

/// Read-modify-write of the containing word for sub-word stores: reads the
/// 4-byte-aligned word at `addr`, clears the byte lane selected by `addr`'s
/// low two bits, and splices in the low bits of `value` under `width_mask`.
fn splice_store(memory: &mut Memory, addr: u64, value: u64, width_mask: u32) {
    let lane = ((addr & 0b11) * 8) as u32;
    let aligned = addr & !0b11;
    let mut word = memory.read_32(aligned);
    word &= !(width_mask << lane);
    word |= ((value as u32) & width_mask) << lane;
    memory.write_32(aligned, word);
}

/*
Licensed to the Apache Software Foundation (ASF) under one
or more contributor license agreements.  See the NOTICE file
distributed with this work for additional information
regarding copyright ownership.  The ASF licenses this file
to you under the Apache License, Version 2.0 (the
"License"); you may not use this file except in compliance
with the License.  You may obtain a copy of the License at

  http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing,
software distributed under the License is distributed on an
"AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
KIND, either express or implied.  See the License for the
specific language governing permissions and limitations
under the License.
*/
