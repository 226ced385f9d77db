// License below.
//! Disassembly: renders a `DecodedInstruction` as a mnemonic line.
use std::fmt;

use super::{DecodedInstruction, Op};
use crate::core::cpu::condition::Condition;

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.valid {
            return write!(f, ".word 0x{:08x}  ; unrecognized", self.raw);
        }
        match self.op {
            Op::AddsImm => write!(f, "adds x{}, x{}, #{}{}", self.rd, self.rn, self.imm, lsl12(self.shift)),
            Op::SubsImm => write!(f, "subs x{}, x{}, #{}{}", self.rd, self.rn, self.imm, lsl12(self.shift)),
            Op::CmpImm => write!(f, "cmp x{}, #{}{}", self.rn, self.imm, lsl12(self.shift)),
            Op::AddImm => write!(f, "add x{}, x{}, #{}{}", self.rd, self.rn, self.imm, lsl12(self.shift)),
            Op::SubImm => write!(f, "sub x{}, x{}, #{}{}", self.rd, self.rn, self.imm, lsl12(self.shift)),
            Op::AddsExt => write!(f, "adds x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::SubsExt => write!(f, "subs x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::Cmp => write!(f, "cmp x{}, x{}", self.rn, self.rm),
            Op::Add => write!(f, "add x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::Sub => write!(f, "sub x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::Mul => write!(f, "mul x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::Ands => write!(f, "ands x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::Eor => write!(f, "eor x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::Orr => write!(f, "orr x{}, x{}, x{}", self.rd, self.rn, self.rm),
            Op::Lsl => write!(f, "lsl x{}, x{}, #{}", self.rd, self.rn, self.shift),
            Op::Lsr => write!(f, "lsr x{}, x{}, #{}", self.rd, self.rn, self.shift),
            Op::Movz => write!(f, "movz x{}, #{}{}", self.rd, self.imm, lsl_amount(self.shift)),
            Op::B => write!(f, "b {:+#x}", self.imm),
            Op::Br => write!(f, "br x{}", self.rn),
            Op::Bcond => match Condition::from_bits(self.cond) {
                Some(c) => write!(f, "b.{} {:+#x}", c, self.imm),
                None => write!(f, "b.?{} {:+#x}", self.cond, self.imm),
            },
            Op::Cbz => write!(f, "cbz x{}, {:+#x}", self.rt, self.imm),
            Op::Cbnz => write!(f, "cbnz x{}, {:+#x}", self.rt, self.imm),
            Op::Ldur => write!(f, "ldur x{}, [x{}, #{}]", self.rt, self.rn, self.imm),
            Op::Ldurb => write!(f, "ldurb w{}, [x{}, #{}]", self.rt, self.rn, self.imm),
            Op::Ldurh => write!(f, "ldurh w{}, [x{}, #{}]", self.rt, self.rn, self.imm),
            Op::Stur => write!(f, "stur x{}, [x{}, #{}]", self.rt, self.rn, self.imm),
            Op::Sturb => write!(f, "sturb w{}, [x{}, #{}]", self.rt, self.rn, self.imm),
            Op::Sturh => write!(f, "sturh w{}, [x{}, #{}]", self.rt, self.rn, self.imm),
            Op::Hlt => write!(f, "hlt #{}", self.imm),
        }
    }
}

fn lsl12(shift: u32) -> &'static str {
    if shift == 1 { ", lsl #12" } else { "" }
}

fn lsl_amount(shift: u32) -> String {
    if shift == 0 { String::new() } else { format!(", lsl #{}", shift) }
}

#[cfg(test)]
mod test {
    use super::super::decode;

    #[test]
    fn movz_disassembles_with_its_shift() {
        let i = decode(0xD2A0_00A1); // movz x1, #5, lsl #16
        assert_eq!(format!("{}", i), "movz x1, #5, lsl #16");
    }

    #[test]
    fn invalid_word_disassembles_as_a_data_directive() {
        let i = decode(0x0000_0000);
        assert_eq!(format!("{}", i), ".word 0x00000000  ; unrecognized");
    }
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
