// License below.
//! Architectural state: the register file, program counter and flags.
use std::fmt;

/// Register index of the zero register. Reads always yield 0; writes are
/// permitted during a cycle but erased before the next fetch.
pub const XZR: usize = 31;

/// A snapshot of architectural state.
///
/// The cycle driver keeps two of these (`current` and `next`): the executor
/// reads `current` and writes `next`, and the driver promotes `next` to
/// `current` at the end of each cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuState {
    regs: [u64; 32],
    /// The program counter, the byte address of the next instruction.
    pub pc: u64,
    /// Set iff the last flag-setting operation's result was zero.
    pub flag_z: bool,
    /// Set iff the last flag-setting operation's result was negative.
    pub flag_n: bool,
}

impl CpuState {
    /// A fresh state: all registers zero, PC at `pc`, flags clear.
    pub fn new(pc: u64) -> CpuState {
        CpuState { regs: [0; 32], pc, flag_z: false, flag_n: false }
    }

    /// Reads register `r`. Register 31 (`XZR`) always reads as zero.
    pub fn reg(&self, r: usize) -> u64 {
        if r == XZR { 0 } else { self.regs[r] }
    }

    /// Writes register `r`. Writing `XZR` is permitted but has no lasting
    /// effect once the cycle driver re-zeroes it at end of cycle.
    pub fn set_reg(&mut self, r: usize, value: u64) {
        self.regs[r] = value;
    }

    /// Forces register 31 back to zero, restoring the architectural
    /// invariant after an executor that may have written through it.
    pub fn clamp_zero_register(&mut self) {
        self.regs[XZR] = 0;
    }

    /// Sets the Z and N flags from a signed 64-bit result, the convention
    /// shared by every flag-setting operation in this instruction set.
    pub fn set_flags_from(&mut self, result: i64) {
        self.flag_z = result == 0;
        self.flag_n = result < 0;
    }
}

impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "PC  = 0x{:016x}   Z={} N={}", self.pc, self.flag_z as u8, self.flag_n as u8)?;
        for row in 0..8 {
            for col in 0..4 {
                let r = row + col * 8;
                write!(f, "X{:<2}=0x{:016x} ", r, self.reg(r))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn xzr_always_reads_zero() {
        let mut s = CpuState::new(0);
        s.set_reg(XZR, 0xFFFF_FFFF_FFFF_FFFF);
        assert_eq!(s.reg(XZR), 0);
    }

    #[test]
    fn clamp_zero_register_erases_a_write() {
        let mut s = CpuState::new(0);
        s.set_reg(XZR, 42);
        s.clamp_zero_register();
        assert_eq!(s.reg(XZR), 0);
    }

    #[test]
    fn flags_follow_the_result_sign_and_zero_tests() {
        let mut s = CpuState::new(0);
        s.set_flags_from(0);
        assert!(s.flag_z && !s.flag_n);
        s.set_flags_from(-1);
        assert!(!s.flag_z && s.flag_n);
        s.set_flags_from(1);
        assert!(!s.flag_z && !s.flag_n);
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
