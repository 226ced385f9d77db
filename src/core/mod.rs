// License below.
//! The simulator: owns architectural state and memory, and drives the
//! fetch-decode-execute cycle.
#![warn(missing_docs)]

pub mod cpu;
pub mod memory;

use std::path::Path;

use log::{debug, warn};

use self::cpu::exec::{self, PcAction};
use self::cpu::instruction::{self, DecodedInstruction};
use self::cpu::CpuState;
use self::memory::Memory;
use crate::error::SimError;

/// Default base address an instruction image is loaded at when the CLI
/// does not override it.
pub const DEFAULT_BASE: u64 = 0x1000;

/// Owns the two architectural state snapshots, memory, and the run flag;
/// `process_instruction` is the sole entry point into the core per cycle.
pub struct Simulator {
    current: CpuState,
    memory: Memory,
    /// Cleared by `HLT`; the shell polls this between cycles.
    pub run_bit: bool,
}

impl Simulator {
    /// Creates a simulator with PC at `DEFAULT_BASE`, all registers zero,
    /// and empty memory.
    pub fn new() -> Simulator {
        Simulator { current: CpuState::new(DEFAULT_BASE), memory: Memory::new(), run_bit: true }
    }

    /// Loads a memory image file at `base`, and sets the initial PC there.
    pub fn load_image(&mut self, path: &Path, base: u64) -> Result<(), SimError> {
        self.memory.load_image_file(path, base)?;
        self.current.pc = base;
        Ok(())
    }

    /// The currently committed architectural state.
    pub fn state(&self) -> &CpuState {
        &self.current
    }

    /// Read-only access to simulated memory, for REPL memory dumps.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Decodes the instruction at the current PC without executing it, for
    /// the `--dasm`-style oneshot CLI command and the REPL's preview line.
    pub fn peek_next_instruction(&self) -> DecodedInstruction {
        instruction::decode(self.memory.read_32(self.current.pc))
    }

    /// Advances the simulator by one instruction: fetch, decode, execute,
    /// commit. Returns the instruction that was fetched (decoded, even if
    /// invalid) for diagnostics.
    ///
    /// An unrecognized instruction is a soft error: it is logged and the PC
    /// simply advances by 4, rather than stopping the run or propagating a
    /// `Result`. `HLT` is the only way a cycle clears `run_bit`.
    pub fn process_instruction(&mut self) -> DecodedInstruction {
        let raw = self.memory.read_32(self.current.pc);
        let inst = instruction::decode(raw);
        let mut next = self.current.clone();

        if !inst.valid {
            warn!("unrecognized instruction 0x{:08x} at PC 0x{:x}", raw, self.current.pc);
            next.pc = self.current.pc.wrapping_add(4);
        } else {
            match exec::execute(&inst, &mut next, &mut self.memory) {
                PcAction::Advance => next.pc = self.current.pc.wrapping_add(4),
                PcAction::Rel(offset) => next.pc = self.current.pc.wrapping_add(offset as u64),
                PcAction::Abs(addr) => next.pc = addr,
                PcAction::Halt => {
                    self.run_bit = false;
                    debug!("HLT at PC 0x{:x}", self.current.pc);
                }
            }
        }

        next.clamp_zero_register();
        self.current = next;
        inst
    }

    /// Runs cycles until `run_bit` clears, or forever if `limit` is `None`.
    pub fn run(&mut self, limit: Option<usize>) {
        let mut count = 0;
        while self.run_bit {
            self.process_instruction();
            count += 1;
            if let Some(limit) = limit {
                if count >= limit {
                    break;
                }
            }
        }
    }
}

impl Default for Simulator {
    fn default() -> Simulator {
        Simulator::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn xzr_is_zero_after_every_cycle() {
        let mut sim = Simulator::new();
        sim.memory.load_words(DEFAULT_BASE, &[0xD280_03FF]); // movz xzr, #31
        sim.process_instruction();
        assert_eq!(sim.state().reg(31), 0);
    }

    #[test]
    fn unrecognized_instruction_advances_without_halting() {
        let mut sim = Simulator::new();
        sim.memory.load_words(DEFAULT_BASE, &[0xFFFF_FFFF]);
        sim.process_instruction();
        assert_eq!(sim.state().pc, DEFAULT_BASE + 4);
        assert!(sim.run_bit);
    }

    #[test]
    fn hlt_clears_run_bit_and_run_stops() {
        let mut sim = Simulator::new();
        sim.memory.load_words(DEFAULT_BASE, &[0xD440_0000]);
        sim.run(Some(10));
        assert!(!sim.run_bit);
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
