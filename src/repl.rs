// License below.
//! An interactive read-step-print loop over a `Simulator`, highlighting
//! changed registers and flags after each step.
#![warn(missing_docs)]

use std::io;
use std::io::Write;
use std::str::SplitWhitespace;

use log::error;

use crate::core::Simulator;

/// Tracks the previous register/flag snapshot so the printer can highlight
/// what a step just changed.
struct StateDiff {
    regs: [u64; 32],
    flag_z: bool,
    flag_n: bool,
    changed: u32,
    flags_changed: bool,
}

impl StateDiff {
    fn new() -> StateDiff {
        StateDiff { regs: [0; 32], flag_z: false, flag_n: false, changed: 0, flags_changed: false }
    }

    fn diff(&mut self, sim: &Simulator) {
        self.changed = 0;
        let state = sim.state();
        for i in 0..32 {
            let v = state.reg(i);
            if self.regs[i] != v {
                self.changed |= 1 << i;
                self.regs[i] = v;
            }
        }
        self.flags_changed = self.flag_z != state.flag_z || self.flag_n != state.flag_n;
        self.flag_z = state.flag_z;
        self.flag_n = state.flag_n;
    }

    fn print(&self, terminal: &mut Box<term::StdoutTerminal>, sim: &Simulator, colour: bool) -> io::Result<()> {
        terminal.reset().ok();
        colourise_head(terminal, colour);
        write!(terminal, "# aarch64sim\n\t- Registers")?;
        terminal.reset().ok();

        write!(terminal, "\n\t\tPC: 0x{:016x}\tFlags: [", sim.state().pc)?;
        if self.flags_changed { colourise_diff(terminal, colour); } else { terminal.reset().ok(); }
        write!(terminal, "{}{}", if self.flag_z { 'Z' } else { 'z' }, if self.flag_n { 'N' } else { 'n' })?;
        terminal.reset().ok();
        writeln!(terminal, "]")?;

        for i in 0..32usize {
            if i % 4 == 0 {
                write!(terminal, "\n\t\t")?;
            }
            write!(terminal, "X{:<2}[", i)?;
            if 0 != (self.changed & (1 << i)) { colourise_diff(terminal, colour); } else { terminal.reset().ok(); }
            write!(terminal, "0x{:016x}", self.regs[i])?;
            terminal.reset().ok();
            write!(terminal, "]\t")?;
        }

        colourise_head(terminal, colour);
        write!(terminal, "\n\n\t- Pipeline")?;
        terminal.reset().ok();
        writeln!(terminal, "\n\t\tNext: {}\n", sim.peek_next_instruction())
    }
}

fn colourise_diff(terminal: &mut Box<term::StdoutTerminal>, colour: bool) {
    if colour {
        terminal.fg(term::color::BRIGHT_YELLOW).ok();
    }
}

fn colourise_head(terminal: &mut Box<term::StdoutTerminal>, colour: bool) {
    if colour {
        terminal.fg(term::color::BRIGHT_BLUE).ok();
    }
}

/// Runs a `Simulator` step by step from stdin, printing a register diff
/// after each step.
///
/// **R**ead, **E**val, **P**rint, **L**oop: it fetches a line, interprets
/// it as a command, and prints the resulting architectural state.
pub struct Repl {
    colour: bool,
}

impl Repl {
    /// Creates a new REPL without running it.
    pub fn new() -> Repl {
        Repl { colour: true }
    }

    /// Configures whether terminal output should be colourised.
    pub fn with_colour(mut self, c: bool) -> Repl {
        self.colour = c;
        self
    }

    /// Runs the REPL until the user quits or an I/O error occurs.
    pub fn run(&mut self, sim: &mut Simulator) {
        let mut terminal = match term::stdout() {
            Some(t) => t,
            None => {
                error!("no terminal available for the REPL");
                return;
            }
        };
        let mut diff = StateDiff::new();
        diff.diff(sim);
        diff.print(&mut terminal, sim, self.colour).ok();

        let mut input = String::new();
        loop {
            let mut tokens = match self.input_prompt(&mut terminal, &mut input) {
                Ok(t) => t,
                Err(e) => {
                    error!("{}", e);
                    break;
                }
            };

            match tokens.next() {
                Some("q") => break,
                Some("?") => self.print_help(&mut terminal),
                Some("hex") => self.dump_hex(&mut terminal, sim, tokens),
                Some("run") => {
                    let n: usize = tokens.next().and_then(|s| s.parse().ok()).unwrap_or(1);
                    for _ in 0..n {
                        if !sim.run_bit {
                            break;
                        }
                        sim.process_instruction();
                    }
                    diff.diff(sim);
                    diff.print(&mut terminal, sim, self.colour).ok();
                }
                None => {
                    if !sim.run_bit {
                        writeln!(terminal, "\t\t<halted>").ok();
                        continue;
                    }
                    sim.process_instruction();
                    diff.diff(sim);
                    diff.print(&mut terminal, sim, self.colour).ok();
                }
                _ => {
                    writeln!(terminal, "\t\t<What?>").ok();
                }
            }
        }
    }

    fn print_help(&self, terminal: &mut Box<term::StdoutTerminal>) {
        writeln!(terminal, "\t\t? = Help, q = Quit, hex A..B, run N, <enter> = single step").ok();
    }

    fn dump_hex(&self, terminal: &mut Box<term::StdoutTerminal>, sim: &Simulator, mut tokens: SplitWhitespace) {
        let range = tokens.next().unwrap_or("");
        let parts: Vec<&str> = range.splitn(2, "..").collect();
        if parts.len() != 2 {
            writeln!(terminal, "\t\tusage: hex A..B (hex addresses)").ok();
            return;
        }
        let (a, b) = match (u64::from_str_radix(parts[0], 16), u64::from_str_radix(parts[1], 16)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => {
                writeln!(terminal, "\t\tinvalid hex range").ok();
                return;
            }
        };
        let mut addr = a & !0b11;
        while addr < b {
            writeln!(terminal, "\t\t0x{:08x}: 0x{:08x}", addr, sim.memory().read_32(addr)).ok();
            addr += 4;
        }
    }

    fn input_prompt<'a>(&self, terminal: &mut Box<term::StdoutTerminal>, input: &'a mut String) -> io::Result<SplitWhitespace<'a>> {
        write!(terminal, "\t")?;
        if self.colour {
            terminal.fg(term::color::BLACK).ok();
            terminal.bg(term::color::WHITE).ok();
        }
        write!(terminal, "[? = Help, q = Quit, hex A..B, run N]")?;
        terminal.reset().ok();
        write!(terminal, "\n\t> ")?;
        io::stdout().flush()?;

        input.clear();
        io::stdin().read_line(input)?;
        writeln!(terminal)?;
        Ok(input.trim().split_whitespace())
    }
}

impl Default for Repl {
    fn default() -> Repl {
        Repl::new()
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
