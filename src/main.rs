// License below.
//! A functional instruction-set simulator for a subset of ARMv8 (AArch64).
#![warn(missing_docs)]

use std::path::PathBuf;

use argparse::{ArgumentParser, Parse, ParseOption, Print, StoreFalse, StoreOption, StoreTrue};
use log::{debug, error, info};

mod core;
mod error;
mod logger;
mod repl;

use crate::core::Simulator;
use crate::error::SimError;

struct CmdLineArgs {
    rom_file_path: Option<PathBuf>,
    base_address: String,
    log_file_path: PathBuf,
    single_disasm: Option<String>,
    steps: Option<u32>,
    verbose: bool,
    colour: bool,
}

impl Default for CmdLineArgs {
    fn default() -> CmdLineArgs {
        CmdLineArgs {
            rom_file_path: None,
            base_address: format!("{:x}", core::DEFAULT_BASE),
            log_file_path: PathBuf::from("./sim.log"),
            single_disasm: None,
            steps: None,
            verbose: false,
            colour: true,
        }
    }
}

fn main() {
    let mut args = CmdLineArgs::default();
    parse_command_line(&mut args);
    configure_logging(&args);

    if handle_oneshot_commands(&args) {
        return;
    }

    let mut sim = Simulator::new();
    if !configure_simulator_from_command_line(&mut sim, &args) {
        return;
    }

    match args.steps {
        Some(n) => sim.run(Some(n as usize)),
        None => repl::Repl::new().with_colour(args.colour).run(&mut sim),
    }
}

fn parse_command_line(args: &mut CmdLineArgs) {
    let mut parser = ArgumentParser::new();
    parser.set_description("A functional instruction-set simulator for a subset of ARMv8 (AArch64).");
    parser.add_option(&["-V", "--version"],
                       Print(format!("aarch64sim v{}", env!("CARGO_PKG_VERSION"))),
                       "Show current version.");
    parser.refer(&mut args.rom_file_path)
          .add_option(&["--rom"], ParseOption, "Path to a memory image to load.")
          .metavar("PATH");
    parser.refer(&mut args.base_address)
          .add_option(&["--base"], Parse, "Hex base address to load the image at.")
          .metavar("HEX");
    parser.refer(&mut args.log_file_path)
          .add_option(&["--log"], Parse, "Custom path for the log file.")
          .metavar("PATH");
    parser.refer(&mut args.single_disasm)
          .add_option(&["--dasm"], StoreOption,
                      "Prints the disassembly of a single instruction word and exits. \
                       The word must be a hex number without a base prefix, e.g. D2800041.")
          .metavar("HEX");
    parser.refer(&mut args.steps)
          .add_option(&["--steps"], StoreOption,
                      "Run this many cycles non-interactively instead of entering the REPL.")
          .metavar("N");
    parser.refer(&mut args.verbose)
          .add_option(&["-v", "--verbose"], StoreTrue, "Log extra messages and information.");
    parser.refer(&mut args.colour)
          .add_option(&["-c", "--with-colour"], StoreTrue, "Enable terminal logging with colour codes. (default)")
          .add_option(&["-k", "--without-colour"], StoreFalse, "Disable terminal logging with colour codes.");
    parser.parse_args_or_exit();
}

fn configure_logging(args: &CmdLineArgs) {
    let p = args.log_file_path.as_path();
    logger::init_with(p, args.verbose, args.colour).unwrap();
    info!("Logging to file `{}`.", p.display());
}

/// Handles `--dasm`. Returns `true` if the process should exit now.
fn handle_oneshot_commands(args: &CmdLineArgs) -> bool {
    if let Some(ref x) = args.single_disasm {
        match u32::from_str_radix(x.as_str(), 16) {
            Ok(word) => {
                let inst = core::cpu::instruction::decode(word);
                println!("{}", inst);
            }
            Err(e) => error!("invalid --dasm hex word {:?}: {}", x, e),
        }
        return true;
    }
    false
}

fn parse_base_address(args: &CmdLineArgs) -> Result<u64, SimError> {
    let s = args.base_address.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(s, 16)
        .map_err(|e| SimError::InvalidArgument(format!("--base {:?}: {}", args.base_address, e)))
}

/// Loads the requested ROM image, if any. Returns `false` if a requested
/// load failed and the process should not proceed.
fn configure_simulator_from_command_line(sim: &mut Simulator, args: &CmdLineArgs) -> bool {
    let Some(ref fp) = args.rom_file_path else { return true };
    let base = match parse_base_address(args) {
        Ok(base) => base,
        Err(e) => {
            error!("{}", e);
            return false;
        }
    };

    if let Err(e) = sim.load_image(fp.as_path(), base) {
        error!("failed loading the memory image: {}", e);
        return false;
    }
    info!("Loaded {} at 0x{:x}.", fp.display(), base);
    debug!("First instruction: {}", sim.peek_next_instruction());
    true
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
