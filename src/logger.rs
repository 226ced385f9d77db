// License below.
//! A combined console + log-file sink implementing `log::Log`.
#![warn(missing_docs)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::thread;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Logs every record to a file and, optionally colourised, to stdout.
pub struct ConsoleFileLogger {
    file: Option<Mutex<File>>,
    verbose: bool,
    colour: bool,
}

impl Log for ConsoleFileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let min_level = if self.verbose { Level::Trace } else { Level::Info };
        metadata.level() <= min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let tid = thread::current();
        let tid = tid.name().unwrap_or("<?>");
        let loc = format!("[{}:{} - {}]", record.file().unwrap_or("?"), record.line().unwrap_or(0), record.module_path().unwrap_or("?"));
        let body = format!("{}", record.args()).replace('\n', "\n\t\t   ");
        let msg = format!("[TID={}]\t{}\t{}\n\t\t-- {}", tid, record.level(), loc, body);

        if let Some(f) = self.file.as_ref() {
            let mut f = f.lock().unwrap();
            writeln!(f, "{}", msg).ok();
        }

        if !self.colour {
            println!("{}", msg);
        } else {
            let colour = match record.level() {
                Level::Error => "\x1B[31m\x1B[1m", // Bold, red.
                Level::Warn => "\x1B[33m\x1B[1m",  // Bold, yellow.
                Level::Info => "\x1B[32m\x1B[1m",  // Bold, green.
                _ => "\x1B[34m\x1B[1m",            // Bold, blue.
            };
            println!(
                "\x1B[0m\x1B[2m[TID={}]\t{}{}\x1B[0m\x1B[2m\t{}\x1B[1m\n\t\t-- {}\x1B[0m",
                tid, colour, record.level(), loc, body
            );
        }
    }

    fn flush(&self) {
        if let Some(f) = self.file.as_ref() {
            f.lock().unwrap().flush().ok();
        }
    }
}

/// Installs a `ConsoleFileLogger` as the global logger, creating `file`
/// (truncating it if it already exists).
pub fn init_with(file: &Path, verbose: bool, colour: bool) -> Result<(), SetLoggerError> {
    let logger = ConsoleFileLogger {
        file: File::create(file).ok().map(Mutex::new),
        verbose,
        colour,
    };
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
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
