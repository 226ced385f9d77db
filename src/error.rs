// License below.
//! Error type for the shell layer: memory image loading and CLI arguments.
//!
//! The simulation core itself has no `Result`-based failure mode — an
//! unrecognized instruction is a soft error handled by advancing the
//! program counter (see `core::cpu::instruction`) — so this type only
//! covers failures that can prevent a simulation from starting at all.
use std::error;
use std::fmt;
use std::io;

/// Errors raised while loading a memory image or parsing CLI arguments.
#[derive(Debug)]
pub enum SimError {
    /// The memory image file could not be interpreted.
    MalformedImage(String),
    /// An I/O failure occurred loading the named file.
    Io(String, io::Error),
    /// A CLI argument did not parse into the expected form.
    InvalidArgument(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SimError::MalformedImage(ref msg) => write!(f, "malformed memory image: {}", msg),
            SimError::Io(ref path, ref e) => write!(f, "I/O error reading {}: {}", path, e),
            SimError::InvalidArgument(ref msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl error::Error for SimError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            SimError::Io(_, ref e) => Some(e),
            _ => None,
        }
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
