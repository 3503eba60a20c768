//! LZW dictionary (code table) management.
//!
//! Every entry past the 256 literals is stored as a link to its prefix code
//! plus one extra byte, so the table behaves like a trie: extending a known
//! sequence by one byte is a single hash lookup, and a sequence is rebuilt by
//! walking prefix links backwards. The contract is still that of a plain
//! map from byte sequences to codes; [`LzwDictionary::lookup`] and
//! [`LzwDictionary::insert`] take whole sequences.

use crate::config::{LITERAL_CODES, LzwConfig};
use pixlzw_core::{PixLzwError, Result};
use std::collections::HashMap;

/// One code's sequence, stored as prefix link + last byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    /// Code of the sequence without its last byte; `None` for literals.
    prefix: Option<u16>,
    /// Last byte of the sequence.
    byte: u8,
    /// First byte of the sequence.
    first: u8,
    /// Sequence length in bytes.
    len: u32,
}

/// LZW dictionary shared by the encoder and decoder logic.
///
/// Each encoder or decoder owns its own instance; two dictionaries fed the
/// same insertions in the same order are identical entry for entry.
#[derive(Debug, Clone)]
pub struct LzwDictionary {
    /// Code table: code -> entry.
    entries: Vec<Entry>,
    /// Trie edges: (prefix code, next byte) -> code.
    children: HashMap<(u16, u8), u16>,
    /// Configuration.
    config: LzwConfig,
}

impl LzwDictionary {
    /// Create a dictionary holding the 256 single-byte codes.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;

        let capacity = config.capacity() as usize;
        let mut dict = Self {
            entries: Vec::with_capacity(capacity),
            children: HashMap::with_capacity(capacity - LITERAL_CODES as usize),
            config,
        };

        dict.reset();
        Ok(dict)
    }

    /// Reset the dictionary to its initial 256-entry state.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.children.clear();

        for byte in 0..=u8::MAX {
            self.entries.push(Entry {
                prefix: None,
                byte,
                first: byte,
                len: 1,
            });
        }
    }

    /// Find the code for a byte sequence.
    pub fn lookup(&self, sequence: &[u8]) -> Option<u16> {
        let (&first, rest) = sequence.split_first()?;
        rest.iter()
            .try_fold(u16::from(first), |code, &byte| {
                self.lookup_extension(code, byte)
            })
    }

    /// Find the code for the sequence of `prefix` followed by `byte`.
    #[inline]
    pub fn lookup_extension(&self, prefix: u16, byte: u8) -> Option<u16> {
        self.children.get(&(prefix, byte)).copied()
    }

    /// Add a sequence and return its new code.
    ///
    /// The sequence minus its last byte must already be present, which is
    /// always the case for LZW. A sequence that already has a code is
    /// rejected with [`PixLzwError::DuplicateEntry`].
    pub fn insert(&mut self, sequence: &[u8]) -> Result<u16> {
        let Some((&last, head)) = sequence.split_last() else {
            return Err(PixLzwError::malformed(
                0,
                0,
                "cannot insert an empty sequence",
            ));
        };
        let prefix = self.lookup(head).ok_or_else(|| {
            PixLzwError::malformed(0, 0, "sequence prefix is not in the dictionary")
        })?;
        self.insert_extension(prefix, last)
    }

    /// Add the sequence `prefix` + `byte` and return its new code.
    ///
    /// Fails with [`PixLzwError::DuplicateEntry`] if the sequence is already
    /// present, and with [`PixLzwError::CapacityExceeded`] once `2^max_bits`
    /// codes are assigned.
    pub fn insert_extension(&mut self, prefix: u16, byte: u8) -> Result<u16> {
        if let Some(existing) = self.lookup_extension(prefix, byte) {
            return Err(PixLzwError::duplicate_entry(existing));
        }
        if self.is_full() {
            return Err(PixLzwError::capacity_exceeded(self.config.capacity()));
        }
        let parent = *self.entries.get(prefix as usize).ok_or_else(|| {
            PixLzwError::malformed(prefix, 0, "prefix code is not in the dictionary")
        })?;

        let code = self.entries.len() as u16;
        self.entries.push(Entry {
            prefix: Some(prefix),
            byte,
            first: parent.first,
            len: parent.len + 1,
        });
        self.children.insert((prefix, byte), code);

        Ok(code)
    }

    /// Append the sequence for `code` to `out`; returns the number of bytes
    /// written, or `None` if the code is unknown.
    pub fn write_sequence(&self, code: u16, out: &mut Vec<u8>) -> Option<usize> {
        let len = self.entries.get(code as usize)?.len as usize;
        let start = out.len();
        out.resize(start + len, 0);

        let mut cursor = code;
        for slot in out[start..].iter_mut().rev() {
            let entry = self.entries[cursor as usize];
            *slot = entry.byte;
            if let Some(prefix) = entry.prefix {
                cursor = prefix;
            }
        }

        Some(len)
    }

    /// The byte sequence for a code.
    pub fn get(&self, code: u16) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.write_sequence(code, &mut out)?;
        Some(out)
    }

    /// First byte of the sequence for a code.
    pub fn first_byte(&self, code: u16) -> Option<u8> {
        self.entries.get(code as usize).map(|e| e.first)
    }

    /// All sequences in code order.
    pub fn sequences(&self) -> Vec<Vec<u8>> {
        (0..self.entries.len())
            .filter_map(|code| self.get(code as u16))
            .collect()
    }

    /// Code the next insertion will receive.
    pub fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Number of assigned codes, literals included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; the literals are always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether every representable code is assigned.
    pub fn is_full(&self) -> bool {
        self.next_code() >= self.config.capacity()
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
