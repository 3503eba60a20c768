//! LZW encoder (compression).

use crate::config::{LzwConfig, OverflowPolicy};
use crate::dictionary::LzwDictionary;
use crate::width::CodeWidth;
use pixlzw_core::{BitWriter, PixLzwError, Result};

/// A code together with the width it was emitted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmittedCode {
    /// Dictionary code.
    pub code: u16,
    /// Number of bits used to pack it.
    pub width: u8,
}

/// LZW encoder for compression.
#[derive(Debug)]
pub struct LzwEncoder {
    dict: LzwDictionary,
    width: CodeWidth,
    resets: usize,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        let width = CodeWidth::new(&config);
        Ok(Self {
            dict,
            width,
            resets: 0,
        })
    }

    /// Encode `input` into packed MSB-first bytes.
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let codes = self.encode_codes(input)?;
        pack_codes(&codes)
    }

    /// Encode `input` into its code sequence.
    pub fn encode_codes(&mut self, input: &[u8]) -> Result<Vec<EmittedCode>> {
        self.encode_with(input, |_, _| {})
    }

    /// Encode `input`, calling `observe` for every emitted code with the
    /// dictionary as it stood at that moment.
    ///
    /// # Algorithm
    ///
    /// Greedy longest match:
    /// 1. Start from a fresh 256-entry dictionary
    /// 2. Extend the pending sequence while the extension is known
    /// 3. Otherwise emit the pending code, add pending + byte to the
    ///    dictionary, and restart pending at the byte
    /// 4. Emit the pending code when input runs out
    ///
    /// When the dictionary is full, the configured [`OverflowPolicy`] decides
    /// whether insertion is skipped or the table starts over.
    pub fn encode_with<F>(&mut self, input: &[u8], mut observe: F) -> Result<Vec<EmittedCode>>
    where
        F: FnMut(EmittedCode, &LzwDictionary),
    {
        self.reset();

        let mut codes = Vec::with_capacity(input.len() / 2 + 1);
        let Some((&first, rest)) = input.split_first() else {
            return Ok(codes);
        };

        // The pending sequence is carried as its code.
        let mut pending = u16::from(first);

        for &byte in rest {
            if let Some(code) = self.dict.lookup_extension(pending, byte) {
                pending = code;
                continue;
            }

            let emitted = EmittedCode {
                code: pending,
                width: self.width.current_width(),
            };
            codes.push(emitted);
            observe(emitted, &self.dict);

            self.grow(pending, byte)?;
            pending = u16::from(byte);
        }

        let emitted = EmittedCode {
            code: pending,
            width: self.width.current_width(),
        };
        codes.push(emitted);
        observe(emitted, &self.dict);

        tracing::debug!(
            input_len = input.len(),
            codes = codes.len(),
            resets = self.resets,
            final_width = self.width.current_width(),
            "lzw encode finished"
        );

        Ok(codes)
    }

    /// Insertion attempt following an emission.
    fn grow(&mut self, prefix: u16, byte: u8) -> Result<()> {
        match self.dict.insert_extension(prefix, byte) {
            Ok(code) => {
                self.width.notify_assigned(code);
                Ok(())
            }
            Err(PixLzwError::CapacityExceeded { max_codes }) => {
                if self.dict.config().overflow == OverflowPolicy::Reset {
                    tracing::debug!(max_codes, "dictionary full, resetting");
                    self.dict.reset();
                    self.width.reset();
                    self.resets += 1;
                }
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Number of dictionary resets during the last encode.
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// Dictionary state after the last encode.
    pub fn dictionary(&self) -> &LzwDictionary {
        &self.dict
    }

    /// Reset the encoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
        self.width.reset();
        self.resets = 0;
    }
}

/// Pack codes MSB-first, each at the width it was emitted with.
pub fn pack_codes(codes: &[EmittedCode]) -> Result<Vec<u8>> {
    let bits: usize = codes.iter().map(|c| c.width as usize).sum();
    let mut writer = BitWriter::with_capacity(bits.div_ceil(8));
    for c in codes {
        writer.write_bits(c.code, c.width)?;
    }
    Ok(writer.into_vec())
}
