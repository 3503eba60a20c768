//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary one step behind it: the
//! entry the encoder added after emitting code `k` is only known once code
//! `k + 1` arrives, because its last byte is the first byte of that code.
//! The code number and the width change it causes are known earlier, as
//! soon as code `k` has been processed, so the width controller is notified
//! before the next code is read.

use crate::config::{LzwConfig, OverflowPolicy};
use crate::dictionary::LzwDictionary;
use crate::width::CodeWidth;
use pixlzw_core::{BitReader, PixLzwError, Result};

/// Output bytes reserved per input byte before decoding starts.
const INITIAL_EXPANSION: usize = 8;

/// LZW decoder for decompression.
#[derive(Debug)]
pub struct LzwDecoder {
    dict: LzwDictionary,
    width: CodeWidth,
    /// Last resolved code whose follow-up insertion has not been replayed.
    last: Option<u16>,
    /// Prefix of the entry the encoder assigned after the previous code.
    pending_prefix: Option<u16>,
    resets: usize,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        let width = CodeWidth::new(&config);
        Ok(Self {
            dict,
            width,
            last: None,
            pending_prefix: None,
            resets: 0,
        })
    }

    /// Decode a packed stream that expands to exactly `expected_size` bytes.
    ///
    /// Fails with
    /// - [`PixLzwError::UnexpectedEof`] if the stream ends first,
    /// - [`PixLzwError::MalformedStream`] on an unresolvable code or when the
    ///   last code expands past `expected_size`,
    /// - [`PixLzwError::TrailingData`] if anything but zero padding follows.
    pub fn decode(&mut self, input: &[u8], expected_size: usize) -> Result<Vec<u8>> {
        self.reset();

        let mut reader = BitReader::new(input);
        // `expected_size` comes from an untrusted header.
        let mut output =
            Vec::with_capacity(expected_size.min(input.len().saturating_mul(INITIAL_EXPANSION)));
        let mut last_code = 0;

        while output.len() < expected_size {
            self.begin_code();
            let code = reader.read_bits(self.width.current_width())?;
            self.resolve(code, reader.bits_read(), &mut output)?;
            last_code = code;
        }

        if output.len() > expected_size {
            return Err(PixLzwError::malformed(
                last_code,
                reader.bits_read(),
                format!(
                    "last code expands to {} bytes, expected {expected_size}",
                    output.len()
                ),
            ));
        }

        if !reader.is_padding_only() {
            return Err(PixLzwError::trailing_data(
                reader.bits_read(),
                reader.remaining_bits(),
            ));
        }

        tracing::debug!(
            input_len = input.len(),
            output_len = output.len(),
            resets = self.resets,
            "lzw decode finished"
        );

        Ok(output)
    }

    /// Decode an unpacked code sequence.
    pub fn decode_codes(&mut self, codes: &[u16]) -> Result<Vec<u8>> {
        self.reset();

        let mut output = Vec::with_capacity(codes.len() * 2);
        for &code in codes {
            self.decode_code(code, &mut output)?;
        }
        Ok(output)
    }

    /// Consume one code, appending its bytes to `output`.
    ///
    /// After this returns, the dictionary matches the encoder's dictionary
    /// at the moment it emitted `code`.
    pub fn decode_code(&mut self, code: u16, output: &mut Vec<u8>) -> Result<()> {
        self.begin_code();
        self.resolve(code, 0, output)
    }

    /// Width the next code will be read with.
    ///
    /// Takes `&mut self` because it first applies the dictionary growth
    /// (or overflow reset) that the previous code implies.
    pub fn next_code_width(&mut self) -> u8 {
        self.begin_code();
        self.width.current_width()
    }

    /// Replay the insertion attempt the encoder made after the last code.
    fn begin_code(&mut self) {
        let Some(prev) = self.last.take() else {
            return;
        };

        if self.dict.is_full() {
            self.pending_prefix = None;
            if self.dict.config().overflow == OverflowPolicy::Reset {
                tracing::debug!(
                    max_codes = self.dict.config().capacity(),
                    "dictionary full, resetting"
                );
                self.dict.reset();
                self.width.reset();
                self.resets += 1;
            }
        } else {
            self.pending_prefix = Some(prev);
            self.width.notify_assigned(self.dict.next_code() as u16);
        }
    }

    fn resolve(&mut self, code: u16, position: u64, output: &mut Vec<u8>) -> Result<()> {
        let next = self.dict.next_code();
        let start = output.len();

        if u32::from(code) < next {
            self.dict.write_sequence(code, output);
            if let Some(prefix) = self.pending_prefix.take() {
                self.extend(prefix, output[start], code, position)?;
            }
        } else if u32::from(code) == next {
            // The code names the entry being created right now:
            // previous sequence + its own first byte.
            let Some(prefix) = self.pending_prefix.take() else {
                return Err(PixLzwError::malformed(
                    code,
                    position,
                    "refers to the next code while no entry is being assigned",
                ));
            };
            self.dict.write_sequence(prefix, output);
            output.push(output[start]);
            self.extend(prefix, output[start], code, position)?;
        } else {
            return Err(PixLzwError::malformed(
                code,
                position,
                format!("beyond next assignable code {next}"),
            ));
        }

        self.last = Some(code);
        Ok(())
    }

    /// Complete the pending entry. A repeated sequence cannot come from the
    /// encoder.
    fn extend(&mut self, prefix: u16, byte: u8, code: u16, position: u64) -> Result<()> {
        match self.dict.insert_extension(prefix, byte) {
            Ok(_) => Ok(()),
            Err(PixLzwError::DuplicateEntry { existing }) => Err(PixLzwError::malformed(
                code,
                position,
                format!("repeats dictionary entry {existing}"),
            )),
            Err(e) => Err(e),
        }
    }

    /// Number of dictionary resets so far.
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// Current dictionary.
    pub fn dictionary(&self) -> &LzwDictionary {
        &self.dict
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
        self.width.reset();
        self.last = None;
        self.pending_prefix = None;
        self.resets = 0;
    }
}
