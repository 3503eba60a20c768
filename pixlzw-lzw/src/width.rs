//! Code-width controller.
//!
//! Tracks how many bits the next code needs. The width is the smallest
//! value (at least 9) that can hold the highest code assigned so far,
//! clamped to `max_bits`. Encoder and decoder each own one and notify it
//! at the same stream position, so transitions line up on both sides.

use crate::config::{LzwConfig, MIN_CODE_BITS};

/// Current code width for one side of an LZW session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeWidth {
    current: u8,
    max_bits: u8,
    highest: u16,
}

impl CodeWidth {
    /// Width controller in its initial state (9 bits, nothing assigned).
    pub fn new(config: &LzwConfig) -> Self {
        Self {
            current: MIN_CODE_BITS,
            max_bits: config.max_bits,
            highest: 0,
        }
    }

    /// Bits used for the next code.
    pub fn current_width(&self) -> u8 {
        self.current
    }

    /// Record that `code` has been assigned and recompute the width.
    ///
    /// The width never shrinks within a session; use [`reset`](Self::reset)
    /// when the dictionary itself is reset.
    pub fn notify_assigned(&mut self, code: u16) {
        self.highest = self.highest.max(code);
        let needed = bits_for(self.highest).clamp(MIN_CODE_BITS, self.max_bits);
        if needed > self.current {
            tracing::trace!(code, from = self.current, to = needed, "code width grew");
            self.current = needed;
        }
    }

    /// Back to 9 bits.
    pub fn reset(&mut self) {
        self.current = MIN_CODE_BITS;
        self.highest = 0;
    }
}

/// Minimum number of bits that can represent `code`.
pub fn bits_for(code: u16) -> u8 {
    (u16::BITS - code.leading_zeros()).max(1) as u8
}
