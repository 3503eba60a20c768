//! LZW configuration: code width limits and dictionary overflow policy.

use pixlzw_core::{MAX_CODE_BITS, PixLzwError, Result};

/// Width needed for the first dictionary entry (code 256).
pub const MIN_CODE_BITS: u8 = 9;

/// Default maximum code width.
pub const DEFAULT_MAX_BITS: u8 = 12;

/// Default behaviour once every code up to `2^max_bits - 1` is assigned.
pub const DEFAULT_OVERFLOW_POLICY: OverflowPolicy = OverflowPolicy::Reset;

/// Number of pre-populated single-byte codes (0-255).
pub const LITERAL_CODES: u16 = 256;

/// What encoder and decoder do when the dictionary is full.
///
/// The policy is applied at the insertion attempt that follows a code
/// emission, which both sides reach at the same point in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Stop adding entries; keep coding with the existing table at `max_bits`.
    Freeze,
    /// Return to the initial 256-entry table and restart at code 256 / 9 bits.
    Reset,
}

impl OverflowPolicy {
    /// Byte stored in the file header.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Freeze => 0,
            Self::Reset => 1,
        }
    }

    /// Parse the header byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Freeze),
            1 => Some(Self::Reset),
            _ => None,
        }
    }

    /// Lowercase name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Freeze => "freeze",
            Self::Reset => "reset",
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LzwConfig {
    /// Maximum code size in bits (9-16).
    pub max_bits: u8,
    /// Behaviour when the dictionary fills up.
    pub overflow: OverflowPolicy,
}

impl LzwConfig {
    /// 12-bit codes, reset on overflow.
    pub const DEFAULT: Self = Self {
        max_bits: DEFAULT_MAX_BITS,
        overflow: DEFAULT_OVERFLOW_POLICY,
    };

    /// 16-bit codes, reset on overflow. Larger tables suit large images.
    pub const WIDE: Self = Self {
        max_bits: MAX_CODE_BITS,
        overflow: OverflowPolicy::Reset,
    };

    /// Create a new configuration.
    pub fn new(max_bits: u8, overflow: OverflowPolicy) -> Self {
        Self { max_bits, overflow }
    }

    /// Check that `max_bits` is within 9-16.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_CODE_BITS..=MAX_CODE_BITS).contains(&self.max_bits) {
            return Err(PixLzwError::InvalidBitWidth(self.max_bits));
        }
        Ok(())
    }

    /// Smallest code width.
    pub fn min_bits(&self) -> u8 {
        MIN_CODE_BITS
    }

    /// Highest assignable code, `2^max_bits - 1`.
    pub fn max_code(&self) -> u16 {
        ((1u32 << self.max_bits) - 1) as u16
    }

    /// Number of codes the dictionary holds when full.
    pub fn capacity(&self) -> u32 {
        1u32 << self.max_bits
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LzwConfig::default();
        assert_eq!(config.min_bits(), 9);
        assert_eq!(config.max_bits, 12);
        assert_eq!(config.max_code(), 4095);
        assert_eq!(config.capacity(), 4096);
        assert_eq!(config.overflow, OverflowPolicy::Reset);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wide_config() {
        let config = LzwConfig::WIDE;
        assert_eq!(config.max_code(), u16::MAX);
        assert_eq!(config.capacity(), 65536);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(LzwConfig::new(8, OverflowPolicy::Freeze).validate().is_err());
        assert!(LzwConfig::new(17, OverflowPolicy::Reset).validate().is_err());
        assert!(LzwConfig::new(9, OverflowPolicy::Freeze).validate().is_ok());
    }

    #[test]
    fn test_policy_byte_roundtrip() {
        for policy in [OverflowPolicy::Freeze, OverflowPolicy::Reset] {
            assert_eq!(OverflowPolicy::from_byte(policy.to_byte()), Some(policy));
        }
        assert_eq!(OverflowPolicy::from_byte(7), None);
        assert_eq!(OverflowPolicy::Reset.to_string(), "reset");
    }
}
