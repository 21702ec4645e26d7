//! Decoder limits
//!
//! The decoder is always structurally strict: invalid opcodes and truncated instructions are
//! errors regardless of configuration. What this module controls are resource limits, so a
//! hostile method body cannot make the decoder allocate or iterate without bound.

/// Resource limits applied while decoding a method body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Largest `switch` case count accepted (default: no limit beyond the buffer size)
    /// A `switch` declaring more targets fails with [`crate::Error::SwitchTableOverflow`]
    pub max_switch_cases: u32,

    /// Maximum number of instructions decoded from one stream (default: unlimited)
    /// Decoding past it fails with [`crate::Error::InstructionLimit`]
    pub max_instructions: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_switch_cases: u32::MAX,
            max_instructions: usize::MAX,
        }
    }
}

impl DecoderConfig {
    /// Creates a configuration with limits suitable for untrusted input
    ///
    /// Caps `switch` tables at 65536 cases and method bodies at 2^20 instructions.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_switch_cases: 0x1_0000,
            max_instructions: 1 << 20,
        }
    }

    /// Returns a copy with a different `switch` case limit
    #[must_use]
    pub fn with_max_switch_cases(mut self, max: u32) -> Self {
        self.max_switch_cases = max;
        self
    }

    /// Returns a copy with a different instruction limit
    #[must_use]
    pub fn with_max_instructions(mut self, max: usize) -> Self {
        self.max_instructions = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        let config = DecoderConfig::default();
        assert_eq!(config.max_switch_cases, u32::MAX);
        assert_eq!(config.max_instructions, usize::MAX);
    }

    #[test]
    fn test_strict_limits() {
        let config = DecoderConfig::strict();
        assert_eq!(config.max_switch_cases, 65536);
        assert_eq!(config.max_instructions, 1_048_576);
        assert_ne!(config, DecoderConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = DecoderConfig::default()
            .with_max_switch_cases(4)
            .with_max_instructions(10);
        assert_eq!(config.max_switch_cases, 4);
        assert_eq!(config.max_instructions, 10);
    }
}
