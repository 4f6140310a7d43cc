//! Startup error types.
//!
//! Configuration problems are detected before any periodic context is
//! armed; there is no degraded-operation mode. Peripheral bring-up
//! failures surface as `EspError` results at the HAL seam and abort
//! startup in `main`.

/// Fatal configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Table resolution must be a nonzero power of two so the stepper
    /// can wrap its index with a bitmask.
    ResolutionNotPowerOfTwo(usize),
}

impl ConfigError {
    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::ResolutionNotPowerOfTwo(_) => "table resolution must be a power of two",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ResolutionNotPowerOfTwo(r) => {
                write!(f, "{}: got {}", self.message(), r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_value() {
        let err = ConfigError::ResolutionNotPowerOfTwo(100);
        let mut buf = [0u8; 64];
        let len = crate::logging::format_to_buffer(&mut buf, format_args!("{}", err));
        let text = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(text.contains("power of two"));
        assert!(text.contains("100"));
    }
}
