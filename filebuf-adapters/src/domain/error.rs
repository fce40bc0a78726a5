//! Domain-level errors.
//!
//! These errors describe invalid configuration. Failures while moving data
//! come through [`filebuf_spi::Error`].

/// Errors raised while building adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A buffer capacity of zero was requested.
    #[error("Buffer capacity cannot be zero")]
    ZeroCapacity,

    /// A close mode name that matches none of the known modes.
    #[error("Unknown close mode: {0:?} (expected FLUSH, FLUSH_FINISH, FLUSH_FINISH_CLOSE or CLOSE)")]
    UnknownCloseMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_display() {
        let msg = format!("{}", ConfigError::ZeroCapacity);
        assert!(msg.contains("zero"));
    }

    #[test]
    fn test_unknown_close_mode_display() {
        let msg = format!("{}", ConfigError::UnknownCloseMode("SOMETIMES".into()));
        assert!(msg.contains("\"SOMETIMES\""));
        assert!(msg.contains("FLUSH_FINISH_CLOSE"));
    }
}
