//! Close mode of the write adapter.

use crate::domain::error::ConfigError;
use core::{fmt, str::FromStr};

/// What [`FileOutputWriter::close`](crate::adapters::FileOutputWriter::close)
/// does to the sink.
///
/// | Mode               | flush | finish | close |
/// |--------------------|:-----:|:------:|:-----:|
/// | `Flush`            |   x   |        |       |
/// | `FlushFinish`      |   x   |   x    |       |
/// | `FlushFinishClose` |   x   |   x    |   x   |
/// | `Close`            |       |        |   x   |
///
/// `Close` skips the flush; it is meant for abandoning a sink on error paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseMode {
    /// Flush pending bytes only.
    Flush,
    /// Flush, then finish the sink.
    FlushFinish,
    /// Flush, finish the sink, then close it.
    FlushFinishClose,
    /// Close the sink without flushing.
    Close,
}

impl CloseMode {
    /// Every mode, in declaration order.
    pub const ALL: [CloseMode; 4] = [
        CloseMode::Flush,
        CloseMode::FlushFinish,
        CloseMode::FlushFinishClose,
        CloseMode::Close,
    ];

    /// Whether pending bytes are flushed.
    #[inline]
    pub const fn flushes(&self) -> bool {
        !matches!(self, CloseMode::Close)
    }

    /// Whether the sink is finished.
    #[inline]
    pub const fn finishes(&self) -> bool {
        matches!(self, CloseMode::FlushFinish | CloseMode::FlushFinishClose)
    }

    /// Whether the sink is closed.
    #[inline]
    pub const fn closes(&self) -> bool {
        matches!(self, CloseMode::FlushFinishClose | CloseMode::Close)
    }

    /// The canonical upper-case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CloseMode::Flush => "FLUSH",
            CloseMode::FlushFinish => "FLUSH_FINISH",
            CloseMode::FlushFinishClose => "FLUSH_FINISH_CLOSE",
            CloseMode::Close => "CLOSE",
        }
    }
}

impl fmt::Display for CloseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloseMode {
    type Err = ConfigError;

    /// Parse a mode name. Case is ignored and `-` is accepted for `_`.
    ///
    /// Unknown names are an error; there is no fallback mode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        CloseMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownCloseMode(s.to_string()))
    }
}
