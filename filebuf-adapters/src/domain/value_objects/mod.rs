//! Value objects - validated configuration with no identity.

mod buffer_config;
mod close_mode;

pub use buffer_config::{presets, BufferConfig};
pub use close_mode::CloseMode;
