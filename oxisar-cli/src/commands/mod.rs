//! Command implementations for OxiSar CLI.

pub mod decode;
pub mod dump;
pub mod encode;
pub mod info;

pub use decode::cmd_decode;
pub use dump::cmd_dump;
pub use encode::cmd_encode;
pub use info::cmd_info;
