//! Common types and utilities for uesim
//!
//! Shared types, the UE profile configuration, and logging helpers used
//! across all uesim crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{AuthConfig, OpType, ProtectionScheme, UeProfile};
pub use error::Error;
pub use logging::{
    filter_directive, format_hex_compact, init_logging, init_logging_with_filter, log_nas_message,
    Direction, HexDump, LogLevel,
};
pub use types::Plmn;
