//! Logging setup and NAS PDU logging helpers
//!
//! Logs go to stderr through `tracing-subscriber`. The configured level
//! applies to the uesim crates; everything else stays at `warn`. `RUST_LOG`
//! replaces the whole filter when set.
//!
//! PDUs are logged with their direction and message name at debug level
//! and as a hex dump at trace level.

use std::fmt;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Crates whose level follows [`LogLevel`]
pub const UESIM_TARGETS: &[&str] = &[
    "uesim_common",
    "uesim_crypto",
    "uesim_nas",
    "uesim_ue",
    "nr_ue_nas",
];

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Decode state transitions and PDU hex dumps
    Trace,
    /// Per-PDU summaries and NAS trace lines
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Name used in filter directives
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ]
        .into_iter()
        .find(|level| level.as_str().eq_ignore_ascii_case(s))
        .or_else(|| s.eq_ignore_ascii_case("warning").then_some(LogLevel::Warn))
        .ok_or_else(|| format!("unknown log level: {s}"))
    }
}

/// Filter directive applying `level` to the uesim crates
pub fn filter_directive(level: LogLevel) -> String {
    UESIM_TARGETS
        .iter()
        .fold(String::from("warn"), |mut directive, target| {
            directive.push(',');
            directive.push_str(target);
            directive.push('=');
            directive.push_str(level.as_str());
            directive
        })
}

/// Install the stderr subscriber for `level`.
///
/// Call once at startup.
///
/// # Example
///
/// ```no_run
/// use uesim_common::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    init_logging_with_filter(&filter_directive(level));
}

/// Install the stderr subscriber with a filter such as `"warn,uesim_nas=trace"`.
pub fn init_logging_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Direction of a NAS PDU relative to the UE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Network to UE
    Downlink,
    /// UE to network
    Uplink,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Downlink => f.write_str("DL"),
            Direction::Uplink => f.write_str("UL"),
        }
    }
}

/// Log one NAS PDU.
///
/// ```
/// use uesim_common::logging::{log_nas_message, Direction};
///
/// log_nas_message(Direction::Uplink, "Authentication Response", &[0x7e, 0x00, 0x57]);
/// ```
pub fn log_nas_message(direction: Direction, message: &str, pdu: &[u8]) {
    tracing::debug!(
        direction = %direction,
        msg_type = message,
        len = pdu.len(),
        "{direction} NAS {message}"
    );
    tracing::trace!(pdu = %HexDump(pdu), "{direction} NAS payload");
}

/// Space-separated octets, as in a packet capture
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, octet) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{octet:02x}")?;
        }
        Ok(())
    }
}

/// Hex string with a space every `group_size` octets; 0 means no spaces.
///
/// ```
/// use uesim_common::logging::format_hex_compact;
///
/// let data = [0x12, 0x34, 0x56, 0x78];
/// assert_eq!(format_hex_compact(&data, 0), "12345678");
/// assert_eq!(format_hex_compact(&data, 2), "1234 5678");
/// ```
pub fn format_hex_compact(data: &[u8], group_size: usize) -> String {
    if group_size == 0 {
        return hex::encode(data);
    }

    data.chunks(group_size)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_round_trip() {
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
    }

    #[test]
    fn test_filter_directive() {
        let directive = filter_directive(LogLevel::Debug);
        assert!(directive.starts_with("warn,"));
        assert!(directive.contains(",uesim_nas=debug"));
        assert!(directive.contains(",nr_ue_nas=debug"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Downlink.to_string(), "DL");
        assert_eq!(Direction::Uplink.to_string(), "UL");
    }

    #[test]
    fn test_hex_compact_grouping() {
        let data = [0x7e, 0x00, 0x57, 0x2d];
        assert_eq!(format_hex_compact(&data, 1), "7e 00 57 2d");
        assert_eq!(format_hex_compact(&data, 3), "7e0057 2d");
    }

    #[test]
    fn test_hex_dump() {
        assert_eq!(HexDump(&[0x7e, 0x00, 0x56]).to_string(), "7e 00 56");
        assert_eq!(HexDump(&[]).to_string(), "");
    }
}
