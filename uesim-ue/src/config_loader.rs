//! UE profile loading and validation
//!
//! Wraps [`UeProfile`] from `uesim-common` with the checks a profile has to
//! pass before a NAS context is built from it.
//!
//! # Example
//!
//! ```rust,ignore
//! use uesim_ue::{load_ue_profile, validate_ue_profile};
//!
//! let profile = load_ue_profile("config/ue.yaml")?;
//! validate_ue_profile(&profile)?;
//! ```

use std::path::Path;

use thiserror::Error;
use uesim_common::{ProtectionScheme, UeProfile};

/// Errors that can occur during profile loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Profile validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),
}

/// Errors that can occur during profile validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Invalid PLMN
    #[error("Invalid PLMN: {0}")]
    InvalidPlmn(String),

    /// Invalid MSIN
    #[error("Invalid MSIN: {0}")]
    InvalidMsin(String),

    /// Invalid routing indicator
    #[error("Invalid routing indicator: {0}")]
    InvalidRoutingIndicator(String),

    /// Subscriber key is all zeros
    #[error("Subscriber key K cannot be all zeros")]
    ZeroKey,

    /// SUCI concealment is not available
    #[error("Unsupported protection scheme {0:?}: only the null scheme is supported")]
    UnsupportedProtectionScheme(ProtectionScheme),
}

/// Loads a UE profile from a YAML file.
///
/// Only parses the file; call [`validate_ue_profile`] before using the
/// profile.
pub fn load_ue_profile<P: AsRef<Path>>(path: P) -> Result<UeProfile, ConfigError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    load_ue_profile_from_str(&contents)
}

/// Loads a UE profile from a YAML string.
pub fn load_ue_profile_from_str(yaml: &str) -> Result<UeProfile, ConfigError> {
    UeProfile::from_yaml(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Loads and validates a UE profile in one step.
pub fn load_and_validate_ue_profile<P: AsRef<Path>>(path: P) -> Result<UeProfile, ConfigError> {
    let profile = load_ue_profile(path)?;
    validate_ue_profile(&profile)?;
    Ok(profile)
}

/// Validates a UE profile.
///
/// # Validation Rules
///
/// - MCC must be at most 999
/// - MNC must be at most 99, or at most 999 with a 3-digit MNC
/// - MSIN must be 1 to 10 decimal digits
/// - Routing indicator must be 1 to 4 decimal digits
/// - K must not be all zeros
/// - Protection scheme must be the null scheme
pub fn validate_ue_profile(profile: &UeProfile) -> Result<(), ConfigValidationError> {
    if profile.mcc > 999 {
        return Err(ConfigValidationError::InvalidPlmn(format!(
            "MCC {} must be between 000 and 999",
            profile.mcc
        )));
    }
    if profile.mnc > 999 {
        return Err(ConfigValidationError::InvalidPlmn(format!(
            "MNC {} must be between 00 and 999",
            profile.mnc
        )));
    }
    if profile.long_mnc || profile.mnc > 99 {
        tracing::debug!(mnc = profile.mnc, "Using 3-digit MNC");
    }

    if !is_decimal(&profile.msin, 10) {
        return Err(ConfigValidationError::InvalidMsin(format!(
            "'{}' must be 1 to 10 decimal digits",
            profile.msin
        )));
    }

    if !is_decimal(&profile.routing_indicator, 4) {
        return Err(ConfigValidationError::InvalidRoutingIndicator(format!(
            "'{}' must be 1 to 4 decimal digits",
            profile.routing_indicator
        )));
    }

    if profile.auth.k.iter().all(|&b| b == 0) {
        return Err(ConfigValidationError::ZeroKey);
    }

    if profile.protection_scheme != ProtectionScheme::Null {
        return Err(ConfigValidationError::UnsupportedProtectionScheme(
            profile.protection_scheme,
        ));
    }

    Ok(())
}

fn is_decimal(s: &str, max_len: usize) -> bool {
    (1..=max_len).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uesim_common::OpType;

    const PROFILE: &str = r#"
msin: "0000000001"
mcc: 1
mnc: 1
routing_indicator: "0000"
protection_scheme: "null"
home_network_public_key_id: 0
auth:
  k: "465b5ce8b199b49faa5f0a2ee238a6bc"
  opc: "cd63cb71954a9f4e48a5994e37a02baf"
"#;

    fn valid_profile() -> UeProfile {
        load_ue_profile_from_str(PROFILE).unwrap()
    }

    #[test]
    fn test_load_from_str() {
        let profile = valid_profile();
        assert_eq!(profile.msin, "0000000001");
        assert_eq!(profile.plmn().to_string(), "00101");
        assert_eq!(profile.auth.op_type, OpType::Opc);
        assert_eq!(profile.auth.k[0], 0x46);
        assert!(validate_ue_profile(&profile).is_ok());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let result = load_ue_profile_from_str("msin: [");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_ue_profile("/nonexistent/ue.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_invalid_plmn() {
        let mut profile = valid_profile();
        profile.mcc = 1000;
        assert!(matches!(
            validate_ue_profile(&profile),
            Err(ConfigValidationError::InvalidPlmn(_))
        ));

        let mut profile = valid_profile();
        profile.mnc = 1000;
        assert!(matches!(
            validate_ue_profile(&profile),
            Err(ConfigValidationError::InvalidPlmn(_))
        ));
    }

    #[test]
    fn test_invalid_msin() {
        for msin in ["", "12345678901", "00000a0001"] {
            let mut profile = valid_profile();
            profile.msin = msin.to_string();
            assert!(matches!(
                validate_ue_profile(&profile),
                Err(ConfigValidationError::InvalidMsin(_))
            ));
        }
    }

    #[test]
    fn test_invalid_routing_indicator() {
        let mut profile = valid_profile();
        profile.routing_indicator = "12345".to_string();
        assert!(matches!(
            validate_ue_profile(&profile),
            Err(ConfigValidationError::InvalidRoutingIndicator(_))
        ));
    }

    #[test]
    fn test_zero_key_rejected() {
        let mut profile = valid_profile();
        profile.auth.k = [0; 16];
        assert_eq!(validate_ue_profile(&profile), Err(ConfigValidationError::ZeroKey));
    }

    #[test]
    fn test_concealment_rejected() {
        let mut profile = valid_profile();
        profile.protection_scheme = ProtectionScheme::ProfileA;
        assert_eq!(
            validate_ue_profile(&profile),
            Err(ConfigValidationError::UnsupportedProtectionScheme(ProtectionScheme::ProfileA))
        );
    }
}
