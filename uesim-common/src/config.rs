//! UE profile configuration
//!
//! The profile carries everything the NAS layer needs to identify the
//! subscriber and run 5G-AKA. It is loaded from YAML:
//!
//! ```yaml
//! msin: "0000000001"
//! mcc: 1
//! mnc: 1
//! routing_indicator: "0000"
//! protection_scheme: "null"
//! auth:
//!   k: "8baf473f2f8fd09487cccbd7097c6862"
//!   opc: "8e27b6af0e692e750f32667a3b14605d"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Plmn;

/// Operator key type for authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpType {
    /// Operator key (OP) - needs to be converted to OPc
    Op,
    /// Operator key derived (OPc) - used directly
    #[default]
    Opc,
}

/// SUCI protection scheme identifier (3GPP TS 24.501 9.11.3.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectionScheme {
    /// Null scheme, MSIN sent in clear
    #[default]
    #[serde(rename = "null")]
    Null,
    /// ECIES profile A
    ProfileA,
    /// ECIES profile B
    ProfileB,
}

impl ProtectionScheme {
    /// Protection scheme identifier as carried in the mobile identity
    pub fn id(self) -> u8 {
        match self {
            ProtectionScheme::Null => 0,
            ProtectionScheme::ProfileA => 1,
            ProtectionScheme::ProfileB => 2,
        }
    }
}

/// Long-term authentication credentials of the subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Subscriber key K (128-bit)
    #[serde(with = "hex::serde")]
    pub k: [u8; 16],
    /// Operator key OP or OPc (128-bit), see `op_type`
    #[serde(with = "hex::serde", alias = "opc")]
    pub op: [u8; 16],
    /// Type of operator key (OP or OPc)
    #[serde(default)]
    pub op_type: OpType,
}

/// UE profile: subscriber identity and authentication parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UeProfile {
    /// Mobile Subscription Identification Number (decimal digits)
    pub msin: String,
    /// Mobile Country Code
    pub mcc: u16,
    /// Mobile Network Code
    pub mnc: u16,
    /// Force a 3-digit MNC even when `mnc` < 100
    #[serde(default)]
    pub long_mnc: bool,
    /// Routing indicator (1-4 decimal digits)
    #[serde(default = "default_routing_indicator")]
    pub routing_indicator: String,
    /// SUCI protection scheme
    #[serde(default)]
    pub protection_scheme: ProtectionScheme,
    /// Home network public key identifier
    #[serde(default)]
    pub home_network_public_key_id: u8,
    /// Authentication credentials
    pub auth: AuthConfig,
}

fn default_routing_indicator() -> String {
    "0000".to_string()
}

impl UeProfile {
    /// Creates a profile with the null protection scheme and routing indicator 0000.
    pub fn new(msin: impl Into<String>, plmn: Plmn, k: [u8; 16], opc: [u8; 16]) -> Self {
        Self {
            msin: msin.into(),
            mcc: plmn.mcc,
            mnc: plmn.mnc,
            long_mnc: plmn.long_mnc,
            routing_indicator: default_routing_indicator(),
            protection_scheme: ProtectionScheme::Null,
            home_network_public_key_id: 0,
            auth: AuthConfig {
                k,
                op: opc,
                op_type: OpType::Opc,
            },
        }
    }

    /// Home PLMN of the subscriber
    ///
    /// An MNC above 99 always uses three digits.
    pub fn plmn(&self) -> Plmn {
        Plmn::new(self.mcc, self.mnc, self.long_mnc || self.mnc > 99)
    }

    /// Parses a UE profile from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a UE profile from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the UE profile to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
