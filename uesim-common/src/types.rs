//! Core 5G types shared across uesim crates

use std::fmt;

use serde::{Deserialize, Serialize};

/// Public Land Mobile Network identifier.
///
/// A PLMN uniquely identifies a mobile network and consists of:
/// - MCC (Mobile Country Code): 3 decimal digits (000-999)
/// - MNC (Mobile Network Code): 2 or 3 decimal digits
///
/// An MNC above 99 is always three digits, whatever `long_mnc` says.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile Country Code (3 digits, range 0-999)
    pub mcc: u16,
    /// Mobile Network Code (2-3 digits, range 0-999)
    pub mnc: u16,
    /// Forces a 3-digit MNC for values below 100
    pub long_mnc: bool,
}

impl Plmn {
    /// Creates a new PLMN with the given MCC and MNC.
    pub const fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        Self { mcc, mnc, long_mnc }
    }

    /// MCC as three decimal digits
    pub fn mcc_digits(&self) -> String {
        format!("{:03}", self.mcc % 1000)
    }

    /// Whether the MNC is coded with three digits
    pub fn is_long_mnc(&self) -> bool {
        self.long_mnc || self.mnc > 99
    }

    /// MNC as two or three decimal digits, see [`Plmn::is_long_mnc`]
    pub fn mnc_digits(&self) -> String {
        if self.is_long_mnc() {
            format!("{:03}", self.mnc % 1000)
        } else {
            format!("{:02}", self.mnc % 100)
        }
    }

    /// Serving network name of this PLMN (3GPP TS 24.501 9.12.1)
    ///
    /// The MNC is always rendered with three digits here.
    pub fn serving_network_name(&self) -> String {
        format!(
            "5G:mnc{:03}.mcc{:03}.3gppnetwork.org",
            self.mnc % 1000,
            self.mcc % 1000
        )
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plmn({}-{})", self.mcc_digits(), self.mnc_digits())
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mcc_digits(), self.mnc_digits())
    }
}
