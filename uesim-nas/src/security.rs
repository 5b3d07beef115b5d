//! NAS security parameters carried in 5GMM messages
//!
//! Key set identifier, selected NAS security algorithms and the UE security
//! capability, per 3GPP TS 24.501 9.11.3. Only the parameter encodings live
//! here; message protection itself is not implemented.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::codec::{CodecError, CodecResult};

/// TSC bit of the ngKSI (TS 24.501 9.11.3.32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SecurityContextType {
    /// Context created by a 5G-AKA run
    #[default]
    Native = 0,
    /// Context mapped from an EPS one
    Mapped = 1,
}

/// ngKSI half-octet (TS 24.501 9.11.3.32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NasKeySetIdentifier {
    /// Native or mapped
    pub tsc: SecurityContextType,
    /// 0..=6, or [`Self::NO_KEY_AVAILABLE`]
    pub ksi: u8,
}

impl Default for NasKeySetIdentifier {
    fn default() -> Self {
        Self::no_key()
    }
}

impl NasKeySetIdentifier {
    /// KSI the UE sends when it holds no key set
    pub const NO_KEY_AVAILABLE: u8 = 0x07;

    /// ngKSI with `ksi` truncated to three bits
    pub fn new(tsc: SecurityContextType, ksi: u8) -> Self {
        Self { tsc, ksi: ksi & 0x07 }
    }

    /// Native context with no key available
    pub fn no_key() -> Self {
        Self {
            tsc: SecurityContextType::Native,
            ksi: Self::NO_KEY_AVAILABLE,
        }
    }

    /// Whether this is the no-key code point
    pub fn is_no_key(&self) -> bool {
        self.ksi == Self::NO_KEY_AVAILABLE
    }

    /// Encode to a half octet
    pub fn encode(&self) -> u8 {
        (u8::from(self.tsc) << 3) | (self.ksi & 0x07)
    }

    /// Decode from the low half of `value`; the high half is ignored
    pub fn decode(value: u8) -> Self {
        let tsc = if value & 0x08 != 0 {
            SecurityContextType::Mapped
        } else {
            SecurityContextType::Native
        };
        Self { tsc, ksi: value & 0x07 }
    }
}

/// Ciphering half of the selected algorithms IE (TS 24.501 9.11.3.34)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CipheringAlgorithm {
    /// NEA0, no ciphering
    #[default]
    Nea0 = 0x00,
    /// 128-NEA1, SNOW 3G
    Nea1 = 0x01,
    /// 128-NEA2, AES-CTR
    Nea2 = 0x02,
    /// 128-NEA3, ZUC
    Nea3 = 0x03,
}

/// Integrity half of the selected algorithms IE (TS 24.501 9.11.3.34)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum IntegrityAlgorithm {
    /// NIA0, no integrity protection
    #[default]
    Nia0 = 0x00,
    /// 128-NIA1, SNOW 3G
    Nia1 = 0x01,
    /// 128-NIA2, AES-CMAC
    Nia2 = 0x02,
    /// 128-NIA3, ZUC
    Nia3 = 0x03,
}

/// Selected NAS security algorithms octet
///
/// The raw octet is kept so that spare or future algorithm codes received
/// from the network do not fail the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NasSecurityAlgorithms(pub u8);

impl NasSecurityAlgorithms {
    /// Build from known algorithms
    pub fn new(ciphering: CipheringAlgorithm, integrity: IntegrityAlgorithm) -> Self {
        Self((u8::from(ciphering) << 4) | u8::from(integrity))
    }

    /// Raw ciphering nibble
    pub fn ciphering_raw(&self) -> u8 {
        (self.0 >> 4) & 0x0F
    }

    /// Raw integrity nibble
    pub fn integrity_raw(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Ciphering algorithm, if the code is one this crate knows
    pub fn ciphering(&self) -> Option<CipheringAlgorithm> {
        CipheringAlgorithm::try_from(self.ciphering_raw()).ok()
    }

    /// Integrity algorithm, if the code is one this crate knows
    pub fn integrity(&self) -> Option<IntegrityAlgorithm> {
        IntegrityAlgorithm::try_from(self.integrity_raw()).ok()
    }
}

/// UE security capability (3GPP TS 24.501 9.11.3.54)
///
/// Octet 1 is the 5G-EA bitmap (EA0 in the MSB), octet 2 the 5G-IA bitmap.
/// Octets 3 and 4 carry the EPS EEA/EIA bitmaps; octets 5 to 8 are spare.
/// Everything past octet 2 is kept as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeSecurityCapability {
    /// 5G-EA0..5G-EA7 bitmap
    pub ea: u8,
    /// 5G-IA0..5G-IA7 bitmap
    pub ia: u8,
    /// Value octets 3 onwards, at most six
    pub extra: Vec<u8>,
}

impl UeSecurityCapability {
    /// 5G-EA0 / 5G-IA0 bit
    pub const ALG0: u8 = 0x80;
    /// 128-5G-EA1 / 128-5G-IA1 bit
    pub const ALG1: u8 = 0x40;
    /// 128-5G-EA2 / 128-5G-IA2 bit
    pub const ALG2: u8 = 0x20;
    /// 128-5G-EA3 / 128-5G-IA3 bit
    pub const ALG3: u8 = 0x10;

    /// Longest value part allowed on the wire
    pub const MAX_VALUE_LEN: usize = 8;

    /// Capability advertised by this UE: null ciphering, IA0 and IA2,
    /// no EPS algorithms
    pub fn advertised() -> Self {
        Self {
            ea: Self::ALG0,
            ia: Self::ALG0 | Self::ALG2,
            extra: vec![0x00, 0x00],
        }
    }

    /// EEA and EIA bitmaps, when both octets are present
    pub fn eps(&self) -> Option<[u8; 2]> {
        match self.extra.as_slice() {
            [eea, eia, ..] => Some([*eea, *eia]),
            _ => None,
        }
    }

    /// Value octets without the length octet
    pub fn to_value(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.extra.len());
        out.push(self.ea);
        out.push(self.ia);
        out.extend_from_slice(&self.extra);
        out
    }

    /// Parse the value octets (2 to 8 octets)
    pub fn from_value(value: &[u8]) -> CodecResult<Self> {
        match value {
            [ea, ia, extra @ ..] if value.len() <= Self::MAX_VALUE_LEN => Ok(Self {
                ea: *ea,
                ia: *ia,
                extra: extra.to_vec(),
            }),
            _ => Err(CodecError::InvalidLength {
                field: "UE security capability",
                expected: 2,
                actual: value.len(),
            }),
        }
    }

    /// True if the given 5G-IA bit is set
    pub fn supports_integrity(&self, algorithm: IntegrityAlgorithm) -> bool {
        self.ia & (0x80 >> u8::from(algorithm)) != 0
    }

    /// True if the given 5G-EA bit is set
    pub fn supports_ciphering(&self, algorithm: CipheringAlgorithm) -> bool {
        self.ea & (0x80 >> u8::from(algorithm)) != 0
    }
}
