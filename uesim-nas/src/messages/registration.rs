//! Registration Request (3GPP TS 24.501 Section 8.2.6)
//!
//! Only the initial registration the UE sends on attach is built here.

use bytes::BufMut;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use uesim_common::{Plmn, ProtectionScheme, UeProfile};

use crate::bcd;
use crate::codec::{write_lv, CodecResult, NasEncode};
use crate::enums::MmMessageType;
use crate::header::PlainHeader;
use crate::ies::Iei;
use crate::security::{NasKeySetIdentifier, UeSecurityCapability};

/// 5GS registration type value (3GPP TS 24.501 9.11.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RegistrationType {
    /// Initial registration
    #[default]
    Initial = 0x01,
    /// Mobility registration updating
    MobilityUpdating = 0x02,
    /// Periodic registration updating
    PeriodicUpdating = 0x03,
    /// Emergency registration
    Emergency = 0x04,
}

/// Follow-on request pending bit of the registration type half octet
pub const FOLLOW_ON_REQUEST_PENDING: u8 = 0x08;

// ============================================================================
// 5GS Mobile Identity, SUCI (3GPP TS 24.501 Section 9.11.3.4)
// ============================================================================

/// SUCI with SUPI format IMSI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileIdentitySuci {
    /// Home network PLMN
    pub plmn: Plmn,
    /// Routing indicator, 1 to 4 decimal digits
    pub routing_indicator: String,
    /// Protection scheme
    pub protection_scheme: ProtectionScheme,
    /// Home network public key identifier
    pub home_network_public_key_id: u8,
    /// Scheme output; the MSIN itself under the null scheme
    pub msin: String,
}

impl MobileIdentitySuci {
    /// Type of identity: SUCI
    pub const TYPE_SUCI: u8 = 0x01;
    /// SUPI format: IMSI
    pub const SUPI_FORMAT_IMSI: u8 = 0x00;

    /// Identity of the subscriber described by `profile`
    pub fn from_profile(profile: &UeProfile) -> Self {
        Self {
            plmn: profile.plmn(),
            routing_indicator: profile.routing_indicator.clone(),
            protection_scheme: profile.protection_scheme,
            home_network_public_key_id: profile.home_network_public_key_id,
            msin: profile.msin.clone(),
        }
    }

    fn scheme_output_len(&self) -> usize {
        self.msin.len().div_ceil(2)
    }

    /// Length of the identity contents, excluding the 2-octet length field
    pub fn contents_len(&self) -> usize {
        // type octet, PLMN, routing indicator, scheme, key id
        1 + 3 + 2 + 1 + 1 + self.scheme_output_len()
    }
}

impl NasEncode for MobileIdentitySuci {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        let plmn = bcd::encode_plmn(&self.plmn)?;
        let routing_indicator = bcd::encode_fixed::<2>(&self.routing_indicator, bcd::FILLER)?;
        let scheme_output = bcd::encode(&self.msin)?;

        buf.put_u16(self.contents_len() as u16);
        buf.put_u8((Self::SUPI_FORMAT_IMSI << 4) | Self::TYPE_SUCI);
        buf.put_slice(&plmn);
        buf.put_slice(&routing_indicator);
        buf.put_u8(self.protection_scheme.id());
        buf.put_u8(self.home_network_public_key_id);
        buf.put_slice(&scheme_output);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        2 + self.contents_len()
    }
}

// ============================================================================
// 5GMM capability (3GPP TS 24.501 Section 9.11.3.1)
// ============================================================================

/// 5GMM capability octet 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiveGMmCapability(pub u8);

impl FiveGMmCapability {
    /// N3 data transfer supported
    pub const N3_DATA: u8 = 0x20;
}

impl Default for FiveGMmCapability {
    fn default() -> Self {
        Self(Self::N3_DATA)
    }
}

impl NasEncode for FiveGMmCapability {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        buf.put_u8(Iei::FiveGMmCapability.into());
        write_lv(buf, &[self.0])
    }

    fn encoded_len(&self) -> usize {
        3
    }
}

// ============================================================================
// Registration Request Message (3GPP TS 24.501 Section 8.2.6)
// ============================================================================

/// Registration Request message (UE to network)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// 5GS registration type
    pub registration_type: RegistrationType,
    /// Follow-on request pending flag
    pub follow_on_request_pending: bool,
    /// ngKSI - NAS key set identifier
    pub ng_ksi: NasKeySetIdentifier,
    /// 5GS mobile identity
    pub mobile_identity: MobileIdentitySuci,
    /// 5GMM capability (optional, IEI 0x10)
    pub mm_capability: Option<FiveGMmCapability>,
    /// UE security capability (optional, IEI 0x2E)
    pub ue_security_capability: Option<UeSecurityCapability>,
}

impl RegistrationRequest {
    /// Initial registration with follow-on request pending and no NAS key
    pub fn initial(profile: &UeProfile) -> Self {
        Self {
            registration_type: RegistrationType::Initial,
            follow_on_request_pending: true,
            ng_ksi: NasKeySetIdentifier::no_key(),
            mobile_identity: MobileIdentitySuci::from_profile(profile),
            mm_capability: Some(FiveGMmCapability::default()),
            ue_security_capability: Some(UeSecurityCapability::advertised()),
        }
    }

    fn registration_type_and_ng_ksi(&self) -> u8 {
        let mut registration = u8::from(self.registration_type) & 0x07;
        if self.follow_on_request_pending {
            registration |= FOLLOW_ON_REQUEST_PENDING;
        }
        (self.ng_ksi.encode() << 4) | registration
    }
}

impl NasEncode for RegistrationRequest {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        PlainHeader::new(MmMessageType::RegistrationRequest).nas_encode(buf)?;
        buf.put_u8(self.registration_type_and_ng_ksi());
        self.mobile_identity.nas_encode(buf)?;
        if let Some(capability) = &self.mm_capability {
            capability.nas_encode(buf)?;
        }
        if let Some(capability) = &self.ue_security_capability {
            buf.put_u8(Iei::UeSecurityCapability.into());
            write_lv(buf, &capability.to_value())?;
        }
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        PlainHeader::SIZE
            + 1
            + self.mobile_identity.encoded_len()
            + self.mm_capability.map_or(0, |c| c.encoded_len())
            + self
                .ue_security_capability
                .as_ref()
                .map_or(0, |c| 2 + c.to_value().len())
    }
}
