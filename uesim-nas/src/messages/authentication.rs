//! Authentication Messages (3GPP TS 24.501 Section 8.2.1-8.2.2)
//!
//! - Authentication Request (network to UE)
//! - Authentication Response (UE to network)

use bytes::{Buf, BufMut};

use crate::codec::{read_lv, read_u8, write_lv, CodecError, CodecResult, NasEncode};
use crate::enums::MmMessageType;
use crate::header::PlainHeader;
use crate::ies::{Autn, Iei, IeList, IeRegistry, InformationElement};
use crate::security::NasKeySetIdentifier;
use crate::trace::TraceContext;

// ============================================================================
// ABBA IE (3GPP TS 24.501 Section 9.11.3.10)
// ============================================================================

/// ABBA (Anti-Bidding down Between Architectures) IE (Type 4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abba {
    /// ABBA value
    pub value: Vec<u8>,
}

impl Abba {
    /// Create a new ABBA IE
    pub fn new(value: Vec<u8>) -> Self {
        Self { value }
    }

    /// Decode from bytes (with length prefix)
    pub fn decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        Ok(Self { value: read_lv(buf)? })
    }

    /// Encode to bytes (with length prefix)
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        write_lv(buf, &self.value)
    }

    /// Get encoded length (including length field)
    pub fn encoded_len(&self) -> usize {
        1 + self.value.len()
    }
}

impl Default for Abba {
    fn default() -> Self {
        Self { value: vec![0x00, 0x00] }
    }
}

// ============================================================================
// Authentication Request Message (3GPP TS 24.501 Section 8.2.1)
// ============================================================================

/// Authentication Request message (network to UE)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    /// ngKSI - NAS key set identifier
    pub ng_ksi: NasKeySetIdentifier,
    /// ABBA
    pub abba: Abba,
    /// Optional IEs in wire order
    pub ies: IeList,
}

impl AuthenticationRequest {
    /// Build a 5G-AKA challenge carrying RAND and AUTN
    pub fn for_5g_aka(ng_ksi: NasKeySetIdentifier, abba: Abba, rand: [u8; 16], autn: Autn) -> Self {
        Self {
            ng_ksi,
            abba,
            ies: IeList {
                elements: vec![InformationElement::Rand(rand), InformationElement::Autn(autn)],
                halted_at: None,
            },
        }
    }

    /// Decode the message body (after the header has been parsed)
    pub fn decode(
        buf: &mut &[u8],
        registry: &IeRegistry,
        trace: &mut TraceContext,
    ) -> CodecResult<Self> {
        trace.line("Authentication Request");
        trace.nested(|t| -> CodecResult<Self> {
            let ksi_octet = read_u8(buf)?;
            t.line(format_args!("ngKSI: 0x{ksi_octet:x}"));
            let ng_ksi = NasKeySetIdentifier::decode(ksi_octet);

            let abba = Abba::decode(buf)?;
            t.line("ABBA");
            t.detail(format_args!("Length: {}", abba.value.len()));
            t.detail(format_args!("Value: 0x{}", hex::encode(&abba.value)));

            let ies = registry.parse_ies(buf, t)?;
            Ok(Self { ng_ksi, abba, ies })
        })
    }

    /// RAND carried by the challenge, if any
    pub fn rand(&self) -> Option<[u8; 16]> {
        self.ies.rand()
    }

    /// AUTN carried by the challenge, if any
    pub fn autn(&self) -> Option<Autn> {
        self.ies.autn()
    }
}

impl NasEncode for AuthenticationRequest {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        PlainHeader::new(MmMessageType::AuthenticationRequest).nas_encode(buf)?;
        // spare half octet + ngKSI
        buf.put_u8(self.ng_ksi.encode() & 0x0F);
        self.abba.encode(buf)?;
        for ie in &self.ies.elements {
            ie.nas_encode(buf)?;
        }
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        PlainHeader::SIZE
            + 1
            + self.abba.encoded_len()
            + self.ies.elements.iter().map(|ie| ie.encoded_len()).sum::<usize>()
    }
}

// ============================================================================
// Authentication Response Message (3GPP TS 24.501 Section 8.2.2)
// ============================================================================

/// Authentication Response message (UE to network) carrying RES*
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationResponse {
    /// Authentication response parameter (IEI 0x2D)
    pub res_star: [u8; 16],
}

impl AuthenticationResponse {
    /// Size of the encoded message
    pub const SIZE: usize = PlainHeader::SIZE + 2 + 16;

    /// Response carrying the given RES*
    pub fn with_res_star(res_star: [u8; 16]) -> Self {
        Self { res_star }
    }

    /// Decode the message body (after the header has been parsed)
    pub fn decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        let iei = read_u8(buf)?;
        if iei != u8::from(Iei::AuthenticationResponseParameter) {
            return Err(CodecError::InvalidValue(format!(
                "expected authentication response parameter, got IEI 0x{iei:02x}"
            )));
        }
        let value = read_lv(buf)?;
        let res_star: [u8; 16] = value.as_slice().try_into().map_err(|_| CodecError::InvalidLength {
            field: "RES*",
            expected: 16,
            actual: value.len(),
        })?;
        Ok(Self { res_star })
    }
}

impl NasEncode for AuthenticationResponse {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        PlainHeader::new(MmMessageType::AuthenticationResponse).nas_encode(buf)?;
        buf.put_u8(Iei::AuthenticationResponseParameter.into());
        write_lv(buf, &self.res_star)
    }

    fn encoded_len(&self) -> usize {
        Self::SIZE
    }
}
