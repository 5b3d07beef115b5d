//! Information element registry and parser
//!
//! The optional part of a downlink 5GMM message is a sequence of tagged IEs.
//! Two tag forms occur:
//!
//! - Type 1 (half octet): the top bit of the octet is set, the high nibble is
//!   the IEI and the low nibble is the value. The octet stays in the buffer
//!   and the handler consumes it.
//! - Type 3/4 (full octet): the octet is the IEI and is consumed before the
//!   handler runs.
//!
//! Handlers are plain `fn` pointers held in an [`IeRegistry`]. The first IEI
//! without a handler stops parsing and the rest of the buffer is discarded.

use std::collections::BTreeMap;
use std::fmt;

use bytes::{Buf, BufMut};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::codec::{
    peek_u8, read_array, read_lv, read_u8, write_lv, CodecError, CodecResult, NasEncode,
};
use crate::security::UeSecurityCapability;
use crate::trace::TraceContext;

/// Information element identifiers known to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Iei {
    /// IMEISV request (type 1, 9.11.3.28)
    ImeisvRequest = 0x0E,
    /// 5GMM capability (type 4, 9.11.3.1)
    FiveGMmCapability = 0x10,
    /// Authentication parameter AUTN (type 4, 9.11.3.15)
    AuthenticationParameterAutn = 0x20,
    /// Authentication parameter RAND (type 3, 9.11.3.16)
    AuthenticationParameterRand = 0x21,
    /// Authentication response parameter (type 4, 9.11.3.17)
    AuthenticationResponseParameter = 0x2D,
    /// UE security capability (type 4, 9.11.3.54)
    UeSecurityCapability = 0x2E,
    /// Additional 5G security information (type 4, 9.11.3.12)
    Additional5gSecurityInformation = 0x36,
}

impl Iei {
    /// Human-readable IE name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Iei::ImeisvRequest => "IMEISV Request IE",
            Iei::FiveGMmCapability => "5G MM Capability IE",
            Iei::AuthenticationParameterAutn => "Authentication Parameter AUTN IE",
            Iei::AuthenticationParameterRand => "Authentication Parameter RAND IE",
            Iei::AuthenticationResponseParameter => "Authentication response parameter IE",
            Iei::UeSecurityCapability => "UE Security Capability IE",
            Iei::Additional5gSecurityInformation => "Additional 5G Security Information IE",
        }
    }
}

/// Authentication parameter AUTN (3GPP TS 33.102 6.3.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autn {
    /// SQN concealed with the anonymity key
    pub sqn_xor_ak: [u8; 6],
    /// Authentication management field
    pub amf: [u8; 2],
    /// Network authentication code MAC-A
    pub mac: [u8; 8],
}

impl Autn {
    /// Size of AUTN in bytes
    pub const SIZE: usize = 16;

    /// Split a 16-byte AUTN value into its parts
    pub fn from_value(value: &[u8]) -> CodecResult<Self> {
        if value.len() != Self::SIZE {
            return Err(CodecError::InvalidLength {
                field: "AUTN",
                expected: Self::SIZE,
                actual: value.len(),
            });
        }
        let mut autn = Self {
            sqn_xor_ak: [0; 6],
            amf: [0; 2],
            mac: [0; 8],
        };
        autn.sqn_xor_ak.copy_from_slice(&value[..6]);
        autn.amf.copy_from_slice(&value[6..8]);
        autn.mac.copy_from_slice(&value[8..]);
        Ok(autn)
    }

    /// Reassemble the 16-byte value
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..6].copy_from_slice(&self.sqn_xor_ak);
        out[6..8].copy_from_slice(&self.amf);
        out[8..].copy_from_slice(&self.mac);
        out
    }
}

/// A decoded optional information element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InformationElement {
    /// IMEISV request value (low nibble)
    ImeisvRequest(u8),
    /// Authentication parameter AUTN
    Autn(Autn),
    /// Authentication parameter RAND
    Rand([u8; 16]),
    /// UE security capability echoed by the network
    UeSecurityCapability(UeSecurityCapability),
    /// Additional 5G security information value
    Additional5gSecurityInformation(Vec<u8>),
    /// Value produced by a handler registered outside this crate
    Raw {
        /// IEI the handler was registered for
        iei: u8,
        /// Value octets
        value: Vec<u8>,
    },
    /// IEI without a handler; parsing stopped here
    Unsupported(u8),
}

impl NasEncode for InformationElement {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        match self {
            InformationElement::ImeisvRequest(value) => {
                buf.put_u8((u8::from(Iei::ImeisvRequest) << 4) | (value & 0x0F));
            }
            InformationElement::Autn(autn) => {
                buf.put_u8(Iei::AuthenticationParameterAutn.into());
                write_lv(buf, &autn.to_bytes())?;
            }
            InformationElement::Rand(rand) => {
                buf.put_u8(Iei::AuthenticationParameterRand.into());
                buf.put_slice(rand);
            }
            InformationElement::UeSecurityCapability(capability) => {
                buf.put_u8(Iei::UeSecurityCapability.into());
                write_lv(buf, &capability.to_value())?;
            }
            InformationElement::Additional5gSecurityInformation(value) => {
                buf.put_u8(Iei::Additional5gSecurityInformation.into());
                write_lv(buf, value)?;
            }
            InformationElement::Raw { iei, value } => {
                buf.put_u8(*iei);
                write_lv(buf, value)?;
            }
            // nothing was decoded, nothing to write
            InformationElement::Unsupported(_) => {}
        }
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        match self {
            InformationElement::ImeisvRequest(_) => 1,
            InformationElement::Autn(_) => 2 + Autn::SIZE,
            InformationElement::Rand(_) => 17,
            InformationElement::UeSecurityCapability(capability) => 2 + capability.to_value().len(),
            InformationElement::Additional5gSecurityInformation(value) => 2 + value.len(),
            InformationElement::Raw { value, .. } => 2 + value.len(),
            InformationElement::Unsupported(_) => 0,
        }
    }
}

/// Decoder for one IE
///
/// For a full-octet IEI the cursor starts after the IEI octet. For a
/// half-octet IEI it starts at the octet holding both IEI and value.
pub type IeHandler = fn(&mut &[u8], &mut TraceContext) -> CodecResult<InformationElement>;

#[derive(Clone, Copy)]
struct Registration {
    name: &'static str,
    handler: IeHandler,
}

/// Dispatch table from IEI to decoder
#[derive(Clone, Default)]
pub struct IeRegistry {
    handlers: BTreeMap<u8, Registration>,
}

impl fmt::Debug for IeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(iei, r)| (format!("0x{iei:02x}"), r.name)))
            .finish()
    }
}

impl IeRegistry {
    /// Empty registry; every IE halts parsing
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the IEs that appear in Authentication Request and
    /// Security Mode Command
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register_known(Iei::ImeisvRequest, decode_imeisv_request);
        registry.register_known(Iei::AuthenticationParameterAutn, decode_autn);
        registry.register_known(Iei::AuthenticationParameterRand, decode_rand);
        registry.register_known(Iei::UeSecurityCapability, decode_ue_security_capability);
        registry.register_known(
            Iei::Additional5gSecurityInformation,
            decode_additional_5g_security_information,
        );
        registry
    }

    fn register_known(&mut self, iei: Iei, handler: IeHandler) {
        self.register(iei.into(), iei.name(), handler);
    }

    /// Install or replace the handler for `iei`
    ///
    /// Half-octet IEs are registered under their 4-bit identifier.
    pub fn register(&mut self, iei: u8, name: &'static str, handler: IeHandler) {
        self.handlers.insert(iei, Registration { name, handler });
    }

    /// True if a handler exists for `iei`
    pub fn contains(&self, iei: u8) -> bool {
        self.handlers.contains_key(&iei)
    }

    /// Parse IEs until the buffer is exhausted or an unknown IEI is met
    pub fn parse_ies(&self, buf: &mut &[u8], trace: &mut TraceContext) -> CodecResult<IeList> {
        let mut list = IeList::default();

        while buf.has_remaining() {
            let first = peek_u8(buf)?;
            let iei = if first & 0x80 != 0 {
                first >> 4
            } else {
                buf.advance(1);
                first
            };

            let Some(registration) = self.handlers.get(&iei).copied() else {
                trace.line(format_args!("Non Supported IE (0x{iei:02x})"));
                tracing::debug!(iei, discarded = buf.remaining(), "Unsupported IE, stopping IE parsing");
                buf.advance(buf.remaining());
                list.elements.push(InformationElement::Unsupported(iei));
                list.halted_at = Some(iei);
                break;
            };

            trace.line(registration.name);
            let element = trace.nested(|t| (registration.handler)(buf, t))?;
            list.elements.push(element);
        }

        Ok(list)
    }
}

/// Result of an IE parsing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IeList {
    /// Decoded elements in wire order
    pub elements: Vec<InformationElement>,
    /// IEI that had no handler, if parsing stopped early
    pub halted_at: Option<u8>,
}

impl IeList {
    /// Last RAND in the list
    pub fn rand(&self) -> Option<[u8; 16]> {
        self.elements.iter().rev().find_map(|ie| match ie {
            InformationElement::Rand(rand) => Some(*rand),
            _ => None,
        })
    }

    /// Last AUTN in the list
    pub fn autn(&self) -> Option<Autn> {
        self.elements.iter().rev().find_map(|ie| match ie {
            InformationElement::Autn(autn) => Some(*autn),
            _ => None,
        })
    }

    /// Number of decoded elements, including an unsupported marker
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if nothing was decoded
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn decode_imeisv_request(buf: &mut &[u8], trace: &mut TraceContext) -> CodecResult<InformationElement> {
    let value = read_u8(buf)? & 0x0F;
    trace.line(format_args!("value: 0x{value:x}"));
    Ok(InformationElement::ImeisvRequest(value))
}

fn decode_autn(buf: &mut &[u8], trace: &mut TraceContext) -> CodecResult<InformationElement> {
    let value = read_lv(buf)?;
    trace.line(format_args!("AUTN: {}", hex::encode(&value)));
    let autn = Autn::from_value(&value)?;
    trace.line(format_args!("SEQ xor AK: {}", hex::encode(autn.sqn_xor_ak)));
    trace.line(format_args!("AMF       : {}", hex::encode(autn.amf)));
    trace.line(format_args!("MAC       : {}", hex::encode(autn.mac)));
    Ok(InformationElement::Autn(autn))
}

fn decode_rand(buf: &mut &[u8], trace: &mut TraceContext) -> CodecResult<InformationElement> {
    let rand = read_array::<16, _>(buf)?;
    trace.line(format_args!("RAND: 0x{}", hex::encode(rand)));
    Ok(InformationElement::Rand(rand))
}

fn decode_ue_security_capability(
    buf: &mut &[u8],
    trace: &mut TraceContext,
) -> CodecResult<InformationElement> {
    let value = read_lv(buf)?;
    trace.line(format_args!("Capability: 0x{}", hex::encode(&value)));
    Ok(InformationElement::UeSecurityCapability(UeSecurityCapability::from_value(&value)?))
}

fn decode_additional_5g_security_information(
    buf: &mut &[u8],
    trace: &mut TraceContext,
) -> CodecResult<InformationElement> {
    let value = read_lv(buf)?;
    trace.line(format_args!("value: 0x{}", hex::encode(&value)));
    Ok(InformationElement::Additional5gSecurityInformation(value))
}
