//! NAS message header structures
//!
//! Implements 5G NAS message headers according to 3GPP TS 24.501
//!
//! ## Plain 5GMM Header (3 bytes)
//! ```text
//! +------------------+------------------+------------------+
//! |       EPD        |  Security Header |   Message Type   |
//! |     (1 byte)     |  Type (4 bits)   |    (1 byte)      |
//! |                  |  Spare (4 bits)  |                  |
//! +------------------+------------------+------------------+
//! ```
//!
//! ## Security Protected Header (7 bytes)
//! ```text
//! +------------------+------------------+------------------+------------------+
//! |       EPD        |  Security Header |        Message Authentication      |
//! |     (1 byte)     |  Type (1 byte)   |           Code (4 bytes)           |
//! +------------------+------------------+------------------+------------------+
//! |  Sequence Number |                  Plain NAS Message                    |
//! |     (1 byte)     |                      (variable)                       |
//! +------------------+------------------------------------------------------ +
//! ```

use bytes::{Buf, BufMut};

use crate::codec::{read_array, read_u8, CodecResult, NasDecode, NasEncode};
use crate::enums::{ExtendedProtocolDiscriminator, MmMessageType, SecurityHeaderType};

/// Plain 5GMM NAS message header
///
/// The message type is kept raw so that headers of messages this crate has
/// no decoder for can still be exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainHeader {
    /// Extended Protocol Discriminator
    pub epd: ExtendedProtocolDiscriminator,
    /// Security header type
    pub security_header_type: SecurityHeaderType,
    /// Raw message type octet
    pub message_type: u8,
}

impl PlainHeader {
    /// Size of the plain MM header in bytes
    pub const SIZE: usize = 3;

    /// Create a plain, unprotected 5GMM header
    pub fn new(message_type: MmMessageType) -> Self {
        Self {
            epd: ExtendedProtocolDiscriminator::MobilityManagement,
            security_header_type: SecurityHeaderType::NotProtected,
            message_type: message_type.into(),
        }
    }

    /// Message type as a known 5GMM message, if it is one
    pub fn mm_message_type(&self) -> Option<MmMessageType> {
        MmMessageType::try_from(self.message_type).ok()
    }

    /// Human-readable message type for diagnostics
    pub fn message_name(&self) -> &'static str {
        self.mm_message_type().map_or("Unknown", |mt| mt.name())
    }
}

impl NasEncode for PlainHeader {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        self.epd.nas_encode(buf)?;
        self.security_header_type.nas_encode(buf)?;
        buf.put_u8(self.message_type);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        Self::SIZE
    }
}

impl NasDecode for PlainHeader {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        let epd = ExtendedProtocolDiscriminator::nas_decode(buf)?;
        let security_header_type = SecurityHeaderType::nas_decode(buf)?;
        let message_type = read_u8(buf)?;
        Ok(Self {
            epd,
            security_header_type,
            message_type,
        })
    }
}

/// Integrity protection wrapper following EPD and security header type
///
/// The MAC is exposed as received; it is not verified here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityWrapper {
    /// Security header type the wrapper was announced with
    pub security_header_type: SecurityHeaderType,
    /// Message Authentication Code (MAC) - 32 bits
    pub mac: [u8; 4],
    /// NAS message sequence number
    pub sequence_number: u8,
}

impl SecurityWrapper {
    /// Bytes consumed after the EPD and security header type octets
    pub const SIZE: usize = 5;

    /// Decode the MAC and sequence number
    pub fn decode<B: Buf>(buf: &mut B, security_header_type: SecurityHeaderType) -> CodecResult<Self> {
        let mac = read_array::<4, _>(buf)?;
        let sequence_number = read_u8(buf)?;
        Ok(Self {
            security_header_type,
            mac,
            sequence_number,
        })
    }

    /// Encode EPD, security header type, MAC and sequence number
    pub fn encode<B: BufMut>(&self, epd: ExtendedProtocolDiscriminator, buf: &mut B) -> CodecResult<()> {
        epd.nas_encode(buf)?;
        self.security_header_type.nas_encode(buf)?;
        buf.put_slice(&self.mac);
        buf.put_u8(self.sequence_number);
        Ok(())
    }
}
