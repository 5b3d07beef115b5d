//! Wire codec for 5GMM messages and IEs
//!
//! [`NasEncode`] writes a value into any [`BufMut`], [`NasDecode`] reads one
//! back from a [`Buf`]. Decoders never index the buffer directly; they go
//! through the bounds-checked cursor helpers below so a short PDU turns
//! into a [`CodecError`] instead of a panic.
//!
//! ```rust
//!
//! use uesim_nas::codec::{NasEncode, NasDecode};
//! use uesim_nas::header::PlainHeader;
//! use uesim_nas::enums::MmMessageType;
//!
//! let header = PlainHeader::new(MmMessageType::AuthenticationResponse);
//! let mut buf = Vec::new();
//! header.nas_encode(&mut buf).unwrap();
//! assert_eq!(buf, [0x7e, 0x00, 0x57]);
//!
//! let decoded = PlainHeader::nas_decode(&mut buf.as_slice()).unwrap();
//! assert_eq!(decoded.mm_message_type(), Some(MmMessageType::AuthenticationResponse));
//! ```

use bytes::{Buf, BufMut};
use thiserror::Error;

/// Wire-level encode/decode failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes left than the next field needs
    #[error("Buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Bytes the field needs
        expected: usize,
        /// Bytes left in the cursor
        actual: usize,
    },

    /// An IE length octet points past the end of the PDU
    #[error("Length exceeds buffer: length field is {length}, but only {remaining} bytes remain")]
    LengthExceedsBuffer {
        /// Value of the length octet(s)
        length: usize,
        /// Bytes left after the length octet(s)
        remaining: usize,
    },

    /// Declared PDU length is larger than the buffer holding it
    #[error("Declared PDU length {declared} exceeds buffer of {actual} bytes")]
    DeclaredLengthExceedsBuffer {
        /// Length declared by the caller
        declared: usize,
        /// Bytes actually present
        actual: usize,
    },

    /// A field has a length other than the one it must have
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Field name
        field: &'static str,
        /// Required length
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Field value outside its coding range
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// EPD octet that is neither 5GMM nor 5GSM
    #[error("Invalid protocol discriminator: 0x{0:02X}")]
    InvalidProtocolDiscriminator(u8),

    /// Security header type nibble with no assigned meaning
    #[error("Invalid security header type: 0x{0:02X}")]
    InvalidSecurityHeaderType(u8),

    /// Character that is not a hexadecimal digit in a BCD input
    #[error("Invalid BCD digit: {0:?}")]
    InvalidDigit(char),

    /// Value cannot be represented on the wire
    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// Shorthand for codec results
pub type CodecResult<T> = Result<T, CodecError>;

/// Types with a NAS wire encoding
pub trait NasEncode {
    /// Append the wire form of `self` to `buf`
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()>;

    /// Number of octets [`NasEncode::nas_encode`] writes
    fn encoded_len(&self) -> usize;

    /// Encode into a freshly allocated vector
    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.nas_encode(&mut buf)?;
        Ok(buf)
    }
}

/// Types that can be read back from their NAS wire encoding
pub trait NasDecode: Sized {
    /// Consume one value from the front of `buf`
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self>;
}

// Cursor helpers

/// Fail with [`CodecError::BufferTooShort`] unless `needed` bytes remain
#[inline]
pub fn ensure_remaining<B: Buf>(buf: &B, needed: usize) -> CodecResult<()> {
    if buf.remaining() < needed {
        return Err(CodecError::BufferTooShort {
            expected: needed,
            actual: buf.remaining(),
        });
    }
    Ok(())
}

/// Look at the next octet without consuming it
pub fn peek_u8<B: Buf>(buf: &B) -> CodecResult<u8> {
    ensure_remaining(buf, 1)?;
    Ok(buf.chunk()[0])
}

/// Read one octet
pub fn read_u8<B: Buf>(buf: &mut B) -> CodecResult<u8> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8())
}

/// Read a fixed-size field
pub fn read_array<const N: usize, B: Buf>(buf: &mut B) -> CodecResult<[u8; N]> {
    ensure_remaining(buf, N)?;
    let mut out = [0u8; N];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

/// Read a Type 4 value: one length octet followed by that many octets
pub fn read_lv<B: Buf>(buf: &mut B) -> CodecResult<Vec<u8>> {
    let length = read_u8(buf)? as usize;
    if buf.remaining() < length {
        return Err(CodecError::LengthExceedsBuffer {
            length,
            remaining: buf.remaining(),
        });
    }
    let mut value = vec![0u8; length];
    buf.copy_to_slice(&mut value);
    Ok(value)
}

/// Write a Type 4 value with its length octet
pub fn write_lv<B: BufMut>(buf: &mut B, value: &[u8]) -> CodecResult<()> {
    if value.len() > u8::MAX as usize {
        return Err(CodecError::EncodingError(format!(
            "Type 4 IE length {} exceeds maximum of 255",
            value.len()
        )));
    }
    buf.put_u8(value.len() as u8);
    buf.put_slice(value);
    Ok(())
}

// Integers and raw octets

impl NasEncode for u8 {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        buf.put_u8(*self);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        1
    }
}

impl NasDecode for u8 {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        read_u8(buf)
    }
}

impl NasEncode for u16 {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        buf.put_u16(*self);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        2
    }
}

impl NasDecode for u16 {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        ensure_remaining(buf, 2)?;
        Ok(buf.get_u16())
    }
}

impl<const N: usize> NasEncode for [u8; N] {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        buf.put_slice(self);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        N
    }
}

impl<const N: usize> NasDecode for [u8; N] {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        read_array(buf)
    }
}

impl NasEncode for Vec<u8> {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        buf.put_slice(self);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        self.len()
    }
}

// Header enums

use crate::enums::{ExtendedProtocolDiscriminator, SecurityHeaderType};

impl NasEncode for ExtendedProtocolDiscriminator {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        buf.put_u8((*self).into());
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        1
    }
}

impl NasDecode for ExtendedProtocolDiscriminator {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        let value = read_u8(buf)?;
        ExtendedProtocolDiscriminator::try_from(value)
            .map_err(|_| CodecError::InvalidProtocolDiscriminator(value))
    }
}

impl NasEncode for SecurityHeaderType {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        // Spare half octet stays zero
        buf.put_u8(u8::from(*self) & 0x0F);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        1
    }
}

impl NasDecode for SecurityHeaderType {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        let value = read_u8(buf)?;
        SecurityHeaderType::try_from(value & 0x0F)
            .map_err(|_| CodecError::InvalidSecurityHeaderType(value))
    }
}
