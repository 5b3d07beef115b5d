//! Packed BCD encoding of digit strings
//!
//! Two digits per octet, first digit in the low nibble. Used for the PLMN,
//! the routing indicator and the MSIN of the SUCI.

use uesim_common::Plmn;

use crate::codec::{CodecError, CodecResult};

/// Filler nibble for unused digit positions
pub const FILLER: u8 = 0x0F;

fn nibbles(digits: &str) -> CodecResult<Vec<u8>> {
    digits
        .chars()
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or(CodecError::InvalidDigit(c))
        })
        .collect()
}

/// Encode a digit string, padding an odd-length input with `filler`
///
/// Every character must be a hexadecimal digit.
pub fn encode_with_filler(digits: &str, filler: u8) -> CodecResult<Vec<u8>> {
    let nibbles = nibbles(digits)?;
    Ok(nibbles
        .chunks(2)
        .map(|pair| {
            let high = pair.get(1).copied().unwrap_or(filler & 0x0F);
            (high << 4) | pair[0]
        })
        .collect())
}

/// Encode a digit string, padding an odd-length input with `0xF`
pub fn encode(digits: &str) -> CodecResult<Vec<u8>> {
    encode_with_filler(digits, FILLER)
}

/// Encode into exactly `N` octets, filling unused positions with `filler`
pub fn encode_fixed<const N: usize>(digits: &str, filler: u8) -> CodecResult<[u8; N]> {
    let encoded = encode_with_filler(digits, filler)?;
    if encoded.len() > N {
        return Err(CodecError::InvalidLength {
            field: "BCD digits",
            expected: N,
            actual: encoded.len(),
        });
    }
    let fill = ((filler & 0x0F) << 4) | (filler & 0x0F);
    let mut out = [fill; N];
    out[..encoded.len()].copy_from_slice(&encoded);
    Ok(out)
}

fn unpack(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().flat_map(|b| [b & 0x0F, b >> 4]).collect()
}

fn render(nibbles: &[u8]) -> String {
    nibbles
        .iter()
        .filter_map(|&d| char::from_digit(u32::from(d), 16))
        .collect()
}

/// Decode packed BCD into lowercase hex digits, two per octet
///
/// Every nibble is returned, so `decode(&encode(s)?)` gives back any
/// even-length `s` (in lowercase).
pub fn decode(bytes: &[u8]) -> String {
    render(&unpack(bytes))
}

/// Decode a padded field such as the MSIN or routing indicator
///
/// Trailing `0xF` filler nibbles are dropped.
pub fn decode_trimmed(bytes: &[u8]) -> String {
    let mut digits = unpack(bytes);
    while digits.last() == Some(&FILLER) {
        digits.pop();
    }
    render(&digits)
}

/// Encode a PLMN into its 3-octet form (3GPP TS 24.008 10.5.1.13)
///
/// The digit sequence is `MCC1 MCC2 MCC3 MNC3 MNC1 MNC2`, with a filler
/// digit in place of MNC3 when the MNC has two digits.
pub fn encode_plmn(plmn: &Plmn) -> CodecResult<[u8; 3]> {
    let mcc = plmn.mcc_digits();
    let mnc = plmn.mnc_digits();

    let digits = if plmn.is_long_mnc() {
        format!("{mcc}{}{}", &mnc[2..], &mnc[..2])
    } else {
        format!("{mcc}f{mnc}")
    };
    encode_fixed::<3>(&digits, FILLER)
}
