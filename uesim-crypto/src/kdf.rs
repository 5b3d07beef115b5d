//! Key derivation functions for 5G-AKA
//!
//! The generic KDF of 3GPP TS 33.220 Annex B.2 is HMAC-SHA-256 over
//! `S = FC || P0 || L0 || ... || Pn || Ln`. The UE only needs one
//! instance of it: RES* (3GPP TS 33.501 Annex A.4), keyed with CK || IK.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use unicode_normalization::UnicodeNormalization;

/// HMAC-SHA256 output size in bytes
pub const HMAC_SHA256_SIZE: usize = 32;

/// CK || IK
pub const KEY_256_SIZE: usize = 32;

/// CK, IK, RAND and RES*
pub const KEY_128_SIZE: usize = 16;

/// FC of the RES*/XRES* derivation
pub const FC_RES_STAR: u8 = 0x6B;

/// HMAC-SHA-256 of `input` under `key`
pub fn hmac_sha256(key: &[u8], input: &[u8]) -> [u8; HMAC_SHA256_SIZE] {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts keys of any size"));
    mac.update(input);
    let mut output = [0u8; HMAC_SHA256_SIZE];
    output.copy_from_slice(&mac.finalize().into_bytes());
    output
}

/// Build the KDF input string `S`
///
/// Each `Li` is the length of `Pi` as 2 octets, big-endian.
pub fn build_kdf_input(fc: u8, parameters: &[&[u8]]) -> Vec<u8> {
    let capacity = 1 + parameters.iter().map(|p| p.len() + 2).sum::<usize>();
    let mut input = Vec::with_capacity(capacity);
    input.push(fc);

    for param in parameters {
        input.extend_from_slice(param);
        input.extend_from_slice(&(param.len() as u16).to_be_bytes());
    }

    input
}

/// KDF output for `fc` and `parameters` under a 256-bit key
pub fn calculate_kdf_key(key: &[u8; KEY_256_SIZE], fc: u8, parameters: &[&[u8]]) -> [u8; KEY_256_SIZE] {
    hmac_sha256(key, &build_kdf_input(fc, parameters))
}

/// Character string parameter as KDF input: NFKC, then UTF-8
/// (3GPP TS 33.501 Annex B.2.1.2)
pub fn encode_kdf_string(s: &str) -> Vec<u8> {
    s.nfkc().collect::<String>().into_bytes()
}

/// RES* for one challenge
///
/// `sn_name` is the encoded serving network name and `res` the f2 output.
/// The result is the low 128 bits of the KDF output.
pub fn derive_res_star(
    ck: &[u8; KEY_128_SIZE],
    ik: &[u8; KEY_128_SIZE],
    sn_name: &[u8],
    rand: &[u8; KEY_128_SIZE],
    res: &[u8],
) -> [u8; KEY_128_SIZE] {
    let mut key = [0u8; KEY_256_SIZE];
    key[..KEY_128_SIZE].copy_from_slice(ck);
    key[KEY_128_SIZE..].copy_from_slice(ik);

    let output = calculate_kdf_key(&key, FC_RES_STAR, &[sn_name, rand, res]);

    let mut res_star = [0u8; KEY_128_SIZE];
    res_star.copy_from_slice(&output[KEY_128_SIZE..]);
    res_star
}
