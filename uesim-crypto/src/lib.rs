//! Cryptographic algorithms for uesim
//!
//! Implements the UE side of 5G-AKA:
//! - Milenage f1-f5* (3GPP TS 35.206)
//! - AES-128 single-block primitive used by Milenage
//! - HMAC-SHA-256 key derivation and RES* (3GPP TS 33.501 Annex A.4)

pub mod aes;
pub mod kdf;
pub mod milenage;

pub use kdf::{derive_res_star, encode_kdf_string};
pub use milenage::{compute_opc, F1Output, F2345Output, Milenage};
