//! Raw AES-128 block encryption for Milenage

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;

/// Cipher block length
pub const BLOCK_SIZE: usize = 16;

/// Cipher key length
pub const KEY_SIZE: usize = 16;

/// Expanded AES-128 key schedule, used one block at a time
#[derive(Clone)]
pub struct Aes128Block {
    cipher: Aes128,
}

impl Aes128Block {
    /// Expand `key`
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let cipher = Aes128::new(GenericArray::from_slice(key));
        Self { cipher }
    }

    /// `E_K(block)` in place
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let generic_block = GenericArray::from_mut_slice(block);
        self.cipher.encrypt_block(generic_block);
    }

    /// `E_K(block)` into a new array
    pub fn encrypt_block_copy(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut result = *block;
        self.encrypt_block(&mut result);
        result
    }
}

/// `a ^= b`
#[inline]
pub fn xor_block(a: &mut [u8; BLOCK_SIZE], b: &[u8; BLOCK_SIZE]) {
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x ^= y;
    }
}

/// Compare two byte strings without early exit
///
/// Returns false when the lengths differ.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes128_encrypt_block() {
        // NIST FIPS 197 Appendix C.1
        let key: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        ];
        let plaintext: [u8; 16] = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
            0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
        ];
        let expected: [u8; 16] = [
            0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30,
            0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5, 0x5a,
        ];

        let cipher = Aes128Block::new(&key);
        assert_eq!(cipher.encrypt_block_copy(&plaintext), expected);

        let mut block = plaintext;
        cipher.encrypt_block(&mut block);
        assert_eq!(block, expected);
    }

    #[test]
    fn test_xor_block() {
        let mut a = [0xF0u8; 16];
        xor_block(&mut a, &[0xFFu8; 16]);
        assert_eq!(a, [0x0Fu8; 16]);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_eq(&[1, 2], &[1, 2, 3]));
    }
}
