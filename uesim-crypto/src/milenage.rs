//! Milenage (TS 35.206), the USIM side of 5G-AKA
//!
//! f1 and f1* give MAC-A and MAC-S, f2 gives RES, f3 and f4 give CK and IK,
//! f5 and f5* give the anonymity keys for AUTN and AUTS.
//!
//! Every output is `OUTn = E_K(rot(TEMP ^ OPc, rn) ^ cn) ^ OPc`, with
//! `TEMP = E_K(RAND ^ OPc)`; f1 additionally mixes in `IN1 = SQN||AMF||SQN||AMF`.

use crate::aes::{xor_block, Aes128Block, BLOCK_SIZE};

/// Subscriber key K
pub const KEY_SIZE: usize = 16;
/// OP and OPc
pub const OP_SIZE: usize = 16;
/// Challenge RAND
pub const RAND_SIZE: usize = 16;
/// Sequence number
pub const SQN_SIZE: usize = 6;
/// Authentication management field
pub const AMF_SIZE: usize = 2;
/// MAC-A and MAC-S
pub const MAC_SIZE: usize = 8;
/// f2 output
pub const RES_SIZE: usize = 8;
/// Cipher key
pub const CK_SIZE: usize = 16;
/// Integrity key
pub const IK_SIZE: usize = 16;
/// Anonymity key
pub const AK_SIZE: usize = 6;

/// Rotation (bits) and constant pair for one OUTn block
struct Round {
    rotation: usize,
    constant: u8,
}

// c1..c5 are zero except for the last octet.
const ROUND_1: Round = Round { rotation: 64, constant: 0x00 };
const ROUND_2: Round = Round { rotation: 0, constant: 0x01 };
const ROUND_3: Round = Round { rotation: 32, constant: 0x02 };
const ROUND_4: Round = Round { rotation: 64, constant: 0x04 };
const ROUND_5: Round = Round { rotation: 96, constant: 0x08 };

/// Rotate a 128-bit block left by `bits` positions
fn rotate_left(block: &[u8; BLOCK_SIZE], bits: usize) -> [u8; BLOCK_SIZE] {
    let bits = bits % 128;
    if bits == 0 {
        return *block;
    }

    let byte_shift = bits / 8;
    let bit_shift = bits % 8;
    let mut result = [0u8; BLOCK_SIZE];

    for (i, out) in result.iter_mut().enumerate() {
        let hi = block[(i + byte_shift) % BLOCK_SIZE];
        let lo = block[(i + byte_shift + 1) % BLOCK_SIZE];
        *out = if bit_shift == 0 {
            hi
        } else {
            (hi << bit_shift) | (lo >> (8 - bit_shift))
        };
    }

    result
}

/// `OPc = OP ^ E_K(OP)`
pub fn compute_opc(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> [u8; OP_SIZE] {
    let cipher = Aes128Block::new(k);
    let mut opc = cipher.encrypt_block_copy(op);
    xor_block(&mut opc, op);
    opc
}

/// Outputs of f2, f3, f4 and f5 for one RAND
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F2345Output {
    /// RES (f2)
    pub res: [u8; RES_SIZE],
    /// CK (f3)
    pub ck: [u8; CK_SIZE],
    /// IK (f4)
    pub ik: [u8; IK_SIZE],
    /// AK (f5)
    pub ak: [u8; AK_SIZE],
}

/// Outputs of f1 and f1* for one (RAND, SQN, AMF)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F1Output {
    /// MAC-A (f1)
    pub mac_a: [u8; MAC_SIZE],
    /// MAC-S (f1*)
    pub mac_s: [u8; MAC_SIZE],
}

/// Milenage keyed with one subscriber's K and OPc
#[derive(Clone)]
pub struct Milenage {
    cipher: Aes128Block,
    opc: [u8; OP_SIZE],
}

impl std::fmt::Debug for Milenage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Milenage").finish_non_exhaustive()
    }
}

impl Milenage {
    /// Key with K and a precomputed OPc
    pub fn new(k: &[u8; KEY_SIZE], opc: &[u8; OP_SIZE]) -> Self {
        Self {
            cipher: Aes128Block::new(k),
            opc: *opc,
        }
    }

    /// Key with K and OP; OPc is derived here
    pub fn new_with_op(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> Self {
        let opc = compute_opc(k, op);
        Self::new(k, &opc)
    }

    /// The OPc this instance was keyed with
    pub fn opc(&self) -> &[u8; OP_SIZE] {
        &self.opc
    }

    /// TEMP = E_K(RAND XOR OPc)
    fn temp(&self, rand: &[u8; RAND_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut temp = *rand;
        xor_block(&mut temp, &self.opc);
        self.cipher.encrypt_block(&mut temp);
        temp
    }

    /// OUTn = E_K(rot(input XOR OPc, rn) XOR cn [XOR extra]) XOR OPc
    fn out(&self, input: &[u8; BLOCK_SIZE], round: &Round, extra: Option<&[u8; BLOCK_SIZE]>) -> [u8; BLOCK_SIZE] {
        let mut block = *input;
        xor_block(&mut block, &self.opc);
        let mut block = rotate_left(&block, round.rotation);
        if let Some(extra) = extra {
            xor_block(&mut block, extra);
        }
        block[BLOCK_SIZE - 1] ^= round.constant;
        self.cipher.encrypt_block(&mut block);
        xor_block(&mut block, &self.opc);
        block
    }

    fn out1(&self, rand: &[u8; RAND_SIZE], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut in1 = [0u8; BLOCK_SIZE];
        in1[0..6].copy_from_slice(sqn);
        in1[6..8].copy_from_slice(amf);
        in1[8..14].copy_from_slice(sqn);
        in1[14..16].copy_from_slice(amf);

        let temp = self.temp(rand);
        self.out(&in1, &ROUND_1, Some(&temp))
    }

    /// f1 and f1* in one pass
    pub fn f1_pair(&self, rand: &[u8; RAND_SIZE], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> F1Output {
        let out1 = self.out1(rand, sqn, amf);
        let mut mac_a = [0u8; MAC_SIZE];
        let mut mac_s = [0u8; MAC_SIZE];
        mac_a.copy_from_slice(&out1[..8]);
        mac_s.copy_from_slice(&out1[8..]);
        F1Output { mac_a, mac_s }
    }

    /// f1 - Network authentication function, MAC-A = f1(K, RAND, SQN, AMF)
    pub fn f1(&self, rand: &[u8; RAND_SIZE], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> [u8; MAC_SIZE] {
        self.f1_pair(rand, sqn, amf).mac_a
    }

    /// f1* - Re-synchronization authentication function, MAC-S
    pub fn f1_star(&self, rand: &[u8; RAND_SIZE], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> [u8; MAC_SIZE] {
        self.f1_pair(rand, sqn, amf).mac_s
    }

    /// f2, f3, f4 and f5 sharing a single TEMP computation
    pub fn f2345(&self, rand: &[u8; RAND_SIZE]) -> F2345Output {
        let temp = self.temp(rand);

        let out2 = self.out(&temp, &ROUND_2, None);
        let mut res = [0u8; RES_SIZE];
        let mut ak = [0u8; AK_SIZE];
        res.copy_from_slice(&out2[8..16]);
        ak.copy_from_slice(&out2[0..6]);

        F2345Output {
            res,
            ck: self.out(&temp, &ROUND_3, None),
            ik: self.out(&temp, &ROUND_4, None),
            ak,
        }
    }

    /// f2 - User authentication function, RES = f2(K, RAND)
    pub fn f2(&self, rand: &[u8; RAND_SIZE]) -> [u8; RES_SIZE] {
        self.f2345(rand).res
    }

    /// f3 - Cipher key derivation function, CK = f3(K, RAND)
    pub fn f3(&self, rand: &[u8; RAND_SIZE]) -> [u8; CK_SIZE] {
        self.out(&self.temp(rand), &ROUND_3, None)
    }

    /// f4 - Integrity key derivation function, IK = f4(K, RAND)
    pub fn f4(&self, rand: &[u8; RAND_SIZE]) -> [u8; IK_SIZE] {
        self.out(&self.temp(rand), &ROUND_4, None)
    }

    /// f5 - Anonymity key derivation function, AK = f5(K, RAND)
    pub fn f5(&self, rand: &[u8; RAND_SIZE]) -> [u8; AK_SIZE] {
        self.f2345(rand).ak
    }

    /// f5*: AK used to conceal SQN_MS in AUTS
    pub fn f5_star(&self, rand: &[u8; RAND_SIZE]) -> [u8; AK_SIZE] {
        let out5 = self.out(&self.temp(rand), &ROUND_5, None);
        let mut ak = [0u8; AK_SIZE];
        ak.copy_from_slice(&out5[0..6]);
        ak
    }

    /// Build the AUTN the network would send for `sqn`
    ///
    /// AUTN = (SQN XOR AK) || AMF || MAC-A. Used to stand in for the home
    /// network when exercising the UE side of the exchange.
    pub fn generate_autn(&self, rand: &[u8; RAND_SIZE], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> [u8; 16] {
        let ak = self.f5(rand);
        let mac_a = self.f1(rand, sqn, amf);

        let mut autn = [0u8; 16];
        for (i, byte) in autn[..SQN_SIZE].iter_mut().enumerate() {
            *byte = sqn[i] ^ ak[i];
        }
        autn[6..8].copy_from_slice(amf);
        autn[8..].copy_from_slice(&mac_a);
        autn
    }
}
