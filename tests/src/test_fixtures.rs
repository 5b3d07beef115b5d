//! Test fixtures
//!
//! Credentials are 3GPP TS 35.207 test set 1. [`MockNetwork`] plays the
//! home network: it builds Authentication Requests and the XRES* a UE has
//! to answer with.

use uesim_common::{OpType, Plmn, UeProfile};
use uesim_crypto::{derive_res_star, Milenage};
use uesim_nas::messages::Abba;
use uesim_nas::{
    AuthenticationRequest, Autn, ExtendedProtocolDiscriminator, NasEncode, NasKeySetIdentifier,
    SecurityHeaderType, SecurityWrapper,
};

/// Permanent key K
pub const TEST_K: [u8; 16] = [
    0x46, 0x5b, 0x5c, 0xe8, 0xb1, 0x99, 0xb4, 0x9f, 0xaa, 0x5f, 0x0a, 0x2e, 0xe2, 0x38, 0xa6, 0xbc,
];

/// Operator key OP
pub const TEST_OP: [u8; 16] = [
    0xcd, 0xc2, 0x02, 0xd5, 0x12, 0x3e, 0x20, 0xf6, 0x2b, 0x6d, 0x67, 0x6a, 0xc7, 0x2c, 0xb3, 0x18,
];

/// OPc derived from K and OP
pub const TEST_OPC: [u8; 16] = [
    0xcd, 0x63, 0xcb, 0x71, 0x95, 0x4a, 0x9f, 0x4e, 0x48, 0xa5, 0x99, 0x4e, 0x37, 0xa0, 0x2b, 0xaf,
];

/// Challenge RAND
pub const TEST_RAND: [u8; 16] = [
    0x23, 0x55, 0x3c, 0xbe, 0x96, 0x37, 0xa8, 0x9d, 0x21, 0x8a, 0xe6, 0x4d, 0xae, 0x47, 0xbf, 0x35,
];

/// Network sequence number
pub const TEST_SQN: [u8; 6] = [0xff, 0x9b, 0xb4, 0xd0, 0xb6, 0x07];

/// Authentication management field
pub const TEST_AMF: [u8; 2] = [0xb9, 0xb9];

/// UE profile for `plmn` with MSIN 0000000001, configured with OP
pub fn test_profile(plmn: Plmn) -> UeProfile {
    let mut profile = UeProfile::new("0000000001", plmn, TEST_K, TEST_OP);
    profile.auth.op_type = OpType::Op;
    profile
}

/// Home network side of 5G-AKA
#[derive(Debug, Clone)]
pub struct MockNetwork {
    milenage: Milenage,
    plmn: Plmn,
}

impl MockNetwork {
    /// Network serving `plmn` that knows the test subscriber
    pub fn new(plmn: Plmn) -> Self {
        Self {
            milenage: Milenage::new(&TEST_K, &TEST_OPC),
            plmn,
        }
    }

    /// AUTN for `rand`, `sqn` and `amf`
    pub fn autn(&self, rand: &[u8; 16], sqn: &[u8; 6], amf: &[u8; 2]) -> Autn {
        let autn = self.milenage.generate_autn(rand, sqn, amf);
        Autn::from_value(&autn).expect("AUTN is 16 bytes")
    }

    /// Plain Authentication Request PDU
    pub fn authentication_request(&self, rand: &[u8; 16], sqn: &[u8; 6], amf: &[u8; 2]) -> Vec<u8> {
        AuthenticationRequest::for_5g_aka(
            NasKeySetIdentifier::new(Default::default(), 0),
            Abba::default(),
            *rand,
            self.autn(rand, sqn, amf),
        )
        .to_bytes()
        .expect("Authentication Request encodes")
    }

    /// XRES* the UE must return for `rand`
    pub fn expected_res_star(&self, rand: &[u8; 16]) -> [u8; 16] {
        let out = self.milenage.f2345(rand);
        let serving_network_name = self.plmn.serving_network_name();
        derive_res_star(&out.ck, &out.ik, serving_network_name.as_bytes(), rand, &out.res)
    }
}

/// Wrap a plain PDU in an integrity protection header
pub fn protect(
    plain: &[u8],
    security_header_type: SecurityHeaderType,
    mac: [u8; 4],
    sequence_number: u8,
) -> Vec<u8> {
    let wrapper = SecurityWrapper {
        security_header_type,
        mac,
        sequence_number,
    };
    let mut pdu = Vec::with_capacity(7 + plain.len());
    wrapper
        .encode(ExtendedProtocolDiscriminator::MobilityManagement, &mut pdu)
        .expect("wrapper encodes");
    pdu.extend_from_slice(plain);
    pdu
}
