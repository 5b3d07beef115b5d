//! Registration Request encoding tests
//!
//! Builds the initial Registration Request from a loaded UE profile and
//! checks the bytes a core network would receive.

use integration_tests::{hex_bytes, init_test_logging, test_profile, TEST_OPC};
use uesim_common::Plmn;
use uesim_nas::UeContext;
use uesim_ue::{load_ue_profile_from_str, validate_ue_profile};

const PROFILE: &str = r#"
msin: "0000000001"
mcc: 1
mnc: 1
routing_indicator: "0000"
protection_scheme: "null"
home_network_public_key_id: 0
auth:
  k: "465b5ce8b199b49faa5f0a2ee238a6bc"
  op: "cdc202d5123e20f62b6d676ac72cb318"
  op_type: op
"#;

/// Test the Registration Request built from a YAML profile
#[test]
fn test_registration_request_from_yaml_profile() {
    init_test_logging();

    let profile = load_ue_profile_from_str(PROFILE).expect("profile parses");
    validate_ue_profile(&profile).expect("profile is valid");

    let ctx = UeContext::new(profile);
    assert_eq!(ctx.auth_params().opc, TEST_OPC);

    let pdu = ctx.make_registration_request().expect("Registration Request encodes");
    assert_eq!(
        pdu,
        hex_bytes(
            "7e 00 41 79
             00 0d 01 00 f1 10 00 00 00 00 00 00 00 00 10
             10 01 20
             2e 04 80 a0 00 00"
        )
    );
}

/// Test PLMN layout for 2-digit and 3-digit MNCs
#[test]
fn test_registration_request_plmn_layout() {
    init_test_logging();

    let pdu = UeContext::new(test_profile(Plmn::new(208, 93, false)))
        .make_registration_request()
        .unwrap();
    assert_eq!(&pdu[7..10], &[0x02, 0xf8, 0x39]);

    let pdu = UeContext::new(test_profile(Plmn::new(310, 410, true)))
        .make_registration_request()
        .unwrap();
    assert_eq!(&pdu[7..10], &[0x13, 0x00, 0x14]);
}

/// Test routing indicator padding
#[test]
fn test_registration_request_routing_indicator() {
    let mut profile = test_profile(Plmn::new(1, 1, false));
    profile.routing_indicator = "123".to_string();

    let pdu = UeContext::new(profile).make_registration_request().unwrap();
    assert_eq!(&pdu[10..12], &[0x21, 0xf3]);
    assert_eq!(pdu.len(), 28);
}

/// Test that an odd-length MSIN keeps the identity length consistent
#[test]
fn test_registration_request_odd_msin() {
    let mut profile = test_profile(Plmn::new(1, 1, false));
    profile.msin = "123456789".to_string();

    let pdu = UeContext::new(profile).make_registration_request().unwrap();
    let identity_len = u16::from_be_bytes([pdu[4], pdu[5]]) as usize;
    assert_eq!(identity_len, 13);
    assert_eq!(&pdu[14..19], &[0x21, 0x43, 0x65, 0x87, 0xf9]);
    assert_eq!(pdu[19], 0x10);
}
