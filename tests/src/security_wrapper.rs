//! Security wrapper tests
//!
//! Downlink PDUs behind an integrity protection header: the wrapper is
//! stripped once per decode and exposed, never verified.

use integration_tests::{
    hex_bytes, init_test_logging, protect, test_profile, MockNetwork, TEST_AMF, TEST_RAND,
    TEST_SQN,
};
use uesim_common::Plmn;
use uesim_nas::{
    CodecError, IntegrityAlgorithm, MessageBody, NasError, SecurityHeaderType, TraceContext,
    UeContext,
};

const HPLMN: Plmn = Plmn::new(1, 1, false);

fn protected_challenge(inner: SecurityHeaderType) -> Vec<u8> {
    let mut plain = MockNetwork::new(HPLMN).authentication_request(&TEST_RAND, &TEST_SQN, &TEST_AMF);
    plain[1] = inner.into();
    protect(&plain, SecurityHeaderType::IntegrityProtected, [0x11, 0x22, 0x33, 0x44], 7)
}

/// Test that the wrapper is stripped and exposed
#[test]
fn test_protected_challenge() {
    init_test_logging();

    let mut ctx = UeContext::new(test_profile(HPLMN));
    let pdu = protected_challenge(SecurityHeaderType::NotProtected);

    let mut trace = TraceContext::recording();
    let message = ctx.decode(&pdu, pdu.len(), &mut trace).unwrap();

    let wrapper = message.security.expect("wrapper exposed");
    assert_eq!(wrapper.security_header_type, SecurityHeaderType::IntegrityProtected);
    assert_eq!(wrapper.mac, [0x11, 0x22, 0x33, 0x44]);
    assert_eq!(wrapper.sequence_number, 7);
    assert_eq!(message.body_offset, 10);
    assert!(matches!(message.body, MessageBody::AuthenticationRequest { .. }));
    assert_eq!(
        ctx.res_star(),
        Some(MockNetwork::new(HPLMN).expected_res_star(&TEST_RAND))
    );

    let lines = trace.lines();
    assert_eq!(lines[1], "Security Header: 0x1");
    assert_eq!(lines[2], "  mac: 11223344");
    assert_eq!(lines[3], "  seq: 7");
}

/// Test that a non-plain inner header does not consume another wrapper
#[test]
fn test_inner_protected_header_tolerated() {
    let mut ctx = UeContext::new(test_profile(HPLMN));
    let pdu = protected_challenge(SecurityHeaderType::IntegrityProtectedAndCiphered);

    let message = ctx.decode(&pdu, pdu.len(), &mut TraceContext::new()).unwrap();
    assert_eq!(
        message.header.security_header_type,
        SecurityHeaderType::IntegrityProtectedAndCiphered
    );
    assert_eq!(message.body_offset, 10);
    assert!(ctx.res_star().is_some());
}

/// Test that every decode call starts with the wrapper unstripped
#[test]
fn test_consecutive_protected_pdus() {
    let mut ctx = UeContext::new(test_profile(HPLMN));
    let pdu = protected_challenge(SecurityHeaderType::NotProtected);

    for _ in 0..3 {
        let message = ctx.decode(&pdu, pdu.len(), &mut TraceContext::new()).unwrap();
        assert!(message.security.is_some());
        assert_eq!(message.body_offset, 10);
    }
}

/// Test a truncated wrapper
#[test]
fn test_truncated_wrapper() {
    let mut ctx = UeContext::new(test_profile(HPLMN));
    let pdu = [0x7e, 0x02, 0x11, 0x22];

    assert!(matches!(
        ctx.decode(&pdu, pdu.len(), &mut TraceContext::new()),
        Err(NasError::MalformedPdu(CodecError::BufferTooShort { .. }))
    ));

    let pdu = protected_challenge(SecurityHeaderType::NotProtected);
    assert!(ctx.decode(&pdu, pdu.len(), &mut TraceContext::new()).is_ok());
}

/// Test a protected Security Mode Command with a new security context
#[test]
fn test_protected_security_mode_command() {
    let mut ctx = UeContext::new(test_profile(HPLMN));
    let pdu = hex_bytes(
        "7e 03 de ad be ef 00
         7e 00 5d 02 00 04 80 a0 00 00 e1 36 01 00",
    );

    let message = ctx.decode(&pdu, pdu.len(), &mut TraceContext::new()).unwrap();
    assert_eq!(
        message.security.map(|s| s.security_header_type),
        Some(SecurityHeaderType::IntegrityProtectedWithNewSecurityContext)
    );
    let MessageBody::SecurityModeCommand(command) = message.body else {
        panic!("expected a security mode command");
    };
    assert_eq!(command.algorithms.integrity(), Some(IntegrityAlgorithm::Nia2));
    assert_eq!(command.ies.len(), 2);
    assert_eq!(command.ies.halted_at, None);
}
