//! 5G-AKA exchange tests
//!
//! A mock home network issues Authentication Requests; the UE decodes them,
//! verifies AUTN and answers with RES*.

use integration_tests::{
    init_test_logging, test_profile, MockNetwork, TEST_AMF, TEST_RAND, TEST_SQN,
};
use uesim_common::Plmn;
use uesim_nas::{MessageBody, MmMessageType, NasError, TraceContext, UeContext};

const HPLMN: Plmn = Plmn::new(1, 1, false);

/// Test a full challenge and response
#[test]
fn test_aka_exchange() {
    init_test_logging();

    let network = MockNetwork::new(HPLMN);
    let mut ctx = UeContext::new(test_profile(HPLMN));
    ctx.make_registration_request().expect("Registration Request encodes");

    let request = network.authentication_request(&TEST_RAND, &TEST_SQN, &TEST_AMF);
    let mut trace = TraceContext::recording();
    let message = ctx
        .decode(&request, request.len(), &mut trace)
        .expect("challenge verifies");

    assert_eq!(message.header.mm_message_type(), Some(MmMessageType::AuthenticationRequest));
    let MessageBody::AuthenticationRequest { request: decoded, aka } = message.body else {
        panic!("expected an authentication request, got {:?}", message.body);
    };
    assert_eq!(decoded.rand(), Some(TEST_RAND));
    assert_eq!(aka.vector.sqn, TEST_SQN);
    assert_eq!(aka.vector.amf, TEST_AMF);

    let xres_star = network.expected_res_star(&TEST_RAND);
    assert_eq!(aka.res_star, xres_star);
    assert_eq!(hex::encode(xres_star), "f236a7417272bfb2d66d4d670733b527");

    let response = ctx.make_authentication_response().expect("RES* available");
    assert_eq!(response.len(), 21);
    assert_eq!(&response[..5], &[0x7e, 0x00, 0x57, 0x2d, 0x10]);
    assert_eq!(&response[5..], &xres_star);

    let lines = trace.lines();
    assert!(lines.iter().any(|l| l.trim_start() == "K   : 465b5ce8b199b49faa5f0a2ee238a6bc"));
    assert!(lines.iter().any(|l| l.trim_start() == "RES*: f236a7417272bfb2d66d4d670733b527"));
    assert!(lines.iter().any(|l| l.trim_start() == "received and calculated MAC values match."));
}

/// Test that RES* is bound to the serving network
#[test]
fn test_aka_exchange_other_plmn() {
    let plmn = Plmn::new(208, 93, false);
    let network = MockNetwork::new(plmn);
    let mut ctx = UeContext::new(test_profile(plmn));

    let request = network.authentication_request(&TEST_RAND, &TEST_SQN, &TEST_AMF);
    ctx.decode(&request, request.len(), &mut TraceContext::new()).unwrap();

    let res_star = ctx.res_star().unwrap();
    assert_eq!(res_star, network.expected_res_star(&TEST_RAND));
    assert_eq!(hex::encode(res_star), "5cc9527f4d21c43bee83a15443acf1c4");
}

/// Test that a new challenge replaces the previous RES*
#[test]
fn test_second_challenge_replaces_res_star() {
    let network = MockNetwork::new(HPLMN);
    let mut ctx = UeContext::new(test_profile(HPLMN));

    let first = network.authentication_request(&TEST_RAND, &TEST_SQN, &TEST_AMF);
    ctx.decode(&first, first.len(), &mut TraceContext::new()).unwrap();
    let first_res_star = ctx.res_star().unwrap();

    let rand = [0x5a; 16];
    let second = network.authentication_request(&rand, &[0, 0, 0, 0, 0, 0x21], &[0x80, 0x00]);
    ctx.decode(&second, second.len(), &mut TraceContext::new()).unwrap();

    assert_ne!(ctx.res_star(), Some(first_res_star));
    assert_eq!(ctx.res_star(), Some(network.expected_res_star(&rand)));
    assert_eq!(ctx.auth_params().rand, Some(rand));
}

/// Test that a forged AUTN is rejected and no response can be built
#[test]
fn test_forged_autn_rejected() {
    init_test_logging();

    let network = MockNetwork::new(HPLMN);
    let mut ctx = UeContext::new(test_profile(HPLMN));

    let good = network.authentication_request(&TEST_RAND, &TEST_SQN, &TEST_AMF);
    ctx.decode(&good, good.len(), &mut TraceContext::new()).unwrap();
    assert!(ctx.res_star().is_some());

    let mut forged = network.authentication_request(&TEST_RAND, &TEST_SQN, &TEST_AMF);
    let last = forged.len() - 1;
    forged[last] ^= 0x01;

    let mut trace = TraceContext::recording();
    let result = ctx.decode(&forged, forged.len(), &mut trace);
    assert_eq!(result, Err(NasError::AuthenticationFailure));
    assert_eq!(ctx.res_star(), None);
    assert_eq!(
        ctx.make_authentication_response(),
        Err(NasError::MissingAuthenticationParameter("RES*"))
    );
    assert!(trace.lines().iter().all(|l| !l.trim_start().starts_with("RES*")));
}

/// Test that a UE with a different key fails the challenge
#[test]
fn test_wrong_subscriber_key() {
    let network = MockNetwork::new(HPLMN);
    let mut profile = test_profile(HPLMN);
    profile.auth.k[0] ^= 0xff;
    let mut ctx = UeContext::new(profile);

    let request = network.authentication_request(&TEST_RAND, &TEST_SQN, &TEST_AMF);
    assert_eq!(
        ctx.decode(&request, request.len(), &mut TraceContext::new()),
        Err(NasError::AuthenticationFailure)
    );
}
