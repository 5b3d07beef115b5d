//! 5G-AKA on the UE side
//!
//! Given RAND and AUTN from an Authentication Request, the UE runs f2-f5 to
//! get RES, CK, IK and AK, recovers SQN from SQN xor AK, recomputes MAC-A
//! with f1 and compares it with the MAC carried in AUTN. Only a verified
//! challenge yields RES* (3GPP TS 33.501 Annex A.4).
//!
//! The f1-f5 primitive is reached through [`AuthenticationFunctions`];
//! [`uesim_crypto::Milenage`] is the implementation used in practice.

use uesim_common::Plmn;
use uesim_crypto::aes::constant_time_eq;
use uesim_crypto::{derive_res_star, encode_kdf_string, F1Output, F2345Output, Milenage};

use crate::error::{NasError, NasResult};
use crate::ies::Autn;
use crate::trace::TraceContext;

/// The f1-f5 function set keyed with K and OPc
pub trait AuthenticationFunctions {
    /// RES, CK, IK and AK for `rand`
    fn f2345(&self, rand: &[u8; 16]) -> F2345Output;

    /// MAC-A and MAC-S for `rand`, `sqn` and `amf`
    fn f1(&self, rand: &[u8; 16], sqn: &[u8; 6], amf: &[u8; 2]) -> F1Output;
}

impl AuthenticationFunctions for Milenage {
    fn f2345(&self, rand: &[u8; 16]) -> F2345Output {
        Milenage::f2345(self, rand)
    }

    fn f1(&self, rand: &[u8; 16], sqn: &[u8; 6], amf: &[u8; 2]) -> F1Output {
        self.f1_pair(rand, sqn, amf)
    }
}

/// Everything the UE computes for one challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AkaVector {
    /// RAND received from the network
    pub rand: [u8; 16],
    /// SQN recovered from AUTN
    pub sqn: [u8; 6],
    /// AMF from AUTN
    pub amf: [u8; 2],
    /// RES (f2)
    pub res: [u8; 8],
    /// Cipher key (f3)
    pub ck: [u8; 16],
    /// Integrity key (f4)
    pub ik: [u8; 16],
    /// Anonymity key (f5)
    pub ak: [u8; 6],
    /// MAC-A computed by the UE (f1)
    pub mac_a: [u8; 8],
    /// MAC-S computed by the UE (f1*)
    pub mac_s: [u8; 8],
}

impl AkaVector {
    /// Run the functions for `rand` and `autn`
    pub fn compute<F>(functions: &F, rand: &[u8; 16], autn: &Autn) -> Self
    where
        F: AuthenticationFunctions + ?Sized,
    {
        let F2345Output { res, ck, ik, ak } = functions.f2345(rand);

        let mut sqn = [0u8; 6];
        for (i, byte) in sqn.iter_mut().enumerate() {
            *byte = autn.sqn_xor_ak[i] ^ ak[i];
        }

        let F1Output { mac_a, mac_s } = functions.f1(rand, &sqn, &autn.amf);

        Self {
            rand: *rand,
            sqn,
            amf: autn.amf,
            res,
            ck,
            ik,
            ak,
            mac_a,
            mac_s,
        }
    }

    /// True if MAC-A equals the MAC the network sent
    pub fn verify(&self, autn: &Autn) -> bool {
        constant_time_eq(&self.mac_a, &autn.mac)
    }

    fn trace(&self, trace: &mut TraceContext) {
        trace.line(format_args!("AMF : {}", hex::encode(self.amf)));
        trace.line(format_args!("SQN : {}", hex::encode(self.sqn)));
        trace.line(format_args!("CK  : {}", hex::encode(self.ck)));
        trace.line(format_args!("IK  : {}", hex::encode(self.ik)));
        trace.line(format_args!("AK  : {}", hex::encode(self.ak)));
        trace.line(format_args!("MACA: {}", hex::encode(self.mac_a)));
        trace.line(format_args!("MACS: {}", hex::encode(self.mac_s)));
        trace.line(format_args!("RAND: {}", hex::encode(self.rand)));
        trace.line(format_args!("RES : {}", hex::encode(self.res)));
    }
}

/// Outcome of a verified challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AkaResponse {
    /// Values computed for the challenge
    pub vector: AkaVector,
    /// RES* to return in the Authentication Response
    pub res_star: [u8; 16],
}

/// RES* for `plmn` (3GPP TS 33.501 Annex A.4)
pub fn compute_res_star(
    plmn: &Plmn,
    rand: &[u8; 16],
    res: &[u8],
    ck: &[u8; 16],
    ik: &[u8; 16],
) -> [u8; 16] {
    let serving_network_name = encode_kdf_string(&plmn.serving_network_name());
    derive_res_star(ck, ik, &serving_network_name, rand, res)
}

/// Verify the challenge and derive RES*
///
/// Fails with [`NasError::AuthenticationFailure`] when MAC-A does not match,
/// in which case no RES* is derived.
pub fn authenticate<F>(
    functions: &F,
    plmn: &Plmn,
    rand: &[u8; 16],
    autn: &Autn,
    trace: &mut TraceContext,
) -> NasResult<AkaResponse>
where
    F: AuthenticationFunctions + ?Sized,
{
    let vector = AkaVector::compute(functions, rand, autn);
    vector.trace(trace);

    if !vector.verify(autn) {
        trace.detail("received and calculated MAC values do not match.");
        tracing::warn!(plmn = %plmn, "AUTN MAC mismatch, challenge rejected");
        return Err(NasError::AuthenticationFailure);
    }

    let res_star = compute_res_star(plmn, &vector.rand, &vector.res, &vector.ck, &vector.ik);
    trace.line(format_args!("RES*: {}", hex::encode(res_star)));
    trace.line("received and calculated MAC values match.");
    tracing::debug!(plmn = %plmn, "AUTN verified, RES* derived");

    Ok(AkaResponse { vector, res_star })
}
