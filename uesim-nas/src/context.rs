//! Per-UE NAS context
//!
//! Holds the subscriber profile, the authentication parameters collected
//! from the current challenge and the decode-pass state. One context serves
//! one UE; methods take `&mut self`, so a context is never decoded into from
//! two places at once.

use tracing::{debug, info};
use uesim_common::logging::{log_nas_message, Direction};
use uesim_common::{AuthConfig, OpType, Plmn, UeProfile};
use uesim_crypto::{compute_opc, Milenage};

use crate::codec::NasEncode;
use crate::error::{NasError, NasResult};
use crate::ies::{Autn, IeRegistry};
use crate::messages::{AuthenticationResponse, RegistrationRequest};

/// Authentication state of the UE
///
/// RAND, AUTN and RES* belong to the most recent challenge and are cleared
/// when the next one arrives.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticationParameters {
    /// Subscriber key K
    pub k: [u8; 16],
    /// Operator variant OPc
    pub opc: [u8; 16],
    /// RAND of the current challenge
    pub rand: Option<[u8; 16]>,
    /// AUTN of the current challenge
    pub autn: Option<Autn>,
    /// RES* derived for the current challenge
    pub res_star: Option<[u8; 16]>,
}

impl std::fmt::Debug for AuthenticationParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationParameters")
            .field("rand", &self.rand)
            .field("autn", &self.autn)
            .field("res_star", &self.res_star)
            .finish_non_exhaustive()
    }
}

impl AuthenticationParameters {
    /// Parameters for the configured credentials, deriving OPc from OP if needed
    pub fn from_config(auth: &AuthConfig) -> Self {
        let opc = match auth.op_type {
            OpType::Opc => auth.op,
            OpType::Op => compute_opc(&auth.k, &auth.op),
        };
        Self {
            k: auth.k,
            opc,
            rand: None,
            autn: None,
            res_star: None,
        }
    }

    /// Forget everything learnt from the previous challenge
    pub fn reset_challenge(&mut self) {
        self.rand = None;
        self.autn = None;
        self.res_star = None;
    }

    /// Milenage keyed with K and OPc
    pub fn milenage(&self) -> Milenage {
        Milenage::new(&self.k, &self.opc)
    }
}

/// NAS state of one UE
#[derive(Debug, Clone)]
pub struct UeContext {
    profile: UeProfile,
    pub(crate) auth: AuthenticationParameters,
    pub(crate) registry: IeRegistry,
    /// Set while a decode pass has stripped the security wrapper
    pub(crate) security_header_parsed: bool,
}

impl UeContext {
    /// Context for `profile` with the standard IE handlers
    pub fn new(profile: UeProfile) -> Self {
        Self::with_registry(profile, IeRegistry::standard())
    }

    /// Context for `profile` with a caller-supplied IE registry
    pub fn with_registry(profile: UeProfile, registry: IeRegistry) -> Self {
        let auth = AuthenticationParameters::from_config(&profile.auth);
        info!(
            plmn = %profile.plmn(),
            msin = %profile.msin,
            op_type = ?profile.auth.op_type,
            "UE NAS context created"
        );
        Self {
            profile,
            auth,
            registry,
            security_header_parsed: false,
        }
    }

    /// Subscriber profile
    pub fn profile(&self) -> &UeProfile {
        &self.profile
    }

    /// Home PLMN of the subscriber
    pub fn plmn(&self) -> Plmn {
        self.profile.plmn()
    }

    /// Authentication parameters of the current challenge
    pub fn auth_params(&self) -> &AuthenticationParameters {
        &self.auth
    }

    /// RES* of the last verified challenge
    pub fn res_star(&self) -> Option<[u8; 16]> {
        self.auth.res_star
    }

    /// IE registry used by the decoder
    pub fn registry_mut(&mut self) -> &mut IeRegistry {
        &mut self.registry
    }

    /// Encode the initial Registration Request
    pub fn make_registration_request(&self) -> NasResult<Vec<u8>> {
        let request = RegistrationRequest::initial(&self.profile);
        let pdu = request.to_bytes()?;
        log_nas_message(Direction::Uplink, "Registration Request", &pdu);
        Ok(pdu)
    }

    /// Encode an Authentication Response carrying the current RES*
    ///
    /// Fails if no challenge has been verified since the last reset.
    pub fn make_authentication_response(&self) -> NasResult<Vec<u8>> {
        let res_star = self
            .auth
            .res_star
            .ok_or(NasError::MissingAuthenticationParameter("RES*"))?;
        let pdu = AuthenticationResponse::with_res_star(res_star).to_bytes()?;
        debug!(res_star = %hex::encode(res_star), "Authentication Response built");
        log_nas_message(Direction::Uplink, "Authentication Response", &pdu);
        Ok(pdu)
    }
}
