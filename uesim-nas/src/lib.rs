//! 5G NAS mobility management for a simulated UE
//!
//! Builds the uplink messages of an initial registration and decodes the
//! downlink messages the network answers with, as defined in 3GPP TS 24.501.
//! Decoding an Authentication Request runs 5G-AKA (3GPP TS 33.501) and keeps
//! the derived RES* in the [`UeContext`] for the Authentication Response.
//!
//! # Message Structure
//!
//! A downlink PDU is a plain header, optionally preceded by an integrity
//! wrapper, followed by the mandatory fields of the message and a sequence
//! of optional IEs resolved through an [`IeRegistry`].
//!
//! # Example
//!
//! ```rust
//! use uesim_common::{Plmn, UeProfile};
//! use uesim_nas::UeContext;
//!
//! let profile = UeProfile::new("0000000001", Plmn::new(1, 1, false), [0; 16], [0; 16]);
//! let ctx = UeContext::new(profile);
//!
//! let pdu = ctx.make_registration_request().unwrap();
//! assert_eq!(&pdu[..3], &[0x7e, 0x00, 0x41]);
//! ```

pub mod aka;
pub mod bcd;
pub mod codec;
pub mod context;
pub mod decoder;
pub mod enums;
pub mod error;
pub mod header;
pub mod ies;
pub mod messages;
pub mod security;
pub mod trace;

// Re-export commonly used types
pub use aka::{authenticate, compute_res_star, AkaResponse, AkaVector, AuthenticationFunctions};
pub use codec::{CodecError, CodecResult, NasDecode, NasEncode};
pub use context::{AuthenticationParameters, UeContext};
pub use decoder::{DecodeState, DecodedMessage, MessageBody};
pub use enums::{ExtendedProtocolDiscriminator, MmMessageType, SecurityHeaderType};
pub use error::{NasError, NasResult};
pub use header::{PlainHeader, SecurityWrapper};
pub use ies::{Autn, IeHandler, IeList, IeRegistry, Iei, InformationElement};
pub use messages::{
    AuthenticationRequest, AuthenticationResponse, RegistrationRequest, SecurityModeCommand,
};
pub use security::{
    CipheringAlgorithm, IntegrityAlgorithm, NasKeySetIdentifier, NasSecurityAlgorithms,
    SecurityContextType, UeSecurityCapability,
};
pub use trace::TraceContext;
