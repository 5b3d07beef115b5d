//! 5GMM messages handled by the UE
//!
//! Downlink messages are decoded after the header has been consumed;
//! uplink messages encode their own header.

pub mod authentication;
pub mod registration;
pub mod security_mode;

pub use authentication::{Abba, AuthenticationRequest, AuthenticationResponse};
pub use registration::{
    FiveGMmCapability, MobileIdentitySuci, RegistrationRequest, RegistrationType,
};
pub use security_mode::SecurityModeCommand;
