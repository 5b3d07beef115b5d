//! Octet-level code points of the 5GMM header (TS 24.501 clause 9)

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// First octet of every 5GS NAS PDU (TS 24.501 9.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ExtendedProtocolDiscriminator {
    /// 5GMM
    MobilityManagement = 0x7E,
    /// 5GSM
    SessionManagement = 0x2E,
}

impl ExtendedProtocolDiscriminator {
    /// Human-readable name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ExtendedProtocolDiscriminator::MobilityManagement => "5G Mobility Management",
            ExtendedProtocolDiscriminator::SessionManagement => "5G Session Management",
        }
    }
}

/// Low nibble of the second 5GMM octet (TS 24.501 9.3.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Default)]
#[repr(u8)]
pub enum SecurityHeaderType {
    /// Plain 5GMM message
    #[default]
    NotProtected = 0x00,
    /// MAC only
    IntegrityProtected = 0x01,
    /// MAC and ciphering
    IntegrityProtectedAndCiphered = 0x02,
    /// MAC, first message of a new security context
    IntegrityProtectedWithNewSecurityContext = 0x03,
    /// MAC and ciphering, first message of a new security context
    IntegrityProtectedAndCipheredWithNewSecurityContext = 0x04,
}

impl SecurityHeaderType {
    /// Anything other than [`SecurityHeaderType::NotProtected`]
    pub fn is_protected(&self) -> bool {
        !matches!(self, SecurityHeaderType::NotProtected)
    }

    /// Whether the payload after the wrapper is ciphered
    pub fn is_ciphered(&self) -> bool {
        matches!(
            self,
            SecurityHeaderType::IntegrityProtectedAndCiphered
                | SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        )
    }

    /// Whether the header starts a new security context
    pub fn is_new_security_context(&self) -> bool {
        matches!(
            self,
            SecurityHeaderType::IntegrityProtectedWithNewSecurityContext
                | SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        )
    }
}

/// 5GMM message type octet (TS 24.501 9.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MmMessageType {
    // Registration messages
    RegistrationRequest = 0x41,
    RegistrationAccept = 0x42,
    RegistrationComplete = 0x43,
    RegistrationReject = 0x44,

    // Deregistration messages
    DeregistrationRequestUeOriginating = 0x45,
    DeregistrationAcceptUeOriginating = 0x46,
    DeregistrationRequestUeTerminated = 0x47,
    DeregistrationAcceptUeTerminated = 0x48,

    // Service request messages
    ServiceRequest = 0x4C,
    ServiceReject = 0x4D,
    ServiceAccept = 0x4E,

    // Configuration update messages
    ConfigurationUpdateCommand = 0x54,
    ConfigurationUpdateComplete = 0x55,

    // Authentication messages
    AuthenticationRequest = 0x56,
    AuthenticationResponse = 0x57,
    AuthenticationReject = 0x58,
    AuthenticationFailure = 0x59,
    AuthenticationResult = 0x5A,

    // Identity messages
    IdentityRequest = 0x5B,
    IdentityResponse = 0x5C,

    // Security mode messages
    SecurityModeCommand = 0x5D,
    SecurityModeComplete = 0x5E,
    SecurityModeReject = 0x5F,

    // Status and notification messages
    FiveGMmStatus = 0x64,
    Notification = 0x65,
    NotificationResponse = 0x66,

    // NAS transport messages
    UlNasTransport = 0x67,
    DlNasTransport = 0x68,
}

impl MmMessageType {
    /// Human-readable name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            MmMessageType::RegistrationRequest => "Registration Request",
            MmMessageType::RegistrationAccept => "Registration Accept",
            MmMessageType::RegistrationComplete => "Registration Complete",
            MmMessageType::RegistrationReject => "Registration Reject",
            MmMessageType::DeregistrationRequestUeOriginating => "Deregistration Request (UE originating)",
            MmMessageType::DeregistrationAcceptUeOriginating => "Deregistration Accept (UE originating)",
            MmMessageType::DeregistrationRequestUeTerminated => "Deregistration Request (UE terminated)",
            MmMessageType::DeregistrationAcceptUeTerminated => "Deregistration Accept (UE terminated)",
            MmMessageType::ServiceRequest => "Service Request",
            MmMessageType::ServiceReject => "Service Reject",
            MmMessageType::ServiceAccept => "Service Accept",
            MmMessageType::ConfigurationUpdateCommand => "Configuration Update Command",
            MmMessageType::ConfigurationUpdateComplete => "Configuration Update Complete",
            MmMessageType::AuthenticationRequest => "Authentication Request",
            MmMessageType::AuthenticationResponse => "Authentication Response",
            MmMessageType::AuthenticationReject => "Authentication Reject",
            MmMessageType::AuthenticationFailure => "Authentication Failure",
            MmMessageType::AuthenticationResult => "Authentication Result",
            MmMessageType::IdentityRequest => "Identity Request",
            MmMessageType::IdentityResponse => "Identity Response",
            MmMessageType::SecurityModeCommand => "Security Mode Command",
            MmMessageType::SecurityModeComplete => "Security Mode Complete",
            MmMessageType::SecurityModeReject => "Security Mode Reject",
            MmMessageType::FiveGMmStatus => "5GMM Status",
            MmMessageType::Notification => "Notification",
            MmMessageType::NotificationResponse => "Notification Response",
            MmMessageType::UlNasTransport => "UL NAS Transport",
            MmMessageType::DlNasTransport => "DL NAS Transport",
        }
    }
}
