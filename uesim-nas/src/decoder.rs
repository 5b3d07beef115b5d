//! Downlink PDU decoder
//!
//! A decode pass walks an explicit state machine:
//!
//! ```text
//! AwaitingHeader -> AwaitingSecurityHeader -> SecurityWrapperStripped -> AwaitingHeader
//!                                          \-> Plain -> MessageDispatch -> Done
//! ```
//!
//! The integrity wrapper (MAC and sequence number) is stripped at most once
//! per pass. Some cores send the inner plain message with a non-zero
//! security header type; once the wrapper is gone such a header is decoded
//! as plain and no further bytes are consumed for it.

use tracing::{debug, trace, warn};
use uesim_common::logging::{log_nas_message, Direction};

use crate::aka::{authenticate, AkaResponse};
use crate::codec::{read_u8, CodecError, NasDecode};
use crate::context::UeContext;
use crate::enums::{ExtendedProtocolDiscriminator, MmMessageType, SecurityHeaderType};
use crate::error::{NasError, NasResult};
use crate::header::{PlainHeader, SecurityWrapper};
use crate::messages::{AuthenticationRequest, SecurityModeCommand};
use crate::trace::TraceContext;

/// Decoded message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Verified 5G-AKA challenge
    AuthenticationRequest {
        /// The decoded message
        request: AuthenticationRequest,
        /// Values computed while verifying it
        aka: AkaResponse,
    },
    /// Security Mode Command
    SecurityModeCommand(SecurityModeCommand),
    /// Message type without a decoder; only the header was read
    Unparsed,
}

/// Result of a decode pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Header of the plain message
    pub header: PlainHeader,
    /// Integrity wrapper, if the PDU was protected
    pub security: Option<SecurityWrapper>,
    /// Offset of the message body within the PDU
    pub body_offset: usize,
    /// Decoded body
    pub body: MessageBody,
}

/// Decoder state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeState {
    /// Next octet is an extended protocol discriminator
    AwaitingHeader,
    /// Next octet is a security header type
    AwaitingSecurityHeader(ExtendedProtocolDiscriminator),
    /// MAC and sequence number were consumed; the plain message follows
    SecurityWrapperStripped(SecurityWrapper),
    /// Header is plain; next octet is the message type
    Plain(ExtendedProtocolDiscriminator, SecurityHeaderType),
    /// Header complete; body decoding is next
    MessageDispatch(PlainHeader),
    /// Pass finished
    Done(Box<DecodedMessage>),
}

impl UeContext {
    /// Decode one downlink PDU of `length` bytes
    ///
    /// `length` may not exceed `pdu.len()`; bytes after it are ignored.
    /// A verified Authentication Request leaves its RES* in the context.
    pub fn decode(
        &mut self,
        pdu: &[u8],
        length: usize,
        trace: &mut TraceContext,
    ) -> NasResult<DecodedMessage> {
        let result = self.decode_pass(pdu, length, trace);
        self.security_header_parsed = false;

        match &result {
            Ok(message) => {
                log_nas_message(Direction::Downlink, message.header.message_name(), &pdu[..length]);
            }
            Err(e) => debug!(error = %e, "NAS decode failed"),
        }
        result
    }

    fn decode_pass(
        &mut self,
        pdu: &[u8],
        length: usize,
        trace: &mut TraceContext,
    ) -> NasResult<DecodedMessage> {
        if length > pdu.len() {
            return Err(CodecError::DeclaredLengthExceedsBuffer {
                declared: length,
                actual: pdu.len(),
            }
            .into());
        }

        let mut buf = &pdu[..length];
        let mut security = None;
        let mut state = DecodeState::AwaitingHeader;

        loop {
            trace!(?state, "decode state");
            state = match state {
                DecodeState::AwaitingHeader => {
                    let epd = ExtendedProtocolDiscriminator::nas_decode(&mut buf)?;
                    trace.line(format_args!("EPD: {} (0x{:x})", epd.name(), u8::from(epd)));
                    DecodeState::AwaitingSecurityHeader(epd)
                }
                DecodeState::AwaitingSecurityHeader(epd) => {
                    let security_header_type = SecurityHeaderType::nas_decode(&mut buf)?;
                    trace.line(format_args!(
                        "Security Header: 0x{:x}",
                        u8::from(security_header_type)
                    ));
                    self.security_header(epd, security_header_type, &mut buf, trace)?
                }
                DecodeState::SecurityWrapperStripped(wrapper) => {
                    security = Some(wrapper);
                    DecodeState::AwaitingHeader
                }
                DecodeState::Plain(epd, security_header_type) => {
                    let message_type = read_u8(&mut buf)?;
                    let header = PlainHeader {
                        epd,
                        security_header_type,
                        message_type,
                    };
                    trace.line(format_args!(
                        "Message Type: {} (0x{:x})",
                        header.message_name(),
                        message_type
                    ));
                    DecodeState::MessageDispatch(header)
                }
                DecodeState::MessageDispatch(header) => {
                    let body_offset = length - buf.len();
                    let body = trace.nested(|t| self.dispatch(&header, &mut buf, t))?;
                    DecodeState::Done(Box::new(DecodedMessage {
                        header,
                        security,
                        body_offset,
                        body,
                    }))
                }
                DecodeState::Done(message) => return Ok(*message),
            };
        }
    }

    fn security_header(
        &mut self,
        epd: ExtendedProtocolDiscriminator,
        security_header_type: SecurityHeaderType,
        buf: &mut &[u8],
        trace: &mut TraceContext,
    ) -> NasResult<DecodeState> {
        if !security_header_type.is_protected() {
            return Ok(DecodeState::Plain(epd, security_header_type));
        }

        if self.security_header_parsed {
            trace.detail("inner message carries a non-plain security header, decoding it as plain");
            warn!(
                security_header_type = u8::from(security_header_type),
                "Non-plain security header on inner message"
            );
            return Ok(DecodeState::Plain(epd, security_header_type));
        }

        let wrapper = SecurityWrapper::decode(buf, security_header_type)?;
        trace.detail(format_args!("mac: {}", hex::encode(wrapper.mac)));
        trace.detail(format_args!("seq: {}", wrapper.sequence_number));
        self.security_header_parsed = true;
        Ok(DecodeState::SecurityWrapperStripped(wrapper))
    }

    fn dispatch(
        &mut self,
        header: &PlainHeader,
        buf: &mut &[u8],
        trace: &mut TraceContext,
    ) -> NasResult<MessageBody> {
        if header.epd != ExtendedProtocolDiscriminator::MobilityManagement {
            return Ok(MessageBody::Unparsed);
        }

        match header.mm_message_type() {
            Some(MmMessageType::AuthenticationRequest) => {
                self.auth.reset_challenge();
                let request = AuthenticationRequest::decode(buf, &self.registry, trace)?;
                let aka = self.run_aka(&request, trace)?;
                Ok(MessageBody::AuthenticationRequest { request, aka })
            }
            Some(MmMessageType::SecurityModeCommand) => {
                let command = SecurityModeCommand::decode(buf, &self.registry, trace)?;
                Ok(MessageBody::SecurityModeCommand(command))
            }
            _ => Ok(MessageBody::Unparsed),
        }
    }

    fn run_aka(
        &mut self,
        request: &AuthenticationRequest,
        trace: &mut TraceContext,
    ) -> NasResult<AkaResponse> {
        let rand = request
            .rand()
            .ok_or(NasError::MissingAuthenticationParameter("RAND"))?;
        let autn = request
            .autn()
            .ok_or(NasError::MissingAuthenticationParameter("AUTN"))?;
        self.auth.rand = Some(rand);
        self.auth.autn = Some(autn);

        let plmn = self.plmn();
        let milenage = self.auth.milenage();
        let aka = trace.nested(|t| {
            t.line(format_args!("K   : {}", hex::encode(self.auth.k)));
            t.line(format_args!("OPc : {}", hex::encode(self.auth.opc)));
            authenticate(&milenage, &plmn, &rand, &autn, t)
        })?;

        self.auth.res_star = Some(aka.res_star);
        Ok(aka)
    }
}
