//! Security Mode Command (3GPP TS 24.501 Section 8.2.25)

use bytes::BufMut;

use crate::codec::{read_lv, read_u8, write_lv, CodecResult, NasEncode};
use crate::enums::MmMessageType;
use crate::header::PlainHeader;
use crate::ies::{IeList, IeRegistry};
use crate::security::{NasKeySetIdentifier, NasSecurityAlgorithms, UeSecurityCapability};
use crate::trace::TraceContext;

/// Security Mode Command message (network to UE)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityModeCommand {
    /// Selected NAS security algorithms
    pub algorithms: NasSecurityAlgorithms,
    /// ngKSI - NAS key set identifier
    pub ng_ksi: NasKeySetIdentifier,
    /// UE security capability as received by the network
    pub replayed_ue_security_capability: UeSecurityCapability,
    /// Optional IEs in wire order
    pub ies: IeList,
}

impl SecurityModeCommand {
    /// Decode the message body (after the header has been parsed)
    pub fn decode(
        buf: &mut &[u8],
        registry: &IeRegistry,
        trace: &mut TraceContext,
    ) -> CodecResult<Self> {
        trace.line("Security Mode Command");
        trace.nested(|t| -> CodecResult<Self> {
            let algorithms = NasSecurityAlgorithms(read_u8(buf)?);
            t.line("NAS Security Algorithms");
            t.detail(format_args!("NAS Security Algorithms: 0x{:02x}", algorithms.0));

            let ksi_octet = read_u8(buf)?;
            t.line(format_args!("ngKSI: 0x{ksi_octet:x}"));
            let ng_ksi = NasKeySetIdentifier::decode(ksi_octet);

            let capability = read_lv(buf)?;
            t.line("Replayed UE Security Capability");
            t.detail(format_args!("Capability: 0x{}", hex::encode(&capability)));
            let replayed_ue_security_capability = UeSecurityCapability::from_value(&capability)?;

            let ies = registry.parse_ies(buf, t)?;
            Ok(Self {
                algorithms,
                ng_ksi,
                replayed_ue_security_capability,
                ies,
            })
        })
    }
}

impl NasEncode for SecurityModeCommand {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        PlainHeader::new(MmMessageType::SecurityModeCommand).nas_encode(buf)?;
        buf.put_u8(self.algorithms.0);
        buf.put_u8(self.ng_ksi.encode() & 0x0F);
        write_lv(buf, &self.replayed_ue_security_capability.to_value())?;
        for ie in &self.ies.elements {
            ie.nas_encode(buf)?;
        }
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        PlainHeader::SIZE
            + 2
            + 1
            + self.replayed_ue_security_capability.to_value().len()
            + self.ies.elements.iter().map(|ie| ie.encoded_len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::ies::InformationElement;
    use crate::security::{CipheringAlgorithm, IntegrityAlgorithm};

    #[test]
    fn test_security_mode_command_decode() {
        // NEA0/NIA2, ngKSI 0, replayed capability, IMEISV request
        let data = [0x02, 0x00, 0x04, 0x80, 0xA0, 0x00, 0x00, 0xE1];
        let mut buf = &data[..];
        let mut trace = TraceContext::recording();
        let smc = SecurityModeCommand::decode(&mut buf, &IeRegistry::standard(), &mut trace).unwrap();

        assert!(buf.is_empty());
        assert_eq!(smc.algorithms.ciphering(), Some(CipheringAlgorithm::Nea0));
        assert_eq!(smc.algorithms.integrity(), Some(IntegrityAlgorithm::Nia2));
        assert_eq!(smc.ng_ksi.ksi, 0);
        assert_eq!(smc.replayed_ue_security_capability, UeSecurityCapability::advertised());
        assert_eq!(smc.ies.elements, vec![InformationElement::ImeisvRequest(1)]);
        assert_eq!(
            trace.lines(),
            [
                "Security Mode Command",
                "  NAS Security Algorithms",
                "    NAS Security Algorithms: 0x02",
                "  ngKSI: 0x0",
                "  Replayed UE Security Capability",
                "    Capability: 0x80a00000",
                "  IMEISV Request IE",
                "    value: 0x1",
            ]
        );
    }

    #[test]
    fn test_security_mode_command_truncated_capability() {
        let data = [0x02, 0x00, 0x04, 0x80];
        let mut buf = &data[..];
        let result =
            SecurityModeCommand::decode(&mut buf, &IeRegistry::standard(), &mut TraceContext::new());
        assert_eq!(result, Err(CodecError::LengthExceedsBuffer { length: 4, remaining: 1 }));
    }

    #[test]
    fn test_security_mode_command_encode() {
        let smc = SecurityModeCommand {
            algorithms: NasSecurityAlgorithms::new(CipheringAlgorithm::Nea0, IntegrityAlgorithm::Nia2),
            ng_ksi: NasKeySetIdentifier::new(Default::default(), 0),
            replayed_ue_security_capability: UeSecurityCapability::advertised(),
            ies: IeList::default(),
        };
        let bytes = smc.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x7e, 0x00, 0x5d, 0x02, 0x00, 0x04, 0x80, 0xa0, 0x00, 0x00]);
        assert_eq!(bytes.len(), smc.encoded_len());
    }

    #[test]
    fn test_security_mode_command_reencodes_replayed_capability() {
        // 3-octet capability: EEA bitmap only
        let body = [0x02, 0x00, 0x03, 0xE0, 0xE0, 0x70];
        let mut buf = &body[..];
        let smc = SecurityModeCommand::decode(&mut buf, &IeRegistry::standard(), &mut TraceContext::new())
            .unwrap();

        let mut expected = vec![0x7e, 0x00, 0x5d];
        expected.extend_from_slice(&body);
        assert_eq!(smc.to_bytes().unwrap(), expected);
    }
}
