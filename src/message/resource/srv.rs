use super::*;
use crate::error::Result;
use crate::message::name::*;
use crate::message::packer::*;

// An SRVResource is an SRV Resource record.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SrvResource {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: Name, // Not compressed as per RFC 2782, unless configured.
}

impl fmt::Display for SrvResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dnsmessage.SRVResource{{priority: {}, weight: {}, port: {}, target: {}}}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

impl RecordData for SrvResource {
    fn real_type(&self) -> DnsType {
        DnsType::Srv
    }

    // pack appends the wire format of the SRVResource to msg.
    fn pack(
        &self,
        mut msg: Vec<u8>,
        compression: &mut Option<HashMap<String, usize>>,
        compression_off: usize,
    ) -> Result<Vec<u8>> {
        msg = pack_uint16(msg, self.priority);
        msg = pack_uint16(msg, self.weight);
        msg = pack_uint16(msg, self.port);
        self.target.pack(msg, compression, compression_off)
    }

    // Other encoders do compress the target, so pointers are followed here.
    fn unpack(msg: &[u8], off: usize, _length: usize) -> Result<(Self, usize)> {
        let (priority, off) = unpack_uint16(msg, off)?;
        let (weight, off) = unpack_uint16(msg, off)?;
        let (port, off) = unpack_uint16(msg, off)?;
        let mut target = Name::default();
        let off = target.unpack(msg, off)?;

        Ok((
            SrvResource {
                priority,
                weight,
                port,
                target,
            },
            off,
        ))
    }
}
