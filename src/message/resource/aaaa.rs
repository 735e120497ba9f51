use std::net::Ipv6Addr;

use super::*;
use crate::message::packer::*;

// An AAAAResource is an AAAA Resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AaaaResource {
    pub aaaa: Ipv6Addr,
}

impl fmt::Display for AaaaResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dnsmessage.AAAAResource{{AAAA: {}}}", self.aaaa)
    }
}

impl RecordData for AaaaResource {
    fn real_type(&self) -> DnsType {
        DnsType::Aaaa
    }

    // pack appends the wire format of the AAAAResource to msg.
    fn pack(
        &self,
        msg: Vec<u8>,
        _compression: &mut Option<HashMap<String, usize>>,
        _compression_off: usize,
    ) -> Result<Vec<u8>> {
        Ok(pack_bytes(msg, &self.aaaa.octets()))
    }

    fn unpack(msg: &[u8], off: usize, _length: usize) -> Result<(Self, usize)> {
        let mut aaaa = [0u8; 16];
        let off = unpack_bytes(msg, off, &mut aaaa)?;
        Ok((AaaaResource { aaaa: aaaa.into() }, off))
    }
}
