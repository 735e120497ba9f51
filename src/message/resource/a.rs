use std::net::Ipv4Addr;

use super::*;
use crate::message::packer::*;

// An AResource is an A Resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AResource {
    pub a: Ipv4Addr,
}

impl fmt::Display for AResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dnsmessage.AResource{{A: {}}}", self.a)
    }
}

impl RecordData for AResource {
    fn real_type(&self) -> DnsType {
        DnsType::A
    }

    // pack appends the wire format of the AResource to msg.
    fn pack(
        &self,
        msg: Vec<u8>,
        _compression: &mut Option<HashMap<String, usize>>,
        _compression_off: usize,
    ) -> Result<Vec<u8>> {
        Ok(pack_bytes(msg, &self.a.octets()))
    }

    fn unpack(msg: &[u8], off: usize, _length: usize) -> Result<(Self, usize)> {
        let mut a = [0u8; 4];
        let off = unpack_bytes(msg, off, &mut a)?;
        Ok((AResource { a: a.into() }, off))
    }
}
