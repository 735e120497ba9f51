use std::collections::HashMap;
use std::fmt;

use super::name::*;
use super::*;
use crate::error::Result;

// A question is a DNS query.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Question {
    pub name: Name,
    pub typ: DnsType,
    pub class: DnsClass,

    // unicast_response asks the responder to answer by unicast (mDNS "QU"
    // question). It travels in the top bit of the class field.
    pub unicast_response: bool,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dnsmessage.question{{Name: {}, Type: {}, Class: {}, UnicastResponse: {}}}",
            self.name, self.typ, self.class, self.unicast_response
        )
    }
}

impl Question {
    // pack appends the wire format of the question to msg.
    pub fn pack(
        &self,
        mut msg: Vec<u8>,
        compression: &mut Option<HashMap<String, usize>>,
        compression_off: usize,
    ) -> Result<Vec<u8>> {
        msg = self.name.pack(msg, compression, compression_off)?;
        msg = self.typ.pack(msg);
        Ok(self.class.pack(msg, self.unicast_response))
    }

    pub fn unpack(msg: &[u8], off: usize) -> Result<(Self, usize)> {
        let mut name = Name::default();
        let off = name.unpack(msg, off)?;
        let (typ, off) = DnsType::unpack(msg, off)?;
        let (class, unicast_response, off) = DnsClass::unpack(msg, off)?;
        Ok((
            Question {
                name,
                typ,
                class,
                unicast_response,
            },
            off,
        ))
    }
}
