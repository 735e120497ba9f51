#[cfg(test)]
mod name_test;

pub mod header;
pub mod name;
mod packer;
pub mod question;
pub mod resource;

use std::collections::HashMap;
use std::fmt;

use header::*;
use packer::*;
use question::*;
use resource::*;

use crate::config::Config;
use crate::error::*;

// Message formats

// A Type is a type of DNS request and response.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DnsType {
    // ResourceHeader.Type and question.Type
    #[default]
    A = 1,
    Ns = 2,
    Cname = 5,
    Soa = 6,
    Ptr = 12,
    Mx = 15,
    Txt = 16,
    Aaaa = 28,
    Srv = 33,
    Nsec = 47,

    // question.Type
    All = 255,
}

impl TryFrom<u16> for DnsType {
    type Error = Error;

    fn try_from(v: u16) -> Result<Self> {
        Ok(match v {
            1 => DnsType::A,
            2 => DnsType::Ns,
            5 => DnsType::Cname,
            6 => DnsType::Soa,
            12 => DnsType::Ptr,
            15 => DnsType::Mx,
            16 => DnsType::Txt,
            28 => DnsType::Aaaa,
            33 => DnsType::Srv,
            47 => DnsType::Nsec,
            255 => DnsType::All,
            _ => return Err(Error::ErrUnknownType(v)),
        })
    }
}

impl fmt::Display for DnsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            DnsType::A => "A",
            DnsType::Ns => "NS",
            DnsType::Cname => "CNAME",
            DnsType::Soa => "SOA",
            DnsType::Ptr => "PTR",
            DnsType::Mx => "MX",
            DnsType::Txt => "TXT",
            DnsType::Aaaa => "AAAA",
            DnsType::Srv => "SRV",
            DnsType::Nsec => "NSEC",
            DnsType::All => "ALL",
        };
        write!(f, "{s}")
    }
}

impl DnsType {
    // pack appends the wire format of the type to msg.
    pub(crate) fn pack(&self, msg: Vec<u8>) -> Vec<u8> {
        pack_uint16(msg, *self as u16)
    }

    pub(crate) fn unpack(msg: &[u8], off: usize) -> Result<(Self, usize)> {
        let (t, off) = unpack_uint16(msg, off)?;
        Ok((DnsType::try_from(t)?, off))
    }
}

// A Class is a type of network. The most significant bit of the wire field is
// not part of the class: it is the mDNS unicast-response bit in questions and
// the cache-flush bit in records, and is kept apart from DnsClass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DnsClass(pub u16);

// ResourceHeader.Class and question.Class
pub const DNSCLASS_INET: DnsClass = DnsClass(1);
pub const DNSCLASS_CSNET: DnsClass = DnsClass(2);
pub const DNSCLASS_CHAOS: DnsClass = DnsClass(3);
pub const DNSCLASS_HESIOD: DnsClass = DnsClass(4);
// question.Class
pub const DNSCLASS_ANY: DnsClass = DnsClass(255);

// CLASS_TOP_BIT marks unicast-response in a question and cache-flush in a
// resource record (RFC 6762 sections 5.4 and 10.2).
const CLASS_TOP_BIT: u16 = 1 << 15;

impl Default for DnsClass {
    fn default() -> Self {
        DNSCLASS_INET
    }
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let other = format!("{}", self.0);
        let s = match *self {
            DNSCLASS_INET => "ClassINET",
            DNSCLASS_CSNET => "ClassCSNET",
            DNSCLASS_CHAOS => "ClassCHAOS",
            DNSCLASS_HESIOD => "ClassHESIOD",
            DNSCLASS_ANY => "ClassANY",
            _ => other.as_str(),
        };
        write!(f, "{s}")
    }
}

impl DnsClass {
    // pack appends the class to msg, with the top bit set if flag is.
    pub(crate) fn pack(&self, msg: Vec<u8>, flag: bool) -> Vec<u8> {
        let mut v = self.0 & !CLASS_TOP_BIT;
        if flag {
            v |= CLASS_TOP_BIT;
        }
        pack_uint16(msg, v)
    }

    // unpack returns the class with its top bit masked off, and that bit.
    pub(crate) fn unpack(msg: &[u8], off: usize) -> Result<(Self, bool, usize)> {
        let (c, off) = unpack_uint16(msg, off)?;
        Ok((
            DnsClass(c & !CLASS_TOP_BIT),
            c & CLASS_TOP_BIT != 0,
            off,
        ))
    }
}

// An OpCode is a DNS operation code.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpCode {
    #[default]
    Query = 0,
    InverseQuery = 1,
    Status = 2,
    Notify = 4,
    Update = 5,
}

impl TryFrom<u8> for OpCode {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self> {
        Ok(match v {
            0 => OpCode::Query,
            1 => OpCode::InverseQuery,
            2 => OpCode::Status,
            4 => OpCode::Notify,
            5 => OpCode::Update,
            _ => return Err(Error::ErrInvalidOpCode(v)),
        })
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            OpCode::Query => "Query",
            OpCode::InverseQuery => "InverseQuery",
            OpCode::Status => "Status",
            OpCode::Notify => "Notify",
            OpCode::Update => "Update",
        };
        write!(f, "{s}")
    }
}

// An RCode is a DNS response status code.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RCode {
    // Message.Rcode
    #[default]
    Success = 0,
    FormatError = 1,
    ServerFailure = 2,
    NameError = 3,
    NotImplemented = 4,
    Refused = 5,
}

impl TryFrom<u8> for RCode {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self> {
        Ok(match v {
            0 => RCode::Success,
            1 => RCode::FormatError,
            2 => RCode::ServerFailure,
            3 => RCode::NameError,
            4 => RCode::NotImplemented,
            5 => RCode::Refused,
            _ => return Err(Error::ErrInvalidRCode(v)),
        })
    }
}

impl fmt::Display for RCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RCode::Success => "RCodeSuccess",
            RCode::FormatError => "RCodeFormatError",
            RCode::ServerFailure => "RCodeServerFailure",
            RCode::NameError => "RCodeNameError",
            RCode::NotImplemented => "RCodeNotImplemented",
            RCode::Refused => "RCodeRefused",
        };
        write!(f, "{s}")
    }
}

// Internal constants.

// PACK_STARTING_CAP is the default initial buffer size allocated during
// packing.
//
// The starting capacity doesn't matter too much, but most DNS responses
// Will be <= 512 bytes as it is the limit for DNS over UDP.
const PACK_STARTING_CAP: usize = 512;

// UINT16LEN is the length (in bytes) of a uint16.
const UINT16LEN: usize = 2;

// UINT32LEN is the length (in bytes) of a uint32.
const UINT32LEN: usize = 4;

// HEADER_LEN is the length (in bytes) of a DNS header.
//
// A header is comprised of 6 uint16s and no padding.
const HEADER_LEN: usize = 6 * UINT16LEN;

const HEADER_BIT_QR: u16 = 1 << 15; // query/response (response=1)
const HEADER_BIT_AA: u16 = 1 << 10; // authoritative
const HEADER_BIT_TC: u16 = 1 << 9; // truncated
const HEADER_BIT_RD: u16 = 1 << 8; // recursion desired
const HEADER_BIT_RA: u16 = 1 << 7; // recursion available

// Message is a representation of a DNS message.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Resource>,
    pub authorities: Vec<Resource>,
    pub additionals: Vec<Resource>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "dnsmessage.Message{Header: ".to_owned();
        s += self.header.to_string().as_str();

        s += ", Questions: ";
        let v: Vec<String> = self.questions.iter().map(|q| q.to_string()).collect();
        s += &v.join(", ");

        s += ", Answers: ";
        let v: Vec<String> = self.answers.iter().map(|q| q.to_string()).collect();
        s += &v.join(", ");

        s += ", Authorities: ";
        let v: Vec<String> = self.authorities.iter().map(|q| q.to_string()).collect();
        s += &v.join(", ");

        s += ", Additionals: ";
        let v: Vec<String> = self.additionals.iter().map(|q| q.to_string()).collect();
        s += &v.join(", ");

        write!(f, "{s}}}")
    }
}

impl Message {
    // unpack parses a full Message. Any malformed field rejects the whole
    // message.
    pub fn unpack(msg: &[u8]) -> Result<Self> {
        Message::unpack_sections(msg).map_err(|err| {
            log::debug!("rejecting {} byte message: {}", msg.len(), err);
            err
        })
    }

    fn unpack_sections(msg: &[u8]) -> Result<Self> {
        let mut h = HeaderInternal::default();
        let mut off = h.unpack(msg, 0)?;
        let header = h.header()?;

        let mut questions = Vec::new();
        for _ in 0..h.questions {
            let (q, new_off) = Question::unpack(msg, off)?;
            questions.push(q);
            off = new_off;
        }

        // Counts come from the wire, so nothing is reserved up front.
        let mut sections = [Vec::new(), Vec::new(), Vec::new()];
        for (section, count) in sections
            .iter_mut()
            .zip([h.answers, h.authorities, h.additionals])
        {
            for _ in 0..count {
                let (r, new_off) = Resource::unpack(msg, off)?;
                section.push(r);
                off = new_off;
            }
        }
        let [answers, authorities, additionals] = sections;

        log::trace!(
            "unpacked message id {}: {} questions, {} answers, {} authorities, {} additionals",
            h.id,
            h.questions,
            h.answers,
            h.authorities,
            h.additionals
        );

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    // pack packs a full Message with the default Config.
    pub fn pack(&self) -> Result<Vec<u8>> {
        self.pack_with_config(&Config::default())
    }

    pub fn pack_with_config(&self, config: &Config) -> Result<Vec<u8>> {
        self.append_pack(Vec::with_capacity(PACK_STARTING_CAP), config)
    }

    // append_pack is like pack but appends the full Message to b and returns the
    // extended buffer. Compression pointers stay relative to the start of the
    // Message, not of b.
    pub fn append_pack(&self, b: Vec<u8>, config: &Config) -> Result<Vec<u8>> {
        // Validate the lengths. It is very unlikely that anyone will try to
        // pack more than 65535 of any particular type, but it is possible and
        // we should fail gracefully.
        if self.questions.len() > u16::MAX as usize {
            return Err(Error::ErrTooManyQuestions);
        }
        if self.answers.len() > u16::MAX as usize {
            return Err(Error::ErrTooManyAnswers);
        }
        if self.authorities.len() > u16::MAX as usize {
            return Err(Error::ErrTooManyAuthorities);
        }
        if self.additionals.len() > u16::MAX as usize {
            return Err(Error::ErrTooManyAdditionals);
        }

        let (id, bits) = self.header.pack();

        let h = HeaderInternal {
            id,
            bits,
            questions: self.questions.len() as u16,
            answers: self.answers.len() as u16,
            authorities: self.authorities.len() as u16,
            additionals: self.additionals.len() as u16,
        };

        let compression_off = b.len();
        let mut msg = h.pack(b);

        // One table for the whole message, so names repeated across sections
        // are compressed too.
        let mut compression = if config.compression {
            Some(HashMap::new())
        } else {
            None
        };

        for question in &self.questions {
            msg = question.pack(msg, &mut compression, compression_off)?;
        }
        for resource in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            msg = resource.pack(msg, &mut compression, compression_off, config)?;
        }

        log::trace!(
            "packed message id {} into {} bytes",
            self.header.id,
            msg.len() - compression_off
        );

        Ok(msg)
    }
}
