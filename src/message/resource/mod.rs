pub mod a;
pub mod aaaa;
pub mod ptr;
pub mod srv;
pub mod txt;

use std::collections::HashMap;
use std::fmt;

use a::*;
use aaaa::*;
use ptr::*;
use srv::*;
use txt::*;

use super::name::*;
use super::packer::*;
use super::*;
use crate::config::Config;
use crate::error::*;

// A Resource is a DNS resource record.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub header: ResourceHeader,
    pub body: ResourceBody,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dnsmessage.Resource{{Header: {}, Type: {}, Body: {}}}",
            self.header,
            self.typ(),
            self.body
        )
    }
}

impl Resource {
    pub fn new(name: Name, ttl: u32, body: ResourceBody) -> Self {
        Resource {
            header: ResourceHeader {
                name,
                ttl,
                ..Default::default()
            },
            body,
        }
    }

    // typ is the type of the record, taken from its body.
    pub fn typ(&self) -> DnsType {
        self.body.real_type()
    }

    // pack appends the wire format of the Resource to msg.
    pub fn pack(
        &self,
        msg: Vec<u8>,
        compression: &mut Option<HashMap<String, usize>>,
        compression_off: usize,
        config: &Config,
    ) -> Result<Vec<u8>> {
        let (mut msg, len_off) = self
            .header
            .pack(msg, self.typ(), compression, compression_off)?;
        let pre_len = msg.len();
        msg = self.body.pack(msg, compression, compression_off, config)?;
        ResourceHeader::fix_len(&mut msg, len_off, pre_len)?;
        Ok(msg)
    }

    // unpack parses one record at off and returns it with the offset of the
    // next one.
    pub fn unpack(msg: &[u8], off: usize) -> Result<(Self, usize)> {
        let (header, typ, length, off) = ResourceHeader::unpack(msg, off)?;
        let (body, off) = unpack_resource_body(typ, msg, off, length as usize)?;
        Ok((Resource { header, body }, off))
    }
}

// A ResourceHeader is the header of a DNS resource record. There are
// many types of DNS resource records, but they all share the same header.
// The type and the data length are derived from the body while packing.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ResourceHeader {
    // Name is the domain name for which this resource record pertains.
    pub name: Name,

    // Class is the class of network to which this DNS resource record
    // pertains.
    pub class: DnsClass,

    // cache_flush is the mDNS cache-flush bit, carried in the top bit of the
    // class field.
    pub cache_flush: bool,

    // TTL is the length of time (measured in seconds) which this resource
    // record is valid for (time to live). All Resources in a set should
    // have the same TTL (RFC 2181 Section 5.2).
    pub ttl: u32,
}

impl fmt::Display for ResourceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dnsmessage.ResourceHeader{{Name: {}, Class: {}, CacheFlush: {}, TTL: {}}}",
            self.name, self.class, self.cache_flush, self.ttl,
        )
    }
}

impl ResourceHeader {
    // pack appends the wire format of the ResourceHeader to msg, with a zero
    // placeholder for the data length.
    //
    // The returned offset is where the length field was packed.
    pub fn pack(
        &self,
        mut msg: Vec<u8>,
        typ: DnsType,
        compression: &mut Option<HashMap<String, usize>>,
        compression_off: usize,
    ) -> Result<(Vec<u8>, usize)> {
        msg = self.name.pack(msg, compression, compression_off)?;
        msg = typ.pack(msg);
        msg = self.class.pack(msg, self.cache_flush);
        msg = pack_uint32(msg, self.ttl);
        let len_off = msg.len();
        msg = pack_uint16(msg, 0);
        Ok((msg, len_off))
    }

    // unpack reads the common fields of a record: the header itself, the type
    // and the declared data length.
    pub fn unpack(msg: &[u8], off: usize) -> Result<(Self, DnsType, u16, usize)> {
        let mut name = Name::default();
        let off = name.unpack(msg, off)?;
        let (typ, off) = DnsType::unpack(msg, off)?;
        let (class, cache_flush, off) = DnsClass::unpack(msg, off)?;
        let (ttl, off) = unpack_uint32(msg, off)?;
        let (length, off) = unpack_uint16(msg, off)?;

        Ok((
            ResourceHeader {
                name,
                class,
                cache_flush,
                ttl,
            },
            typ,
            length,
            off,
        ))
    }

    // fix_len fills in the length field at len_off now that the body, which
    // began at pre_len, has been packed.
    pub(crate) fn fix_len(msg: &mut [u8], len_off: usize, pre_len: usize) -> Result<()> {
        if msg.len() < pre_len || msg.len() > pre_len + u16::MAX as usize {
            return Err(Error::ErrResTooLong);
        }

        let con_len = (msg.len() - pre_len) as u16;
        msg[len_off..len_off + UINT16LEN].copy_from_slice(&con_len.to_be_bytes());

        Ok(())
    }
}

// RecordData is the codec of one kind of record body.
pub trait RecordData: fmt::Display + fmt::Debug {
    // real_type returns the actual type of the Resource. This is used to
    // fill in the header Type field.
    fn real_type(&self) -> DnsType;

    // pack packs a Resource except for its header.
    fn pack(
        &self,
        msg: Vec<u8>,
        compression: &mut Option<HashMap<String, usize>>,
        compression_off: usize,
    ) -> Result<Vec<u8>>;

    // unpack reads a body of length bytes at off.
    fn unpack(msg: &[u8], off: usize, length: usize) -> Result<(Self, usize)>
    where
        Self: Sized;
}

// ResourceBody is a DNS resource record minus the header. Supporting another
// record type takes a variant here and an arm in unpack_resource_body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceBody {
    Ptr(PtrResource),
    Srv(SrvResource),
    Txt(TxtResource),
    A(AResource),
    Aaaa(AaaaResource),
}

impl fmt::Display for ResourceBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceBody::Ptr(b) => write!(f, "{b}"),
            ResourceBody::Srv(b) => write!(f, "{b}"),
            ResourceBody::Txt(b) => write!(f, "{b}"),
            ResourceBody::A(b) => write!(f, "{b}"),
            ResourceBody::Aaaa(b) => write!(f, "{b}"),
        }
    }
}

impl ResourceBody {
    pub fn real_type(&self) -> DnsType {
        match self {
            ResourceBody::Ptr(b) => b.real_type(),
            ResourceBody::Srv(b) => b.real_type(),
            ResourceBody::Txt(b) => b.real_type(),
            ResourceBody::A(b) => b.real_type(),
            ResourceBody::Aaaa(b) => b.real_type(),
        }
    }

    pub(crate) fn pack(
        &self,
        msg: Vec<u8>,
        compression: &mut Option<HashMap<String, usize>>,
        compression_off: usize,
        config: &Config,
    ) -> Result<Vec<u8>> {
        match self {
            ResourceBody::Ptr(b) => b.pack(msg, compression, compression_off),
            ResourceBody::Srv(b) if !config.compress_srv_target => {
                b.pack(msg, &mut None, compression_off)
            }
            ResourceBody::Srv(b) => b.pack(msg, compression, compression_off),
            ResourceBody::Txt(b) => b.pack(msg, compression, compression_off),
            ResourceBody::A(b) => b.pack(msg, compression, compression_off),
            ResourceBody::Aaaa(b) => b.pack(msg, compression, compression_off),
        }
    }
}

impl From<PtrResource> for ResourceBody {
    fn from(b: PtrResource) -> Self {
        ResourceBody::Ptr(b)
    }
}

impl From<SrvResource> for ResourceBody {
    fn from(b: SrvResource) -> Self {
        ResourceBody::Srv(b)
    }
}

impl From<TxtResource> for ResourceBody {
    fn from(b: TxtResource) -> Self {
        ResourceBody::Txt(b)
    }
}

impl From<AResource> for ResourceBody {
    fn from(b: AResource) -> Self {
        ResourceBody::A(b)
    }
}

impl From<AaaaResource> for ResourceBody {
    fn from(b: AaaaResource) -> Self {
        ResourceBody::Aaaa(b)
    }
}

fn unpack_as<T: RecordData + Into<ResourceBody>>(
    msg: &[u8],
    off: usize,
    length: usize,
) -> Result<(ResourceBody, usize)> {
    let (body, off) = T::unpack(msg, off, length)?;
    Ok((body.into(), off))
}

// unpack_resource_body decodes the body of a record of type typ whose data
// is length bytes at off. The body must use up exactly length bytes.
pub fn unpack_resource_body(
    typ: DnsType,
    msg: &[u8],
    off: usize,
    length: usize,
) -> Result<(ResourceBody, usize)> {
    if off + length > msg.len() {
        return Err(Error::ErrTruncated);
    }

    let (body, new_off) = match typ {
        DnsType::Ptr => unpack_as::<PtrResource>(msg, off, length)?,
        DnsType::Srv => unpack_as::<SrvResource>(msg, off, length)?,
        DnsType::Txt => unpack_as::<TxtResource>(msg, off, length)?,
        DnsType::A => unpack_as::<AResource>(msg, off, length)?,
        DnsType::Aaaa => unpack_as::<AaaaResource>(msg, off, length)?,
        _ => return Err(Error::ErrUnknownType(typ as u16)),
    };

    if new_off - off != length {
        return Err(Error::ErrRdataLengthMismatch {
            declared: length,
            consumed: new_off - off,
        });
    }

    Ok((body, new_off))
}
