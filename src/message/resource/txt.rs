use super::*;
use crate::error::Result;
use crate::message::packer::*;

// A TXTResource is a txt Resource record holding DNS-SD attributes. Each
// attribute is one character-string "key=value" on the wire, in order.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TxtResource {
    pub attributes: Vec<(String, String)>,
}

impl fmt::Display for TxtResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let txt: Vec<String> = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "dnsmessage.TXTResource{{txt: {{{}}}}}", txt.join(","))
    }
}

impl TxtResource {
    pub fn new<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        TxtResource {
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    // get returns the value of the first attribute named key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl RecordData for TxtResource {
    fn real_type(&self) -> DnsType {
        DnsType::Txt
    }

    // pack appends the wire format of the TXTResource to msg. With no
    // attributes a single empty string is written, as RFC 6763 section 6.1
    // requires.
    fn pack(
        &self,
        mut msg: Vec<u8>,
        _compression: &mut Option<HashMap<String, usize>>,
        _compression_off: usize,
    ) -> Result<Vec<u8>> {
        if self.attributes.is_empty() {
            return pack_str(msg, "");
        }
        for (key, value) in &self.attributes {
            msg = pack_str(msg, &format!("{key}={value}"))?;
        }
        Ok(msg)
    }

    // unpack reads character-strings until length bytes are used up. Empty
    // strings are skipped and a string without '=' is a key with an empty
    // value.
    fn unpack(msg: &[u8], mut off: usize, length: usize) -> Result<(Self, usize)> {
        let end_off = off + length;
        let mut attributes = vec![];
        while off < end_off {
            let (s, new_off) = unpack_str(msg, off)?;
            off = new_off;
            // Empty strings carry no attribute; an all-empty TXT packs back as one.
            if s.is_empty() {
                continue;
            }
            let attribute = match s.split_once('=') {
                Some((k, v)) => (k.to_owned(), v.to_owned()),
                None => (s, String::new()),
            };
            attributes.push(attribute);
        }

        Ok((TxtResource { attributes }, off))
    }
}
