use std::collections::HashMap;
use std::fmt;

use super::packer::*;
use crate::error::*;

// NAME_LEN is the longest domain name on the wire, in octets. The dotted text
// form of a name is one octet shorter than its wire form.
const NAME_LEN: usize = 255;

// MAX_LABEL_LEN is the longest single label. The two most significant bits of
// a length byte have special meaning, so segments can't be long enough to need
// them.
const MAX_LABEL_LEN: usize = (1 << 6) - 1;

// PTR_LIMIT is the first offset that no longer fits in the 14 bits of a
// compression pointer.
const PTR_LIMIT: usize = 1 << 14;

// A Name is a non-encoded domain name, dot separated, normally with a trailing
// dot. Unpacked names always carry the trailing dot.
#[derive(Default, PartialEq, Eq, Debug, Clone, Hash)]
pub struct Name {
    pub data: String,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl Name {
    pub fn new(data: &str) -> Result<Self> {
        if data.len() > NAME_LEN {
            Err(Error::ErrNameTooLong)
        } else {
            Ok(Name {
                data: data.to_owned(),
            })
        }
    }

    // labels splits the name at its dots. The empty label left by a trailing
    // dot is dropped, so both "." and "" are the root.
    fn labels(&self) -> Result<Vec<&str>> {
        let data = self.data.strip_suffix('.').unwrap_or(&self.data);
        if data.is_empty() {
            return Ok(vec![]);
        }

        let labels: Vec<&str> = data.split('.').collect();
        let mut wire_len = 1;
        for label in &labels {
            if label.is_empty() {
                return Err(Error::ErrZeroSegLen);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(Error::ErrSegTooLong);
            }
            wire_len += label.len() + 1;
        }
        if wire_len > NAME_LEN {
            return Err(Error::ErrNameTooLong);
        }

        Ok(labels)
    }

    // pack appends the wire format of the Name to msg.
    //
    // Domain names are a sequence of counted strings split at the dots. They end
    // with a zero-length string. Compression can be used to reuse domain suffixes.
    //
    // The compression map is keyed by the remaining text at each label: the
    // whole name with its trailing dot, then each inner suffix joined without
    // the root dot. It maps to the offset, relative to compression_off, where that
    // suffix was first written. If compression is None, names are written in
    // full and nothing is recorded.
    pub fn pack(
        &self,
        mut msg: Vec<u8>,
        compression: &mut Option<HashMap<String, usize>>,
        compression_off: usize,
    ) -> Result<Vec<u8>> {
        let labels = self.labels()?;

        for (i, label) in labels.iter().enumerate() {
            if let Some(compression) = compression {
                let key = if i == 0 {
                    format!("{}.", labels.join("."))
                } else {
                    labels[i..].join(".")
                };

                if let Some(&ptr) = compression.get(&key) {
                    // Hit. Emit a pointer instead of the rest of the domain.
                    msg = pack_uint16(msg, 0xC000 | ptr as u16);
                    return Ok(msg);
                }

                // Miss. Only offsets that fit in the pointer field are recorded.
                let off = msg.len() - compression_off;
                if off < PTR_LIMIT {
                    compression.insert(key, off);
                }
            }

            msg = pack_uint8(msg, label.len() as u8);
            msg = pack_bytes(msg, label.as_bytes());
        }

        Ok(pack_uint8(msg, 0))
    }

    // unpack reads a domain name starting at off and returns the offset just
    // past it. Pointers redirect reading to earlier data, but the returned
    // offset only moves past the first pointer met.
    //
    // A pointer has to land strictly before the run of labels it ends, so each
    // hop goes backwards and a loop can never be followed.
    pub fn unpack(&mut self, msg: &[u8], off: usize) -> Result<usize> {
        // curr_off is the current working offset.
        let mut curr_off = off;

        // run_start is where the labels being read began: off, then the target
        // of the latest pointer.
        let mut run_start = off;

        // new_off is where the next field starts once a pointer was followed.
        let mut new_off = None;

        let mut name = String::new();

        loop {
            let (c, next_off) = unpack_uint8(msg, curr_off)?;
            match c & 0xC0 {
                0x00 => {
                    if c == 0x00 {
                        // A zero length signals the end of the name.
                        curr_off = next_off;
                        break;
                    }
                    let end_off = next_off + c as usize;
                    if end_off > msg.len() {
                        return Err(Error::ErrTruncated);
                    }
                    name.push_str(&String::from_utf8(msg[next_off..end_off].to_vec())?);
                    name.push('.');
                    if name.len() + 1 > NAME_LEN {
                        return Err(Error::ErrNameTooLong);
                    }
                    curr_off = end_off;
                }
                0xC0 => {
                    let (c1, next_off) = unpack_uint8(msg, next_off)?;
                    let ptr = ((c ^ 0xC0) as usize) << 8 | c1 as usize;
                    if ptr >= run_start {
                        return Err(Error::ErrInvalidPtr);
                    }
                    if new_off.is_none() {
                        new_off = Some(next_off);
                    }
                    run_start = ptr;
                    curr_off = ptr;
                }
                _ => {
                    // Prefixes 0x80 and 0x40 are reserved.
                    return Err(Error::ErrInvalidLabelLength);
                }
            }
        }

        if name.is_empty() {
            name.push('.');
        }
        self.data = name;

        Ok(new_off.unwrap_or(curr_off))
    }
}
