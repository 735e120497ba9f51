use super::*;
use crate::error::*;

// pack_uint8 appends the wire format of field to msg.
pub(crate) fn pack_uint8(mut msg: Vec<u8>, field: u8) -> Vec<u8> {
    msg.push(field);
    msg
}

pub(crate) fn unpack_uint8(msg: &[u8], off: usize) -> Result<(u8, usize)> {
    match msg.get(off) {
        Some(&v) => Ok((v, off + 1)),
        None => Err(Error::ErrTruncated),
    }
}

// pack_uint16 appends the wire format of field to msg.
pub(crate) fn pack_uint16(mut msg: Vec<u8>, field: u16) -> Vec<u8> {
    msg.extend_from_slice(&field.to_be_bytes());
    msg
}

pub(crate) fn unpack_uint16(msg: &[u8], off: usize) -> Result<(u16, usize)> {
    if off + UINT16LEN > msg.len() {
        return Err(Error::ErrTruncated);
    }

    Ok((
        (msg[off] as u16) << 8 | (msg[off + 1] as u16),
        off + UINT16LEN,
    ))
}

// pack_uint32 appends the wire format of field to msg.
pub(crate) fn pack_uint32(mut msg: Vec<u8>, field: u32) -> Vec<u8> {
    msg.extend_from_slice(&field.to_be_bytes());
    msg
}

pub(crate) fn unpack_uint32(msg: &[u8], off: usize) -> Result<(u32, usize)> {
    if off + UINT32LEN > msg.len() {
        return Err(Error::ErrTruncated);
    }
    let v = (msg[off] as u32) << 24
        | (msg[off + 1] as u32) << 16
        | (msg[off + 2] as u32) << 8
        | (msg[off + 3] as u32);
    Ok((v, off + UINT32LEN))
}

// pack_bytes appends the wire format of field to msg.
pub(crate) fn pack_bytes(mut msg: Vec<u8>, field: &[u8]) -> Vec<u8> {
    msg.extend_from_slice(field);
    msg
}

// unpack_bytes fills field with the next field.len() bytes of msg.
pub(crate) fn unpack_bytes(msg: &[u8], off: usize, field: &mut [u8]) -> Result<usize> {
    let new_off = off + field.len();
    if new_off > msg.len() {
        return Err(Error::ErrTruncated);
    }
    field.copy_from_slice(&msg[off..new_off]);
    Ok(new_off)
}

// pack_str appends a character-string: one length byte followed by the bytes
// of field.
pub(crate) fn pack_str(msg: Vec<u8>, field: &str) -> Result<Vec<u8>> {
    let l = field.len();
    if l > 255 {
        return Err(Error::ErrStringTooLong);
    }
    let msg = pack_uint8(msg, l as u8);
    Ok(pack_bytes(msg, field.as_bytes()))
}

pub(crate) fn unpack_str(msg: &[u8], off: usize) -> Result<(String, usize)> {
    let (l, begin_off) = unpack_uint8(msg, off)?;
    let end_off = begin_off + l as usize;
    if end_off > msg.len() {
        return Err(Error::ErrTruncated);
    }

    Ok((
        String::from_utf8(msg[begin_off..end_off].to_vec())?,
        end_off,
    ))
}
