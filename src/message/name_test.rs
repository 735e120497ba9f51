use std::collections::HashMap;

use super::name::*;
use crate::error::*;

// Two pointers deep: the name at offset 89 is "Zithoek" followed by a pointer
// to 68 ("_airplay" + pointer to 33, "_tcp.local.").
const POINTER_CHAIN_MSG: &str = "000084000000000200000006075a6974686f656b0c5f6465766963652d696e666f045f746370056c6f63616c000010000100001194000d0c6d6f64656c3d4a3432644150085f616972706c6179c021000c000100001194000a075a6974686f656bc044";

fn pack_fresh(name: &str) -> Result<Vec<u8>> {
    Name::new(name)?.pack(vec![], &mut Some(HashMap::new()), 0)
}

#[test]
fn test_name_pack_unpack() -> Result<()> {
    let tests = vec![
        ("", ".", None),
        (".", ".", None),
        ("google.com", "google.com.", None),
        ("google.com.", "google.com.", None),
        ("www.google.com.", "www.google.com.", None),
        ("google..com.", "", Some(Error::ErrZeroSegLen)),
        (".google.com.", "", Some(Error::ErrZeroSegLen)),
        ("www..google.com.", "", Some(Error::ErrZeroSegLen)),
    ];

    for (input, want, want_err) in tests {
        let result = pack_fresh(input);
        if let Some(want_err) = want_err {
            assert_eq!(result, Err(want_err), "packing {input}");
            continue;
        }

        let buf = result?;
        let mut got = Name::default();
        let n = got.unpack(&buf, 0)?;
        assert_eq!(
            n,
            buf.len(),
            "unpacked different amount than packed for {}: got = {}, want = {}",
            input,
            n,
            buf.len(),
        );
        assert_eq!(got.data, want, "unpacking packing of {input}");
    }

    Ok(())
}

#[test]
fn test_name_wire_format() -> Result<()> {
    assert_eq!(pack_fresh(".")?, vec![0]);
    assert_eq!(
        hex::encode(pack_fresh("_hap._tcp.local.")?),
        "045f686170045f746370056c6f63616c00"
    );
    Ok(())
}

#[test]
fn test_name_too_long() -> Result<()> {
    let label = "a".repeat(64);
    assert_eq!(
        pack_fresh(&format!("{label}.local.")),
        Err(Error::ErrSegTooLong)
    );

    let label = "a".repeat(63);
    assert!(pack_fresh(&format!("{label}.local.")).is_ok());

    // Four 63 byte labels need 257 bytes on the wire.
    let name = Name {
        data: vec![label.as_str(); 4].join("."),
    };
    assert_eq!(
        name.pack(vec![], &mut None, 0),
        Err(Error::ErrNameTooLong)
    );
    assert_eq!(Name::new(&"a.".repeat(128)), Err(Error::ErrNameTooLong));

    Ok(())
}

#[test]
fn test_name_compression_reuses_suffix() -> Result<()> {
    let mut compression = Some(HashMap::new());
    let first = Name::new("abc.def.local.")?;
    let buf = first.pack(vec![], &mut compression, 0)?;
    assert_eq!(buf.len(), 15);

    // Exact repeat of the whole name is a single pointer to offset 0.
    let buf = first.pack(buf, &mut compression, 0)?;
    assert_eq!(&buf[15..], &[0xC0, 0x00]);

    // A new leading label followed by a pointer to "def.local" at offset 4.
    let buf = Name::new("xyz.def.local.")?.pack(buf, &mut compression, 0)?;
    assert_eq!(&buf[17..], &[3, b'x', b'y', b'z', 0xC0, 0x04]);

    let mut off = 0;
    for want in ["abc.def.local.", "abc.def.local.", "xyz.def.local."] {
        let mut name = Name::default();
        off = name.unpack(&buf, off)?;
        assert_eq!(name.data, want);
    }
    assert_eq!(off, buf.len());

    Ok(())
}

#[test]
fn test_name_pack_is_deterministic() -> Result<()> {
    let a = pack_fresh("Swift._hap._tcp.local.")?;
    let b = pack_fresh("Swift._hap._tcp.local.")?;
    assert_eq!(hex::encode(a), hex::encode(b));
    Ok(())
}

#[test]
fn test_name_no_compression() -> Result<()> {
    let name = Name::new("abc.local.")?;
    let buf = name.pack(vec![], &mut None, 0)?;
    let buf = name.pack(buf, &mut None, 0)?;
    assert_eq!(buf.len(), 2 * 11);
    Ok(())
}

#[test]
fn test_name_compression_offset_is_relative() -> Result<()> {
    let mut compression = Some(HashMap::new());
    let name = Name::new("local.")?;
    let buf = name.pack(vec![0xAA; 5], &mut compression, 5)?;
    let buf = name.pack(buf, &mut compression, 5)?;
    assert_eq!(&buf[12..], &[0xC0, 0x00]);
    Ok(())
}

#[test]
fn test_name_offsets_beyond_pointer_range_not_recorded() -> Result<()> {
    let mut compression = Some(HashMap::new());
    let name = Name::new("far.local.")?;
    let buf = name.pack(vec![0; 1 << 14], &mut compression, 0)?;
    assert_eq!(compression.as_ref().map(|c| c.len()), Some(0));

    let before = buf.len();
    let buf = name.pack(buf, &mut compression, 0)?;
    assert_eq!(buf.len() - before, 11);
    Ok(())
}

#[test]
fn test_unpack_name_follows_pointers() -> Result<()> {
    let msg = hex::decode(POINTER_CHAIN_MSG).expect("valid hex");
    let mut name = Name::default();
    let off = name.unpack(&msg, 89)?;
    assert_eq!(name.data, "Zithoek._airplay._tcp.local.");
    assert_eq!(off, 99);
    Ok(())
}

#[test]
fn test_unpack_name_rejects_bad_pointers() {
    let tests = vec![
        // Points at itself.
        ("self", vec![0xC0, 0x00], 0),
        // Points forward, past the pointer.
        ("forward", vec![0xC0, 0x02, 0x01, b'a', 0x00], 0),
        // Outside of the message.
        ("out of bounds", vec![0x01, b'a', 0xC0, 0x40], 0),
        // Back into the label run that holds the pointer.
        (
            "into own run",
            vec![0x01, b'a', 0x01, b'b', 0xC0, 0x02],
            2,
        ),
        // 0 -> 2 -> 0, entered at 2.
        ("loop", vec![0xC0, 0x02, 0xC0, 0x00], 2),
    ];

    for (desc, msg, off) in tests {
        let mut name = Name::default();
        assert_eq!(
            name.unpack(&msg, off),
            Err(Error::ErrInvalidPtr),
            "{desc}"
        );
    }
}

#[test]
fn test_unpack_name_errors() {
    let tests = vec![
        ("reserved 0x40", vec![0x41, b'a', 0x00], Error::ErrInvalidLabelLength),
        ("reserved 0x80", vec![0x81, b'a', 0x00], Error::ErrInvalidLabelLength),
        ("empty", vec![], Error::ErrTruncated),
        ("short label", vec![0x05, b'a', b'b'], Error::ErrTruncated),
        ("no terminator", vec![0x01, b'a'], Error::ErrTruncated),
        ("half pointer", vec![0x01, b'a', 0x00, 0xC0], Error::ErrTruncated),
    ];

    for (desc, msg, want) in tests {
        let off = if desc == "half pointer" { 3 } else { 0 };
        let mut name = Name::default();
        assert_eq!(name.unpack(&msg, off), Err(want), "{desc}");
    }
}

#[test]
fn test_name_compression_ignores_trailing_dot() -> Result<()> {
    let mut compression = Some(HashMap::new());
    let buf = Name::new("a.local")?.pack(vec![], &mut compression, 0)?;
    let buf = Name::new("a.local.")?.pack(buf, &mut compression, 0)?;
    assert_eq!(&buf[9..], &[0xC0, 0x00]);
    Ok(())
}

// wire_name builds the wire form of a name from label lengths, all 'a's.
fn wire_name(lens: &[usize]) -> Vec<u8> {
    let mut msg = vec![];
    for &l in lens {
        msg.push(l as u8);
        msg.extend(std::iter::repeat(b'a').take(l));
    }
    msg.push(0);
    msg
}

#[test]
fn test_name_wire_length_limit() -> Result<()> {
    // 1 + 64 * 3 + 62 = 255 octets.
    let msg = wire_name(&[63, 63, 63, 61]);
    assert_eq!(msg.len(), 255);
    let mut name = Name::default();
    assert_eq!(name.unpack(&msg, 0)?, 255);
    assert_eq!(name.data.len(), 254);
    assert_eq!(name.pack(vec![], &mut None, 0)?, msg);

    // One octet more is refused both ways.
    let msg = wire_name(&[63, 63, 63, 62]);
    assert_eq!(msg.len(), 256);
    let mut name = Name::default();
    assert_eq!(name.unpack(&msg, 0), Err(Error::ErrNameTooLong));

    let long = Name {
        data: ["a".repeat(63), "a".repeat(63), "a".repeat(63), "a".repeat(62)].join("."),
    };
    assert_eq!(long.pack(vec![], &mut None, 0), Err(Error::ErrNameTooLong));
    Ok(())
}
