// Copyright 2021 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Parsing of compressed on-the-wire names (RFC 1035 § 4.1.4).

use arrayvec::ArrayVec;

use super::{Error, Name, MAX_WIRE_LEN};

/// The two high bits of a length octet that mark a compression pointer.
const POINTER_TAG: u8 = 0xc0;

/// One label as found on the wire.
#[derive(Debug)]
enum WireLabel<'a> {
    Normal(&'a [u8]),
    Null,
    Pointer(usize),
}

/// Reads the label at `index` of `octets`.
fn read_label(octets: &[u8], index: usize) -> Result<WireLabel, Error> {
    let len = *octets.get(index).ok_or(Error::UnexpectedEom)?;
    match len & POINTER_TAG {
        POINTER_TAG => {
            let low = *octets.get(index + 1).ok_or(Error::UnexpectedEom)?;
            let high = (len & !POINTER_TAG) as usize;
            Ok(WireLabel::Pointer(high << 8 | low as usize))
        }
        0 if len == 0 => Ok(WireLabel::Null),
        0 => octets
            .get(index + 1..index + 1 + len as usize)
            .map(WireLabel::Normal)
            .ok_or(Error::UnexpectedEom),

        // The 0b01 and 0b10 prefixes (extended label types) are not
        // supported, so such octets can only be overlong labels.
        _ => Err(Error::LabelTooLong),
    }
}

/// Parses a compressed name starting at index `start` of `octets`.
/// Returns the decompressed name and the number of octets the name
/// occupies at `start`: a trailing pointer counts as two octets no
/// matter how much of the name it stands for. This is the
/// implementation of [`Name::try_from_compressed`].
///
/// The length at `start` comes from [`skip_compressed_name`], while the
/// name itself comes from [`expand_compressed_name`].
pub fn parse_compressed_name(octets: &[u8], start: usize) -> Result<(Name, usize), Error> {
    let len = skip_compressed_name(octets.get(start..).ok_or(Error::UnexpectedEom)?)?;
    let name = expand_compressed_name(octets, start)?;
    Ok((name, len))
}

/// Reconstructs the name starting at index `start` of `octets`,
/// following pointers.
///
/// Indices given in pointers are treated as indices of `octets`, so
/// the whole DNS message should be passed in. Every pointer must refer
/// to an index *earlier* than the start of the chunk it is found in.
/// Each hop thus strictly decreases the read position, and a chain of
/// pointers always terminates.
pub fn expand_compressed_name(octets: &[u8], start: usize) -> Result<Name, Error> {
    let mut wire_repr = ArrayVec::<u8, MAX_WIRE_LEN>::new();
    let mut chunk_start = start;
    let mut index = start;

    loop {
        match read_label(octets, index)? {
            WireLabel::Normal(label) => {
                wire_repr
                    .try_extend_from_slice(&octets[index..index + 1 + label.len()])
                    .or(Err(Error::NameTooLong))?;
                index += 1 + label.len();
            }
            WireLabel::Null => {
                wire_repr.try_push(0).or(Err(Error::NameTooLong))?;
                return Ok(Name::from_validated(wire_repr));
            }
            WireLabel::Pointer(target) => {
                if target >= chunk_start {
                    return Err(Error::InvalidPointer);
                }
                chunk_start = target;
                index = target;
            }
        }
    }
}

/// Skips a compressed name starting at the beginning of `octets`,
/// returning the number of octets it occupies there. Pointers are not
/// followed, so their targets go unchecked.
pub fn skip_compressed_name(octets: &[u8]) -> Result<usize, Error> {
    let mut index = 0;
    loop {
        match read_label(octets, index)? {
            WireLabel::Normal(label) => {
                index += 1 + label.len();

                // At least one more octet of the name must follow.
                if index >= MAX_WIRE_LEN {
                    return Err(Error::NameTooLong);
                }
            }
            WireLabel::Null => return Ok(index + 1),
            WireLabel::Pointer(_) => return Ok(index + 2),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> Name {
        text.parse().unwrap()
    }

    ////////////////////////////////////////////////////////////////////
    // TESTS FOR parse_compressed_name                                //
    ////////////////////////////////////////////////////////////////////

    #[test]
    fn parse_compressed_name_accepts_valid_uncompressed_names() {
        let octets = b"junk\x07example\x04test\x00junk";
        assert_eq!(
            parse_compressed_name(octets, 4),
            Ok((name("example.test"), 14))
        );
    }

    #[test]
    fn parse_compressed_name_accepts_valid_compressed_names() {
        let octets = b"junk\x04test\x00junk\x07example\xc0\x04junk";
        assert_eq!(
            parse_compressed_name(octets, 14),
            Ok((name("example.test"), 10))
        );
    }

    #[test]
    fn parse_compressed_name_accepts_bare_pointer() {
        let octets = b"\x07example\x03com\x00\xc0\x00";
        let (parsed, len) = parse_compressed_name(octets, 13).unwrap();
        assert_eq!(parsed.to_string(), "example.com");
        assert_eq!(len, 2);
    }

    #[test]
    fn parse_compressed_name_follows_pointer_chains() {
        // "com" at 0, "example" + pointer to 0 at 5, "www" + pointer
        // to 5 at 15, and a bare pointer to 15 at 21.
        let octets = b"\x03com\x00\x07example\xc0\x00\x03www\xc0\x05\xc0\x0f";
        let (parsed, len) = parse_compressed_name(octets, 21).unwrap();
        assert_eq!(parsed.to_string(), "www.example.com");
        assert_eq!(len, 2);
        let (parsed, len) = parse_compressed_name(octets, 15).unwrap();
        assert_eq!(parsed.to_string(), "www.example.com");
        assert_eq!(len, 6);
    }

    #[test]
    fn parse_compressed_name_decodes_pointer_to_root_as_empty() {
        let octets = b"\x00\xc0\x00";
        let (parsed, len) = parse_compressed_name(octets, 1).unwrap();
        assert!(parsed.is_root());
        assert_eq!(parsed.to_string(), "");
        assert_eq!(parsed.labels().count(), 0);
        assert_eq!(len, 2);
    }

    #[test]
    fn parse_compressed_name_rejects_long_label() {
        assert_eq!(
            parse_compressed_name(
                b"\x40xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx\x00",
                0
            ),
            Err(Error::LabelTooLong),
        );
    }

    #[test]
    fn parse_compressed_name_rejects_long_label_with_pointers() {
        assert_eq!(
            parse_compressed_name(
                b"\x01x\
                  \x40xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx\
                  \x00\x01x\xc0\x00",
                68
            ),
            Err(Error::LabelTooLong),
        );
    }

    #[test]
    fn parse_compressed_name_rejects_long_name_with_pointers() {
        // 127 single-octet labels (254 octets, plus the null label,
        // make a maximal 255-octet name), followed by 16 more labels
        // that point back to it.
        let mut octets = Vec::new();
        for _ in 0..127 {
            octets.extend_from_slice(b"\x01x");
        }
        octets.push(0);
        let start = octets.len();
        for _ in 0..16 {
            octets.extend_from_slice(b"\x01x");
        }
        octets.extend_from_slice(b"\xc0\x00");
        assert_eq!(
            parse_compressed_name(&octets, start),
            Err(Error::NameTooLong)
        );
    }

    #[test]
    fn parse_compressed_name_rejects_unexpected_eom() {
        assert_eq!(
            parse_compressed_name(b"\x07example\x04tes", 0),
            Err(Error::UnexpectedEom),
        );
        assert_eq!(
            parse_compressed_name(b"\x07example", 9),
            Err(Error::UnexpectedEom),
        );
        assert_eq!(
            parse_compressed_name(b"\x01x\xc0", 0),
            Err(Error::UnexpectedEom),
        );
    }

    #[test]
    fn parse_compressed_name_rejects_pointer_loops() {
        assert_eq!(
            parse_compressed_name(b"\xc0\x00", 0),
            Err(Error::InvalidPointer),
        );
        assert_eq!(
            parse_compressed_name(b"\x01a\x01b\xc0\x00", 2),
            Err(Error::InvalidPointer),
        );
    }

    #[test]
    fn parse_compressed_name_rejects_forward_pointers() {
        assert_eq!(
            parse_compressed_name(b"\x01x\xc0\x08junk\x00", 0),
            Err(Error::InvalidPointer),
        );
    }

    #[test]
    fn round_trip_through_wire_form() {
        let hosts = [
            "a".to_string(),
            "www.example.com".to_string(),
            vec!["x".repeat(63); 3].join("."),
            vec!["y"; 127].join("."),
        ];
        for host in hosts {
            let encoded: Name = host.parse().unwrap();
            let mut octets = b"\x00\x00".to_vec();
            octets.extend_from_slice(encoded.wire_repr());
            let (decoded, len) = parse_compressed_name(&octets, 2).unwrap();
            assert_eq!(decoded.to_string(), host);
            assert_eq!(len, encoded.wire_repr().len());
        }
    }

    ////////////////////////////////////////////////////////////////////
    // TESTS FOR skip_compressed_name                                 //
    ////////////////////////////////////////////////////////////////////

    #[test]
    fn skip_compressed_name_accepts_valid_uncompressed_names() {
        let wire_repr_and_junk = b"\x07example\x04test\x00junk";
        assert_eq!(skip_compressed_name(wire_repr_and_junk), Ok(14));
    }

    #[test]
    fn skip_compressed_name_accepts_valid_compressed_first_chunks() {
        let wire_repr_and_junk = b"\x07example\xc0\x0cjunk";
        assert_eq!(skip_compressed_name(wire_repr_and_junk), Ok(10));
    }

    #[test]
    fn skip_compressed_name_accepts_almost_too_long_first_chunk() {
        // The first chunk is one octet longer than MAX_WIRE_LEN, but
        // the pointer may stand for just the null label.
        let mut wire_repr = Vec::new();
        for _ in 0..127 {
            wire_repr.extend_from_slice(b"\x01x");
        }
        wire_repr.extend_from_slice(b"\xc0\x0c");
        assert_eq!(wire_repr.len(), MAX_WIRE_LEN + 1);
        assert_eq!(skip_compressed_name(&wire_repr), Ok(MAX_WIRE_LEN + 1));
    }

    #[test]
    fn skip_compressed_name_rejects_truncated_pointer() {
        assert_eq!(skip_compressed_name(b"\x01x\xc0"), Err(Error::UnexpectedEom));
    }

    #[test]
    fn skip_compressed_name_rejects_unexpected_eom() {
        assert_eq!(
            skip_compressed_name(b"\x07example\x04tes"),
            Err(Error::UnexpectedEom)
        );
    }
}
