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

//! Implementation of data structures related to domain names.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;

use arrayvec::ArrayVec;

mod builder;
mod error;
pub mod wire;
pub use builder::NameBuilder;
pub use error::Error;

/// The maximum length of the uncompressed on-the-wire representation of
/// a domain name.
pub const MAX_WIRE_LEN: usize = 255;

/// The maximum length of a label in a domain name (not including the
/// octet that provides the length).
pub const MAX_LABEL_LEN: usize = 63;

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A domain name, stored as its uncompressed on-the-wire
/// representation ([RFC 1035 § 3.1]).
///
/// `Name`s can be constructed in several ways:
///
/// * through the [`FromStr`] implementation, which is how host names
///   supplied by callers become question names;
/// * through a [`NameBuilder`]; and
/// * from compressed on-the-wire names through
///   [`Name::try_from_compressed`].
///
/// The wire representation lives inline in a fixed-capacity buffer of
/// [`MAX_WIRE_LEN`] octets, so building or decompressing a name never
/// reallocates, and the length cap is enforced by the buffer itself.
///
/// The [`Display`](fmt::Display) implementation produces the dotted
/// textual form *without* a trailing dot. The root name therefore
/// displays as the empty string. Octets that cannot appear literally
/// are escaped as described in [RFC 4343 § 2.1], and the [`FromStr`]
/// implementation accepts the same escapes, so display and parsing
/// round-trip exactly for ASCII names. Names holding octets above 0x7F
/// (which can only come off the wire) display fine but do not parse.
///
/// [RFC 1035 § 3.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.1
/// [RFC 4343 § 2.1]: https://datatracker.ietf.org/doc/html/rfc4343#section-2.1
#[derive(Clone)]
pub struct Name {
    wire_repr: ArrayVec<u8, MAX_WIRE_LEN>,
}

#[allow(clippy::len_without_is_empty)] // A domain name is never empty!
impl Name {
    /// Returns a `Name` representing the DNS root.
    pub fn root() -> Self {
        let mut wire_repr = ArrayVec::new();
        wire_repr.push(0);
        Self { wire_repr }
    }

    /// Constructs a `Name` from a wire representation that the caller
    /// has already validated.
    fn from_validated(wire_repr: ArrayVec<u8, MAX_WIRE_LEN>) -> Self {
        Self { wire_repr }
    }

    /// Returns whether the `Name` is the DNS root.
    pub fn is_root(&self) -> bool {
        self.wire_repr.len() == 1
    }

    /// Returns an iterator over the octets of the non-null labels in
    /// this `Name`.
    pub fn labels(&self) -> Labels {
        Labels {
            wire_repr: &self.wire_repr,
        }
    }

    /// Returns the number of labels in this `Name`, including the
    /// terminal null label.
    pub fn len(&self) -> usize {
        self.labels().count() + 1
    }

    /// Returns the (uncompressed) on-the-wire representation of the
    /// `Name`.
    pub fn wire_repr(&self) -> &[u8] {
        &self.wire_repr
    }

    /// Decompresses the name at index `start` of `octets`, which should
    /// be a whole DNS message since pointers index into it. Returns the
    /// name and the number of octets it occupies at `start`, i.e. how
    /// far to skip to reach the next field. See
    /// [`wire::parse_compressed_name`].
    pub fn try_from_compressed(octets: &[u8], start: usize) -> Result<(Self, usize), Error> {
        wire::parse_compressed_name(octets, start)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut labels = self.labels();
        if let Some(first) = labels.next() {
            fmt_label(first, f)?;
            for label in labels {
                f.write_str(".")?;
                fmt_label(label, f)?;
            }
        }
        Ok(())
    }
}

/// Writes a label in presentation format.
fn fmt_label(octets: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    octets.iter().try_for_each(|&octet| match octet {
        b'.' | b'\\' => write!(f, "\\{}", octet as char),
        _ if octet.is_ascii_graphic() => write!(f, "{}", octet as char),
        _ => write!(f, "\\{:03}", octet),
    })
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

/// In accordance with RFC 1034 § 3.1 (clarified by RFC 4343),
/// comparison of `Name`s is ASCII-case-insensitive. Length octets are
/// at most 63 and so are never affected by case folding.
impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.wire_repr.eq_ignore_ascii_case(&other.wire_repr)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for octet in self.wire_repr.iter() {
            state.write_u8(octet.to_ascii_lowercase());
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ITERATION OVER A NAME'S LABELS                                     //
////////////////////////////////////////////////////////////////////////

/// An iterator over the octets of the non-null labels in a [`Name`].
///
/// To use this iterator, construct one from a [`Name`] using
/// [`Name::labels`].
#[derive(Clone, Debug)]
pub struct Labels<'a> {
    wire_repr: &'a [u8],
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let len = *self.wire_repr.first()? as usize;
        if len == 0 {
            self.wire_repr = &[];
            None
        } else {
            let label = &self.wire_repr[1..len + 1];
            self.wire_repr = &self.wire_repr[len + 1..];
            Some(label)
        }
    }
}

impl FusedIterator for Labels<'_> {}

////////////////////////////////////////////////////////////////////////
// PARSING OF NAMES FROM RUST STRINGS                                 //
////////////////////////////////////////////////////////////////////////

/// Allows for conversion of a host name into a [`Name`]. The passed
/// string must be strictly ASCII. A trailing dot is optional, and both
/// the empty string and `"."` denote the root. Escape sequences as
/// defined by [RFC 4343 § 2.1] are supported, but a `\DDD` escape must
/// also denote an ASCII octet.
///
/// [RFC 4343 § 2.1]: https://datatracker.ietf.org/doc/html/rfc4343#section-2.1
impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "." {
            return Ok(Name::root());
        }

        let mut remaining_octets: &[u8] = s.as_ref();
        let mut builder = NameBuilder::new();

        // NOTE: to check that the string is ASCII, it suffices to check
        // that each octet is ASCII as we go. This is because all
        // multi-byte characters start with an octet that is not ASCII.
        while let Some(&octet) = remaining_octets.first() {
            if octet == b'\\' {
                let (value, consumed) = parse_escape(&remaining_octets[1..])?;
                builder.push(value)?;
                remaining_octets = &remaining_octets[consumed + 1..];
            } else if octet == b'.' {
                builder.end_label()?;
                remaining_octets = &remaining_octets[1..];
            } else if !octet.is_ascii() {
                return Err(Error::StrNotAscii);
            } else {
                builder.push(octet)?;
                remaining_octets = &remaining_octets[1..];
            }
        }
        builder.finish()
    }
}

/// Parses the escape sequence that follows a backslash, returning the
/// octet it stands for and the number of octets it spans.
fn parse_escape(after_backslash: &[u8]) -> Result<(u8, usize), Error> {
    match *after_backslash {
        [a, b, c, ..] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
            let value = [a, b, c]
                .iter()
                .fold(0u16, |acc, digit| acc * 10 + (digit - b'0') as u16);
            match u8::try_from(value) {
                Ok(octet) if octet.is_ascii() => Ok((octet, 3)),
                Ok(_) => Err(Error::StrNotAscii),
                Err(_) => Err(Error::InvalidEscape),
            }
        }
        [a, ..] if a.is_ascii_digit() => Err(Error::InvalidEscape),
        [a, ..] if a.is_ascii() => Ok((a, 1)),
        [_, ..] => Err(Error::StrNotAscii),
        [] => Err(Error::InvalidEscape),
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
