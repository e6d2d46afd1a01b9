// Copyright 2022 Matthew Ingwersen.
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

//! The error type for malformed names.

use std::fmt;

/// Reports a malformed domain name, from either a host name string or
/// a message on the wire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// A backslash in a host name was not followed by a single ASCII
    /// character or by exactly three digits with a value of at most 255.
    InvalidEscape,

    /// A compression pointer did not point strictly before the chunk
    /// containing it.
    InvalidPointer,

    /// A label had more than 63 octets, or its length octet used one of
    /// the reserved 0b01 or 0b10 prefixes.
    LabelTooLong,

    /// The name has more than 255 octets in uncompressed wire form.
    NameTooLong,

    /// An empty label appeared before the end of the name, as in
    /// `a..b`.
    NullNonTerminal,

    /// A host name contained non-ASCII characters.
    StrNotAscii,

    /// The message ended in the middle of the name.
    UnexpectedEom,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Self::InvalidEscape => "invalid escape sequence",
            Self::InvalidPointer => "compression pointer does not point backward",
            Self::LabelTooLong => "label is longer than 63 octets",
            Self::NameTooLong => "name is longer than 255 octets",
            Self::NullNonTerminal => "empty label",
            Self::StrNotAscii => "host name is not ASCII",
            Self::UnexpectedEom => "name runs past the end of the message",
        })
    }
}

impl std::error::Error for Error {}
