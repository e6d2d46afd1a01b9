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

//! Provides the [`Type`] structure for DNS RR types.

use std::fmt;
use std::str::FromStr;

use crate::util::{find_mnemonic, parse_generic};

////////////////////////////////////////////////////////////////////////
// RR TYPES                                                           //
////////////////////////////////////////////////////////////////////////

/// The RR type of a record or question: a full 16-bit value on the
/// wire.
///
/// Lookups interpret the RDATA of [`Type::A`], [`Type::AAAA`],
/// [`Type::NS`] and [`Type::CNAME`] records. The other named constants
/// only exist so that common types print and parse by mnemonic; any
/// value can be carried, and anything else prints in the generic
/// `TYPEnnn` form of RFC 3597.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Type(u16);

impl Type {
    pub const A: Type = Type(1);
    pub const NS: Type = Type(2);
    pub const CNAME: Type = Type(5);
    pub const SOA: Type = Type(6);
    pub const PTR: Type = Type(12);
    pub const MX: Type = Type(15);
    pub const TXT: Type = Type(16);
    pub const AAAA: Type = Type(28);
    pub const SRV: Type = Type(33);
    pub const OPT: Type = Type(41);
    pub const DS: Type = Type(43);
    pub const RRSIG: Type = Type(46);
    pub const NSEC: Type = Type(47);
    pub const DNSKEY: Type = Type(48);
    pub const NSEC3: Type = Type(50);
    pub const HTTPS: Type = Type(65);
    pub const CAA: Type = Type(257);

    /// Returns whether lookups interpret RDATA of this type. RDATA of
    /// any other type is skipped.
    pub fn is_interpreted(self) -> bool {
        matches!(self, Self::A | Self::AAAA | Self::NS | Self::CNAME)
    }

    /// Returns the mnemonic of this type, if it has one.
    pub fn mnemonic(self) -> Option<&'static str> {
        MNEMONICS
            .iter()
            .find(|&&(rr_type, _)| rr_type == self)
            .map(|&(_, mnemonic)| mnemonic)
    }
}

const MNEMONICS: [(Type, &str); 17] = [
    (Type::A, "A"),
    (Type::NS, "NS"),
    (Type::CNAME, "CNAME"),
    (Type::SOA, "SOA"),
    (Type::PTR, "PTR"),
    (Type::MX, "MX"),
    (Type::TXT, "TXT"),
    (Type::AAAA, "AAAA"),
    (Type::SRV, "SRV"),
    (Type::OPT, "OPT"),
    (Type::DS, "DS"),
    (Type::RRSIG, "RRSIG"),
    (Type::NSEC, "NSEC"),
    (Type::DNSKEY, "DNSKEY"),
    (Type::NSEC3, "NSEC3"),
    (Type::HTTPS, "HTTPS"),
    (Type::CAA, "CAA"),
];

impl From<u16> for Type {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Type> for u16 {
    fn from(rr_type: Type) -> Self {
        rr_type.0
    }
}

impl FromStr for Type {
    type Err = &'static str;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        find_mnemonic(&MNEMONICS, text)
            .or_else(|| parse_generic(text, "TYPE").map(Self))
            .ok_or("unknown type")
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mnemonic() {
            Some(mnemonic) => f.write_str(mnemonic),
            None => write!(f, "TYPE{}", self.0),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
