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

//! Implementation of the [`Class`] type for DNS classes.

use std::fmt;
use std::str::FromStr;

use crate::util::{find_mnemonic, parse_generic};

/// A DNS class: a full 16-bit value on the wire.
///
/// Every query this crate sends is of class [`IN`](Class::IN).
/// Responses are read with the full class field, so records of other
/// classes keep the message walk in step even though they are never
/// interpreted.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Class(u16);

impl Class {
    pub const IN: Self = Self(1);
    pub const CH: Self = Self(3);
    pub const HS: Self = Self(4);
    pub const NONE: Self = Self(254);
    pub const ANY: Self = Self(255);
}

const MNEMONICS: [(Class, &str); 5] = [
    (Class::IN, "IN"),
    (Class::CH, "CH"),
    (Class::HS, "HS"),
    (Class::NONE, "NONE"),
    (Class::ANY, "ANY"),
];

impl From<u16> for Class {
    fn from(value: u16) -> Self {
        Class(value)
    }
}

impl From<Class> for u16 {
    fn from(class: Class) -> Self {
        class.0
    }
}

impl FromStr for Class {
    type Err = &'static str;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        find_mnemonic(&MNEMONICS, text)
            .or_else(|| parse_generic(text, "CLASS").map(Self))
            .ok_or("unknown class")
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match MNEMONICS.iter().find(|&&(class, _)| class == *self) {
            Some((_, mnemonic)) => f.write_str(mnemonic),
            None => write!(f, "CLASS{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Class;

    #[test]
    fn displays_known_classes_by_mnemonic() {
        assert_eq!(Class::IN.to_string(), "IN");
        assert_eq!(Class::from(3).to_string(), "CH");
        assert_eq!(Class::from(0xff00).to_string(), "CLASS65280");
    }

    #[test]
    fn parses_mnemonics_and_rfc3597_form() {
        assert_eq!("in".parse::<Class>(), Ok(Class::IN));
        assert_eq!("CLASS1".parse::<Class>(), Ok(Class::IN));
        assert_eq!("CLASS65280".parse::<Class>().map(u16::from), Ok(65280));
        assert!("CLASS".parse::<Class>().is_err());
    }
}
