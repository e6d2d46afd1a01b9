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

//! Provides the [`Ttl`] structure for DNS RR TTLs.

use std::fmt;

////////////////////////////////////////////////////////////////////////
// TTLS                                                               //
////////////////////////////////////////////////////////////////////////

/// The time to live (TTL) of a DNS record, in seconds.
///
/// There are contradictory definitions of the TTL field in [RFC 1035]
/// (see [erratum 2130]). This type follows the signed reading: the four
/// octets on the wire are a big-endian two's complement 32-bit integer.
/// A TTL with the most significant bit set is therefore negative; what
/// to do with such a record (RFC 2181 § 8 suggests treating it as zero)
/// is left to the cache that stores it.
///
/// [Erratum 2130]: https://www.rfc-editor.org/errata/eid2130
/// [RFC 1035]: https://datatracker.ietf.org/doc/html/rfc1035
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Ttl(i32);

impl Ttl {
    /// Returns the TTL in seconds.
    pub fn secs(self) -> i32 {
        self.0
    }
}

impl From<i32> for Ttl {
    fn from(secs: i32) -> Self {
        Self(secs)
    }
}

/// Converts the raw wire value, reinterpreting its bits as signed.
impl From<u32> for Ttl {
    fn from(raw: u32) -> Self {
        Self(raw as i32)
    }
}

impl From<Ttl> for i32 {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl fmt::Debug for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_ttls_are_not_modified() {
        let i32_max = i32::MAX as u32;
        assert_eq!(Ttl::from(0u32).secs(), 0);
        assert_eq!(Ttl::from(300u32).secs(), 300);
        assert_eq!(Ttl::from(i32_max).secs(), i32::MAX);
    }

    #[test]
    fn large_wire_values_are_negative() {
        assert_eq!(Ttl::from(0xffff_ffffu32).secs(), -1);
        assert_eq!(Ttl::from(i32::MAX as u32 + 1).secs(), i32::MIN);
    }
}
