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

//! Layout of the 12-octet DNS message header ([RFC 1035 § 4.1.1]).
//!
//! [RFC 1035 § 4.1.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1

pub const HEADER_SIZE: usize = 12;

// Start indices of the 16-bit header fields.
pub const ID_START: usize = 0;
pub const QDCOUNT_START: usize = 4;
pub const ANCOUNT_START: usize = 6;
pub const NSCOUNT_START: usize = 8;
pub const ARCOUNT_START: usize = 10;

/// A field of one or more bits within a single header octet.
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    index: usize,
    mask: u8,
}

impl Bits {
    const fn new(index: usize, mask: u8) -> Self {
        Self { index, mask }
    }

    fn shift(self) -> u32 {
        self.mask.trailing_zeros()
    }

    /// Extracts the field's value from `header`, shifted down so that
    /// its lowest bit is bit 0.
    pub fn get(self, header: &[u8]) -> u8 {
        (header[self.index] & self.mask) >> self.shift()
    }

    /// Stores `value` in the field, leaving the other bits of the octet
    /// alone. Bits of `value` that do not fit are dropped.
    pub fn set(self, header: &mut [u8], value: u8) {
        let octet = &mut header[self.index];
        *octet = (*octet & !self.mask) | ((value << self.shift()) & self.mask);
    }
}

pub const QR: Bits = Bits::new(2, 0x80);
pub const OPCODE: Bits = Bits::new(2, 0x78);
pub const AA: Bits = Bits::new(2, 0x04);
pub const TC: Bits = Bits::new(2, 0x02);
pub const RD: Bits = Bits::new(2, 0x01);
pub const RA: Bits = Bits::new(3, 0x80);
pub const RCODE: Bits = Bits::new(3, 0x0f);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_get_and_set_only_their_field() {
        let mut header = [0xff; HEADER_SIZE];
        OPCODE.set(&mut header, 2);
        assert_eq!(header[2], 0x97);
        assert_eq!(OPCODE.get(&header), 2);
        assert_eq!(QR.get(&header), 1);
        RD.set(&mut header, 0);
        assert_eq!(RD.get(&header), 0);
        assert_eq!(TC.get(&header), 1);
        assert_eq!(RCODE.get(&header), 0x0f);
    }
}
