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

//! Implementation of the [`Writer`] type to serialize DNS queries.

use std::fmt;

use super::constants::*;
use super::{Opcode, Question};

////////////////////////////////////////////////////////////////////////
// WRITER                                                             //
////////////////////////////////////////////////////////////////////////

/// Serializes a DNS query into a caller-provided buffer.
///
/// Constructing a `Writer` (through [`TryFrom`]) zeroes the 12-octet
/// header, which leaves a standard query with no flags set. Header
/// fields can then be set in any order, and questions are appended with
/// [`Writer::add_question`], names uncompressed. [`Writer::finish`]
/// fills in QDCOUNT and returns the message length; the other counts
/// stay zero.
pub struct Writer<'a> {
    octets: &'a mut [u8],
    len: usize,
    qdcount: u16,
}

impl<'a> Writer<'a> {
    /// Sets the 16-bit ID of the message.
    pub fn set_id(&mut self, id: u16) {
        self.octets[ID_START..ID_START + 2].copy_from_slice(&id.to_be_bytes());
    }

    /// Sets the message's opcode.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        OPCODE.set(self.octets, opcode.into());
    }

    /// Sets or clears the RD (recursion desired) bit.
    pub fn set_rd(&mut self, rd: bool) {
        RD.set(self.octets, rd.into());
    }

    /// Returns the current number of questions in the message.
    pub fn qdcount(&self) -> u16 {
        self.qdcount
    }

    /// Appends a question to the message. If the question does not fit
    /// in the rest of the buffer, nothing is written.
    pub fn add_question(&mut self, question: &Question) -> Result<()> {
        let qdcount = self.qdcount.checked_add(1).ok_or(Error::CountOverflow)?;
        let qname = question.qname.wire_repr();
        let end = self.len + qname.len() + 4;
        let dest = self
            .octets
            .get_mut(self.len..end)
            .ok_or(Error::Truncation)?;
        let (name_dest, fixed_dest) = dest.split_at_mut(qname.len());
        name_dest.copy_from_slice(qname);
        fixed_dest[..2].copy_from_slice(&u16::from(question.qtype).to_be_bytes());
        fixed_dest[2..].copy_from_slice(&u16::from(question.qclass).to_be_bytes());
        self.len = end;
        self.qdcount = qdcount;
        Ok(())
    }

    /// Finishes writing the message, returning its final length.
    pub fn finish(self) -> usize {
        self.octets[QDCOUNT_START..QDCOUNT_START + 2].copy_from_slice(&self.qdcount.to_be_bytes());
        self.len
    }
}

impl<'a> TryFrom<&'a mut [u8]> for Writer<'a> {
    type Error = Error;

    /// Starts a query in `octets`, failing if the buffer cannot hold a
    /// header.
    fn try_from(octets: &'a mut [u8]) -> Result<Self> {
        let header = octets.get_mut(..HEADER_SIZE).ok_or(Error::Truncation)?;
        header.fill(0);
        Ok(Self {
            octets,
            len: HEADER_SIZE,
            qdcount: 0,
        })
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a [`Writer`] operation could not be
/// performed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// Adding the question would overflow the QDCOUNT field.
    CountOverflow,

    /// There is not enough room left in the buffer.
    Truncation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::CountOverflow => f.write_str("question count would overflow"),
            Self::Truncation => f.write_str("message would be truncated"),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Writer`] methods.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
