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

//! Implementation of the [`Reader`] type to read on-the-wire DNS
//! messages.

use std::fmt;

use super::constants::*;
use super::{Opcode, Question, Rcode};
use crate::class::Class;
use crate::name::{self, Name};
use crate::rr::{ReadRdataError, RecordData, ResourceRecord, Ttl, Type};

////////////////////////////////////////////////////////////////////////
// READER                                                             //
////////////////////////////////////////////////////////////////////////

/// A read-only view of a DNS response.
///
/// Construction through [`TryFrom`] only checks that the 12-octet
/// header is present, after which the header fields can be inspected
/// in any order. The question and resource records are read in message
/// order with [`Reader::read_question`] and [`Reader::read_rr`], which
/// advance a cursor that starts just past the header. Every read is
/// bounds-checked, so a header that claims more records than the
/// message holds produces an error rather than a read past the end.
#[derive(Eq, PartialEq)]
pub struct Reader<'a> {
    octets: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    /// Returns the 16-bit ID of the message.
    pub fn id(&self) -> u16 {
        self.header_u16(ID_START)
    }

    /// Returns whether the QR (query response) bit is set.
    pub fn qr(&self) -> bool {
        QR.get(self.octets) != 0
    }

    /// Returns the message's opcode.
    pub fn opcode(&self) -> Opcode {
        Opcode::from(OPCODE.get(self.octets))
    }

    /// Returns whether the AA (authoritative answer) bit is set.
    pub fn aa(&self) -> bool {
        AA.get(self.octets) != 0
    }

    /// Returns whether the TC (truncation) bit is set.
    pub fn tc(&self) -> bool {
        TC.get(self.octets) != 0
    }

    /// Returns whether the RD (recursion desired) bit is set.
    pub fn rd(&self) -> bool {
        RD.get(self.octets) != 0
    }

    /// Returns whether the RA (recursion available) bit is set.
    pub fn ra(&self) -> bool {
        RA.get(self.octets) != 0
    }

    /// Returns the RCODE of the message.
    pub fn rcode(&self) -> Rcode {
        Rcode::from(RCODE.get(self.octets))
    }

    /// Returns the number of questions in the message.
    pub fn qdcount(&self) -> u16 {
        self.header_u16(QDCOUNT_START)
    }

    /// Returns the number of answers in the message.
    pub fn ancount(&self) -> u16 {
        self.header_u16(ANCOUNT_START)
    }

    /// Returns the number of authority records in the message.
    pub fn nscount(&self) -> u16 {
        self.header_u16(NSCOUNT_START)
    }

    /// Returns the number of additional records in the message.
    pub fn arcount(&self) -> u16 {
        self.header_u16(ARCOUNT_START)
    }

    /// Returns the index of the octet at which the next question or
    /// record will be read.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reads a [`Question`] starting at the current cursor.
    ///
    /// This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_question(&mut self) -> Result<Question> {
        let (qname, qname_len) =
            Name::try_from_compressed(self.octets, self.cursor).map_err(Error::InvalidOwner)?;
        let qname_end = self.cursor + qname_len;
        let qtype = read_u16(self.octets, qname_end)?.into();
        let qclass = read_u16(self.octets, qname_end + 2)?.into();
        self.cursor = qname_end + 4;
        Ok(Question {
            qname,
            qtype,
            qclass,
        })
    }

    /// Reads a resource record at the current cursor.
    ///
    /// The TYPE and CLASS are read as full 16-bit fields, and the
    /// cursor always advances by the record's RDLENGTH, so records of
    /// types that are not interpreted are stepped over exactly. RDATA
    /// of interpreted types is decoded into [`ReadRr::data`]; see
    /// [`RecordData::read`].
    ///
    /// This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_rr(&mut self) -> Result<ReadRr<'a>> {
        let (owner, owner_len) =
            Name::try_from_compressed(self.octets, self.cursor).map_err(Error::InvalidOwner)?;
        let owner_end = self.cursor + owner_len;
        let rr_type = read_u16(self.octets, owner_end)?.into();
        let class = read_u16(self.octets, owner_end + 2)?.into();
        let ttl = read_u32(self.octets, owner_end + 4)?.into();
        let rdlength = read_u16(self.octets, owner_end + 8)?;
        let rdata_start = owner_end + 10;
        let rdata_end = rdata_start + rdlength as usize;
        let rdata = self
            .octets
            .get(rdata_start..rdata_end)
            .ok_or(Error::InvalidRdata(ReadRdataError::UnexpectedEom))?;
        let data = RecordData::read(rr_type, self.octets, rdata_start, rdlength)?;
        self.cursor = rdata_end;
        Ok(ReadRr {
            owner,
            rr_type,
            class,
            ttl,
            rdata,
            data,
        })
    }

    /// Returns whether the `Reader`'s cursor has reached the end of the
    /// message.
    pub fn at_eom(&self) -> bool {
        self.cursor >= self.octets.len()
    }

    /// Reads a `u16` from the header, which the constructor has checked
    /// is present.
    fn header_u16(&self, start: usize) -> u16 {
        u16::from_be_bytes([self.octets[start], self.octets[start + 1]])
    }
}

impl<'a> TryFrom<&'a [u8]> for Reader<'a> {
    type Error = Error;

    fn try_from(octets: &'a [u8]) -> Result<Self> {
        if octets.len() >= HEADER_SIZE {
            Ok(Self {
                octets,
                cursor: HEADER_SIZE,
            })
        } else {
            Err(Error::HeaderTooShort)
        }
    }
}

impl fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reader")
            .field("id", &format_args!("{:#06x}", self.id()))
            .field("opcode", &self.opcode())
            .field("rcode", &self.rcode())
            .field(
                "counts",
                &[self.qdcount(), self.ancount(), self.nscount(), self.arcount()],
            )
            .field("cursor", &self.cursor)
            .field("len", &self.octets.len())
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////
// HELPERS FOR READING MULTI-BYTE INTEGERS                            //
////////////////////////////////////////////////////////////////////////

/// Reads a network-byte-order `u16` at index `start` of `octets`.
fn read_u16(octets: &[u8], start: usize) -> Result<u16> {
    match octets.get(start..start + 2) {
        Some(&[a, b]) => Ok(u16::from_be_bytes([a, b])),
        _ => Err(Error::UnexpectedEomInField),
    }
}

/// Reads a network-byte-order `u32` at index `start` of `octets`.
fn read_u32(octets: &[u8], start: usize) -> Result<u32> {
    match octets.get(start..start + 4) {
        Some(&[a, b, c, d]) => Ok(u32::from_be_bytes([a, b, c, d])),
        _ => Err(Error::UnexpectedEomInField),
    }
}

////////////////////////////////////////////////////////////////////////
// READ RR STRUCTURE                                                  //
////////////////////////////////////////////////////////////////////////

/// A structure containing RR data as returned by [`Reader::read_rr`].
///
/// The raw RDATA is borrowed from the message. For interpreted types,
/// `data` holds the decoded RDATA (with any embedded name already
/// decompressed); for all other types it is [`None`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadRr<'a> {
    pub owner: Name,
    pub rr_type: Type,
    pub class: Class,
    pub ttl: Ttl,
    pub rdata: &'a [u8],
    pub data: Option<RecordData>,
}

impl ReadRr<'_> {
    /// Converts this into a [`ResourceRecord`], if its RDATA was
    /// interpreted.
    pub fn into_record(self) -> Option<ResourceRecord> {
        let Self {
            owner,
            rr_type,
            ttl,
            data,
            ..
        } = self;
        data.map(|data| ResourceRecord {
            owner,
            rr_type,
            ttl,
            data,
        })
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a [`Question`] or resource record could not
/// be read.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    HeaderTooShort,
    UnexpectedEomInField,
    InvalidOwner(name::Error),
    InvalidRdata(ReadRdataError),
}

impl From<ReadRdataError> for Error {
    fn from(err: ReadRdataError) -> Self {
        Self::InvalidRdata(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::HeaderTooShort => f.write_str("header too short"),
            Self::UnexpectedEomInField => f.write_str("unexpected end of message in field"),
            Self::InvalidOwner(err) => write!(f, "invalid owner: {}", err),
            Self::InvalidRdata(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Reader`] methods.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
