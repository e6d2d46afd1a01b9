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

//! Implementation of the [`ResourceRecord`] and [`RecordData`] types,
//! which hold the records extracted from a response.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{Ttl, Type};
use crate::name::{self, Name};

////////////////////////////////////////////////////////////////////////
// RESOURCE RECORDS                                                   //
////////////////////////////////////////////////////////////////////////

/// A resource record extracted from the answer or authority section of
/// a response.
///
/// Two records are equal when their owners (compared
/// case-insensitively), types, TTLs, and data are equal. This is what
/// lets a response's record set absorb an NS record that appears in
/// both the answer and the authority sections.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResourceRecord {
    pub owner: Name,
    pub rr_type: Type,
    pub ttl: Ttl,
    pub data: RecordData,
}

impl ResourceRecord {
    /// Returns a value that formats this record as a line of verbose
    /// trace output. See [`TraceLine`](super::TraceLine).
    pub fn trace_line(&self) -> super::TraceLine {
        super::TraceLine(self)
    }
}

////////////////////////////////////////////////////////////////////////
// RECORD DATA                                                        //
////////////////////////////////////////////////////////////////////////

/// Interpreted RDATA. Only address records (A and AAAA) and records
/// whose RDATA is a single domain name (NS and CNAME) are interpreted;
/// see [`Type::is_interpreted`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RecordData {
    Address(IpAddr),
    Name(Name),
}

impl RecordData {
    /// Reads the RDATA of a record of type `rr_type` that occupies
    /// `rdlength` octets of `message` starting at `rdata_start`.
    ///
    /// Embedded domain names may be compressed, so the whole message is
    /// needed. Compression pointers may only refer backward, and the
    /// name must exactly fill the RDATA. Addresses must be exactly 4
    /// (A) or 16 (AAAA) octets long.
    ///
    /// This returns `Ok(None)` for types that are not interpreted. The
    /// caller remains responsible for stepping over their RDATA.
    pub fn read(
        rr_type: Type,
        message: &[u8],
        rdata_start: usize,
        rdlength: u16,
    ) -> Result<Option<Self>, ReadRdataError> {
        let rdata_end = rdata_start + rdlength as usize;
        let rdata = message
            .get(rdata_start..rdata_end)
            .ok_or(ReadRdataError::UnexpectedEom)?;
        let bad_length = ReadRdataError::BadLength { rr_type, rdlength };

        match rr_type {
            Type::A => {
                let octets: [u8; 4] = rdata.try_into().or(Err(bad_length))?;
                Ok(Some(Self::Address(Ipv4Addr::from(octets).into())))
            }
            Type::AAAA => {
                let octets: [u8; 16] = rdata.try_into().or(Err(bad_length))?;
                Ok(Some(Self::Address(Ipv6Addr::from(octets).into())))
            }
            Type::NS | Type::CNAME => {
                // Truncating the buffer at the end of the RDATA keeps the
                // name from running into the next record.
                let (name, len) = Name::try_from_compressed(&message[..rdata_end], rdata_start)?;
                if len != rdata.len() {
                    Err(bad_length)
                } else {
                    Ok(Some(Self::Name(name)))
                }
            }
            _ => Ok(None),
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Address(address) => address.fmt(f),
            Self::Name(name) => name.fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that RDATA could not be read or validated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReadRdataError {
    InvalidName(name::Error),
    UnexpectedEom,
    BadLength { rr_type: Type, rdlength: u16 },
}

impl fmt::Display for ReadRdataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "invalid embedded domain name: {}", err),
            Self::UnexpectedEom => f.write_str("unexpected end of message in RDATA"),
            Self::BadLength { rr_type, rdlength } => {
                write!(f, "invalid RDATA length {} for type {}", rdlength, rr_type)
            }
        }
    }
}

impl std::error::Error for ReadRdataError {}

impl From<name::Error> for ReadRdataError {
    fn from(err: name::Error) -> Self {
        Self::InvalidName(err)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn read_handles_a() {
        let message = b"\xff\x5d\xb8\xd8\x22\xff";
        assert_eq!(
            RecordData::read(Type::A, message, 1, 4),
            Ok(Some(RecordData::Address("93.184.216.34".parse().unwrap())))
        );
    }

    #[test]
    fn read_handles_aaaa() {
        let message = b"\x20\x01\x0d\xb8\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01";
        let data = RecordData::read(Type::AAAA, message, 0, 16).unwrap().unwrap();
        assert_eq!(data.to_string(), "2001:db8::1");
    }

    #[test]
    fn read_rejects_bad_address_lengths() {
        let message = [0; 16];
        assert_eq!(
            RecordData::read(Type::A, &message, 0, 5),
            Err(ReadRdataError::BadLength {
                rr_type: Type::A,
                rdlength: 5
            })
        );
        assert!(matches!(
            RecordData::read(Type::AAAA, &message, 0, 4),
            Err(ReadRdataError::BadLength { .. })
        ));
    }

    #[test]
    fn read_decompresses_names() {
        // "example.com" at offset 0, then "ns1" + pointer to it.
        let message = b"\x07example\x03com\x00\x03ns1\xc0\x00";
        let data = RecordData::read(Type::NS, message, 13, 6).unwrap().unwrap();
        assert_eq!(data.to_string(), "ns1.example.com");
        let data = RecordData::read(Type::CNAME, message, 13, 6).unwrap().unwrap();
        assert_eq!(data, RecordData::Name("NS1.Example.COM".parse().unwrap()));
    }

    #[test]
    fn read_rejects_names_not_filling_rdata() {
        let message = b"\x03ns1\x00\x00";
        assert!(matches!(
            RecordData::read(Type::NS, message, 0, 6),
            Err(ReadRdataError::BadLength { .. })
        ));
    }

    #[test]
    fn read_keeps_names_inside_rdata() {
        // The RDLENGTH cuts the name off before its null label.
        let message = b"\x03ns1\x00";
        assert_eq!(
            RecordData::read(Type::NS, message, 0, 4),
            Err(ReadRdataError::InvalidName(name::Error::UnexpectedEom))
        );
    }

    #[test]
    fn read_rejects_rdata_past_end_of_message() {
        let message = b"\x01\x02\x03";
        assert_eq!(
            RecordData::read(Type::A, message, 0, 4),
            Err(ReadRdataError::UnexpectedEom)
        );
        assert_eq!(
            RecordData::read(Type::MX, message, 1, 10),
            Err(ReadRdataError::UnexpectedEom)
        );
    }

    #[test]
    fn read_skips_uninterpreted_types() {
        let message = b"\x00\x0a\x04mail\x00";
        assert_eq!(RecordData::read(Type::MX, message, 0, 8), Ok(None));
        assert_eq!(RecordData::read(Type::from(0x0101), message, 0, 8), Ok(None));
    }

    #[test]
    fn records_deduplicate_caselessly() {
        let record = |owner: &str, target: &str| ResourceRecord {
            owner: owner.parse().unwrap(),
            rr_type: Type::NS,
            ttl: Ttl::from(172800u32),
            data: RecordData::Name(target.parse().unwrap()),
        };
        let mut set = HashSet::new();
        set.insert(record("com", "a.gtld-servers.net"));
        set.insert(record("COM", "A.GTLD-SERVERS.NET"));
        set.insert(record("com", "b.gtld-servers.net"));
        assert_eq!(set.len(), 2);
    }
}
