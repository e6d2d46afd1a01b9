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

//! Single-question DNS lookups over UDP.
//!
//! A lookup is one round trip: [`encode_query`] serializes a
//! [`QueryKey`] into a caller-provided buffer under a fresh
//! [`Transaction`], the caller's transport sends it, and
//! [`decode_response`] validates the reply against the transaction and
//! extracts the records of its answer and authority sections.
//! [`exchange`] runs the whole sequence over a [`UdpTransport`].
//!
//! Nothing here retries, caches, or follows referrals. Those policies
//! belong to the caller, which receives either a [`Response`] or a
//! single [`Error`] per round trip.
//!
//! [`UdpTransport`]: crate::io::UdpTransport

use std::fmt;
use std::io;
use std::str::FromStr;
use std::time::Duration;

use crate::io::DEFAULT_TIMEOUT;
use crate::message::{reader, writer};
use crate::name::{self, Name};
use crate::rr::Type;

mod decode;
mod encode;
mod exchange;
mod trace;
pub use decode::{decode_response, Response};
pub use encode::{encode_query, Transaction};
pub use exchange::exchange;
pub use trace::{stdout, TraceSink, WriteSink};

////////////////////////////////////////////////////////////////////////
// QUERY KEYS                                                         //
////////////////////////////////////////////////////////////////////////

/// What a lookup asks for: a domain name and a record type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QueryKey {
    pub name: Name,
    pub rr_type: Type,
}

impl QueryKey {
    /// Creates a new `QueryKey`.
    pub fn new(name: Name, rr_type: Type) -> Self {
        Self { name, rr_type }
    }

    /// Creates a new `QueryKey` from a host name in text form. The
    /// host name may have a trailing dot; labels longer than 63 octets,
    /// empty labels, and non-ASCII text are rejected.
    pub fn parse(host: &str, rr_type: Type) -> Result<Self> {
        let name = Name::from_str(host)?;
        Ok(Self::new(name, rr_type))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {}", self.name, self.rr_type)
    }
}

////////////////////////////////////////////////////////////////////////
// OPTIONS                                                            //
////////////////////////////////////////////////////////////////////////

/// Per-lookup settings, passed explicitly into each round trip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryOptions {
    /// Whether to set the RD (recursion desired) bit in queries. This
    /// is off by default, which suits iterative resolution against
    /// authoritative servers.
    pub recursion_desired: bool,

    /// Whether to emit each decoded record to the trace sink.
    pub verbose: bool,

    /// How long [`exchange`] waits for a response.
    pub timeout: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            recursion_desired: false,
            verbose: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a lookup failed.
#[derive(Debug)]
pub enum Error {
    /// The host name to look up is malformed.
    InvalidName(name::Error),

    /// The query could not be serialized into the buffer.
    Encode(writer::Error),

    /// The response is malformed. No records are returned from a
    /// response that fails to decode.
    Decode(reader::Error),

    /// The response carries a different ID than the query. This may be
    /// a stale or spoofed datagram; the caller decides whether to
    /// discard it and retry.
    TransactionMismatch { expected: u16, received: u16 },

    /// The datagram received has the QR bit clear.
    NotAResponse,

    /// The response does not echo back exactly the question that was
    /// asked.
    QuestionMismatch,

    /// The transport failed or timed out. This is passed through
    /// unchanged.
    Io(io::Error),
}

impl Error {
    /// Returns whether this is [`Error::TransactionMismatch`].
    pub fn is_transaction_mismatch(&self) -> bool {
        matches!(self, Self::TransactionMismatch { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "invalid host name: {}", err),
            Self::Encode(err) => write!(f, "failed to encode query: {}", err),
            Self::Decode(err) => write!(f, "failed to decode response: {}", err),
            Self::TransactionMismatch { expected, received } => write!(
                f,
                "transaction ID mismatch: expected {:#06x}, received {:#06x}",
                expected, received
            ),
            Self::NotAResponse => f.write_str("received a message that is not a response"),
            Self::QuestionMismatch => f.write_str("response question does not match the query"),
            Self::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<name::Error> for Error {
    fn from(err: name::Error) -> Self {
        Self::InvalidName(err)
    }
}

impl From<writer::Error> for Error {
    fn from(err: writer::Error) -> Self {
        Self::Encode(err)
    }
}

impl From<reader::Error> for Error {
    fn from(err: reader::Error) -> Self {
        Self::Decode(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// The type returned by fallible lookup functions.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
