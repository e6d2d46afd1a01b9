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

//! Validation and decoding of responses.

use std::collections::HashSet;

use log::{debug, trace, warn};

use super::{Error, Result, TraceSink, Transaction};
use crate::message::{Rcode, Reader};
use crate::rr::{ResourceRecord, Type};

/// The useful contents of a decoded response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    /// The RCODE of the response. A response with an error RCODE still
    /// decodes; e.g. an NXDOMAIN response usually carries an SOA record
    /// in its authority section.
    pub rcode: Rcode,

    /// Whether the AA (authoritative answer) bit was set.
    pub aa: bool,

    /// Whether the TC (truncation) bit was set. A truncated response
    /// may be missing records.
    pub tc: bool,

    /// The interpreted records of the answer and authority sections,
    /// without duplicates, in the order they first appear.
    pub records: Vec<ResourceRecord>,
}

impl Response {
    /// Returns whether this looks like a referral: no answers of
    /// interest, but name servers to ask next.
    pub fn is_referral(&self) -> bool {
        self.rcode == Rcode::NoError
            && !self.aa
            && !self.records.is_empty()
            && self.records.iter().all(|r| r.rr_type == Type::NS)
    }
}

/// Decodes the response `message` to the query of `transaction`.
///
/// The response must carry the transaction's ID, have the QR bit set,
/// and echo back exactly the transaction's question (names compared
/// case-insensitively). Then the answer and authority sections are
/// walked record by record. Records of interpreted types (see
/// [`Type::is_interpreted`](crate::rr::Type::is_interpreted)) are
/// collected into a set; records of all other types are stepped over by
/// their RDLENGTH. The additional section is not read.
///
/// Any structural problem aborts the decoding with a single error; no
/// partial record set is ever returned. If `trace` is provided, each
/// record of a successfully decoded response is passed to it.
pub fn decode_response(
    message: &[u8],
    transaction: &Transaction,
    trace: Option<&mut dyn TraceSink>,
) -> Result<Response> {
    let mut reader = Reader::try_from(message)?;

    if reader.id() != transaction.id() {
        warn!(
            "Response ID {:#06x} does not match query ID {:#06x}.",
            reader.id(),
            transaction.id()
        );
        return Err(Error::TransactionMismatch {
            expected: transaction.id(),
            received: reader.id(),
        });
    } else if !reader.qr() {
        return Err(Error::NotAResponse);
    }

    if reader.qdcount() != 1 || reader.read_question()? != *transaction.question() {
        return Err(Error::QuestionMismatch);
    }

    let rcode = reader.rcode();
    if rcode != Rcode::NoError {
        warn!("Response for {} has RCODE {}.", transaction.question(), rcode);
    }
    if reader.tc() {
        warn!("Response for {} is truncated.", transaction.question());
    }

    let n_records = reader.ancount() as usize + reader.nscount() as usize;
    let mut seen = HashSet::with_capacity(n_records);
    let mut records = Vec::with_capacity(n_records);
    for _ in 0..n_records {
        let rr = reader.read_rr()?;
        let rr_type = rr.rr_type;
        match rr.into_record() {
            Some(record) => {
                if seen.insert(record.clone()) {
                    records.push(record);
                }
            }
            None => trace!("Skipping record of type {}.", rr_type),
        }
    }

    debug!(
        "Decoded {} records ({} unique) for {}.",
        n_records,
        records.len(),
        transaction.question()
    );
    if let Some(sink) = trace {
        for record in records.iter() {
            sink.trace(record);
        }
    }

    Ok(Response {
        rcode,
        aa: reader.aa(),
        tc: reader.tc(),
        records,
    })
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
