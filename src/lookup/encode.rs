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

//! Serialization of queries.

use log::debug;
use rand::Rng;

use super::{QueryKey, QueryOptions, Result};
use crate::message::{Opcode, Question, Writer};

/// A query in flight: the ID it was sent with and the question it
/// asked. A response is only accepted if it matches both.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    id: u16,
    question: Question,
}

impl Transaction {
    /// Starts a transaction for `key` with an ID drawn uniformly from
    /// the full 16-bit range.
    pub fn new(key: &QueryKey) -> Self {
        Self::with_id(key, rand::thread_rng().gen())
    }

    /// Starts a transaction for `key` with the given ID.
    pub fn with_id(key: &QueryKey, id: u16) -> Self {
        Self {
            id,
            question: Question::new(key.name.clone(), key.rr_type),
        }
    }

    /// Returns the transaction ID.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Returns the question asked.
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Serializes the query for this transaction into `buf`, returning
    /// the length of the message. The header is a standard query with
    /// one question and every flag clear, except for RD when
    /// `options.recursion_desired` is set. The question name is written
    /// uncompressed, followed by the QTYPE and QCLASS IN.
    pub fn encode(&self, options: &QueryOptions, buf: &mut [u8]) -> Result<usize> {
        let mut writer = Writer::try_from(buf)?;
        writer.set_id(self.id);
        writer.set_opcode(Opcode::Query);
        writer.set_rd(options.recursion_desired);
        writer.add_question(&self.question)?;
        Ok(writer.finish())
    }
}

/// Starts a new [`Transaction`] for `key` and serializes its query into
/// `buf`. Returns the transaction along with the length of the message.
///
/// This performs no I/O. Before the response is received into the same
/// buffer, the caller must zero it, so that octets of the query cannot
/// be mistaken for part of the response.
pub fn encode_query(
    key: &QueryKey,
    options: &QueryOptions,
    buf: &mut [u8],
) -> Result<(Transaction, usize)> {
    let transaction = Transaction::new(key);
    let len = transaction.encode(options, buf)?;
    debug!(
        "Encoded query for {} with ID {:#06x} ({} octets).",
        key,
        transaction.id(),
        len
    );
    Ok((transaction, len))
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Error;
    use crate::message::{writer, Reader};
    use crate::name::Name;
    use crate::rr::Type;

    #[test]
    fn encode_produces_standard_query() {
        let key = QueryKey::parse("www.example.com", Type::A).unwrap();
        let transaction = Transaction::with_id(&key, 0xbeef);
        let mut buf = [0; 512];
        let len = transaction
            .encode(&QueryOptions::default(), &mut buf)
            .unwrap();
        assert_eq!(
            &buf[..len],
            b"\xbe\xef\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\
              \x03www\x07example\x03com\x00\x00\x01\x00\x01"
        );
    }

    #[test]
    fn encode_sets_rd_when_asked() {
        let key = QueryKey::parse("example.com", Type::NS).unwrap();
        let transaction = Transaction::with_id(&key, 1);
        let options = QueryOptions {
            recursion_desired: true,
            ..Default::default()
        };
        let mut buf = [0; 512];
        let len = transaction.encode(&options, &mut buf).unwrap();
        let reader = Reader::try_from(&buf[..len]).unwrap();
        assert!(reader.rd());
        assert!(!reader.qr());
        assert_eq!(reader.qdcount(), 1);
    }

    #[test]
    fn encode_writes_full_width_qtype() {
        let key = QueryKey::parse("example.com", Type::from(0xff01)).unwrap();
        let mut buf = [0; 512];
        let len = Transaction::with_id(&key, 0)
            .encode(&QueryOptions::default(), &mut buf)
            .unwrap();
        assert_eq!(&buf[len - 4..len], b"\xff\x01\x00\x01");
    }

    #[test]
    fn encode_rejects_small_buffer() {
        let key = QueryKey::parse("example.com", Type::A).unwrap();
        let mut buf = [0; 20];
        assert!(matches!(
            encode_query(&key, &QueryOptions::default(), &mut buf),
            Err(Error::Encode(writer::Error::Truncation))
        ));
    }

    #[test]
    fn encoded_names_round_trip() {
        let names = [
            "a".to_owned(),
            "www.example.com".to_owned(),
            vec!["x".repeat(63); 3].join("."),
            vec!["y"; 127].join("."),
            "\\.dotted\\\\label.example".to_owned(),
        ];
        for text in names.iter() {
            let key = QueryKey::parse(text, Type::A).unwrap();
            let mut buf = [0; 512];
            let (transaction, len) = encode_query(&key, &QueryOptions::default(), &mut buf).unwrap();
            let mut reader = Reader::try_from(&buf[..len]).unwrap();
            assert_eq!(reader.id(), transaction.id());
            let question = reader.read_question().unwrap();
            assert_eq!(&question, transaction.question());
            assert_eq!(question.qname.to_string(), *text);
            assert!(reader.at_eom());
        }
    }

    #[test]
    fn encode_accepts_root() {
        let key = QueryKey::new(Name::root(), Type::NS);
        let mut buf = [0; 512];
        let (_, len) = encode_query(&key, &QueryOptions::default(), &mut buf).unwrap();
        assert_eq!(&buf[12..len], b"\x00\x00\x02\x00\x01");
    }
}
