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

//! Implementation of [`exchange`], one query/response round trip.

use std::io;
use std::net::SocketAddr;
use std::time::Instant;

use log::debug;

use super::{decode_response, encode_query, QueryKey, QueryOptions, Response, Result, TraceSink};
use crate::io::UdpTransport;

/// Looks up `key` at `server` with a single query over `transport`.
///
/// The query is encoded into `buf` and sent. Then `buf` is zeroed and
/// reused to receive the response, which is decoded as described in
/// [`decode_response`]; `buf` should therefore be large enough for the
/// expected response (512 octets for plain DNS over UDP). Datagrams
/// from any address other than `server` are dropped. If no datagram
/// from `server` arrives within `options.timeout`, this fails with an
/// [`io::Error`] of kind [`TimedOut`](io::ErrorKind::TimedOut). A
/// timeout too large to represent as a deadline means waiting without
/// one.
/// Transport errors are passed through as is, and nothing is retried.
///
/// When `options.verbose` is set, the records of the response are
/// passed to `trace`.
pub fn exchange<T>(
    transport: &mut T,
    server: SocketAddr,
    key: &QueryKey,
    options: &QueryOptions,
    buf: &mut [u8],
    trace: &mut dyn TraceSink,
) -> Result<Response>
where
    T: UdpTransport + ?Sized,
{
    let (transaction, len) = encode_query(key, options, buf)?;
    transport.send_to(&buf[..len], server)?;
    debug!("Sent query for {} to {}.", key, server);
    buf.fill(0);

    let deadline = Instant::now().checked_add(options.timeout);
    loop {
        let remaining = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(io::Error::new(io::ErrorKind::TimedOut, "no response from server").into());
                }
                Some(remaining)
            }
            None => None,
        };
        transport.set_read_timeout(remaining)?;
        let (received, source) = transport.recv_from(buf)?;
        if source == server {
            let trace = if options.verbose { Some(trace) } else { None };
            return decode_response(&buf[..received], &transaction, trace);
        } else {
            debug!("Dropping datagram from unexpected source {}.", source);
            buf[..received].fill(0);
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use super::*;
    use crate::lookup::Error;
    use crate::message::Reader;
    use crate::rr::{ResourceRecord, Type};

    const SERVER: ([u8; 4], u16) = ([192, 0, 2, 53], 53);

    /// What the fake server does with a query.
    type Responder = Box<dyn Fn(&[u8]) -> Vec<u8>>;

    /// An in-memory [`UdpTransport`]. Each query sent is run through
    /// the queued responders, whose replies become datagrams waiting to
    /// be received.
    #[derive(Default)]
    struct FakeTransport {
        responders: VecDeque<(SocketAddr, Responder)>,
        inbox: VecDeque<(SocketAddr, Vec<u8>)>,
        sent: Vec<Vec<u8>>,
        timeouts: Vec<Option<Duration>>,
    }

    impl FakeTransport {
        fn respond_from(&mut self, source: SocketAddr, responder: impl Fn(&[u8]) -> Vec<u8> + 'static) {
            self.responders.push_back((source, Box::new(responder)));
        }
    }

    impl UdpTransport for FakeTransport {
        fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
            self.timeouts.push(timeout);
            Ok(())
        }

        fn send_to(&mut self, buf: &[u8], _dest: SocketAddr) -> io::Result<usize> {
            self.sent.push(buf.to_vec());
            for (source, responder) in self.responders.drain(..) {
                self.inbox.push_back((source, responder(buf)));
            }
            Ok(buf.len())
        }

        fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
            match self.inbox.pop_front() {
                Some((source, datagram)) => {
                    let len = datagram.len().min(buf.len());
                    buf[..len].copy_from_slice(&datagram[..len]);
                    Ok((len, source))
                }
                None => Err(io::ErrorKind::WouldBlock.into()),
            }
        }
    }

    /// Answers a query with its own question plus one A record for
    /// 93.184.216.34 with TTL 300.
    fn answer_a(query: &[u8]) -> Vec<u8> {
        let mut response = query.to_vec();
        response[2] |= 0x84;
        response[7] = 1;
        response.extend_from_slice(b"\xc0\x0c\x00\x01\x00\x01\x00\x00\x01\x2c\x00\x04\x5d\xb8\xd8\x22");
        response
    }

    fn key() -> QueryKey {
        QueryKey::parse("www.example.com", Type::A).unwrap()
    }

    #[test]
    fn exchange_round_trip_works() {
        let server = SocketAddr::from(SERVER);
        let mut transport = FakeTransport::default();
        transport.respond_from(server, answer_a);
        let mut buf = [0; 512];
        let mut trace = |_: &ResourceRecord| panic!("trace called without verbose");

        let response = exchange(
            &mut transport,
            server,
            &key(),
            &QueryOptions::default(),
            &mut buf,
            &mut trace,
        )
        .unwrap();
        assert_eq!(response.records.len(), 1);
        assert_eq!(response.records[0].owner.to_string(), "www.example.com");
        assert_eq!(response.records[0].ttl.secs(), 300);
        assert_eq!(response.records[0].data.to_string(), "93.184.216.34");

        // The query was a single standard query with a matching ID.
        assert_eq!(transport.sent.len(), 1);
        let query = Reader::try_from(transport.sent[0].as_slice()).unwrap();
        assert!(!query.qr());
        assert!(!query.rd());
        assert_eq!(query.qdcount(), 1);
        assert_eq!(transport.timeouts.len(), 1);
    }

    #[test]
    fn exchange_zeroes_buffer_before_receiving() {
        let server = SocketAddr::from(SERVER);
        let mut transport = FakeTransport::default();
        transport.respond_from(server, answer_a);
        let mut buf = [0xaa; 512];
        exchange(
            &mut transport,
            server,
            &key(),
            &QueryOptions::default(),
            &mut buf,
            &mut |_: &ResourceRecord| {},
        )
        .unwrap();
        let response_len = answer_a(&transport.sent[0]).len();
        assert!(buf[response_len..].iter().all(|&octet| octet == 0));
    }

    #[test]
    fn exchange_traces_when_verbose() {
        let server = SocketAddr::from(SERVER);
        let mut transport = FakeTransport::default();
        transport.respond_from(server, answer_a);
        let mut buf = [0; 512];
        let mut lines = Vec::new();
        let mut trace = |record: &ResourceRecord| lines.push(record.trace_line().to_string());
        let options = QueryOptions {
            verbose: true,
            ..Default::default()
        };

        exchange(&mut transport, server, &key(), &options, &mut buf, &mut trace).unwrap();
        assert_eq!(
            lines,
            ["       www.example.com                300        A    93.184.216.34"]
        );
    }

    #[test]
    fn exchange_drops_datagrams_from_other_sources() {
        let server = SocketAddr::from(SERVER);
        let spoofer = SocketAddr::from(([198, 51, 100, 1], 53));
        let mut transport = FakeTransport::default();
        transport.respond_from(spoofer, |query| {
            let mut response = answer_a(query);
            let len = response.len();
            response[len - 1] = 1;
            response
        });
        transport.respond_from(server, answer_a);
        let mut buf = [0; 512];

        let response = exchange(
            &mut transport,
            server,
            &key(),
            &QueryOptions::default(),
            &mut buf,
            &mut |_: &ResourceRecord| {},
        )
        .unwrap();
        assert_eq!(response.records[0].data.to_string(), "93.184.216.34");
        assert_eq!(transport.timeouts.len(), 2);
    }

    #[test]
    fn exchange_reports_transaction_mismatch() {
        let server = SocketAddr::from(SERVER);
        let mut transport = FakeTransport::default();
        transport.respond_from(server, |query| {
            let mut response = answer_a(query);
            response[0] ^= 0x80;
            response
        });
        let mut buf = [0; 512];

        let result = exchange(
            &mut transport,
            server,
            &key(),
            &QueryOptions::default(),
            &mut buf,
            &mut |_: &ResourceRecord| {},
        );
        assert!(result.unwrap_err().is_transaction_mismatch());
    }

    #[test]
    fn exchange_passes_transport_errors_through() {
        let server = SocketAddr::from(SERVER);
        let mut transport = FakeTransport::default();
        let mut buf = [0; 512];

        let result = exchange(
            &mut transport,
            server,
            &key(),
            &QueryOptions::default(),
            &mut buf,
            &mut |_: &ResourceRecord| {},
        );
        match result {
            Err(Error::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::WouldBlock),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(transport.sent.len(), 1);
    }

    #[test]
    fn exchange_times_out_without_waiting_when_timeout_is_zero() {
        let server = SocketAddr::from(SERVER);
        let mut transport = FakeTransport::default();
        transport.respond_from(server, answer_a);
        let mut buf = [0; 512];
        let options = QueryOptions {
            timeout: Duration::ZERO,
            ..Default::default()
        };

        let result = exchange(
            &mut transport,
            server,
            &key(),
            &options,
            &mut buf,
            &mut |_: &ResourceRecord| {},
        );
        match result {
            Err(Error::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::TimedOut),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(transport.timeouts.is_empty());
    }

    #[test]
    fn exchange_waits_without_deadline_when_timeout_is_huge() {
        let server = SocketAddr::from(SERVER);
        let mut transport = FakeTransport::default();
        transport.respond_from(server, answer_a);
        let mut buf = [0; 512];
        let options = QueryOptions {
            timeout: Duration::from_secs(u64::MAX),
            ..Default::default()
        };

        let response = exchange(
            &mut transport,
            server,
            &key(),
            &options,
            &mut buf,
            &mut |_: &ResourceRecord| {},
        )
        .unwrap();
        assert_eq!(response.records.len(), 1);
        assert_eq!(transport.timeouts, [None]);
    }
}
