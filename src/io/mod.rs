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

//! Datagram transports for [`exchange`](crate::lookup::exchange).
//!
//! The lookup logic does no network I/O of its own. Instead, the caller
//! owns a [`UdpTransport`] and lends it to each round trip. This keeps
//! socket lifecycle and configuration out of the core, and lets tests
//! substitute an in-memory transport for a real socket.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

mod std_udp;
pub use std_udp::UdpSocket;

/// The receive timeout applied to new [`UdpSocket`]s.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The API that a datagram channel must implement to carry DNS queries
/// and responses.
pub trait UdpTransport {
    /// Sets the read timeout of the transport. A timeout surfaces from
    /// [`recv_from`](UdpTransport::recv_from) as an [`io::Error`] of
    /// kind [`WouldBlock`](io::ErrorKind::WouldBlock) or
    /// [`TimedOut`](io::ErrorKind::TimedOut).
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;

    /// Sends a datagram to `dest`.
    fn send_to(&mut self, buf: &[u8], dest: SocketAddr) -> io::Result<usize>;

    /// Receives a datagram, returning its length and source address.
    fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;
}

/// Returns whether `err` is how a transport reports that its read
/// timeout expired.
pub fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
