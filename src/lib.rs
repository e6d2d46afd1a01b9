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

//! Wire-level DNS lookups over UDP.
//!
//! This crate encodes single-question DNS queries and decodes the
//! responses, extracting the address (A, AAAA) and name (NS, CNAME)
//! records of the answer and authority sections. It is meant to sit
//! beneath an iterative resolver: the resolver decides which server to
//! ask and what to cache, and calls [`lookup::exchange`] (or
//! [`lookup::encode_query`] and [`lookup::decode_response`] with its
//! own transport) for each round trip.
//!
//! ```no_run
//! use dnslookup::io::UdpSocket;
//! use dnslookup::lookup::{self, QueryKey, QueryOptions};
//! use dnslookup::rr::Type;
//!
//! let server = "198.41.0.4:53".parse().unwrap();
//! let mut socket = UdpSocket::bind_for(server).unwrap();
//! let key = QueryKey::parse("www.example.com", Type::A).unwrap();
//! let mut buf = [0; 512];
//! let response = lookup::exchange(
//!     &mut socket,
//!     server,
//!     &key,
//!     &QueryOptions::default(),
//!     &mut buf,
//!     &mut lookup::stdout(),
//! )
//! .unwrap();
//! for record in response.records.iter() {
//!     println!("{}", record.trace_line());
//! }
//! ```

pub mod class;
pub mod io;
pub mod lookup;
pub mod message;
pub mod name;
pub mod rr;
mod util;
