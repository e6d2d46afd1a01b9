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

//! Implements command-line argument parsing.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use dnslookup::rr::Type;

/// Parses the command line arguments.
pub fn parse() -> Args {
    Args::parse()
}

/// Look up DNS records with a single query over UDP
#[derive(Debug, Parser)]
#[command(author, version)]
pub struct Args {
    /// The host name to look up
    pub host: String,

    /// The record type to look up (a mnemonic such as AAAA, or TYPEnnn)
    #[arg(value_name = "TYPE")]
    pub rr_type: Option<Type>,

    /// Set the configuration file to use
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set the server IP address and port to query
    #[arg(long, short, value_name = "IP:PORT")]
    pub server: Option<SocketAddr>,

    /// Set the number of seconds to wait for a response
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Set the RD (recursion desired) bit in the query
    #[arg(long, short)]
    pub recurse: bool,

    /// Print each record of the response as it is decoded
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_type_mnemonics_and_overrides() {
        let args = Args::try_parse_from([
            "dnslookup",
            "example.com",
            "aaaa",
            "--server",
            "192.0.2.53:53",
            "--timeout",
            "2",
            "-r",
        ])
        .unwrap();
        assert_eq!(args.host, "example.com");
        assert_eq!(args.rr_type, Some(Type::AAAA));
        assert_eq!(args.server, Some("192.0.2.53:53".parse().unwrap()));
        assert_eq!(args.timeout, Some(2));
        assert!(args.recurse);
        assert!(!args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn args_reject_unknown_types() {
        assert!(Args::try_parse_from(["dnslookup", "example.com", "BOGUS"]).is_err());
    }
}
