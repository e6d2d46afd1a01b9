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

//! Implements a run of the tool (i.e., one lookup).

use std::fmt::Write;
use std::process;

use anyhow::{bail, Context, Result};
use env_logger::Env;
use log::{debug, error};

use dnslookup::io::{self, UdpSocket};
use dnslookup::lookup::{self, QueryKey, Response};

use crate::args::Args;
use crate::config;

/// Runs the lookup described by `args`.
pub fn run(args: Args) {
    env_logger::init_from_env(Env::new().default_filter_or("warn"));

    if let Err(e) = try_running(args) {
        let mut message = String::from("Lookup failed:");
        for (i, cause) in e.chain().enumerate() {
            write!(message, "\n[{}] {}", i + 1, cause).unwrap();
        }
        error!("{}", message);
        process::exit(1);
    }
}

fn try_running(args: Args) -> Result<()> {
    debug!(
        "dnslookup v{}.{}.{} starting.",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH"),
    );

    let config = config::load(&args).context("failed to load the configuration")?;
    let key = QueryKey::parse(&args.host, config.rr_type.0).context("invalid host name")?;
    let options = config.query_options();

    let mut socket = UdpSocket::bind_for(config.server).context("failed to bind a socket")?;
    let mut buf = vec![0; config.buffer_size];
    let response = match lookup::exchange(
        &mut socket,
        config.server,
        &key,
        &options,
        &mut buf,
        &mut lookup::stdout(),
    ) {
        Ok(response) => response,
        Err(lookup::Error::Io(ref e)) if io::is_timeout(e) => {
            bail!(
                "{} did not respond within {} s",
                config.server,
                config.timeout
            );
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("no usable response for {} from {}", key, config.server)
            });
        }
    };

    // In verbose mode, the records were already printed as they were
    // decoded.
    if !options.verbose {
        for record in response.records.iter() {
            println!("{}", record.trace_line());
        }
    }
    println!("{}", summarize(&response));
    Ok(())
}

/// Produces the status line printed after the records.
fn summarize(response: &Response) -> String {
    let mut summary = format!(";; {}", response.rcode);
    if response.aa {
        summary.push_str(", authoritative");
    }
    if response.tc {
        summary.push_str(", truncated");
    }
    if response.is_referral() {
        summary.push_str(", referral");
    }
    match response.records.len() {
        1 => summary.push_str(", 1 record"),
        n => write!(summary, ", {} records", n).unwrap(),
    }
    summary
}
