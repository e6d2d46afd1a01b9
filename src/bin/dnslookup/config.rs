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

//! Implements the configuration file.

use std::fmt;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::Level::Debug;
use log::{debug, log_enabled};
use paste::paste;
use serde::{de, Deserialize};

use dnslookup::lookup::QueryOptions;
use dnslookup::rr::Type;

use crate::args::Args;

////////////////////////////////////////////////////////////////////////
// CONFIGURATION LOADING                                              //
////////////////////////////////////////////////////////////////////////

/// Loads the configuration for a run. If `args` names a configuration
/// file, it is read first; otherwise every setting starts at its
/// default. Command-line arguments then override the settings they
/// cover.
pub fn load(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref path) => load_from_path(path)?,
        None => Config::default(),
    };

    if let Some(rr_type) = args.rr_type {
        config.rr_type = ConfigType(rr_type);
    }
    if let Some(server) = args.server {
        config.server = server;
    }
    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }
    config.recursion_desired |= args.recurse;
    config.verbose |= args.verbose;

    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// Loads the configuration from the file given by `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let raw_config = fs::read(path.as_ref()).context("failed to read the configuration file")?;
    toml::from_slice(&raw_config).context("failed to parse the configuration file")
}

/// Summarizes the configuration in the log, if the debug log level is
/// enabled.
fn log_config_summary(config: &Config) {
    if !log_enabled!(Debug) {
        return;
    }

    debug!(
        "Configuration loaded:\n\
         Server:            {}\n\
         Record type:       {}\n\
         Timeout:           {} s\n\
         Buffer size:       {}\n\
         Recursion desired: {}\n\
         Verbose:           {}",
        config.server,
        config.rr_type.0,
        config.timeout,
        config.buffer_size,
        config.recursion_desired,
        config.verbose,
    );
}

////////////////////////////////////////////////////////////////////////
// CONFIGURATION FILE STRUCTURE                                       //
////////////////////////////////////////////////////////////////////////

/// The complete configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_server")]
    pub server: SocketAddr,
    #[serde(rename = "type", default = "default_rr_type")]
    pub rr_type: ConfigType,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default)]
    pub recursion_desired: bool,
    #[serde(default)]
    pub verbose: bool,
}

/// a.root-servers.net.
const DEFAULT_SERVER_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(198, 41, 0, 4));
const DEFAULT_SERVER_PORT: u16 = 53;

/// The smallest buffer that can hold any plain DNS response over UDP
/// (RFC 1035 § 4.2.1).
const MIN_BUFFER_SIZE: usize = 512;

fn default_server() -> SocketAddr {
    SocketAddr::new(DEFAULT_SERVER_IP, DEFAULT_SERVER_PORT)
}

fn default_rr_type() -> ConfigType {
    ConfigType(Type::A)
}

fn default_timeout() -> u64 {
    5
}

fn default_buffer_size() -> usize {
    MIN_BUFFER_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            rr_type: default_rr_type(),
            timeout: default_timeout(),
            buffer_size: default_buffer_size(),
            recursion_desired: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Checks the settings that the file format alone cannot.
    fn validate(&self) -> Result<()> {
        if self.buffer_size < MIN_BUFFER_SIZE || self.buffer_size > u16::MAX as usize {
            Err(anyhow!(
                "buffer_size must be between {} and {}",
                MIN_BUFFER_SIZE,
                u16::MAX,
            ))
        } else if self.timeout == 0 {
            Err(anyhow!("timeout must be at least one second"))
        } else {
            Ok(())
        }
    }

    /// Returns the per-lookup options this configuration selects.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            recursion_desired: self.recursion_desired,
            verbose: self.verbose,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// WRAPPERS OVER DNSLOOKUP TYPES FOR SERDE                            //
////////////////////////////////////////////////////////////////////////

/// Generates a deserializable `ConfigX` structure wrapping an `X` type
/// from [`dnslookup`], using its [`FromStr`](std::str::FromStr)
/// implementation.
macro_rules! make_serde_wrapper {
    ($wrapper:ident, $over:ty, $description:literal) => {
        /// A macro-generated deserializable wrapper over a [`dnslookup`]
        /// type.
        #[derive(Clone, Copy, Debug)]
        pub struct $wrapper(pub $over);

        impl<'de> Deserialize<'de> for $wrapper {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                deserializer.deserialize_str(paste! { [<$wrapper Visitor>] })
            }
        }

        paste! {
            /// A macro-generated [`Visitor`](de::Visitor).
            #[derive(Debug)]
            struct [<$wrapper Visitor>];
        }

        impl<'de> de::Visitor<'de> for paste! { [<$wrapper Visitor>] } {
            type Value = $wrapper;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str($description)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value
                    .parse()
                    .map($wrapper)
                    .map_err(|e| E::custom(format!("invalid {}: {}", $description, e)))
            }
        }
    };
}

make_serde_wrapper!(ConfigType, Type, "record type");

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server, "198.41.0.4:53".parse().unwrap());
        assert_eq!(config.rr_type.0, Type::A);
        assert_eq!(config.timeout, 5);
        assert_eq!(config.buffer_size, 512);
        assert_eq!(config.query_options(), QueryOptions::default());
    }

    #[test]
    fn file_settings_are_read() {
        let config: Config = toml::from_str(
            "server = \"[2001:db8::53]:5353\"\n\
             type = \"cname\"\n\
             timeout = 2\n\
             buffer_size = 4096\n\
             recursion_desired = true\n\
             verbose = true\n",
        )
        .unwrap();
        assert_eq!(config.server, "[2001:db8::53]:5353".parse().unwrap());
        assert_eq!(config.rr_type.0, Type::CNAME);
        assert_eq!(config.buffer_size, 4096);
        let options = config.query_options();
        assert!(options.recursion_desired);
        assert!(options.verbose);
        assert_eq!(options.timeout, Duration::from_secs(2));
    }

    #[test]
    fn types_use_rfc3597_syntax() {
        let config: Config = toml::from_str("type = \"TYPE65280\"").unwrap();
        assert_eq!(config.rr_type.0, Type::from(65280));
        assert!(toml::from_str::<Config>("type = \"BOGUS\"").is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("retries = 3").is_err());
    }

    #[test]
    fn arguments_override_defaults() {
        let args = Args::parse_from(["dnslookup", "example.com", "NS", "-s", "192.0.2.1:53", "-v"]);
        let config = load(&args).unwrap();
        assert_eq!(config.rr_type.0, Type::NS);
        assert_eq!(config.server, "192.0.2.1:53".parse().unwrap());
        assert!(config.verbose);
        assert!(!config.recursion_desired);
    }

    #[test]
    fn small_buffers_are_rejected() {
        let config = Config {
            buffer_size: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
