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

//! Fixed-width formatting of records for verbose trace output.

use std::fmt;

use super::ResourceRecord;

/// Width of the owner column.
const OWNER_WIDTH: usize = 30;

/// Width of the TTL column.
const TTL_WIDTH: usize = 10;

/// Width of the type column.
const TYPE_WIDTH: usize = 4;

/// Indentation before the owner column.
const INDENT: &str = "       ";

/// A [`Display`](fmt::Display) adapter that formats a
/// [`ResourceRecord`] as one line of verbose trace output (without the
/// trailing newline): the owner, TTL, and type are left-aligned in
/// fixed-width columns and followed by the record data. Values wider
/// than their column are not cut off.
pub struct TraceLine<'a>(pub(super) &'a ResourceRecord);

impl fmt::Display for TraceLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let record = self.0;

        // Name and Type write their parts directly, so padding has to
        // be applied to their rendered text.
        let owner = record.owner.to_string();
        let rr_type = record.rr_type.to_string();

        write!(
            f,
            "{INDENT}{owner:<OWNER_WIDTH$} {:<TTL_WIDTH$} {rr_type:<TYPE_WIDTH$} {}",
            record.ttl.secs(),
            record.data,
        )
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::rr::{RecordData, Ttl, Type};

    use super::*;

    fn record(owner: &str, rr_type: Type, ttl: i32, data: &str) -> ResourceRecord {
        let data = match data.parse() {
            Ok(address) => RecordData::Address(address),
            Err(_) => RecordData::Name(data.parse().unwrap()),
        };
        ResourceRecord {
            owner: owner.parse().unwrap(),
            rr_type,
            ttl: Ttl::from(ttl),
            data,
        }
    }

    #[test]
    fn trace_line_uses_fixed_width_columns() {
        let record = record("www.example.com", Type::A, 300, "93.184.216.34");
        assert_eq!(
            record.trace_line().to_string(),
            "       www.example.com                300        A    93.184.216.34",
        );
    }

    #[test]
    fn trace_line_does_not_truncate_wide_values() {
        let owner = "a-rather-long-label.in-a-rather-long.example";
        let record = record(owner, Type::CNAME, -1, "example.net");
        assert_eq!(
            record.trace_line().to_string(),
            format!("       {} -1         CNAME example.net", owner),
        );
    }
}
