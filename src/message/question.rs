// Copyright 2021 Matthew Ingwersen.
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

//! Implementation of the [`Question`] type.

use std::fmt;

use crate::class::Class;
use crate::name::Name;
use crate::rr::Type;

/// The question of a DNS query.
///
/// Defined in [RFC 1035 § 4.1.2], a DNS question includes
///
/// * the QNAME, which is the domain name whose records are being
///   queried;
/// * the QTYPE, which specifies what type of records is desired; and
/// * the QCLASS, which specifies which DNS class to search.
///
/// Messages built by this crate carry exactly one question. The QTYPE
/// and QCLASS are read and written as full 16-bit values, so
/// meta-types like AXFR (252) and `*` (255) pass through as ordinary
/// [`Type`] codes.
///
/// [RFC 1035 § 4.1.2]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    pub qname: Name,
    pub qtype: Type,
    pub qclass: Class,
}

impl Question {
    /// Creates a question for records of type `qtype` in the Internet
    /// class.
    pub fn new(qname: Name, qtype: Type) -> Self {
        Self {
            qname,
            qtype,
            qclass: Class::IN,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {} {}", self.qname, self.qclass, self.qtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_default_to_class_in() {
        let question = Question::new("example.com".parse().unwrap(), Type::NS);
        assert_eq!(question.qclass, Class::IN);
        assert_eq!(question.to_string(), "example.com. IN NS");
    }

    #[test]
    fn questions_compare_names_caselessly() {
        let lower = Question::new("example.com".parse().unwrap(), Type::A);
        let upper = Question::new("EXAMPLE.com".parse().unwrap(), Type::A);
        let other_type = Question::new("example.com".parse().unwrap(), Type::AAAA);
        assert_eq!(lower, upper);
        assert_ne!(lower, other_type);
    }
}
