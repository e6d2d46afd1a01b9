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

//! Crate-private utilities.

/// Looks up `text` in a table of mnemonics, without regard to ASCII
/// case.
pub fn find_mnemonic<T: Copy>(table: &[(T, &str)], text: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, mnemonic)| mnemonic.eq_ignore_ascii_case(text))
        .map(|&(value, _)| value)
}

/// Parses the generic form of a type or class given by [RFC 3597 § 5],
/// i.e. `prefix` (in any case) followed by a decimal 16-bit value, as
/// in `TYPE65280` or `CLASS1`.
///
/// [RFC 3597 § 5]: https://datatracker.ietf.org/doc/html/rfc3597#section-5
pub fn parse_generic(text: &str, prefix: &str) -> Option<u16> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        text[prefix.len()..].parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generic_checks_prefix_and_range() {
        assert_eq!(parse_generic("type65280", "TYPE"), Some(65280));
        assert_eq!(parse_generic("TYPE65536", "TYPE"), None);
        assert_eq!(parse_generic("TYP", "TYPE"), None);
        assert_eq!(parse_generic("CLASS1", "TYPE"), None);
        assert_eq!(parse_generic("TYPE", "TYPE"), None);
    }
}
