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

//! Implementation of the [`NameBuilder`] type.

use arrayvec::ArrayVec;

use super::{Error, Name, MAX_LABEL_LEN, MAX_WIRE_LEN};

/// Builds a [`Name`] from the octets of a host name, one label at a
/// time.
///
/// Octets are collected into the pending label with
/// [`NameBuilder::push`]. [`NameBuilder::end_label`] appends the
/// pending label to the name, and [`NameBuilder::finish`] appends any
/// pending label followed by the null label. Since the null label is
/// only ever added by `finish`, a trailing dot in the host name is
/// optional:
///
/// ```
/// use dnslookup::name::NameBuilder;
/// let mut builder = NameBuilder::new();
/// for &octet in b"example" {
///     builder.push(octet).unwrap();
/// }
/// builder.end_label().unwrap();
/// builder.push(b'a').unwrap();
/// assert_eq!(builder.finish().unwrap(), "example.a.".parse().unwrap());
/// ```
#[derive(Debug, Default)]
pub struct NameBuilder {
    /// The completed labels, without the null label.
    labels: ArrayVec<u8, MAX_WIRE_LEN>,
    pending: ArrayVec<u8, MAX_LABEL_LEN>,
}

impl NameBuilder {
    /// Constructs a new `NameBuilder` with no labels. Finishing it
    /// right away produces the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an octet to the pending label. This fails if the label
    /// would become longer than 63 octets, in which case the builder is
    /// left unchanged.
    pub fn push(&mut self, octet: u8) -> Result<(), Error> {
        self.pending.try_push(octet).or(Err(Error::LabelTooLong))
    }

    /// Appends the pending label to the name and starts a new one.
    ///
    /// The pending label must not be empty, since only the last label
    /// of a name may be null. The name must also leave room for the
    /// null label within 255 octets. If either check fails, the builder
    /// is left unchanged.
    pub fn end_label(&mut self) -> Result<(), Error> {
        if self.pending.is_empty() {
            return Err(Error::NullNonTerminal);
        }

        // One octet of length, the label, and one for the null label.
        if self.labels.len() + 1 + self.pending.len() + 1 > MAX_WIRE_LEN {
            return Err(Error::NameTooLong);
        }
        self.labels.push(self.pending.len() as u8);
        self.labels
            .try_extend_from_slice(&self.pending)
            .or(Err(Error::NameTooLong))?;
        self.pending.clear();
        Ok(())
    }

    /// Finishes the name, consuming the `NameBuilder`. A non-empty
    /// pending label is appended first, as if by
    /// [`NameBuilder::end_label`].
    pub fn finish(mut self) -> Result<Name, Error> {
        if !self.pending.is_empty() {
            self.end_label()?;
        }
        let mut wire_repr = self.labels;
        wire_repr.try_push(0).or(Err(Error::NameTooLong))?;
        Ok(Name::from_validated(wire_repr))
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
