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

//! The verbose trace hook.

use std::io::{self, Write};

use log::warn;

use crate::rr::ResourceRecord;

/// A destination for verbose trace output. When
/// [`QueryOptions::verbose`](super::QueryOptions::verbose) is set, each
/// record of a successfully decoded response is passed to the sink
/// once, in message order, before the response is returned.
pub trait TraceSink {
    fn trace(&mut self, record: &ResourceRecord);
}

/// Closures can serve as sinks.
impl<F> TraceSink for F
where
    F: FnMut(&ResourceRecord),
{
    fn trace(&mut self, record: &ResourceRecord) {
        self(record)
    }
}

/// A [`TraceSink`] that writes each record as a line of fixed-width
/// columns (see [`TraceLine`](crate::rr::TraceLine)) to an
/// [`io::Write`] implementation. Write errors are logged and otherwise
/// ignored, since trace output never affects the lookup itself.
pub struct WriteSink<W>(pub W);

impl<W: Write> TraceSink for WriteSink<W> {
    fn trace(&mut self, record: &ResourceRecord) {
        if let Err(e) = writeln!(self.0, "{}", record.trace_line()) {
            warn!("Failed to write trace output: {}", e);
        }
    }
}

/// Returns a [`WriteSink`] for standard output.
pub fn stdout() -> WriteSink<io::Stdout> {
    WriteSink(io::stdout())
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
