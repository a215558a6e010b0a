use bytes::Bytes;
use memchr::memmem;
use std::{error::Error as StdError, fmt};

use crate::Event;

const EVENT_FIELD: &[u8] = b"event:";
const DATA_FIELD: &[u8] = b"\ndata:";

/// Errors occuring while framing a single chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The chunk is not an `event:` line followed by a `data:` line.
    /// Holds the raw chunk for diagnostics.
    Malformed(Bytes),
}

impl Error {
    pub fn raw(&self) -> &[u8] {
        match self {
            Self::Malformed(raw) => raw,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Malformed(_) => write!(f, "failed to parse event"),
        }
    }
}

impl StdError for Error {}

/// Parses one chunk of the form
///
/// ```text
/// event:<name>
/// data:<data>
/// ```
///
/// Anything in front of `event:` is ignored. The name runs up to the last
/// `\ndata:` of the chunk and may span lines, the data runs to the end of the
/// chunk. Both are trimmed.
pub fn parse(chunk: &[u8]) -> Result<Event, Error> {
    let malformed = || Error::Malformed(Bytes::copy_from_slice(chunk));

    let name_start = memmem::find(chunk, EVENT_FIELD).ok_or_else(malformed)? + EVENT_FIELD.len();

    // The name must hold at least one byte, so a `\ndata:` directly after
    // `event:` cannot close it.
    let name_end = memmem::rfind(chunk, DATA_FIELD)
        .filter(|&i| i > name_start)
        .ok_or_else(malformed)?;

    let name = &chunk[name_start..name_end];
    let data = &chunk[name_end + DATA_FIELD.len()..];

    Ok(Event {
        name: field(name),
        data: field(data),
    })
}

fn field(bs: &[u8]) -> String {
    String::from_utf8_lossy(bs).trim().to_owned()
}
