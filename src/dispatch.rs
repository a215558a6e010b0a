use futures_core::Stream;
use futures_util::StreamExt;
use std::io::{self, Write};

use crate::{parser, Error, Event};

/// What a single event asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write to standard output and continue. The fallback for every name
    /// not listed below.
    Stdout(String),
    /// Write to the error channel and continue (`stderr`).
    Stderr(String),
    /// Stop the stream with `code`, writing `message` to the error channel
    /// first if present (`error`).
    Exit { code: u8, message: Option<String> },
}

impl Action {
    pub fn for_event(event: Event) -> Self {
        match event.name.as_str() {
            "error" if event.data.is_empty() => Action::Exit {
                code: 0,
                message: None,
            },
            "error" => Action::Exit {
                code: 1,
                message: Some(event.data),
            },
            "stderr" => Action::Stderr(event.data),
            _ => Action::Stdout(event.data),
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(u8),
}

/// How a whole run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An `error` event asked to stop with this code.
    Exit(u8),
    /// The body ended without an `error` event.
    Ended,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Exit(code) => code,
            Outcome::Ended => 0,
        }
    }
}

/// Carries out actions against an output sink and an error sink.
///
/// Nothing in here exits the process. Termination is reported back as
/// [`Flow::Exit`] and left to the caller.
pub struct Dispatcher<O, E> {
    out: O,
    err: E,
}

impl Dispatcher<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O, E> Dispatcher<O, E>
where
    O: Write,
    E: Write,
{
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    pub fn dispatch(&mut self, event: Event) -> io::Result<Flow> {
        match Action::for_event(event) {
            Action::Stdout(data) => {
                line(&mut self.out, &data)?;
                Ok(Flow::Continue)
            }
            Action::Stderr(data) => {
                line(&mut self.err, &data)?;
                Ok(Flow::Continue)
            }
            Action::Exit { code, message } => {
                if let Some(message) = message {
                    line(&mut self.err, &message)?;
                }
                Ok(Flow::Exit(code))
            }
        }
    }

    /// Parses and dispatches one raw chunk.
    pub fn dispatch_chunk(&mut self, chunk: &[u8]) -> io::Result<Flow> {
        match parser::parse(chunk) {
            Ok(event) => self.dispatch(event),
            Err(err) => self.dispatch_malformed(&err),
        }
    }

    /// Reports a chunk that failed to parse and runs the default action with
    /// an empty event.
    pub fn dispatch_malformed(&mut self, err: &parser::Error) -> io::Result<Flow> {
        tracing::debug!(len = err.raw().len(), "skipping malformed chunk");
        line(&mut self.err, &err.to_string())?;
        line(&mut self.err, &format!("{:?}", String::from_utf8_lossy(err.raw())))?;
        self.dispatch(Event::default())
    }

    /// Pulls events one at a time until the stream ends or an event asks to
    /// exit. Nothing is pulled after an exit.
    pub async fn run<S>(&mut self, mut events: S) -> Result<Outcome, Error>
    where
        S: Stream<Item = Result<Event, Error>> + Unpin,
    {
        while let Some(item) = events.next().await {
            let flow = match item {
                Ok(event) => {
                    tracing::debug!(name = %event.name, "dispatching event");
                    self.dispatch(event)
                }
                Err(err) => match err.malformed() {
                    Some(malformed) => self.dispatch_malformed(malformed),
                    None => return Err(err),
                },
            };

            if let Flow::Exit(code) = flow.map_err(Error::io)? {
                tracing::debug!(code, "stream asked to exit");
                return Ok(Outcome::Exit(code));
            }
        }

        tracing::debug!("stream ended");
        Ok(Outcome::Ended)
    }
}

fn line<W: Write>(w: &mut W, text: &str) -> io::Result<()> {
    writeln!(w, "{}", text)?;
    w.flush()
}
