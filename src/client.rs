//! HTTP side of the stream: opening the request and handing the body over
//! chunk by chunk.

use futures_core::Stream;
use reqwest::{header, Client, Url};
use std::{io::Write, time::Duration};

use crate::{
    body::EventBody,
    dispatch::{Dispatcher, Outcome},
    Body, Error,
};

const EVENT_STREAM: &str = "text/event-stream";

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Longest idle gap tolerated between two chunks. Streams may sit quiet
    /// for a long time, so this is generous.
    pub read_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(60 * 60),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl Options {
    fn client(&self) -> Result<Client, Error> {
        Client::builder()
            .read_timeout(self.read_timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(Error::request)
    }
}

/// Accepts only `http` and `https` urls.
pub fn parse_url(input: &str) -> Result<Url, Error> {
    let url = Url::parse(input).map_err(Error::url)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::url(format!("unsupported scheme `{}`", other))),
    }
}

/// Opens the stream and returns its body as events.
pub async fn connect(
    url: Url,
    options: &Options,
) -> Result<Body<impl Stream<Item = reqwest::Result<bytes::Bytes>> + Unpin>, Error> {
    tracing::debug!(%url, "connecting");

    let response = options
        .client()?
        .get(url)
        .header(header::ACCEPT, EVENT_STREAM)
        .send()
        .await
        .map_err(Error::request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::status(status));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with(EVENT_STREAM) {
        tracing::warn!(content_type, "response is not an event stream");
    }

    tracing::debug!(%status, "connected");

    Ok(Box::pin(response.bytes_stream()).into_events())
}

/// Connects to `url` and dispatches every event until the stream ends or
/// asks to exit.
pub async fn follow<O, E>(
    url: Url,
    options: &Options,
    dispatcher: &mut Dispatcher<O, E>,
) -> Result<Outcome, Error>
where
    O: Write,
    E: Write,
{
    let events = connect(url, options).await?;
    dispatcher.run(events).await
}
