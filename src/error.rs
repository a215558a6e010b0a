use std::{error::Error as StdError, fmt, io};

type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug)]
pub struct Error {
    kind: Box<ErrorKind>,
    source: Option<BoxError>,
}

impl Error {
    fn new<E>(kind: ErrorKind, source: Option<E>) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            kind: Box::new(kind),
            source: source.map(Into::into),
        }
    }

    pub(crate) fn inner<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(ErrorKind::Inner, Some(err))
    }

    pub(crate) fn parser(err: crate::parser::Error) -> Self {
        Self::new(ErrorKind::Sse, Some(err))
    }

    pub(crate) fn request(err: reqwest::Error) -> Self {
        Self::new(ErrorKind::Request, Some(err))
    }

    pub(crate) fn status(status: reqwest::StatusCode) -> Self {
        Self::new(ErrorKind::Status(status.as_u16()), None::<BoxError>)
    }

    pub(crate) fn url<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::new(ErrorKind::Url, Some(err))
    }

    pub(crate) fn io(err: io::Error) -> Self {
        Self::new(ErrorKind::Io, Some(err))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The chunk that failed to parse, if this is a parse error.
    pub fn malformed(&self) -> Option<&crate::parser::Error> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Process exit code for this error. 0 and 1 belong to the `error`
    /// event and are never returned here.
    pub fn exit_code(&self) -> u8 {
        match *self.kind {
            ErrorKind::Url => 2,
            ErrorKind::Sse | ErrorKind::Inner | ErrorKind::Request | ErrorKind::Status(_) => 3,
            ErrorKind::Io => 4,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.kind {
            ErrorKind::Sse => f.write_str("malformed event")?,
            ErrorKind::Inner => f.write_str("error reading response body")?,
            ErrorKind::Request => f.write_str("request failed")?,
            ErrorKind::Status(code) => write!(f, "server responded with status {}", code)?,
            ErrorKind::Url => f.write_str("invalid url")?,
            ErrorKind::Io => f.write_str("failed to write output")?,
        }

        match &self.source {
            Some(source) => write!(f, ": {}", source),
            None => Ok(()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Sse,
    Inner,
    Request,
    Status(u16),
    Url,
    Io,
}
