use clap::Parser;
use std::time::Duration;

use sse_tail::client::Options;

/// Follow an event stream, relaying its output and exit status
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// http(s) url of the event stream
    pub url: String,

    /// Seconds to wait for the next chunk before giving up
    #[arg(long, default_value_t = 60 * 60)]
    pub read_timeout: u64,

    /// Seconds to wait for the connection to open
    #[arg(long, default_value_t = 30)]
    pub connect_timeout: u64,
}

impl Args {
    pub fn options(&self) -> Options {
        Options {
            read_timeout: Duration::from_secs(self.read_timeout),
            connect_timeout: Duration::from_secs(self.connect_timeout),
        }
    }
}
