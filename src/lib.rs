mod body;
pub mod client;
pub mod dispatch;
mod error;
mod event;
pub mod parser;

pub use {
    body::{Body, EventBody},
    dispatch::{Action, Dispatcher, Flow, Outcome},
    error::{Error, ErrorKind},
    event::Event,
};
