//! DICT connection management.
//!
//! [`LineStream`] frames the transport into CRLF lines, [`Client`] runs the
//! command/reply exchange on top of it, and [`SharedClient`] lets several
//! tasks use one connection in turn.

mod client;
mod config;
mod endpoint;
mod framed;
mod shared;

pub use client::{Client, ConnectionState};
pub use config::{Config, ConfigBuilder, DEFAULT_CONNECT_TIMEOUT};
pub use endpoint::{DEFAULT_PORT, Endpoint, SCHEME};
pub use framed::{LineStream, MAX_LINE_LENGTH};
pub use shared::SharedClient;
