//! # dictwire
//!
//! An async client for the DICT dictionary server protocol (RFC 2229).
//!
//! ## Features
//!
//! - **Lookups**: DEFINE and MATCH with structured results
//! - **Discovery**: SHOW DATABASES, SHOW STRATEGIES, SHOW INFO, SHOW SERVER, HELP
//! - **Session**: OPTION MIME, CLIENT, AUTH (shared-secret MD5), STATUS, QUIT
//! - **Any transport**: TCP by default, or any `AsyncRead + AsyncWrite` stream
//!
//! ## Quick Start
//!
//! ```ignore
//! use dictwire::Client;
//!
//! #[tokio::main]
//! async fn main() -> dictwire::Result<()> {
//!     let mut client = Client::from_address("dict://dict.org")?;
//!     client.connect().await?;
//!
//!     let response = client.define("wn", "lexicon").await?;
//!     for definition in &response.definitions {
//!         println!("{}:\n{}", definition.database, definition.text);
//!     }
//!
//!     client.quit().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Model
//!
//! `DEFINE`, `MATCH` and `SHOW INFO` report a refused lookup (552, 550, ...)
//! as an unsuccessful response with an empty body. `SHOW DATABASES`,
//! `SHOW STRATEGIES`, `SHOW SERVER` and `HELP` fail with
//! [`Error::UnexpectedResponse`] instead. Single-line commands return a
//! [`Reply`] whose `ok` flag tells whether the expected code came back.
//!
//! A transport failure drops the connection; the next command fails with
//! [`Error::NotConnected`] until [`Client::connect`] succeeds again.
//!
//! ## Modules
//!
//! - [`command`]: DICT command builders
//! - [`connection`]: Line framing, client and shared handle
//! - [`parser`]: Reply grammar
//! - [`types`]: Reply codes and structured responses

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod types;

pub use connection::{
    Client, Config, ConfigBuilder, ConnectionState, DEFAULT_PORT, Endpoint, SharedClient,
};
pub use error::{Error, Result};
pub use types::{
    DatabaseInfo, DatabasesResponse, DefineResponse, Definition, Greeting, HelpResponse,
    InfoResponse, MatchEntry, MatchResponse, Reply, ReplyCode, StatusReply, StrategiesResponse,
    StrategyInfo,
};
