//! DICT protocol client.
//!
//! A [`Client`] owns one transport and runs one command at a time: each
//! method writes a single command line and reads exactly the lines that
//! make up its reply, so the stream is positioned at the next reply when
//! the method returns. Concurrent callers go through
//! [`SharedClient`](super::SharedClient), which serializes them.

use std::fmt;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use super::config::Config;
use super::endpoint::Endpoint;
use super::framed::LineStream;
use crate::command::{Command, auth_digest, sanitize};
use crate::error::{Error, Result};
use crate::parser::{
    is_terminator, parse_count, parse_definition_header, parse_entry, parse_greeting,
    parse_reply, parse_status,
};
use crate::types::{
    DatabaseInfo, DatabasesResponse, DefineResponse, Definition, Greeting, HelpResponse,
    InfoResponse, MatchEntry, MatchResponse, Reply, ReplyCode, StatusReply, StrategiesResponse,
    StrategyInfo,
};

/// Connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No transport.
    #[default]
    Disconnected,
    /// Transport opening, greeting not yet accepted.
    Connecting,
    /// Greeting accepted, commands may be sent.
    Connected,
}

/// DICT client.
///
/// `S` is the transport; [`Client::connect`] opens a [`TcpStream`], while
/// [`Client::connect_stream`] accepts any duplex byte stream.
pub struct Client<S = TcpStream> {
    config: Config,
    stream: Option<LineStream<S>>,
    state: ConnectionState,
    connection_error: Option<String>,
    capabilities: Vec<String>,
    message_id: String,
}

impl Client {
    /// Creates an unconnected TCP client.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_config(config)
    }

    /// Creates an unconnected TCP client for an address such as
    /// `dict://dict.org` or `localhost:2628`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a valid DICT endpoint.
    pub fn from_address(address: &str) -> Result<Self> {
        Ok(Self::new(Config::new(Endpoint::parse(address)?)))
    }

    /// Opens a TCP connection to the configured endpoint and reads the greeting.
    ///
    /// An existing connection is closed first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the TCP connect does not finish within
    /// the configured timeout, [`Error::Io`] if it fails, and
    /// [`Error::ConnectionFailed`] if the server refuses the session.
    pub async fn connect(&mut self) -> Result<Greeting> {
        self.close_previous().await;
        self.state = ConnectionState::Connecting;

        let address = self.config.endpoint.address();
        let limit = self.config.connect_timeout;
        info!(endpoint = %self.config.endpoint, "Connecting to DICT server");

        let stream = match timeout(limit, TcpStream::connect(&address)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                self.state = ConnectionState::Disconnected;
                warn!(%address, error = %e, "TCP connect failed");
                return Err(e.into());
            }
            Err(_) => {
                self.state = ConnectionState::Disconnected;
                warn!(%address, ?limit, "TCP connect timed out");
                return Err(Error::Timeout(limit));
            }
        };

        self.connect_stream(stream).await
    }

    /// Adopts `endpoint` and connects to it.
    ///
    /// A connection to a different endpoint is closed before switching.
    ///
    /// # Errors
    ///
    /// See [`Client::connect`].
    pub async fn connect_to(&mut self, endpoint: Endpoint) -> Result<Greeting> {
        if endpoint != self.config.endpoint {
            self.close_previous().await;
            debug!(from = %self.config.endpoint, to = %endpoint, "Switching endpoint");
            self.config.endpoint = endpoint;
        }
        self.connect().await
    }
}

impl<S> Client<S> {
    /// Creates an unconnected client for an arbitrary transport.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            stream: None,
            state: ConnectionState::Disconnected,
            connection_error: None,
            capabilities: Vec::new(),
            message_id: String::new(),
        }
    }

    /// Returns true once the greeting was accepted and until the session ends.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Returns the connection state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns the capabilities advertised in the greeting.
    #[must_use]
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Returns true if the server advertised `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Returns the message id from the greeting, used by `AUTH`.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Returns the recorded connection failure, if any.
    #[must_use]
    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }

    /// Returns the current endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.config.endpoint
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Takes over an already-open transport and reads the greeting.
    ///
    /// An existing connection is closed first. On success the stored
    /// connection error is cleared and the greeting's capabilities and
    /// message id are recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionFailed`] for a non-220 banner,
    /// [`Error::InvalidGreeting`] for a malformed one, or a transport error.
    pub async fn connect_stream(&mut self, stream: S) -> Result<Greeting> {
        self.close_previous().await;
        self.state = ConnectionState::Connecting;

        let mut framed = LineStream::with_max_line_length(stream, self.config.max_line_length);
        let greeting = match Self::read_greeting(&mut framed).await {
            Ok(greeting) => greeting,
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                warn!(error = %e, "Greeting rejected");
                return Err(e);
            }
        };

        self.capabilities.clone_from(&greeting.capabilities);
        self.message_id.clone_from(&greeting.message_id);
        self.connection_error = None;
        self.stream = Some(framed);
        self.state = ConnectionState::Connected;

        info!(
            banner = %greeting.message,
            capabilities = ?greeting.capabilities,
            "Connected"
        );
        Ok(greeting)
    }

    /// Looks up definitions of `word` in `database`.
    ///
    /// A status other than 150 (for example 552, no match) is returned as an
    /// empty result without reading further.
    ///
    /// # Errors
    ///
    /// Returns an error if not connected, on transport failure, or if a
    /// definition header is malformed.
    pub async fn define(&mut self, database: &str, word: &str) -> Result<DefineResponse> {
        self.send(&Command::Define {
            database: database.to_string(),
            word: word.to_string(),
        })
        .await?;

        let status = self.read_status(ReplyCode::DEFINITIONS_RETRIEVED).await?;
        if !status.ok {
            debug!(code = ?status.as_u16(), "No definitions");
            return Ok(DefineResponse {
                status,
                count: 0,
                definitions: Vec::new(),
                final_status: None,
            });
        }

        let count = parse_count(status.message.as_deref());
        let mut definitions = Vec::new();
        for _ in 0..count {
            let header = parse_definition_header(&self.read_line().await?)?;
            let text = self.read_text().await?;
            definitions.push(Definition {
                headword: header.headword,
                database: header.database,
                database_description: header.description,
                text,
            });
        }

        let final_status = self.read_status(ReplyCode::OK).await?;
        Ok(DefineResponse {
            status,
            count,
            definitions,
            final_status: Some(final_status),
        })
    }

    /// Finds headwords matching `word` with `strategy` in `database`.
    ///
    /// Body lines that are not `<database> "<word>"` are skipped. A status
    /// other than 152 is returned as an empty result.
    ///
    /// # Errors
    ///
    /// Returns an error if not connected or on transport failure.
    pub async fn r#match(
        &mut self,
        database: &str,
        strategy: &str,
        word: &str,
    ) -> Result<MatchResponse> {
        self.send(&Command::Match {
            database: database.to_string(),
            strategy: strategy.to_string(),
            word: word.to_string(),
        })
        .await?;

        let status = self.read_status(ReplyCode::MATCHES_FOUND).await?;
        if !status.ok {
            return Ok(MatchResponse {
                status,
                count: 0,
                matches: Vec::new(),
                final_status: None,
            });
        }

        let matches: Vec<MatchEntry> = self
            .read_entries()
            .await?
            .into_iter()
            .map(|(database, word)| MatchEntry { database, word })
            .collect();
        let final_status = self.read_status(ReplyCode::OK).await?;

        Ok(MatchResponse {
            status,
            count: matches.len(),
            matches,
            final_status: Some(final_status),
        })
    }

    /// Lists the server's databases.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the status is not 110, for
    /// example 554 when the server has no databases.
    pub async fn show_databases(&mut self) -> Result<DatabasesResponse> {
        self.send(&Command::ShowDatabases).await?;
        let status = self.expect_status(ReplyCode::DATABASES_PRESENT).await?;

        let databases = self
            .read_entries()
            .await?
            .into_iter()
            .map(|(name, description)| DatabaseInfo { name, description })
            .collect();
        let final_status = self.read_status(ReplyCode::OK).await?;

        Ok(DatabasesResponse {
            status,
            databases,
            final_status,
        })
    }

    /// Lists the server's match strategies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the status is not 111.
    pub async fn show_strategies(&mut self) -> Result<StrategiesResponse> {
        self.send(&Command::ShowStrategies).await?;
        let status = self.expect_status(ReplyCode::STRATEGIES_AVAILABLE).await?;

        let strategies = self
            .read_entries()
            .await?
            .into_iter()
            .map(|(name, description)| StrategyInfo { name, description })
            .collect();
        let final_status = self.read_status(ReplyCode::OK).await?;

        Ok(StrategiesResponse {
            status,
            strategies,
            final_status,
        })
    }

    /// Retrieves the description of `database`.
    ///
    /// A status other than 112 (for example 550, invalid database) is
    /// returned as a result without text.
    ///
    /// # Errors
    ///
    /// Returns an error if not connected or on transport failure.
    pub async fn show_info(&mut self, database: &str) -> Result<InfoResponse> {
        self.send(&Command::ShowInfo {
            database: database.to_string(),
        })
        .await?;

        let status = self.read_status(ReplyCode::DATABASE_INFO).await?;
        if !status.ok {
            return Ok(InfoResponse {
                status,
                info: None,
                final_status: None,
            });
        }

        let info = self.read_text().await?;
        let final_status = self.read_status(ReplyCode::OK).await?;
        Ok(InfoResponse {
            status,
            info: Some(info),
            final_status: Some(final_status),
        })
    }

    /// Retrieves the server description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the status is not 114.
    pub async fn show_server(&mut self) -> Result<InfoResponse> {
        self.send(&Command::ShowServer).await?;
        let status = self.expect_status(ReplyCode::SERVER_INFO).await?;

        let info = self.read_text().await?;
        let final_status = self.read_status(ReplyCode::OK).await?;
        Ok(InfoResponse {
            status,
            info: Some(info),
            final_status: Some(final_status),
        })
    }

    /// Retrieves the server's help text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the status is not 113.
    pub async fn help(&mut self) -> Result<HelpResponse> {
        self.send(&Command::Help).await?;
        let status = self.expect_status(ReplyCode::HELP_TEXT).await?;

        let text = self.read_text().await?;
        let final_status = self.read_status(ReplyCode::OK).await?;
        Ok(HelpResponse {
            status,
            text,
            final_status,
        })
    }

    /// Sends `OPTION` with the given words.
    ///
    /// # Errors
    ///
    /// Returns an error if not connected, on transport failure, or if the
    /// reply is not a status line.
    pub async fn option<I, T>(&mut self, tokens: I) -> Result<Reply>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect();
        self.simple(Command::Option { tokens }, ReplyCode::OK).await
    }

    /// Asks the server to prefix definitions with MIME headers (`OPTION MIME`).
    ///
    /// # Errors
    ///
    /// See [`Client::option`].
    pub async fn mime(&mut self) -> Result<Reply> {
        self.option(["MIME"]).await
    }

    /// Identifies the client with `CLIENT`.
    ///
    /// # Errors
    ///
    /// See [`Client::option`].
    pub async fn client(&mut self, user_agent: &str) -> Result<Reply> {
        self.simple(
            Command::Client {
                user_agent: user_agent.to_string(),
            },
            ReplyCode::OK,
        )
        .await
    }

    /// Authenticates with `AUTH`.
    ///
    /// Missing credentials fall back to those of the endpoint, then to the
    /// empty string. A refusal (531) is an unsuccessful reply, not an error.
    ///
    /// # Errors
    ///
    /// See [`Client::option`].
    pub async fn auth(&mut self, username: Option<&str>, password: Option<&str>) -> Result<Reply> {
        let endpoint = &self.config.endpoint;
        let username = sanitize(username.or_else(|| endpoint.username()).unwrap_or_default());
        let password = password.or_else(|| endpoint.password()).unwrap_or_default();
        let digest = auth_digest(&self.message_id, password);

        self.simple(Command::Auth { username, digest }, ReplyCode::AUTH_OK)
            .await
    }

    /// Requests server status.
    ///
    /// # Errors
    ///
    /// See [`Client::option`].
    pub async fn status(&mut self) -> Result<Reply> {
        self.simple(Command::Status, ReplyCode::STATUS).await
    }

    /// Ends the session and shuts the transport down.
    ///
    /// The client is disconnected once the reply is parsed. A failure while
    /// shutting down is recorded as the connection error and does not fail
    /// the call.
    ///
    /// # Errors
    ///
    /// Returns an error if not connected, on transport failure, or if the
    /// reply is not a status line.
    pub async fn quit(&mut self) -> Result<Reply> {
        let reply = self.simple(Command::Quit, ReplyCode::CLOSING).await?;

        self.state = ConnectionState::Disconnected;
        self.connection_error = None;
        if let Some(mut stream) = self.stream.take()
            && let Err(e) = stream.shutdown().await
        {
            warn!(error = %e, "Transport shutdown failed");
            self.connection_error = Some(e.to_string());
        }

        info!("Disconnected");
        Ok(reply)
    }

    /// Sends `QUIT` if connected and drops the transport in any case.
    ///
    /// # Errors
    ///
    /// Returns the `QUIT` failure, after the transport has been dropped.
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.is_connected() {
            self.stream = None;
            return Ok(());
        }

        let result = self.quit().await.map(drop);
        self.stream = None;
        self.state = ConnectionState::Disconnected;
        result
    }

    async fn close_previous(&mut self) {
        if let Err(e) = self.disconnect().await {
            debug!(error = %e, "Ignoring failure while closing previous connection");
        }
    }

    async fn read_greeting(framed: &mut LineStream<S>) -> Result<Greeting> {
        let line = framed.read_line().await?;
        trace!(%line, "Greeting");
        parse_greeting(&line)
    }

    fn ensure_ready(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        // Not reached today: every path that stores an error also
        // disconnects, so the check above reports it first.
        if let Some(error) = &self.connection_error {
            return Err(Error::ConnectionError(error.clone()));
        }
        Ok(())
    }

    fn stream_mut(&mut self) -> Result<&mut LineStream<S>> {
        self.stream.as_mut().ok_or(Error::NotConnected)
    }

    /// Drops the transport after a transport failure.
    fn check_transport<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result
            && e.is_transport()
        {
            warn!(error = %e, "Connection lost");
            self.stream = None;
            self.state = ConnectionState::Disconnected;
            self.connection_error = Some(e.to_string());
        }
        result
    }

    async fn send(&mut self, cmd: &Command) -> Result<()> {
        self.ensure_ready()?;
        debug!(command = cmd.name(), "Sending command");

        let data = cmd.serialize();
        let result = self.stream_mut()?.write_line(&data).await;
        self.check_transport(result)
    }

    async fn read_line(&mut self) -> Result<String> {
        let result = self.stream_mut()?.read_line().await;
        let line = self.check_transport(result)?;
        trace!(%line, "Received line");
        Ok(line)
    }

    async fn read_status(&mut self, success: ReplyCode) -> Result<StatusReply> {
        let line = self.read_line().await?;
        Ok(parse_status(&line, success))
    }

    /// Reads a status line that must carry `success`.
    async fn expect_status(&mut self, success: ReplyCode) -> Result<StatusReply> {
        let line = self.read_line().await?;
        let status = parse_status(&line, success);
        if status.ok {
            Ok(status)
        } else {
            Err(Error::UnexpectedResponse(line))
        }
    }

    async fn simple(&mut self, cmd: Command, success: ReplyCode) -> Result<Reply> {
        self.send(&cmd).await?;
        let line = self.read_line().await?;
        parse_reply(cmd.name(), &line, success)
    }

    /// Reads body lines up to the terminator, joined with `\n`.
    async fn read_text(&mut self) -> Result<String> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            if is_terminator(&line) {
                return Ok(lines.join("\n"));
            }
            lines.push(line);
        }
    }

    /// Reads `<name> "<text>"` body lines up to the terminator.
    async fn read_entries(&mut self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        loop {
            let line = self.read_line().await?;
            if is_terminator(&line) {
                return Ok(entries);
            }
            match parse_entry(&line) {
                Some(entry) => entries.push(entry),
                None => trace!(%line, "Skipping malformed entry"),
            }
        }
    }
}

impl<S> fmt::Debug for Client<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.config.endpoint)
            .field("state", &self.state)
            .field("capabilities", &self.capabilities)
            .field("message_id", &self.message_id)
            .field("connection_error", &self.connection_error)
            .finish_non_exhaustive()
    }
}
