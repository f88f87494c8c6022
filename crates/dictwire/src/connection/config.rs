//! Connection configuration types.

use std::time::Duration;

use super::endpoint::Endpoint;
use super::framed::MAX_LINE_LENGTH;

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// DICT connection configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server to connect to, with default `AUTH` credentials.
    pub endpoint: Endpoint,
    /// TCP connect timeout. Commands themselves are not timed.
    pub connect_timeout: Duration,
    /// Longest line accepted from the server, in bytes.
    pub max_line_length: usize,
}

impl Config {
    /// Creates a new configuration with default timeouts and limits.
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_line_length: MAX_LINE_LENGTH,
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub const fn builder(endpoint: Endpoint) -> ConfigBuilder {
        ConfigBuilder::new(endpoint)
    }
}

/// Builder for connection configuration.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    endpoint: Endpoint,
    connect_timeout: Duration,
    max_line_length: usize,
}

impl ConfigBuilder {
    /// Creates a new builder for the given endpoint.
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_line_length: MAX_LINE_LENGTH,
        }
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum line length.
    #[must_use]
    pub const fn max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        Config {
            endpoint: self.endpoint,
            connect_timeout: self.connect_timeout,
            max_line_length: self.max_line_length,
        }
    }
}
