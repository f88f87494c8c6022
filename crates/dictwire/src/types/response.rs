//! Structured results of the body-bearing commands.
//!
//! Each block reply pairs an initial [`StatusReply`] with a body and a
//! final [`StatusReply`]. Commands that treat a non-success code as a
//! valid empty result (`DEFINE`, `MATCH`, `SHOW INFO`) leave the body
//! empty and `final_status` as `None` in that case.

use super::StatusReply;

/// One definition from a `DEFINE` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Headword as echoed by the server in the `151` header.
    pub headword: String,
    /// Database the definition came from.
    pub database: String,
    /// Human-readable database description.
    pub database_description: String,
    /// Definition body, lines joined with `\n`.
    pub text: String,
}

/// Result of `DEFINE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineResponse {
    /// Initial status line (success code 150).
    pub status: StatusReply,
    /// Number of definitions announced by the server.
    pub count: usize,
    /// Definitions in server order.
    pub definitions: Vec<Definition>,
    /// Trailing status line, absent when the initial status was not 150.
    pub final_status: Option<StatusReply>,
}

impl DefineResponse {
    /// Returns true if definitions were retrieved.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status.ok
    }
}

/// One entry from a `MATCH` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    /// Database holding the matched word.
    pub database: String,
    /// Matched word.
    pub word: String,
}

/// Result of `MATCH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResponse {
    /// Initial status line (success code 152).
    pub status: StatusReply,
    /// Number of entries actually parsed.
    pub count: usize,
    /// Matches in server order.
    pub matches: Vec<MatchEntry>,
    /// Trailing status line, absent when the initial status was not 152.
    pub final_status: Option<StatusReply>,
}

impl MatchResponse {
    /// Returns true if matches were found.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status.ok
    }
}

/// A database listed by `SHOW DATABASES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    /// Database name, usable as the `DEFINE`/`MATCH` database argument.
    pub name: String,
    /// Database description.
    pub description: String,
}

/// A strategy listed by `SHOW STRATEGIES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyInfo {
    /// Strategy name, usable as the `MATCH` strategy argument.
    pub name: String,
    /// Strategy description.
    pub description: String,
}

/// Result of `SHOW DATABASES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabasesResponse {
    /// Initial status line (always 110).
    pub status: StatusReply,
    /// Databases in server order.
    pub databases: Vec<DatabaseInfo>,
    /// Trailing status line.
    pub final_status: StatusReply,
}

/// Result of `SHOW STRATEGIES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategiesResponse {
    /// Initial status line (always 111).
    pub status: StatusReply,
    /// Strategies in server order.
    pub strategies: Vec<StrategyInfo>,
    /// Trailing status line.
    pub final_status: StatusReply,
}

/// Result of `SHOW INFO` and `SHOW SERVER`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoResponse {
    /// Initial status line (112 for `SHOW INFO`, 114 for `SHOW SERVER`).
    pub status: StatusReply,
    /// Information text, absent when `SHOW INFO` was refused.
    pub info: Option<String>,
    /// Trailing status line, absent when `SHOW INFO` was refused.
    pub final_status: Option<StatusReply>,
}

impl InfoResponse {
    /// Returns true if the information text was retrieved.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status.ok
    }
}

/// Result of `HELP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpResponse {
    /// Initial status line (always 113).
    pub status: StatusReply,
    /// Help text, lines joined with `\n`.
    pub text: String,
    /// Trailing status line.
    pub final_status: StatusReply,
}
