//! DICT status reply types.

/// DICT reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// Creates a new reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// RFC 2229 reply codes
impl ReplyCode {
    /// 110 n databases present - text follows
    pub const DATABASES_PRESENT: Self = Self(110);
    /// 111 n strategies available - text follows
    pub const STRATEGIES_AVAILABLE: Self = Self(111);
    /// 112 database information follows
    pub const DATABASE_INFO: Self = Self(112);
    /// 113 help text follows
    pub const HELP_TEXT: Self = Self(113);
    /// 114 server information follows
    pub const SERVER_INFO: Self = Self(114);
    /// 150 n definitions retrieved - definitions follow
    pub const DEFINITIONS_RETRIEVED: Self = Self(150);
    /// 151 word database name - text follows
    pub const DEFINITION_FOLLOWS: Self = Self(151);
    /// 152 n matches found - text follows
    pub const MATCHES_FOUND: Self = Self(152);
    /// 210 status information
    pub const STATUS: Self = Self(210);
    /// 220 text msg-id (banner)
    pub const BANNER: Self = Self(220);
    /// 221 Closing Connection
    pub const CLOSING: Self = Self(221);
    /// 230 Authentication successful
    pub const AUTH_OK: Self = Self(230);
    /// 250 ok
    pub const OK: Self = Self(250);
    /// 420 Server temporarily unavailable
    pub const TEMPORARILY_UNAVAILABLE: Self = Self(420);
    /// 421 Server shutting down at operator request
    pub const SHUTTING_DOWN: Self = Self(421);
    /// 500 Syntax error, command not recognized
    pub const SYNTAX_ERROR: Self = Self(500);
    /// 501 Syntax error, illegal parameters
    pub const PARAMETER_ERROR: Self = Self(501);
    /// 502 Command not implemented
    pub const NOT_IMPLEMENTED: Self = Self(502);
    /// 503 Command parameter not implemented
    pub const PARAMETER_NOT_IMPLEMENTED: Self = Self(503);
    /// 530 Access denied
    pub const ACCESS_DENIED: Self = Self(530);
    /// 531 Access denied, use "SHOW INFO" for server information
    pub const AUTH_DENIED: Self = Self(531);
    /// 532 Access denied, unknown mechanism
    pub const UNKNOWN_MECHANISM: Self = Self(532);
    /// 550 Invalid database
    pub const INVALID_DATABASE: Self = Self(550);
    /// 551 Invalid strategy
    pub const INVALID_STRATEGY: Self = Self(551);
    /// 552 No match
    pub const NO_MATCH: Self = Self(552);
    /// 554 No databases present
    pub const NO_DATABASES: Self = Self(554);
    /// 555 No strategies available
    pub const NO_STRATEGIES: Self = Self(555);
}

/// Strictly parsed single-line reply.
///
/// Returned by commands whose whole answer is one status line
/// (`OPTION`, `CLIENT`, `AUTH`, `STATUS`, `QUIT`). Code and message are
/// always present; `ok` compares the code against the command's own
/// success code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code.
    pub code: ReplyCode,
    /// Whether the code is the command's success code.
    pub ok: bool,
    /// Text after the code, trimmed.
    pub message: String,
}

impl Reply {
    /// Creates a reply, computing `ok` against `success`.
    #[must_use]
    pub fn new(code: ReplyCode, success: ReplyCode, message: impl Into<String>) -> Self {
        Self {
            code,
            ok: code == success,
            message: message.into(),
        }
    }
}

/// Leniently parsed status line.
///
/// Block replies keep whatever could be recognised: a line that is not
/// `<code> <text>` leaves both fields empty and `ok` false instead of
/// failing the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReply {
    /// Reply code, if the line carried one.
    pub code: Option<ReplyCode>,
    /// Whether the code is the expected success code.
    pub ok: bool,
    /// Text after the code, if the line carried one.
    pub message: Option<String>,
}

impl StatusReply {
    /// Creates a status reply, computing `ok` against `success`.
    #[must_use]
    pub fn new(code: Option<ReplyCode>, success: ReplyCode, message: Option<String>) -> Self {
        Self {
            code,
            ok: code == Some(success),
            message,
        }
    }

    /// Returns the numeric code, if any.
    #[must_use]
    pub fn as_u16(&self) -> Option<u16> {
        self.code.map(ReplyCode::as_u16)
    }

    /// Returns the message text or an empty string.
    #[must_use]
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod reply_code_tests {
        use super::*;

        #[test]
        fn display() {
            assert_eq!(ReplyCode::NO_MATCH.to_string(), "552");
            assert_eq!(format!("{}", ReplyCode::OK), "250");
        }
    }

    mod reply_tests {
        use super::*;

        #[test]
        fn ok_follows_the_command_success_code() {
            let reply = Reply::new(ReplyCode::OK, ReplyCode::AUTH_OK, "ok");
            assert!(!reply.ok);

            let reply = Reply::new(ReplyCode::AUTH_OK, ReplyCode::AUTH_OK, "authenticated");
            assert!(reply.ok);
        }

        #[test]
        fn status_reply_without_code_is_not_ok() {
            let status = StatusReply::new(None, ReplyCode::OK, None);
            assert!(!status.ok);
            assert_eq!(status.as_u16(), None);
            assert_eq!(status.message_text(), "");
        }

        #[test]
        fn status_reply_with_code() {
            let status = StatusReply::new(Some(ReplyCode::OK), ReplyCode::OK, Some("ok".into()));
            assert!(status.ok);
            assert_eq!(status.as_u16(), Some(250));
            assert_eq!(status.message_text(), "ok");
        }
    }
}
