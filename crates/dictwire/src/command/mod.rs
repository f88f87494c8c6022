//! DICT command builder.
//!
//! Every user-supplied token passes through [`sanitize`] before it is put on
//! the wire, so a token can never smuggle a line break (and with it a second
//! command) into the line-oriented protocol.

use md5::{Digest, Md5};

/// DICT command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// DEFINE - Look up definitions
    Define {
        /// Database name, `*` for all or `!` for the first match
        database: String,
        /// Word to define
        word: String,
    },
    /// MATCH - Find headwords
    Match {
        /// Database name, `*` for all or `!` for the first match
        database: String,
        /// Strategy name, `.` for the server default
        strategy: String,
        /// Word to match
        word: String,
    },
    /// SHOW DATABASES - List databases
    ShowDatabases,
    /// SHOW STRATEGIES - List match strategies
    ShowStrategies,
    /// SHOW INFO - Describe a database
    ShowInfo {
        /// Database name
        database: String,
    },
    /// SHOW SERVER - Describe the server
    ShowServer,
    /// HELP - Server help text
    Help,
    /// OPTION - Enable a server option
    Option {
        /// Option words, joined with spaces
        tokens: Vec<String>,
    },
    /// CLIENT - Identify the client
    Client {
        /// Client identification (may be empty)
        user_agent: String,
    },
    /// AUTH - Authenticate with a shared secret
    Auth {
        /// User name
        username: String,
        /// Hex MD5 digest, see [`auth_digest`]
        digest: String,
    },
    /// STATUS - Server status
    Status,
    /// QUIT - Close connection
    Quit,
}

impl Command {
    /// Returns the command keyword, as used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Define { .. } => "DEFINE",
            Self::Match { .. } => "MATCH",
            Self::ShowDatabases => "SHOW DATABASES",
            Self::ShowStrategies => "SHOW STRATEGIES",
            Self::ShowInfo { .. } => "SHOW INFO",
            Self::ShowServer => "SHOW SERVER",
            Self::Help => "HELP",
            Self::Option { .. } => "OPTION",
            Self::Client { .. } => "CLIENT",
            Self::Auth { .. } => "AUTH",
            Self::Status => "STATUS",
            Self::Quit => "QUIT",
        }
    }

    /// Serializes the command to a CRLF-terminated line.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut line = String::from(self.name());

        match self {
            Self::Define { database, word } => {
                line.push(' ');
                line.push_str(&sanitize(database));
                line.push(' ');
                line.push_str(&quote_word(&sanitize(word)));
            }
            Self::Match {
                database,
                strategy,
                word,
            } => {
                line.push(' ');
                line.push_str(&sanitize(database));
                line.push(' ');
                line.push_str(&sanitize(strategy));
                line.push(' ');
                line.push_str(&quote_word(&sanitize(word)));
            }
            Self::ShowInfo { database } => {
                line.push(' ');
                line.push_str(&sanitize(database));
            }
            Self::Option { tokens } => {
                let tokens: Vec<String> = tokens.iter().map(|t| sanitize(t)).collect();
                line.push(' ');
                line.push_str(&tokens.join(" "));
            }
            Self::Client { user_agent } => {
                line.push(' ');
                line.push_str(&sanitize(user_agent));
            }
            Self::Auth { username, digest } => {
                line.push(' ');
                line.push_str(&sanitize(username));
                line.push(' ');
                line.push_str(&sanitize(digest));
            }
            Self::ShowDatabases
            | Self::ShowStrategies
            | Self::ShowServer
            | Self::Help
            | Self::Status
            | Self::Quit => {}
        }

        line.push_str("\r\n");
        line.into_bytes()
    }
}

/// Removes CR and LF from a user-supplied token.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|&c| c != '\r' && c != '\n').collect()
}

/// Wraps a word containing a space in double quotes.
fn quote_word(word: &str) -> String {
    if word.contains(' ') {
        format!("\"{word}\"")
    } else {
        word.to_string()
    }
}

/// Computes the `AUTH` digest: hex MD5 of `<message-id>` followed by the
/// sanitized secret.
#[must_use]
pub fn auth_digest(message_id: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(b"<");
    hasher.update(message_id.as_bytes());
    hasher.update(b">");
    hasher.update(sanitize(secret).as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_command() {
        let cmd = Command::Define {
            database: "wn".to_string(),
            word: "lexicon".to_string(),
        };
        assert_eq!(cmd.serialize(), b"DEFINE wn lexicon\r\n");
    }

    #[test]
    fn test_define_quotes_phrase() {
        let cmd = Command::Define {
            database: "*".to_string(),
            word: "ice cream".to_string(),
        };
        assert_eq!(cmd.serialize(), b"DEFINE * \"ice cream\"\r\n");
    }

    #[test]
    fn test_match_command() {
        let cmd = Command::Match {
            database: "gcide".to_string(),
            strategy: "prefix".to_string(),
            word: "lex".to_string(),
        };
        assert_eq!(cmd.serialize(), b"MATCH gcide prefix lex\r\n");
    }

    #[test]
    fn test_show_commands() {
        assert_eq!(Command::ShowDatabases.serialize(), b"SHOW DATABASES\r\n");
        assert_eq!(Command::ShowStrategies.serialize(), b"SHOW STRATEGIES\r\n");
        assert_eq!(Command::ShowServer.serialize(), b"SHOW SERVER\r\n");
        assert_eq!(
            Command::ShowInfo {
                database: "foldoc".to_string()
            }
            .serialize(),
            b"SHOW INFO foldoc\r\n"
        );
    }

    #[test]
    fn test_option_command() {
        let cmd = Command::Option {
            tokens: vec!["FOO".to_string(), "BAR".to_string()],
        };
        assert_eq!(cmd.serialize(), b"OPTION FOO BAR\r\n");
    }

    #[test]
    fn test_client_command_allows_empty_agent() {
        let cmd = Command::Client {
            user_agent: String::new(),
        };
        assert_eq!(cmd.serialize(), b"CLIENT \r\n");
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::Help.serialize(), b"HELP\r\n");
        assert_eq!(Command::Status.serialize(), b"STATUS\r\n");
        assert_eq!(Command::Quit.serialize(), b"QUIT\r\n");
    }

    #[test]
    fn test_sanitize_strips_line_breaks() {
        assert_eq!(sanitize("foo\r\nQUIT"), "fooQUIT");
        assert_eq!(sanitize("\n\r"), "");
        assert_eq!(sanitize("plain"), "plain");
    }

    #[test]
    fn test_injection_stays_on_one_line() {
        let cmd = Command::Define {
            database: "wn\r\n".to_string(),
            word: "foo\r\nQUIT".to_string(),
        };
        let wire = cmd.serialize();
        assert_eq!(wire, b"DEFINE wn fooQUIT\r\n");
        assert_eq!(wire.iter().filter(|&&b| b == b'\n').count(), 1);

        let cmd = Command::Option {
            tokens: vec!["MIME\r\nSHOW".to_string(), "SERVER".to_string()],
        };
        assert_eq!(cmd.serialize(), b"OPTION MIMESHOW SERVER\r\n");
    }

    #[test]
    fn test_auth_digest() {
        // md5("<abc123>secret")
        assert_eq!(
            auth_digest("abc123", "secret"),
            "d97dd8a488afcf5c77302ebb52baf81b"
        );
        assert_eq!(auth_digest("abc123", "sec\r\nret"), auth_digest("abc123", "secret"));
    }

    #[test]
    fn test_auth_command() {
        let cmd = Command::Auth {
            username: "user".to_string(),
            digest: auth_digest("abc123", "secret"),
        };
        assert_eq!(
            cmd.serialize(),
            b"AUTH user d97dd8a488afcf5c77302ebb52baf81b\r\n"
        );
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::ShowDatabases.name(), "SHOW DATABASES");
        assert_eq!(
            Command::Client {
                user_agent: String::new()
            }
            .name(),
            "CLIENT"
        );
    }
}
