//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Server used when `--server` is not given.
pub(crate) const DEFAULT_SERVER: &str = "dict://dict.org";

/// Query a DICT dictionary server (RFC 2229).
#[derive(Parser, Debug)]
#[command(name = "dictwire", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Server address, `dict://[user[:password]@]host[:port]` or `host[:port]`.
    #[arg(short, long, value_name = "URL", default_value = DEFAULT_SERVER)]
    pub(crate) server: String,
    /// Identification sent with `CLIENT`.
    #[arg(
        long = "client",
        value_name = "NAME",
        default_value = concat!("dictwire ", env!("CARGO_PKG_VERSION"))
    )]
    pub(crate) client_name: String,
    /// Ask the server to prefix definitions with MIME headers.
    #[arg(long)]
    pub(crate) mime: bool,
    /// Authenticate as this user before running the command.
    #[arg(short, long)]
    pub(crate) user: Option<String>,
    /// Shared secret for `--user`.
    #[arg(short, long, requires = "user")]
    pub(crate) password: Option<String>,
    /// TCP connect timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub(crate) timeout: u64,
    /// The request to send.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Requests supported by the CLI.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Looks up definitions of a word.
    Define {
        /// Word or phrase to define.
        word: String,
        /// Database to search, `*` for all, `!` for the first with a match.
        #[arg(short, long, default_value = "*")]
        database: String,
    },
    /// Lists headwords matching a word.
    Match {
        /// Word to match.
        word: String,
        /// Database to search.
        #[arg(short, long, default_value = "*")]
        database: String,
        /// Match strategy, `.` for the server default.
        #[arg(short, long, default_value = ".")]
        strategy: String,
    },
    /// Lists the server's databases.
    Databases,
    /// Lists the server's match strategies.
    Strategies,
    /// Shows the description of a database.
    Info {
        /// Database name.
        database: String,
    },
    /// Shows the server description.
    Server,
    /// Shows the server's help text.
    Help,
    /// Shows the server status line.
    Status,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_define_defaults() {
        let cli = Cli::try_parse_from(["dictwire", "define", "lexicon"]).unwrap();
        assert_eq!(cli.server, DEFAULT_SERVER);
        assert!(!cli.mime);
        assert_eq!(cli.timeout, 30);
        assert!(cli.client_name.starts_with("dictwire "));
        assert_eq!(
            cli.command,
            CliCommand::Define {
                word: "lexicon".to_string(),
                database: "*".to_string(),
            }
        );
    }

    #[test]
    fn test_match_with_options() {
        let cli = Cli::try_parse_from([
            "dictwire",
            "--server",
            "localhost:2700",
            "--mime",
            "match",
            "-d",
            "wn",
            "-s",
            "prefix",
            "lex",
        ])
        .unwrap();
        assert_eq!(cli.server, "localhost:2700");
        assert!(cli.mime);
        assert_eq!(
            cli.command,
            CliCommand::Match {
                word: "lex".to_string(),
                database: "wn".to_string(),
                strategy: "prefix".to_string(),
            }
        );
    }

    #[test]
    fn test_password_requires_user() {
        assert!(Cli::try_parse_from(["dictwire", "--password", "x", "status"]).is_err());

        let cli =
            Cli::try_parse_from(["dictwire", "-u", "me", "-p", "secret", "status"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("me"));
        assert_eq!(cli.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["dictwire"]).is_err());
    }

    #[test]
    fn test_info_requires_database() {
        assert!(Cli::try_parse_from(["dictwire", "info"]).is_err());
        let cli = Cli::try_parse_from(["dictwire", "info", "wn"]).unwrap();
        assert_eq!(
            cli.command,
            CliCommand::Info {
                database: "wn".to_string()
            }
        );
    }
}
