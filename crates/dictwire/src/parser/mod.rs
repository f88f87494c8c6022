//! DICT reply parser.
//!
//! Every reply starts with a status line of the form `<3-digit code> <text>`.
//! Two parsers are provided for it, because commands disagree on what to do
//! with a line that does not fit:
//!
//! - [`parse_reply`] is strict and fails with [`Error::InvalidStatus`]. It is
//!   used by the single-line commands (`OPTION`, `CLIENT`, `AUTH`, `STATUS`,
//!   `QUIT`).
//! - [`parse_status`] is lenient and returns a [`StatusReply`] with empty
//!   fields. It is used for the initial and final lines of block replies so
//!   that a partial answer still reaches the caller.
//!
//! The remaining helpers cover the body grammars: the `151` definition
//! header, `<name> "<text>"` list entries and the lone `.` terminator.

use crate::error::{Error, Result};
use crate::types::{Greeting, Reply, ReplyCode, StatusReply};

/// Line that ends every text body.
pub const TERMINATOR: &str = ".";

/// Header of one definition inside a `DEFINE` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionHeader {
    /// Headword echoed by the server.
    pub headword: String,
    /// Database name.
    pub database: String,
    /// Database description.
    pub description: String,
}

/// Whitespace as the reply grammar counts it.
///
/// Unlike [`char::is_whitespace`] this includes U+FEFF and excludes U+0085.
const fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Characters a status line's text may not contain.
const fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Splits `<3-digit code><whitespace><text>` into code and text.
///
/// The whitespace run is consumed greedily, except that a line made only of
/// a code and whitespace keeps its last whitespace character as the text.
fn split_status(line: &str) -> Option<(ReplyCode, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() < 4 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let code = line[..3].parse::<u16>().ok()?;

    let after = &line[3..];
    let text = after.trim_start_matches(is_space);
    if text.len() == after.len() {
        return None;
    }
    let text = if text.is_empty() {
        let (last, _) = after.char_indices().last()?;
        if last == 0 {
            return None;
        }
        &after[last..]
    } else {
        text
    };

    if text.chars().any(is_line_break) {
        return None;
    }
    Some((ReplyCode::new(code), text))
}

/// Parses a single-line reply strictly.
///
/// `ok` is true only when the code equals `success`.
///
/// # Errors
///
/// Returns [`Error::InvalidStatus`] naming `command` if the line is not a
/// status line.
pub fn parse_reply(command: &'static str, line: &str, success: ReplyCode) -> Result<Reply> {
    let (code, text) = split_status(line).ok_or_else(|| Error::InvalidStatus {
        command,
        line: line.to_string(),
    })?;
    Ok(Reply::new(code, success, text.trim_matches(is_space)))
}

/// Parses a status line leniently.
///
/// A line that is not a status line yields a reply without code or message.
#[must_use]
pub fn parse_status(line: &str, success: ReplyCode) -> StatusReply {
    match split_status(line) {
        Some((code, text)) => StatusReply::new(Some(code), success, Some(text.to_string())),
        None => StatusReply::new(None, success, None),
    }
}

/// Finds every `<...>` token with a non-empty body, left to right.
///
/// Returns byte ranges covering the brackets.
fn bracket_tokens(text: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while let Some(open) = text[pos..].find('<').map(|i| pos + i) {
        let Some(close) = text[open + 1..].find('>').map(|i| open + 1 + i) else {
            break;
        };
        if close > open + 1 {
            tokens.push((open, close + 1));
            pos = close + 1;
        } else {
            pos = open + 1;
        }
    }
    tokens
}

/// Returns the text between the brackets of a token.
fn token_body(text: &str, (start, end): (usize, usize)) -> &str {
    &text[start + 1..end - 1]
}

/// Parses the banner sent by the server on connect.
///
/// ```text
/// 220 <free text> <cap1.cap2> <message-id>
/// ```
///
/// The first `<...>` token holds the capabilities; the token that ends the
/// line holds the message id. When the banner has a single trailing token
/// it serves as both.
///
/// # Errors
///
/// Returns [`Error::InvalidGreeting`] if the line is not a status line and
/// [`Error::ConnectionFailed`] if the code is not 220.
pub fn parse_greeting(line: &str) -> Result<Greeting> {
    let (code, rest) =
        split_status(line).ok_or_else(|| Error::InvalidGreeting(line.to_string()))?;
    if code != ReplyCode::BANNER {
        return Err(Error::ConnectionFailed {
            line: line.to_string(),
        });
    }

    let tokens = bracket_tokens(rest);

    let capabilities: Vec<String> = tokens
        .first()
        .map(|&token| {
            token_body(rest, token)
                .split('.')
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let message_id = tokens
        .last()
        .filter(|&&(_, end)| rest[end..].trim_matches(is_space).is_empty())
        .map(|&token| token_body(rest, token).to_string())
        .unwrap_or_default();

    let mut message = String::with_capacity(rest.len());
    let mut pos = 0;
    for &(start, end) in &tokens {
        message.push_str(&rest[pos..start]);
        pos = end;
    }
    message.push_str(&rest[pos..]);

    Ok(Greeting {
        code,
        ok: true,
        message: message.trim_matches(is_space).to_string(),
        capabilities,
        message_id,
    })
}

/// Splits a leading `"<non-empty, quote-free text>"`.
fn quoted(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix('"')?;
    let close = body.find('"')?;
    if close == 0 {
        return None;
    }
    Some((&body[..close], &body[close + 1..]))
}

/// Strips at least one leading whitespace character.
fn whitespace1(input: &str) -> Option<&str> {
    let rest = input.trim_start_matches(is_space);
    (rest.len() < input.len()).then_some(rest)
}

/// Splits a leading non-empty run of non-whitespace characters.
fn word(input: &str) -> Option<(&str, &str)> {
    let end = input.find(is_space).unwrap_or(input.len());
    (end > 0).then(|| input.split_at(end))
}

/// Parses a definition header.
///
/// ```text
/// 151 "<headword>" <database> "<description>"
/// ```
///
/// Anything after the closing quote of the description is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidDefinitionHeader`] if the line does not match.
pub fn parse_definition_header(line: &str) -> Result<DefinitionHeader> {
    let fields = || -> Option<DefinitionHeader> {
        let rest = whitespace1(line.strip_prefix("151")?)?;
        let (headword, rest) = quoted(rest)?;
        let (database, rest) = word(whitespace1(rest)?)?;
        let (description, _) = quoted(whitespace1(rest)?)?;
        Some(DefinitionHeader {
            headword: headword.to_string(),
            database: database.to_string(),
            description: description.to_string(),
        })
    };
    fields().ok_or_else(|| Error::InvalidDefinitionHeader(line.to_string()))
}

/// Parses a `<name> "<text>"` entry, as used by `MATCH`, `SHOW DATABASES`
/// and `SHOW STRATEGIES` bodies.
///
/// The quoted text runs to the final quote on the line, so it may itself
/// contain quotes. Returns `None` for lines that do not match.
#[must_use]
pub fn parse_entry(line: &str) -> Option<(String, String)> {
    let (name, rest) = word(line)?;
    let quoted = whitespace1(rest)?;
    let text = quoted.strip_prefix('"')?.strip_suffix('"')?;
    if text.is_empty() || text.chars().any(is_line_break) {
        return None;
    }
    Some((name.to_string(), text.to_string()))
}

/// Reads the count announced at the start of a status message
/// (`"3 definitions retrieved"` → 3). Missing or oversized counts yield 0.
#[must_use]
pub fn parse_count(message: Option<&str>) -> usize {
    let Some(message) = message else {
        return 0;
    };
    let digits = message
        .find(|c: char| !c.is_ascii_digit())
        .map_or(message, |end| &message[..end]);
    digits.parse().unwrap_or(0)
}

/// Returns true if `line` ends a text body.
#[must_use]
pub fn is_terminator(line: &str) -> bool {
    line == TERMINATOR
}
