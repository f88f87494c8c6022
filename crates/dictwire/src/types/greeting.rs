//! Server banner.

use super::ReplyCode;

/// Information captured from the `220` banner sent on connect.
///
/// ```text
/// 220 dict.example.org dictd 1.12 <auth.mime> <1234.5678@dict.example.org>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// Banner status code.
    pub code: ReplyCode,
    /// Whether the banner carried code 220.
    pub ok: bool,
    /// Banner text with every `<...>` token removed.
    pub message: String,
    /// Capabilities from the first `<...>` token, split on `.`.
    pub capabilities: Vec<String>,
    /// Message id from the trailing `<...>` token (empty if absent).
    pub message_id: String,
}

impl Greeting {
    /// Returns true if the server advertised `capability`.
    #[must_use]
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}
