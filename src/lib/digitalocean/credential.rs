use std::fmt;

/// Normalized DigitalOcean API token.
///
/// The only way to build one is through [`ApiCredential::new`], so every token that reaches
/// the HTTP layer has been trimmed and unquoted exactly once. An empty credential is valid and
/// marks a degraded start.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(raw: &str) -> Self {
        Self(normalize_token(raw))
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_missing() { "<empty>" } else { "<redacted>" };
        f.debug_tuple("ApiCredential").field(&shown).finish()
    }
}

/// Trim whitespace, then drop one single quote from each end if present.
pub fn normalize_token(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('\'').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('\'').unwrap_or(unquoted);
    unquoted.to_string()
}
