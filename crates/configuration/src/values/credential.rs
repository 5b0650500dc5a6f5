use std::fmt;

use serde::Deserialize;

/// A database credential resolved from its secret.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    /// Parse a credential from the JSON secret string it is stored as.
    pub fn parse(secret: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
