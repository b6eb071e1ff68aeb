use std::fmt;

use thiserror::Error;

/// Rejected before any network call is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GitHub username is required (set GITHUB_USERNAME or pass --username)")]
    MissingUsername,
    #[error("GitHub token is required (set GITHUB_TOKEN or pass --token)")]
    MissingToken,
}

/// Who to fetch statistics for, and the token used to ask.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    token: String,
}

impl Credentials {
    /// Validate a username/token pair. Blank values count as missing.
    pub fn new(
        username: Option<impl Into<String>>,
        token: Option<impl Into<String>>,
    ) -> Result<Self, ConfigError> {
        let username = non_blank(username).ok_or(ConfigError::MissingUsername)?;
        let token = non_blank(token).ok_or(ConfigError::MissingToken)?;
        Ok(Self { username, token })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// Keep the token out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn non_blank(value: Option<impl Into<String>>) -> Option<String> {
    let value = value?.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
