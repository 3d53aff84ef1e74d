//! Access-token providers for the catalog source.
//!
//! A provider either yields a non-empty token or fails. There is no fallback
//! to anonymous access.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::TokenError;

/// A bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    fn new(raw: &str, origin: &str) -> Result<Self, TokenError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TokenError::Empty {
                origin: origin.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Something that can hand out a credential for the catalog source.
pub trait TokenProvider {
    fn token(&self) -> Result<AccessToken, TokenError>;
}

/// Reads the token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenProvider for EnvTokenProvider {
    fn token(&self) -> Result<AccessToken, TokenError> {
        let origin = format!("${}", self.var);
        match std::env::var(&self.var) {
            Ok(value) => AccessToken::new(&value, &origin),
            Err(_) => Err(TokenError::Missing { origin }),
        }
    }
}

/// Reads the token from a credentials file; surrounding whitespace is ignored.
#[derive(Debug, Clone)]
pub struct FileTokenProvider {
    path: PathBuf,
}

impl FileTokenProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenProvider for FileTokenProvider {
    fn token(&self) -> Result<AccessToken, TokenError> {
        let origin = self.path.display().to_string();
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => AccessToken::new(&contents, &origin),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(TokenError::Missing { origin }),
            Err(err) => Err(TokenError::Io {
                path: self.path.clone(),
                source: err,
            }),
        }
    }
}

/// A fixed token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: &str) -> Result<Self, TokenError> {
        Ok(Self {
            token: AccessToken::new(token, "static token")?,
        })
    }
}

impl TokenProvider for StaticTokenProvider {
    fn token(&self) -> Result<AccessToken, TokenError> {
        Ok(self.token.clone())
    }
}
