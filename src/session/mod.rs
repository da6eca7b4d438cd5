use serde::{Deserialize, Serialize};
use std::fmt;

pub mod store;

pub const SCHEMA_VERSION: u32 = 1;

/// Authenticated API session. Created at login, dropped at logout or when the
/// server rejects the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// What survives a restart: the bearer token and the pinned assistant thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub schema_version: u32,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl Default for StoredSession {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            token: None,
            thread_id: None,
        }
    }
}

impl StoredSession {
    pub fn session(&self) -> Option<Session> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(Session::new)
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, StoredSession};

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", Session::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn empty_token_does_not_restore_a_session() {
        let stored = StoredSession {
            token: Some(String::new()),
            ..StoredSession::default()
        };
        assert!(stored.session().is_none());
    }
}
