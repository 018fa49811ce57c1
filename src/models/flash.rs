//! Flash request data models

use std::fmt;

use crate::models::board::Port;

/// Username/password pair injected into the firmware template
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Surrounding whitespace is stripped, as a form field would
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            username: username.as_ref().trim().to_string(),
            password: password.as_ref().trim().to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything a caller supplies to start one flash attempt
#[derive(Debug, Clone)]
pub struct FlashRequest {
    pub credentials: Credentials,
    pub port: Port,
}

impl FlashRequest {
    pub fn new(credentials: Credentials, port: Port) -> Self {
        Self { credentials, port }
    }
}
