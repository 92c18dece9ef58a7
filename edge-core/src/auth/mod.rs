// Authentication for the Edge management API

use crate::logging::redact;
use base64::Engine;
use std::fmt;

/// Basic-auth credentials of an organization administrator.
///
/// Edge management calls carry the username and password on every request;
/// no session or token is cached.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Value of the `Authorization` header for these credentials
    pub fn basic_header(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_header_encodes_user_and_password() {
        let creds = Credentials::new("Aladdin", "open sesame");
        assert_eq!(creds.basic_header(), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("orgadmin@example.com", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("orgadmin@example.com"));
        assert!(!printed.contains("hunter2"));
    }
}
