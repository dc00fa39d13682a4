//! Auth settings shared by the use cases and handlers

use std::time::Duration;

use platform::cookie::{SameSite, SessionCookie};
use platform::token::{DEFAULT_TOKEN_TTL, TokenCodec};

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "auth_token";

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token lifetime, also used as the cookie `Max-Age`
    pub token_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Appended to passwords before hashing
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Secure cookie, for deployments behind HTTPS
    pub fn production() -> Self {
        Self {
            token_ttl: DEFAULT_TOKEN_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }

    /// Cookie without `Secure` so plain-HTTP localhost works
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::production()
        }
    }

    pub fn session_cookie(&self) -> SessionCookie {
        SessionCookie {
            name: SESSION_COOKIE_NAME,
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age: self.token_ttl,
        }
    }

    /// Token codec whose lifetime matches the session cookie
    pub fn token_codec(&self, secret: &[u8]) -> TokenCodec {
        TokenCodec::new(secret, self.token_ttl)
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::production()
    }
}
