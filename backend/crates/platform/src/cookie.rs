//! Session Cookie
//!
//! [`SessionCookie`] describes the single cookie that carries the session
//! token and renders its `Set-Cookie` values. [`read_cookie`] reads a
//! cookie back out of a request.

use std::fmt;
use std::time::Duration;

use axum::http::header::{COOKIE, InvalidHeaderValue};
use axum::http::{HeaderMap, HeaderValue};

/// `SameSite` attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        })
    }
}

/// Session cookie attributes
///
/// Always `HttpOnly` with `Path=/`. `Secure` is off only for plain-HTTP
/// development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: &'static str,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age: Duration,
}

impl SessionCookie {
    /// `Set-Cookie` value carrying `token`
    pub fn issue(&self, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::try_from(self.render(token, self.max_age.as_secs()))
    }

    /// `Set-Cookie` value that makes the browser drop the cookie
    ///
    /// Attributes are repeated because browsers match on them.
    pub fn expire(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::try_from(self.render("", 0))
    }

    fn render(&self, value: &str, max_age: u64) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!(
            "{}={}; HttpOnly{}; SameSite={}; Path=/; Max-Age={}",
            self.name, value, secure, self.same_site, max_age
        )
    }
}

/// Value of cookie `name` across all `Cookie` headers; empty counts as absent
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|raw| raw.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
