//! Outbound Mail Transport
//!
//! [`Mailer`] is the seam used by features that send email.
//! - [`ResendMailer`] posts to the Resend HTTP API
//! - [`LogMailer`] only logs, used when no API key is configured

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Resend send-email endpoint
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// A single outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    /// Network or client-side failure
    #[error("Mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Mail provider rejected message with status {0}")]
    Rejected(u16),
}

/// Mail delivery port
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Resend HTTP API client
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            from: from.into(),
            endpoint: RESEND_API_URL.to_string(),
        })
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let payload = ResendPayload {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(status.as_u16()));
        }

        Ok(())
    }
}

impl fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendMailer")
            .field("api_key", &"[REDACTED]")
            .field("from", &self.from)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Mailer that records messages in the log instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Mail delivery disabled, message not sent"
        );
        Ok(())
    }
}
