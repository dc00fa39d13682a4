//! Welcome Notification
//!
//! Sends the post-registration email on a detached task. Delivery failures
//! are logged and never reach the registration flow.

use std::sync::Arc;

use platform::mail::{Mailer, OutgoingEmail};
use tokio::task::JoinHandle;

use crate::domain::value_object::email::Email;

/// Subject line of the welcome email
pub const WELCOME_SUBJECT: &str = "Welcome aboard!";

/// Fire-and-forget welcome email dispatcher
pub struct WelcomeNotifier<M> {
    mailer: Arc<M>,
}

impl<M> Clone for WelcomeNotifier<M> {
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
        }
    }
}

impl<M> WelcomeNotifier<M>
where
    M: Mailer + Sync + 'static,
{
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }

    /// Build the welcome message for `to`
    pub fn welcome_email(to: &Email) -> OutgoingEmail {
        let address = escape_html(to.as_str());
        OutgoingEmail {
            to: to.as_str().to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            html: format!(
                "<h1>Welcome!</h1>\
                 <p>Thanks for signing up with email: {}</p>\
                 <p>You're all set to get started.</p>",
                address
            ),
        }
    }

    /// Send the welcome email in the background
    ///
    /// Returns immediately. The handle is only useful to tests; callers
    /// normally drop it.
    pub fn dispatch(&self, to: &Email) -> JoinHandle<()> {
        let mailer = Arc::clone(&self.mailer);
        let message = Self::welcome_email(to);

        tokio::spawn(async move {
            match mailer.send(&message).await {
                Ok(()) => tracing::debug!(to = %message.to, "Welcome email sent"),
                Err(e) => tracing::error!(
                    to = %message.to,
                    error = %e,
                    "Failed to send welcome email"
                ),
            }
        })
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use platform::mail::MailError;
    use std::sync::Mutex;

    /// Mailer that records every message it is asked to send
    #[derive(Default)]
    pub(crate) struct RecordingMailer {
        pub sent: Mutex<Vec<OutgoingEmail>>,
    }

    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    /// Mailer whose provider always rejects
    pub(crate) struct RejectingMailer;

    impl Mailer for RejectingMailer {
        async fn send(&self, _email: &OutgoingEmail) -> Result<(), MailError> {
            Err(MailError::Rejected(503))
        }
    }

    #[test]
    fn test_welcome_email_content() {
        let email = Email::new("a@x.com").unwrap();
        let message = WelcomeNotifier::<RecordingMailer>::welcome_email(&email);

        assert_eq!(message.to, "a@x.com");
        assert_eq!(message.subject, "Welcome aboard!");
        assert!(message.html.contains("a@x.com"));
    }

    #[test]
    fn test_welcome_email_escapes_address() {
        let email = Email::from_db("<b>@x.com");
        let message = WelcomeNotifier::<RecordingMailer>::welcome_email(&email);
        assert!(message.html.contains("&lt;b&gt;@x.com"));
    }

    #[tokio::test]
    async fn test_dispatch_sends_in_background() {
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = WelcomeNotifier::new(Arc::clone(&mailer));

        notifier
            .dispatch(&Email::new("a@x.com").unwrap())
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@x.com");
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_contained() {
        let notifier = WelcomeNotifier::new(Arc::new(RejectingMailer));
        let result = notifier.dispatch(&Email::new("a@x.com").unwrap()).await;
        assert!(result.is_ok());
    }
}
