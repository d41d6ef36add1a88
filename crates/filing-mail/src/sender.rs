//! Message building, mail transports and the digest sender.

use crate::error::{error_chain, MailError};
use crate::templates::Digest;
use filing_core::{AppConfig, FilingKey};
use lettre::message::header::{Header, HeaderName, HeaderValue};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// `X-Priority` header; `1` is highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XPriority(pub u8);

impl XPriority {
    /// Highest priority.
    pub const HIGH: Self = Self(1);
}

impl Header for XPriority {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Priority")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.trim().parse()?))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.to_string())
    }
}

/// Subject line of the digest email for `key`.
pub fn subject_for(key: &FilingKey) -> String {
    format!("SEC Filing Alert for Item {key}")
}

/// Build the digest email: one `To` header listing every recipient, one
/// envelope recipient per address, and a single HTML alternative part.
pub fn build_message(digest: &Digest, from: &str, recipients: &[String]) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(parse_mailbox(from)?)
        .subject(subject_for(&digest.key))
        .header(XPriority::HIGH);

    for recipient in recipients {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    let message = builder.multipart(
        MultiPart::alternative().singlepart(SinglePart::html(digest.html.clone())),
    )?;
    Ok(message)
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}

/// Delivers a finished message
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand `message` to the mail system.
    async fn deliver(&self, message: Message) -> Result<(), MailError>;

    /// Build the message for `digest` and deliver it.
    async fn deliver_digest(
        &self,
        digest: &Digest,
        from: &str,
        recipients: &[String],
    ) -> Result<(), MailError> {
        let message = build_message(digest, from, recipients)?;
        self.deliver(message).await
    }
}

/// Plaintext SMTP relay, no TLS and no authentication.
pub struct SmtpMailTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Relay through `host:port` without TLS.
    pub fn plaintext(host: &str, port: u16) -> Self {
        let inner = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();
        Self { inner }
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        self.inner.send(message).await?;
        Ok(())
    }
}

/// Logs digests instead of sending them (`--dry-run`). Addresses are not
/// parsed, so a configuration without mail settings still works.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyTransport;

#[async_trait::async_trait]
impl MailTransport for LogOnlyTransport {
    async fn deliver_digest(
        &self,
        digest: &Digest,
        from: &str,
        recipients: &[String],
    ) -> Result<(), MailError> {
        tracing::info!(
            key = %digest.key,
            from = %from,
            recipients = %recipients.join(", "),
            "Dry run, not sending \"{}\" ({} bytes of HTML)",
            subject_for(&digest.key),
            digest.html.len()
        );
        tracing::debug!("{}", digest.html);
        Ok(())
    }

    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect();
        tracing::info!(
            recipients = %recipients.join(", "),
            "Dry run, not sending {} byte message",
            message.formatted().len()
        );
        tracing::debug!("{}", String::from_utf8_lossy(&message.formatted()));
        Ok(())
    }
}

/// What happened to one key's digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the transport
    Sent,
    /// Nothing to send
    Skipped,
    /// Building or delivering failed; already logged
    Failed(String),
}

/// Sends digests to the configured distribution list.
pub struct DigestSender<T> {
    from: String,
    recipients: Vec<String>,
    transport: T,
}

impl<T: MailTransport> DigestSender<T> {
    /// Sender from `from` to every address in `recipients`.
    pub fn new(from: impl Into<String>, recipients: Vec<String>, transport: T) -> Self {
        Self {
            from: from.into(),
            recipients,
            transport,
        }
    }

    /// Sender using the configured `sender_email` and `recipient_emails`.
    pub fn from_config(config: &AppConfig, transport: T) -> Self {
        Self::new(
            config.sender_email.clone(),
            config.recipient_emails.clone(),
            transport,
        )
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `digest` if there is one. Never fails: errors are logged and
    /// reported in the outcome.
    pub async fn send(&self, digest: Option<&Digest>, key: &FilingKey) -> SendOutcome {
        let Some(digest) = digest else {
            tracing::info!(key = %key, "No filings found for Item {}. Skipping email sending.", key);
            return SendOutcome::Skipped;
        };

        match self.try_send(digest).await {
            Ok(()) => {
                tracing::info!(key = %key, "Email sent successfully for Item {}.", key);
                SendOutcome::Sent
            }
            Err(e) => {
                tracing::error!(
                    key = %key,
                    error = ?e,
                    "Failed to send email for Item {}: {}",
                    key,
                    error_chain(&e)
                );
                SendOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_send(&self, digest: &Digest) -> Result<(), MailError> {
        self.transport
            .deliver_digest(digest, &self.from, &self.recipients)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filing_core::FilingRecord;

    fn digest() -> Digest {
        let record = FilingRecord {
            form_file: "8-K".to_string(),
            entity_name: "Acme Corp".to_string(),
            filing_url: "https://www.sec.gov/Archives/a.htm".to_string(),
            filing_date: "2024-03-14".to_string(),
        };
        crate::templates::build_digest(&[record], &FilingKey::new("5.02").unwrap()).unwrap()
    }

    #[test]
    fn test_message_headers() {
        let recipients = vec!["a@example.test".to_string(), "b@example.test".to_string()];
        let message = build_message(&digest(), "alerts@example.test", &recipients).unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: SEC Filing Alert for Item 5.02"));
        assert!(raw.contains("From: alerts@example.test"));
        assert!(raw.contains("To: a@example.test, b@example.test"));
        assert!(raw.contains("X-Priority: 1"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));

        assert_eq!(message.envelope().to().len(), 2);
        assert_eq!(
            message.envelope().from().map(ToString::to_string).as_deref(),
            Some("alerts@example.test")
        );
    }

    #[test]
    fn test_bad_recipient_rejected() {
        let recipients = vec!["not-an-address".to_string()];
        let err = build_message(&digest(), "alerts@example.test", &recipients).unwrap_err();
        assert!(matches!(err, MailError::Address { .. }));
    }

    #[tokio::test]
    async fn test_log_only_skips_address_parsing() {
        let result = LogOnlyTransport.deliver_digest(&digest(), "", &[]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_only_accepts_built_message() {
        let recipients = vec!["a@example.test".to_string()];
        let message = build_message(&digest(), "alerts@example.test", &recipients).unwrap();
        assert!(LogOnlyTransport.deliver(message).await.is_ok());
    }

    #[test]
    fn test_x_priority_parse() {
        assert_eq!(XPriority::parse(" 1 ").unwrap(), XPriority::HIGH);
        assert!(XPriority::parse("urgent").is_err());
    }
}
