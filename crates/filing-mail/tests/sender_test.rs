use filing_core::{FilingKey, FilingRecord};
use filing_mail::{
    build_digest, DigestSender, MailError, MailTransport, SendOutcome, SmtpMailTransport,
};
use lettre::Message;
use std::sync::Mutex;

/// Records every delivered message.
#[derive(Default)]
struct RecordingTransport {
    delivered: Mutex<Vec<Message>>,
}

#[async_trait::async_trait]
impl MailTransport for RecordingTransport {
    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        self.delivered.lock().unwrap().push(message);
        Ok(())
    }
}

fn key() -> FilingKey {
    FilingKey::new("5.02").unwrap()
}

fn records() -> Vec<FilingRecord> {
    vec![FilingRecord {
        form_file: "8-K".to_string(),
        entity_name: "Acme Corp".to_string(),
        filing_url: "https://www.sec.gov/Archives/a.htm".to_string(),
        filing_date: "2024-03-14".to_string(),
    }]
}

fn sender(transport: RecordingTransport) -> DigestSender<RecordingTransport> {
    DigestSender::new(
        "alerts@example.test",
        vec!["a@example.test".to_string(), "b@example.test".to_string()],
        transport,
    )
}

#[tokio::test]
async fn test_no_digest_never_touches_transport() {
    let sender = sender(RecordingTransport::default());

    let digest = build_digest(&[], &key());
    let outcome = sender.send(digest.as_ref(), &key()).await;

    assert_eq!(outcome, SendOutcome::Skipped);
    assert_eq!(sender.transport().delivered.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_digest_delivered_once() {
    let sender = sender(RecordingTransport::default());

    let digest = build_digest(&records(), &key());
    let outcome = sender.send(digest.as_ref(), &key()).await;

    assert_eq!(outcome, SendOutcome::Sent);
    let delivered = sender.transport().delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].envelope().to().len(), 2);
}

#[tokio::test]
async fn test_transport_failure_is_contained() {
    // Nothing listens on port 1, so the connection is refused
    let sender = DigestSender::new(
        "alerts@example.test",
        vec!["a@example.test".to_string()],
        SmtpMailTransport::plaintext("127.0.0.1", 1),
    );

    let digest = build_digest(&records(), &key());
    let outcome = sender.send(digest.as_ref(), &key()).await;

    assert!(matches!(outcome, SendOutcome::Failed(ref reason) if reason.contains("SMTP send failed")));
}

#[tokio::test]
async fn test_bad_sender_address_is_contained() {
    let sender = DigestSender::new(
        "nobody",
        vec!["a@example.test".to_string()],
        RecordingTransport::default(),
    );

    let digest = build_digest(&records(), &key());
    let outcome = sender.send(digest.as_ref(), &key()).await;

    assert!(matches!(outcome, SendOutcome::Failed(_)));
    assert!(sender.transport().delivered.lock().unwrap().is_empty());
}
