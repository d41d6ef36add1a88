use filing_alert::{run, Cli};
use filing_mail::SendOutcome;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAVED_PAGE: &str = r#"
<table class="table"><tbody>
  <tr>
    <td class="filetype"><a href="/Archives/edgar/data/1/a.htm">8-K</a></td>
    <td class="filed">2024-03-14</td>
    <td class="entity-name">Acme Corp</td>
  </tr>
</tbody></table>
"#;

const CONFIG: &str = r#"{
    "fetch_days": 10,
    "search_urls": {
        "5.02": "https://example.test/search?q=502",
        "1.01": "https://example.test/search?q=101"
    },
    "chrome_headless": true,
    "sender_email": "alerts@example.test",
    "recipient_emails": ["a@example.test"],
    "smtp_server": "smtp.example.test"
}"#;

const CONFIG_WITHOUT_MAIL: &str = r#"{
    "search_urls": {"5.02": "https://example.test/search?q=502"}
}"#;

fn workspace() -> (TempDir, PathBuf, PathBuf) {
    workspace_with(CONFIG)
}

fn workspace_with(config_json: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let config = dir.path().join("configuration.json");
    let page = dir.path().join("results.html");
    fs::write(&config, config_json).expect("write config");
    fs::write(&page, SAVED_PAGE).expect("write page");
    (dir, config, page)
}

#[tokio::test]
async fn test_dry_run_against_saved_page() {
    let (_dir, config, page) = workspace();

    let summary = run(Cli {
        config: Some(config),
        keys: vec!["1.01".to_string()],
        dry_run: true,
        page_source: Some(page),
    })
    .await
    .expect("run succeeds");

    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.outcomes[0].key.as_str(), "1.01");
    assert_eq!(summary.outcomes[0].filings_count, 1);
    assert_eq!(summary.outcomes[0].delivery, Some(SendOutcome::Sent));
}

#[tokio::test]
async fn test_dry_run_without_mail_settings() {
    let (_dir, config, page) = workspace_with(CONFIG_WITHOUT_MAIL);

    let summary = run(Cli {
        config: Some(config),
        keys: Vec::new(),
        dry_run: true,
        page_source: Some(page),
    })
    .await
    .expect("run succeeds");

    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.outcomes[0].filings_count, 1);
    assert_eq!(summary.outcomes[0].delivery, Some(SendOutcome::Sent));
    assert_eq!(summary.failures(), 0);
}

#[tokio::test]
async fn test_missing_config_is_fatal() {
    let dir = TempDir::new().expect("create temp dir");

    let result = run(Cli {
        config: Some(dir.path().join("missing.json")),
        keys: Vec::new(),
        dry_run: true,
        page_source: None,
    })
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unknown_key_is_fatal() {
    let (_dir, config, page) = workspace();

    let result = run(Cli {
        config: Some(config),
        keys: vec!["9.01".to_string()],
        dry_run: true,
        page_source: Some(page),
    })
    .await;

    let err = result.expect_err("unknown key rejected");
    assert!(format!("{err:#}").contains("9.01"));
}

#[tokio::test]
async fn test_mail_settings_required_without_dry_run() {
    let (_dir, config, page) = workspace_with(CONFIG_WITHOUT_MAIL);

    let result = run(Cli {
        config: Some(config),
        keys: Vec::new(),
        dry_run: false,
        page_source: Some(page),
    })
    .await;

    assert!(result.is_err());
}
