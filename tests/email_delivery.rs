//! Tests for SMTP delivery against an in-process fake server.

use endpoint_checker::notify::send_report;
use mail_parser::MessageParser;
use endpoint_checker::{run_check, Delivery, DeliveryError, RunMode};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

mod helpers;

#[tokio::test]
async fn test_all_successful_run_emails_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (smtp_port, session) = helpers::spawn_fake_smtp().await;
    let mut settings = helpers::settings_for(&[format!("{}/health", server.uri())], 5);
    settings.email = helpers::local_email(smtp_port);

    let mut out = Vec::new();
    let report = run_check(&settings, RunMode::Normal, &mut out)
        .await
        .expect("run should complete");

    assert_eq!(report.delivery, Delivery::Email);
    assert_eq!(
        report.report,
        "✓ All URLs returned successful responses (200 OK)"
    );
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Report sent to ops@example.com"));
    assert!(!printed.contains("All URLs returned"), "report is not printed when emailed");

    let transcript = session.await.expect("fake SMTP task");
    assert!(transcript.has_command("EHLO"));
    assert!(transcript.has_command("MAIL FROM:<CHECKER@EXAMPLE.COM>"));
    assert!(transcript.has_command("RCPT TO:<OPS@EXAMPLE.COM>"));
    assert!(!transcript.has_command("AUTH"), "no credentials configured");
    assert!(transcript.data.contains("Subject: URL Check Results"));
    assert!(transcript.data.contains("multipart/alternative"));

    let message = MessageParser::default()
        .parse(transcript.data.as_bytes())
        .expect("message should parse");
    let text = message.body_text(0).expect("text part");
    let html = message.body_html(0).expect("HTML part");
    assert!(text.contains("✓ All URLs returned successful responses (200 OK)"));
    assert!(html.contains("<body>✓ All URLs returned successful responses (200 OK)</body>"));
    assert!(html.contains("font-family: 'Courier New', Courier, monospace;"));
    assert!(html.contains("white-space: pre;"));
}

#[tokio::test]
async fn test_html_part_is_escaped() {
    let (smtp_port, session) = helpers::spawn_fake_smtp().await;
    let email = helpers::local_email(smtp_port);
    let report = "│ https://a.example/?q=<x>&y=1 │ 404        │ Not Found │";

    send_report(&email, report)
        .await
        .expect("delivery should succeed");

    let transcript = session.await.expect("fake SMTP task");
    let message = MessageParser::default()
        .parse(transcript.data.as_bytes())
        .expect("message should parse");
    let text = message.body_text(0).expect("text part");
    let html = message.body_html(0).expect("HTML part");
    assert!(text.contains(report));
    assert!(html.contains("https://a.example/?q=&lt;x&gt;&amp;y=1"));
    assert!(!html.contains("<x>"));
}

#[tokio::test]
async fn test_use_ssl_without_starttls_reconnects_in_plain_text() {
    let (smtp_port, sessions) = helpers::spawn_fake_smtp_sessions(2).await;
    let mut email = helpers::local_email(smtp_port);
    email.use_ssl = true;

    send_report(&email, "report body")
        .await
        .expect("delivery should fall back to plain text");

    let transcripts = sessions.await.expect("fake SMTP task");
    assert_eq!(transcripts.len(), 2);

    // First session ends after EHLO: STARTTLS is not offered
    assert_eq!(transcripts[0].commands.len(), 1);
    assert!(transcripts[0].has_command("EHLO"));
    assert!(transcripts[0].data.is_empty());

    let commands: Vec<String> = transcripts[1]
        .commands
        .iter()
        .map(|c| c.to_ascii_uppercase())
        .collect();
    assert!(commands[0].starts_with("EHLO"));
    assert_eq!(
        &commands[1..],
        [
            "MAIL FROM:<CHECKER@EXAMPLE.COM>",
            "RCPT TO:<OPS@EXAMPLE.COM>",
            "DATA",
            "QUIT"
        ]
    );
    assert!(transcripts[1].data.contains("Subject: URL Check Results"));
}

#[tokio::test]
async fn test_malformed_sender_is_address_error() {
    let mut email = helpers::local_email(helpers::closed_port().await);
    email.from_address = "checker at example.com".to_string();

    match send_report(&email, "report body").await {
        Err(DeliveryError::Address { field, value }) => {
            assert_eq!(field, "FromAddress");
            assert_eq!(value, "checker at example.com");
        }
        other => panic!("expected an address error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_credentials_trigger_authentication() {
    let (smtp_port, session) = helpers::spawn_fake_smtp().await;
    let mut email = helpers::local_email(smtp_port);
    email.username = Some("bot".to_string());
    email.password = Some("secret".to_string());
    email.subject = "Nightly sweep".to_string();

    send_report(&email, "report body")
        .await
        .expect("delivery should succeed");

    let transcript = session.await.expect("fake SMTP task");
    assert!(transcript.has_command("AUTH"));
    let auth_index = transcript
        .commands
        .iter()
        .position(|c| c.to_ascii_uppercase().starts_with("AUTH"))
        .unwrap();
    let mail_index = transcript
        .commands
        .iter()
        .position(|c| c.to_ascii_uppercase().starts_with("MAIL FROM"))
        .unwrap();
    assert!(auth_index < mail_index, "authenticate before sending");
    assert!(transcript.data.contains("Subject: Nightly sweep"));
}

#[tokio::test]
async fn test_unreachable_server_is_connect_error() {
    let email = helpers::local_email(helpers::closed_port().await);

    let err = send_report(&email, "report body")
        .await
        .expect_err("nothing is listening");

    match err {
        DeliveryError::Connect { server, port, .. } => {
            assert_eq!(server, "127.0.0.1");
            assert_eq!(port, email.smtp_port);
        }
        other => panic!("expected a connect error, got {other:?}"),
    }
}
