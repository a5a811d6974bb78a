// Shared test helpers: settings builders and an in-process fake SMTP server.
//
// Other test files pull this in with `mod helpers;`.

#![allow(dead_code)] // Each test binary uses a different subset

use std::io::Write;

use endpoint_checker::{EmailConfig, UrlConfig};
use tempfile::NamedTempFile;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Settings for `urls` with the given timeout and email disabled.
pub fn settings_for(urls: &[String], timeout_seconds: u64) -> UrlConfig {
    let json = serde_json::json!({
        "Urls": urls,
        "TimeoutSeconds": timeout_seconds,
    });
    UrlConfig::from_json(&json.to_string()).expect("valid settings")
}

/// Email settings pointing at a plain SMTP server on localhost.
pub fn local_email(port: u16) -> EmailConfig {
    EmailConfig {
        smtp_server: "127.0.0.1".to_string(),
        smtp_port: port,
        from_address: "checker@example.com".to_string(),
        to_address: "ops@example.com".to_string(),
        use_ssl: false,
        ..Default::default()
    }
}

/// A localhost port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

/// Writes `contents` to a temporary settings file.
pub fn write_settings_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write settings");
    file.flush().expect("Failed to flush settings");
    file
}

/// What the fake SMTP server saw during one session.
#[derive(Debug, Default)]
pub struct SmtpTranscript {
    /// Command lines, in order (message data excluded)
    pub commands: Vec<String>,
    /// Message data between DATA and the terminating dot
    pub data: String,
}

impl SmtpTranscript {
    pub fn has_command(&self, prefix: &str) -> bool {
        self.commands
            .iter()
            .any(|c| c.to_ascii_uppercase().starts_with(prefix))
    }
}

/// Starts a plain-text SMTP server that accepts one session and records it.
///
/// Advertises `AUTH PLAIN` and accepts any credentials and any message.
pub async fn spawn_fake_smtp() -> (u16, JoinHandle<SmtpTranscript>) {
    let (port, sessions) = spawn_fake_smtp_sessions(1).await;
    let handle = tokio::spawn(async move {
        let mut transcripts = sessions.await.expect("fake SMTP task");
        transcripts.pop().unwrap_or_default()
    });
    (port, handle)
}

/// Like `spawn_fake_smtp`, but serves `count` sessions one after another.
///
/// Never advertises STARTTLS, so a client that only prefers TLS has to
/// reconnect in plain text.
pub async fn spawn_fake_smtp_sessions(count: usize) -> (u16, JoinHandle<Vec<SmtpTranscript>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake SMTP server");
    let port = listener.local_addr().expect("local addr").port();

    let handle = tokio::spawn(async move {
        let mut transcripts = Vec::with_capacity(count);
        for _ in 0..count {
            let (stream, _) = listener.accept().await.expect("accept");
            transcripts.push(serve_smtp_session(stream).await);
        }
        transcripts
    });

    (port, handle)
}

async fn serve_smtp_session(stream: TcpStream) -> SmtpTranscript {
    let mut transcript = SmtpTranscript::default();
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    write_half
        .write_all(b"220 fake.smtp ESMTP ready\r\n")
        .await
        .expect("greeting");

    let mut in_data = false;
    let mut awaiting_auth_response = false;
    while let Ok(Some(line)) = lines.next_line().await {
        if in_data {
            if line == "." {
                in_data = false;
                write_half.write_all(b"250 2.0.0 Queued\r\n").await.ok();
            } else {
                transcript.data.push_str(&line);
                transcript.data.push('\n');
            }
            continue;
        }
        if awaiting_auth_response {
            awaiting_auth_response = false;
            write_half
                .write_all(b"235 2.7.0 Authentication successful\r\n")
                .await
                .ok();
            continue;
        }

        transcript.commands.push(line.clone());
        let upper = line.to_ascii_uppercase();
        let reply: &[u8] = if upper.starts_with("EHLO") {
            b"250-fake.smtp\r\n250 AUTH PLAIN\r\n"
        } else if upper == "AUTH PLAIN" {
            awaiting_auth_response = true;
            b"334 \r\n"
        } else if upper.starts_with("AUTH") {
            b"235 2.7.0 Authentication successful\r\n"
        } else if upper == "DATA" {
            in_data = true;
            b"354 End data with <CR><LF>.<CR><LF>\r\n"
        } else if upper == "QUIT" {
            write_half.write_all(b"221 2.0.0 Bye\r\n").await.ok();
            break;
        } else {
            b"250 2.0.0 OK\r\n"
        };
        write_half.write_all(reply).await.ok();
    }
    transcript
}

/// Starts an HTTP server that answers one request with `status_line`
/// (for example `HTTP/1.1 503 Down for Maintenance`) and an empty body.
pub async fn spawn_raw_http(status_line: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind raw HTTP server");
    let port = listener.local_addr().expect("local addr").port();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.is_empty() {
                break;
            }
        }
        let response =
            format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        write_half.write_all(response.as_bytes()).await.ok();
        write_half.shutdown().await.ok();
    });

    (format!("http://127.0.0.1:{port}/"), handle)
}
