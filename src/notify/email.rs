//! SMTP delivery of the report.
//!
//! The message carries the report twice: as the plain-text part and as an
//! HTML alternative that keeps the table aligned with a monospace, `pre`
//! whitespace style. Transport security follows the port convention:
//!
//! | Port  | Security                                   |
//! |-------|--------------------------------------------|
//! | 25    | STARTTLS when the server offers it         |
//! | 587   | STARTTLS required                          |
//! | 465   | TLS from the first byte                    |
//! | other | `UseSsl` ? STARTTLS when offered : plain   |

use log::{debug, info, warn};
use mail_builder::MessageBuilder;
use mail_send::{Credentials, SmtpClient, SmtpClientBuilder};
use tokio::io::{AsyncRead, AsyncWrite};
use validators::prelude::*;

use crate::config::{EmailConfig, SMTP_PORT_RELAY, SMTP_PORT_SUBMISSION, SMTP_PORT_SUBMISSIONS};
use crate::error_handling::DeliveryError;
use crate::initialization::init_crypto_provider;

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// No TLS at all
    None,
    /// Upgrade with STARTTLS if advertised, stay plain otherwise
    Opportunistic,
    /// Upgrade with STARTTLS or fail
    StartTls,
    /// TLS handshake right after connecting
    Implicit,
}

impl SmtpSecurity {
    /// Picks the security mode for `port`; `use_ssl` only matters for
    /// non-standard ports.
    pub fn for_port(port: u16, use_ssl: bool) -> Self {
        match port {
            SMTP_PORT_RELAY => SmtpSecurity::Opportunistic,
            SMTP_PORT_SUBMISSION => SmtpSecurity::StartTls,
            SMTP_PORT_SUBMISSIONS => SmtpSecurity::Implicit,
            _ if use_ssl => SmtpSecurity::Opportunistic,
            _ => SmtpSecurity::None,
        }
    }
}

/// Wraps the report in a minimal HTML document with monospace styling.
pub fn build_html_body(report: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        body {{
            font-family: 'Courier New', Courier, monospace;
            font-size: 12px;
            line-height: 1.4;
            white-space: pre;
            margin: 20px;
        }}
    </style>
</head>
<body>{}</body>
</html>"#,
        html_escape::encode_text(report)
    )
}

// Parsed only to reject malformed addresses before connecting.
#[derive(Validator)]
#[validator(email(comment(Disallow), ip(Allow), local(Allow), at_least_two_labels(Allow), non_ascii(Allow)))]
#[allow(dead_code)]
struct Mailbox {
    local_part: String,
    need_quoted: bool,
    domain_part: validators::models::Host,
}

/// Checks that `value` is a single bare address such as `ops@example.com`.
///
/// # Errors
///
/// Returns `DeliveryError::Address` naming `field` when it is not.
pub fn check_address(field: &'static str, value: &str) -> Result<(), DeliveryError> {
    Mailbox::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| DeliveryError::Address {
            field,
            value: value.to_string(),
        })
}

/// Builds the report message with a text part and an HTML alternative.
pub fn build_message<'x>(email: &'x EmailConfig, report: &'x str, html: &'x str) -> MessageBuilder<'x> {
    MessageBuilder::new()
        .from(email.from_address.trim())
        .to(email.to_address.trim())
        .subject(email.subject.as_str())
        .text_body(report)
        .html_body(html)
}

/// Sends `report` to the configured recipient.
///
/// Connect, optional STARTTLS, optional authentication, send, quit. A failed
/// QUIT after the message was accepted is not an error.
///
/// # Errors
///
/// Returns `DeliveryError::Address` for a malformed sender or recipient,
/// `DeliveryError::Connect` if the session cannot be established
/// (including TLS and authentication failures) and `DeliveryError::Send` if the
/// server rejects the message.
pub async fn send_report(email: &EmailConfig, report: &str) -> Result<(), DeliveryError> {
    check_address("FromAddress", &email.from_address)?;
    check_address("ToAddress", &email.to_address)?;

    let html = build_html_body(report);
    let message = build_message(email, report, &html);

    // The TLS connector is built eagerly, even for plain sessions
    init_crypto_provider();
    let mut builder = SmtpClientBuilder::new(email.smtp_server.clone(), email.smtp_port);
    if email.accept_all_certificates {
        warn!(
            "Certificate validation is disabled for {} (Email.AcceptAllCertificates)",
            email.smtp_server
        );
        builder = builder.allow_invalid_certs();
    }
    if let Some((username, password)) = email.credentials() {
        debug!("Authenticating to {} as {username}", email.smtp_server);
        builder = builder.credentials(Credentials::new(username.to_string(), password.to_string()));
    }

    let security = SmtpSecurity::for_port(email.smtp_port, email.use_ssl);
    debug!(
        "Connecting to {}:{} ({security:?})",
        email.smtp_server, email.smtp_port
    );
    let connect_error = |source| DeliveryError::Connect {
        server: email.smtp_server.clone(),
        port: email.smtp_port,
        source,
    };

    match security {
        SmtpSecurity::None => {
            let client = builder.connect_plain().await.map_err(connect_error)?;
            transmit(client, message).await
        }
        SmtpSecurity::Implicit => {
            let client = builder
                .implicit_tls(true)
                .connect()
                .await
                .map_err(connect_error)?;
            transmit(client, message).await
        }
        SmtpSecurity::StartTls => {
            let client = builder
                .implicit_tls(false)
                .connect()
                .await
                .map_err(connect_error)?;
            transmit(client, message).await
        }
        SmtpSecurity::Opportunistic => {
            let builder = builder.implicit_tls(false);
            match builder.connect().await {
                Ok(client) => transmit(client, message).await,
                Err(mail_send::Error::MissingStartTls) => {
                    info!(
                        "{} does not offer STARTTLS, sending without TLS",
                        email.smtp_server
                    );
                    let client = builder.connect_plain().await.map_err(connect_error)?;
                    transmit(client, message).await
                }
                Err(e) => Err(connect_error(e)),
            }
        }
    }
}

async fn transmit<T>(mut client: SmtpClient<T>, message: MessageBuilder<'_>) -> Result<(), DeliveryError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    client.send(message).await.map_err(DeliveryError::Send)?;
    if let Err(e) = client.quit().await {
        debug!("SMTP QUIT failed after delivery: {e}");
    }
    Ok(())
}
