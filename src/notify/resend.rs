//! Resend email delivery

use super::{Notification, Notifier, NotifyError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Bound on the synchronous notify call so a slow delivery API can never
/// hold a call turn open.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_SENDER: &str = "onboarding@resend.dev";

/// Configuration for Resend delivery
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub api_key: Option<String>,
    pub sender: String,
    pub recipient: Option<String>,
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("RESEND_API_KEY").ok(),
            sender: std::env::var("SENDER_EMAIL").unwrap_or_else(|_| DEFAULT_SENDER.to_string()),
            recipient: std::env::var("RECIPIENT_EMAIL").ok(),
        }
    }
}

/// Notifier backed by the Resend email API
pub struct ResendNotifier {
    client: Client,
    config: NotifyConfig,
    endpoint: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

impl ResendNotifier {
    pub fn new(config: NotifyConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }

    /// Whether delivery can actually happen (key and recipient present)
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some() && self.config.recipient.is_some()
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let Some(api_key) = &self.config.api_key else {
            return Err(NotifyError::Disabled("RESEND_API_KEY not set"));
        };
        let Some(recipient) = &self.config.recipient else {
            return Err(NotifyError::Disabled("RECIPIENT_EMAIL not set"));
        };

        let request = SendEmailRequest {
            from: &self.config.sender,
            to: [recipient.as_str()],
            subject: subject(notification),
            html: render_html(notification),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

fn subject(notification: &Notification) -> String {
    format!(
        "\u{1F4DE} New Call for Mr. Anmol from {}",
        notification.caller_name
    )
}

/// Escape caller-supplied text before it lands in the email body. The
/// name, phone, and reason fields all come straight off the wire.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_html(notification: &Notification) -> String {
    let timestamp = notification.received_at.format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"<html>
    <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
        <div style="max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd; border-radius: 10px;">
            <h2 style="color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px;">
                &#128222; New Call Received
            </h2>

            <div style="background-color: #f8f9fa; padding: 15px; border-radius: 5px; margin: 20px 0;">
                <p style="margin: 10px 0;"><strong>&#128100; Caller Name:</strong> {name}</p>
                <p style="margin: 10px 0;"><strong>&#128241; Phone Number:</strong> {phone}</p>
                <p style="margin: 10px 0;"><strong>&#9200; Time:</strong> {timestamp}</p>
            </div>

            <div style="background-color: #fff3cd; padding: 15px; border-left: 4px solid #ffc107; margin: 20px 0;">
                <h3 style="margin-top: 0; color: #856404;">&#128188; Reason for Call:</h3>
                <p style="margin: 0;">{reason}</p>
            </div>

            <hr style="border: none; border-top: 1px solid #ddd; margin: 20px 0;">

            <p style="color: #666; font-size: 12px; text-align: center;">
                This is an automated notification from your AI Call Assistant
            </p>
        </div>
    </body>
</html>"#,
        name = escape_html(&notification.caller_name),
        phone = escape_html(&notification.phone),
        reason = escape_html(&notification.reason),
        timestamp = timestamp,
    )
}
