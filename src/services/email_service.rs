use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;

/// Outbound mail transport. One call delivers one message to one recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<(), String>;
}

#[derive(Serialize)]
struct MailpitContact {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
}

#[derive(Serialize)]
struct MailpitPayload {
    #[serde(rename = "From")]
    from: MailpitContact,
    #[serde(rename = "To")]
    to: Vec<MailpitContact>,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "HTML")]
    html: String,
}

#[derive(Serialize)]
struct BrevoSender {
    name: String,
    email: String,
}

#[derive(Serialize)]
struct BrevoRecipient {
    email: String,
}

#[derive(Serialize)]
struct BrevoPayload {
    sender: BrevoSender,
    to: Vec<BrevoRecipient>,
    subject: String,
    #[serde(rename = "textContent")]
    text_content: String,
    #[serde(rename = "htmlContent")]
    html_content: String,
}

/// Brevo HTTP API when an API key is configured, local Mailpit otherwise.
#[derive(Clone)]
pub struct EmailService {
    client: Client,
    is_production: bool,
    api_key: String,
    from_email: String,
    mailpit_url: String,
}

impl EmailService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            is_production: !config.brevo_api_key.is_empty(),
            api_key: config.brevo_api_key.clone(),
            from_email: config.smtp_from.clone(),
            mailpit_url: config.mailpit_url.clone(),
        }
    }

    async fn send_via_brevo(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<(), String> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: "Newsdesk".to_string(),
                email: self.from_email.clone(),
            },
            to: vec![BrevoRecipient {
                email: to.to_string(),
            }],
            subject: subject.to_string(),
            text_content: text.to_string(),
            html_content: html.to_string(),
        };

        let response = self
            .client
            .post("https://api.brevo.com/v3/smtp/email")
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Request error: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("Brevo API error: {}", error_text))
        }
    }

    async fn send_via_mailpit(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<(), String> {
        let payload = MailpitPayload {
            from: MailpitContact {
                name: "Newsdesk".into(),
                email: self.from_email.clone(),
            },
            to: vec![MailpitContact {
                name: "".into(),
                email: to.to_string(),
            }],
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
        };

        let response = self
            .client
            .post(&self.mailpit_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Mailpit request error: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("Mailpit error: {}", error_text))
        }
    }
}

#[async_trait]
impl Mailer for EmailService {
    #[tracing::instrument(name = "Sending email", skip(self, text, html), fields(production = self.is_production))]
    async fn send_email(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<(), String> {
        if self.is_production {
            self.send_via_brevo(to, subject, text, html).await
        } else {
            self.send_via_mailpit(to, subject, text, html).await
        }
    }
}
