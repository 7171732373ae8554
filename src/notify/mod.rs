//! Findings report delivery
//!
//! Emails the formatted repository findings plus the pull-request link once
//! a run completes. Delivery is best-effort: a failure here is logged by
//! the pipeline and never affects the scan results.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::EmailConfig;
use crate::error::NotifyError;

/// Delivery seam for the findings report.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_report(&self, findings: &str, pr_link: &str) -> Result<(), NotifyError>;
}

/// SMTP reporter with STARTTLS and credential auth.
///
/// Credentials come from the `EMAIL_SENDER` / `EMAIL_PASSWORD` environment
/// variables; host, port, and recipient from configuration.
pub struct EmailReporter {
    config: EmailConfig,
    sender: String,
    password: String,
}

impl EmailReporter {
    pub fn new(config: EmailConfig) -> Result<Self, NotifyError> {
        let sender = std::env::var("EMAIL_SENDER")
            .ok()
            .or_else(|| config.sender.clone())
            .ok_or(NotifyError::MissingCredentials)?;
        let password =
            std::env::var("EMAIL_PASSWORD").map_err(|_| NotifyError::MissingCredentials)?;

        Ok(Self {
            config,
            sender,
            password,
        })
    }

    fn build_message(&self, findings: &str, pr_link: &str) -> Result<Message, NotifyError> {
        let from: Mailbox = self.sender.parse()?;
        let to: Mailbox = self.config.recipient.parse()?;

        let body = format!(
            "Security scan completed.\nFindings: {findings}\nPull Request: {pr_link}"
        );

        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject("Codesentry Security Report")
            .body(body)?)
    }
}

#[async_trait]
impl Notifier for EmailReporter {
    async fn send_report(&self, findings: &str, pr_link: &str) -> Result<(), NotifyError> {
        let message = self.build_message(findings, pr_link)?;

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .credentials(Credentials::new(self.sender.clone(), self.password.clone()))
                .build();

        transport.send(message).await?;
        info!(recipient = %self.config.recipient, "report email sent");
        Ok(())
    }
}
