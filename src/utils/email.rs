use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;
use std::env;

use crate::utils::error::CustomError;

/// SMTP configuration for outbound mail
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    /// Load email configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "465".to_string())
                .parse()
                .map_err(|_| "SMTP_PORT must be a valid number")?,
            smtp_username: env::var("SMTP_USERNAME").map_err(|_| "SMTP_USERNAME is required")?,
            smtp_password: env::var("SMTP_PASSWORD").map_err(|_| "SMTP_PASSWORD is required")?,
            from_email: env::var("SMTP_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@my-blog.local".to_string()),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "My Blog".to_string()),
        })
    }
}

/// Outbound mail seam used by the share handler.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one plain text message from the configured sender to `to_email`.
    async fn send_mail(&self, to_email: &str, subject: &str, body: &str)
    -> Result<(), CustomError>;
}

/// Sends mail through an SMTP relay
pub struct SmtpMailer {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        // Port 465 uses implicit TLS (SMTPS)
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        Ok(Self { config, transport })
    }
}

fn build_message(
    config: &EmailConfig,
    to_email: &str,
    subject: &str,
    body: &str,
) -> Result<Message, String> {
    let from_address = format!("{} <{}>", config.from_name, config.from_email);

    Message::builder()
        .from(
            from_address
                .parse()
                .map_err(|e| format!("Invalid from address: {}", e))?,
        )
        .to(to_email
            .parse()
            .map_err(|e| format!("Invalid to address: {}", e))?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| format!("Failed to build email: {}", e))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_mail(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), CustomError> {
        let email = build_message(&self.config, to_email, subject, body)
            .map_err(CustomError::InternalServerError)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

/// Writes messages to the log instead of sending them. Used when no SMTP
/// credentials are configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_mail(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), CustomError> {
        info!("mail to={} subject={:?}\n{}", to_email, subject, body);
        Ok(())
    }
}
