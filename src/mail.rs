use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::SmtpConfig;
use crate::error::BackendError;
use crate::types::AlertMessage;

#[async_trait]
pub trait AlertTransport: Send + Sync {
    async fn send(&self, message: &AlertMessage) -> Result<(), BackendError>;
}

/// Plain SMTP relay; STARTTLS plus login only when credentials are configured.
pub struct SmtpAlertTransport {
    config: SmtpConfig,
}

impl SmtpAlertTransport {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, BackendError> {
        let builder = match &self.config.credentials {
            Some(creds) => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.server)
                    .map_err(|e| BackendError::Smtp(e.to_string()))?
                    .credentials(Credentials::new(
                        creds.username.clone(),
                        creds.password.clone(),
                    ))
            }
            None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.server),
        };

        Ok(builder
            .port(self.config.port)
            .timeout(Some(self.config.timeout))
            .build())
    }
}

#[async_trait]
impl AlertTransport for SmtpAlertTransport {
    async fn send(&self, message: &AlertMessage) -> Result<(), BackendError> {
        let email = build_email(message)?;
        debug!(
            "Connecting to SMTP server {}:{} (auth: {})",
            self.config.server,
            self.config.port,
            self.config.credentials.is_some()
        );
        let response = self
            .transport()?
            .send(email)
            .await
            .map_err(|e| BackendError::Smtp(e.to_string()))?;
        debug!("SMTP server replied with code {}", response.code());
        Ok(())
    }
}

pub fn build_email(message: &AlertMessage) -> Result<Message, BackendError> {
    Message::builder()
        .from(parse_mailbox(&message.from)?)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.clone())
        .date_now()
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| BackendError::Message(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, BackendError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| BackendError::Message(format!("'{}': {}", address, e)))
}
