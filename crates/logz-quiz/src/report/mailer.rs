use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MessageBuilder};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::{MailConfig, MailConfigError, TransportSettings};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// A single outbound HTML message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub cc: Vec<String>,
    /// Explicit BCC list; `None` lets the transport apply its default.
    pub bcc: Option<Vec<String>>,
    pub reply_to: Option<String>,
    pub disable_default_bcc: bool,
}

impl OutgoingMail {
    pub fn html(to: Vec<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            html: html.into(),
            ..Self::default()
        }
    }

    /// BCC actually attached once the transport default is taken into account.
    pub fn effective_bcc<'a>(&'a self, default_bcc: &'a [String]) -> &'a [String] {
        match (&self.bcc, self.disable_default_bcc) {
            (Some(bcc), _) => bcc.as_slice(),
            (None, true) => &[],
            (None, false) => default_bcc,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport is not configured: {0}")]
    Configuration(#[from] MailConfigError),
    #[error("invalid mail address '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("unable to build message: {0}")]
    Message(String),
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// Outbound mail seam, so dispatch can be exercised without an SMTP relay.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// SMTP mailer backed by a pooled lettre transport built once at startup.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    default_bcc: Vec<String>,
}

impl SmtpMailer {
    pub fn new(settings: TransportSettings) -> Result<Self, MailError> {
        let tls = TlsParameters::new(settings.host.clone())
            .map_err(|err| MailError::Transport(err.to_string()))?;
        let tls = if settings.secure {
            Tls::Wrapper(tls)
        } else {
            Tls::Opportunistic(tls)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(settings.user, settings.password))
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            from: parse_mailbox(&settings.from)?,
            default_bcc: settings.default_bcc,
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let mut builder: MessageBuilder = Message::builder()
            .from(self.from.clone())
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_HTML);

        for address in &mail.to {
            builder = builder.to(parse_mailbox(address)?);
        }
        for address in &mail.cc {
            builder = builder.cc(parse_mailbox(address)?);
        }
        for address in mail.effective_bcc(&self.default_bcc) {
            builder = builder.bcc(parse_mailbox(address)?);
        }
        if let Some(reply_to) = &mail.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        builder
            .body(mail.html.clone())
            .map_err(|err| MailError::Message(err.to_string()))
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = self.build_message(&mail)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;
        debug!(code = %response.code(), subject = %mail.subject, "mail accepted by relay");
        Ok(())
    }
}

/// The process-wide mailer: a working SMTP transport, or the reason there is none.
///
/// An unconfigured mailer still starts the service; every send then fails with
/// the configuration error instead of dropping mail.
#[derive(Debug)]
pub enum ConfiguredMailer {
    Smtp(SmtpMailer),
    Unconfigured(MailConfigError),
}

impl ConfiguredMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        match config.transport_settings() {
            Ok(settings) => SmtpMailer::new(settings).map(Self::Smtp),
            Err(err) => Ok(Self::Unconfigured(err)),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Smtp(_))
    }
}

#[async_trait]
impl Mailer for ConfiguredMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        match self {
            Self::Smtp(mailer) => mailer.send(mail).await,
            Self::Unconfigured(err) => Err(MailError::Configuration(err.clone())),
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.trim().parse::<Mailbox>().map_err(|err| MailError::Address {
        address: address.to_string(),
        reason: err.to_string(),
    })
}
