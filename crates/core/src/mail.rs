//! Outbound e-mail over SMTP with implicit TLS.

use std::fmt;

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_SMTP_RELAY: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// SMTP relay and account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
	pub relay: String,
	pub port: u16,
	pub username: String,
	#[serde(skip_serializing)]
	pub password: String,
}

impl Default for MailConfig {
	fn default() -> Self {
		Self {
			relay: DEFAULT_SMTP_RELAY.to_string(),
			port: DEFAULT_SMTP_PORT,
			username: String::new(),
			password: String::new(),
		}
	}
}

impl fmt::Debug for MailConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MailConfig")
			.field("relay", &self.relay)
			.field("port", &self.port)
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// A plain-text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
	pub from: String,
	pub to: Vec<String>,
	pub subject: String,
	pub body: String,
}

/// Outcome of [`Mailer::deliver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailReceipt {
	pub sent: bool,
	pub detail: String,
}

pub struct Mailer {
	config: MailConfig,
}

impl Mailer {
	pub fn new(config: MailConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &MailConfig {
		&self.config
	}

	/// Builds the MIME message without sending it.
	pub fn build_message(mail: &OutgoingMail) -> Result<Message> {
		if mail.to.is_empty() {
			return Err(Error::Mail("at least one recipient is required".to_string()));
		}

		let from = parse_mailbox(&mail.from)?;
		let mut builder = Message::builder().from(from).subject(mail.subject.as_str()).header(ContentType::TEXT_PLAIN);
		for to in &mail.to {
			builder = builder.to(parse_mailbox(to)?);
		}

		builder
			.body(mail.body.clone())
			.map_err(|e| Error::Mail(format!("failed to build message: {e}")))
	}

	/// Sends `mail` through the configured relay.
	pub async fn send(&self, mail: &OutgoingMail) -> Result<()> {
		let message = Self::build_message(mail)?;

		let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.relay)
			.map_err(|e| Error::Mail(format!("invalid relay '{}': {e}", self.config.relay)))?
			.port(self.config.port)
			.credentials(Credentials::new(self.config.username.clone(), self.config.password.clone()))
			.build();

		info!(target = "cafe", relay = %self.config.relay, recipients = mail.to.len(), "send mail");
		transport
			.send(message)
			.await
			.map_err(|e| Error::Mail(format!("failed to send email: {e}")))?;
		Ok(())
	}

	/// Like [`send`](Self::send), folding the outcome into a receipt.
	pub async fn deliver(&self, mail: &OutgoingMail) -> MailReceipt {
		match self.send(mail).await {
			Ok(()) => MailReceipt {
				sent: true,
				detail: format!("sent to {}", mail.to.join(", ")),
			},
			Err(err) => {
				warn!(target = "cafe", error = %err, "mail not sent");
				MailReceipt {
					sent: false,
					detail: err.to_string(),
				}
			}
		}
	}
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
	address
		.trim()
		.parse::<Mailbox>()
		.map_err(|e| Error::Mail(format!("invalid address '{address}': {e}")))
}
