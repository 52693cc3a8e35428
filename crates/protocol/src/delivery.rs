//! Message delivery targets and per-attempt results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw input that names neither a phone number nor a contact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid delivery target: {0:?}")]
pub struct InvalidTarget(pub String);

/// Who a message is addressed to, which also selects how the chat is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DeliveryTarget {
	/// International phone number, always starting with `+`.
	PhoneNumber(String),
	/// Display name of an existing chat.
	ContactName(String),
}

impl DeliveryTarget {
	/// Classifies raw input: a leading `+` means a phone number, anything else a contact name.
	pub fn parse(raw: &str) -> Result<Self, InvalidTarget> {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Err(InvalidTarget(raw.to_string()));
		}

		if let Some(rest) = trimmed.strip_prefix('+') {
			if !rest.chars().any(|c| c.is_ascii_digit()) {
				return Err(InvalidTarget(raw.to_string()));
			}
			return Ok(Self::PhoneNumber(trimmed.to_string()));
		}

		Ok(Self::ContactName(trimmed.to_string()))
	}

	/// Returns the target exactly as given.
	pub fn as_str(&self) -> &str {
		match self {
			Self::PhoneNumber(value) | Self::ContactName(value) => value,
		}
	}

	/// Digits of a phone target (`"+57 300-123"` -> `"57300123"`), `None` for contacts.
	pub fn dial_digits(&self) -> Option<String> {
		match self {
			Self::PhoneNumber(number) => Some(number.chars().filter(char::is_ascii_digit).collect()),
			Self::ContactName(_) => None,
		}
	}
}

impl fmt::Display for DeliveryTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for DeliveryTarget {
	type Err = InvalidTarget;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// Outcome of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResult {
	/// Target the attempt was made for.
	pub target: DeliveryTarget,
	/// Whether the message was submitted.
	pub delivered: bool,
	/// Diagnostic for a failed attempt.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl DeliveryResult {
	/// Records a submitted message.
	pub fn delivered(target: DeliveryTarget) -> Self {
		Self {
			target,
			delivered: true,
			error: None,
		}
	}

	/// Records a failed attempt with its diagnostic.
	pub fn failed(target: DeliveryTarget, error: impl Into<String>) -> Self {
		Self {
			target,
			delivered: false,
			error: Some(error.into()),
		}
	}
}
