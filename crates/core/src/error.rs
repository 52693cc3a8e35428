//! Error types for the automation controller.

use cafe_protocol::InvalidTarget;
use thiserror::Error;

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by controller operations.
///
/// Payload decode failures never appear here: the state bridge folds them
/// into empty values. Delivery failures never escape `Dispatcher::send`.
#[derive(Debug, Error)]
pub enum Error {
	/// The browser session could not be started. Nothing else can run.
	#[error("browser launch failed: {0}")]
	Launch(String),

	/// The session was used after [`BrowserSession::release`](crate::BrowserSession::release).
	#[error("browser session already released")]
	SessionReleased,

	/// A wait condition was not satisfied in time.
	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	/// A named selection target is absent from the current batch.
	#[error("no element matched: {query}")]
	NotFound { query: String },

	/// An index selection exceeded the current batch.
	#[error("index {index} out of range: batch has {len} elements")]
	OutOfRange { index: usize, len: usize },

	/// Navigation to a URL failed.
	#[error("navigation to {url} failed: {message}")]
	Navigation { url: String, message: String },

	/// A WebDriver command failed at the transport or protocol level.
	#[error("webdriver command failed: {0}")]
	WebDriver(#[from] fantoccini::error::CmdError),

	/// Raw input could not be turned into a delivery target.
	#[error(transparent)]
	InvalidTarget(#[from] InvalidTarget),

	/// Building or submitting an e-mail failed.
	#[error("mail delivery failed: {0}")]
	Mail(String),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Url(#[from] url::ParseError),
}

impl Error {
	/// Returns true if this is a wait timeout.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout { .. })
	}

	pub(crate) fn not_found(query: impl Into<String>) -> Self {
		Error::NotFound { query: query.into() }
	}
}
