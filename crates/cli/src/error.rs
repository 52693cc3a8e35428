use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// Some deliveries failed; the per-target results have already been printed.
	#[error("{failed} of {total} deliveries failed")]
	Undelivered { failed: usize, total: usize },

	#[error("no page URL: pass --url or set pageUrl in the config file")]
	MissingPageUrl,

	#[error("page location is neither a URL nor an existing file: {0}")]
	InvalidPageUrl(String),

	#[error("no sender address: pass --from or set smtp.username in the config file")]
	MissingSender,

	#[error(transparent)]
	Cafe(#[from] cafe::Error),

	#[error(transparent)]
	InvalidTarget(#[from] cafe::protocol::InvalidTarget),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	/// Check if this error indicates output has already been printed.
	pub fn is_output_already_printed(&self) -> bool {
		matches!(self, CliError::Undelivered { .. })
	}

	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::Undelivered { failed, total } => (
				ErrorCode::DeliveryFailed,
				Some(serde_json::json!({ "failed": failed, "total": total })),
			),
			CliError::MissingPageUrl | CliError::InvalidPageUrl(_) | CliError::MissingSender | CliError::InvalidTarget(_) => {
				(ErrorCode::InvalidInput, None)
			}
			CliError::Cafe(err) => classify(err),
			CliError::Io(_) => (ErrorCode::IoError, None),
			CliError::Json(_) | CliError::Anyhow(_) => (ErrorCode::InternalError, None),
		};

		CommandError {
			code,
			message: self.to_string(),
			details,
		}
	}
}

fn classify(err: &cafe::Error) -> (ErrorCode, Option<serde_json::Value>) {
	use cafe::Error;

	match err {
		Error::Timeout { ms, condition } => (
			ErrorCode::Timeout,
			Some(serde_json::json!({ "timeout_ms": ms, "condition": condition })),
		),
		Error::NotFound { query } => (ErrorCode::NotFound, Some(serde_json::json!({ "query": query }))),
		Error::OutOfRange { index, len } => (
			ErrorCode::OutOfRange,
			Some(serde_json::json!({ "index": index, "len": len })),
		),
		Error::Launch(_) => (ErrorCode::BrowserLaunchFailed, None),
		Error::Navigation { url, .. } => (ErrorCode::NavigationFailed, Some(serde_json::json!({ "url": url }))),
		Error::Mail(_) => (ErrorCode::MailFailed, None),
		Error::InvalidTarget(_) | Error::Url(_) => (ErrorCode::InvalidInput, None),
		Error::SessionReleased | Error::WebDriver(_) | Error::Json(_) => (ErrorCode::InternalError, None),
	}
}
