//! Optional JSON configuration shared by every command.
//!
//! All fields are optional. Command-line flags take precedence over the file,
//! and the SMTP password may come from [`PASSWORD_ENV`] instead of the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use cafe::{BrowserKind, CafeTimings, DEFAULT_PACE, DispatchTimings, MailConfig, MessageTemplate, SessionConfig};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CliError, Result};

/// File name looked up under `<config dir>/cafe/`.
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `smtp.password`.
pub const PASSWORD_ENV: &str = "CAFE_SMTP_PASSWORD";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CafeConfig {
	pub webdriver_url: Option<String>,
	pub browser: Option<BrowserKind>,
	/// Default for page commands; `--headed` always wins.
	pub headless: Option<bool>,
	pub page_url: Option<String>,
	pub chat_url: Option<String>,
	pub timings: TimingConfig,
	pub template: MessageTemplate,
	pub smtp: MailConfig,
}

/// Timing overrides in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingConfig {
	pub page_load_ms: Option<u64>,
	pub action_ms: Option<u64>,
	pub chat_ms: Option<u64>,
	pub pace_ms: Option<u64>,
	pub inter_send_ms: Option<u64>,
}

impl CafeConfig {
	/// Loads `explicit`, or the default location when it exists, then applies
	/// the password environment override.
	pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
		let path = match explicit {
			Some(path) => Some(path.to_path_buf()),
			None => default_path().filter(|path| path.is_file()),
		};

		let config = match path {
			Some(path) => Self::from_file(&path)?,
			None => Self::default(),
		};
		Ok(config.with_password(std::env::var(PASSWORD_ENV).ok()))
	}

	pub fn from_file(path: &Path) -> anyhow::Result<Self> {
		let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
		serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
	}

	/// Replaces the SMTP password when `password` is set and non-empty.
	pub fn with_password(mut self, password: Option<String>) -> Self {
		if let Some(password) = password.filter(|p| !p.is_empty()) {
			self.smtp.password = password;
		}
		self
	}

	/// Applies endpoint and browser settings to a session preset.
	pub fn session(&self, mut preset: SessionConfig, webdriver: Option<&str>, browser: Option<BrowserKind>) -> SessionConfig {
		if let Some(url) = webdriver.or(self.webdriver_url.as_deref()) {
			preset.webdriver_url = url.to_string();
		}
		if let Some(kind) = browser.or(self.browser) {
			preset.browser_kind = kind;
		}
		preset
	}

	pub fn headless(&self, headed: bool) -> bool {
		!headed && self.headless.unwrap_or(true)
	}

	pub fn pace(&self, flag_ms: Option<u64>) -> Duration {
		flag_ms.or(self.timings.pace_ms).map(Duration::from_millis).unwrap_or(DEFAULT_PACE)
	}

	pub fn cafe_timings(&self) -> CafeTimings {
		let mut timings = CafeTimings::default();
		if let Some(ms) = self.timings.page_load_ms {
			timings.page_load = timings.page_load.with_timeout(Duration::from_millis(ms));
		}
		if let Some(ms) = self.timings.action_ms {
			timings.action = timings.action.with_timeout(Duration::from_millis(ms));
		}
		timings
	}

	pub fn dispatch_timings(&self) -> DispatchTimings {
		let mut timings = DispatchTimings::default();
		if let Some(ms) = self.timings.chat_ms {
			timings.chat = timings.chat.with_timeout(Duration::from_millis(ms));
		}
		if let Some(ms) = self.timings.action_ms {
			timings.search = timings.search.with_timeout(Duration::from_millis(ms));
		}
		if let Some(ms) = self.timings.inter_send_ms {
			timings.inter_send = Duration::from_millis(ms);
		}
		timings
	}

	/// Resolves the page location from the flag or the file.
	///
	/// Anything that is not an absolute URL is treated as a local file path.
	pub fn page_url(&self, flag: Option<&str>) -> Result<String> {
		let raw = flag.or(self.page_url.as_deref()).ok_or(CliError::MissingPageUrl)?;
		resolve_location(raw)
	}
}

/// `<config dir>/cafe/config.json`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("cafe").join(CONFIG_FILE))
}

fn resolve_location(raw: &str) -> Result<String> {
	if let Ok(url) = Url::parse(raw) {
		// single letters are Windows drive prefixes, not schemes
		if url.scheme().len() > 1 {
			return Ok(url.into());
		}
	}

	let path = std::fs::canonicalize(raw).map_err(|_| CliError::InvalidPageUrl(raw.to_string()))?;
	Url::from_file_path(&path)
		.map(String::from)
		.map_err(|()| CliError::InvalidPageUrl(raw.to_string()))
}
