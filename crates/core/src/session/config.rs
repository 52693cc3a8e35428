use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Default chromedriver endpoint.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Browser engine requested from the WebDriver endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
	/// Google Chrome / Chromium via chromedriver
	#[default]
	Chrome,
	/// Mozilla Firefox via geckodriver
	Firefox,
}

impl fmt::Display for BrowserKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BrowserKind::Chrome => write!(f, "chrome"),
			BrowserKind::Firefox => write!(f, "firefox"),
		}
	}
}

impl FromStr for BrowserKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"chrome" | "chromium" => Ok(BrowserKind::Chrome),
			"firefox" => Ok(BrowserKind::Firefox),
			other => Err(format!("unsupported browser: {other}")),
		}
	}
}

/// Fully owned browser-session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	/// WebDriver endpoint to connect to.
	pub webdriver_url: String,
	/// Browser engine to launch.
	pub browser_kind: BrowserKind,
	/// Whether the browser runs without a visible window.
	pub headless: bool,
	/// Disable the browser sandbox (required in most containers).
	pub disable_sandbox: bool,
	/// Leave the browser window open when the program exits without releasing.
	pub keep_window_open: bool,
	/// Maximize the window after launch.
	pub maximize: bool,
}

impl SessionConfig {
	/// Creates a baseline config: visible Chrome, sandbox disabled, closes on exit.
	pub fn new() -> Self {
		Self {
			webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
			browser_kind: BrowserKind::default(),
			headless: false,
			disable_sandbox: true,
			keep_window_open: false,
			maximize: true,
		}
	}

	/// Preset for driving the cafeteria page. The caller owns the window's lifetime.
	pub fn cafeteria(headless: bool) -> Self {
		Self {
			headless,
			..Self::new()
		}
	}

	/// Preset for the chat client: visible, and left open after exit so the
	/// operator can keep the paired session.
	pub fn messaging() -> Self {
		Self {
			headless: false,
			keep_window_open: true,
			..Self::new()
		}
	}

	/// Builds the WebDriver capabilities for this config.
	pub fn capabilities(&self) -> Map<String, Value> {
		let mut caps = Map::new();

		match self.browser_kind {
			BrowserKind::Chrome => {
				let mut args = Vec::new();
				if self.headless {
					args.push("--headless=new");
				}
				if self.disable_sandbox {
					args.push("--no-sandbox");
					args.push("--disable-dev-shm-usage");
				}

				let mut opts = Map::new();
				opts.insert("args".to_string(), json!(args));
				if self.keep_window_open {
					opts.insert("detach".to_string(), json!(true));
				}
				caps.insert("browserName".to_string(), json!("chrome"));
				caps.insert("goog:chromeOptions".to_string(), Value::Object(opts));
			}
			BrowserKind::Firefox => {
				let args: Vec<&str> = if self.headless { vec!["--headless"] } else { Vec::new() };
				caps.insert("browserName".to_string(), json!("firefox"));
				caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
			}
		}

		caps
	}
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self::new()
	}
}
