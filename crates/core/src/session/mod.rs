//! Browser session lifetime.
//!
//! [`BrowserSession`] exclusively owns one driver. Every other component
//! borrows it for the duration of a call; nothing outlives it.

mod builder;
mod config;

pub use config::{BrowserKind, DEFAULT_WEBDRIVER_URL, SessionConfig};
use tracing::{debug, info};

use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::webdriver::WebDriver;

/// An acquired browser session.
pub struct BrowserSession<D: Driver = WebDriver> {
	driver: Option<D>,
}

impl BrowserSession<WebDriver> {
	/// Launches a browser through WebDriver.
	///
	/// # Errors
	///
	/// Returns [`Error::Launch`] when the endpoint is unreachable or refuses the
	/// session. There is no fallback driver.
	pub async fn acquire(config: SessionConfig) -> Result<Self> {
		let driver = builder::connect(&config).await?;
		info!(target = "cafe", browser = %config.browser_kind, headless = config.headless, "browser session acquired");
		Ok(Self::from_driver(driver))
	}
}

impl<D: Driver> BrowserSession<D> {
	/// Wraps an already-connected driver.
	pub fn from_driver(driver: D) -> Self {
		Self { driver: Some(driver) }
	}

	/// Returns the live driver.
	///
	/// # Errors
	///
	/// Returns [`Error::SessionReleased`] after [`release`](Self::release).
	pub fn driver(&self) -> Result<&D> {
		self.driver.as_ref().ok_or(Error::SessionReleased)
	}

	/// Returns true once the session has been released.
	pub fn is_released(&self) -> bool {
		self.driver.is_none()
	}

	/// Terminates the browser session. Later calls are no-ops.
	pub async fn release(&mut self) -> Result<()> {
		let Some(driver) = self.driver.take() else {
			debug!(target = "cafe", "release on already-released session");
			return Ok(());
		};

		info!(target = "cafe", "releasing browser session");
		driver.close().await
	}
}
