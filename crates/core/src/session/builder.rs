use fantoccini::ClientBuilder;
use tracing::{debug, warn};

use super::config::SessionConfig;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::webdriver::WebDriver;

/// Connects to the WebDriver endpoint and launches a configured browser.
pub(crate) async fn connect(config: &SessionConfig) -> Result<WebDriver> {
	debug!(
		target = "cafe",
		browser = %config.browser_kind,
		url = %config.webdriver_url,
		headless = config.headless,
		keep_window_open = config.keep_window_open,
		"connecting to WebDriver..."
	);

	let mut builder = ClientBuilder::rustls().map_err(|e| Error::Launch(e.to_string()))?;
	builder.capabilities(config.capabilities());
	let client = builder
		.connect(&config.webdriver_url)
		.await
		.map_err(|e| Error::Launch(format!("{} ({})", e, config.webdriver_url)))?;

	if config.keep_window_open {
		client.persist().await?;
	}

	let driver = WebDriver::new(client);
	if config.maximize {
		if let Err(err) = driver.maximize().await {
			warn!(target = "cafe", error = %err, "could not maximize window");
		}
	}

	Ok(driver)
}
