//! [`Driver`] over W3C WebDriver via `fantoccini`.

use async_trait::async_trait;
use fantoccini::key::Key;
use fantoccini::{Client, Locator};
use serde_json::Value;

use crate::driver::{Driver, Selector};
use crate::error::{Error, Result};

/// Element handle returned by [`WebDriver`].
pub type WebElement = fantoccini::elements::Element;

const SCROLL_CENTER_SCRIPT: &str = "arguments[0].scrollIntoView({block: 'center'});";

/// A connected WebDriver client.
#[derive(Clone)]
pub struct WebDriver {
	client: Client,
}

impl WebDriver {
	pub(crate) fn new(client: Client) -> Self {
		Self { client }
	}

	/// Returns the underlying client.
	pub fn client(&self) -> &Client {
		&self.client
	}
}

#[async_trait]
impl Driver for WebDriver {
	type Element = WebElement;

	async fn goto(&self, url: &str) -> Result<()> {
		self.client.goto(url).await.map_err(|e| Error::Navigation {
			url: url.to_string(),
			message: e.to_string(),
		})
	}

	async fn find_all(&self, selector: &Selector) -> Result<Vec<WebElement>> {
		Ok(self.client.find_all(Locator::Css(selector.as_str())).await?)
	}

	async fn find_all_within(&self, parent: &WebElement, selector: &Selector) -> Result<Vec<WebElement>> {
		Ok(parent.find_all(Locator::Css(selector.as_str())).await?)
	}

	async fn text(&self, element: &WebElement) -> Result<String> {
		Ok(element.text().await?)
	}

	async fn attribute(&self, element: &WebElement, name: &str) -> Result<Option<String>> {
		Ok(element.attr(name).await?)
	}

	async fn is_clickable(&self, element: &WebElement) -> Result<bool> {
		Ok(element.is_displayed().await? && element.is_enabled().await?)
	}

	async fn scroll_into_view(&self, element: &WebElement) -> Result<()> {
		let arg = serde_json::to_value(element)?;
		self.client.execute(SCROLL_CENTER_SCRIPT, vec![arg]).await?;
		Ok(())
	}

	async fn click(&self, element: &WebElement) -> Result<()> {
		Ok(element.click().await?)
	}

	async fn clear(&self, element: &WebElement) -> Result<()> {
		Ok(element.clear().await?)
	}

	async fn send_keys(&self, element: &WebElement, text: &str) -> Result<()> {
		Ok(element.send_keys(text).await?)
	}

	async fn press_enter(&self, element: &WebElement) -> Result<()> {
		let enter: char = Key::Enter.into();
		Ok(element.send_keys(&enter.to_string()).await?)
	}

	async fn evaluate(&self, script: &str) -> Result<Value> {
		Ok(self.client.execute(script, Vec::new()).await?)
	}

	async fn maximize(&self) -> Result<()> {
		Ok(self.client.maximize_window().await?)
	}

	async fn close(&self) -> Result<()> {
		Ok(self.client.clone().close().await?)
	}
}
