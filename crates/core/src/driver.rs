//! The narrow browser seam every controller component goes through.
//!
//! [`Driver`] is deliberately small: it exposes exactly the element queries and
//! actions the cafeteria and chat flows need. [`WebDriver`](crate::WebDriver) is the
//! production implementation; tests drive the controller with an in-memory page.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A CSS selector identifying zero or more elements in the current document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
	/// Wraps a CSS selector.
	pub fn css(selector: impl Into<String>) -> Self {
		Self(selector.into())
	}

	/// Selects `tag` elements whose `attr` attribute equals `value` exactly.
	///
	/// Quotes and backslashes in `value` are escaped so arbitrary display names are safe.
	pub fn attr_equals(tag: &str, attr: &str, value: &str) -> Self {
		let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
		Self(format!("{tag}[{attr}=\"{escaped}\"]"))
	}

	/// Returns the selector text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Selector {
	fn from(value: &str) -> Self {
		Self::css(value)
	}
}

/// Browser operations the controller relies on.
///
/// Element handles are only valid until the next DOM mutation; callers
/// re-query rather than hold on to them.
#[async_trait]
pub trait Driver: Send + Sync {
	/// Opaque handle to one element.
	type Element: Clone + Send + Sync;

	/// Navigates the current window to `url`.
	async fn goto(&self, url: &str) -> Result<()>;

	/// Returns every element matching `selector`, in document order.
	async fn find_all(&self, selector: &Selector) -> Result<Vec<Self::Element>>;

	/// Returns every descendant of `parent` matching `selector`, in document order.
	async fn find_all_within(&self, parent: &Self::Element, selector: &Selector) -> Result<Vec<Self::Element>>;

	/// Rendered text of an element.
	async fn text(&self, element: &Self::Element) -> Result<String>;

	/// Value of an attribute, `None` when absent.
	async fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

	/// Whether the element is displayed and enabled.
	async fn is_clickable(&self, element: &Self::Element) -> Result<bool>;

	/// Scrolls the element to the vertical center of the viewport.
	async fn scroll_into_view(&self, element: &Self::Element) -> Result<()>;

	async fn click(&self, element: &Self::Element) -> Result<()>;

	/// Clears an editable element.
	async fn clear(&self, element: &Self::Element) -> Result<()>;

	/// Types `text` into an element.
	async fn send_keys(&self, element: &Self::Element, text: &str) -> Result<()>;

	/// Sends the Enter key to an element.
	async fn press_enter(&self, element: &Self::Element) -> Result<()>;

	/// Runs a script body in the page and returns its JSON result.
	///
	/// The script must `return` its value.
	async fn evaluate(&self, script: &str) -> Result<Value>;

	/// Maximizes the browser window.
	async fn maximize(&self) -> Result<()>;

	/// Ends the browser session.
	async fn close(&self) -> Result<()>;
}
