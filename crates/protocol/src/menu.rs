//! Menu payload produced by `window.getMenuDataForAutomation()`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Amount, DecodeError, non_blank};

/// A product price, either as the page renders it or as a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
	/// Numeric price (e.g. `2500`).
	Amount(Amount),
	/// Price text as rendered on the product card (e.g. `"$2.500"`).
	Text(String),
}

impl fmt::Display for Price {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Price::Amount(amount) => write!(f, "{amount}"),
			Price::Text(text) => f.write_str(text),
		}
	}
}

/// One product card on the menu.
///
/// Extra fields the page includes (`index`, `hasAddButton`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
	/// Product name as shown on the card.
	pub name: String,
	/// Product price.
	pub price: Price,
}

impl MenuItem {
	/// Creates a menu item with a textual price.
	pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			price: Price::Text(price.into()),
		}
	}
}

/// Decodes a menu payload, reporting why decoding failed.
pub fn try_decode_menu(text: Option<&str>) -> Result<Vec<MenuItem>, DecodeError> {
	let text = non_blank(text)?;
	Ok(serde_json::from_str(text)?)
}
