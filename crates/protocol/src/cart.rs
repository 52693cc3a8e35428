//! Cart payload produced by `window.getCartDataForAutomation()`.

use serde::{Deserialize, Serialize};

use crate::{Amount, DecodeError, non_blank};

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
	/// Product name.
	pub name: String,
	/// Units of this product in the cart (the page never reports zero).
	pub quantity: u32,
	/// Line subtotal computed by the page.
	pub subtotal: Amount,
}

/// Cart state as reported by the page.
///
/// `total` and `count` are the page's own aggregates and are surfaced as-is;
/// they are never recomputed from `items`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
	/// Cart lines in page order.
	pub items: Vec<CartItem>,
	/// Cart total.
	pub total: Amount,
	/// Total units across all lines.
	pub count: u32,
}

impl CartSnapshot {
	/// Returns true when the cart has no lines.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

/// Decodes a cart payload, reporting why decoding failed.
pub fn try_decode_cart(text: Option<&str>) -> Result<CartSnapshot, DecodeError> {
	let text = non_blank(text)?;
	Ok(serde_json::from_str(text)?)
}
