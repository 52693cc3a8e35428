//! DOM contracts of the two automated web applications.
//!
//! These selectors must stay in sync with the page markup; everything else in
//! the controller is expressed in terms of them.

use crate::driver::Selector;

/// Element contract of the cafeteria ordering page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContract {
	/// Badge showing the number of units in the cart.
	pub cart_badge: Selector,
	/// The batch of add-to-cart buttons, one per product, in document order.
	pub add_buttons: Selector,
	/// Button opening the cart side panel.
	pub cart_button: Selector,
	/// Button opening the report modal.
	pub report_button: Selector,
	/// Product card container.
	pub product_card: Selector,
	/// Product name, inside a card.
	pub product_name: Selector,
	/// Add-to-cart button, inside a card.
	pub card_add_button: Selector,
	/// Global function returning the menu as JSON text.
	pub menu_accessor: String,
	/// Global function returning the cart as JSON text.
	pub cart_accessor: String,
}

impl Default for PageContract {
	fn default() -> Self {
		Self {
			cart_badge: Selector::css("[data-testid='cart-badge']"),
			add_buttons: Selector::css("[data-testid='add-to-cart-btn']"),
			cart_button: Selector::css("[data-testid='cart-btn']"),
			report_button: Selector::css("[data-testid='report-btn']"),
			product_card: Selector::css(".product-card"),
			product_name: Selector::css(".product-name"),
			card_add_button: Selector::css(".add-to-cart-btn"),
			menu_accessor: "getMenuDataForAutomation".to_string(),
			cart_accessor: "getCartDataForAutomation".to_string(),
		}
	}
}

/// Default chat web client.
pub const DEFAULT_CHAT_URL: &str = "https://web.whatsapp.com";

/// Element contract of the chat web client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContract {
	/// Client origin; deep links are `{base_url}/send?phone=..&text=..`.
	pub base_url: String,
	/// Chat search box.
	pub search_input: Selector,
	/// Message composition box of the open conversation.
	pub compose_input: Selector,
	/// Tag of search-result elements carrying the contact's `title`.
	pub contact_title_tag: String,
}

impl ChatContract {
	/// Search result whose title is exactly `name`.
	pub fn contact_entry(&self, name: &str) -> Selector {
		Selector::attr_equals(&self.contact_title_tag, "title", name)
	}
}

impl Default for ChatContract {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_CHAT_URL.to_string(),
			search_input: Selector::css("div[contenteditable='true'][data-tab='3']"),
			compose_input: Selector::css("div[contenteditable='true'][data-tab='10']"),
			contact_title_tag: "span".to_string(),
		}
	}
}
