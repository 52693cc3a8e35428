use cafe_protocol::{CartSnapshot, MenuItem};
use serde::{Deserialize, Serialize};

/// Fixed text around a rendered menu message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplate {
	pub header: String,
	pub cart_heading: String,
	pub footer: String,
}

impl Default for MessageTemplate {
	fn default() -> Self {
		Self {
			header: "☕ *CAFETERIA MENU*".to_string(),
			cart_heading: "🛒 *Your cart:*".to_string(),
			footer: "📞 Contact us to order.".to_string(),
		}
	}
}

impl MessageTemplate {
	/// Renders the menu and, when given and non-empty, the cart.
	///
	/// Cart amounts are the snapshot's own figures; nothing is recomputed.
	pub fn render(&self, menu: &[MenuItem], cart: Option<&CartSnapshot>) -> String {
		let mut lines = vec![self.header.clone(), String::new()];
		lines.extend(menu.iter().map(|item| format!("{} - {}", item.name, item.price)));

		if let Some(cart) = cart.filter(|cart| !cart.is_empty()) {
			lines.push(String::new());
			lines.push(self.cart_heading.clone());
			lines.extend(
				cart.items
					.iter()
					.map(|item| format!("  • {} x{} - ${}", item.name, item.quantity, item.subtotal.grouped())),
			);
			lines.push(format!("  Total: ${}", cart.total.grouped()));
		}

		lines.push(String::new());
		lines.push(self.footer.clone());
		lines.join("\n")
	}
}
