//! Bridge from the page's automation accessors to the typed data model.
//!
//! Reads are best-effort: an uninstrumented page, a `null` return, or a
//! malformed payload all read as empty. Only a failure to run the script at
//! all (a dead session) is an error.

use cafe_protocol::{CartSnapshot, MenuItem, try_decode_cart, try_decode_menu};
use tracing::debug;

use crate::contract::PageContract;
use crate::driver::Driver;
use crate::error::Result;

/// Script calling a zero-argument global accessor, or yielding `null` when it is
/// missing or throws.
pub fn accessor_script(accessor: &str) -> String {
	format!(
		"try {{ return typeof window.{accessor} === 'function' ? window.{accessor}() : null; }} catch (e) {{ return null; }}"
	)
}

/// Invokes the page's state accessors.
#[derive(Debug, Clone)]
pub struct StateBridge {
	menu_script: String,
	cart_script: String,
}

impl StateBridge {
	pub fn new(contract: &PageContract) -> Self {
		Self {
			menu_script: accessor_script(&contract.menu_accessor),
			cart_script: accessor_script(&contract.cart_accessor),
		}
	}

	/// Reads the menu; an unavailable or malformed payload reads as empty.
	pub async fn read_menu<D: Driver>(&self, driver: &D) -> Result<Vec<MenuItem>> {
		let payload = driver.evaluate(&self.menu_script).await?;
		Ok(try_decode_menu(payload.as_str()).unwrap_or_else(|err| {
			debug!(target = "cafe", error = %err, "menu unavailable, reading as empty");
			Vec::new()
		}))
	}

	/// Reads the cart; an unavailable or malformed payload reads as the empty cart.
	pub async fn read_cart<D: Driver>(&self, driver: &D) -> Result<CartSnapshot> {
		let payload = driver.evaluate(&self.cart_script).await?;
		Ok(try_decode_cart(payload.as_str()).unwrap_or_else(|err| {
			debug!(target = "cafe", error = %err, "cart unavailable, reading as empty");
			CartSnapshot::default()
		}))
	}
}

impl Default for StateBridge {
	fn default() -> Self {
		Self::new(&PageContract::default())
	}
}
