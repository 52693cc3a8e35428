//! Element selection over a freshly queried batch.
//!
//! Two strategies: by zero-based position in the add-to-cart batch, and by
//! case-insensitive substring match on product labels. Name matching is
//! first-match-wins in document order; there is no scoring.

use tracing::debug;

use crate::contract::PageContract;
use crate::driver::Driver;
use crate::error::{Error, Result};

/// Picks the element at `index` from a batch.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] with the attempted index and the batch length.
pub fn select_by_index<E>(batch: Vec<E>, index: usize) -> Result<E> {
	let len = batch.len();
	batch.into_iter().nth(index).ok_or(Error::OutOfRange { index, len })
}

/// Case-insensitive substring test of `query` against a trimmed label.
pub fn label_matches(label: &str, query: &str) -> bool {
	label.trim().to_lowercase().contains(&query.to_lowercase())
}

/// Position of the first label containing `query`. Missing labels are skipped.
pub fn first_label_match<S: AsRef<str>>(labels: &[Option<S>], query: &str) -> Option<usize> {
	labels
		.iter()
		.position(|label| label.as_ref().is_some_and(|l| label_matches(l.as_ref(), query)))
}

/// A product card resolved by name.
#[derive(Debug, Clone)]
pub struct ProductMatch<E> {
	/// Label text of the matched card, trimmed.
	pub label: String,
	/// Zero-based position of the card in document order.
	pub position: usize,
	/// The card's add-to-cart button.
	pub button: E,
}

/// Resolves the first product card whose label contains `query`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] naming `query` when no label matches, or naming
/// the button selector when the matched card has no add button.
pub async fn select_by_name<D: Driver>(driver: &D, contract: &PageContract, query: &str) -> Result<ProductMatch<D::Element>> {
	let cards = driver.find_all(&contract.product_card).await?;
	debug!(target = "cafe", query, cards = cards.len(), "matching product by name");

	for (position, card) in cards.iter().enumerate() {
		let labels = driver.find_all_within(card, &contract.product_name).await?;
		let Some(label_el) = labels.first() else {
			continue;
		};
		let label = driver.text(label_el).await?.trim().to_string();
		if !label_matches(&label, query) {
			continue;
		}

		let button = driver
			.find_all_within(card, &contract.card_add_button)
			.await?
			.into_iter()
			.next()
			.ok_or_else(|| Error::not_found(format!("{} in product '{label}'", contract.card_add_button)))?;

		return Ok(ProductMatch { label, position, button });
	}

	Err(Error::not_found(query))
}
