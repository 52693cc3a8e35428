//! Controller for the cafeteria ordering page.
//!
//! [`CafeController`] borrows a [`BrowserSession`] exclusively and composes the
//! synchronization layer, element selector, action executor and state bridge.
//! Element handles never outlive a single call: every action re-queries the
//! current batch, since each click may re-render the page.

use std::time::Duration;

use cafe_protocol::{CartSnapshot, MenuItem};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::action::{ActionExecutor, DEFAULT_SCROLL_SETTLE};
use crate::bridge::StateBridge;
use crate::contract::PageContract;
use crate::driver::Driver;
use crate::error::Result;
use crate::messaging::MessageTemplate;
use crate::select::{select_by_index, select_by_name};
use crate::session::BrowserSession;
use crate::wait::{Condition, WaitPolicy, Waiter};

/// Waits and settle delays used by [`CafeController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CafeTimings {
	/// Initial render after navigation.
	pub page_load: WaitPolicy,
	/// Re-render around each action.
	pub action: WaitPolicy,
	/// Pause after scrolling a button into view.
	pub scroll_settle: Duration,
	/// Pause after opening the cart panel or the report modal.
	pub panel_settle: Duration,
}

impl Default for CafeTimings {
	fn default() -> Self {
		Self {
			page_load: WaitPolicy::page_load(),
			action: WaitPolicy::action(),
			scroll_settle: DEFAULT_SCROLL_SETTLE,
			panel_settle: Duration::from_millis(300),
		}
	}
}

/// Drives the cafeteria page through one borrowed session.
pub struct CafeController<'s, D: Driver> {
	session: &'s mut BrowserSession<D>,
	contract: PageContract,
	timings: CafeTimings,
	bridge: StateBridge,
}

impl<'s, D: Driver> CafeController<'s, D> {
	pub fn new(session: &'s mut BrowserSession<D>) -> Self {
		let contract = PageContract::default();
		let bridge = StateBridge::new(&contract);
		Self {
			session,
			contract,
			timings: CafeTimings::default(),
			bridge,
		}
	}

	pub fn with_contract(mut self, contract: PageContract) -> Self {
		self.bridge = StateBridge::new(&contract);
		self.contract = contract;
		self
	}

	pub fn with_timings(mut self, timings: CafeTimings) -> Self {
		self.timings = timings;
		self
	}

	pub fn contract(&self) -> &PageContract {
		&self.contract
	}

	fn driver(&self) -> Result<&D> {
		self.session.driver()
	}

	fn executor(&self) -> ActionExecutor {
		ActionExecutor::new(Waiter::new(self.timings.action), self.timings.scroll_settle)
	}

	/// Navigates to the page and waits until the cart badge and the full add-to-cart batch have rendered.
	pub async fn open(&mut self, url: &str) -> Result<()> {
		info!(target = "cafe", url, "open cafeteria page");
		let driver = self.driver()?;
		driver.goto(url).await?;

		let waiter = Waiter::new(self.timings.page_load);
		waiter.await_condition(driver, &Condition::Present(self.contract.cart_badge.clone())).await?;
		waiter.await_condition(driver, &Condition::AllPresent(self.contract.add_buttons.clone())).await?;
		Ok(())
	}

	/// Clicks the add-to-cart button at zero-based `index` once.
	///
	/// # Errors
	///
	/// [`Error::OutOfRange`](crate::Error::OutOfRange) when `index` is outside the current batch.
	pub async fn add_by_index(&mut self, index: usize, pace: Duration) -> Result<()> {
		info!(target = "cafe", index, "add to cart by index");
		let driver = self.driver()?;
		Waiter::new(self.timings.action)
			.await_condition(driver, &Condition::AllPresent(self.contract.add_buttons.clone()))
			.await?;

		let batch = driver.find_all(&self.contract.add_buttons).await?;
		let button = select_by_index(batch, index)?;
		self.executor().add_to_cart(driver, &button, pace).await
	}

	/// Adds `quantity` units of the first product whose name contains `name`.
	///
	/// Returns the full label of the matched product.
	///
	/// # Errors
	///
	/// [`Error::NotFound`](crate::Error::NotFound) when no product label matches.
	pub async fn add_by_name(&mut self, name: &str, quantity: u32, pace: Duration) -> Result<String> {
		info!(target = "cafe", name, quantity, "add to cart by name");
		let driver = self.driver()?;
		Waiter::new(self.timings.action)
			.await_condition(driver, &Condition::AllPresent(self.contract.add_buttons.clone()))
			.await?;

		let product = select_by_name(driver, &self.contract, name).await?;
		self.executor().add_repeatedly(driver, &product.button, quantity, pace).await?;
		Ok(product.label)
	}

	/// Reads the menu from the page. Best-effort: empty when the page has not published it.
	pub async fn read_menu(&self) -> Result<Vec<MenuItem>> {
		self.bridge.read_menu(self.driver()?).await
	}

	/// Reads the cart from the page. Best-effort: the empty cart when unavailable.
	pub async fn read_cart(&self) -> Result<CartSnapshot> {
		self.bridge.read_cart(self.driver()?).await
	}

	/// Number shown on the cart badge; a blank badge reads as zero.
	pub async fn cart_badge(&self) -> Result<u32> {
		let driver = self.driver()?;
		let badge = Waiter::new(self.timings.action).await_element(driver, &self.contract.cart_badge).await?;
		let text = driver.text(&badge).await?;
		Ok(parse_badge(&text))
	}

	/// Opens the cart side panel.
	pub async fn open_cart_panel(&mut self) -> Result<()> {
		info!(target = "cafe", "open cart panel");
		let selector = self.contract.cart_button.clone();
		self.click_and_settle(&selector).await
	}

	/// Opens the report modal.
	pub async fn open_report(&mut self) -> Result<()> {
		info!(target = "cafe", "open report");
		let selector = self.contract.report_button.clone();
		self.click_and_settle(&selector).await
	}

	/// Reads the menu (and the cart when `include_cart`) and renders a message.
	pub async fn compose_message(&self, template: &MessageTemplate, include_cart: bool) -> Result<String> {
		let menu = self.read_menu().await?;
		let cart = if include_cart { Some(self.read_cart().await?) } else { None };
		Ok(template.render(&menu, cart.as_ref()))
	}

	async fn click_and_settle(&mut self, selector: &crate::driver::Selector) -> Result<()> {
		let driver = self.driver()?;
		let button = Waiter::new(self.timings.action).await_element(driver, selector).await?;
		driver.click(&button).await?;
		sleep(self.timings.panel_settle).await;
		Ok(())
	}
}

fn parse_badge(text: &str) -> u32 {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return 0;
	}
	trimmed.parse().unwrap_or_else(|_| {
		warn!(target = "cafe", badge = trimmed, "unreadable cart badge, reading as 0");
		0
	})
}
