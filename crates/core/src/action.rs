//! Scroll, confirm, click, pace.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::driver::Driver;
use crate::error::Result;
use crate::wait::Waiter;

/// Default pause after each click, long enough for an operator to follow along.
pub const DEFAULT_PACE: Duration = Duration::from_secs(1);

/// Default pause for a centered scroll to finish.
pub const DEFAULT_SCROLL_SETTLE: Duration = Duration::from_millis(300);

/// Performs click sequences with observable pacing.
///
/// The pacing delay is part of the contract: it is never skipped, headless or not.
#[derive(Debug, Clone, Copy)]
pub struct ActionExecutor {
	waiter: Waiter,
	scroll_settle: Duration,
}

impl ActionExecutor {
	pub fn new(waiter: Waiter, scroll_settle: Duration) -> Self {
		Self { waiter, scroll_settle }
	}

	/// Scrolls `target` into view, re-confirms it is clickable, clicks, then sleeps `pace`.
	pub async fn add_to_cart<D: Driver>(&self, driver: &D, target: &D::Element, pace: Duration) -> Result<()> {
		driver.scroll_into_view(target).await?;
		sleep(self.scroll_settle).await;
		self.waiter.await_clickable(driver, target).await?;
		driver.click(target).await?;

		debug!(target = "cafe", pace_ms = pace.as_millis() as u64, "pacing after click");
		sleep(pace).await;
		Ok(())
	}

	/// Runs [`add_to_cart`](Self::add_to_cart) `quantity` times on the same target.
	///
	/// Each round re-scrolls and re-confirms, since the previous click may have shifted layout.
	pub async fn add_repeatedly<D: Driver>(&self, driver: &D, target: &D::Element, quantity: u32, pace: Duration) -> Result<()> {
		for round in 1..=quantity {
			debug!(target = "cafe", round, quantity, "add to cart");
			self.add_to_cart(driver, target, pace).await?;
		}
		Ok(())
	}
}

impl Default for ActionExecutor {
	fn default() -> Self {
		Self::new(Waiter::default(), DEFAULT_SCROLL_SETTLE)
	}
}
