//! Synchronization with an asynchronously rendering page.
//!
//! Every read or click goes through a [`Waiter`] first. Waits are bounded
//! blocking polls: the condition is probed at a fixed interval until it holds
//! or the policy timeout elapses. A satisfied condition is followed by the
//! policy's settle delay to absorb layout and animation the probe cannot see.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::driver::{Driver, Selector};
use crate::error::{Error, Result};

/// Bounds and pacing for one kind of wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
	/// Give up after this long.
	pub timeout: Duration,
	/// Delay between probes.
	pub poll_interval: Duration,
	/// Fixed pause after the condition is satisfied.
	pub settle: Duration,
}

impl WaitPolicy {
	pub const fn new(timeout: Duration, poll_interval: Duration, settle: Duration) -> Self {
		Self {
			timeout,
			poll_interval,
			settle,
		}
	}

	/// Initial page render: 15 s, settle 800 ms.
	pub const fn page_load() -> Self {
		Self::new(Duration::from_secs(15), Duration::from_millis(250), Duration::from_millis(800))
	}

	/// Re-render after an action: 10 s, settle 100 ms.
	pub const fn action() -> Self {
		Self::new(Duration::from_secs(10), Duration::from_millis(250), Duration::from_millis(100))
	}

	/// Chat client loading a conversation: 20 s, no settle.
	pub const fn chat() -> Self {
		Self::new(Duration::from_secs(20), Duration::from_millis(250), Duration::ZERO)
	}

	pub const fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub const fn with_settle(mut self, settle: Duration) -> Self {
		self.settle = settle;
		self
	}
}

impl Default for WaitPolicy {
	fn default() -> Self {
		Self::action()
	}
}

/// A DOM readiness condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
	/// At least one element matches.
	Present(Selector),
	/// The batch of matching elements has rendered (is non-empty).
	AllPresent(Selector),
}

impl Condition {
	pub fn selector(&self) -> &Selector {
		match self {
			Condition::Present(selector) | Condition::AllPresent(selector) => selector,
		}
	}
}

impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Condition::Present(selector) => write!(f, "presence of {selector}"),
			Condition::AllPresent(selector) => write!(f, "presence of all {selector}"),
		}
	}
}

/// Polls conditions under one [`WaitPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
	policy: WaitPolicy,
}

impl Waiter {
	pub fn new(policy: WaitPolicy) -> Self {
		Self { policy }
	}

	pub fn policy(&self) -> WaitPolicy {
		self.policy
	}

	/// Waits until `condition` holds, then settles.
	///
	/// # Errors
	///
	/// Returns [`Error::Timeout`] naming the condition when it does not hold in time.
	pub async fn await_condition<D: Driver>(&self, driver: &D, condition: &Condition) -> Result<()> {
		self.await_batch(driver, condition).await.map(|_| ())
	}

	/// Waits for the first element matching `selector` and returns it.
	pub async fn await_element<D: Driver>(&self, driver: &D, selector: &Selector) -> Result<D::Element> {
		let condition = Condition::Present(selector.clone());
		let batch = self.await_batch(driver, &condition).await?;
		batch.into_iter().next().ok_or_else(|| Error::not_found(selector.as_str()))
	}

	/// Waits until `element` is displayed and enabled. No settle is applied.
	pub async fn await_clickable<D: Driver>(&self, driver: &D, element: &D::Element) -> Result<()> {
		let probe = move || async move { driver.is_clickable(element).await.unwrap_or(false) };
		self.poll(probe).await.map_err(|ms| Error::Timeout {
			ms,
			condition: "element to be clickable".to_string(),
		})
	}

	async fn await_batch<D: Driver>(&self, driver: &D, condition: &Condition) -> Result<Vec<D::Element>> {
		debug!(target = "cafe", %condition, timeout_ms = self.policy.timeout.as_millis() as u64, "waiting");

		let selector = condition.selector();
		let deadline = Instant::now() + self.policy.timeout;
		let found = loop {
			match driver.find_all(selector).await {
				Ok(batch) if !batch.is_empty() => break batch,
				// probe errors mean "not yet": the page may be mid-navigation
				_ => {}
			}
			let now = Instant::now();
			if now >= deadline {
				return Err(Error::Timeout {
					ms: self.policy.timeout.as_millis() as u64,
					condition: condition.to_string(),
				});
			}
			sleep(self.policy.poll_interval.min(deadline - now)).await;
		};

		if !self.policy.settle.is_zero() {
			sleep(self.policy.settle).await;
		}
		debug!(target = "cafe", %condition, matched = found.len(), "condition satisfied");
		Ok(found)
	}

	/// Probes until true; on timeout returns the bound in milliseconds.
	async fn poll<F, Fut>(&self, mut probe: F) -> std::result::Result<(), u64>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = bool>,
	{
		let deadline = Instant::now() + self.policy.timeout;
		loop {
			if probe().await {
				return Ok(());
			}
			let now = Instant::now();
			if now >= deadline {
				return Err(self.policy.timeout.as_millis() as u64);
			}
			sleep(self.policy.poll_interval.min(deadline - now)).await;
		}
	}
}
