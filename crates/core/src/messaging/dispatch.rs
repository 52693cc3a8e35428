use std::time::Duration;

use cafe_protocol::{DeliveryResult, DeliveryTarget, InvalidTarget};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::contract::ChatContract;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::session::BrowserSession;
use crate::wait::{WaitPolicy, Waiter};

/// Waits and pauses used while driving the chat client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTimings {
	/// Waiting for the composition box after opening a deep link.
	pub chat: WaitPolicy,
	/// Waiting for the search box, the contact entry and the composition box of a searched chat.
	pub search: WaitPolicy,
	/// Pause after typing into the search box.
	pub search_settle: Duration,
	/// Pause after clicking a contact entry.
	pub open_chat_settle: Duration,
	/// Pause between typing the message and pressing Enter.
	pub type_settle: Duration,
	/// Pause after pressing Enter so the client can flush the message.
	pub post_send: Duration,
	/// Pause after every attempt in [`Dispatcher::send_all`].
	pub inter_send: Duration,
}

impl Default for DispatchTimings {
	fn default() -> Self {
		Self {
			chat: WaitPolicy::chat(),
			search: WaitPolicy::action().with_settle(Duration::ZERO),
			search_settle: Duration::from_secs(2),
			open_chat_settle: Duration::from_secs(2),
			type_settle: Duration::from_secs(1),
			post_send: Duration::from_secs(2),
			inter_send: Duration::from_secs(3),
		}
	}
}

/// Builds `{base}/send?phone={digits}&text={message}` for a phone target.
///
/// # Errors
///
/// [`Error::InvalidTarget`] for contact names, which have no deep link.
pub fn deep_link(base: &str, target: &DeliveryTarget, message: &str) -> Result<Url> {
	let digits = target.dial_digits().ok_or_else(|| InvalidTarget(target.to_string()))?;
	let endpoint = format!("{}/send", base.trim_end_matches('/'));
	Ok(Url::parse_with_params(&endpoint, &[("phone", digits.as_str()), ("text", message)])?)
}

/// Delivers messages through the chat web client of one borrowed session.
///
/// The session must already be paired with an account; see [`open_client`](Self::open_client).
pub struct Dispatcher<'s, D: Driver> {
	session: &'s mut BrowserSession<D>,
	contract: ChatContract,
	timings: DispatchTimings,
}

impl<'s, D: Driver> Dispatcher<'s, D> {
	pub fn new(session: &'s mut BrowserSession<D>) -> Self {
		Self {
			session,
			contract: ChatContract::default(),
			timings: DispatchTimings::default(),
		}
	}

	pub fn with_contract(mut self, contract: ChatContract) -> Self {
		self.contract = contract;
		self
	}

	pub fn with_timings(mut self, timings: DispatchTimings) -> Self {
		self.timings = timings;
		self
	}

	/// Navigates to the client's landing page so the operator can pair the device.
	pub async fn open_client(&mut self) -> Result<()> {
		info!(target = "cafe", url = %self.contract.base_url, "open chat client");
		self.session.driver()?.goto(&self.contract.base_url).await
	}

	/// Sends `message` to `target`. Never fails: errors become a negative result.
	pub async fn send(&mut self, target: &DeliveryTarget, message: &str) -> DeliveryResult {
		info!(target = "cafe", to = %target, "send message");
		let outcome = match target {
			DeliveryTarget::PhoneNumber(_) => self.send_to_number(target, message).await,
			DeliveryTarget::ContactName(name) => self.send_to_contact(name, message).await,
		};

		match outcome {
			Ok(()) => DeliveryResult::delivered(target.clone()),
			Err(err) => {
				warn!(target = "cafe", to = %target, error = %err, "message not delivered");
				DeliveryResult::failed(target.clone(), err.to_string())
			}
		}
	}

	/// Sends `message` to each target in order, pausing after every attempt.
	pub async fn send_all(&mut self, targets: &[DeliveryTarget], message: &str) -> Vec<DeliveryResult> {
		let mut results = Vec::with_capacity(targets.len());
		for target in targets {
			results.push(self.send(target, message).await);
			debug!(target = "cafe", pause_ms = self.timings.inter_send.as_millis() as u64, "pause between sends");
			sleep(self.timings.inter_send).await;
		}
		results
	}

	async fn send_to_number(&mut self, target: &DeliveryTarget, message: &str) -> Result<()> {
		let link = deep_link(&self.contract.base_url, target, message)?;
		let driver = self.session.driver()?;
		driver.goto(link.as_str()).await?;

		let compose = Waiter::new(self.timings.chat).await_element(driver, &self.contract.compose_input).await?;
		driver.press_enter(&compose).await?;
		sleep(self.timings.post_send).await;
		Ok(())
	}

	async fn send_to_contact(&mut self, name: &str, message: &str) -> Result<()> {
		let driver = self.session.driver()?;
		let waiter = Waiter::new(self.timings.search);

		let search = waiter.await_element(driver, &self.contract.search_input).await?;
		driver.clear(&search).await?;
		driver.send_keys(&search, name).await?;
		sleep(self.timings.search_settle).await;

		// The filtered result list is fresh after typing; query it only now.
		let entry = match waiter.await_element(driver, &self.contract.contact_entry(name)).await {
			Ok(entry) => entry,
			Err(err) if err.is_timeout() => return Err(Error::not_found(name)),
			Err(err) => return Err(err),
		};
		waiter.await_clickable(driver, &entry).await?;
		driver.click(&entry).await?;
		sleep(self.timings.open_chat_settle).await;

		let compose = waiter.await_element(driver, &self.contract.compose_input).await?;
		driver.send_keys(&compose, message).await?;
		sleep(self.timings.type_settle).await;
		driver.press_enter(&compose).await?;
		sleep(self.timings.post_send).await;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deep_link_uses_digits_and_encodes_text() {
		let target = DeliveryTarget::parse("+57 300 123 4567").unwrap();
		let url = deep_link("https://web.whatsapp.com/", &target, "Hola & bye\n2").unwrap();

		assert_eq!(url.path(), "/send");
		let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
		assert_eq!(
			pairs,
			vec![
				("phone".to_string(), "573001234567".to_string()),
				("text".to_string(), "Hola & bye\n2".to_string()),
			]
		);
	}

	#[test]
	fn contacts_have_no_deep_link() {
		let target = DeliveryTarget::ContactName("Ana".to_string());
		let err = deep_link("https://web.whatsapp.com", &target, "hi").unwrap_err();
		assert!(matches!(err, Error::InvalidTarget(_)));
	}

	#[test]
	fn default_timings() {
		let timings = DispatchTimings::default();
		assert_eq!(timings.chat.timeout, Duration::from_secs(20));
		assert_eq!(timings.search.timeout, Duration::from_secs(10));
		assert_eq!(timings.inter_send, Duration::from_secs(3));
	}
}
