//! In-memory cafeteria page and chat client implementing [`Driver`].

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use cafe::{ChatContract, Driver, Error, PageContract, Result, Selector};
use serde_json::{Value, json};
use url::Url;

/// Something on the fake page a test can hold a handle to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	Badge,
	AddButton(usize),
	Card(usize),
	Name(usize),
	CardButton(usize),
	CartButton,
	ReportButton,
	Search,
	Compose,
	Contact(String),
}

/// Interaction recorded by the fake page, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	Scroll(Node),
	Probe(Node),
	Click(Node),
}

#[derive(Debug, Clone)]
pub struct Product {
	pub name: Option<String>,
	pub price: String,
	pub unit: u32,
	pub has_button: bool,
}

pub fn product(name: &str, price: &str, unit: u32) -> Product {
	Product {
		name: Some(name.to_string()),
		price: price.to_string(),
		unit,
		has_button: true,
	}
}

#[derive(Debug, Default)]
pub struct PageState {
	pub products: Vec<Product>,
	/// (product index, quantity) in insertion order.
	pub cart: Vec<(usize, u32)>,
	pub rendered: bool,
	/// When false the page never renders after navigation.
	pub renders: bool,
	pub instrumented: bool,
	pub menu_payload: Option<Value>,
	pub cart_payload: Option<Value>,
	pub visits: Vec<String>,
	pub panel_open: bool,
	pub report_open: bool,
	pub clicks: usize,
	pub events: Vec<Event>,
	/// Clickability probes still answered with `false`; `u32::MAX` never clears.
	pub obscured_probes: u32,

	pub chat_ready: bool,
	pub contacts: Vec<String>,
	pub numbers: Vec<String>,
	pub search_text: String,
	pub open_chat: Option<String>,
	pub draft: String,
	pub sent: Vec<(String, String)>,

	pub closed: usize,
}

/// Shared handle: the session owns one clone, the test keeps another.
#[derive(Clone)]
pub struct FakePage {
	state: Arc<Mutex<PageState>>,
	page: PageContract,
	chat: ChatContract,
}

impl FakePage {
	pub fn cafeteria(products: Vec<Product>) -> Self {
		Self::from_state(PageState {
			products,
			renders: true,
			instrumented: true,
			..PageState::default()
		})
	}

	pub fn chat(contacts: &[&str], numbers: &[&str]) -> Self {
		Self::from_state(PageState {
			renders: true,
			instrumented: true,
			contacts: contacts.iter().map(|c| c.to_string()).collect(),
			numbers: numbers.iter().map(|n| n.to_string()).collect(),
			..PageState::default()
		})
	}

	fn from_state(state: PageState) -> Self {
		Self {
			state: Arc::new(Mutex::new(state)),
			page: PageContract::default(),
			chat: ChatContract::default(),
		}
	}

	pub fn state(&self) -> MutexGuard<'_, PageState> {
		self.state.lock().unwrap()
	}

	fn cart_count(state: &PageState) -> u32 {
		state.cart.iter().map(|(_, q)| q).sum()
	}

	fn add(state: &mut PageState, index: usize) {
		state.clicks += 1;
		match state.cart.iter_mut().find(|(i, _)| *i == index) {
			Some((_, quantity)) => *quantity += 1,
			None => state.cart.push((index, 1)),
		}
	}

	fn menu_json(state: &PageState) -> Value {
		let items: Vec<Value> = state
			.products
			.iter()
			.enumerate()
			.filter_map(|(index, p)| {
				p.name.as_ref().map(|name| {
					json!({ "index": index, "name": name, "price": p.price, "hasAddButton": p.has_button })
				})
			})
			.collect();
		Value::String(Value::Array(items).to_string())
	}

	fn cart_json(state: &PageState) -> Value {
		let items: Vec<Value> = state
			.cart
			.iter()
			.map(|(index, quantity)| {
				let p = &state.products[*index];
				json!({
					"name": p.name.clone().unwrap_or_default(),
					"price": p.unit,
					"quantity": quantity,
					"subtotal": p.unit * quantity,
				})
			})
			.collect();
		let total: u32 = state.cart.iter().map(|(i, q)| state.products[*i].unit * q).sum();
		Value::String(json!({ "items": items, "total": total, "count": Self::cart_count(state) }).to_string())
	}
}

#[async_trait]
impl Driver for FakePage {
	type Element = Node;

	async fn goto(&self, url: &str) -> Result<()> {
		let mut state = self.state();
		state.visits.push(url.to_string());

		let parsed = Url::parse(url).map_err(|e| Error::Navigation {
			url: url.to_string(),
			message: e.to_string(),
		})?;
		let chat_base = Url::parse(&self.chat.base_url)?;
		if parsed.host_str() == chat_base.host_str() {
			state.chat_ready = true;
			state.open_chat = None;
			if parsed.path() == "/send" {
				let phone = parsed.query_pairs().find(|(k, _)| k == "phone").map(|(_, v)| v.into_owned());
				let text = parsed.query_pairs().find(|(k, _)| k == "text").map(|(_, v)| v.into_owned());
				if let Some(phone) = phone.filter(|p| state.numbers.contains(p)) {
					state.draft = text.unwrap_or_default();
					state.open_chat = Some(phone);
				}
			}
			return Ok(());
		}

		state.rendered = state.renders;
		Ok(())
	}

	async fn find_all(&self, selector: &Selector) -> Result<Vec<Node>> {
		let state = self.state();
		let page = &self.page;
		let chat = &self.chat;

		if state.chat_ready {
			if *selector == chat.search_input {
				return Ok(vec![Node::Search]);
			}
			if *selector == chat.compose_input {
				return Ok(state.open_chat.iter().map(|_| Node::Compose).collect());
			}
			if state.search_text.is_empty() {
				return Ok(Vec::new());
			}
			return Ok(state
				.contacts
				.iter()
				.filter(|c| c.contains(state.search_text.as_str()) && chat.contact_entry(c) == *selector)
				.map(|c| Node::Contact(c.clone()))
				.collect());
		}

		if !state.rendered {
			return Ok(Vec::new());
		}
		let nodes = if *selector == page.cart_badge {
			vec![Node::Badge]
		} else if *selector == page.add_buttons {
			state
				.products
				.iter()
				.enumerate()
				.filter(|(_, p)| p.has_button)
				.map(|(i, _)| Node::AddButton(i))
				.collect()
		} else if *selector == page.product_card {
			(0..state.products.len()).map(Node::Card).collect()
		} else if *selector == page.cart_button {
			vec![Node::CartButton]
		} else if *selector == page.report_button {
			vec![Node::ReportButton]
		} else {
			Vec::new()
		};
		Ok(nodes)
	}

	async fn find_all_within(&self, parent: &Node, selector: &Selector) -> Result<Vec<Node>> {
		let state = self.state();
		let Node::Card(i) = parent else {
			return Ok(Vec::new());
		};
		let product = &state.products[*i];
		if *selector == self.page.product_name && product.name.is_some() {
			return Ok(vec![Node::Name(*i)]);
		}
		if *selector == self.page.card_add_button && product.has_button {
			return Ok(vec![Node::CardButton(*i)]);
		}
		Ok(Vec::new())
	}

	async fn text(&self, element: &Node) -> Result<String> {
		let state = self.state();
		Ok(match element {
			Node::Badge => {
				let count = Self::cart_count(&state);
				if count == 0 { String::new() } else { count.to_string() }
			}
			Node::Name(i) => format!("  {}  ", state.products[*i].name.clone().unwrap_or_default()),
			_ => String::new(),
		})
	}

	async fn attribute(&self, element: &Node, name: &str) -> Result<Option<String>> {
		Ok(match (element, name) {
			(Node::Contact(contact), "title") => Some(contact.clone()),
			_ => None,
		})
	}

	async fn is_clickable(&self, element: &Node) -> Result<bool> {
		let mut state = self.state();
		state.events.push(Event::Probe(element.clone()));
		match state.obscured_probes {
			0 => Ok(true),
			u32::MAX => Ok(false),
			_ => {
				state.obscured_probes -= 1;
				Ok(false)
			}
		}
	}

	async fn scroll_into_view(&self, element: &Node) -> Result<()> {
		self.state().events.push(Event::Scroll(element.clone()));
		Ok(())
	}

	async fn click(&self, element: &Node) -> Result<()> {
		let mut state = self.state();
		state.events.push(Event::Click(element.clone()));
		match element {
			Node::AddButton(i) | Node::CardButton(i) => Self::add(&mut state, *i),
			Node::CartButton => state.panel_open = true,
			Node::ReportButton => state.report_open = true,
			Node::Contact(name) => state.open_chat = Some(name.clone()),
			_ => {}
		}
		Ok(())
	}

	async fn clear(&self, element: &Node) -> Result<()> {
		if *element == Node::Search {
			self.state().search_text.clear();
		}
		Ok(())
	}

	async fn send_keys(&self, element: &Node, text: &str) -> Result<()> {
		let mut state = self.state();
		match element {
			Node::Search => state.search_text.push_str(text),
			Node::Compose => state.draft.push_str(text),
			_ => {}
		}
		Ok(())
	}

	async fn press_enter(&self, element: &Node) -> Result<()> {
		let mut state = self.state();
		if *element == Node::Compose {
			if let Some(chat) = state.open_chat.clone() {
				let message = std::mem::take(&mut state.draft);
				state.sent.push((chat, message));
			}
		}
		Ok(())
	}

	async fn evaluate(&self, script: &str) -> Result<Value> {
		let state = self.state();
		if !state.instrumented || !state.rendered {
			return Ok(Value::Null);
		}
		if script.contains(&self.page.menu_accessor) {
			return Ok(state.menu_payload.clone().unwrap_or_else(|| Self::menu_json(&state)));
		}
		if script.contains(&self.page.cart_accessor) {
			return Ok(state.cart_payload.clone().unwrap_or_else(|| Self::cart_json(&state)));
		}
		Ok(Value::Null)
	}

	async fn maximize(&self) -> Result<()> {
		Ok(())
	}

	async fn close(&self) -> Result<()> {
		self.state().closed += 1;
		Ok(())
	}
}
