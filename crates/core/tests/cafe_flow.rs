mod common;

use std::time::Duration;

use cafe::{Amount, BrowserSession, CafeController, CafeTimings, CartSnapshot, Error, MessageTemplate};
use common::{Event, FakePage, Node, Product, product};
use serde_json::Value;
use tokio::time::Instant;

const PAGE_URL: &str = "http://localhost:8080/";
const PACE: Duration = Duration::from_secs(1);

fn menu() -> Vec<Product> {
	vec![
		product("Tinto", "$1.500", 1500),
		product("Empanada", "$2.000", 2000),
		product("Tinto Doble", "$2.500", 2500),
	]
}

fn session(page: &FakePage) -> BrowserSession<FakePage> {
	BrowserSession::from_driver(page.clone())
}

fn quantity(cart: &CartSnapshot, name: &str) -> Option<u32> {
	cart.items.iter().find(|item| item.name == name).map(|item| item.quantity)
}

#[tokio::test(start_paused = true)]
async fn three_buttons_clicked_once_each_count_three() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);

	cafe.open(PAGE_URL).await.unwrap();
	for index in 0..3 {
		cafe.add_by_index(index, PACE).await.unwrap();
	}

	let cart = cafe.read_cart().await.unwrap();
	assert_eq!(cart.count, 3);
	assert_eq!(cart.items.len(), 3);
	assert_eq!(cart.total, Amount(6000.0));
	assert_eq!(cafe.cart_badge().await.unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn same_index_twice_then_next_counts_three() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);

	cafe.open(PAGE_URL).await.unwrap();
	cafe.add_by_index(0, PACE).await.unwrap();
	cafe.add_by_index(0, PACE).await.unwrap();
	cafe.add_by_index(1, PACE).await.unwrap();

	let cart = cafe.read_cart().await.unwrap();
	assert_eq!(cart.count, 3);
	assert_eq!(cart.items.iter().map(|item| item.quantity).sum::<u32>(), 3);
	assert_eq!(quantity(&cart, "Tinto"), Some(2));
	assert_eq!(quantity(&cart, "Empanada"), Some(1));
	assert_eq!(cafe.cart_badge().await.unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn open_settles_after_render() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);

	let start = Instant::now();
	cafe.open(PAGE_URL).await.unwrap();
	assert!(start.elapsed() >= Duration::from_millis(800), "elapsed {:?}", start.elapsed());
	assert_eq!(page.state().clicks, 0);
}

#[tokio::test(start_paused = true)]
async fn each_click_scrolls_then_probes_then_paces() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();

	let start = Instant::now();
	cafe.add_by_name("Empanada", 2, PACE).await.unwrap();
	let per_click = CafeTimings::default().scroll_settle + PACE;
	assert!(start.elapsed() >= per_click * 2, "elapsed {:?}", start.elapsed());

	let button = Node::CardButton(1);
	let round = [Event::Scroll(button.clone()), Event::Probe(button.clone()), Event::Click(button)];
	let expected: Vec<Event> = round.iter().chain(round.iter()).cloned().collect();
	assert_eq!(page.state().events, expected);

	let start = Instant::now();
	cafe.add_by_index(2, PACE).await.unwrap();
	assert!(start.elapsed() >= per_click, "elapsed {:?}", start.elapsed());
	assert_eq!(page.state().events[6..], [
		Event::Scroll(Node::AddButton(2)),
		Event::Probe(Node::AddButton(2)),
		Event::Click(Node::AddButton(2)),
	]);
}

#[tokio::test(start_paused = true)]
async fn obscured_button_is_clicked_once_it_clears() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();
	page.state().obscured_probes = 2;

	cafe.add_by_index(0, PACE).await.unwrap();

	let button = Node::AddButton(0);
	assert_eq!(page.state().events, vec![
		Event::Scroll(button.clone()),
		Event::Probe(button.clone()),
		Event::Probe(button.clone()),
		Event::Probe(button.clone()),
		Event::Click(button),
	]);
}

#[tokio::test(start_paused = true)]
async fn never_clickable_button_times_out_without_click() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();
	page.state().obscured_probes = u32::MAX;

	let err = cafe.add_by_index(0, PACE).await.unwrap_err();
	assert!(err.is_timeout(), "{err:?}");
	assert!(err.to_string().contains("clickable"));
	assert_eq!(page.state().clicks, 0);
	assert!(!page.state().events.iter().any(|event| matches!(event, Event::Click(_))));
	assert!(cafe.read_cart().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn index_past_batch_is_out_of_range() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();

	let err = cafe.add_by_index(3, PACE).await.unwrap_err();
	assert!(matches!(err, Error::OutOfRange { index: 3, len: 3 }));
	assert_eq!(page.state().clicks, 0);
}

#[tokio::test(start_paused = true)]
async fn name_selection_takes_first_match_and_repeats() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();

	let label = cafe.add_by_name("Tinto", 2, PACE).await.unwrap();
	assert_eq!(label, "Tinto");

	let cart = cafe.read_cart().await.unwrap();
	assert_eq!(quantity(&cart, "Tinto"), Some(2));
	assert_eq!(quantity(&cart, "Tinto Doble"), None);

	let rendered = MessageTemplate::default().render(&cafe.read_menu().await.unwrap(), Some(&cart));
	assert!(rendered.contains("Tinto x2 - $3,000"));
	assert!(rendered.contains("Total: $3,000"));
}

#[tokio::test(start_paused = true)]
async fn name_selection_skips_unlabelled_cards() {
	let mut products = menu();
	products[0].name = None;
	let page = FakePage::cafeteria(products);
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();

	let label = cafe.add_by_name("Tinto", 1, PACE).await.unwrap();
	assert_eq!(label, "Tinto Doble");
}

#[tokio::test(start_paused = true)]
async fn unknown_name_is_not_found_and_cart_untouched() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();

	match cafe.add_by_name("Arepa", 1, PACE).await {
		Err(Error::NotFound { query }) => assert_eq!(query, "Arepa"),
		other => panic!("expected NotFound, got {other:?}"),
	}
	assert!(cafe.read_cart().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn page_that_never_renders_times_out() {
	let page = FakePage::cafeteria(menu());
	page.state().renders = false;
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);

	let start = tokio::time::Instant::now();
	let err = cafe.open(PAGE_URL).await.unwrap_err();
	assert!(err.is_timeout());
	assert!(err.to_string().contains("cart-badge"));
	assert!(start.elapsed() >= Duration::from_secs(15));
	drop(cafe);
	assert!(!session.is_released());
}

#[tokio::test(start_paused = true)]
async fn reads_are_best_effort() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);

	// before navigation nothing is published
	assert!(cafe.read_menu().await.unwrap().is_empty());
	assert!(cafe.read_cart().await.unwrap().is_empty());

	cafe.open(PAGE_URL).await.unwrap();
	page.state().cart_payload = Some(Value::String("{\"items\": [".to_string()));
	page.state().menu_payload = Some(Value::String("{\"not\": \"a list\"}".to_string()));
	assert!(cafe.read_cart().await.unwrap().is_empty());
	assert!(cafe.read_menu().await.unwrap().is_empty());

	page.state().instrumented = false;
	assert_eq!(cafe.read_cart().await.unwrap().count, 0);
}

#[tokio::test(start_paused = true)]
async fn reads_do_not_mutate() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();
	cafe.add_by_index(1, PACE).await.unwrap();

	let first = cafe.read_cart().await.unwrap();
	let second = cafe.read_cart().await.unwrap();
	assert_eq!(first, second);
	assert_eq!(cafe.read_menu().await.unwrap(), cafe.read_menu().await.unwrap());
	assert_eq!(page.state().clicks, 1);
}

#[tokio::test(start_paused = true)]
async fn blank_badge_reads_zero_and_panels_open() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();

	assert_eq!(cafe.cart_badge().await.unwrap(), 0);
	cafe.open_cart_panel().await.unwrap();
	cafe.open_report().await.unwrap();
	assert!(page.state().panel_open);
	assert!(page.state().report_open);
}

#[tokio::test(start_paused = true)]
async fn compose_message_includes_cart_on_request() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);
	let mut cafe = CafeController::new(&mut session);
	cafe.open(PAGE_URL).await.unwrap();
	cafe.add_by_index(0, PACE).await.unwrap();

	let template = MessageTemplate::default();
	let menu_only = cafe.compose_message(&template, false).await.unwrap();
	assert!(menu_only.contains("Empanada - $2.000"));
	assert!(!menu_only.contains("Total"));

	let with_cart = cafe.compose_message(&template, true).await.unwrap();
	assert!(with_cart.contains("  • Tinto x1 - $1,500"));
}

#[tokio::test(start_paused = true)]
async fn release_is_idempotent_and_blocks_further_use() {
	let page = FakePage::cafeteria(menu());
	let mut session = session(&page);

	session.release().await.unwrap();
	session.release().await.unwrap();
	assert!(session.is_released());
	assert_eq!(page.state().closed, 1);

	let mut cafe = CafeController::new(&mut session);
	assert!(matches!(cafe.open(PAGE_URL).await, Err(Error::SessionReleased)));
	assert!(matches!(cafe.read_cart().await, Err(Error::SessionReleased)));
}
