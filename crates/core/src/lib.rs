//! Browser automation for the cafeteria ordering page.
//!
//! A [`BrowserSession`] owns one WebDriver session. [`CafeController`] drives
//! the ordering page through it (open, add to cart, read menu and cart state),
//! and [`Dispatcher`] delivers the rendered menu through the chat web client.
//! All page interaction goes through the [`Driver`] trait, implemented for
//! WebDriver by [`WebDriver`].
//!
//! ```ignore
//! use cafe::{BrowserSession, CafeController, SessionConfig, DEFAULT_PACE};
//!
//! let mut session = BrowserSession::acquire(SessionConfig::cafeteria(true)).await?;
//! let mut cafe = CafeController::new(&mut session);
//! cafe.open("http://localhost:8080").await?;
//! cafe.add_by_name("Tinto", 2, DEFAULT_PACE).await?;
//! let cart = cafe.read_cart().await?;
//! session.release().await?;
//! ```

mod action;
mod bridge;
mod cafe;
mod contract;
mod driver;
mod error;
pub mod mail;
pub mod messaging;
mod select;
pub mod session;
mod wait;
mod webdriver;

pub use action::{ActionExecutor, DEFAULT_PACE, DEFAULT_SCROLL_SETTLE};
pub use bridge::{StateBridge, accessor_script};
pub use cafe::{CafeController, CafeTimings};
pub use cafe_protocol as protocol;
pub use cafe_protocol::{Amount, CartItem, CartSnapshot, DeliveryResult, DeliveryTarget, MenuItem, Price};
pub use contract::{ChatContract, DEFAULT_CHAT_URL, PageContract};
pub use driver::{Driver, Selector};
pub use error::{Error, Result};
pub use mail::{MailConfig, MailReceipt, Mailer, OutgoingMail};
pub use messaging::{DispatchTimings, Dispatcher, MessageTemplate, deep_link};
pub use select::{ProductMatch, first_label_match, label_matches, select_by_index, select_by_name};
pub use session::{BrowserKind, BrowserSession, DEFAULT_WEBDRIVER_URL, SessionConfig};
pub use wait::{Condition, WaitPolicy, Waiter};
pub use webdriver::{WebDriver, WebElement};
