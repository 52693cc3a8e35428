
use std::path::PathBuf;
use std::str::FromStr;

use cafe::BrowserKind;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use crate::styles::cli_styles;

/// Root CLI for cafe.
#[derive(Parser, Debug)]
#[command(name = "cafe")]
#[command(about = "Drive the cafeteria ordering page and send its menu over chat or e-mail")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: json (default), ndjson, or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// JSON config file (defaults to <config dir>/cafe/config.json when present)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// WebDriver endpoint (chromedriver or geckodriver)
	#[arg(long, global = true, value_name = "URL")]
	pub webdriver: Option<String>,

	/// Browser to launch
	#[arg(long, global = true, value_name = "KIND")]
	pub browser: Option<BrowserKind>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Read the menu published by the page.
	Menu(PageArgs),
	/// Add products to the cart and print the resulting cart.
	Order(OrderArgs),
	/// Render the chat message for the current menu (and cart).
	Message(MessageArgs),
	/// Deliver the menu message through the chat web client.
	Send(SendArgs),
	/// E-mail the menu message.
	Mail(MailArgs),
}

impl Commands {
	/// Name used in the output envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Menu(_) => "menu",
			Commands::Order(_) => "order",
			Commands::Message(_) => "message",
			Commands::Send(_) => "send",
			Commands::Mail(_) => "mail",
		}
	}
}

#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
	/// Page URL or path to a local index.html
	#[arg(long, value_name = "URL")]
	pub url: Option<String>,

	/// Show the browser window instead of running headless
	#[arg(long)]
	pub headed: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OrderArgs {
	#[command(flatten)]
	pub page: PageArgs,

	/// Zero-based position of an add-to-cart button (repeatable)
	#[arg(long = "index", value_name = "N")]
	pub indices: Vec<usize>,

	/// Product name fragment, optionally with a quantity: `Tinto` or `Tinto:2` (repeatable)
	#[arg(long = "item", value_name = "NAME[:QTY]")]
	pub items: Vec<ItemSpec>,

	/// Pause after each click in milliseconds
	#[arg(long, value_name = "MS")]
	pub pace_ms: Option<u64>,

	/// Open the cart panel once all products are added
	#[arg(long)]
	pub open_cart: bool,

	/// Open the report modal once all products are added
	#[arg(long)]
	pub report: bool,

	/// Keep the browser open until Enter is pressed
	#[arg(long)]
	pub hold: bool,
}

impl OrderArgs {
	pub fn has_products(&self) -> bool {
		!self.indices.is_empty() || !self.items.is_empty()
	}
}

#[derive(Args, Debug, Clone, Default)]
pub struct MessageArgs {
	#[command(flatten)]
	pub order: OrderArgs,

	/// Append the cart section to the message
	#[arg(long)]
	pub with_cart: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SendArgs {
	/// Recipient: `+<number>` for a phone number, anything else is a contact name (repeatable)
	#[arg(long = "to", value_name = "TARGET", required = true)]
	pub targets: Vec<String>,

	/// Message text; when omitted the menu message is composed from the page
	#[arg(long, value_name = "TEXT")]
	pub text: Option<String>,

	#[command(flatten)]
	pub message: MessageArgs,

	/// Skip the prompt to scan the pairing QR code
	#[arg(long)]
	pub no_pair: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MailArgs {
	/// Recipient address (repeatable)
	#[arg(long = "to", value_name = "ADDRESS", required = true)]
	pub to: Vec<String>,

	/// Sender address (defaults to the SMTP username)
	#[arg(long, value_name = "ADDRESS")]
	pub from: Option<String>,

	#[arg(long, default_value = "Cafeteria menu")]
	pub subject: String,

	/// Message body; when omitted the menu message is composed from the page
	#[arg(long, value_name = "TEXT")]
	pub body: Option<String>,

	#[command(flatten)]
	pub message: MessageArgs,
}

/// A product name fragment with the number of units to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
	pub name: String,
	pub quantity: u32,
}

impl FromStr for ItemSpec {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (name, quantity) = match s.rsplit_once(':') {
			Some((name, qty)) => {
				let quantity = qty
					.trim()
					.parse::<u32>()
					.map_err(|_| format!("invalid quantity '{qty}' in '{s}'"))?;
				if quantity == 0 {
					return Err(format!("quantity must be at least 1 in '{s}'"));
				}
				(name, quantity)
			}
			None => (s, 1),
		};

		let name = name.trim();
		if name.is_empty() {
			return Err(format!("missing product name in '{s}'"));
		}
		Ok(Self {
			name: name.to_string(),
			quantity,
		})
	}
}
