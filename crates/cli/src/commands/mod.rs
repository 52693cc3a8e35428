//! Command implementations.
//!
//! Each command acquires its own browser session and releases it before
//! printing, whether or not the automation succeeded.

mod mail;
mod menu;
mod message;
mod order;
mod send;

use std::time::Instant;

use cafe::{BrowserKind, BrowserSession, CafeController, ChatContract, SessionConfig, WebDriver};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::cli::{Cli, Commands, PageArgs};
use crate::config::CafeConfig;
use crate::error::Result;
use crate::output::{self, OutputFormat, ResultBuilder};

/// Settings every command shares.
pub struct Context {
	pub config: CafeConfig,
	pub format: OutputFormat,
	webdriver: Option<String>,
	browser: Option<BrowserKind>,
}

impl Context {
	pub fn new(config: CafeConfig, format: OutputFormat, webdriver: Option<String>, browser: Option<BrowserKind>) -> Self {
		Self {
			config,
			format,
			webdriver,
			browser,
		}
	}

	/// Launches a browser for the cafeteria page.
	pub async fn cafe_session(&self, page: &PageArgs) -> Result<BrowserSession> {
		let preset = SessionConfig::cafeteria(self.config.headless(page.headed));
		let config = self.config.session(preset, self.webdriver.as_deref(), self.browser);
		Ok(BrowserSession::acquire(config).await?)
	}

	/// Launches a visible browser for the chat client.
	pub async fn chat_session(&self) -> Result<BrowserSession> {
		let config = self.config.session(SessionConfig::messaging(), self.webdriver.as_deref(), self.browser);
		Ok(BrowserSession::acquire(config).await?)
	}

	pub fn controller<'s>(&self, session: &'s mut BrowserSession) -> CafeController<'s, WebDriver> {
		CafeController::new(session).with_timings(self.config.cafe_timings())
	}

	pub fn chat_contract(&self) -> ChatContract {
		let mut contract = ChatContract::default();
		if let Some(url) = &self.config.chat_url {
			contract.base_url = url.clone();
		}
		contract
	}

	/// Prints a successful result envelope.
	pub fn emit<T: Serialize>(&self, command: &str, start: Instant, data: T) {
		let result = ResultBuilder::new(command).started_at(start).data(data).build();
		output::print_result(&result, self.format);
	}
}

pub async fn dispatch(cli: Cli) -> Result<()> {
	let config = CafeConfig::load(cli.config.as_deref())?;
	let ctx = Context::new(config, cli.format, cli.webdriver, cli.browser);

	match cli.command {
		Commands::Menu(args) => menu::run(&ctx, args).await,
		Commands::Order(args) => order::run(&ctx, args).await,
		Commands::Message(args) => message::run(&ctx, args).await,
		Commands::Send(args) => send::run(&ctx, args).await,
		Commands::Mail(args) => mail::run(&ctx, args).await,
	}
}

/// Releases the session, logging rather than failing the command.
async fn finish(mut session: BrowserSession) {
	if let Err(err) = session.release().await {
		warn!(target = "cafe", error = %err, "failed to release browser session");
	}
}

async fn wait_for_enter(prompt: &str) -> Result<()> {
	eprintln!("{prompt}");
	let mut line = String::new();
	BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
	Ok(())
}
