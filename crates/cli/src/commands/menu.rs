use std::time::Instant;

use cafe::{BrowserSession, MenuItem};

use super::{Context, finish};
use crate::cli::PageArgs;
use crate::error::Result;

pub async fn run(ctx: &Context, args: PageArgs) -> Result<()> {
	let start = Instant::now();
	let url = ctx.config.page_url(args.url.as_deref())?;

	let mut session = ctx.cafe_session(&args).await?;
	let outcome = read_menu(ctx, &mut session, &url).await;
	finish(session).await;

	ctx.emit("menu", start, outcome?);
	Ok(())
}

async fn read_menu(ctx: &Context, session: &mut BrowserSession, url: &str) -> Result<Vec<MenuItem>> {
	let mut cafe = ctx.controller(session);
	cafe.open(url).await?;
	Ok(cafe.read_menu().await?)
}
