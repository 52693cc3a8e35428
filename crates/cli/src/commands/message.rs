use std::time::Instant;

use cafe::BrowserSession;

use super::{Context, finish, order};
use crate::cli::MessageArgs;
use crate::error::Result;

pub async fn run(ctx: &Context, args: MessageArgs) -> Result<()> {
	let start = Instant::now();
	let text = compose(ctx, &args).await?;
	ctx.emit("message", start, text);
	Ok(())
}

/// Opens the page, applies any requested order and renders the message.
pub(super) async fn compose(ctx: &Context, args: &MessageArgs) -> Result<String> {
	let url = ctx.config.page_url(args.order.page.url.as_deref())?;

	let mut session = ctx.cafe_session(&args.order.page).await?;
	let outcome = compose_on_page(ctx, &mut session, &url, args).await;
	finish(session).await;
	outcome
}

async fn compose_on_page(ctx: &Context, session: &mut BrowserSession, url: &str, args: &MessageArgs) -> Result<String> {
	let mut cafe = ctx.controller(session);
	cafe.open(url).await?;
	if args.order.has_products() {
		order::apply(&mut cafe, &args.order, ctx.config.pace(args.order.pace_ms)).await?;
	}
	Ok(cafe.compose_message(&ctx.config.template, args.with_cart).await?)
}
