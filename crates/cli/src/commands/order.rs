use std::time::{Duration, Instant};

use cafe::{BrowserSession, CafeController, CartSnapshot, WebDriver};
use serde::Serialize;

use super::{Context, finish, wait_for_enter};
use crate::cli::OrderArgs;
use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedProduct {
	/// Product label, or `#<index>` for positional adds.
	pub product: String,
	pub quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOutcome {
	pub added: Vec<AddedProduct>,
	pub badge: u32,
	pub cart: CartSnapshot,
}

pub async fn run(ctx: &Context, args: OrderArgs) -> Result<()> {
	let start = Instant::now();
	let url = ctx.config.page_url(args.page.url.as_deref())?;

	let mut session = ctx.cafe_session(&args.page).await?;
	let mut outcome = place_order(ctx, &mut session, &url, &args).await;
	if args.hold && outcome.is_ok() {
		if let Err(err) = wait_for_enter("Press Enter to close the browser...").await {
			outcome = Err(err);
		}
	}
	finish(session).await;

	ctx.emit("order", start, outcome?);
	Ok(())
}

async fn place_order(ctx: &Context, session: &mut BrowserSession, url: &str, args: &OrderArgs) -> Result<OrderOutcome> {
	let mut cafe = ctx.controller(session);
	cafe.open(url).await?;
	let added = apply(&mut cafe, args, ctx.config.pace(args.pace_ms)).await?;

	Ok(OrderOutcome {
		added,
		badge: cafe.cart_badge().await?,
		cart: cafe.read_cart().await?,
	})
}

/// Adds the requested products in order: positions first, then names.
pub(super) async fn apply(cafe: &mut CafeController<'_, WebDriver>, args: &OrderArgs, pace: Duration) -> Result<Vec<AddedProduct>> {
	let mut added = Vec::with_capacity(args.indices.len() + args.items.len());

	for &index in &args.indices {
		cafe.add_by_index(index, pace).await?;
		added.push(AddedProduct {
			product: format!("#{index}"),
			quantity: 1,
		});
	}

	for item in &args.items {
		let label = cafe.add_by_name(&item.name, item.quantity, pace).await?;
		added.push(AddedProduct {
			product: label,
			quantity: item.quantity,
		});
	}

	if args.open_cart {
		cafe.open_cart_panel().await?;
	}
	if args.report {
		cafe.open_report().await?;
	}
	Ok(added)
}
