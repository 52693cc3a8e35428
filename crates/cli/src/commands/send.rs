use std::time::Instant;

use cafe::{BrowserSession, DeliveryResult, DeliveryTarget, Dispatcher};
use tracing::info;

use super::{Context, finish, message, wait_for_enter};
use crate::cli::SendArgs;
use crate::error::{CliError, Result};

pub async fn run(ctx: &Context, args: SendArgs) -> Result<()> {
	let start = Instant::now();
	// reject bad targets before any browser is launched
	let targets = args
		.targets
		.iter()
		.map(|raw| DeliveryTarget::parse(raw))
		.collect::<std::result::Result<Vec<_>, _>>()?;

	let text = match args.text {
		Some(text) => text,
		None => message::compose(ctx, &args.message).await?,
	};

	let mut session = ctx.chat_session().await?;
	let outcome = deliver(ctx, &mut session, &targets, &text, args.no_pair).await;
	finish(session).await;
	let results = outcome?;

	let failed = results.iter().filter(|result| !result.delivered).count();
	info!(target = "cafe", delivered = results.len() - failed, failed, "dispatch finished");
	ctx.emit("send", start, &results);

	if failed > 0 {
		return Err(CliError::Undelivered {
			failed,
			total: results.len(),
		});
	}
	Ok(())
}

async fn deliver(
	ctx: &Context,
	session: &mut BrowserSession,
	targets: &[DeliveryTarget],
	text: &str,
	no_pair: bool,
) -> Result<Vec<DeliveryResult>> {
	let mut dispatcher = Dispatcher::new(session)
		.with_contract(ctx.chat_contract())
		.with_timings(ctx.config.dispatch_timings());

	dispatcher.open_client().await?;
	if !no_pair {
		wait_for_enter("Scan the QR code in the browser window if asked, then press Enter...").await?;
	}
	Ok(dispatcher.send_all(targets, text).await)
}
