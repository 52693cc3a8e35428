use std::time::Instant;

use cafe::{Mailer, OutgoingMail};

use super::{Context, message};
use crate::cli::MailArgs;
use crate::error::{CliError, Result};

pub async fn run(ctx: &Context, args: MailArgs) -> Result<()> {
	let start = Instant::now();
	let from = match args.from {
		Some(from) => from,
		None if !ctx.config.smtp.username.is_empty() => ctx.config.smtp.username.clone(),
		None => return Err(CliError::MissingSender),
	};

	let body = match args.body {
		Some(body) => body,
		None => message::compose(ctx, &args.message).await?,
	};

	let mail = OutgoingMail {
		from,
		to: args.to,
		subject: args.subject,
		body,
	};
	let receipt = Mailer::new(ctx.config.smtp.clone()).deliver(&mail).await;
	let sent = receipt.sent;
	ctx.emit("mail", start, &receipt);

	if !sent {
		return Err(CliError::Undelivered { failed: 1, total: 1 });
	}
	Ok(())
}
