use cafe_cli::cli::Cli;
use cafe_cli::error::CliError;
use cafe_cli::output::{self, CommandResult, OutputFormat, ResultBuilder};
use cafe_cli::{commands, logging};
use clap::Parser;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command.name();

	if let Err(err) = commands::dispatch(cli).await {
		if err.is_output_already_printed() {
			eprintln!("Error: {err}");
		} else {
			handle_error(err, command, format);
		}
		std::process::exit(1);
	}
}

fn handle_error(err: CliError, command: &str, format: OutputFormat) {
	let cmd_error = err.to_command_error();

	// Always print to stderr for humans
	output::print_error_stderr(&cmd_error);

	// Also emit the envelope to stdout with ok=false for scripts
	if format != OutputFormat::Text {
		let result: CommandResult<()> = ResultBuilder::new(command).error(cmd_error).build();
		output::print_result(&result, format);
	}
}
