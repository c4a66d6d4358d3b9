use clap::Parser;
use sunburst::cli::commands::execute_command;
use sunburst::cli::{output, Cli};
use sunburst::util::logging::setup_logging;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}
