use clap::Parser;
use formtrack::FormtrackError;
use formtrack::cli::commands;
use formtrack::cli::{Cli, Commands};
use formtrack::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        // Keep going; diagnostics are best-effort
    }

    let result = match &cli.command {
        Commands::Init(args) => commands::init::execute(args, &cli.config),
        Commands::Submit(args) => commands::submit::execute(args, cli.json, &cli.config),
        Commands::SetStatus(args) => commands::set_status::execute(args, cli.json, &cli.config),
        Commands::Show { id } => commands::show::execute(id, cli.json, &cli.config),
    };

    if let Err(e) = result {
        handle_error(&e);
    }
}

fn handle_error(err: &FormtrackError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(err.exit_code());
}
