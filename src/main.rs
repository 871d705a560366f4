use clap::Parser;
use snipvault::cli::{Cli, Commands};
use snipvault::vault::Notice;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Save {
            ref name,
            ref value,
        } => snipvault::cli::commands::save::execute(&cli, name, value.as_deref()),
        Commands::Get { ref name } => snipvault::cli::commands::get::execute(&cli, name),
        Commands::Update {
            ref name,
            ref value,
        } => snipvault::cli::commands::update::execute(&cli, name, value.as_deref()),
        Commands::Delete { ref name } => snipvault::cli::commands::delete::execute(&cli, name),
        Commands::Clear { force } => snipvault::cli::commands::clear::execute(&cli, force),
        Commands::List { json } => snipvault::cli::commands::list::execute(&cli, json),
        Commands::Version => snipvault::cli::commands::version::execute(),
        Commands::Completions { shell } => snipvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        snipvault::cli::output::notice(&Notice::from_error(&e));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays clean for `get` and `list --json`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("snipvault={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
