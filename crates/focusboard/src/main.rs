mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View { filter } => commands::view::run(&filter),
        Commands::Export {
            filter,
            format,
            output,
        } => commands::export::run(&filter, format.into(), output.as_deref()),
        Commands::Send { filter, to, format } => commands::send::run(&filter, &to, format.into()),
        Commands::Charts => commands::charts::run(),
        Commands::Ingest { user } => commands::ingest::run(user.as_deref()),
        Commands::Init { force } => commands::init::run(force),
        Commands::Version => commands::version::run(),
    }
}
