use clap::Parser;
use mindspark_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli::bootstrap()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run(config).await,
        Command::Ask(args) => cli::ask::run(config, args).await,
        Command::Providers => cli::providers::run(&config),
    }
}
