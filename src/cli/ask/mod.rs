//! Ask command - one message through the chain, printed to stdout

use clap::Args;

use crate::config::AppConfig;
use crate::domain::ChatRequest;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Message text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    words: Vec<String>,

    /// Prefix the reply with the answering provider's badge
    #[arg(long)]
    badges: bool,

    /// Print the attempt trace to stderr
    #[arg(long, short)]
    verbose: bool,
}

impl AskArgs {
    pub fn message(&self) -> String {
        self.words.join(" ")
    }
}

pub async fn run(config: AppConfig, args: AskArgs) -> anyhow::Result<()> {
    let state = crate::create_app_state_with_config(&config)?
        .with_badges(args.badges || config.chat.show_badges);

    let request = ChatRequest::new(args.message())?;
    let result = state.chain.resolve(&request).await?;

    if args.verbose {
        for attempt in &result.attempts {
            eprintln!(
                "{:<12} {:<14} {} ms",
                attempt.provider, attempt.outcome, attempt.latency_ms
            );
        }
        eprintln!("source: {}", result.reply.source);
    }

    println!("{}", state.render_reply(&result.reply));

    Ok(())
}
