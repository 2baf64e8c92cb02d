use super::runtime::build_intake;
use super::serve::serve;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let needs_telegram = matches!(cli.command, Commands::Serve);
    config.validate(needs_telegram)?;

    let api_key_len = config.llm.api_key.as_deref().map_or(0, str::len);
    info!(
        set = api_key_len > 0,
        len = api_key_len,
        "OPENROUTER_API_KEY configured"
    );

    let intake = build_intake(&config);

    match cli.command {
        Commands::Serve => serve(&config, Arc::new(intake)).await,
        Commands::Ask { text } => {
            match intake.handle_message(&text.join(" ")).await {
                Some(reply) => println!("{reply}"),
                None => println!("(nada a responder)"),
            }
            Ok(())
        }
        Commands::Categories => {
            println!("{}", intake.list_categories().await);
            Ok(())
        }
    }
}
