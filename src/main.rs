mod dispatch;
mod files;
mod replies;

use clap::{Parser, Subcommand};
use mynah_core::config::Config;
use mynah_telegram::{polling, TelegramApi};
use tracing::info;

#[derive(Parser)]
#[command(name = "mynah", version, about = "Mynah — topic-aware Telegram reply bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot.
    Start,
    /// Verify configuration and the bot credential, then exit.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load()?;

    let default_filter = if cfg.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let api = TelegramApi::new(&cfg.bot_token).with_log_preview_limit(cfg.log_preview_limit);

    match cli.command {
        Commands::Start => {
            // A bad credential is fatal before the first poll.
            let me = api.get_me().await?;
            info!(
                "authorized as @{} (id {})",
                me.username.as_deref().unwrap_or(&me.first_name),
                me.id
            );

            let dispatcher = dispatch::Dispatcher::new(api.clone(), cfg.log_preview_limit);

            println!("Mynah — polling for updates (Ctrl-C to stop)");
            tokio::select! {
                res = polling::run(&api, &dispatcher) => res?,
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received, stopping");
                }
            }
        }
        Commands::Check => {
            let me = api.get_me().await?;
            println!("Mynah — credential check\n");
            println!("Bot: {} (id {})", me.first_name, me.id);
            if let Some(username) = me.username {
                println!("Username: @{username}");
            }
            println!("Debug logging: {}", if cfg.debug { "on" } else { "off" });
            println!("Log preview limit: {} characters", cfg.log_preview_limit);
        }
    }

    Ok(())
}
