use crate::channels::{Channel, ChannelMessage, TelegramChannel};
use crate::config::Config;
use crate::intake::Intake;
use crate::intake::replies::{GENERIC_ERROR, VOICE_UNAVAILABLE};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

const INITIAL_BACKOFF_SECS: u64 = 2;
const MAX_BACKOFF_SECS: u64 = 60;

/// Run the Telegram loop until the listener stops or Ctrl-C arrives.
pub async fn serve(config: &Config, intake: Arc<Intake>) -> Result<()> {
    let telegram = config
        .telegram
        .as_ref()
        .context("telegram section missing; set TELEGRAM_BOT_TOKEN")?;
    let channel: Arc<dyn Channel> = Arc::new(TelegramChannel::from_config(telegram));

    if !channel.health_check().await {
        tracing::warn!("Telegram getMe failed; check the bot token. Polling anyway");
    }

    println!("Secretary:");
    println!("  > model: {}", config.llm.model);
    println!("  > backend: {}", config.backend.base_url);
    println!("  > memory: {}", config.memory_path().display());
    println!("  > channel: {}", channel.name());
    println!();
    println!("  Listening...");
    println!();

    let (tx, mut rx) = tokio::sync::mpsc::channel::<ChannelMessage>(100);
    let listener = spawn_supervised_listener(Arc::clone(&channel), tx);

    loop {
        tokio::select! {
            received = rx.recv() => {
                let Some(msg) = received else { break };
                let intake = Arc::clone(&intake);
                let channel = Arc::clone(&channel);
                tokio::spawn(async move {
                    handle_channel_message(intake.as_ref(), channel.as_ref(), &msg).await;
                });
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    listener.abort();
    Ok(())
}

/// Restart the listener with exponential back-off whenever it exits while
/// the receiver is still alive.
fn spawn_supervised_listener(
    ch: Arc<dyn Channel>,
    tx: tokio::sync::mpsc::Sender<ChannelMessage>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut backoff = INITIAL_BACKOFF_SECS;

        loop {
            tracing::debug!(channel = ch.name(), "channel listener starting");
            let result = ch.listen(tx.clone()).await;

            if tx.is_closed() {
                break;
            }

            match result {
                Ok(()) => {
                    tracing::warn!("Channel {} exited unexpectedly; restarting", ch.name());
                    backoff = INITIAL_BACKOFF_SECS;
                }
                Err(e) => {
                    tracing::error!("Channel {} error: {e}; restarting", ch.name());
                }
            }

            tokio::time::sleep(Duration::from_secs(backoff)).await;
            backoff = backoff.saturating_mul(2).min(MAX_BACKOFF_SECS);
        }
    })
}

/// Answer one incoming message on the channel it came from.
pub async fn handle_channel_message(intake: &Intake, channel: &dyn Channel, msg: &ChannelMessage) {
    tracing::info!(
        channel = %msg.channel,
        sender = %msg.sender,
        voice = msg.is_voice,
        "message received"
    );

    let reply = if msg.is_voice && msg.content.trim().is_empty() {
        Some(VOICE_UNAVAILABLE.to_string())
    } else {
        intake.handle_message(&msg.content).await
    };

    let Some(reply) = reply else {
        return;
    };

    if let Err(e) = channel.send_chunked(&reply, &msg.sender).await {
        tracing::error!("failed to reply on {}: {e}", channel.name());
        if let Err(e) = channel.send(GENERIC_ERROR, &msg.sender).await {
            tracing::debug!("fallback reply failed too: {e}");
        }
    }
}
