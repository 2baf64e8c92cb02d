use super::TelegramChannel;
use crate::channels::traits::{Channel, ChannelMessage};
use crate::providers::scrub_secret_patterns;
use async_trait::async_trait;
use std::time::Duration;

const POLL_TIMEOUT_SECS: u64 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(5);

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn max_message_length(&self) -> usize {
        4096
    }

    async fn send(&self, message: &str, chat_id: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": message,
        });

        let resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("{}", scrub_secret_patterns(&e.to_string())))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            anyhow::bail!("Telegram sendMessage failed ({status}): {err}");
        }

        Ok(())
    }

    async fn listen(&self, tx: tokio::sync::mpsc::Sender<ChannelMessage>) -> anyhow::Result<()> {
        let mut offset: i64 = 0;

        tracing::info!("Telegram channel listening for messages...");

        loop {
            let body = serde_json::json!({
                "offset": offset,
                "timeout": POLL_TIMEOUT_SECS,
                "allowed_updates": ["message"]
            });

            let resp = match self
                .client
                .post(self.api_url("getUpdates"))
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(
                        "Telegram poll error: {}",
                        scrub_secret_patterns(&e.to_string())
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };

            let data: serde_json::Value = match resp.json().await {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Telegram parse error: {e}");
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };

            let Some(results) = data.get("result").and_then(serde_json::Value::as_array) else {
                continue;
            };

            for update in results {
                if let Some(uid) = update.get("update_id").and_then(serde_json::Value::as_i64) {
                    offset = uid + 1;
                }

                let Some(msg) = self.parse_update(update) else {
                    continue;
                };

                if tx.send(msg).await.is_err() {
                    return Ok(());
                }
            }
        }
    }

    async fn health_check(&self) -> bool {
        self.client
            .get(self.api_url("getMe"))
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}
