use async_trait::async_trait;

/// A message received from a chat channel.
///
/// `sender` is the conversation to reply into (the Telegram chat id), not
/// necessarily the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub id: String,
    pub sender: String,
    pub username: Option<String>,
    pub content: String,
    pub channel: String,
    /// Audio message; `content` is empty until a transcriber fills it.
    pub is_voice: bool,
    pub timestamp: u64,
}

/// Transport for incoming user messages and outgoing replies.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, message: &str, recipient: &str) -> anyhow::Result<()>;

    /// Long-running receive loop. Returns once `tx` is closed.
    async fn listen(&self, tx: tokio::sync::mpsc::Sender<ChannelMessage>) -> anyhow::Result<()>;

    async fn health_check(&self) -> bool {
        true
    }

    fn max_message_length(&self) -> usize {
        usize::MAX
    }

    async fn send_chunked(&self, message: &str, recipient: &str) -> anyhow::Result<()> {
        for chunk in super::chunker::chunk_message(message, self.max_message_length()) {
            self.send(&chunk, recipient).await?;
        }
        Ok(())
    }
}
