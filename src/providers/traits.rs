use async_trait::async_trait;

/// Text-generation collaborator.
///
/// Implementations perform one blocking, network-bound completion per call.
/// Any network or HTTP failure is returned as an error; callers decide how
/// to fold it into a user-facing reply.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the raw text of the first completion choice, or an empty
    /// string when the upstream produced none.
    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String>;
}
