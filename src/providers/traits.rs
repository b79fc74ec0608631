use async_trait::async_trait;

/// A text-generation backend: one self-contained prompt in, one text out.
///
/// Every call is a fresh request; the provider holds no session state and the
/// caller performs no retries.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Submit an instruction string and return the generated text.
    ///
    /// `temperature: None` leaves sampling at the provider's default;
    /// `Some(t)` pins it for creativity-controlled regeneration.
    async fn generate(
        &self,
        system_prompt: Option<&str>,
        prompt: &str,
        model: &str,
        temperature: Option<f64>,
    ) -> anyhow::Result<String>;
}
