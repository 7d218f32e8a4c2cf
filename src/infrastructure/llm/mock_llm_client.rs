use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};

/// Recorded reply of the assessor model, reasoning trace included.
pub const SCAFFOLD_MODEL_OUTPUT: &str = r#"provided a response from an organization regarding their digital vision and strategy communication. The task is to analyze the root causes and assign a score between 1-10.

The organization's response states that the vision is partially defined but communication is inconsistent across departments, leading to misaligned priorities. Considering the root causes, this seems like a mid-level score.
</think>

<output>
  <root_causes>
    <cause>عدم یکپارچگی اطلاع‌رسانی چشم‌انداز دیجیتال در بین بخش‌های سازمانی منجر به تفاوت در برداشت اهداف می‌شود</cause>
    <cause>عدم مشارکت فعال ذی‌نفعان در فرآیند تعریف و انتقال استراتژی دیجیتال</cause>
    <cause>عدم ترجمه واضح چشم‌انداز به اولویت‌های عملیاتی قابل اجرا در تمام واحدها</cause>
    <cause>عدم وجود مکانیزم‌های بازخورد برای هماهنگی بین استراتژی و عملکردهای واقعی</cause>
    <cause>عدم تطبیق استراتژی دیجیتال با ساختار سازمانی فعلی و فرهنگ کاری</cause>
  </root_causes>
  <score>5</score>
</output>"#;

/// Stands in for the model server in scaffold mode.
pub struct MockLlmClient {
    response_delay: Duration,
}

impl MockLlmClient {
    pub fn new(response_delay: Duration) -> Self {
        Self { response_delay }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }
        Ok(SCAFFOLD_MODEL_OUTPUT.to_string())
    }
}
