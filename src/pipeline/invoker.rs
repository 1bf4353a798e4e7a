use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const EXTRACTION_MODEL: &str = "openai/gpt-4o-mini";
const SYSTEM_PROMPT: &str = "You extract structured medical data from checkup slips.";
const MAX_COMPLETION_TOKENS: u32 = 800;

/// One round trip to the model: prompt in, raw completion text out.
///
/// Which implementation runs depends on what the request carried; the
/// caller dispatches through `dyn ModelInvoker` and never cares which.
/// A single attempt per call, no retries.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Sends the prompt together with the checkup slip image in one
/// multimodal request.
pub struct VisionInvoker {
    http: Client,
    api_key: String,
    image_url: String,
}

impl VisionInvoker {
    pub fn new(http: Client, api_key: String, image_url: String) -> Self {
        Self {
            http,
            api_key,
            image_url,
        }
    }
}

#[async_trait]
impl ModelInvoker for VisionInvoker {
    async fn invoke(&self, prompt: &str) -> anyhow::Result<String> {
        let content = vec![
            json!({ "type": "text", "text": prompt }),
            json!({
                "type": "image_url",
                "image_url": { "url": self.image_url }
            }),
        ];
        call_chat_completion(&self.http, &self.api_key, content).await
    }
}

/// Sends the prompt alone; the OCR text is already embedded in it.
pub struct TextInvoker {
    http: Client,
    api_key: String,
}

impl TextInvoker {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl ModelInvoker for TextInvoker {
    async fn invoke(&self, prompt: &str) -> anyhow::Result<String> {
        let content = vec![json!({ "type": "text", "text": prompt })];
        call_chat_completion(&self.http, &self.api_key, content).await
    }
}

/// Shared OpenRouter chat-completion call. Pulls the single text
/// completion out of the provider envelope.
async fn call_chat_completion(
    http: &Client,
    api_key: &str,
    content: Vec<Value>,
) -> anyhow::Result<String> {
    let payload = json!({
        "model": EXTRACTION_MODEL,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": content }
        ],
        "max_tokens": MAX_COMPLETION_TOKENS
    });

    let response = http
        .post(OPENROUTER_URL)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("LLM API request failed: {}", response.status()));
    }

    let body: Value = response.json().await?;

    let text = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow!("Invalid response format from LLM"))?;

    Ok(text.to_string())
}
