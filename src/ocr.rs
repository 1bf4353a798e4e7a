use anyhow::anyhow;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

const OCR_SPACE_URL: &str = "https://api.ocr.space/parse/image";

/// Runs the hosted OCR engine against an image URL and returns the plain
/// text it read.
///
/// Follows the provider's quirks: the text of the first parsed result is
/// the answer, the provider's own error-message fields stand in when
/// parsing failed, and an empty string means it read nothing. Engine 2
/// with table mode reads checkup slips noticeably better than the default.
pub async fn extract_text_from_image(
    http: &Client,
    api_key: &str,
    image_url: &str,
) -> anyhow::Result<String> {
    info!("Sending OCR request for {}", image_url);

    let params = [
        ("url", image_url),
        ("OCREngine", "2"),
        ("isTable", "true"),
    ];

    let response = http
        .post(OCR_SPACE_URL)
        .header("apikey", api_key)
        .form(&params)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("OCR API request failed: {}", response.status()));
    }

    let body: Value = response.json().await?;

    let text = body["ParsedResults"][0]["ParsedText"]
        .as_str()
        .or_else(|| body["ErrorMessage"].as_str())
        .or_else(|| body["ErrorDetails"].as_str())
        .unwrap_or_default()
        .to_string();

    info!("OCR extracted {} characters", text.len());
    Ok(text)
}
