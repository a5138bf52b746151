//! Word translation through public web endpoints

use reqwest::{Client, Url};
use serde_json::Value;

use super::error::ServiceError;

/// Which translation endpoint to ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationProvider {
    /// Google `translate_a/single` endpoint
    Google,
    /// MyMemory translation memory
    MyMemory,
}

/// HTTP client for translation lookups
#[derive(Debug, Clone)]
pub struct TranslateClient {
    client: Client,
}

impl TranslateClient {
    const GOOGLE_URL: &'static str = "https://translate.googleapis.com/translate_a/single";
    const MYMEMORY_URL: &'static str = "https://api.mymemory.translated.net/get";

    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Translate `token` from `source` to `target`
    pub async fn translate(
        &self,
        provider: TranslationProvider,
        token: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError> {
        let url = request_url(provider, token, source, target)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api { status: status.as_u16(), message });
        }

        let body: Value = response.json().await?;
        match provider {
            TranslationProvider::Google => parse_google(&body),
            TranslationProvider::MyMemory => parse_mymemory(&body),
        }
    }
}

/// Build the lookup URL for `provider`
pub fn request_url(
    provider: TranslationProvider,
    token: &str,
    source: &str,
    target: &str,
) -> Result<Url, ServiceError> {
    let langpair = format!("{}|{}", source, target);
    let result = match provider {
        TranslationProvider::Google => Url::parse_with_params(
            TranslateClient::GOOGLE_URL,
            &[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t"), ("q", token)],
        ),
        TranslationProvider::MyMemory => Url::parse_with_params(
            TranslateClient::MYMEMORY_URL,
            &[("q", token), ("langpair", langpair.as_str())],
        ),
    };
    result.map_err(|e| ServiceError::Url(e.to_string()))
}

/// Google answers with nested arrays: `[[["hello","你好",...], ...], ...]`
fn parse_google(body: &Value) -> Result<String, ServiceError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ServiceError::Parse("missing translation segments".into()))?;

    let text: String =
        segments.iter().filter_map(|s| s.get(0).and_then(Value::as_str)).collect();

    if text.is_empty() {
        return Err(ServiceError::Parse("empty translation".into()));
    }
    Ok(text)
}

/// MyMemory reports its own status inside the body, as a number or a string
fn parse_mymemory(body: &Value) -> Result<String, ServiceError> {
    let status = match &body["responseStatus"] {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()).unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    };

    if status != 200 {
        let message = body["responseDetails"].as_str().unwrap_or("unknown error").to_string();
        return Err(ServiceError::Api { status, message });
    }

    body["responseData"]["translatedText"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Parse("missing translatedText".into()))
}
