use std::time::Duration;

use async_trait::async_trait;
use mufrodat_assistant::{
    AssistError, ProviderMetadata, VocabularyAssistant, parse_prompt, parse_quiz_response,
    parse_schema, parse_vocabulary_response, quiz_prompt, quiz_schema,
};
use mufrodat_config::assistant::AssistantConfig;
use mufrodat_types::{EntryDraft, QuizQuestion, VocabularyEntry};
use serde_json::{Value, json};

/// Gemini `generateContent` client with structured JSON output
#[derive(Clone)]
pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiAssistant {
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send one prompt and return the JSON text of the first candidate
    async fn generate(&self, prompt: String, schema: Value) -> Result<String, AssistError> {
        if self.api_key.is_empty() {
            return Err(AssistError::AuthenticationError);
        }

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(&prompt, schema))
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(AssistError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(AssistError::AuthenticationError);
        }

        if !status.is_success() {
            return Err(AssistError::ApiError(format!("HTTP {}", status)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AssistError::ApiError(format!("Failed to parse response: {}", e)))?;

        candidate_text(&json)
    }
}

fn request_body(prompt: &str, schema: Value) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
        }
    })
}

fn candidate_text(json: &Value) -> Result<String, AssistError> {
    let parts = json["candidates"]
        .get(0)
        .and_then(|c| c["content"]["parts"].as_array())
        .ok_or_else(|| AssistError::InvalidResponse("No candidate in response".to_string()))?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        return Err(AssistError::InvalidResponse("Empty candidate".to_string()));
    }

    Ok(text)
}

#[async_trait]
impl VocabularyAssistant for GeminiAssistant {
    async fn parse_vocabulary(&self, text: &str) -> Result<Vec<EntryDraft>, AssistError> {
        tracing::debug!("Asking {} to parse {} bytes", self.model, text.len());
        let reply = self.generate(parse_prompt(text), parse_schema()).await?;
        parse_vocabulary_response(&reply)
    }

    async fn generate_quiz(
        &self,
        entries: &[VocabularyEntry],
        count: usize,
    ) -> Result<Vec<QuizQuestion>, AssistError> {
        tracing::debug!("Asking {} for {} questions", self.model, count);
        let reply = self
            .generate(quiz_prompt(entries, count), quiz_schema(count))
            .await?;
        parse_quiz_response(&reply)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        // Unroutable URL: reaching the network would give a NetworkError instead
        let assistant = GeminiAssistant::from_config(&AssistantConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..AssistantConfig::default()
        })
        .unwrap();

        let result = assistant.parse_vocabulary("- قَلَمٌ\npena").await;
        assert!(matches!(result, Err(AssistError::AuthenticationError)));
    }

    #[test]
    fn test_endpoint_and_body() {
        let assistant = GeminiAssistant::from_config(&AssistantConfig {
            api_key: "k".to_string(),
            api_url: "https://example.test/v1beta/".to_string(),
            model: "gemini-2.5-flash".to_string(),
            ..AssistantConfig::default()
        })
        .unwrap();
        assert_eq!(
            assistant.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(assistant.metadata().model, "gemini-2.5-flash");

        let body = request_body("hi", parse_schema());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["vocabulary"])
        );
    }

    #[test]
    fn test_candidate_text() {
        let reply = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"quiz\": []}" }] } }]
        });
        assert_eq!(candidate_text(&reply).unwrap(), "{\"quiz\": []}");

        assert!(matches!(
            candidate_text(&json!({ "candidates": [] })),
            Err(AssistError::InvalidResponse(_))
        ));
    }
}
