/// Gemini text generation provider
///
/// Both operations go through the `generateContent` endpoint with a JSON response
/// requested, so the model answers with a small object we can deserialize:
///
/// 1. Suggestions: `{"recommendations": "Title A, Title B"}`
/// 2. Summaries: `{"summary": "..."}`
///
/// Anything else (non-2xx status, no candidates, a body that is not the expected JSON)
/// is reported as an external API error.
use crate::{
    error::{AppError, AppResult},
    models::SummaryRequest,
    services::providers::TextGenerator,
};
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiGenerator {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendationOutput {
    recommendations: String,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary: String,
}

impl GeminiGenerator {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
        })
    }

    fn recommendation_prompt(viewing_history: &str) -> String {
        format!(
            "Based on the following viewing history: {viewing_history},\n\
             recommend a list of comma separated movies and series that the user might enjoy.\n\
             Do not explain your recommendation, just list the titles.\n\
             Respond with a JSON object of the form {{\"recommendations\": \"<comma separated titles>\"}}."
        )
    }

    fn summary_prompt(request: &SummaryRequest) -> String {
        let mut prompt = String::from(
            "You are an AI assistant designed to provide concise and informative summaries of movies and series.\n\n\
             Please generate a summary for the following title:\n",
        );
        prompt.push_str(&format!("Title: {}\n", request.title));
        if let Some(genre) = &request.genre {
            prompt.push_str(&format!("Genre: {}\n", genre));
        }
        if let Some(keywords) = &request.keywords {
            prompt.push_str(&format!("Keywords: {}\n", keywords));
        }
        prompt.push_str("\nRespond with a JSON object of the form {\"summary\": \"<summary>\"}.");
        prompt
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        })
    }

    /// Concatenates the text parts of the first candidate
    fn extract_text(response: GenerateContentResponse) -> AppResult<String> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .ok_or_else(|| AppError::ExternalApi("Gemini returned no candidates".to_string()))?;

        if text.trim().is_empty() {
            return Err(AppError::ExternalApi(
                "Gemini returned an empty candidate".to_string(),
            ));
        }

        Ok(text)
    }

    fn parse_output<T: DeserializeOwned>(text: &str) -> AppResult<T> {
        serde_json::from_str(text.trim()).map_err(|e| {
            AppError::ExternalApi(format!("Unexpected Gemini output format: {}", e))
        })
    }

    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let response: GenerateContentResponse = response.json().await?;
        Self::extract_text(response)
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiGenerator {
    async fn suggest_titles(&self, viewing_history: &str) -> AppResult<String> {
        let text = self
            .generate(&Self::recommendation_prompt(viewing_history))
            .await?;
        let output: RecommendationOutput = Self::parse_output(&text)?;

        tracing::info!(
            provider = self.name(),
            suggestions = output.recommendations.split(',').count(),
            "Title suggestions generated"
        );

        Ok(output.recommendations)
    }

    async fn summarize(&self, request: &SummaryRequest) -> AppResult<String> {
        let text = self.generate(&Self::summary_prompt(request)).await?;
        let output: SummaryOutput = Self::parse_output(&text)?;

        tracing::info!(
            provider = self.name(),
            title = %request.title,
            "Summary generated"
        );

        Ok(output.summary)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_recommendation_prompt_includes_history() {
        let prompt = GeminiGenerator::recommendation_prompt("Cosmic Odyssey, City of Shadows");

        assert!(prompt.contains("viewing history: Cosmic Odyssey, City of Shadows,"));
        assert!(prompt.contains("just list the titles"));
    }

    #[test]
    fn test_summary_prompt_skips_missing_fields() {
        let request = SummaryRequest {
            title: "Inception".to_string(),
            genre: None,
            keywords: Some("dreams".to_string()),
        };

        let prompt = GeminiGenerator::summary_prompt(&request);

        assert!(prompt.contains("Title: Inception\n"));
        assert!(!prompt.contains("Genre:"));
        assert!(prompt.contains("Keywords: dreams\n"));
    }

    #[test]
    fn test_request_body_asks_for_json() {
        let body = GeminiGenerator::request_body("hello");

        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let text = GeminiGenerator::extract_text(response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"recommendations\": " }, { "text": "\"A, B\"}" }] }
            }]
        })))
        .unwrap();

        let output: RecommendationOutput = GeminiGenerator::parse_output(&text).unwrap();
        assert_eq!(output.recommendations, "A, B");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let result = GeminiGenerator::extract_text(response(json!({ "candidates": [] })));
        assert!(matches!(result, Err(AppError::ExternalApi(_))));

        let result = GeminiGenerator::extract_text(response(json!({})));
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_extract_text_blank_candidate() {
        let result = GeminiGenerator::extract_text(response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        })));
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_parse_output_rejects_free_text() {
        let result: AppResult<SummaryOutput> =
            GeminiGenerator::parse_output("Here is your summary: it is great");
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_api_key() {
        let generator = GeminiGenerator::new(
            "SUPERSECRETKEY".to_string(),
            "http://127.0.0.1:1".to_string(),
            "gemini-test".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = generator.suggest_titles("Heat").await.unwrap_err();

        assert!(matches!(err, AppError::HttpClient(_)));
        assert!(!err.to_string().contains("SUPERSECRETKEY"));
        assert!(!format!("{:?}", err).contains("SUPERSECRETKEY"));
    }

    #[test]
    fn test_parse_output_summary() {
        let output: SummaryOutput =
            GeminiGenerator::parse_output(" {\"summary\": \"A thief enters dreams.\"} ").unwrap();
        assert_eq!(output.summary, "A thief enters dreams.");
    }
}
