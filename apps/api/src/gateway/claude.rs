use async_trait::async_trait;
use tracing::info;

use crate::builder::{FormVariant, SuggestionSet};
use crate::gateway::prompts::analysis_instruction;
use crate::gateway::{GatewayError, ImageAnalyzer, ImagePayload};
use crate::llm_client::{ContentPart, LlmClient};

/// Vision backend calling Claude through `LlmClient`.
///
/// Built without a client when no API key is configured; every call then fails with
/// `GatewayError::MissingCredential` instead of reaching the network.
#[derive(Clone)]
pub struct ClaudeImageAnalyzer {
    llm: Option<LlmClient>,
}

impl ClaudeImageAnalyzer {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }
}

#[async_trait]
impl ImageAnalyzer for ClaudeImageAnalyzer {
    async fn analyze(
        &self,
        image: &ImagePayload,
        variant: FormVariant,
    ) -> Result<SuggestionSet, GatewayError> {
        let llm = self.llm.as_ref().ok_or(GatewayError::MissingCredential)?;
        if image.is_empty() {
            return Err(GatewayError::MissingImage);
        }

        let instruction = analysis_instruction(variant);
        let content = [
            ContentPart::base64_image(&image.media_type, &image.data),
            ContentPart::text(&instruction),
        ];

        let response = llm.call(&content, None).await?;
        let text = response.text().ok_or(GatewayError::NonTextReply)?;
        let suggestions = SuggestionSet::from_json(variant, text)?;

        info!(
            "Image analysis complete: variant={:?}, categories={}",
            variant,
            suggestions.iter().count()
        );
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Category;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `reply` as the Messages API response on a random local port.
    async fn mock_messages_api(reply: Value) -> String {
        let app = Router::new().route(
            "/v1/messages",
            post(move |Json(req): Json<Value>| {
                let reply = reply.clone();
                async move {
                    assert_eq!(req["messages"][0]["content"][0]["type"], "image");
                    Json(reply)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/messages")
    }

    fn analyzer_for(endpoint: String) -> ClaudeImageAnalyzer {
        ClaudeImageAnalyzer::new(Some(
            LlmClient::with_endpoint("test-key".into(), endpoint).unwrap(),
        ))
    }

    fn text_reply(text: &str) -> Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_network() {
        let analyzer = ClaudeImageAnalyzer::new(None);
        let image = ImagePayload::from_base64("AAAA", None);
        let err = analyzer
            .analyze(&image, FormVariant::Classic)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential));
        assert!(!analyzer.is_configured());
    }

    #[tokio::test]
    async fn test_valid_reply_parses() {
        let endpoint = mock_messages_api(text_reply(
            r#"{"context":["a"],"persona":["b"],"techStack":["React"]}"#,
        ))
        .await;
        let image = ImagePayload::from_base64("AAAA", Some("image/jpeg"));
        let s = analyzer_for(endpoint)
            .analyze(&image, FormVariant::Classic)
            .await
            .unwrap();
        assert_eq!(s.get(Category::TechStack), ["React"]);
    }

    #[tokio::test]
    async fn test_fenced_reply_is_malformed() {
        let endpoint = mock_messages_api(text_reply(
            "```json\n{\"context\":[],\"persona\":[],\"techStack\":[]}\n```",
        ))
        .await;
        let image = ImagePayload::from_base64("AAAA", None);
        let err = analyzer_for(endpoint)
            .analyze(&image, FormVariant::Classic)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn test_non_text_reply() {
        let endpoint = mock_messages_api(json!({
            "content": [{"type": "tool_use"}],
            "usage": {"input_tokens": 10, "output_tokens": 0}
        }))
        .await;
        let image = ImagePayload::from_base64("AAAA", None);
        let err = analyzer_for(endpoint)
            .analyze(&image, FormVariant::Split)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NonTextReply));
    }
}
