use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::builder::{FormVariant, SuggestionSet};
use crate::gateway::handlers::{AnalyzeImageRequest, ANALYZE_IMAGE_PATH};
use crate::gateway::{GatewayError, ImageAnalyzer, ImagePayload};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a running gateway: the same request a browser form sends.
#[derive(Clone)]
pub struct RemoteAnalyzer {
    client: Client,
    url: String,
}

impl RemoteAnalyzer {
    /// `base_url` is the service root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{ANALYZE_IMAGE_PATH}", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ImageAnalyzer for RemoteAnalyzer {
    async fn analyze(
        &self,
        image: &ImagePayload,
        variant: FormVariant,
    ) -> Result<SuggestionSet, GatewayError> {
        let body = AnalyzeImageRequest {
            image: Some(image.data.clone()),
            media_type: Some(image.media_type.clone()),
            variant: Some(variant),
        };

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(SuggestionSet::from_json(variant, &text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let r = RemoteAnalyzer::new("http://localhost:8080/");
        assert_eq!(r.url, "http://localhost:8080/api/analyze-image");
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let r = RemoteAnalyzer::new(&format!("http://{addr}"));
        let image = ImagePayload::from_base64("AAAA", None);
        let err = r.analyze(&image, FormVariant::Classic).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
