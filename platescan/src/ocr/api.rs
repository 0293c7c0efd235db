use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ImageDetail, ImageUrlArgs,
    },
    Client,
};

use crate::{
    config::{parse_provider_model, ImageDetailLevel, OcrConfig},
    error::{PlateError, Result},
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_output_tokens: u32,
    detail: ImageDetailLevel,
}

/// Client for an OpenAI-compatible vision chat endpoint.
#[derive(Clone)]
pub struct VisionApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl VisionApiClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let api_config = ApiConfig::from_ocr_config(config);

        let (provider, _) = parse_provider_model(&config.model);
        let needs_api_key = !matches!(
            provider.to_lowercase().as_str(),
            "ollama" | "local" | "lmstudio"
        );

        if needs_api_key && api_config.api_key.is_none() {
            return Err(PlateError::OcrUnavailable(format!(
                "API key required for provider '{provider}'"
            )));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_config.api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                PlateError::Internal(format!("Failed to create OCR HTTP client: {error}"))
            })?;

        // Zero elapsed-time budget: async-openai makes exactly one attempt.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send one instruction plus one image and return the raw reply text.
    /// An empty reply is returned as an empty string.
    pub async fn complete(&self, prompt: &str, image_url: &str) -> Result<String> {
        let request = self.build_request(prompt, image_url)?;

        match self.client.chat().create(request).await {
            Ok(response) => Ok(Self::extract_content(response)),
            Err(error) => Err(Self::map_openai_error(error)),
        }
    }

    fn build_request(&self, prompt: &str, image_url: &str) -> Result<CreateChatCompletionRequest> {
        let text_part: ChatCompletionRequestUserMessageContentPart =
            ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(prompt)
                .build()
                .map_err(|error| PlateError::Internal(format!("Invalid OCR prompt: {error}")))?
                .into();

        let image = ImageUrlArgs::default()
            .url(image_url)
            .detail(image_detail(self.config.detail))
            .build()
            .map_err(|error| PlateError::Validation(format!("Invalid image reference: {error}")))?;

        let image_part: ChatCompletionRequestUserMessageContentPart =
            ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(image)
                .build()
                .map_err(|error| {
                    PlateError::Validation(format!("Invalid image reference: {error}"))
                })?
                .into();

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(vec![text_part, image_part])
            .build()
            .map_err(|error| PlateError::Internal(format!("Invalid OCR message: {error}")))?;

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .messages(vec![message.into()])
            .temperature(0.0)
            .max_tokens(self.config.max_output_tokens)
            .build()
            .map_err(|error| PlateError::Internal(format!("Invalid OCR request: {error}")))
    }

    fn extract_content(response: CreateChatCompletionResponse) -> String {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    fn map_openai_error(error: OpenAIError) -> PlateError {
        match error {
            OpenAIError::Reqwest(reqwest_error) if reqwest_error.is_timeout() => {
                PlateError::Ocr(format!("OCR request timed out: {reqwest_error}"))
            }
            OpenAIError::Reqwest(reqwest_error) => {
                PlateError::Ocr(format!("OCR request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                PlateError::Ocr(format!("OCR API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                PlateError::Ocr(format!("Failed to parse OCR response: {err}"))
            }
            other => PlateError::Ocr(other.to_string()),
        }
    }
}

impl ApiConfig {
    fn from_ocr_config(config: &OcrConfig) -> Self {
        let (provider, model) = parse_provider_model(&config.model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        Self {
            base_url,
            api_key: config.api_key.clone(),
            model: model.to_string(),
            max_output_tokens: config.max_output_tokens,
            detail: config.image_detail,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "openai" => OPENAI_BASE_URL,
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}

fn image_detail(level: ImageDetailLevel) -> ImageDetail {
    match level {
        ImageDetailLevel::Low => ImageDetail::Low,
        ImageDetailLevel::High => ImageDetail::High,
        ImageDetailLevel::Auto => ImageDetail::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(model: &str, api_key: Option<&str>) -> OcrConfig {
        OcrConfig {
            model: model.to_string(),
            api_key: api_key.map(String::from),
            ..OcrConfig::default()
        }
    }

    #[test]
    fn test_openai_client_requires_api_key() {
        let result = VisionApiClient::new(&make_config("openai/gpt-4o-mini", None));
        assert!(matches!(result, Err(PlateError::OcrUnavailable(_))));
    }

    #[test]
    fn test_local_providers_do_not_need_api_key() {
        let client = VisionApiClient::new(&make_config("ollama/llava", None)).unwrap();
        assert_eq!(client.base_url(), OLLAMA_BASE_URL);
        assert_eq!(client.model(), "llava");

        let client = VisionApiClient::new(&make_config("lmstudio/qwen2-vl", None)).unwrap();
        assert_eq!(client.base_url(), LMSTUDIO_BASE_URL);
    }

    #[test]
    fn test_default_base_urls() {
        let openai = VisionApiClient::new(&make_config("openai/gpt-4o-mini", Some("k"))).unwrap();
        assert_eq!(openai.base_url(), OPENAI_BASE_URL);
        assert_eq!(openai.model(), "gpt-4o-mini");

        let router =
            VisionApiClient::new(&make_config("openrouter/openai/gpt-4o", Some("k"))).unwrap();
        assert_eq!(router.base_url(), OPENROUTER_BASE_URL);
        assert_eq!(router.model(), "openai/gpt-4o");
    }

    #[test]
    fn test_custom_base_url() {
        let mut config = make_config("openai/gpt-4o-mini", Some("k"));
        config.base_url = Some("https://vision.internal/v1".to_string());

        let client = VisionApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://vision.internal/v1");
    }

    #[test]
    fn test_request_carries_decoding_parameters() {
        let client = VisionApiClient::new(&make_config("openai/gpt-4o-mini", Some("k"))).unwrap();
        let request = client
            .build_request("read the plate", "https://example.com/car.jpg")
            .unwrap();

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.messages.len(), 1);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["max_tokens"], 32);
        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "read the plate");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "https://example.com/car.jpg");
        assert_eq!(content[1]["image_url"]["detail"], "low");
    }
}
