//! Wire types for the chat completions endpoint.
//!
//! These mirror the OpenAI chat-completions JSON shapes: one user turn
//! whose content mixes a text segment with zero or more `image_url`
//! attachments given as data URIs.

use oculi_core::completion::CompletionRequest;
use serde::{Deserialize, Serialize};

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation turns; always a single user turn for this driver.
    pub messages: Vec<ChatMessage>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Builds the wire request for a completion request.
    ///
    /// The user turn's content is the prompt text followed by each image
    /// wrapped as a data-URI attachment, in order.
    pub fn from_completion(request: &CompletionRequest) -> Self {
        let mut content = Vec::with_capacity(1 + request.image_count());
        content.push(ContentPart::Text {
            text: request.prompt.clone(),
        });
        content.extend(request.images.iter().map(|image| ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: image.data_uri(),
            },
        }));

        Self {
            model: request.model.clone(),
            messages: vec![ChatMessage {
                role: Role::User,
                content,
            }],
            max_tokens: request.max_tokens,
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role of the speaker.
    pub role: Role,
    /// Mixed text and image content segments.
    pub content: Vec<ContentPart>,
}

/// Speaker role for a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user turn.
    User,
}

/// One content segment of a turn.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text segment.
    Text {
        /// The text content.
        text: String,
    },
    /// Image attachment segment.
    ImageUrl {
        /// The image reference.
        image_url: ImageUrl,
    },
}

/// Image reference wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// Data URI embedding the image bytes.
    pub url: String,
}

/// Chat completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; the first one carries the reply.
    pub choices: Vec<ChatChoice>,
    /// Model that produced the response, if echoed back.
    #[serde(default)]
    pub model: Option<String>,
    /// Token usage, if reported.
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant message.
    pub message: ChatChoiceMessage,
    /// Reason why generation finished.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message within a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    /// Reply text; absent for refusals or malformed responses.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage as reported by the endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Number of tokens in the completion.
    #[serde(default)]
    pub completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use oculi_core::completion::{ImageInput, MediaType};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_shape_with_images() {
        let image = ImageInput::from_bytes(b"png bytes", MediaType::Png).unwrap();
        let request = CompletionRequest::new("test-model", "What is shown?")
            .with_images(vec![image])
            .with_max_tokens(128000);

        let wire = ChatCompletionRequest::from_completion(&request);
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(value["model"], "test-model");
        assert_eq!(value["max_tokens"], 128000);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
        assert_eq!(value["messages"][0]["content"][0]["text"], "What is shown?");
        assert_eq!(value["messages"][0]["content"][1]["type"], "image_url");

        let url = value["messages"][0]["content"][1]["image_url"]["url"]
            .as_str()
            .unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_request_shape_text_only() {
        let request = CompletionRequest::new("test-model", "Question");
        let wire = ChatCompletionRequest::from_completion(&request);
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(value["messages"][0]["content"].as_array().unwrap().len(), 1);
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn test_image_order_is_preserved() {
        let first = ImageInput::from_bytes(b"first", MediaType::Png).unwrap();
        let second = ImageInput::from_bytes(b"second", MediaType::Jpeg).unwrap();
        let request =
            CompletionRequest::new("m", "q").with_images(vec![first.clone(), second.clone()]);

        let wire = ChatCompletionRequest::from_completion(&request);
        let value = serde_json::to_value(&wire).unwrap();
        let content = value["messages"][0]["content"].as_array().unwrap();

        assert_eq!(
            content[1]["image_url"]["url"].as_str().unwrap(),
            first.data_uri()
        );
        assert_eq!(
            content[2]["image_url"]["url"].as_str().unwrap(),
            second.data_uri()
        );
    }

    #[test]
    fn test_response_parsing() {
        let body = json!({
            "id": "chatcmpl-123",
            "model": "test-model",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "<answer>42</answer>" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        });

        let response: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("<answer>42</answer>")
        );
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.as_ref().unwrap().prompt_tokens, 10);
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let body = json!({ "choices": [{ "message": {} }] });
        let response: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        assert!(response.choices[0].message.content.is_none());
        assert!(response.model.is_none());
        assert!(response.usage.is_none());
    }
}
