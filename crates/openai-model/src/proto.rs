use raiox_model::{ModelMessage, ModelRequest, Sampling};
use serde::{Deserialize, Serialize};

use crate::OpenAIConfig;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub delta: Delta,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Delta {
    pub content: Option<String>,
}

/// The body of a non-success response.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<StreamOptions>,
    stream: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct StreamOptions {
    include_usage: bool,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        temperature: match req.sampling {
            Sampling::Deterministic => Some(0.0),
            Sampling::Provider => None,
        },
        stream_options: Some(StreamOptions {
            include_usage: true,
        }),
        stream: true,
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::System(content) => Message::System {
            content: content.clone(),
        },
        ModelMessage::User(content) => Message::User {
            content: content.clone(),
        },
        ModelMessage::Assistant(content) => Message::Assistant {
            content: content.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::OpenAIConfigBuilder;

    #[test]
    fn test_create_request() {
        let request = ModelRequest::deterministic(vec![
            ModelMessage::System("Você é um assistente.".to_owned()),
            ModelMessage::User("Qual o município?".to_owned()),
            ModelMessage::Assistant("São Paulo.".to_owned()),
        ]);
        let config = OpenAIConfigBuilder::with_api_key("xxx")
            .with_model("custom")
            .build();
        let expected = ChatCompletionRequest {
            model: "custom".to_owned(),
            messages: vec![
                Message::System {
                    content: "Você é um assistente.".to_owned(),
                },
                Message::User {
                    content: "Qual o município?".to_owned(),
                },
                Message::Assistant {
                    content: "São Paulo.".to_owned(),
                },
            ],
            temperature: Some(0.0),
            stream_options: Some(StreamOptions {
                include_usage: true,
            }),
            stream: true,
        };
        assert_eq!(create_request(&request, &config), expected);
    }

    #[test]
    fn test_wire_format() {
        let mut request = ModelRequest::deterministic(vec![
            ModelMessage::User("Oi".to_owned()),
        ]);
        let config = OpenAIConfigBuilder::with_api_key("xxx").build();
        assert_eq!(
            serde_json::to_value(create_request(&request, &config)).unwrap(),
            json!({
                "model": "gpt-4o-mini",
                "messages": [{ "role": "user", "content": "Oi" }],
                "temperature": 0.0,
                "stream_options": { "include_usage": true },
                "stream": true
            })
        );

        request.sampling = Sampling::Provider;
        let value =
            serde_json::to_value(create_request(&request, &config)).unwrap();
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_parse_error_body() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#,
        )
        .unwrap();
        assert_eq!(body.error.message, "Incorrect API key provided");
    }
}
