//! OpenAI chat-completions wire types.
//!
//! Requests borrow from hashi's own [`Message`] history; streamed chunks are
//! decoded into [`Fragment`]s.

use serde::{Deserialize, Serialize};

use super::error::ProviderError;
use super::fragment::{FinishReason, Fragment, ToolCallDelta};
use crate::message::{Message, Role, ToolCall};
use crate::tools::ToolSchema;

/// Marks the end of an SSE completion stream.
pub(super) const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSchema]>,
    stream: bool,
}

impl<'a> ChatCompletionRequest<'a> {
    pub(super) fn streaming(
        model: &'a str,
        messages: &'a [Message],
        tools: Option<&'a [ToolSchema]>,
    ) -> Self {
        Self {
            model,
            messages: messages.iter().map(WireMessage::from).collect(),
            tools: tools.filter(|t| !t.is_empty()),
            stream: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

impl<'a> From<&'a Message> for WireMessage<'a> {
    fn from(msg: &'a Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.as_deref(),
            tool_calls: msg.tool_calls.iter().map(WireToolCall::from).collect(),
            tool_call_id: msg.tool_call_id.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireToolCall<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Debug, Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    arguments: &'a str,
}

impl<'a> From<&'a ToolCall> for WireToolCall<'a> {
    fn from(call: &'a ToolCall) -> Self {
        Self {
            id: &call.id,
            kind: "function",
            function: WireFunction {
                name: &call.name,
                arguments: &call.arguments,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ChunkToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChunkToolCall {
    #[serde(default)]
    index: usize,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    function: Option<ChunkFunction>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkFunction {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

/// Decodes one SSE `data:` payload.
///
/// Returns `Ok(None)` for chunks without choices (usage trailers, keep-alives).
pub(super) fn decode_chunk(data: &str) -> Result<Option<Fragment>, ProviderError> {
    let chunk: ChatCompletionChunk = serde_json::from_str(data)?;

    if let Some(error) = chunk.error {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or_else(|| error.to_string());
        return Err(ProviderError::Stream(message));
    }

    let Some(choice) = chunk.choices.into_iter().next() else {
        return Ok(None);
    };

    let tool_calls = choice
        .delta
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| {
            let function = tc.function.unwrap_or_default();
            ToolCallDelta {
                index: tc.index,
                id: tc.id,
                name: function.name,
                arguments: function.arguments,
            }
        })
        .collect();

    Ok(Some(Fragment {
        content: choice.delta.content,
        tool_calls,
        finish_reason: choice.finish_reason.as_deref().map(FinishReason::parse),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolCatalog, ToolDescriptor};
    use serde_json::json;

    #[test]
    fn test_decode_text_chunk() {
        let fragment = decode_chunk(r#"{"choices":[{"index":0,"delta":{"content":"Hel"},"finish_reason":null}]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(fragment.content.as_deref(), Some("Hel"));
        assert!(fragment.tool_calls.is_empty());
        assert_eq!(fragment.finish_reason, None);
    }

    #[test]
    fn test_decode_tool_call_chunk() {
        let data = r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_1","type":"function","function":{"name":"get_weather","arguments":""}}]},"finish_reason":null}]}"#;
        let fragment = decode_chunk(data).unwrap().unwrap();
        assert_eq!(
            fragment.tool_calls,
            vec![ToolCallDelta {
                index: 0,
                id: Some("call_1".into()),
                name: Some("get_weather".into()),
                arguments: Some(String::new()),
            }]
        );
    }

    #[test]
    fn test_decode_finish_only_chunk() {
        let fragment = decode_chunk(r#"{"choices":[{"delta":{},"finish_reason":"tool_calls"}]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(fragment.finish_reason, Some(FinishReason::ToolCalls));
        assert!(fragment.content.is_none());
    }

    #[test]
    fn test_decode_missing_index_defaults_to_zero() {
        let data = r#"{"choices":[{"delta":{"tool_calls":[{"function":{"arguments":"{}"}}]}}]}"#;
        let fragment = decode_chunk(data).unwrap().unwrap();
        assert_eq!(fragment.tool_calls[0].index, 0);
        assert_eq!(fragment.tool_calls[0].arguments.as_deref(), Some("{}"));
    }

    #[test]
    fn test_decode_usage_chunk_is_skipped() {
        let data = r#"{"choices":[],"usage":{"prompt_tokens":5,"completion_tokens":2}}"#;
        assert!(decode_chunk(data).unwrap().is_none());
    }

    #[test]
    fn test_decode_inband_error() {
        let err = decode_chunk(r#"{"error":{"message":"overloaded","code":529}}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Stream(ref m) if m == "overloaded"));
    }

    #[test]
    fn test_decode_garbage_is_error() {
        assert!(matches!(
            decode_chunk("not json").unwrap_err(),
            ProviderError::Decode(_)
        ));
    }

    #[test]
    fn test_request_omits_tools_when_disabled() {
        let messages = vec![Message::user("hi")];
        let body = serde_json::to_value(ChatCompletionRequest::streaming("gpt-4.1", &messages, None))
            .unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4.1",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": true
            })
        );
    }

    #[test]
    fn test_request_serializes_tool_exchange_and_schemas() {
        let catalog = ToolCatalog::new(vec![ToolDescriptor {
            name: "get_weather".into(),
            description: "Current weather".into(),
            input_schema: json!({"type": "object", "properties": {"city": {"type": "string"}}}),
        }]);
        let schemas = catalog.schemas();
        let messages = vec![
            Message::user("weather?"),
            Message::assistant_tool_call(ToolCall {
                id: "call_1".into(),
                name: "get_weather".into(),
                arguments: r#"{"city":"NYC"}"#.into(),
            }),
            Message::tool_result("call_1", "72F"),
        ];

        let body = serde_json::to_value(ChatCompletionRequest::streaming(
            "gpt-4.1",
            &messages,
            Some(schemas.as_slice()),
        ))
        .unwrap();

        assert_eq!(
            body["messages"][1],
            json!({
                "role": "assistant",
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "get_weather", "arguments": "{\"city\":\"NYC\"}"}
                }]
            })
        );
        assert_eq!(
            body["messages"][2],
            json!({"role": "tool", "content": "72F", "tool_call_id": "call_1"})
        );
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "get_weather");
        assert_eq!(body["tools"][0]["function"]["parameters"]["type"], "object");
    }
}
