//! Tool results as hashi consumes them.

use rmcp::model;

/// Result envelope of one `tools/call`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallToolResult {
    pub content: Vec<ContentItem>,
    /// The server flagged the call as failed. Content still describes why.
    pub is_error: bool,
}

/// One content block of a tool result. Only text is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Text { text: String },
    /// Images, audio, resources and anything newer.
    Unsupported,
}

impl From<model::CallToolResult> for CallToolResult {
    fn from(result: model::CallToolResult) -> Self {
        Self {
            content: result
                .content
                .iter()
                .map(|c| match c.raw.as_text() {
                    Some(t) => ContentItem::Text {
                        text: t.text.clone(),
                    },
                    None => ContentItem::Unsupported,
                })
                .collect(),
            is_error: result.is_error.unwrap_or(false),
        }
    }
}

#[cfg(test)]
impl CallToolResult {
    pub fn text(text: &str) -> Self {
        Self {
            content: vec![ContentItem::Text {
                text: text.to_string(),
            }],
            is_error: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_content_keeps_order() {
        let wire: model::CallToolResult = serde_json::from_value(json!({
            "content": [
                {"type": "image", "data": "AAAA", "mimeType": "image/png"},
                {"type": "text", "text": "done"}
            ],
            "isError": true
        }))
        .unwrap();

        let result = CallToolResult::from(wire);
        assert_eq!(result.content[0], ContentItem::Unsupported);
        assert_eq!(
            result.content[1],
            ContentItem::Text {
                text: "done".into()
            }
        );
        assert!(result.is_error);
    }

    #[test]
    fn test_missing_error_flag_means_success() {
        let wire: model::CallToolResult = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "72F"}]
        }))
        .unwrap();
        let result = CallToolResult::from(wire);
        assert!(!result.is_error);
        assert_eq!(result, CallToolResult::text("72F"));
    }
}
