//! Incremental units of a streaming completion.

/// Why a stream segment ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// Normal end of the answer.
    Stop,
    /// The model wants the announced tool calls executed.
    ToolCalls,
    /// Anything else (`length`, `content_filter`, vendor-specific values).
    Other(String),
}

impl FinishReason {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "stop" => Self::Stop,
            "tool_calls" => Self::ToolCalls,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A partial tool call carried by one fragment.
///
/// Every field but `index` is optional: the first delta for a call usually
/// carries the id and name, later ones only slices of the arguments text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallDelta {
    pub index: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments: Option<String>,
}

/// One incremental unit of a streaming response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Text delta, if any.
    pub content: Option<String>,
    /// Tool-call deltas, in wire order.
    pub tool_calls: Vec<ToolCallDelta>,
    /// Present only on the fragment that ends the segment.
    pub finish_reason: Option<FinishReason>,
}

#[cfg(test)]
impl Fragment {
    pub fn text(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    pub fn tool_call(
        index: usize,
        id: Option<&str>,
        name: Option<&str>,
        arguments: Option<&str>,
    ) -> Self {
        Self {
            tool_calls: vec![ToolCallDelta {
                index,
                id: id.map(String::from),
                name: name.map(String::from),
                arguments: arguments.map(String::from),
            }],
            ..Default::default()
        }
    }

    pub fn finish(reason: FinishReason) -> Self {
        Self {
            finish_reason: Some(reason),
            ..Default::default()
        }
    }

    pub fn with_finish(mut self, reason: FinishReason) -> Self {
        self.finish_reason = Some(reason);
        self
    }
}
