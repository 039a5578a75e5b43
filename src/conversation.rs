//! Ordered conversation history for one session.
//!
//! [`ConversationState`] is append-only. Besides user messages it grows only
//! through [`ConversationState::record_tool_exchange`], which appends the
//! assistant announcement and the tool result together so a tool message
//! always directly follows the call it answers.

use crate::message::{Message, ToolCall};

#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a conversation with an optional system prompt at its head.
    pub fn with_system_prompt(system_prompt: Option<&str>) -> Self {
        let mut state = Self::new();
        if let Some(prompt) = system_prompt.filter(|p| !p.trim().is_empty()) {
            state.messages.push(Message::system(prompt));
        }
        state
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Appends the assistant's tool-call announcement and the matching result.
    ///
    /// Both messages are pushed with no await point in between.
    pub fn record_tool_exchange(&mut self, call: ToolCall, result: impl Into<String>) {
        let id = call.id.clone();
        self.messages.push(Message::assistant_tool_call(call));
        self.messages.push(Message::tool_result(id, result));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn test_blank_system_prompt_is_skipped() {
        assert!(ConversationState::with_system_prompt(Some("  ")).is_empty());
        assert!(ConversationState::with_system_prompt(None).is_empty());
        assert_eq!(
            ConversationState::with_system_prompt(Some("be brief")).messages()[0].role,
            Role::System
        );
    }

    #[test]
    fn test_tool_exchange_appends_pair_in_order() {
        let mut state = ConversationState::new();
        state.push_user("weather in NYC?");
        state.record_tool_exchange(
            ToolCall {
                id: "call_9".into(),
                name: "get_weather".into(),
                arguments: r#"{"city":"NYC"}"#.into(),
            },
            "72F",
        );

        let msgs = state.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].role, Role::Assistant);
        assert_eq!(msgs[1].tool_calls[0].id, "call_9");
        assert_eq!(msgs[2].role, Role::Tool);
        assert_eq!(msgs[2].tool_call_id.as_deref(), Some("call_9"));
        assert_eq!(msgs[2].text(), "72F");
    }
}
