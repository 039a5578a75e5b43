//! Reassembles streamed tool-call deltas into complete calls.
//!
//! A [`DeltaAccumulator`] lives for exactly one streaming pass. Each
//! [`Fragment`] is fed to [`DeltaAccumulator::push`], which returns the text
//! to show the user (if any) and folds tool-call deltas into per-index
//! [`PendingToolCall`]s. [`DeltaAccumulator::finish`] then decides, from the
//! last finish reason seen, whether the pass ended with calls to run.

use thiserror::Error;
use tracing::trace;

use crate::message::ToolCall;
use crate::provider::{FinishReason, Fragment, ToolCallDelta};

/// A tool call being assembled from deltas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl PendingToolCall {
    fn seed(delta: ToolCallDelta) -> Self {
        Self {
            id: delta.id.unwrap_or_default(),
            name: delta.name.unwrap_or_default(),
            arguments: delta.arguments.unwrap_or_default(),
        }
    }

    /// Folds a later delta for the same index into this call.
    ///
    /// Name and arguments slices are appended; a non-empty id replaces the
    /// current one.
    fn extend(&mut self, delta: ToolCallDelta) {
        if let Some(id) = delta.id.filter(|id| !id.is_empty()) {
            self.id = id;
        }
        if let Some(name) = delta.name {
            self.name.push_str(&name);
        }
        if let Some(arguments) = delta.arguments {
            self.arguments.push_str(&arguments);
        }
    }
}

impl From<PendingToolCall> for ToolCall {
    fn from(call: PendingToolCall) -> Self {
        Self {
            id: call.id,
            name: call.name,
            arguments: call.arguments,
        }
    }
}

/// How a streaming pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    NoToolCall,
    /// Non-empty, ordered by stream index.
    ToolCallsReady(Vec<PendingToolCall>),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccumulatorError {
    /// A delta named an index beyond the next free slot.
    #[error("tool call index {index} skips ahead of the {known} calls seen so far")]
    IndexGap { index: usize, known: usize },
}

#[derive(Debug, Default)]
pub struct DeltaAccumulator {
    calls: Vec<PendingToolCall>,
    finish_reason: Option<FinishReason>,
}

impl DeltaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one fragment and returns the text piece to forward, if any.
    ///
    /// A fragment carrying tool-call deltas never yields text, even when it
    /// also has content.
    pub fn push(&mut self, fragment: Fragment) -> Result<Option<String>, AccumulatorError> {
        if let Some(reason) = fragment.finish_reason {
            self.finish_reason = Some(reason);
        }

        if !fragment.tool_calls.is_empty() {
            for delta in fragment.tool_calls {
                self.apply(delta)?;
            }
            return Ok(None);
        }

        Ok(fragment.content.filter(|text| !text.is_empty()))
    }

    fn apply(&mut self, delta: ToolCallDelta) -> Result<(), AccumulatorError> {
        let known = self.calls.len();
        let index = delta.index;
        if index < known {
            self.calls[index].extend(delta);
        } else if index == known {
            trace!(index, "new tool call");
            self.calls.push(PendingToolCall::seed(delta));
        } else {
            return Err(AccumulatorError::IndexGap { index, known });
        }
        Ok(())
    }

    /// Ends the pass.
    ///
    /// Calls are reported only when the last finish reason was `tool_calls`;
    /// partial calls under any other ending are discarded.
    pub fn finish(self) -> Verdict {
        match self.finish_reason {
            Some(FinishReason::ToolCalls) if !self.calls.is_empty() => {
                Verdict::ToolCallsReady(self.calls)
            }
            _ => Verdict::NoToolCall,
        }
    }
}
