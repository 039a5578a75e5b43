//! Server-Sent Events decoding for streaming completions.
//!
//! OpenAI-compatible servers send one JSON chunk per `data:` line and close
//! with `data: [DONE]`. Lines may be split across network chunks, so raw
//! bytes are buffered until a newline arrives.

use std::collections::VecDeque;

use futures::stream::{BoxStream, Stream, StreamExt};
use tracing::trace;

use super::error::ProviderError;
use super::wire::{decode_chunk, DONE_SENTINEL};
use super::FragmentStream;

/// Line buffer that extracts `data:` payloads from a byte stream.
#[derive(Debug, Default)]
pub(super) struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feeds raw bytes, returning the payload of every completed `data:` line.
    pub(super) fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(data) = data_payload(&line) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Flushes a trailing line the server did not terminate.
    pub(super) fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.buffer);
        data_payload(&line)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    // Comments (":keep-alive"), "event:" and "id:" fields carry nothing we use.
    line.strip_prefix("data:")
        .map(|data| data.trim_start().to_string())
}

struct SseState<B, E> {
    body: BoxStream<'static, Result<B, E>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    finished: bool,
}

/// Turns a streamed response body into a [`FragmentStream`].
///
/// The stream ends at `[DONE]`, when the body closes, or right after the
/// first error it yields.
pub(super) fn fragments<S, B, E>(body: S) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ProviderError> + Send + 'static,
{
    let state = SseState {
        body: body.boxed(),
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(data) = state.pending.pop_front() {
                if data == DONE_SENTINEL {
                    state.finished = true;
                    state.pending.clear();
                    return None;
                }
                trace!(%data, "sse chunk");
                match decode_chunk(&data) {
                    Ok(Some(fragment)) => return Some((Ok(fragment), state)),
                    Ok(None) => continue,
                    Err(err) => {
                        state.finished = true;
                        state.pending.clear();
                        return Some((Err(err), state));
                    }
                }
            }

            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(bytes)) => {
                    let payloads = state.decoder.feed(bytes.as_ref());
                    state.pending.extend(payloads);
                }
                Some(Err(err)) => {
                    state.finished = true;
                    return Some((Err(err.into()), state));
                }
                None => {
                    state.finished = true;
                    let tail = state.decoder.finish();
                    state.pending.extend(tail);
                }
            }
        }
    })
    .boxed()
}
