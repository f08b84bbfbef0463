//! The one asynchronous call: asking the generator for the celebration message.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use valentine_providers::TextGenerator;
use valentine_types::{GenerationError, GenerationOutcome};

const PROMPT_RAW: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/prompt.md"));

/// The fixed prompt sent on acceptance.
pub fn proposal_prompt() -> &'static str {
    static PROMPT: OnceLock<String> = OnceLock::new();
    PROMPT
        .get_or_init(|| PROMPT_RAW.trim().to_string())
        .as_str()
}

/// A request in flight. Existence means the session is waiting on it.
#[derive(Debug)]
pub(crate) struct PendingMessage {
    rx: oneshot::Receiver<GenerationOutcome>,
    task: Option<JoinHandle<()>>,
    started: Instant,
}

pub(crate) enum Poll {
    Waiting,
    Ready(GenerationOutcome),
}

impl PendingMessage {
    /// Spawn the request on the current tokio runtime.
    ///
    /// Without a runtime there is nothing to run it on; the outcome is reported
    /// as [`GenerationError::TaskLost`] on the first poll.
    pub(crate) fn spawn(generator: &Arc<dyn TextGenerator>, prompt: &str) -> Self {
        let (tx, rx) = oneshot::channel();
        let started = Instant::now();

        let task = match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let request = generator.generate(prompt.to_string());
                Some(handle.spawn(async move {
                    let outcome = request.await;
                    // The receiver is gone only after teardown; nothing to report to.
                    let _ = tx.send(outcome);
                }))
            }
            Err(err) => {
                tracing::error!("No async runtime for text generation: {err}");
                let _ = tx.send(Err(GenerationError::TaskLost));
                None
            }
        };

        Self { rx, task, started }
    }

    pub(crate) fn poll(&mut self) -> Poll {
        match self.rx.try_recv() {
            Ok(outcome) => Poll::Ready(outcome),
            Err(oneshot::error::TryRecvError::Empty) => Poll::Waiting,
            Err(oneshot::error::TryRecvError::Closed) => {
                tracing::warn!("Generation task dropped its result channel");
                Poll::Ready(Err(GenerationError::TaskLost))
            }
        }
    }

    pub(crate) fn started(&self) -> Instant {
        self.started
    }

    pub(crate) fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.rx.close();
    }
}

impl Drop for PendingMessage {
    fn drop(&mut self) {
        self.abort();
    }
}
