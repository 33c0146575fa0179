//! Session runner: the orchestration loop.
//!
//! One invocation carries one user message through load → decide →
//! dispatch → persist cycles until the oracle produces a final answer.
//! Persistence happens only at batch boundaries, so a failed or aborted
//! run always leaves the store at the last complete checkpoint.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;
use uuid::Uuid;

use crate::config::TangentConfig;
use crate::error::{Result, TangentError};
use crate::oracle::{Decision, DecisionOracle};
use crate::session::{SessionGate, SessionStore};
use crate::tools::tool::ToolExecutionContext;
use crate::tools::ToolRegistry;
use crate::types::{Message, ToolResult};
use crate::util::timeout::with_timeout;

use super::events::{RunEvent, RunEventPayload, RunEventStream, RunLifecycle};
use super::types::{RunId, RunOutcome, RunStatus};

/// Callback used for streaming run events.
pub type RunEventSink = Arc<dyn Fn(RunEvent) + Send + Sync>;

/// Request payload to start a run.
#[derive(Clone)]
pub struct RunRequest {
    pub run_id: RunId,
    pub session_id: String,
    pub user_text: String,
    /// Prepended as a system message when the session log is empty.
    pub system_prompt: Option<String>,
    pub event_sink: Option<RunEventSink>,
}

impl RunRequest {
    pub fn new(session_id: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            session_id: session_id.into(),
            user_text: user_text.into(),
            system_prompt: None,
            event_sink: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_event_sink(mut self, sink: RunEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }
}

/// Handle for an in-flight run.
#[derive(Debug)]
pub struct RunHandle {
    run_id: RunId,
    abort_tx: Option<oneshot::Sender<()>>,
    result_rx: oneshot::Receiver<RunOutcome>,
}

impl RunHandle {
    fn new(run_id: RunId) -> (Self, oneshot::Receiver<()>, oneshot::Sender<RunOutcome>) {
        let (abort_tx, abort_rx) = oneshot::channel();
        let (result_tx, result_rx) = oneshot::channel();
        (
            Self {
                run_id,
                abort_tx: Some(abort_tx),
                result_rx,
            },
            abort_rx,
            result_tx,
        )
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Request cancellation. The run stops at the next oracle/tool
    /// boundary; no partial batch is persisted.
    pub fn abort(&mut self) -> bool {
        if let Some(tx) = self.abort_tx.take() {
            return tx.send(()).is_ok();
        }
        false
    }

    /// Await the terminal outcome.
    pub async fn wait(self) -> RunOutcome {
        let run_id = self.run_id;
        self.result_rx
            .await
            .unwrap_or_else(|_| RunOutcome::canceled(run_id, 0))
    }
}

/// The orchestration loop with its injected collaborators.
///
/// Distinct sessions progress independently; concurrent runs on the same
/// session id are rejected with `SessionConflict` before any state is
/// touched.
pub struct SessionRunner {
    oracle: Arc<dyn DecisionOracle>,
    registry: Arc<ToolRegistry>,
    store: Arc<dyn SessionStore>,
    gate: SessionGate,
    config: TangentConfig,
}

impl SessionRunner {
    pub fn new(
        oracle: Arc<dyn DecisionOracle>,
        registry: Arc<ToolRegistry>,
        store: Arc<dyn SessionStore>,
        config: TangentConfig,
    ) -> Self {
        Self {
            oracle,
            registry,
            store,
            gate: SessionGate::new(),
            config,
        }
    }

    pub fn config(&self) -> &TangentConfig {
        &self.config
    }

    /// Run one user message to completion and return the final answer.
    pub async fn run(&self, session_id: &str, user_text: &str) -> Result<String> {
        let handle = self.start(RunRequest::new(session_id, user_text))?;
        handle.wait().await.into_result()
    }

    /// Start a run, returning a handle for abort/wait.
    pub fn start(&self, request: RunRequest) -> Result<RunHandle> {
        let permit = self.gate.acquire(&request.session_id)?;
        let (handle, mut abort_rx, result_tx) = RunHandle::new(request.run_id);

        let oracle = Arc::clone(&self.oracle);
        let registry = Arc::clone(&self.registry);
        let store = Arc::clone(&self.store);
        let config = self.config.clone();

        tokio::spawn(async move {
            let _permit = permit;
            tracing::debug!(
                run_id = %request.run_id,
                session_id = %request.session_id,
                "run start"
            );

            let emitter = RunEventEmitter::new(request.run_id, request.event_sink.clone());
            emitter.lifecycle(RunLifecycle::Started);

            let iterations = AtomicUsize::new(0);
            let drive = drive_run(&oracle, &registry, &store, &config, &request, &emitter, &iterations);
            tokio::pin!(drive);

            let outcome = tokio::select! {
                _ = &mut abort_rx => {
                    RunOutcome::canceled(request.run_id, iterations.load(Ordering::SeqCst))
                }
                outcome = &mut drive => outcome,
            };

            match outcome.status {
                RunStatus::Completed => emitter.lifecycle(RunLifecycle::Completed),
                RunStatus::Canceled => emitter.lifecycle(RunLifecycle::Canceled),
                RunStatus::Failed => emitter.lifecycle(RunLifecycle::Failed {
                    error: outcome
                        .error
                        .as_ref()
                        .map(|e| e.to_string())
                        .unwrap_or_default(),
                }),
            }
            tracing::debug!(
                run_id = %request.run_id,
                session_id = %request.session_id,
                status = %outcome.status,
                iterations = outcome.iterations,
                "run finished"
            );
            let _ = result_tx.send(outcome);
        });

        Ok(handle)
    }
}

#[allow(clippy::too_many_arguments)]
async fn drive_run(
    oracle: &Arc<dyn DecisionOracle>,
    registry: &Arc<ToolRegistry>,
    store: &Arc<dyn SessionStore>,
    config: &TangentConfig,
    request: &RunRequest,
    emitter: &RunEventEmitter,
    iterations: &AtomicUsize,
) -> RunOutcome {
    let mut conversation = store.load(&request.session_id).await;
    if conversation.is_empty() {
        if let Some(prompt) = &request.system_prompt {
            conversation.append(Message::system(prompt.clone()));
        }
    }
    conversation.append(Message::user(request.user_text.clone()));

    let definitions = registry.definitions();

    let mut iteration = 0usize;
    loop {
        iteration += 1;
        if iteration > config.max_iterations {
            return RunOutcome::failed(
                request.run_id,
                TangentError::MaxIterationsExceeded {
                    limit: config.max_iterations,
                },
                iteration - 1,
            );
        }
        iterations.store(iteration, Ordering::SeqCst);

        let decision = with_timeout(
            config.oracle_timeout,
            oracle.decide(conversation.messages(), &definitions),
        )
        .await;
        let decision = match decision {
            Ok(decision) => decision,
            Err(err) => {
                let err = match err {
                    unavailable @ TangentError::OracleUnavailable(_) => unavailable,
                    other => TangentError::OracleUnavailable(other.to_string()),
                };
                return RunOutcome::failed(request.run_id, err, iteration);
            }
        };

        match decision {
            Decision::Final { text } => {
                conversation.append(Message::assistant(text.clone()));
                emitter.emit(
                    RunEventStream::Assistant,
                    RunEventPayload::AssistantMessage { text: text.clone() },
                );
                if let Err(err) = store.save(&request.session_id, &conversation).await {
                    return RunOutcome::failed(request.run_id, err, iteration);
                }
                return RunOutcome::completed(request.run_id, text, iteration);
            }
            Decision::ToolCalls { preamble, calls } => {
                if calls.is_empty() {
                    return RunOutcome::failed(
                        request.run_id,
                        TangentError::OracleUnavailable(
                            "oracle requested an empty tool batch".to_string(),
                        ),
                        iteration,
                    );
                }

                tracing::debug!(
                    run_id = %request.run_id,
                    iteration,
                    calls = calls.len(),
                    "dispatching tool batch"
                );
                for call in &calls {
                    emitter.emit(
                        RunEventStream::Tool,
                        RunEventPayload::ToolCallStarted { call: call.clone() },
                    );
                }
                conversation.append(Message::assistant_tool_calls(preamble, calls.clone()));

                // Dispatch concurrently; join_all preserves request order,
                // so concurrency is never observable in the log.
                let dispatches = calls.iter().map(|call| {
                    let ctx = ToolExecutionContext {
                        tool_call_id: Some(call.id.clone()),
                        session_id: Some(request.session_id.clone()),
                    };
                    registry.invoke(&call.name, call.arguments.clone(), ctx, config.tool_timeout)
                });
                let results = futures::future::join_all(dispatches).await;

                for (call, result) in calls.iter().zip(results) {
                    // Tool failures feed back to the oracle as error
                    // results; they never fail the run.
                    let tool_result = match result {
                        Ok(value) => ToolResult {
                            tool_call_id: call.id.clone(),
                            result: value,
                            is_error: false,
                        },
                        Err(err) => {
                            tracing::warn!(
                                run_id = %request.run_id,
                                tool = %call.name,
                                error = %err,
                                "tool call failed"
                            );
                            ToolResult {
                                tool_call_id: call.id.clone(),
                                result: serde_json::json!({ "error": err.to_string() }),
                                is_error: true,
                            }
                        }
                    };
                    emitter.emit(
                        RunEventStream::Tool,
                        RunEventPayload::ToolResult {
                            result: tool_result.clone(),
                        },
                    );
                    conversation.append(Message::tool_result(
                        tool_result.tool_call_id,
                        tool_result.result,
                        tool_result.is_error,
                    ));
                }

                // Checkpoint: the batch is complete, make it durable.
                if let Err(err) = store.save(&request.session_id, &conversation).await {
                    return RunOutcome::failed(request.run_id, err, iteration);
                }
            }
        }
    }
}

struct RunEventEmitter {
    run_id: RunId,
    seq: AtomicU64,
    sink: Option<RunEventSink>,
}

impl RunEventEmitter {
    fn new(run_id: RunId, sink: Option<RunEventSink>) -> Self {
        Self {
            run_id,
            seq: AtomicU64::new(1),
            sink,
        }
    }

    fn lifecycle(&self, state: RunLifecycle) {
        self.emit(RunEventStream::Lifecycle, RunEventPayload::Lifecycle { state });
    }

    fn emit(&self, stream: RunEventStream, payload: RunEventPayload) {
        let Some(sink) = &self.sink else { return };
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        (sink)(RunEvent {
            run_id: self.run_id,
            seq,
            timestamp: chrono::Utc::now(),
            stream,
            payload,
        });
    }
}
