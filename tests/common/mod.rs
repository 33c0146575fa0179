//! Shared test helpers: scripted oracle and canned tools.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tangent::error::{Result, TangentError};
use tangent::oracle::{Decision, DecisionOracle, ToolDefinition};
use tangent::tools::{FunctionTool, ToolParameters};
use tangent::types::{Message, ToolCall};

type DecideFn = Box<dyn Fn(&[Message]) -> Result<Decision> + Send + Sync>;

/// A scripted oracle that plays back queued decisions.
///
/// Each `decide` pops the next step; closures receive the full log so a
/// step can compute its answer from earlier tool results. When the queue
/// is empty the fallback runs (if set), otherwise the oracle reports
/// itself unavailable.
#[derive(Default)]
pub struct ScriptedOracle {
    steps: Mutex<VecDeque<DecideFn>>,
    fallback: Mutex<Option<DecideFn>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a final answer.
    pub fn queue_final(&self, text: &str) {
        let text = text.to_string();
        self.queue_with(move |_| Ok(Decision::final_answer(text.clone())));
    }

    /// Queue a single tool call.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        let call = ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: args,
        };
        self.queue_with(move |_| Ok(Decision::tool_calls(vec![call.clone()])));
    }

    /// Queue a batch of tool calls dispatched together.
    pub fn queue_tool_batch(&self, calls: Vec<ToolCall>) {
        self.queue_with(move |_| Ok(Decision::tool_calls(calls.clone())));
    }

    /// Queue a computed decision.
    pub fn queue_with<F>(&self, f: F)
    where
        F: Fn(&[Message]) -> Result<Decision> + Send + Sync + 'static,
    {
        self.steps.lock().unwrap().push_back(Box::new(f));
    }

    /// Queue an oracle failure.
    pub fn queue_error(&self, message: &str) {
        let message = message.to_string();
        self.queue_with(move |_| Err(TangentError::OracleUnavailable(message.clone())));
    }

    /// Decision used whenever the queue is empty.
    pub fn set_fallback<F>(&self, f: F)
    where
        F: Fn(&[Message]) -> Result<Decision> + Send + Sync + 'static,
    {
        *self.fallback.lock().unwrap() = Some(Box::new(f));
    }

    /// Number of decide() calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    async fn decide(&self, log: &[Message], _tools: &[ToolDefinition]) -> Result<Decision> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        if let Some(step) = step {
            return step(log);
        }
        let fallback = self.fallback.lock().unwrap();
        match fallback.as_ref() {
            Some(f) => f(log),
            None => Err(TangentError::OracleUnavailable(
                "oracle script exhausted".to_string(),
            )),
        }
    }
}

/// A stock price lookup tool over a fixed symbol table.
pub fn stock_price_tool(prices: &[(&str, f64)]) -> Arc<FunctionTool> {
    let table: Vec<(String, f64)> = prices
        .iter()
        .map(|(s, p)| (s.to_string(), *p))
        .collect();
    Arc::new(FunctionTool::new(
        "get_stock_price",
        "Look up the current price for a ticker symbol",
        ToolParameters::object()
            .string("symbol", "Ticker symbol, e.g. AAPL", true)
            .build(),
        move |args, _ctx| {
            let table = table.clone();
            async move {
                let symbol = args.get_str("symbol")?.to_string();
                match table.iter().find(|(s, _)| *s == symbol) {
                    Some((_, price)) => {
                        Ok(serde_json::json!({ "symbol": symbol, "price": price }))
                    }
                    None => Err(TangentError::tool_execution(
                        "get_stock_price",
                        format!("no quote for '{symbol}'"),
                    )),
                }
            }
        },
    ))
}

/// A tool that sleeps before answering, for timeout/cancellation tests.
pub fn slow_tool(name: &str, delay_ms: u64) -> Arc<FunctionTool> {
    Arc::new(FunctionTool::new(
        name,
        "Sleeps, then returns",
        ToolParameters::empty(),
        move |_args, _ctx| async move {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            Ok(serde_json::json!({ "slept_ms": delay_ms }))
        },
    ))
}

/// A tool that always fails.
pub fn failing_tool(name: &str, message: &str) -> Arc<FunctionTool> {
    let name_owned = name.to_string();
    let message = message.to_string();
    Arc::new(FunctionTool::new(
        name,
        "Always fails",
        ToolParameters::empty(),
        move |_args, _ctx| {
            let name = name_owned.clone();
            let message = message.clone();
            async move { Err(TangentError::tool_execution(name, message)) }
        },
    ))
}

/// Sum of `quantity * price` over the tool results in the log, most
/// recent batch included. Mirrors how a model would total lookups.
pub fn total_from_results(log: &[Message], quantities: &[f64]) -> f64 {
    let prices: Vec<f64> = log
        .iter()
        .flat_map(|m| m.tool_results())
        .filter_map(|tr| tr.result.get("price").and_then(|p| p.as_f64()))
        .collect();
    prices
        .iter()
        .zip(quantities)
        .map(|(price, qty)| price * qty)
        .sum()
}
