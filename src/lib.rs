//! Tangent — session-scoped agentic tool-calling runtime.
//!
//! Provides a minimal orchestration loop around an injected decision
//! oracle (the language model), a tool registry, and a per-session
//! conversation store. The loop repeatedly consults the oracle with the
//! full message log, dispatches any requested tool calls, folds the
//! results back into the log, and terminates when the oracle produces a
//! final answer.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tangent::prelude::*;
//!
//! # async fn example(oracle: Arc<dyn tangent::oracle::DecisionOracle>) -> tangent::error::Result<()> {
//! let mut registry = ToolRegistry::new();
//! registry.register(Arc::new(FunctionTool::new(
//!     "get_stock_price",
//!     "Look up the current price for a ticker symbol",
//!     ToolParameters::object().string("symbol", "Ticker symbol", true).build(),
//!     |args, _ctx| async move {
//!         let symbol = args.get_str("symbol")?;
//!         Ok(serde_json::json!({ "symbol": symbol, "price": 100.4 }))
//!     },
//! )))?;
//!
//! let runner = SessionRunner::new(
//!     oracle,
//!     Arc::new(registry),
//!     Arc::new(InMemorySessionStore::new()),
//!     TangentConfig::default(),
//! );
//! let answer = runner.run("session-1", "What is AAPL trading at?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent_loop;
pub mod config;
pub mod error;
pub mod oracle;
pub mod prelude;
pub mod session;
pub mod tools;
pub mod types;
pub mod util;
