//! Tool registry: name-keyed lookup, schema validation, dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, TangentError};
use crate::oracle::ToolDefinition;
use crate::util::timeout::with_timeout;

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::validation::validate_arguments;

/// Registry of available tools.
///
/// Descriptors are immutable after registration. The registry itself is
/// side-effect free; only handler bodies perform I/O.
#[derive(Default)]
pub struct ToolRegistry {
    // Registration order preserved so published definitions are deterministic.
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if a tool with the same name exists.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(TangentError::DuplicateTool { name });
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn Tool>> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| TangentError::UnknownTool {
                name: name.to_string(),
            })
    }

    /// Whether any tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Definitions published to the oracle, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect()
    }

    /// Validate arguments and execute the named tool under a timeout.
    ///
    /// Failure modes: [`TangentError::UnknownTool`],
    /// [`TangentError::SchemaValidation`], [`TangentError::ToolExecution`]
    /// (handler error or timeout). Callers fold these into error-bearing
    /// tool results rather than crashing the loop.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
        ctx: ToolExecutionContext,
        timeout: Duration,
    ) -> Result<serde_json::Value> {
        let tool = self.resolve(name)?;

        validate_arguments(&arguments, &tool.parameters().schema).map_err(|message| {
            TangentError::SchemaValidation {
                tool_name: name.to_string(),
                message,
            }
        })?;

        let args = ToolArguments::new(arguments);
        tracing::debug!(tool = name, "dispatching tool");
        with_timeout(timeout, tool.execute(&args, &ctx))
            .await
            .map_err(|err| match err {
                TangentError::Timeout(ms) => {
                    TangentError::tool_execution(name, format!("timed out after {ms}ms"))
                }
                passthrough @ TangentError::ToolExecution { .. } => passthrough,
                other => TangentError::tool_execution(name, other.to_string()),
            })
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}
