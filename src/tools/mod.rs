//! Tool system: descriptors, argument validation, and the registry.

pub mod arguments;
pub mod registry;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use registry::ToolRegistry;
pub use tool::{FunctionTool, Tool, ToolExecutionContext};
pub use types::ToolParameters;
