//! External tool execution and environment management.

pub mod command;
pub mod context;
pub mod mock;
pub mod path;

pub use command::{CommandResult, DryRunRunner, Invocation, SystemRunner, ToolRunner};
pub use context::ToolContext;
pub use mock::{MockResponse, MockRunner};
pub use path::{is_executable, parse_system_path, prepend_to_system_path, resolve_tool_path};
