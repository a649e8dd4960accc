//! Tool registry and dispatch.

pub mod arguments;
pub mod dispatcher;
pub mod registry;

pub use arguments::{ArgValue, CoercedArgs, PlaceLimitOrderArgs};
pub use dispatcher::{ToolDispatcher, ToolResult, UnknownTool};
pub use registry::{list_tools, ParamType, ToolKind, ToolParameter, ToolSchema};
