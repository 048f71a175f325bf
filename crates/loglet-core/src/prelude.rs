//! Common module for library exports

pub use crate::error::{LogletError, LogletResult};
pub use crate::error_info::{get_error, get_error_message, get_error_name, get_error_stack, ErrorDetails, Thrown};
pub use crate::format::Param;
pub use crate::level::LogLevel;
pub use crate::logger::{Logger, LoggerRegistry, Logging};
