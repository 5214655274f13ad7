//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error types
//! - [`logger`] - tracing setup
//! - [`time`] - date parsing and "today" helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{AppError, AppResponse};
pub use error::{ok, ok_with_message};
pub use result::AppResult;
