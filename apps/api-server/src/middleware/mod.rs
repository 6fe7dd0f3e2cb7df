//! Middleware modules.

pub mod error;
pub mod result_code;

pub use error::{AppError, AppResult};
pub use result_code::{Envelope, ResultCodeStatus};
