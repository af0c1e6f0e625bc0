pub mod error;
pub mod source;
pub mod types;

pub use error::{AppError, Result};
pub use source::CompletionSource;
pub use types::{ContextMessage, IncrementStream, Role};
