pub mod completions;
pub mod error;
pub mod factory;
pub mod http;
pub mod mock;
pub mod types;

pub use completions::CompletionsClient;
pub use error::ProviderError;
pub use factory::create_client;
pub use types::{ApiKey, BaseUrl, ModelId};
