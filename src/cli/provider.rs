use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::{CompletionSource, Result};
use crate::providers::create_client;
use crate::tui::HeaderInfo;

/// Builds the completion source described by `config`, plus the header
/// details the chat UI shows for it.
pub fn create_source(config: &AppConfig) -> Result<(Arc<dyn CompletionSource>, HeaderInfo)> {
    let client = create_client(config)?;
    let header = HeaderInfo {
        model: client.model().to_string(),
        endpoint: client.base_url().host().to_string(),
    };

    tracing::debug!(model = %header.model, endpoint = %header.endpoint, "completion source ready");
    Ok((Arc::new(client), header))
}
