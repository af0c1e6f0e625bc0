pub mod app;
pub mod events;
pub mod layout;
pub mod runner;
pub mod state;
pub mod widgets;

pub use app::{HeaderInfo, TuiApp};

use crate::core::{CompletionSource, Result};
use std::sync::Arc;

/// Runs the full-screen chat until the user exits.
pub async fn run_tui(source: Arc<dyn CompletionSource>, header: HeaderInfo) -> Result<()> {
    tracing::info!(model = %header.model, endpoint = %header.endpoint, "starting chat UI");
    let mut app = TuiApp::new(source, header)?;
    app.run().await
}
