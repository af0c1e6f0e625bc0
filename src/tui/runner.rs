use std::sync::Arc;

use tokio::sync::mpsc;

use crate::chat::PendingRequest;
use crate::core::CompletionSource;
use crate::tui::events::AppEvent;

#[derive(Debug)]
pub enum RunnerCommand {
    Respond(PendingRequest),
    Shutdown,
}

/// Owns the network side of the UI. Requests arrive one at a time over the
/// command channel; increments go back to the UI loop as [`AppEvent`]s.
pub struct ChatRunner {
    source: Arc<dyn CompletionSource>,
    cmd_rx: mpsc::UnboundedReceiver<RunnerCommand>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ChatRunner {
    #[must_use]
    pub fn new(
        source: Arc<dyn CompletionSource>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> (Self, mpsc::UnboundedSender<RunnerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let runner = Self {
            source,
            cmd_rx,
            event_tx,
        };
        (runner, cmd_tx)
    }

    pub async fn run(mut self) {
        while let Some(cmd) = self.cmd_rx.recv().await {
            match cmd {
                RunnerCommand::Respond(request) => self.respond(request).await,
                RunnerCommand::Shutdown => {
                    tracing::info!("chat runner shutting down");
                    break;
                }
            }
        }
    }

    async fn respond(&self, request: PendingRequest) {
        let tx = self.event_tx.clone();
        let mut forward = move |text: &str| {
            let _ = tx.send(AppEvent::Increment(text.to_string()));
        };

        let result = self
            .source
            .consume(&request.history, &request.prompt, &mut forward)
            .await;

        let event = match result {
            Ok(()) => AppEvent::ResponseComplete,
            Err(e) => {
                tracing::warn!(error = %e, "response failed");
                AppEvent::ResponseFailed(e.to_string())
            }
        };
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatSession;
    use crate::providers::mock::{MockResponse, MockSource};

    async fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = matches!(
                event,
                AppEvent::ResponseComplete | AppEvent::ResponseFailed(_)
            );
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn test_forwards_increments_then_completes() {
        let source = MockSource::new().with_response(MockResponse::increments(["Hi", " there"]));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (runner, cmd_tx) = ChatRunner::new(Arc::new(source.clone()), event_tx);
        let handle = tokio::spawn(runner.run());

        let mut session = ChatSession::new();
        let request = session.begin_round("Hello").unwrap();
        cmd_tx.send(RunnerCommand::Respond(request)).unwrap();

        assert_eq!(
            drain(&mut event_rx).await,
            vec![
                AppEvent::Increment("Hi".into()),
                AppEvent::Increment(" there".into()),
                AppEvent::ResponseComplete,
            ]
        );

        cmd_tx.send(RunnerCommand::Shutdown).unwrap();
        handle.await.unwrap();
        assert_eq!(source.request_count(), 1);
    }

    #[tokio::test]
    async fn test_reports_failures() {
        let source = MockSource::new().with_response(MockResponse::refused("connection refused"));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (runner, cmd_tx) = ChatRunner::new(Arc::new(source), event_tx);
        tokio::spawn(runner.run());

        let request = ChatSession::new().begin_round("Hello").unwrap();
        cmd_tx.send(RunnerCommand::Respond(request)).unwrap();

        let events = drain(&mut event_rx).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], AppEvent::ResponseFailed(msg) if msg.contains("refused")));
    }

    #[tokio::test]
    async fn test_stops_when_commands_close() {
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let (runner, cmd_tx) = ChatRunner::new(Arc::new(MockSource::new()), event_tx);
        drop(cmd_tx);

        runner.run().await;
    }
}
