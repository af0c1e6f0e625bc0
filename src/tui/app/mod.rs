mod commands;
mod render;
mod terminal;

pub use commands::SLASH_COMMANDS;
pub use render::HeaderInfo;

use crate::chat::SubmitError;
use crate::core::{CompletionSource, Result};
use crate::tui::events::{AppEvent, terminal_event_loop, tick_loop};
use crate::tui::layout::calculate_layout;
use crate::tui::runner::{ChatRunner, RunnerCommand};
use crate::tui::state::AppState;
use crate::tui::widgets::{ChatWidget, InputAction, InputWidget, MessageLevel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

use commands::{HELP_TEXT, SlashCommand};
use render::{StatusView, render_header, render_status};
use terminal::{Tui, restore_terminal, setup_terminal};

const PAGE_SCROLL: usize = 10;

pub struct TuiApp {
    runner_tx: mpsc::UnboundedSender<RunnerCommand>,
    header: HeaderInfo,
    state: AppState,
    input_widget: InputWidget<'static>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    terminal: Tui,
}

impl TuiApp {
    pub fn new(source: Arc<dyn CompletionSource>, header: HeaderInfo) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let terminal = setup_terminal()?;

        let (runner, runner_tx) = ChatRunner::new(source, event_tx.clone());
        tokio::spawn(runner.run());

        Ok(Self {
            runner_tx,
            header,
            state: AppState::new(),
            input_widget: InputWidget::new(),
            event_rx,
            event_tx,
            terminal,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let tx1 = self.event_tx.clone();
        let tx2 = self.event_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = terminal_event_loop(tx1).await {
                tracing::error!(error = %e, "terminal event loop failed");
            }
        });
        tokio::spawn(tick_loop(tx2));

        while !self.state.should_quit {
            self.input_widget
                .set_submit_enabled(!self.state.is_responding());
            self.draw()?;

            if let Some(event) = self.event_rx.recv().await {
                self.handle_event(event);
            }
        }

        let _ = self.runner_tx.send(RunnerCommand::Shutdown);
        restore_terminal(&mut self.terminal)?;

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let status = StatusView {
            responding: self.state.is_responding(),
            elapsed: self.state.elapsed(),
            spinner_frame: self.state.spinner_frame,
            rounds: self.state.session.rounds().len(),
        };
        let messages = self.state.transcript();
        let input_lines = self.input_widget.line_count();

        self.terminal.draw(|f| {
            let layout = calculate_layout(f.area(), input_lines);

            render_header(f, layout.header, &self.header);
            ChatWidget::new(&messages, &mut self.state.scroll).render(layout.chat, f.buffer_mut());
            self.input_widget.render(layout.input, f);
            render_status(f, layout.status, status);
        })?;

        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(key) => self.handle_key_input(key),
            AppEvent::Paste(text) => {
                let action = self.input_widget.handle_paste(&text);
                self.handle_input_action(action);
            }
            AppEvent::Resize(_, _) => {}
            AppEvent::MouseScroll(delta) => {
                let lines = usize::from(delta.unsigned_abs());
                if delta < 0 {
                    self.state.scroll_up(lines);
                } else {
                    self.state.scroll_down(lines);
                }
            }
            AppEvent::Tick => self.state.tick(),
            AppEvent::Increment(text) => self.state.apply_increment(&text),
            AppEvent::ResponseComplete => self.state.finish_response(),
            AppEvent::ResponseFailed(error) => self.state.fail_response(&error),
        }
    }

    fn handle_key_input(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                if self.input_widget.is_empty() {
                    self.state.quit();
                } else {
                    self.input_widget.clear();
                }
            }
            KeyCode::Char('d') if ctrl => {
                if self.input_widget.is_empty() {
                    self.state.quit();
                }
            }
            KeyCode::Char('l') if ctrl => self.clear_conversation(),
            KeyCode::PageUp => self.state.scroll_up(PAGE_SCROLL),
            KeyCode::PageDown => self.state.scroll_down(PAGE_SCROLL),
            KeyCode::Home if ctrl => self.state.scroll_to_top(),
            KeyCode::End if ctrl => self.state.scroll_to_bottom(),
            _ => {
                let action = self.input_widget.handle_key(key);
                self.handle_input_action(action);
            }
        }
    }

    fn handle_input_action(&mut self, action: InputAction) {
        match action {
            InputAction::Continue | InputAction::Clear => {}
            InputAction::Submit(text) if text.starts_with('/') => self.handle_slash_command(&text),
            InputAction::Submit(text) => self.submit(text),
        }
    }

    fn submit(&mut self, prompt: String) {
        match self.state.begin_round(prompt) {
            Ok(request) => {
                if self.runner_tx.send(RunnerCommand::Respond(request)).is_err() {
                    self.state.fail_response("chat runner is not running");
                }
            }
            Err(SubmitError::Responding) => {
                tracing::debug!("submit ignored while a response is in progress");
            }
            Err(SubmitError::EmptyPrompt) => {}
        }
    }

    fn clear_conversation(&mut self) {
        match self.state.clear_conversation() {
            Ok(()) => self.state.add_notice("Conversation cleared."),
            Err(_) => self.state.add_notice_with_level(
                "Wait for the current response to finish before clearing.",
                MessageLevel::Error,
            ),
        }
    }

    fn handle_slash_command(&mut self, command: &str) {
        match SlashCommand::parse(command) {
            SlashCommand::Help => self.state.add_notice(HELP_TEXT),
            SlashCommand::Clear => self.clear_conversation(),
            SlashCommand::Exit => self.state.quit(),
            SlashCommand::Unknown(cmd) => self.state.add_notice(format!(
                "Unknown command: {cmd}. Type /help for available commands."
            )),
        }
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = restore_terminal(&mut self.terminal);
    }
}
