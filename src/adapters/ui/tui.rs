//! Implements InputPort. Inquire-based interactive menu.
//!
//! Every action goes through the request handlers, so the terminal sees the same
//! status codes and JSON bodies a web client would.

use crate::adapters::api::{AnalysisHandlers, HandlerResponse};
use crate::adapters::ui::progress;
use crate::domain::DomainError;
use crate::ports::InputPort;
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use inquire::error::InquireError;
use inquire::ui::{Color as UiColor, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use serde_json::{Value, json};
use std::io::stdout;
use std::path::Path;
use std::sync::Arc;

const MENU_SUMMARIZE: &str = "Summarize a note";
const MENU_INSIGHTS: &str = "Generate insights from a notes file";
const MENU_EXIT: &str = "Exit";

/// Apply the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(UiColor::LightCyan))
        .with_highlighted_option_prefix(Styled::new("▶").with_fg(UiColor::LightYellow))
        .with_selected_option(Some(StyleSheet::new().with_fg(UiColor::LightYellow)));
    inquire::set_global_render_config(config);
}

/// Wrap a notes file body into an insights request.
///
/// Accepts either a bare array of notes or an object already shaped like the
/// request (`{"notes": [...]}`).
pub fn insights_payload(file_body: &str) -> Result<Value, DomainError> {
    let parsed: Value = serde_json::from_str(file_body)
        .map_err(|e| DomainError::InvalidInput(format!("notes file is not JSON: {}", e)))?;
    Ok(match parsed {
        Value::Array(_) => json!({ "notes": parsed }),
        other => other,
    })
}

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Prompt for text; `None` when the user cancels (Esc / Ctrl-C).
fn ask(prompt: Text<'_, '_>) -> Result<Option<String>, DomainError> {
    match prompt.prompt() {
        Ok(answer) => Ok(Some(answer)),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(ui_err(e)),
    }
}

/// Join content lines typed one by one. Trailing blank lines are dropped.
pub fn join_content_lines(lines: &[String]) -> String {
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |idx| idx + 1);
    lines[..end].join("\n")
}

/// Prompt line by line until an empty line; `None` when the user cancels.
fn ask_multiline(label: &str) -> Result<Option<String>, DomainError> {
    let mut lines = Vec::new();
    let mut message = format!("{} (empty line to finish):", label);
    loop {
        let Some(line) = ask(Text::new(&message))? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(join_content_lines(&lines)));
        }
        lines.push(line);
        message = "…".to_string();
    }
}

fn print_response(res: &HandlerResponse) {
    let mut out = stdout();
    let color = if res.is_success() {
        Color::Green
    } else {
        Color::Red
    };
    let body = serde_json::to_string_pretty(&res.body).unwrap_or_else(|_| res.body.to_string());
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(format!("{}\r\n", res.status)));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(format!("{}\r\n", body)));
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    handlers: Arc<AnalysisHandlers>,
}

impl TuiInputPort {
    pub fn new(handlers: Arc<AnalysisHandlers>) -> Self {
        Self { handlers }
    }

    async fn summarize(&self) -> Result<(), DomainError> {
        let Some(title) = ask(Text::new("Note title:"))? else {
            return Ok(());
        };
        let Some(content) = ask_multiline("Note content")? else {
            return Ok(());
        };

        let pb = progress::spinner("Summarizing note...");
        let res = self
            .handlers
            .summarize(&json!({ "title": title, "content": content }))
            .await;
        pb.finish_and_clear();

        print_response(&res);
        Ok(())
    }

    async fn insights(&self) -> Result<(), DomainError> {
        let Some(path) = ask(Text::new("Path to notes JSON file:").with_default("notes.json"))?
        else {
            return Ok(());
        };

        let body = tokio::fs::read_to_string(Path::new(&path))
            .await
            .map_err(|e| DomainError::InvalidInput(format!("read {}: {}", path, e)))?;
        let payload = insights_payload(&body)?;

        let pb = progress::spinner("Looking for themes...");
        let res = self.handlers.insights(&payload).await;
        pb.finish_and_clear();

        print_response(&res);
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new(
                "What do you want to do?",
                vec![MENU_SUMMARIZE, MENU_INSIGHTS, MENU_EXIT],
            )
            .prompt()
            {
                Ok(choice) => choice,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(ui_err(e)),
            };

            let result = match choice {
                MENU_SUMMARIZE => self.summarize().await,
                MENU_INSIGHTS => self.insights().await,
                _ => return Ok(()),
            };

            match result {
                Ok(()) => {}
                Err(DomainError::InvalidInput(msg)) => {
                    let mut out = stdout();
                    let _ = out.execute(SetForegroundColor(Color::Red));
                    let _ = out.execute(Print(format!("{}\r\n", msg)));
                    let _ = out.execute(ResetColor);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
