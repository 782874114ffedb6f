use crate::core::chat_box::{ChatBox, Document};
use crate::core::scroll::{scroll_chat_box, CHAT_BOX_ID};
use crate::domain::model::ChatMessage;
use crate::domain::ports::{ChatBackend, ElementRegistry};
use crate::utils::error::Result;
use std::future::Future;
use tokio::io::{AsyncBufRead, Lines};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Exit,
    Skipped,
    /// Transcript rows rendered for the assistant's reply.
    Replied(Vec<String>),
}

/// Line-driven chat front end: one input line in, transcript updated.
pub struct ChatRepl<B: ChatBackend> {
    backend: B,
    page: Document<ChatBox>,
}

impl<B: ChatBackend> ChatRepl<B> {
    pub fn new(backend: B, viewport_rows: usize) -> Self {
        let mut page = Document::new();
        page.insert(CHAT_BOX_ID, ChatBox::new(viewport_rows));
        Self { backend, page }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn chat_box(&self) -> Option<&ChatBox> {
        self.page.get(CHAT_BOX_ID)
    }

    pub fn visible_rows(&self) -> Vec<String> {
        self.chat_box()
            .map(|chat_box| chat_box.visible_rows().to_vec())
            .unwrap_or_default()
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<LineOutcome> {
        let input = line.trim();
        if is_exit_command(input) {
            return Ok(LineOutcome::Exit);
        }
        if input.is_empty() {
            return Ok(LineOutcome::Skipped);
        }

        self.append(ChatMessage::user(input));
        let reply = self.backend.send_message(input).await?;
        tracing::debug!("Received {} chars", reply.len());
        let rows = self.append(ChatMessage::assistant(reply));

        Ok(LineOutcome::Replied(rows))
    }

    fn append(&mut self, message: ChatMessage) -> Vec<String> {
        let rows = self
            .page
            .element_by_id(CHAT_BOX_ID)
            .map(|chat_box| chat_box.push(message).to_vec())
            .unwrap_or_default();
        scroll_chat_box(&mut self.page);
        rows
    }
}

pub fn is_exit_command(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "exit" | "quit")
}

/// Next input line, or `None` at end of input or once `interrupt` completes.
pub async fn next_line_or_interrupt<R, F>(
    lines: &mut Lines<R>,
    interrupt: F,
) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    F: Future,
{
    tokio::select! {
        line = lines.next_line() => line,
        _ = interrupt => {
            tracing::debug!("Input interrupted");
            Ok(None)
        }
    }
}
