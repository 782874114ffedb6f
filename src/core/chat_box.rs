use crate::domain::model::ChatMessage;
use crate::domain::ports::{ElementRegistry, Scrollable};
use std::collections::HashMap;

/// Terminal transcript of a conversation with a fixed-height viewport.
///
/// `scroll_top` is kept exactly as set; [`visible_rows`](Self::visible_rows)
/// clamps it so the viewport never runs past the last row.
#[derive(Debug, Clone)]
pub struct ChatBox {
    messages: Vec<ChatMessage>,
    rows: Vec<String>,
    viewport_rows: usize,
    scroll_top: usize,
}

impl ChatBox {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            messages: Vec::new(),
            rows: Vec::new(),
            viewport_rows,
            scroll_top: 0,
        }
    }

    /// Appends `message` and returns the rows it rendered to.
    pub fn push(&mut self, message: ChatMessage) -> &[String] {
        let start = self.rows.len();
        self.rows.extend(render_message(&message));
        self.messages.push(message);
        &self.rows[start..]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn visible_rows(&self) -> &[String] {
        let max_top = self.rows.len().saturating_sub(self.viewport_rows);
        let start = self.scroll_top.min(max_top);
        let end = (start + self.viewport_rows).min(self.rows.len());
        &self.rows[start..end]
    }
}

impl Scrollable for ChatBox {
    fn scroll_height(&self) -> usize {
        self.rows.len()
    }

    fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, offset: usize) {
        self.scroll_top = offset;
    }
}

fn render_message(message: &ChatMessage) -> Vec<String> {
    let prefix = format!("{}: ", message.role.label());
    let indent = " ".repeat(prefix.len());

    let mut lines = message.text.lines();
    let first = lines.next().unwrap_or_default();

    let mut rows = vec![format!("{}{}", prefix, first)];
    rows.extend(lines.map(|line| format!("{}{}", indent, line)));
    rows
}

/// Elements of a page addressed by id.
#[derive(Debug, Clone)]
pub struct Document<E> {
    elements: HashMap<String, E>,
}

impl<E> Default for Document<E> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }
}

impl<E> Document<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, element: E) -> Option<E> {
        self.elements.insert(id.into(), element)
    }

    pub fn remove(&mut self, id: &str) -> Option<E> {
        self.elements.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.elements.get(id)
    }
}

impl<E: Scrollable> ElementRegistry for Document<E> {
    type Element = E;

    fn element_by_id(&mut self, id: &str) -> Option<&mut E> {
        self.elements.get_mut(id)
    }
}
