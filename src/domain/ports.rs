use crate::utils::error::Result;
use async_trait::async_trait;

/// A UI element with vertical scroll state, measured in rows.
pub trait Scrollable {
    fn scroll_height(&self) -> usize;
    fn scroll_top(&self) -> usize;
    fn set_scroll_top(&mut self, offset: usize);
}

/// Lookup of elements by identifier, the way a page document resolves ids.
pub trait ElementRegistry {
    type Element: Scrollable;

    fn element_by_id(&mut self, id: &str) -> Option<&mut Self::Element>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn viewport_rows(&self) -> usize;
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<String>;
}
