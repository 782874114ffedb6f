use crate::domain::ports::{ElementRegistry, Scrollable};

/// Identifier of the chat transcript container.
pub const CHAT_BOX_ID: &str = "chat-box";

/// Scrolls `element` so its newest content is visible. `None` is a no-op.
pub fn scroll_to_bottom<E: Scrollable + ?Sized>(element: Option<&mut E>) {
    if let Some(element) = element {
        let height = element.scroll_height();
        element.set_scroll_top(height);
    }
}

/// Looks up [`CHAT_BOX_ID`] in `registry` and scrolls it to the bottom if present.
pub fn scroll_chat_box<R: ElementRegistry>(registry: &mut R) {
    let found = registry.element_by_id(CHAT_BOX_ID);
    if found.is_none() {
        tracing::trace!("No '{}' element to scroll", CHAT_BOX_ID);
    }
    scroll_to_bottom(found);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default, PartialEq)]
    struct Pane {
        height: usize,
        top: usize,
    }

    impl Scrollable for Pane {
        fn scroll_height(&self) -> usize {
            self.height
        }

        fn scroll_top(&self) -> usize {
            self.top
        }

        fn set_scroll_top(&mut self, offset: usize) {
            self.top = offset;
        }
    }

    #[derive(Default)]
    struct Page {
        panes: HashMap<String, Pane>,
    }

    impl ElementRegistry for Page {
        type Element = Pane;

        fn element_by_id(&mut self, id: &str) -> Option<&mut Pane> {
            self.panes.get_mut(id)
        }
    }

    #[test]
    fn test_scroll_to_bottom_sets_offset_to_height() {
        let mut pane = Pane { height: 120, top: 7 };
        scroll_to_bottom(Some(&mut pane));
        assert_eq!(pane.scroll_top(), pane.scroll_height());
    }

    #[test]
    fn test_scroll_to_bottom_missing_element_is_noop() {
        scroll_to_bottom::<Pane>(None);
    }

    #[test]
    fn test_scroll_to_bottom_through_trait_object() {
        let mut pane = Pane { height: 3, top: 0 };
        let dynamic: &mut dyn Scrollable = &mut pane;
        scroll_to_bottom(Some(dynamic));
        assert_eq!(pane.top, 3);
    }

    #[test]
    fn test_scroll_chat_box_only_touches_chat_box() {
        let mut page = Page::default();
        page.panes
            .insert(CHAT_BOX_ID.to_string(), Pane { height: 40, top: 0 });
        page.panes
            .insert("sidebar".to_string(), Pane { height: 90, top: 5 });

        scroll_chat_box(&mut page);

        assert_eq!(page.panes[CHAT_BOX_ID], Pane { height: 40, top: 40 });
        assert_eq!(page.panes["sidebar"], Pane { height: 90, top: 5 });
    }

    #[test]
    fn test_scroll_chat_box_without_chat_box() {
        let mut page = Page::default();
        page.panes
            .insert("sidebar".to_string(), Pane { height: 90, top: 5 });

        scroll_chat_box(&mut page);

        assert_eq!(page.panes["sidebar"], Pane { height: 90, top: 5 });
    }
}
