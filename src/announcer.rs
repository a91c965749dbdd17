//! Shared live region for assistive-tech announcements.
//!
//! One visually-hidden node per page, created lazily and reused by every
//! gallery. Text changes are read aloud by screen readers without moving
//! focus; rapid changes overwrite each other, nothing queues.

use std::cell::RefCell;
use std::rc::Rc;
use web_sys::Element;

const LIVE_REGION_ID: &str = "gallery-live-region";

/// Handle to the process-wide live region. Cloning shares the node;
/// each gallery receives a clone at mount.
#[derive(Clone, Default)]
pub struct Announcer {
    node: Rc<RefCell<Option<Element>>>,
}

impl PartialEq for Announcer {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the live region text.
    pub fn announce(&self, message: &str) {
        if let Some(region) = self.ensure_node() {
            region.set_text_content(Some(message));
        }
    }

    fn ensure_node(&self) -> Option<Element> {
        if let Some(node) = self.node.borrow().as_ref() {
            return Some(node.clone());
        }
        let document = web_sys::window()?.document()?;
        let region = match document.get_element_by_id(LIVE_REGION_ID) {
            Some(existing) => existing,
            None => {
                let region = document.create_element("div").ok()?;
                region.set_id(LIVE_REGION_ID);
                region.set_class_name("visually-hidden");
                let _ = region.set_attribute("aria-live", "polite");
                let _ = region.set_attribute("aria-atomic", "true");
                document.body()?.append_child(&region).ok()?;
                region
            }
        };
        *self.node.borrow_mut() = Some(region.clone());
        Some(region)
    }
}

/// 1-based message read out on main-strip slide changes.
pub fn slide_message(position: usize, total: usize) -> String {
    format!("Image {} of {}", position, total)
}

#[cfg(test)]
mod tests {
    use super::slide_message;

    #[test]
    fn slide_message_is_one_based() {
        assert_eq!(slide_message(2, 5), "Image 2 of 5");
        assert_eq!(slide_message(1, 1), "Image 1 of 1");
    }
}
