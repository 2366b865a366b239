//! Mount points: the display-side subtree a chart is drawn into.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::format::escape;

/// Element created for a chart, carrying the render-unique id and sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartElement {
    pub id: String,
    pub height: String,
    pub width: String,
}

impl ChartElement {
    pub fn to_html(&self) -> String {
        format!(
            "<div id=\"{}\" style=\"height: {}; width: {};\"></div>",
            escape(&self.id),
            escape(&self.height),
            escape(&self.width)
        )
    }
}

/// Content placed in a mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountContent {
    Chart(ChartElement),
    Error(String),
}

/// A node charts can be mounted into. One per message.
pub trait MountPoint: Send + Sync {
    /// Whether the node is attached to the live view.
    fn is_attached(&self) -> bool;
    /// Remove everything previously mounted.
    fn clear(&self);
    fn insert_chart(&self, element: ChartElement);
    /// Show a user-visible error in place of the chart.
    fn show_error(&self, message: &str);
}

#[derive(Debug, Default)]
struct SlotState {
    attached: bool,
    children: Vec<MountContent>,
}

/// In-memory mount point. Clones share the same node.
#[derive(Debug, Clone, Default)]
pub struct MountSlot {
    state: Arc<Mutex<SlotState>>,
}

impl MountSlot {
    /// A slot that is already attached.
    pub fn attached() -> Self {
        let slot = Self::default();
        slot.attach();
        slot
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn attach(&self) {
        self.lock().attached = true;
    }

    #[cfg(test)]
    pub fn detach(&self) {
        self.lock().attached = false;
    }

    #[cfg(test)]
    pub fn children(&self) -> Vec<MountContent> {
        self.lock().children.clone()
    }

    /// The first error message shown in this slot, if any.
    #[cfg(test)]
    pub fn error(&self) -> Option<String> {
        self.lock().children.iter().find_map(|c| match c {
            MountContent::Error(msg) => Some(msg.clone()),
            MountContent::Chart(_) => None,
        })
    }

    pub fn to_html(&self) -> String {
        self.lock()
            .children
            .iter()
            .map(|child| match child {
                MountContent::Chart(el) => el.to_html(),
                MountContent::Error(msg) => {
                    format!("<div class=\"chart-error\">{}</div>", escape(msg))
                }
            })
            .collect()
    }
}

impl MountPoint for MountSlot {
    fn is_attached(&self) -> bool {
        self.lock().attached
    }

    fn clear(&self) {
        self.lock().children.clear();
    }

    fn insert_chart(&self, element: ChartElement) {
        self.lock().children.push(MountContent::Chart(element));
    }

    fn show_error(&self, message: &str) {
        self.lock()
            .children
            .push(MountContent::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let slot = MountSlot::default();
        let view = slot.clone();
        assert!(!view.is_attached());
        slot.attach();
        slot.show_error("boom");
        assert!(view.is_attached());
        assert_eq!(view.error().as_deref(), Some("boom"));
        view.clear();
        assert!(slot.children().is_empty());
    }

    #[test]
    fn html_is_escaped() {
        let slot = MountSlot::attached();
        slot.insert_chart(ChartElement {
            id: "c-0".into(),
            height: "300px".into(),
            width: "100%".into(),
        });
        slot.show_error("<bad>");
        assert_eq!(
            slot.to_html(),
            "<div id=\"c-0\" style=\"height: 300px; width: 100%;\"></div><div class=\"chart-error\">&lt;bad&gt;</div>"
        );
    }
}
