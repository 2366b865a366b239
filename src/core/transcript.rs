//! Append-only chat transcript.

use crate::core::message::Message;

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its index.
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// `(index, markup)` for every message carrying a visualization.
    pub fn visualizations(&self) -> impl Iterator<Item = (usize, &str)> {
        self.messages
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.html_content.as_deref().map(|h| (i, h)))
    }

    /// Drop every message. Mounts keyed by the old indices must be cancelled
    /// by the caller.
    pub fn restart(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_push_order() {
        let mut t = Transcript::new();
        assert_eq!(t.push(Message::user("q")), 0);
        assert_eq!(
            t.push(Message::assistant("<html><body><div id=\"a\"></div></body></html>", None)),
            1
        );
        assert_eq!(t.push(Message::assistant("no chart", None)), 2);
        let viz: Vec<usize> = t.visualizations().map(|(i, _)| i).collect();
        assert_eq!(viz, [1]);
    }

    #[test]
    fn restart_clears() {
        let mut t = Transcript::new();
        t.push(Message::user("q"));
        t.restart();
        assert!(t.is_empty());
        assert_eq!(t.push(Message::user("again")), 0);
    }
}
