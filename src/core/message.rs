//! Chat messages as displayed in a transcript.

use serde::Serialize;

use crate::core::answer;
use crate::core::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Built once per send/receive, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    /// Prose shown for the message (visualization markup removed).
    pub content: String,
    /// Extracted visualization markup.
    pub html_content: Option<String>,
    pub has_visualization: bool,
    pub contexts: Option<Vec<String>>,
    pub is_error: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            html_content: None,
            has_visualization: false,
            contexts: None,
            is_error: false,
        }
    }

    /// Build an assistant message from a raw answer, splitting off any
    /// embedded visualization.
    pub fn assistant(answer: &str, contexts: Option<Vec<String>>) -> Self {
        let parsed = answer::parse_message(answer);
        Self {
            role: Role::Assistant,
            content: parsed.text,
            html_content: parsed.html,
            has_visualization: parsed.has_visualization,
            contexts,
            is_error: false,
        }
    }

    /// An assistant-side error shown in place of an answer.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            html_content: None,
            has_visualization: false,
            contexts: None,
            is_error: true,
        }
    }

    /// Prose as display HTML. Available before any chart is mounted.
    pub fn display_html(&self) -> String {
        format::format_message(&self.content)
    }
}
