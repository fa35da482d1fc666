#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{ChatReply, Product};

/// Who produced a chat entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single rendered entry in the assistant conversation.
#[derive(Clone, Debug)]
pub struct ChatEntry {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// Product recommendations attached to an assistant reply.
    pub products: Vec<Product>,
    /// Follow-up suggestion chips attached to an assistant reply.
    pub suggestions: Vec<String>,
}

/// State for the Alex recommendation assistant page.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub entries: Vec<ChatEntry>,
    /// Conversation id assigned by the server on the first reply.
    pub session_id: Option<String>,
    pub pending: bool,
}

impl ChatState {
    /// Fresh conversation opened with Alex's greeting and starter chips.
    pub fn welcome() -> Self {
        Self {
            entries: vec![ChatEntry {
                id: uuid::Uuid::new_v4().to_string(),
                role: ChatRole::Assistant,
                content: "Welcome to NexTechAI! I'm Alex, your personal shopping assistant. \
                          Ask me about smartphones, laptops, gaming gear, audio, or smart devices \
                          and I'll find the right match."
                    .to_owned(),
                products: Vec::new(),
                suggestions: vec![
                    "I need a laptop for work".to_owned(),
                    "Show me gaming headphones".to_owned(),
                    "Looking for a smartphone".to_owned(),
                    "Best tablets for students".to_owned(),
                    "Wireless earbuds under $100".to_owned(),
                ],
            }],
            session_id: None,
            pending: false,
        }
    }

    pub fn push_user(&mut self, content: &str) {
        self.entries.push(ChatEntry {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.to_owned(),
            products: Vec::new(),
            suggestions: Vec::new(),
        });
        self.pending = true;
    }

    pub fn push_reply(&mut self, reply: ChatReply) {
        self.session_id = Some(reply.session_id);
        self.entries.push(ChatEntry {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            content: reply.message,
            products: reply.products,
            suggestions: reply.suggestions,
        });
        self.pending = false;
    }

    /// Suggestion chips of the latest assistant entry, shown below the
    /// conversation while nothing is pending.
    pub fn current_suggestions(&self) -> Vec<String> {
        if self.pending {
            return Vec::new();
        }
        self.entries
            .iter()
            .rev()
            .find(|e| e.role == ChatRole::Assistant)
            .map(|e| e.suggestions.clone())
            .unwrap_or_default()
    }
}
