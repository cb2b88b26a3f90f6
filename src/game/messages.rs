//! # Message Log
//!
//! Bounded history of game messages shown in the side panel.

use crate::config::MESSAGE_LOG_CAPACITY;
use crate::game::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One line of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Rgb,
}

/// First-in first-out message history with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<Message>,
    capacity: usize,
}

impl MessageLog {
    /// Creates an empty log holding at most `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Appends a message, dropping the oldest when full.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{MessageLog, Rgb};
    ///
    /// let mut log = MessageLog::new(2);
    /// log.add("one", Rgb::WHITE);
    /// log.add("two", Rgb::WHITE);
    /// log.add("three", Rgb::WHITE);
    /// let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
    /// assert_eq!(texts, ["two", "three"]);
    /// ```
    pub fn add(&mut self, text: impl Into<String>, color: Rgb) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Message {
            text: text.into(),
            color,
        });
    }

    /// Messages from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The newest `count` messages, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Message> {
        self.entries.iter().skip(self.entries.len().saturating_sub(count))
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(MESSAGE_LOG_CAPACITY)
    }
}
