//! Per-thread input history with a recall cursor.
//!
//! DESIGN
//! ======
//! The cursor belongs to the focused thread only. It ranges over
//! `0..=len`, where `len` means "past the newest entry" (a fresh, empty
//! input). Focusing a thread, pushing to it, or rebuilding it resets the
//! cursor to `len`.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::HashMap;

use super::thread::ThreadKey;

#[derive(Clone, Debug, Default)]
pub struct InputHistory {
    entries: HashMap<ThreadKey, Vec<String>>,
    focus: Option<ThreadKey>,
    cursor: usize,
}

impl InputHistory {
    /// Point the cursor at `key`'s history, or at nothing.
    pub fn focus(&mut self, key: Option<ThreadKey>) {
        self.focus = key;
        self.reset_cursor();
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.focused_len();
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn focused(&self) -> Option<&ThreadKey> {
        self.focus.as_ref()
    }

    #[must_use]
    pub fn entries(&self, key: &ThreadKey) -> &[String] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn focused_len(&self) -> usize {
        self.focus
            .as_ref()
            .map_or(0, |key| self.entries(key).len())
    }

    /// Append a submitted input.
    pub fn push(&mut self, key: ThreadKey, text: String) {
        let is_focused = self.focus.as_ref() == Some(&key);
        self.entries.entry(key).or_default().push(text);
        if is_focused {
            self.reset_cursor();
        }
    }

    /// Replace a thread's history wholesale.
    pub fn rebuild(&mut self, key: ThreadKey, inputs: impl IntoIterator<Item = String>) {
        let is_focused = self.focus.as_ref() == Some(&key);
        self.entries.insert(key, inputs.into_iter().collect());
        if is_focused {
            self.reset_cursor();
        }
    }

    /// Move history from one key to another (placeholder materialization).
    pub fn promote(&mut self, from: &ThreadKey, to: ThreadKey) {
        let moved = self.entries.remove(from).unwrap_or_default();
        self.entries.entry(to.clone()).or_default().extend(moved);
        if self.focus.as_ref() == Some(from) {
            self.focus = Some(to);
        }
        self.reset_cursor();
    }

    pub fn remove(&mut self, key: &ThreadKey) {
        self.entries.remove(key);
        self.reset_cursor();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_cursor();
    }

    /// Step back to an older input. Stays on the oldest entry once reached.
    pub fn previous(&mut self) -> Option<&str> {
        let key = self.focus.as_ref()?;
        let list = self.entries.get(key)?;
        if list.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        list.get(self.cursor).map(String::as_str)
    }

    /// Step forward to a newer input. Returns `None` when back at fresh input.
    pub fn next(&mut self) -> Option<&str> {
        let key = self.focus.as_ref()?;
        let list = self.entries.get(key)?;
        if self.cursor < list.len() {
            self.cursor += 1;
        }
        list.get(self.cursor).map(String::as_str)
    }
}
