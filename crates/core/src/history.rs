use std::time::Instant;

use tracing::debug;

use crate::gesture::{GestureSample, Point, SwipeDirection, SwipeThresholds};

/// Previously submitted commands, oldest first, without duplicates.
///
/// `cursor` ranges over `0..=len`; `len` means nothing is selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history by submitting `entries` in order, so later
    /// duplicates win.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut h = Self::new();
        for e in entries {
            h.submit(e.as_ref());
        }
        h
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Record `text` (trimmed) as the newest entry, dropping an earlier copy.
    pub fn submit(&mut self, text: &str) {
        let text = text.trim();
        if let Some(pos) = self.entries.iter().position(|e| e == text) {
            self.entries.remove(pos);
        }
        self.entries.push(text.to_string());
        self.cursor = self.entries.len();
        debug!(target: "core", "history submit: {} entries", self.entries.len());
    }

    pub fn step_forward(&mut self) -> Option<&str> {
        if self.entries.is_empty() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.selected()
    }

    pub fn step_backward(&mut self) -> Option<&str> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.selected()
    }

    pub fn reset_cursor_to_end(&mut self) {
        self.cursor = self.entries.len();
    }
}

/// Result of ending a pointer gesture over the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome<'a> {
    /// Not a swipe; the pointer event belongs to whatever else is under it.
    Unrecognized,
    /// A swipe; carries the newly selected entry when the cursor moved.
    Swiped(SwipeDirection, Option<&'a str>),
}

impl<'a> GestureOutcome<'a> {
    pub fn selected(self) -> Option<&'a str> {
        match self {
            GestureOutcome::Swiped(_, sel) => sel,
            GestureOutcome::Unrecognized => None,
        }
    }
}

/// Command history browsed by horizontal swipes.
///
/// Swiping left moves toward newer entries, swiping right toward older ones.
#[derive(Clone, Debug)]
pub struct HistoryNavigator {
    history: CommandHistory,
    thresholds: SwipeThresholds,
}

impl HistoryNavigator {
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self::with_history(CommandHistory::new(), thresholds)
    }

    pub fn with_history(history: CommandHistory, thresholds: SwipeThresholds) -> Self {
        Self {
            history,
            thresholds,
        }
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn thresholds(&self) -> SwipeThresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: SwipeThresholds) {
        self.thresholds = thresholds;
    }

    pub fn submit(&mut self, text: &str) {
        self.history.submit(text);
    }

    pub fn step_forward(&mut self) -> Option<&str> {
        self.history.step_forward()
    }

    pub fn step_backward(&mut self) -> Option<&str> {
        self.history.step_backward()
    }

    pub fn reset_cursor_to_end(&mut self) {
        self.history.reset_cursor_to_end();
    }

    pub fn begin_gesture(&self, position: Point, timestamp: Instant) -> GestureSample {
        GestureSample::new(position, timestamp)
    }

    /// End a gesture and move through the history if it was a swipe.
    pub fn finish_gesture(
        &mut self,
        sample: GestureSample,
        position: Point,
        timestamp: Instant,
    ) -> GestureOutcome<'_> {
        match self.thresholds.classify(&sample, position, timestamp) {
            None => GestureOutcome::Unrecognized,
            Some(dir @ SwipeDirection::Left) => {
                GestureOutcome::Swiped(dir, self.history.step_forward())
            }
            Some(dir @ SwipeDirection::Right) => {
                GestureOutcome::Swiped(dir, self.history.step_backward())
            }
        }
    }

    /// Like [`finish_gesture`](Self::finish_gesture), reporting only the
    /// newly selected entry.
    pub fn end_gesture(
        &mut self,
        sample: GestureSample,
        position: Point,
        timestamp: Instant,
    ) -> Option<&str> {
        self.finish_gesture(sample, position, timestamp).selected()
    }
}
