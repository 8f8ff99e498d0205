use std::time::Instant;

use tracing::debug;

use crate::edit::TextBuffer;
use crate::gesture::{GestureSample, Point, SwipeThresholds};
use crate::history::{CommandHistory, GestureOutcome, HistoryNavigator};

/// What a pointer-up did to the console input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A swipe selected this history entry; it is now the input text.
    Selected(String),
    /// A swipe ran off either end of the history.
    Consumed,
    /// Not a swipe; the surface should treat it as a plain click.
    Unconsumed,
}

/// Modal console window: one input line backed by a swipeable history.
#[derive(Debug)]
pub struct ConsoleDialog {
    navigator: HistoryNavigator,
    input: TextBuffer,
    message: String,
    showing: bool,
    gesture: Option<GestureSample>,
}

impl ConsoleDialog {
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self::with_history(CommandHistory::new(), thresholds)
    }

    pub fn with_history(history: CommandHistory, thresholds: SwipeThresholds) -> Self {
        Self {
            navigator: HistoryNavigator::with_history(history, thresholds),
            input: TextBuffer::new(),
            message: String::new(),
            showing: false,
            gesture: None,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn input(&self) -> &TextBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextBuffer {
        &mut self.input
    }

    pub fn history(&self) -> &CommandHistory {
        self.navigator.history()
    }

    /// Show the window with `message` above the input, starting history
    /// browsing past the newest entry. Returns false if it was already up.
    pub fn open(&mut self, message: impl Into<String>) -> bool {
        if self.showing {
            debug!(target: "core", "console already showing");
            return false;
        }
        self.navigator.reset_cursor_to_end();
        self.message = message.into();
        self.gesture = None;
        self.showing = true;
        true
    }

    /// Commit the current input to history, clear it and close. Returns the
    /// command to forward to the engine.
    pub fn confirm(&mut self) -> String {
        let command = self.input.text().trim().to_string();
        self.navigator.submit(&command);
        self.close();
        command
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.input.clear();
        self.gesture = None;
        self.showing = false;
    }

    pub fn step_backward(&mut self) -> bool {
        match self.navigator.step_backward() {
            Some(text) => {
                self.input.set_text(text);
                true
            }
            None => false,
        }
    }

    pub fn step_forward(&mut self) -> bool {
        match self.navigator.step_forward() {
            Some(text) => {
                self.input.set_text(text);
                true
            }
            None => false,
        }
    }

    pub fn pointer_down(&mut self, position: Point, timestamp: Instant) {
        self.gesture = Some(self.navigator.begin_gesture(position, timestamp));
    }

    /// Finish the pointer interaction started by [`pointer_down`](Self::pointer_down).
    /// An up without a matching down is never a swipe.
    pub fn pointer_up(&mut self, position: Point, timestamp: Instant) -> PointerOutcome {
        let Some(sample) = self.gesture.take() else {
            return PointerOutcome::Unconsumed;
        };
        match self.navigator.finish_gesture(sample, position, timestamp) {
            GestureOutcome::Unrecognized => PointerOutcome::Unconsumed,
            GestureOutcome::Swiped(_, None) => PointerOutcome::Consumed,
            GestureOutcome::Swiped(_, Some(text)) => {
                self.input.set_text(text);
                PointerOutcome::Selected(text.to_string())
            }
        }
    }
}

/// Value handed back to the engine when the keyboard prompt closes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardResult {
    pub update: bool,
    pub contents: String,
}

/// Modal single-value text prompt requested by the engine.
#[derive(Debug, Default)]
pub struct KeyboardPrompt {
    label: String,
    input: TextBuffer,
    showing: bool,
}

impl KeyboardPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn input(&self) -> &TextBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextBuffer {
        &mut self.input
    }

    pub fn show(&mut self, label: impl Into<String>, contents: &str) -> bool {
        if self.showing {
            debug!(target: "core", "keyboard prompt already showing");
            return false;
        }
        self.label = label.into();
        self.input.set_text(contents);
        self.showing = true;
        true
    }

    pub fn confirm(&mut self) -> KeyboardResult {
        let contents = self.input.text().to_string();
        self.close();
        KeyboardResult {
            update: true,
            contents,
        }
    }

    pub fn cancel(&mut self) -> KeyboardResult {
        self.close();
        KeyboardResult {
            update: false,
            contents: String::new(),
        }
    }

    fn close(&mut self) {
        self.input.clear();
        self.showing = false;
    }
}
