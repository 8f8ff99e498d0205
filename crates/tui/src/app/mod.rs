use ratatui::layout::Rect;
use swipecon_core::{
    CommandHistory, ConsoleDialog, KeyboardPrompt, KeyboardResult, TextBuffer, WindowInfo,
};
use tracing::{error, info};

use crate::config::UiConfig;
use crate::worker::{BridgeCall, BridgeHandle, BridgeReply};

pub mod commands;
pub mod keys;
pub mod output;
pub mod pointer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Reply,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: LineKind,
    pub text: String,
}

impl OutputLine {
    pub fn new<S: Into<String>>(kind: LineKind, text: S) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Which modal currently receives typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Keyboard,
    Console,
    Output,
}

pub struct App {
    pub console: ConsoleDialog,
    pub keyboard: KeyboardPrompt,
    pub banner: String,
    pub output: Vec<OutputLine>,
    pub output_scroll: u16,
    pub output_area: Option<Rect>,
    pub output_cache: Vec<output::WrappedLine>,
    pub output_wrap_width: u16,
    /// Inner rect of the input line of the topmost dialog, if any.
    pub input_area: Option<Rect>,
    /// Horizontal scroll, in columns, of that input line.
    pub input_scroll: u16,
    pub bridge: BridgeHandle,
    pub pending: usize,
    pub persist_history: bool,
    pub show_help: bool,
    pub should_quit: bool,
    pub dirty: bool,
    /// Last window size handed to the bridge.
    pub window: Option<WindowInfo>,
    /// Opens `/open` targets in the system browser.
    pub url_launcher: fn(&str) -> std::io::Result<()>,
}

impl App {
    pub fn new(cfg: &UiConfig, history: CommandHistory, bridge: BridgeHandle, banner: String) -> Self {
        let mut s = Self {
            console: ConsoleDialog::with_history(history, cfg.thresholds()),
            keyboard: KeyboardPrompt::new(),
            banner,
            output: vec![OutputLine::new(
                LineKind::Info,
                "Console ready. Enter: run command; drag across the input to browse history.",
            )],
            output_scroll: 0,
            output_area: None,
            output_cache: Vec::new(),
            output_wrap_width: 0,
            input_area: None,
            input_scroll: 0,
            bridge,
            pending: 0,
            persist_history: cfg.persist_history,
            show_help: false,
            should_quit: false,
            dirty: true,
            window: None,
            url_launcher: commands::launch_in_browser,
        };
        s.open_console();
        s
    }

    pub fn focus(&self) -> Focus {
        if self.keyboard.is_showing() {
            Focus::Keyboard
        } else if self.console.is_showing() {
            Focus::Console
        } else {
            Focus::Output
        }
    }

    /// Buffer of the dialog that currently has focus.
    pub fn active_input_mut(&mut self) -> Option<&mut TextBuffer> {
        match self.focus() {
            Focus::Keyboard => Some(self.keyboard.input_mut()),
            Focus::Console => Some(self.console.input_mut()),
            Focus::Output => None,
        }
    }

    pub fn open_console(&mut self) {
        if self.console.open(self.banner.clone()) {
            self.input_scroll = 0;
            self.dirty = true;
        }
    }

    pub fn push_line(&mut self, kind: LineKind, text: impl Into<String>) {
        self.output.push(OutputLine::new(kind, text));
        self.output_scroll = 0;
        self.dirty = true;
    }

    /// OK on the console: record, then either run a local command or hand the
    /// text to the engine.
    pub fn confirm_console(&mut self) {
        let command = self.console.confirm();
        self.input_scroll = 0;
        self.dirty = true;
        if self.persist_history {
            if let Err(e) = crate::persist::save_history(self.console.history()) {
                error!(target: "tui", "save history: {:#}", e);
            }
        }
        if self.try_handle_slash_command(&command) {
            return;
        }
        info!(target: "tui", "console submit: input_len={} chars", command.len());
        self.push_line(LineKind::Command, command.clone());
        if self.bridge.post(BridgeCall::Console(command)) {
            self.pending += 1;
        } else {
            self.push_line(LineKind::Error, "engine bridge is not running");
        }
    }

    pub fn cancel_console(&mut self) {
        self.console.cancel();
        self.input_scroll = 0;
        self.dirty = true;
    }

    pub fn show_keyboard(&mut self, label: &str, contents: &str) {
        if self.keyboard.show(label, contents) {
            self.input_scroll = 0;
            self.dirty = true;
        }
    }

    pub fn confirm_keyboard(&mut self) {
        let result = self.keyboard.confirm();
        self.finish_keyboard(result);
    }

    pub fn cancel_keyboard(&mut self) {
        let result = self.keyboard.cancel();
        self.finish_keyboard(result);
    }

    fn finish_keyboard(&mut self, result: KeyboardResult) {
        self.input_scroll = 0;
        self.dirty = true;
        if self.bridge.post(BridgeCall::Keyboard(result)) {
            self.pending += 1;
        }
    }

    /// Drain replies from the bridge worker.
    pub fn on_tick(&mut self) {
        while let Some(reply) = self.bridge.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            match reply {
                BridgeReply::Console { result: Ok(text), .. } => {
                    for line in text.lines() {
                        self.push_line(LineKind::Reply, line);
                    }
                }
                BridgeReply::Console {
                    command,
                    result: Err(e),
                } => {
                    self.push_line(LineKind::Error, format!("{}: {}", command, e));
                }
                BridgeReply::Keyboard(Ok(())) => {}
                BridgeReply::Keyboard(Err(e)) => {
                    self.push_line(LineKind::Error, format!("keyboard result: {}", e));
                }
                BridgeReply::Device(Ok(())) => {
                    self.push_line(LineKind::Info, "device info sent to engine");
                }
                BridgeReply::Device(Err(e)) => {
                    self.push_line(LineKind::Error, format!("device info: {}", e));
                }
                BridgeReply::Window(Ok(())) => {}
                BridgeReply::Window(Err(e)) => {
                    self.push_line(LineKind::Error, format!("window info: {}", e));
                }
            }
        }
    }

    pub fn post_device_info(&mut self, info: swipecon_core::DeviceInfo) {
        if self.bridge.post(BridgeCall::Device(info)) {
            self.pending += 1;
        }
    }

    /// Tell the engine about the terminal size. Repeats of the last size
    /// are dropped, since resize events arrive in bursts.
    pub fn post_window_info(&mut self, columns: u16, rows: u16) {
        let info = WindowInfo::from_size(columns, rows);
        if self.window == Some(info) {
            return;
        }
        self.window = Some(info);
        if self.bridge.post(BridgeCall::Window(info)) {
            self.pending += 1;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::mpsc::{self, Receiver, Sender};

    use super::*;

    pub struct Harness {
        pub app: App,
        pub calls: Receiver<BridgeCall>,
        pub replies: Sender<BridgeReply>,
    }

    pub fn harness(entries: &[&str]) -> Harness {
        let (call_tx, calls) = mpsc::channel();
        let (replies, reply_rx) = mpsc::channel();
        let cfg = UiConfig::default();
        let mut app = App::new(
            &cfg,
            CommandHistory::from_entries(entries),
            BridgeHandle::from_channels(call_tx, reply_rx),
            "[Engine bridge: test]".into(),
        );
        app.url_launcher = |_| Ok(());
        Harness {
            app,
            calls,
            replies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::harness;
    use super::*;
    use swipecon_core::BridgeError;

    #[test]
    fn starts_with_console_open_past_newest_entry() {
        let h = harness(&["a", "b"]);
        assert_eq!(h.app.focus(), Focus::Console);
        assert_eq!(h.app.console.message(), "[Engine bridge: test]");
        assert_eq!(h.app.console.history().cursor(), 2);
    }

    #[test]
    fn confirm_forwards_command_and_closes() {
        let mut h = harness(&[]);
        h.app.console.input_mut().set_text(" stat fps ");
        h.app.confirm_console();
        assert_eq!(h.calls.try_recv(), Ok(BridgeCall::Console("stat fps".into())));
        assert_eq!(h.app.focus(), Focus::Output);
        assert_eq!(h.app.pending, 1);
        assert_eq!(
            h.app.output.last(),
            Some(&OutputLine::new(LineKind::Command, "stat fps"))
        );
    }

    #[test]
    fn replies_land_in_output() {
        let mut h = harness(&[]);
        h.app.console.input_mut().set_text("stat unit");
        h.app.confirm_console();
        h.replies
            .send(BridgeReply::Console {
                command: "stat unit".into(),
                result: Ok("Frame: 16ms\nGame: 4ms".into()),
            })
            .unwrap();
        h.replies
            .send(BridgeReply::Console {
                command: "bogus".into(),
                result: Err(BridgeError::Rejected {
                    status: 404,
                    body: "unknown".into(),
                }),
            })
            .unwrap();
        h.app.on_tick();
        let tail: Vec<_> = h.app.output.iter().rev().take(3).rev().cloned().collect();
        assert_eq!(
            tail,
            vec![
                OutputLine::new(LineKind::Reply, "Frame: 16ms"),
                OutputLine::new(LineKind::Reply, "Game: 4ms"),
                OutputLine::new(LineKind::Error, "bogus: rejected (404): unknown"),
            ]
        );
        assert_eq!(h.app.pending, 0);
    }

    #[test]
    fn window_size_is_sent_once_per_change() {
        let mut h = harness(&[]);
        h.app.post_window_info(120, 40);
        h.app.post_window_info(120, 40);
        h.app.post_window_info(40, 100);
        assert_eq!(
            h.calls.try_recv(),
            Ok(BridgeCall::Window(WindowInfo::from_size(120, 40)))
        );
        let turned = h.calls.try_recv().unwrap();
        assert!(matches!(turned, BridgeCall::Window(w) if w.portrait));
        assert!(h.calls.try_recv().is_err());
        assert_eq!(h.app.pending, 2);

        h.replies
            .send(BridgeReply::Window(Err(BridgeError::Timeout("slow".into()))))
            .unwrap();
        h.app.on_tick();
        assert_eq!(
            h.app.output.last(),
            Some(&OutputLine::new(LineKind::Error, "window info: timeout: slow"))
        );
        assert_eq!(h.app.pending, 1);
    }

    #[test]
    fn keyboard_results_reach_the_bridge() {
        let mut h = harness(&[]);
        h.app.show_keyboard("Name", "guest");
        assert_eq!(h.app.focus(), Focus::Keyboard);
        h.app.cancel_keyboard();
        assert_eq!(
            h.calls.try_recv(),
            Ok(BridgeCall::Keyboard(KeyboardResult {
                update: false,
                contents: String::new()
            }))
        );
        assert_eq!(h.app.focus(), Focus::Console);
    }
}
