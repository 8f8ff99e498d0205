use std::sync::Mutex;

use thiserror::Error;

use crate::device::{DeviceInfo, WindowInfo};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("config: {0}")] Config(String),
    #[error("network: {0}")] Network(String),
    #[error("timeout: {0}")] Timeout(String),
    #[error("rejected ({status}): {body}")] Rejected { status: u16, body: String },
    #[error("decode: {0}")] Decode(String),
    #[error("other: {0}")] Other(String),
}

/// Entry points into the engine. Implementations are handed to whatever owns
/// the console surface; nothing reaches them through globals.
#[allow(async_fn_in_trait)]
pub trait NativeBridge: Send + Sync {
    /// Run a console command, returning whatever output the engine produced.
    async fn console_command(&self, command: &str) -> Result<String, BridgeError>;

    /// Report the outcome of a keyboard prompt; `update` is false on cancel.
    async fn virtual_keyboard_result(&self, update: bool, contents: &str) -> Result<(), BridgeError>;

    async fn set_device_info(&self, info: &DeviceInfo) -> Result<(), BridgeError>;

    /// Sent at startup and again after every resize.
    async fn set_window_info(&self, info: &WindowInfo) -> Result<(), BridgeError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedCall {
    Console(String),
    Keyboard { update: bool, contents: String },
    Device(DeviceInfo),
    Window(WindowInfo),
}

/// Bridge that only remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    calls: Mutex<Vec<RecordedCall>>,
    reply: Option<String>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every console command with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Some(reply.into()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl NativeBridge for RecordingBridge {
    async fn console_command(&self, command: &str) -> Result<String, BridgeError> {
        self.record(RecordedCall::Console(command.to_string()));
        Ok(self.reply.clone().unwrap_or_default())
    }

    async fn virtual_keyboard_result(&self, update: bool, contents: &str) -> Result<(), BridgeError> {
        self.record(RecordedCall::Keyboard {
            update,
            contents: contents.to_string(),
        });
        Ok(())
    }

    async fn set_device_info(&self, info: &DeviceInfo) -> Result<(), BridgeError> {
        self.record(RecordedCall::Device(info.clone()));
        Ok(())
    }

    async fn set_window_info(&self, info: &WindowInfo) -> Result<(), BridgeError> {
        self.record(RecordedCall::Window(*info));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let b = RecordingBridge::replying("ok");
        assert_eq!(b.console_command("stat fps").await.as_deref(), Ok("ok"));
        b.virtual_keyboard_result(false, "").await.unwrap();
        b.set_window_info(&WindowInfo::from_size(80, 24)).await.unwrap();
        assert_eq!(
            b.calls(),
            vec![
                RecordedCall::Console("stat fps".into()),
                RecordedCall::Keyboard {
                    update: false,
                    contents: String::new()
                },
                RecordedCall::Window(WindowInfo {
                    columns: 80,
                    rows: 24,
                    portrait: false
                }),
            ]
        );
    }

    #[test]
    fn rejected_error_reads_well() {
        let e = BridgeError::Rejected {
            status: 404,
            body: "no such command".into(),
        };
        assert_eq!(e.to_string(), "rejected (404): no such command");
    }
}
