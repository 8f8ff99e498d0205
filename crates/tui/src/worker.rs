use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Context;
use swipecon_core::{BridgeError, DeviceInfo, KeyboardResult, NativeBridge, WindowInfo};
use tracing::{debug, error, warn};

/// Work the UI thread hands to the engine bridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeCall {
    Console(String),
    Keyboard(KeyboardResult),
    Device(DeviceInfo),
    Window(WindowInfo),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeReply {
    Console {
        command: String,
        result: Result<String, BridgeError>,
    },
    Keyboard(Result<(), BridgeError>),
    Device(Result<(), BridgeError>),
    Window(Result<(), BridgeError>),
}

/// UI-side ends of the bridge worker's channels.
pub struct BridgeHandle {
    tx: Sender<BridgeCall>,
    rx: Receiver<BridgeReply>,
}

impl BridgeHandle {
    pub fn from_channels(tx: Sender<BridgeCall>, rx: Receiver<BridgeReply>) -> Self {
        Self { tx, rx }
    }

    pub fn post(&self, call: BridgeCall) -> bool {
        match self.tx.send(call) {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "tui", "bridge worker gone, dropping {:?}", e.0);
                false
            }
        }
    }

    pub fn try_recv(&self) -> Option<BridgeReply> {
        self.rx.try_recv().ok()
    }
}

/// Run `bridge` on its own thread with a private runtime. Calls are served
/// one at a time, in the order posted.
pub fn spawn<B: NativeBridge + 'static>(bridge: B) -> anyhow::Result<BridgeHandle> {
    let (call_tx, call_rx) = mpsc::channel::<BridgeCall>();
    let (reply_tx, reply_rx) = mpsc::channel::<BridgeReply>();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build bridge runtime")?;
    std::thread::Builder::new()
        .name("bridge".into())
        .spawn(move || {
            for call in call_rx {
                let reply = rt.block_on(dispatch(&bridge, call));
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
            debug!(target: "tui", "bridge worker exiting");
        })
        .context("spawn bridge worker")?;
    Ok(BridgeHandle::from_channels(call_tx, reply_rx))
}

pub async fn dispatch<B: NativeBridge>(bridge: &B, call: BridgeCall) -> BridgeReply {
    match call {
        BridgeCall::Console(command) => {
            let result = bridge.console_command(&command).await;
            if let Err(e) = &result {
                error!(target: "tui", "console command failed: {}", e);
            }
            BridgeReply::Console { command, result }
        }
        BridgeCall::Keyboard(r) => {
            let result = bridge.virtual_keyboard_result(r.update, &r.contents).await;
            if let Err(e) = &result {
                error!(target: "tui", "keyboard result failed: {}", e);
            }
            BridgeReply::Keyboard(result)
        }
        BridgeCall::Device(info) => {
            let result = bridge.set_device_info(&info).await;
            if let Err(e) = &result {
                warn!(target: "tui", "device info not delivered: {}", e);
            }
            BridgeReply::Device(result)
        }
        BridgeCall::Window(info) => {
            let result = bridge.set_window_info(&info).await;
            if let Err(e) = &result {
                warn!(target: "tui", "window info not delivered: {}", e);
            }
            BridgeReply::Window(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use swipecon_core::{RecordedCall, RecordingBridge};

    #[tokio::test]
    async fn dispatch_forwards_each_call_kind() {
        let b = RecordingBridge::replying("done");
        let reply = dispatch(&b, BridgeCall::Console("stat unit".into())).await;
        assert_eq!(
            reply,
            BridgeReply::Console {
                command: "stat unit".into(),
                result: Ok("done".into())
            }
        );
        let kb = KeyboardResult {
            update: true,
            contents: "guest".into(),
        };
        assert_eq!(
            dispatch(&b, BridgeCall::Keyboard(kb)).await,
            BridgeReply::Keyboard(Ok(()))
        );
        let window = WindowInfo::from_size(100, 30);
        assert_eq!(
            dispatch(&b, BridgeCall::Window(window)).await,
            BridgeReply::Window(Ok(()))
        );
        assert_eq!(
            b.calls(),
            vec![
                RecordedCall::Console("stat unit".into()),
                RecordedCall::Keyboard {
                    update: true,
                    contents: "guest".into()
                },
                RecordedCall::Window(window),
            ]
        );
    }

    #[test]
    fn worker_answers_in_posting_order() {
        let handle = spawn(RecordingBridge::replying("pong")).unwrap();
        assert!(handle.post(BridgeCall::Console("one".into())));
        assert!(handle.post(BridgeCall::Console("two".into())));
        let first = handle.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = handle.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, BridgeReply::Console { ref command, .. } if command == "one"));
        assert!(matches!(second, BridgeReply::Console { ref command, .. } if command == "two"));
    }

    #[test]
    fn post_reports_a_dead_worker() {
        let (tx, rx) = mpsc::channel();
        let (_reply_tx, reply_rx) = mpsc::channel();
        drop(rx);
        let handle = BridgeHandle::from_channels(tx, reply_rx);
        assert!(!handle.post(BridgeCall::Console("lost".into())));
        assert!(handle.try_recv().is_none());
    }
}
