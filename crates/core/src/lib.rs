//! Data components behind the swipe console: command history and gesture
//! recognition, the dialog state that drives them, and the bridge seam the
//! engine is reached through.

pub mod bridge;
pub mod device;
pub mod dialog;
pub mod edit;
pub mod gesture;
pub mod history;

pub use bridge::{BridgeError, NativeBridge, RecordedCall, RecordingBridge};
pub use device::{DeviceInfo, WindowInfo};
pub use dialog::{ConsoleDialog, KeyboardPrompt, KeyboardResult, PointerOutcome};
pub use edit::TextBuffer;
pub use gesture::{GestureSample, Point, SwipeDirection, SwipeThresholds};
pub use history::{CommandHistory, GestureOutcome, HistoryNavigator};
