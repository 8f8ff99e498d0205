// Centralized UI strings and labels. ASCII-friendly by default.

use unicode_width::UnicodeWidthStr;

// Output pane prefixes
pub const PREFIX_COMMAND: &str = "> ";
pub const PREFIX_REPLY: &str = "  ";
pub const PREFIX_INFO: &str = "* ";
pub const PREFIX_ERROR: &str = "! ";

pub const TITLE_OUTPUT: &str = " Engine Output ";
pub const TITLE_CONSOLE: &str = " Console Window - Enter Command ";
pub const TITLE_HELP: &str = " Help / Shortcuts ";

pub const CONSOLE_HINT: &str = "Enter: OK   Esc: Cancel   Swipe or Up/Down: history";
pub const KEYBOARD_HINT: &str = "Enter: OK   Esc: Cancel";
pub const INPUT_PLACEHOLDER: &str = "type a console command";

pub fn console_banner(bridge: &str) -> String {
    format!("[Engine bridge: {}]", bridge)
}

pub fn keyboard_title(label: &str) -> String {
    if label.trim().is_empty() {
        " Input ".to_string()
    } else {
        format!(" {} ", label.trim())
    }
}

pub fn build_scroll_label(scroll: u16) -> String {
    if scroll == 0 {
        "Bottom".to_string()
    } else {
        format!("+{} lines", scroll)
    }
}

// Status bar with width-aware compaction: segments are dropped from the
// right once they no longer fit.
pub fn build_status_line(
    mode: &str,
    scroll: u16,
    history_len: usize,
    history_cursor: usize,
    pending: usize,
    max_width: u16,
) -> String {
    let mut segments: Vec<String> = vec![
        format!("[{}][{}]", mode, build_scroll_label(scroll)),
        format!("Hist:{}/{}", history_cursor.min(history_len), history_len),
    ];
    if pending > 0 {
        segments.push(format!("Pending:{}", pending));
    }
    let hints: [&str; 4] = [
        "`/F1: console",
        "PgUp/PgDn: scroll",
        "?: help",
        "Ctrl-C: quit",
    ];
    for h in hints {
        segments.push(h.to_string());
    }

    let sep = "  |  ";
    let sep_w = UnicodeWidthStr::width(sep);
    let mut out = String::new();
    let mut used = 0usize;
    for (i, seg) in segments.iter().enumerate() {
        let segw = UnicodeWidthStr::width(seg.as_str());
        let addw = segw + if i == 0 { 0 } else { sep_w };
        if used + addw > max_width as usize {
            break;
        }
        if i > 0 {
            out.push_str(sep);
            used += sep_w;
        }
        out.push_str(seg);
        used += segw;
    }
    out
}

pub fn help_lines_ascii() -> &'static [&'static str] {
    &[
        "Console",
        "  ` or F1: Open console    Enter: OK (run command)    Esc: Cancel",
        "History",
        "  Drag left across the input: newer entry    Drag right: older entry",
        "  Up/Down: older/newer entry",
        "Input Editing",
        "  Arrow: Move cursor    Backspace/Delete: Delete prev/next char",
        "  Home/End, Ctrl+A/E: Line start/end    Ctrl+Arrow: Word move",
        "  Ctrl+W: Delete prev word    Ctrl+U/K: Kill to line start/end",
        "Local commands",
        "  /keyboard <label>: Open a text prompt    /history: List history",
        "  /open <url>: Open a web link    /clear: Clear output    /quit: Quit",
        "Output",
        "  Mouse wheel, PgUp/PgDn: Scroll    End: Back to bottom",
        "  ?: Open/close this panel    Ctrl-C: Quit",
    ]
}
