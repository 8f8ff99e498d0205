use textwrap::{wrap, Options};
use unicode_width::UnicodeWidthStr;

use crate::strings::{PREFIX_COMMAND, PREFIX_ERROR, PREFIX_INFO, PREFIX_REPLY};

use super::{App, LineKind, OutputLine};

pub struct WrappedLine {
    pub kind: LineKind,
    pub lines: Vec<String>,
}

pub fn prefix_for(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Command => PREFIX_COMMAND,
        LineKind::Reply => PREFIX_REPLY,
        LineKind::Info => PREFIX_INFO,
        LineKind::Error => PREFIX_ERROR,
    }
}

impl App {
    pub fn ensure_output_wrapped(&mut self, width: u16) {
        let width = width.max(1);
        if self.output_wrap_width != width || self.output_cache.len() > self.output.len() {
            self.output_cache.clear();
            self.output_wrap_width = width;
        }
        for line in &self.output[self.output_cache.len()..] {
            self.output_cache.push(wrap_line(line, width));
        }
    }

    pub fn output_total_lines(&self) -> usize {
        self.output_cache.iter().map(|w| w.lines.len()).sum()
    }

    fn output_viewport(&self) -> u16 {
        self.output_area
            .map(|a| a.height.saturating_sub(2))
            .unwrap_or(0)
    }

    pub(crate) fn output_page(&self) -> u16 {
        self.output_viewport().saturating_sub(1).max(1)
    }

    pub fn output_max_scroll(&self) -> u16 {
        let total = self.output_total_lines();
        total.saturating_sub(self.output_viewport() as usize) as u16
    }

    /// Scroll toward older output. `output_scroll` counts lines up from the
    /// bottom.
    pub fn scroll_output_up(&mut self, n: u16) {
        self.output_scroll = self
            .output_scroll
            .saturating_add(n)
            .min(self.output_max_scroll());
        self.dirty = true;
    }

    pub fn scroll_output_down(&mut self, n: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(n);
        self.dirty = true;
    }
}

fn wrap_line(line: &OutputLine, width: u16) -> WrappedLine {
    let prefix = prefix_for(line.kind);
    let full = format!("{}{}", prefix, line.text);
    let indent = " ".repeat(UnicodeWidthStr::width(prefix));
    let opts = Options::new(width as usize).subsequent_indent(&indent);
    let mut lines = wrap(&full, opts)
        .into_iter()
        .map(|c| c.into_owned())
        .collect::<Vec<_>>();
    if lines.is_empty() {
        lines.push(String::new());
    }
    WrappedLine {
        kind: line.kind,
        lines,
    }
}
