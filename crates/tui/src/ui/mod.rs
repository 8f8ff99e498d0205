use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use swipecon_core::TextBuffer;

use crate::app::{App, Focus, LineKind};
use crate::strings::{
    build_status_line, help_lines_ascii, keyboard_title, CONSOLE_HINT, INPUT_PLACEHOLDER,
    KEYBOARD_HINT, TITLE_CONSOLE, TITLE_HELP, TITLE_OUTPUT,
};
use crate::theme::THEME;

pub fn draw(f: &mut Frame, app: &mut App) {
    let full = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(full);
    app.output_area = Some(chunks[0]);
    draw_output(f, chunks[0], app);
    draw_status(f, chunks[1], app);

    // Topmost dialog owns the input area used for gestures and clicks.
    app.input_area = None;
    if app.console.is_showing() {
        let focused = app.focus() == Focus::Console;
        let (area, scroll) = draw_dialog(
            f,
            full,
            DialogView {
                title: TITLE_CONSOLE.to_string(),
                message: app.console.message(),
                hint: CONSOLE_HINT,
                input: app.console.input(),
                scroll: app.input_scroll,
                focused,
            },
        );
        if focused {
            app.input_area = Some(area);
            app.input_scroll = scroll;
        }
    }
    if app.keyboard.is_showing() {
        let (area, scroll) = draw_dialog(
            f,
            full,
            DialogView {
                title: keyboard_title(app.keyboard.label()),
                message: "",
                hint: KEYBOARD_HINT,
                input: app.keyboard.input(),
                scroll: app.input_scroll,
                focused: true,
            },
        );
        app.input_area = Some(area);
        app.input_scroll = scroll;
    }
    if app.show_help {
        draw_help(f, full);
    }
}

fn draw_output(f: &mut Frame, area: Rect, app: &mut App) {
    let inner_w = area.width.saturating_sub(2);
    let inner_h = area.height.saturating_sub(2) as usize;
    app.ensure_output_wrapped(inner_w);
    let total = app.output_total_lines();
    app.output_scroll = app.output_scroll.min(app.output_max_scroll());
    let end = total.saturating_sub(app.output_scroll as usize);
    let start = end.saturating_sub(inner_h);

    let mut lines: Vec<Line> = Vec::with_capacity(inner_h);
    let mut idx = 0usize;
    for w in &app.output_cache {
        let style = style_for(w.kind);
        for l in &w.lines {
            if idx >= start && idx < end {
                lines.push(Line::from(Span::styled(l.clone(), style)));
            }
            idx += 1;
        }
        if idx >= end {
            break;
        }
    }

    let block = Block::default()
        .title(TITLE_OUTPUT)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.output_border));
    f.render_widget(Paragraph::new(lines).block(block), area);

    if total > inner_h {
        let mut state = ScrollbarState::new(total.saturating_sub(inner_h)).position(start);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut state,
        );
    }
}

fn style_for(kind: LineKind) -> Style {
    match kind {
        LineKind::Command => Style::default()
            .fg(THEME.command_fg)
            .add_modifier(Modifier::BOLD),
        LineKind::Reply => Style::default().fg(THEME.reply_fg),
        LineKind::Info => Style::default().fg(THEME.info_fg),
        LineKind::Error => Style::default().fg(THEME.error_fg),
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let mode = match app.focus() {
        Focus::Keyboard => "Prompt",
        Focus::Console => "Console",
        Focus::Output => "Output",
    };
    let history = app.console.history();
    let tips = build_status_line(
        mode,
        app.output_scroll,
        history.len(),
        history.cursor(),
        app.pending,
        area.width,
    );
    let para = Paragraph::new(Line::from(Span::styled(
        tips,
        Style::default().fg(THEME.hint_fg),
    )));
    f.render_widget(para, area);
}

struct DialogView<'a> {
    title: String,
    message: &'a str,
    hint: &'a str,
    input: &'a TextBuffer,
    scroll: u16,
    focused: bool,
}

// Draws a modal with a message line, a bordered input line and a hint.
// Returns the inner input rect and the horizontal scroll used for it.
fn draw_dialog(f: &mut Frame, area: Rect, view: DialogView<'_>) -> (Rect, u16) {
    let popup = centered_fixed(70, 7, area);
    let border = if view.focused {
        THEME.border_focus
    } else {
        THEME.border_inactive
    };
    let block = Block::default()
        .title(Span::styled(
            view.title,
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(popup);
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);
    f.render_widget(Paragraph::new(view.message), rows[0]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let input_inner = input_block.inner(rows[1]);
    let scroll = input_scroll_for(view.input.cursor_column(), input_inner.width, view.scroll);
    let para = if view.input.is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(THEME.hint_fg),
        ))
    } else {
        Paragraph::new(view.input.text()).scroll((0, scroll))
    };
    f.render_widget(para.block(input_block), rows[1]);
    f.render_widget(
        Paragraph::new(Span::styled(view.hint, Style::default().fg(THEME.hint_fg))),
        rows[2],
    );

    if view.focused {
        let x = input_inner.x + (view.input.cursor_column() as u16).saturating_sub(scroll);
        f.set_cursor_position(Position::new(x, input_inner.y));
    }
    (input_inner, scroll)
}

// Keep the cursor column within a `width`-wide window, moving the window as
// little as possible.
fn input_scroll_for(cursor_col: usize, width: u16, current: u16) -> u16 {
    let width = width.max(1) as usize;
    let current = current as usize;
    let scroll = if cursor_col < current {
        cursor_col
    } else if cursor_col >= current + width {
        cursor_col + 1 - width
    } else {
        current
    };
    scroll as u16
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(80, 70, area);
    let block = Block::default()
        .title(Span::styled(
            TITLE_HELP,
            Style::default()
                .fg(THEME.border_focus)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let lines: Vec<Line> = help_lines_ascii()
        .iter()
        .map(|l| {
            if l.starts_with(' ') {
                Line::from(*l)
            } else {
                Line::from(Span::styled(*l, Style::default().add_modifier(Modifier::BOLD)))
            }
        })
        .collect();
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_fixed(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let top = r.y + (r.height - height) / 2;
    let row = Rect::new(r.x, top, r.width, height);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(row);
    horiz[1]
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    centered_fixed(percent_x, vert[1].height, vert[1])
}
