use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use swipecon_core::{Point, PointerOutcome};

use super::{App, Focus};

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

impl App {
    /// Route a mouse event. Left press/release over the console input is a
    /// gesture; anything that is not a swipe falls through to a click that
    /// places the text cursor.
    pub fn on_mouse(&mut self, me: MouseEvent, now: Instant) {
        if self.show_help {
            return;
        }
        let pos = Point::new(me.column as f32, me.row as f32);
        let over_input = self
            .input_area
            .map(|a| contains(a, me.column, me.row))
            .unwrap_or(false);
        match me.kind {
            MouseEventKind::Down(MouseButton::Left) if over_input => match self.focus() {
                Focus::Console => self.console.pointer_down(pos, now),
                Focus::Keyboard => self.click_input(me.column),
                Focus::Output => {}
            },
            MouseEventKind::Up(MouseButton::Left) if self.focus() == Focus::Console => {
                match self.console.pointer_up(pos, now) {
                    PointerOutcome::Selected(_) => {
                        self.dirty = true;
                    }
                    PointerOutcome::Consumed => {}
                    PointerOutcome::Unconsumed => {
                        if over_input {
                            self.click_input(me.column);
                        }
                    }
                }
            }
            MouseEventKind::ScrollUp => {
                if self.over_output(me.column, me.row) {
                    self.scroll_output_up(3);
                }
            }
            MouseEventKind::ScrollDown => {
                if self.over_output(me.column, me.row) {
                    self.scroll_output_down(3);
                }
            }
            _ => {}
        }
    }

    fn over_output(&self, x: u16, y: u16) -> bool {
        self.output_area
            .map(|a| contains(a, x, y))
            .unwrap_or(false)
    }

    fn click_input(&mut self, column: u16) {
        let Some(area) = self.input_area else {
            return;
        };
        let col = column.saturating_sub(area.x) as usize + self.input_scroll as usize;
        if let Some(buf) = self.active_input_mut() {
            buf.set_cursor_from_column(col);
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::harness;
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn down(column: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, 10)
    }

    fn up(column: u16) -> MouseEvent {
        mouse(MouseEventKind::Up(MouseButton::Left), column, 10)
    }

    const INPUT: Rect = Rect {
        x: 10,
        y: 10,
        width: 40,
        height: 1,
    };

    #[test]
    fn drag_right_recalls_older_commands() {
        let mut h = harness(&["stat fps", "stat unit"]);
        h.app.input_area = Some(INPUT);
        let t0 = Instant::now();
        h.app.on_mouse(down(12), t0);
        h.app.on_mouse(up(30), t0 + Duration::from_millis(60));
        assert_eq!(h.app.console.input().text(), "stat unit");
        h.app.on_mouse(down(12), t0);
        h.app.on_mouse(up(30), t0 + Duration::from_millis(60));
        assert_eq!(h.app.console.input().text(), "stat fps");
        h.app.on_mouse(down(40), t0);
        h.app.on_mouse(up(15), t0 + Duration::from_millis(60));
        assert_eq!(h.app.console.input().text(), "stat unit");
    }

    #[test]
    fn release_outside_the_box_still_ends_the_swipe() {
        let mut h = harness(&["a"]);
        h.app.input_area = Some(INPUT);
        let t0 = Instant::now();
        h.app.on_mouse(down(48), t0);
        h.app.on_mouse(up(70), t0 + Duration::from_millis(50));
        assert_eq!(h.app.console.input().text(), "a");
    }

    #[test]
    fn press_outside_the_box_is_not_a_gesture() {
        let mut h = harness(&["a"]);
        h.app.input_area = Some(INPUT);
        let t0 = Instant::now();
        h.app.on_mouse(down(2), t0);
        h.app.on_mouse(up(30), t0 + Duration::from_millis(50));
        assert!(h.app.console.input().is_empty());
    }

    #[test]
    fn slow_drag_becomes_a_click() {
        let mut h = harness(&["a"]);
        h.app.input_area = Some(INPUT);
        h.app.console.input_mut().set_text("stat fps");
        let t0 = Instant::now();
        h.app.on_mouse(down(11), t0);
        h.app.on_mouse(up(13), t0 + Duration::from_millis(900));
        assert_eq!(h.app.console.input().text(), "stat fps");
        assert_eq!(h.app.console.input().cursor(), 3);
    }

    #[test]
    fn click_in_keyboard_prompt_moves_cursor() {
        let mut h = harness(&[]);
        h.app.show_keyboard("Name", "guest");
        h.app.input_area = Some(INPUT);
        h.app.on_mouse(down(12), Instant::now());
        assert_eq!(h.app.keyboard.input().cursor(), 2);
    }
}
