use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use swipecon_core::TextBuffer;

use super::{App, Focus};

impl App {
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
                self.show_help = false;
                self.dirty = true;
            }
            return;
        }
        match self.focus() {
            Focus::Keyboard => match key.code {
                KeyCode::Enter => self.confirm_keyboard(),
                KeyCode::Esc => self.cancel_keyboard(),
                _ => {
                    let buf = self.keyboard.input_mut();
                    if edit_key(buf, key) {
                        self.dirty = true;
                    }
                }
            },
            Focus::Console => match key.code {
                KeyCode::Enter => self.confirm_console(),
                KeyCode::Esc => self.cancel_console(),
                KeyCode::Up => {
                    if self.console.step_backward() {
                        self.dirty = true;
                    }
                }
                KeyCode::Down => {
                    if self.console.step_forward() {
                        self.dirty = true;
                    }
                }
                _ => {
                    let buf = self.console.input_mut();
                    if edit_key(buf, key) {
                        self.dirty = true;
                    }
                }
            },
            Focus::Output => self.on_output_key(key),
        }
    }

    fn on_output_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('`') | KeyCode::F(1) | KeyCode::Enter | KeyCode::Char(':') => {
                self.open_console();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                self.dirty = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::PageUp => self.scroll_output_up(self.output_page()),
            KeyCode::PageDown => self.scroll_output_down(self.output_page()),
            KeyCode::Up => self.scroll_output_up(1),
            KeyCode::Down => self.scroll_output_down(1),
            KeyCode::End => {
                self.output_scroll = 0;
                self.dirty = true;
            }
            _ => {}
        }
    }

    pub fn paste(&mut self, s: &str) {
        // Single-line inputs: newlines in a paste become spaces.
        let flat = s.replace(['\r', '\n'], " ");
        if let Some(buf) = self.active_input_mut() {
            buf.insert_str(&flat);
            self.dirty = true;
        }
    }
}

// Apply an editing key to `buf`. Returns true if the key was an editing key.
fn edit_key(buf: &mut TextBuffer, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => buf.move_home(),
        KeyCode::Char('e') if ctrl => buf.move_end(),
        KeyCode::Char('w') if ctrl => buf.delete_prev_word(),
        KeyCode::Char('u') if ctrl => buf.kill_to_start(),
        KeyCode::Char('k') if ctrl => buf.kill_to_end(),
        KeyCode::Char(_) if ctrl => return false,
        KeyCode::Char(c) => buf.insert_char(c),
        KeyCode::Backspace => buf.delete_left(),
        KeyCode::Delete => buf.delete_right(),
        KeyCode::Left if ctrl => buf.move_word_left(),
        KeyCode::Right if ctrl => buf.move_word_right(),
        KeyCode::Left => buf.move_left(),
        KeyCode::Right => buf.move_right(),
        KeyCode::Home => buf.move_home(),
        KeyCode::End => buf.move_end(),
        _ => return false,
    }
    true
}
