use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use tracing::error;

use crate::{app::App, ui};

pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut last_draw = Instant::now();
    let heartbeat = Duration::from_millis(500);
    loop {
        if app.dirty || last_draw.elapsed() >= heartbeat {
            terminal.draw(|f| ui::draw(f, app))?;
            app.dirty = false;
            last_draw = Instant::now();
        }
        if app.input_area.is_some() {
            let _ = terminal.show_cursor();
        } else {
            let _ = terminal.hide_cursor();
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => app.on_key(key),
                Event::Paste(s) => app.paste(&s),
                Event::Mouse(me) => app.on_mouse(me, Instant::now()),
                Event::Resize(cols, rows) => {
                    app.post_window_info(cols, rows);
                    app.dirty = true;
                }
                _ => {}
            }
        }

        app.on_tick();

        if app.should_quit {
            if app.persist_history {
                if let Err(e) = crate::persist::save_history(app.console.history()) {
                    error!(target: "tui", "save history on exit: {:#}", e);
                }
            }
            break;
        }
    }
    Ok(())
}
