mod app;
mod config;
mod events;
mod logging;
mod persist;
mod strings;
mod terminal;
mod theme;
mod ui;
mod worker;

use anyhow::{Context, Result};
use bridges::http::{BridgeConfig, HttpBridge};
use swipecon_core::{CommandHistory, DeviceInfo, RecordingBridge};
use terminal::TerminalGuard;
use tracing::{info, warn};

fn main() -> Result<()> {
    let _log_guard = logging::init_logging();
    let cfg = config::UiConfig::load();
    let offline = cfg.offline || std::env::args().skip(1).any(|a| a == "--offline");

    let history = if cfg.persist_history {
        match persist::load_history() {
            Ok(h) => h.unwrap_or_default(),
            Err(e) => {
                warn!(target: "tui", "starting with empty history: {:#}", e);
                CommandHistory::new()
            }
        }
    } else {
        CommandHistory::new()
    };

    let (bridge, banner) = if offline {
        info!(target: "tui", "offline mode, commands are only recorded");
        (
            worker::spawn(RecordingBridge::new())?,
            strings::console_banner("offline"),
        )
    } else {
        let bridge_cfg = BridgeConfig::from_env_and_file().context("load bridge config")?;
        let banner = strings::console_banner(bridge_cfg.base_url.as_str());
        (worker::spawn(HttpBridge::new(bridge_cfg)?)?, banner)
    };

    let mut app = app::App::new(&cfg, history, bridge, banner);
    app.post_device_info(DeviceInfo::detect());
    let mut term = TerminalGuard::new()?;
    match crossterm::terminal::size() {
        Ok((cols, rows)) => app.post_window_info(cols, rows),
        Err(e) => warn!(target: "tui", "terminal size unavailable: {}", e),
    }
    events::run(&mut term.terminal, &mut app)
}
