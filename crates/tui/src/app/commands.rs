use tracing::{info, warn};
use url::Url;

use super::{App, LineKind};

pub(crate) fn launch_in_browser(url: &str) -> std::io::Result<()> {
    open::that_detached(url)
}

// Only web links are handed to the system opener.
fn parse_web_url(arg: &str) -> Result<Url, String> {
    if arg.is_empty() {
        return Err("usage: /open <url>".to_string());
    }
    let url = Url::parse(arg).map_err(|e| format!("bad url {:?}: {}", arg, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("refusing to open {} url", other)),
    }
}

impl App {
    // Returns true if the text was a local slash command and must not reach
    // the engine.
    pub(crate) fn try_handle_slash_command(&mut self, text: &str) -> bool {
        let s = text.trim();
        let Some(rest) = s.strip_prefix('/') else {
            return false;
        };
        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next().unwrap_or("").trim();
        match cmd.as_str() {
            "keyboard" | "kb" => {
                self.show_keyboard(arg, "");
            }
            "history" => {
                let entries = self.console.history().entries().to_vec();
                if entries.is_empty() {
                    self.push_line(LineKind::Info, "history is empty");
                }
                for (i, e) in entries.iter().enumerate() {
                    self.push_line(LineKind::Info, format!("{:>3}  {}", i + 1, e));
                }
            }
            "clear" => {
                self.output.clear();
                self.output_cache.clear();
                self.output_scroll = 0;
            }
            "open" => match parse_web_url(arg) {
                Ok(url) => self.open_url(&url),
                Err(msg) => self.push_line(LineKind::Error, msg),
            },
            "quit" | "exit" => {
                self.should_quit = true;
            }
            _ => {
                self.push_line(LineKind::Error, format!("unknown local command: /{}", cmd));
            }
        }
        self.dirty = true;
        true
    }

    fn open_url(&mut self, url: &Url) {
        match (self.url_launcher)(url.as_str()) {
            Ok(()) => {
                info!(target: "tui", "opened {}", url);
                self.push_line(LineKind::Info, format!("opened {}", url));
            }
            Err(e) => {
                warn!(target: "tui", "open {} failed: {}", url, e);
                self.push_line(LineKind::Error, format!("open {}: {}", url, e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::harness;
    use super::super::{Focus, OutputLine};
    use super::*;

    fn run(app: &mut App, text: &str) {
        app.open_console();
        app.console.input_mut().set_text(text);
        app.confirm_console();
    }

    #[test]
    fn slash_commands_stay_local_but_enter_history() {
        let mut h = harness(&[]);
        run(&mut h.app, "/keyboard Player name");
        assert!(h.calls.try_recv().is_err());
        assert_eq!(h.app.focus(), Focus::Keyboard);
        assert_eq!(h.app.keyboard.label(), "Player name");
        assert_eq!(h.app.console.history().entries(), ["/keyboard Player name"]);
    }

    #[test]
    fn history_listing_and_clear() {
        let mut h = harness(&["stat fps", "quit"]);
        run(&mut h.app, "/history");
        assert_eq!(
            h.app.output.last(),
            Some(&OutputLine::new(LineKind::Info, "  3  /history"))
        );
        run(&mut h.app, "/clear");
        assert!(h.app.output.is_empty());
    }

    #[test]
    fn unknown_and_quit() {
        let mut h = harness(&[]);
        run(&mut h.app, "/nope");
        assert_eq!(
            h.app.output.last().map(|l| l.kind),
            Some(LineKind::Error)
        );
        assert!(!h.app.should_quit);
        run(&mut h.app, "/quit");
        assert!(h.app.should_quit);
    }

    #[test]
    fn open_accepts_only_web_links() {
        assert!(parse_web_url("https://example.com/docs").is_ok());
        assert_eq!(parse_web_url("").unwrap_err(), "usage: /open <url>");
        assert_eq!(
            parse_web_url("file:///etc/passwd").unwrap_err(),
            "refusing to open file url"
        );
        assert!(parse_web_url("not a url").is_err());
    }

    #[test]
    fn open_reports_launch_outcome() {
        let mut h = harness(&[]);
        run(&mut h.app, "/open https://example.com/");
        assert!(h.calls.try_recv().is_err());
        assert_eq!(
            h.app.output.last(),
            Some(&OutputLine::new(LineKind::Info, "opened https://example.com/"))
        );

        h.app.url_launcher = |_| Err(std::io::Error::other("no browser"));
        run(&mut h.app, "/open http://example.com/");
        assert_eq!(
            h.app.output.last(),
            Some(&OutputLine::new(
                LineKind::Error,
                "open http://example.com/: no browser"
            ))
        );
    }

    #[test]
    fn plain_text_is_not_local() {
        let mut h = harness(&[]);
        assert!(!h.app.try_handle_slash_command("stat fps"));
    }
}
