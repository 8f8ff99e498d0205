use serde::{Deserialize, Serialize};

/// Host description reported to the engine once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub os_version: String,
    pub make: String,
    pub model: String,
    pub language: String,
}

impl DeviceInfo {
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|k| std::env::var(k).ok())
            .find(|v| !v.trim().is_empty());
        Self {
            os_version: std::env::consts::OS.to_string(),
            make: std::env::consts::FAMILY.to_string(),
            model: std::env::consts::ARCH.to_string(),
            language: normalize_language(locale.as_deref().unwrap_or("")),
        }
    }
}

/// Size of the surface the console is drawn on, re-sent whenever it changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub columns: u16,
    pub rows: u16,
    pub portrait: bool,
}

impl WindowInfo {
    pub fn from_size(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            portrait: rows > columns,
        }
    }
}

// "en_US.UTF-8@euro" -> "en-US"; "C"/"POSIX"/empty -> "en-US"
pub fn normalize_language(locale: &str) -> String {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return "en-US".to_string();
    }
    let mut parts = base.splitn(2, ['_', '-']);
    let lang = parts.next().unwrap_or("").to_lowercase();
    match parts.next() {
        Some(region) if !region.is_empty() => format!("{}-{}", lang, region.to_uppercase()),
        _ => lang,
    }
}
