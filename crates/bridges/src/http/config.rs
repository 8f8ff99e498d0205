use anyhow::{bail, Context};
use directories::BaseDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};
use tracing::warn;
use url::Url;

pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:30010/";

/// Bridge keys of `config.toml`. The file also carries UI settings, which
/// are ignored here.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BridgeFileConfig {
    pub bridge_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct BridgeConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl BridgeConfig {
    pub fn from_env_and_file() -> anyhow::Result<Self> {
        let file_cfg = match config_path() {
            Some(path) if path.exists() => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("read config file: {}", path.display()))?;
                match toml::from_str::<BridgeFileConfig>(&text) {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(target: "bridges::http", "ignoring unparsable {}: {}", path.display(), e);
                        BridgeFileConfig::default()
                    }
                }
            }
            _ => BridgeFileConfig::default(),
        };
        let env_url = env::var("SWIPECON_BRIDGE_URL").ok();
        let proxy = env::var("HTTPS_PROXY")
            .ok()
            .or_else(|| env::var("HTTP_PROXY").ok());
        Self::resolve(env_url, file_cfg, proxy)
    }

    /// Combine the sources; the environment URL wins over the file.
    pub fn resolve(
        env_url: Option<String>,
        file_cfg: BridgeFileConfig,
        proxy: Option<String>,
    ) -> anyhow::Result<Self> {
        let raw = env_url
            .filter(|u| !u.trim().is_empty())
            .or(file_cfg.bridge_url)
            .unwrap_or_else(|| DEFAULT_BRIDGE_URL.to_string());
        Ok(BridgeConfig {
            base_url: parse_base_url(&raw)?,
            timeout: Duration::from_millis(file_cfg.timeout_ms.unwrap_or(5_000)),
            proxy,
        })
    }
}

/// Parse an http(s) base URL, forcing a trailing slash so endpoint paths
/// join beneath it.
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let mut s = raw.trim().to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    let url = Url::parse(&s).with_context(|| format!("invalid bridge url: {}", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("bridge url must be http or https: {}", raw);
    }
    Ok(url)
}

/// Location of the shared `config.toml`.
pub fn config_path() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    let p = if cfg!(target_os = "windows") {
        base.home_dir().join(".swipecon").join("config.toml")
    } else {
        base.config_dir().join("swipecon").join("config.toml")
    };
    Some(p)
}
