use crate::http::config::BridgeConfig;
use reqwest::{Client, StatusCode};
use swipecon_core::{BridgeError, DeviceInfo, NativeBridge, WindowInfo};
use tokio::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Engine bridge speaking JSON over HTTP to a remote-console endpoint.
///
/// `POST {base}/console {"command"}` answers with plain text or
/// `{"output": ...}`; `keyboard`, `device` and `window` only need a 2xx.
#[derive(Clone)]
pub struct HttpBridge {
    http: Client,
    cfg: BridgeConfig,
}

impl HttpBridge {
    pub fn new(cfg: BridgeConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            .timeout(cfg.timeout);
        if let Some(p) = &cfg.proxy {
            builder = builder.proxy(reqwest::Proxy::all(p)?);
        }
        let http = builder.build()?;
        info!(target: "bridges::http", "bridge ready base_url={}", cfg.base_url);
        Ok(Self { http, cfg })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BridgeError> {
        self.cfg
            .base_url
            .join(path)
            .map_err(|e| BridgeError::Config(e.to_string()))
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<String, BridgeError> {
        let url = self.endpoint(path)?;
        debug!(target: "bridges::http", "POST {}", url);
        let resp = self
            .http
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_err)?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| BridgeError::Decode(e.to_string()))?;
        if !status.is_success() {
            error!(target: "bridges::http", "{} non-2xx status={} body={:?}", url, status, text);
            return Err(map_status_err(status, text));
        }
        Ok(text)
    }
}

impl NativeBridge for HttpBridge {
    async fn console_command(&self, command: &str) -> Result<String, BridgeError> {
        info!(target: "bridges::http", "console command len={}", command.len());
        let body = self
            .post("console", serde_json::json!({ "command": command }))
            .await?;
        Ok(parse_console_reply(&body))
    }

    async fn virtual_keyboard_result(&self, update: bool, contents: &str) -> Result<(), BridgeError> {
        self.post(
            "keyboard",
            serde_json::json!({ "update": update, "contents": contents }),
        )
        .await
        .map(|_| ())
    }

    async fn set_device_info(&self, info: &DeviceInfo) -> Result<(), BridgeError> {
        let body = serde_json::to_value(info).map_err(|e| BridgeError::Decode(e.to_string()))?;
        self.post("device", body).await.map(|_| ())
    }

    async fn set_window_info(&self, info: &WindowInfo) -> Result<(), BridgeError> {
        let body = serde_json::to_value(info).map_err(|e| BridgeError::Decode(e.to_string()))?;
        self.post("window", body).await.map(|_| ())
    }
}

/// Pull the engine's output out of a console reply body.
pub fn parse_console_reply(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.starts_with('{') {
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
            if let Some(out) = v["output"].as_str() {
                return out.to_string();
            }
            if let Some(msg) = v["error"]["message"].as_str() {
                return format!("[error] {}", msg);
            }
        }
    }
    trimmed.to_string()
}

fn map_reqwest_err(e: reqwest::Error) -> BridgeError {
    if e.is_timeout() {
        BridgeError::Timeout(e.to_string())
    } else if e.is_request() || e.is_connect() {
        BridgeError::Network(e.to_string())
    } else if e.is_builder() {
        BridgeError::Config(e.to_string())
    } else {
        BridgeError::Other(e.to_string())
    }
}

fn map_status_err(status: StatusCode, body: String) -> BridgeError {
    match status {
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            BridgeError::Network(format!("{} {}", status.as_u16(), body))
        }
        StatusCode::REQUEST_TIMEOUT => BridgeError::Timeout(format!("{} {}", status.as_u16(), body)),
        _ => BridgeError::Rejected {
            status: status.as_u16(),
            body,
        },
    }
}
