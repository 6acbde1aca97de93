use anyhow::{Result, anyhow};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub relay_addr: String,
    pub relay_url: String,
    pub script_write_url: Option<String>,
    pub script_read_url: Option<String>,
    pub console_addr: String,
    pub banner_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // 先加载 .env，后续读取环境变量才能拿到其中的值
        let _ = dotenvy::dotenv();

        let relay_addr = env::var("RELAY_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let relay_url = env::var("RELAY_URL")
            .unwrap_or_else(|_| format!("http://{}/api/certidao", relay_addr));
        let script_write_url = env_url("SCRIPT_WRITE_URL")?;
        let script_read_url = env_url("SCRIPT_READ_URL")?;
        let console_addr =
            env::var("CONSOLE_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let banner_timeout_secs = env_u64("BANNER_TIMEOUT_SECS", 5);

        Ok(Self {
            relay_addr,
            relay_url,
            script_write_url,
            script_read_url,
            console_addr,
            banner_timeout_secs,
        })
    }

    pub fn require_write_url(&self) -> Result<&str> {
        self.script_write_url
            .as_deref()
            .ok_or_else(|| anyhow!("SCRIPT_WRITE_URL is required for relay"))
    }

    pub fn require_read_url(&self) -> Result<&str> {
        self.script_read_url
            .as_deref()
            .ok_or_else(|| anyhow!("SCRIPT_READ_URL is required for console"))
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_url(key: &str) -> Result<Option<String>> {
    let raw = match env::var(key) {
        Ok(v) => v.trim().to_string(),
        Err(_) => return Ok(None),
    };
    if raw.is_empty() {
        return Ok(None);
    }
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(anyhow!("{} must be an http(s) url, got {}", key, raw));
    }
    Ok(Some(raw))
}
