use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub emulator: EmulatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Settings for the emulated control planes: which account/region scope
/// requests fall into when the caller does not say, and how large list
/// pages are when the request carries no limit.
#[derive(Debug, Clone, Deserialize)]
pub struct EmulatorConfig {
    #[serde(default = "default_account_id")]
    pub account_id: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            account_id: default_account_id(),
            region: default_region(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_account_id() -> String { "123456789012".to_string() }
fn default_region() -> String { "us-east-1".to_string() }
fn default_page_size() -> usize { 100 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.emulator.normalize_from_env();
        self.emulator.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl EmulatorConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(account) = std::env::var("MOCK_ACCOUNT_ID") {
            if !account.trim().is_empty() {
                self.account_id = account;
            }
        }
        if let Ok(region) = std::env::var("MOCK_REGION") {
            if !region.trim().is_empty() {
                self.region = region;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(anyhow!("emulator.account_id must not be empty"));
        }
        if !self.account_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(anyhow!("emulator.account_id must be numeric"));
        }
        if self.region.trim().is_empty() {
            return Err(anyhow!("emulator.region must not be empty"));
        }
        if self.default_page_size == 0 {
            return Err(anyhow!("emulator.default_page_size must be >= 1"));
        }
        Ok(())
    }
}
