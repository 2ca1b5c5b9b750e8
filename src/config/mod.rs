use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub http: HttpConfig,
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Ci,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub concurrency: usize,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("ci") | Ok("CI") => Environment::Ci,
            _ => Environment::Development,
        };

        match environment {
            Environment::Ci => Self::ci(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CONTRACT_BASE_URL") {
            if !v.trim().is_empty() {
                self.http.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("CONTRACT_TIMEOUT_SECS") {
            // zero would fail every request immediately
            self.http.timeout_secs = parse_positive(&v).unwrap_or(self.http.timeout_secs);
        }
        if let Ok(v) = env::var("CONTRACT_USER_AGENT") {
            if !v.trim().is_empty() {
                self.http.user_agent = v;
            }
        }
        if let Ok(v) = env::var("CONTRACT_CONCURRENCY") {
            // zero would stall the runner
            self.runner.concurrency = parse_positive(&v).unwrap_or(self.runner.concurrency);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            http: HttpConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 10,
                user_agent: default_user_agent(),
            },
            runner: RunnerConfig { concurrency: 8 },
        }
    }

    fn ci() -> Self {
        Self {
            environment: Environment::Ci,
            http: HttpConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 30,
                user_agent: default_user_agent(),
            },
            runner: RunnerConfig { concurrency: 4 },
        }
    }
}

/// Numeric override that must be above zero; anything else keeps the preset
fn parse_positive<T>(raw: &str) -> Option<T>
where
    T: std::str::FromStr + Default + PartialOrd,
{
    raw.trim().parse().ok().filter(|n: &T| *n > T::default())
}

fn default_user_agent() -> String {
    format!("swapi-contract/{}", env!("CARGO_PKG_VERSION"))
}

// Global singleton config - initialized once on first access
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
