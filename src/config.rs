use serde::Deserialize;

/// Where session records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    Memory,
    Postgres,
}

impl SessionBackend {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "pg" => Ok(Self::Postgres),
            other => anyhow::bail!("unknown SESSION_STORE `{other}` (expected memory or postgres)"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_hours: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub backend: SessionBackend,
    pub sweep_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24,
            cookie_name: "studyhub_session".into(),
            cookie_secure: false,
            backend: SessionBackend::Memory,
            sweep_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let defaults = SessionConfig::default();
        let session = SessionConfig {
            ttl_hours: env_parse("SESSION_TTL_HOURS").unwrap_or(defaults.ttl_hours),
            cookie_name: std::env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.cookie_secure),
            backend: match std::env::var("SESSION_STORE") {
                Ok(raw) => SessionBackend::parse(&raw)?,
                Err(_) => defaults.backend,
            },
            sweep_secs: env_parse("SESSION_SWEEP_SECS").unwrap_or(defaults.sweep_secs),
        };
        Ok(Self {
            database_url,
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS").unwrap_or(10),
            session,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
