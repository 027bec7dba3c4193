use anyhow::Context;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
///
/// | Variable                   | Default                         |
/// |----------------------------|---------------------------------|
/// | `DATABASE_URL`             | `sqlite:taskboard.db?mode=rwc`  |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                             |
/// | `APP_HOST`                 | `127.0.0.1`                     |
/// | `APP_PORT`                 | `4000`                          |
/// | `SESSION_TTL_DAYS`         | `7`                             |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub session_ttl_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:taskboard.db?mode=rwc".to_string(),
            max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 4000,
            session_ttl_days: 7,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            host: std::env::var("APP_HOST").unwrap_or(defaults.host),
            port: parse_var("APP_PORT", defaults.port)?,
            session_ttl_days: parse_var("SESSION_TTL_DAYS", defaults.session_ttl_days)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
