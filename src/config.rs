use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: Option<String>,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(10);
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            db_max_connections,
        })
    }

    /// Token signing secret; only the HTTP server needs it.
    pub fn require_jwt_secret(&self) -> anyhow::Result<&str> {
        self.jwt_secret
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is not set"))
    }
}
