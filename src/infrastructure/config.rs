use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub openai_api_key: String,
    pub cors_origins: Vec<String>,
    pub generation_retries: u32,
    pub generation_delay: Duration,
}

impl AppConfig {
    /// Loads configuration from the environment. A missing session secret or
    /// completion credential is fatal here, before the server ever binds.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let session_secret = std::env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET must be set"))?;
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY must be set"))?;
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let generation_retries = std::env::var("GENERATION_RETRIES")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid GENERATION_RETRIES: {}", e))?;
        let delay_secs: u64 = std::env::var("GENERATION_DELAY_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid GENERATION_DELAY_SECS: {}", e))?;

        Ok(Self {
            host,
            port,
            database_url,
            session_secret,
            openai_api_key,
            cors_origins,
            generation_retries,
            generation_delay: Duration::from_secs(delay_secs),
        })
    }
}
