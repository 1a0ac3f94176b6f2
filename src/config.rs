use serde::Deserialize;
use tracing::warn;

/// Fallback used when JWT_SECRET is unset. Development only; startup
/// refuses it when APP_ENV=production.
const DEV_SECRET: &str = "jobboard-dev-secret";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub nominatim_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                if std::env::var("APP_ENV").as_deref() == Ok("production") {
                    anyhow::bail!("JWT_SECRET must be set in production");
                }
                warn!("JWT_SECRET not set, falling back to insecure development secret");
                DEV_SECRET.into()
            }
        };

        let jwt = JwtConfig {
            secret,
            ttl_seconds: std::env::var("JWT_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(3600),
        };

        let nominatim_url = std::env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".into());

        Ok(Self {
            database_url,
            jwt,
            nominatim_url,
        })
    }
}
