//! Application configuration management.

use serde::Deserialize;

/// Fallback signing secret for non-production environments.
pub const INSECURE_DEV_SECRET: &str = "orbit-dev-secret-do-not-use-in-production";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Auth/JWT configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Application-level settings.
    #[serde(default)]
    pub app: AppSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Auth/JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key for signing tokens. Empty means unset.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token validity window in days.
    #[serde(default = "default_jwt_expiry_days")]
    pub jwt_expiry_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiry_days: default_jwt_expiry_days(),
        }
    }
}

fn default_jwt_expiry_days() -> i64 {
    7
}

/// Application-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Runtime environment name (development, production, ...).
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// A missing JWT secret is a hard error in production. Outside
    /// production it falls back to [`INSECURE_DEV_SECRET`]; callers
    /// should check [`Self::uses_insecure_secret`] and warn.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, or if the
    /// JWT secret is unset while `app.environment` is `production`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ORBIT").separator("__"))
            .build()?;

        let mut loaded: Self = config.try_deserialize()?;

        if loaded.auth.jwt_secret.trim().is_empty() {
            if loaded.is_production() {
                return Err(config::ConfigError::Message(
                    "auth.jwt_secret must be set in production".to_string(),
                ));
            }
            loaded.auth.jwt_secret = INSECURE_DEV_SECRET.to_string();
        }

        Ok(loaded)
    }

    /// Returns true when running with `app.environment = production`.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.app.environment.eq_ignore_ascii_case("production")
    }

    /// Returns true when the JWT secret fell back to the dev default.
    #[must_use]
    pub fn uses_insecure_secret(&self) -> bool {
        self.auth.jwt_secret == INSECURE_DEV_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_vars<F: FnOnce()>(f: F) {
        temp_env::with_vars(
            [
                ("RUN_MODE", None::<&str>),
                ("ORBIT__DATABASE__URL", Some("postgres://localhost/orbit")),
                ("ORBIT__AUTH__JWT_SECRET", None),
                ("ORBIT__APP__ENVIRONMENT", None),
            ],
            f,
        );
    }

    #[test]
    fn test_load_falls_back_to_dev_secret() {
        clear_vars(|| {
            let config = AppConfig::load().unwrap();
            assert!(config.uses_insecure_secret());
            assert_eq!(config.auth.jwt_expiry_days, 7);
        });
    }

    #[test]
    fn test_load_rejects_missing_secret_in_production() {
        temp_env::with_vars(
            [
                ("RUN_MODE", None::<&str>),
                ("ORBIT__DATABASE__URL", Some("postgres://localhost/orbit")),
                ("ORBIT__AUTH__JWT_SECRET", None),
                ("ORBIT__APP__ENVIRONMENT", Some("production")),
            ],
            || {
                let result = AppConfig::load();
                assert!(result.is_err());
            },
        );
    }

    #[test]
    fn test_load_env_secret_wins() {
        temp_env::with_vars(
            [
                ("RUN_MODE", None::<&str>),
                ("ORBIT__DATABASE__URL", Some("postgres://localhost/orbit")),
                ("ORBIT__AUTH__JWT_SECRET", Some("from-env")),
                ("ORBIT__APP__ENVIRONMENT", Some("production")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.auth.jwt_secret, "from-env");
                assert!(!config.uses_insecure_secret());
            },
        );
    }
}
